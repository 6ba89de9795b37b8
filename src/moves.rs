//! Move-text cleanup and move counting.

use regex::Regex;
use std::sync::LazyLock;

const RESULT_TOKENS: [&str; 3] = ["1-0", "0-1", "1/2-1/2"];

// `{[%clk 0:02:59.9]}` / `{[%eval 0.17]}` as emitted by chess.com.
static ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\s*\[%(?:clk|eval)\b[^\]]*\]\s*\}").expect("valid annotation regex")
});

static TRAILING_RESULT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\s*(?:1-0|0-1|1/2-1/2))+\s*$").expect("valid trailing result regex")
});

/// Removes clock/eval annotations and the trailing result, and collapses
/// whitespace. Applying it twice gives the same text.
pub fn clean_moves(move_text: &str) -> String {
    let mut stripped = move_text.to_string();
    // Removing one annotation can splice the halves of another together.
    while ANNOTATION.is_match(&stripped) {
        stripped = ANNOTATION.replace_all(&stripped, "").into_owned();
    }
    let stripped = TRAILING_RESULT.replace(&stripped, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_move_number(token: &str) -> bool {
    let digits = token
        .strip_suffix("...")
        .or_else(|| token.strip_suffix('.'))
        .unwrap_or("");
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Approximate number of full moves: every token that is not a move number
/// or a result counts as one ply, and two plies make a move.
///
/// Move syntax is not validated.
pub fn count_moves(moves: &str) -> u32 {
    let plies = moves
        .split_whitespace()
        .filter(|token| !is_move_number(token) && !RESULT_TOKENS.contains(token))
        .count();
    (plies / 2) as u32
}
