//! Splits a PGN blob holding many games into one block per game.
//!
//! A new game starts wherever a blank line is directly followed by a line
//! beginning with `[`. Monthly downloads joined with a single newline still
//! split correctly because each download already ends with a line break.

use log::warn;

pub fn split_games(pgn: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut start = 0;
    let mut offset = 0;
    let mut after_blank = false;

    for line in pgn.split_inclusive('\n') {
        if after_blank && line.starts_with('[') && offset > start {
            push_block(&mut blocks, &pgn[start..offset]);
            start = offset;
        }
        after_blank = line.trim().is_empty();
        offset += line.len();
    }
    push_block(&mut blocks, &pgn[start..]);
    blocks
}

fn push_block<'a>(blocks: &mut Vec<&'a str>, raw: &'a str) {
    let block = raw.trim();
    if block.is_empty() {
        return;
    }
    if !block.starts_with('[') {
        let preview: String = block.chars().take(40).collect();
        warn!("Discarding text without a tag section: {preview:?}");
        return;
    }
    blocks.push(block);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::parse_game;

    fn game(white: &str, black: &str, result: &str) -> String {
        format!(
            "[Event \"Live Chess\"]\n[White \"{white}\"]\n[Black \"{black}\"]\n\
             [Result \"{result}\"]\n[TimeControl \"600\"]\n\n1. e4 e5 2. Nf3 {result}"
        )
    }

    #[test]
    fn test_single_blank_line_separates_games() {
        let games = [
            game("alice", "bob", "1-0"),
            game("carol", "alice", "0-1"),
            game("alice", "dave", "1/2-1/2"),
        ];
        let blob = games.join("\n\n");
        let blocks = split_games(&blob);

        assert_eq!(blocks.len(), games.len());
        for (block, original) in blocks.iter().zip(&games) {
            assert_eq!(*block, original.as_str());
            assert_eq!(parse_game(block, "alice"), parse_game(original, "alice"));
        }
    }

    #[test]
    fn test_header_to_moves_gap_does_not_split() {
        let blob = game("alice", "bob", "1-0");
        assert_eq!(split_games(&blob), vec![blob.as_str()]);
    }

    #[test]
    fn test_concatenated_monthly_downloads() {
        // Each monthly body ends with a newline; the join adds exactly one more.
        let january = format!("{}\n\n{}\n", game("a", "b", "1-0"), game("b", "a", "0-1"));
        let february = format!("{}\n", game("a", "c", "1/2-1/2"));
        let blob = [january, february].join("\n");

        assert_eq!(split_games(&blob).len(), 3);
    }

    #[test]
    fn test_whitespace_only_separator_and_crlf() {
        let blob = format!(
            "{}\r\n   \r\n{}",
            game("a", "b", "1-0").replace('\n', "\r\n"),
            game("a", "b", "0-1").replace('\n', "\r\n")
        );
        let blocks = split_games(&blob);
        assert_eq!(blocks.len(), 2);
        assert_eq!(parse_game(blocks[1], "a").black_player, "b");
    }

    #[test]
    fn test_empty_and_headerless_input() {
        assert!(split_games("").is_empty());
        assert!(split_games("\n\n  \n").is_empty());
        assert!(split_games("1. e4 e5 1-0").is_empty());
    }

    #[test]
    fn test_leading_garbage_is_dropped() {
        let blob = format!("stray text\n\n{}", game("a", "b", "1-0"));
        let blocks = split_games(&blob);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].starts_with("[Event"));
    }
}
