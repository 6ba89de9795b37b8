//! Turns one PGN game block into a [`GameRecord`] seen from a target
//! player's side of the board.

use crate::header::{extract_header, header_value, MISSING};
use crate::moves::{clean_moves, count_moves};
use crate::timecontrol::{format_time_control, game_type, GameType};
use chrono::NaiveDate;
use shakmaty::Color;
use std::fmt;

/// Shown in place of a date when neither `UTCDate` nor `Date` is set.
pub const UNKNOWN_DATE: &str = "unknown";

/// Outcome of a game for the target player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultLabel {
    Won,
    Lost,
    Draw,
    Unknown,
}

impl ResultLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultLabel::Won => "won",
            ResultLabel::Lost => "lost",
            ResultLabel::Draw => "draw",
            ResultLabel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ResultLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().replace('"', "").to_lowercase()
}

/// Which side `target` played, compared case-insensitively and ignoring
/// quote characters. `None` when the target is neither player.
pub fn perspective(target: &str, white: &str, black: &str) -> Option<Color> {
    let target = normalize_name(target);
    if target == normalize_name(white) {
        Some(Color::White)
    } else if target == normalize_name(black) {
        Some(Color::Black)
    } else {
        None
    }
}

pub fn color_label(side: Option<Color>) -> &'static str {
    match side {
        Some(Color::White) => "White",
        Some(Color::Black) => "Black",
        None => "Unknown",
    }
}

/// Maps a PGN `Result` code onto the target's side.
pub fn result_for(side: Option<Color>, code: &str) -> ResultLabel {
    let Some(side) = side else {
        return ResultLabel::Unknown;
    };
    let winner = match code.trim() {
        "1-0" => Color::White,
        "0-1" => Color::Black,
        "1/2-1/2" => return ResultLabel::Draw,
        _ => return ResultLabel::Unknown,
    };
    if winner == side {
        ResultLabel::Won
    } else {
        ResultLabel::Lost
    }
}

fn parse_rating(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|rating| *rating > 0)
}

/// Parses `YYYY.MM.DD`; partial dates such as `2024.??.??` give `None`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y.%m.%d").ok()
}

/// Structured view of one game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    /// Cleaned move text.
    pub moves: String,
    pub move_count: u32,
    pub result: ResultLabel,
    pub time_control_display: String,
    pub game_type: GameType,
    pub time_control_raw: String,
    pub white_player: String,
    pub black_player: String,
    pub white_rating: Option<u32>,
    pub black_rating: Option<u32>,
    /// Raw `UTCDate`/`Date` value, or [`UNKNOWN_DATE`].
    pub date: String,
    pub perspective: Option<Color>,
}

impl GameRecord {
    /// Rating of the target's side, if the target was identified and the
    /// tag held a positive number.
    pub fn rating(&self) -> Option<u32> {
        match self.perspective? {
            Color::White => self.white_rating,
            Color::Black => self.black_rating,
        }
    }

    pub fn color_label(&self) -> &'static str {
        color_label(self.perspective)
    }

    pub fn played_on(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Splits a block into its tag section and its move text. Tag lines are
/// only recognised before the first non-tag line.
fn partition(block: &str) -> (String, String) {
    let mut headers = String::new();
    let mut moves = Vec::new();
    let mut in_moves = false;
    for line in block.lines().map(str::trim) {
        if line.starts_with('[') {
            if !in_moves {
                headers.push_str(line);
                headers.push('\n');
            }
        } else {
            in_moves = true;
            if !line.is_empty() {
                moves.push(line);
            }
        }
    }
    (headers, moves.join(" "))
}

/// Parses one game block relative to `target`.
///
/// Malformed fields never fail the parse: they degrade to `?`, `None` or
/// [`GameType::Unknown`].
pub fn parse_game(block: &str, target: &str) -> GameRecord {
    let (headers, move_text) = partition(block);
    let moves = clean_moves(&move_text);

    let white_player = extract_header(&headers, "White");
    let black_player = extract_header(&headers, "Black");
    let time_control_raw = extract_header(&headers, "TimeControl");
    let event = extract_header(&headers, "Event");
    let date = header_value(&headers, "UTCDate")
        .or_else(|| header_value(&headers, "Date"))
        .unwrap_or(UNKNOWN_DATE);

    let side = perspective(target, white_player, black_player);

    GameRecord {
        move_count: count_moves(&moves),
        moves,
        result: result_for(side, extract_header(&headers, "Result")),
        time_control_display: format_time_control(time_control_raw),
        game_type: game_type(time_control_raw, event),
        time_control_raw: time_control_raw.to_string(),
        white_player: white_player.to_string(),
        black_player: black_player.to_string(),
        white_rating: header_value(&headers, "WhiteElo").and_then(parse_rating),
        black_rating: header_value(&headers, "BlackElo").and_then(parse_rating),
        date: date.to_string(),
        perspective: side,
    }
}

impl Default for GameRecord {
    fn default() -> Self {
        GameRecord {
            moves: String::new(),
            move_count: 0,
            result: ResultLabel::Unknown,
            time_control_display: format_time_control(MISSING),
            game_type: GameType::Unknown,
            time_control_raw: MISSING.to_string(),
            white_player: MISSING.to_string(),
            black_player: MISSING.to_string(),
            white_rating: None,
            black_rating: None,
            date: UNKNOWN_DATE.to_string(),
            perspective: None,
        }
    }
}
