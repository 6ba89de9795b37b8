//! Time-control parsing, game-type classification and the time-control
//! filter applied before games are counted.
//!
//! chess.com writes live time controls as `"<base seconds>"` or
//! `"<base seconds>+<increment seconds>"`. Daily games use a
//! `"<moves>/<seconds>"` form which is not parsed here and classifies as
//! unknown. A parsable token under a daily `Event` is classified as daily.

use std::fmt;

/// Display form used when a token cannot be parsed.
pub const UNKNOWN_DISPLAY: &str = "?|?";

/// Coarse pace category of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GameType {
    Bullet,
    Blitz,
    Rapid,
    Classical,
    Correspondence,
    Daily,
    Unknown,
}

impl GameType {
    pub fn as_str(self) -> &'static str {
        match self {
            GameType::Bullet => "Bullet",
            GameType::Blitz => "Blitz",
            GameType::Rapid => "Rapid",
            GameType::Classical => "Classical",
            GameType::Correspondence => "Correspondence",
            GameType::Daily => "Daily",
            GameType::Unknown => "Unknown",
        }
    }

    /// Category for a base time given in whole minutes.
    pub fn from_base_minutes(minutes: u32) -> Self {
        match minutes {
            0..=1 => GameType::Bullet,
            2..=3 => GameType::Blitz,
            4..=10 => GameType::Rapid,
            11..=30 => GameType::Classical,
            _ => GameType::Correspondence,
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `base[+increment]` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeControl {
    pub base_seconds: u32,
    pub increment_seconds: u32,
}

impl TimeControl {
    /// Parses `"600"` or `"180+2"`. Sentinels (`"?"`, `"-"`, empty) and
    /// anything non-numeric return `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (base, increment) = match raw.split_once('+') {
            Some((base, inc)) => (base, Some(inc)),
            None => (raw, None),
        };
        let base_seconds = parse_seconds(base)?;
        let increment_seconds = match increment {
            Some(inc) => parse_seconds(inc)?,
            None => 0,
        };
        Some(TimeControl {
            base_seconds,
            increment_seconds,
        })
    }

    pub fn base_minutes(&self) -> u32 {
        self.base_seconds / 60
    }
}

impl fmt::Display for TimeControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.base_minutes(), self.increment_seconds)
    }
}

fn parse_seconds(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// `"<minutes>|<increment>"`, or [`UNKNOWN_DISPLAY`].
pub fn format_time_control(raw: &str) -> String {
    TimeControl::parse(raw).map_or_else(|| UNKNOWN_DISPLAY.to_string(), |tc| tc.to_string())
}

/// Classifies a game from its `TimeControl` and `Event` tags.
///
/// Unparsable tokens are always [`GameType::Unknown`]. Otherwise an event
/// mentioning "Daily" yields [`GameType::Daily`] regardless of the base time.
pub fn game_type(raw: &str, event: &str) -> GameType {
    let Some(tc) = TimeControl::parse(raw) else {
        return GameType::Unknown;
    };
    if event.contains("Daily") {
        GameType::Daily
    } else {
        GameType::from_base_minutes(tc.base_minutes())
    }
}

/// Which games are admitted into a run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TimeControlFilter {
    /// Every game; written as `"0"` on the command line.
    #[default]
    Any,
    Only(String),
}

impl TimeControlFilter {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "" | "0" => TimeControlFilter::Any,
            token => TimeControlFilter::Only(token.to_string()),
        }
    }

    /// A filter without an increment (`"600"`) matches every game with that
    /// base time; `"180+2"` matches only exactly.
    pub fn matches(&self, raw: &str) -> bool {
        let filter = match self {
            TimeControlFilter::Any => return true,
            TimeControlFilter::Only(filter) => filter.as_str(),
        };
        let raw = raw.trim();
        if matches!(raw, "" | "?" | "-") {
            return false;
        }
        if raw == filter {
            return true;
        }
        if filter.contains('+') {
            return false;
        }
        raw.split_once('+').map_or(raw, |(base, _)| base) == filter
    }
}

impl fmt::Display for TimeControlFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeControlFilter::Any => f.write_str("all"),
            TimeControlFilter::Only(token) => f.write_str(token),
        }
    }
}
