//! Which games to download and how to get them.
//!
//! A month is one request for `<base>/<user>/games/<YYYY>/<MM>/pgn`. A year
//! reads the player's archive index and downloads every monthly archive of
//! that year in order; archives that fail are skipped.

use crate::client::{Fetch, FetchError};
use log::{info, warn};
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PeriodError {
    #[error("invalid year {0:?}: expected four digits such as 2024")]
    InvalidYear(String),
    #[error("invalid month {0:?}: expected 1-12, or 0 for the whole year")]
    InvalidMonth(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Year(u16),
    Month { year: u16, month: u8 },
}

impl Period {
    /// Parses the year and month strings given on the command line; month
    /// `"0"` selects the whole year.
    pub fn parse(year: &str, month: &str) -> Result<Self, PeriodError> {
        let year_str = year.trim();
        let year = match year_str.parse::<u16>() {
            Ok(y) if year_str.len() == 4 && (1000..=9999).contains(&y) => y,
            _ => return Err(PeriodError::InvalidYear(year_str.to_string())),
        };
        let month_str = month.trim();
        match month_str.parse::<u8>() {
            Ok(0) => Ok(Period::Year(year)),
            Ok(month @ 1..=12) => Ok(Period::Month { year, month }),
            _ => Err(PeriodError::InvalidMonth(month_str.to_string())),
        }
    }

    pub fn year(&self) -> u16 {
        match *self {
            Period::Year(year) | Period::Month { year, .. } => year,
        }
    }

    /// `alice_24.txt` for a year, `alice_2403.txt` for March 2024.
    pub fn output_file_name(&self, username: &str) -> String {
        let short_year = self.year() % 100;
        match *self {
            Period::Year(_) => format!("{username}_{short_year:02}.txt"),
            Period::Month { month, .. } => format!("{username}_{short_year:02}{month:02}.txt"),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Period::Year(year) => write!(f, "Year {year}"),
            Period::Month { year, month } => write!(f, "{year}-{month:02}"),
        }
    }
}

pub fn monthly_pgn_url(api_base: &str, username: &str, year: u16, month: u8) -> String {
    format!("{api_base}/{username}/games/{year}/{month:02}/pgn")
}

pub fn archives_url(api_base: &str, username: &str) -> String {
    format!("{api_base}/{username}/games/archives")
}

#[derive(Deserialize)]
struct ArchiveIndex {
    #[serde(default)]
    archives: Vec<String>,
}

/// Reads the `{"archives": [...]}` index. Malformed bodies give an empty
/// list; entries that are not URLs are dropped.
pub fn parse_archive_index(body: &str) -> Vec<String> {
    match serde_json::from_str::<ArchiveIndex>(body) {
        Ok(index) => index
            .archives
            .into_iter()
            .map(|url| url.trim().to_string())
            .filter(|url| url.starts_with("http"))
            .collect(),
        Err(e) => {
            warn!("Could not read archive index: {e}");
            Vec::new()
        }
    }
}

/// Whether an archive URL ending in `/<YYYY>/<MM>` belongs to `year`.
pub fn archive_in_year(url: &str, year: u16) -> bool {
    let mut segments = url.trim_end_matches('/').rsplit('/');
    let _month = segments.next();
    segments
        .next()
        .and_then(|segment| segment.parse::<u16>().ok())
        .is_some_and(|y| y == year)
}

/// Downloads the PGN text for `period`. An empty string means nothing was
/// found.
pub fn fetch_period<F: Fetch + ?Sized>(
    fetcher: &F,
    api_base: &str,
    username: &str,
    period: Period,
) -> Result<String, FetchError> {
    match period {
        Period::Month { year, month } => {
            let url = monthly_pgn_url(api_base, username, year, month);
            info!("Fetching data from: {url}");
            Ok(fetcher.fetch(&url)?.unwrap_or_default())
        }
        Period::Year(year) => fetch_year(fetcher, api_base, username, year),
    }
}

fn fetch_year<F: Fetch + ?Sized>(
    fetcher: &F,
    api_base: &str,
    username: &str,
    year: u16,
) -> Result<String, FetchError> {
    let url = archives_url(api_base, username);
    info!("Fetching ALL games for year {year} from: {url}");
    let Some(index) = fetcher.fetch(&url)? else {
        return Ok(String::new());
    };

    let archives: Vec<String> = parse_archive_index(&index)
        .into_iter()
        .filter(|archive| archive_in_year(archive, year))
        .collect();
    if archives.is_empty() {
        info!("No monthly archives found.");
        return Ok(String::new());
    }
    info!("Found {} monthly archive(s).", archives.len());

    let mut all_pgns = String::new();
    for (i, archive) in archives.iter().enumerate() {
        info!("Processing archive {} of {}...", i + 1, archives.len());
        match fetcher.fetch(&format!("{archive}/pgn")) {
            Ok(Some(body)) if !body.is_empty() => {
                all_pgns.push_str(&body);
                all_pgns.push('\n');
            }
            Ok(_) => {}
            Err(e) => warn!("Skipping archive: {archive} ({e})"),
        }
    }
    Ok(all_pgns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_period() {
        assert_eq!(Period::parse("2024", "0"), Ok(Period::Year(2024)));
        assert_eq!(
            Period::parse(" 2024 ", "3"),
            Ok(Period::Month { year: 2024, month: 3 })
        );
        assert_eq!(
            Period::parse("2024", "12"),
            Ok(Period::Month { year: 2024, month: 12 })
        );
    }

    #[test]
    fn test_parse_period_rejects_bad_input() {
        assert_eq!(
            Period::parse("24", "1"),
            Err(PeriodError::InvalidYear("24".to_string()))
        );
        assert_eq!(
            Period::parse("abcd", "1"),
            Err(PeriodError::InvalidYear("abcd".to_string()))
        );
        assert_eq!(
            Period::parse("2024", "13"),
            Err(PeriodError::InvalidMonth("13".to_string()))
        );
        assert_eq!(
            Period::parse("2024", "june"),
            Err(PeriodError::InvalidMonth("june".to_string()))
        );
    }

    #[test]
    fn test_output_file_names() {
        assert_eq!(Period::Year(2024).output_file_name("alice"), "alice_24.txt");
        assert_eq!(
            Period::Month { year: 2023, month: 7 }.output_file_name("alice"),
            "alice_2307.txt"
        );
        assert_eq!(Period::Year(2005).output_file_name("bob"), "bob_05.txt");
    }

    #[test]
    fn test_period_display() {
        assert_eq!(Period::Year(2024).to_string(), "Year 2024");
        assert_eq!(Period::Month { year: 2024, month: 3 }.to_string(), "2024-03");
    }

    #[test]
    fn test_urls() {
        let base = "https://api.chess.com/pub/player";
        assert_eq!(
            monthly_pgn_url(base, "alice", 2024, 3),
            "https://api.chess.com/pub/player/alice/games/2024/03/pgn"
        );
        assert_eq!(
            archives_url(base, "alice"),
            "https://api.chess.com/pub/player/alice/games/archives"
        );
    }

    #[test]
    fn test_parse_archive_index_unescapes_slashes() {
        let body = r#"{"archives":["https:\/\/api.chess.com\/pub\/player\/alice\/games\/2024\/01","https://api.chess.com/pub/player/alice/games/2024/02"]}"#;
        assert_eq!(
            parse_archive_index(body),
            vec![
                "https://api.chess.com/pub/player/alice/games/2024/01".to_string(),
                "https://api.chess.com/pub/player/alice/games/2024/02".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_archive_index_tolerates_bad_input() {
        assert!(parse_archive_index("").is_empty());
        assert!(parse_archive_index("not json").is_empty());
        assert!(parse_archive_index("{}").is_empty());
        assert!(parse_archive_index(r#"{"archives": "nope"}"#).is_empty());
        assert_eq!(parse_archive_index(r#"{"archives": ["", "ftp://x", "http://y"]}"#), vec!["http://y"]);
    }

    #[test]
    fn test_archive_in_year() {
        let url = "https://api.chess.com/pub/player/alice/games/2024/01";
        assert!(archive_in_year(url, 2024));
        assert!(archive_in_year(&format!("{url}/"), 2024));
        assert!(!archive_in_year(url, 2023));
        assert!(!archive_in_year("https://example.com/", 2024));
    }
}
