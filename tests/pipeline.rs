use chess_report::client::{Fetch, FetchError};
use chess_report::config::ReportConfig;
use chess_report::pipeline::{run, RunOptions, RunOutcome};
use chess_report::source::{fetch_period, Period};
use chess_report::timecontrol::TimeControlFilter;
use chess_report::Error;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

const BASE: &str = "https://api.test/pub/player";

enum Canned {
    Body(String),
    NotFound,
    Status(u16),
}

/// Serves canned responses and records every URL requested.
#[derive(Default)]
struct StubFetcher {
    responses: HashMap<String, Canned>,
    requested: RefCell<Vec<String>>,
}

impl StubFetcher {
    fn with(mut self, url: &str, response: Canned) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }
}

impl Fetch for StubFetcher {
    fn fetch(&self, url: &str) -> Result<Option<String>, FetchError> {
        self.requested.borrow_mut().push(url.to_string());
        match self.responses.get(url) {
            Some(Canned::Body(body)) => Ok(Some(body.clone())),
            Some(Canned::NotFound) | None => Ok(None),
            Some(Canned::Status(status)) => Err(FetchError::Status {
                status: *status,
                url: url.to_string(),
            }),
        }
    }
}

fn game(white: &str, black: &str, result: &str, tc: &str, elo: u32, date: &str) -> String {
    format!(
        "[Event \"Live Chess\"]\n[Site \"Chess.com\"]\n[White \"{white}\"]\n[Black \"{black}\"]\n\
         [Result \"{result}\"]\n[UTCDate \"{date}\"]\n[WhiteElo \"{elo}\"]\n[BlackElo \"{elo}\"]\n\
         [TimeControl \"{tc}\"]\n\n\
         1. e4 {{[%clk 0:02:59.9]}} 1... e5 {{[%clk 0:02:59.1]}} 2. Nf3 {{[%clk 0:02:58]}} \
         2... Nc6 {{[%clk 0:02:57]}} {result}\n"
    )
}

fn month_body(games: &[String]) -> String {
    games.join("\n")
}

fn temp_output_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chess_report_{name}_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn config_for(dir: PathBuf) -> ReportConfig {
    ReportConfig {
        api_base: BASE.to_string(),
        output_dir: dir,
        ..ReportConfig::default()
    }
}

#[test]
fn test_annual_fetch_skips_failed_archive_and_other_years() {
    let index = format!(
        r#"{{"archives":["{BASE}/alice/games/2023/12","{BASE}/alice/games/2024/01","{BASE}/alice/games/2024/02","{BASE}/alice/games/2024/03"]}}"#
    )
    .replace('/', "\\/");
    let january = month_body(&[game("alice", "bob", "1-0", "180", 1200, "2024.01.01")]);
    let march = month_body(&[game("bob", "alice", "1-0", "180", 1250, "2024.03.15")]);

    let fetcher = StubFetcher::default()
        .with(&format!("{BASE}/alice/games/archives"), Canned::Body(index))
        .with(&format!("{BASE}/alice/games/2024/01/pgn"), Canned::Body(january))
        .with(&format!("{BASE}/alice/games/2024/02/pgn"), Canned::Status(500))
        .with(&format!("{BASE}/alice/games/2024/03/pgn"), Canned::Body(march));

    let pgn = fetch_period(&fetcher, BASE, "alice", Period::Year(2024)).unwrap();

    assert!(pgn.contains("2024.01.01"));
    assert!(pgn.contains("2024.03.15"));
    assert_eq!(
        *fetcher.requested.borrow(),
        vec![
            format!("{BASE}/alice/games/archives"),
            format!("{BASE}/alice/games/2024/01/pgn"),
            format!("{BASE}/alice/games/2024/02/pgn"),
            format!("{BASE}/alice/games/2024/03/pgn"),
        ]
    );
}

#[test]
fn test_monthly_fetch_failure_aborts() {
    let fetcher = StubFetcher::default().with(
        &format!("{BASE}/alice/games/2024/01/pgn"),
        Canned::Status(503),
    );
    let options = RunOptions {
        username: "alice".to_string(),
        period: Period::Month { year: 2024, month: 1 },
        filter: TimeControlFilter::Any,
    };
    let dir = temp_output_dir("abort");

    let result = run(&fetcher, &config_for(dir.clone()), &options);

    assert!(matches!(
        result,
        Err(Error::Fetch(FetchError::Status { status: 503, .. }))
    ));
    assert!(!dir.join("alice_2401.txt").exists());
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_not_found_is_no_data() {
    let fetcher = StubFetcher::default();
    let options = RunOptions {
        username: "nobody".to_string(),
        period: Period::Year(2024),
        filter: TimeControlFilter::Any,
    };
    let dir = temp_output_dir("no_data");

    let outcome = run(&fetcher, &config_for(dir.clone()), &options).unwrap();

    assert!(matches!(outcome, RunOutcome::NoData));
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_malformed_archive_index_is_no_data() {
    let fetcher = StubFetcher::default().with(
        &format!("{BASE}/alice/games/archives"),
        Canned::Body("<html>maintenance</html>".to_string()),
    );
    let pgn = fetch_period(&fetcher, BASE, "alice", Period::Year(2024)).unwrap();
    assert!(pgn.is_empty());
    assert_eq!(fetcher.requested.borrow().len(), 1);
}

#[test]
fn test_monthly_run_writes_games_then_report() {
    let body = month_body(&[
        game("alice", "bob", "1-0", "180+2", 1200, "2024.01.01"),
        game("carol", "alice", "1/2-1/2", "600", 1400, "2024.01.05"),
        game("bob", "alice", "1-0", "180+2", 1250, "2024.01.15"),
        game("dave", "erin", "0-1", "180+2", 1000, "2024.01.20"),
    ]);
    let fetcher = StubFetcher::default()
        .with(&format!("{BASE}/alice/games/2024/01/pgn"), Canned::Body(body))
        .with(&format!("{BASE}/alice/games/2024/01"), Canned::NotFound);
    let options = RunOptions {
        username: "Alice".to_string(),
        period: Period::Month { year: 2024, month: 1 },
        filter: TimeControlFilter::parse("180"),
    };
    let dir = temp_output_dir("monthly");

    let outcome = run(&fetcher, &config_for(dir.clone()), &options).unwrap();

    let RunOutcome::Written { path, stats } = outcome else {
        panic!("expected a written report");
    };
    assert_eq!(path, dir.join("Alice_2401.txt"));
    assert_eq!(stats.total_games(), 3);
    assert_eq!(stats.unknown_color_games(), 1);

    let contents = fs::read_to_string(&path).unwrap();
    let first_game = contents.find("--- Game 1 (won) 3|2 (Blitz) ---").unwrap();
    let third_game = contents.find("--- Game 3 (unknown) 3|2 (Blitz) ---").unwrap();
    let report = contents.find("CHESS.COM GAME STATISTICS").unwrap();
    assert!(first_game < third_game && third_game < report);

    assert!(contents.contains("--- Game 2 (lost) 3|2 (Blitz) ---\nColor: Black | Rating: 1250 | Date: 2024.01.15\n"));
    assert!(contents.contains("1. e4 1... e5 2. Nf3 2... Nc6\n\n"));
    assert!(!contents.contains("%clk"));
    assert!(contents.contains("Username: Alice | Period: 2024-01"));
    assert!(contents.contains("Total Games: 3\n"));
    assert!(contents.contains("Blitz       : +50 (Start: 1200, End: 1250, Avg: 1225)"));
    assert!(contents.contains("As White (1 games):"));
    assert!(contents.contains("As Black (1 games):"));
    assert!(!contents.contains("Rapid"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_filter_with_no_matches() {
    let body = month_body(&[game("alice", "bob", "1-0", "600", 1500, "2024.02.01")]);
    let fetcher = StubFetcher::default()
        .with(&format!("{BASE}/alice/games/2024/02/pgn"), Canned::Body(body));
    let options = RunOptions {
        username: "alice".to_string(),
        period: Period::Month { year: 2024, month: 2 },
        filter: TimeControlFilter::parse("60"),
    };
    let dir = temp_output_dir("no_matches");

    let outcome = run(&fetcher, &config_for(dir.clone()), &options).unwrap();

    assert!(matches!(outcome, RunOutcome::NoMatches { .. }));
    let contents = fs::read_to_string(dir.join("alice_2402.txt")).unwrap();
    assert!(contents.is_empty());
    fs::remove_dir_all(&dir).ok();
}
