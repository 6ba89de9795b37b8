use anyhow::{Context, Result};
use chess_report::client::HttpClient;
use chess_report::config::ReportConfig;
use chess_report::pipeline::{self, RunOptions, RunOutcome};
use chess_report::report::console_summary;
use chess_report::source::Period;
use chess_report::timecontrol::TimeControlFilter;
use chess_report::Error;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Download a chess.com player's games and write a statistics report.
///
/// Any positional argument left out is asked for interactively.
#[derive(Parser)]
#[command(name = "chess-report", version)]
struct Args {
    /// chess.com username
    username: Option<String>,
    /// Four-digit year, e.g. 2024
    year: Option<String>,
    /// Month 1-12, or 0 for the entire year
    month: Option<String>,
    /// Time control such as 600 or 180+2, or 0 for all games
    time_control: Option<String>,
    /// Config file (defaults to ./chess-report.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory to write the report into
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn value_or_prompt(value: Option<String>, label: &str) -> io::Result<String> {
    match value {
        Some(v) => Ok(v.trim().to_string()),
        None => prompt(label),
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ReportConfig::load_from(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ReportConfig::load().context("loading chess-report.toml")?,
    };
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }

    let username = value_or_prompt(args.username, "Enter Chess.com username: ")?;
    let year = value_or_prompt(args.year, "Enter year : ")?;
    let month = value_or_prompt(args.month, "Enter month (0 for entire year): ")?;
    let time_control = value_or_prompt(
        args.time_control,
        "Enter time control filter (e.g., 600, 180+2, or 0 for all games): ",
    )?;

    let options = RunOptions {
        period: Period::parse(&year, &month).map_err(Error::from)?,
        username,
        filter: TimeControlFilter::parse(&time_control),
    };

    println!("chess-report");
    println!("{}", "=".repeat(50));
    println!("Username: {}", options.username);
    println!("Period: {}", options.period);
    println!("Time control: {}", options.filter);
    println!();

    let client = HttpClient::new(&config).map_err(Error::from)?;
    match pipeline::run(&client, &config, &options)? {
        RunOutcome::NoData => {
            println!("No games found or the user/month/year is invalid.");
        }
        RunOutcome::NoMatches { .. } => {
            println!("No games match the specified time control filter.");
        }
        RunOutcome::Written { path, stats } => {
            println!("\nSuccess! Games saved to: {}", path.display());
            println!();
            print!("{}", console_summary(&stats));
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {e:#}");
        if matches!(e.downcast_ref::<Error>(), Some(Error::Fetch(_))) {
            println!("\nPossible reasons:");
            println!("1. The username might be incorrect");
            println!("2. There are no games for the specified year/month");
            println!("3. The year might be in the future");
            println!("4. Network connection issue");
        }
        std::process::exit(1);
    }
}
