//! One end-to-end run: download, split, parse, filter, write and report.

use crate::client::Fetch;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::game::parse_game;
use crate::report::{format_game_entry, render_report};
use crate::source::{fetch_period, Period};
use crate::splitter::split_games;
use crate::stats::StatsAggregator;
use crate::timecontrol::TimeControlFilter;
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub username: String,
    pub period: Period,
    pub filter: TimeControlFilter,
}

#[derive(Debug)]
pub enum RunOutcome {
    /// Nothing was downloaded; no file is written.
    NoData,
    /// Games were downloaded but none passed the time-control filter.
    NoMatches { path: PathBuf },
    Written {
        path: PathBuf,
        stats: StatsAggregator,
    },
}

/// Parses every game in `pgn`, writes an entry for each one admitted by
/// `filter`, and returns the statistics over those games.
pub fn process_games<W: Write>(
    pgn: &str,
    target: &str,
    filter: &TimeControlFilter,
    out: &mut W,
) -> io::Result<StatsAggregator> {
    let mut stats = StatsAggregator::new();
    let blocks = split_games(pgn);
    let mut admitted = 0;

    for (i, block) in blocks.iter().enumerate() {
        let record = parse_game(block, target);
        if !filter.matches(&record.time_control_raw) {
            debug!(
                "Game {}: skipped (time control {})",
                i + 1,
                record.time_control_raw
            );
            continue;
        }
        admitted += 1;
        debug!("Game {}: added as #{admitted}", i + 1);
        out.write_all(format_game_entry(admitted, &record).as_bytes())?;
        stats.admit(&record);
    }

    info!("Finished processing {admitted} of {} game(s).", blocks.len());
    Ok(stats)
}

/// Downloads the requested period and writes the report file into
/// `config.output_dir`.
pub fn run<F: Fetch + ?Sized>(
    fetcher: &F,
    config: &ReportConfig,
    options: &RunOptions,
) -> Result<RunOutcome> {
    let pgn = fetch_period(
        fetcher,
        config.api_base(),
        &options.username,
        options.period,
    )?;
    if pgn.trim().is_empty() {
        return Ok(RunOutcome::NoData);
    }

    let path = config
        .output_dir
        .join(options.period.output_file_name(&options.username));
    info!("Processing games into {}", path.display());
    let mut writer = BufWriter::new(File::create(&path)?);

    let stats = process_games(&pgn, &options.username, &options.filter, &mut writer)?;
    if stats.total_games() == 0 {
        writer.flush()?;
        return Ok(RunOutcome::NoMatches { path });
    }

    let report = render_report(&stats, &options.username, &options.period.to_string());
    writer.write_all(report.as_bytes())?;
    writer.flush()?;
    Ok(RunOutcome::Written { path, stats })
}
