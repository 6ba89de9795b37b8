//! Plain-text rendering of game entries and the final statistics report.

use crate::game::GameRecord;
use crate::stats::{StatsAggregator, Tally};
use shakmaty::Color;

const WIDTH: usize = 60;
const TITLE: &str = "CHESS.COM GAME STATISTICS";
const FOOTER: &str = "Report generated by chess-report";

/// Up to two decimals with trailing zeros dropped: `50`, `33.33`, `12.5`.
pub fn format_decimal(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

fn separator() -> String {
    "=".repeat(WIDTH)
}

fn center(text: &str) -> String {
    let padding = WIDTH.saturating_sub(text.chars().count()) / 2;
    format!("{}{}", " ".repeat(padding), text)
}

fn tally_line(label_win: &str, label_loss: &str, tally: &Tally) -> String {
    format!(
        "{}: {} ({}%) | {}: {} ({}%) | Draw: {} ({}%)",
        label_win,
        tally.won,
        format_decimal(tally.win_rate()),
        label_loss,
        tally.lost,
        format_decimal(tally.loss_rate()),
        tally.draw,
        format_decimal(tally.draw_rate()),
    )
}

/// One game block as written to the report file, blank line included.
pub fn format_game_entry(index: usize, record: &GameRecord) -> String {
    let rating = record
        .rating()
        .map_or_else(|| "?".to_string(), |r| r.to_string());
    format!(
        "--- Game {} ({}) {} ({}) ---\nColor: {} | Rating: {} | Date: {}\n{}\n\n",
        index,
        record.result,
        record.time_control_display,
        record.game_type,
        record.color_label(),
        rating,
        record.date,
        record.moves,
    )
}

pub fn overall_section(stats: &StatsAggregator) -> String {
    let overall = stats.overall();
    if overall.games == 0 {
        return "No games found.".to_string();
    }
    format!(
        "Total Games: {}\n{}\nAverage Moves per Game: {}\nWin Rate: {}%",
        overall.games,
        tally_line("Won", "Lost", overall),
        format_decimal(stats.average_moves()),
        format_decimal(overall.win_rate()),
    )
}

pub fn rating_changes_section(stats: &StatsAggregator) -> String {
    let trackers = stats.rating_trackers();
    if trackers.is_empty() {
        return "No rating data available.".to_string();
    }
    let mut out = String::new();
    for (game_type, tracker) in trackers {
        if let (Some(start), Some(end), Some(avg)) = (
            tracker.starting_rating(),
            tracker.latest_rating(),
            tracker.average_rating(),
        ) {
            out.push_str(&format!(
                "{:<12}: {:+} (Start: {}, End: {}, Avg: {})\n",
                game_type.as_str(),
                tracker.change(),
                start,
                end,
                avg
            ));
        }
    }
    out
}

pub fn game_type_section(stats: &StatsAggregator) -> String {
    let types = stats.game_types();
    if types.is_empty() {
        return "No game type data available.".to_string();
    }
    let mut out = String::new();
    for (game_type, type_stats) in types {
        let tally = &type_stats.tally;
        if tally.games == 0 {
            continue;
        }
        let or_zero = |rating: Option<u32>| rating.unwrap_or(0);
        out.push_str(&format!("\n{} (Total: {}):\n", game_type, tally.games));
        out.push_str(&format!("  {}\n", tally_line("Win", "Loss", tally)));
        out.push_str(&format!(
            "  Avg Moves: {} | Avg Rating: {}\n",
            format_decimal(type_stats.average_moves()),
            or_zero(type_stats.average_rating()),
        ));
        out.push_str(&format!(
            "  Rating Range: {} ({} - {}, Latest: {})\n",
            type_stats.rating_range(),
            or_zero(type_stats.min_rating),
            or_zero(type_stats.max_rating),
            type_stats
                .latest_rating()
                .map_or_else(|| "?".to_string(), |r| r.to_string()),
        ));
    }
    out
}

pub fn color_section(stats: &StatsAggregator) -> String {
    let mut out = String::new();
    for (color, name) in [(Color::White, "White"), (Color::Black, "Black")] {
        let tally = stats.color(color);
        if tally.games == 0 {
            continue;
        }
        out.push_str(&format!("\nAs {} ({} games):\n", name, tally.games));
        out.push_str(&format!("  {}\n", tally_line("Win", "Loss", tally)));
    }
    if out.is_empty() {
        out.push_str("No color data available.");
    }
    out
}

pub fn additional_section(stats: &StatsAggregator) -> String {
    let mut out = String::new();
    if let Some(summary) = stats.move_summary() {
        out.push_str(&format!("Shortest Game: {} moves\n", summary.shortest));
        out.push_str(&format!("Longest Game: {} moves\n", summary.longest));
        out.push_str(&format!("Median Game Length: {} moves\n", summary.median));
    }

    let types = stats.game_types();
    let total = stats.total_games();
    if !types.is_empty() && total > 0 {
        out.push_str("\nGame Type Distribution:\n");
        for (game_type, type_stats) in types {
            let share = f64::from(type_stats.tally.games) / f64::from(total) * 100.0;
            out.push_str(&format!(
                "  {:<12}: {} games ({}%)\n",
                game_type.as_str(),
                type_stats.tally.games,
                format_decimal(share)
            ));
        }
    }
    out
}

/// The statistics block appended after all game entries.
pub fn render_report(stats: &StatsAggregator, username: &str, period: &str) -> String {
    let sections: [(&str, String); 5] = [
        ("OVERALL STATISTICS", overall_section(stats)),
        ("RATING CHANGES", rating_changes_section(stats)),
        ("PERFORMANCE BY GAME TYPE", game_type_section(stats)),
        ("RESULTS BY COLOR", color_section(stats)),
        ("ADDITIONAL STATISTICS", additional_section(stats)),
    ];

    let mut out = String::new();
    out.push('\n');
    out.push_str(&separator());
    out.push('\n');
    out.push_str(&center(TITLE));
    out.push('\n');
    out.push_str(&center(&format!("Username: {username} | Period: {period}")));
    out.push('\n');
    out.push_str(&separator());
    for (title, body) in &sections {
        out.push_str("\n\n");
        out.push_str(&center(title));
        out.push('\n');
        out.push_str(body);
    }
    out.push('\n');
    out.push_str(&separator());
    out.push('\n');
    out.push_str(&center(FOOTER));
    out.push('\n');
    out.push_str(&separator());
    out.push('\n');
    out
}

/// Short recap printed to the terminal once the report is written.
pub fn console_summary(stats: &StatsAggregator) -> String {
    let mut out = String::from("=== SUMMARY ===\n");
    out.push_str(&format!("Total Games Processed: {}\n", stats.total_games()));
    out.push_str(&format!("Win Rate: {:.2}%\n", stats.overall().win_rate()));
    out.push_str(&format!(
        "Average Moves per Game: {:.1}\n",
        stats.average_moves()
    ));

    if !stats.game_types().is_empty() {
        out.push_str("\nGame Types Played:\n");
        for (game_type, type_stats) in stats.game_types() {
            out.push_str(&format!("  {}: {} games\n", game_type, type_stats.tally.games));
        }
    }
    if !stats.rating_trackers().is_empty() {
        out.push_str("\nRating Changes:\n");
        for (game_type, tracker) in stats.rating_trackers() {
            out.push_str(&format!("  {}: {:+}\n", game_type, tracker.change()));
        }
    }
    out
}
