//! Running statistics over the games admitted into one report.
//!
//! [`StatsAggregator`] is built empty for each run, fed every admitted
//! [`GameRecord`] once through [`StatsAggregator::admit`], and then only
//! read by the report formatter. Nothing is ever removed.

use crate::game::{GameRecord, ResultLabel};
use crate::timecontrol::GameType;
use chrono::NaiveDate;
use shakmaty::Color;
use std::collections::BTreeMap;

fn percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole) * 100.0
    }
}

/// Win/loss/draw counters. `games` also counts results that were unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub games: u32,
    pub won: u32,
    pub lost: u32,
    pub draw: u32,
}

impl Tally {
    pub fn record(&mut self, result: ResultLabel) {
        self.games += 1;
        match result {
            ResultLabel::Won => self.won += 1,
            ResultLabel::Lost => self.lost += 1,
            ResultLabel::Draw => self.draw += 1,
            ResultLabel::Unknown => {}
        }
    }

    pub fn unknown(&self) -> u32 {
        self.games - self.won - self.lost - self.draw
    }

    pub fn win_rate(&self) -> f64 {
        percent(self.won, self.games)
    }

    pub fn loss_rate(&self) -> f64 {
        percent(self.lost, self.games)
    }

    pub fn draw_rate(&self) -> f64 {
        percent(self.draw, self.games)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingEntry {
    pub rating: u32,
    pub date: NaiveDate,
}

/// Dated rating observations for one game type.
#[derive(Debug, Clone, Default)]
pub struct RatingTracker {
    entries: Vec<RatingEntry>,
}

impl RatingTracker {
    /// Records an observation. Zero ratings and undated games are ignored;
    /// returns whether the entry was kept.
    pub fn record(&mut self, rating: u32, date: Option<NaiveDate>) -> bool {
        match date {
            Some(date) if rating > 0 => {
                self.entries.push(RatingEntry { rating, date });
                true
            }
            _ => false,
        }
    }

    /// Rating on the earliest date; the first one admitted wins a tie.
    pub fn starting_rating(&self) -> Option<u32> {
        self.entries.iter().min_by_key(|e| e.date).map(|e| e.rating)
    }

    /// Rating on the latest date; the last one admitted wins a tie.
    pub fn latest_rating(&self) -> Option<u32> {
        self.entries.iter().max_by_key(|e| e.date).map(|e| e.rating)
    }

    pub fn highest_rating(&self) -> Option<u32> {
        self.entries.iter().map(|e| e.rating).max()
    }

    pub fn lowest_rating(&self) -> Option<u32> {
        self.entries.iter().map(|e| e.rating).min()
    }

    /// Mean rating, truncated.
    pub fn average_rating(&self) -> Option<u32> {
        if self.entries.is_empty() {
            return None;
        }
        let sum: u64 = self.entries.iter().map(|e| u64::from(e.rating)).sum();
        Some((sum / self.entries.len() as u64) as u32)
    }

    /// Latest minus starting rating; zero with fewer than two entries.
    pub fn change(&self) -> i64 {
        if self.entries.len() < 2 {
            return 0;
        }
        match (self.starting_rating(), self.latest_rating()) {
            (Some(start), Some(end)) => i64::from(end) - i64::from(start),
            _ => 0,
        }
    }
}

/// Per-game-type breakdown, fed only by games with a known rating.
#[derive(Debug, Clone, Default)]
pub struct GameTypeStats {
    pub tally: Tally,
    pub total_moves: u64,
    pub min_rating: Option<u32>,
    pub max_rating: Option<u32>,
    rating_sum: u64,
    latest: Option<RatingEntry>,
}

impl GameTypeStats {
    fn record(&mut self, record: &GameRecord, rating: u32) {
        self.tally.record(record.result);
        self.total_moves += u64::from(record.move_count);
        self.rating_sum += u64::from(rating);
        self.min_rating = Some(self.min_rating.map_or(rating, |min| min.min(rating)));
        self.max_rating = Some(self.max_rating.map_or(rating, |max| max.max(rating)));

        // Same rule as RatingTracker::latest_rating so both views agree.
        if let Some(date) = record.played_on() {
            if self.latest.map_or(true, |latest| date >= latest.date) {
                self.latest = Some(RatingEntry { rating, date });
            }
        }
    }

    pub fn average_moves(&self) -> f64 {
        if self.tally.games == 0 {
            0.0
        } else {
            self.total_moves as f64 / f64::from(self.tally.games)
        }
    }

    /// Mean over every rated game of this type, truncated.
    pub fn average_rating(&self) -> Option<u32> {
        if self.tally.games == 0 {
            return None;
        }
        Some((self.rating_sum / u64::from(self.tally.games)) as u32)
    }

    pub fn rating_range(&self) -> u32 {
        match (self.min_rating, self.max_rating) {
            (Some(min), Some(max)) => max - min,
            _ => 0,
        }
    }

    pub fn latest_rating(&self) -> Option<u32> {
        self.latest.map(|entry| entry.rating)
    }
}

/// Shortest, median and longest game in full moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSummary {
    pub shortest: u32,
    pub median: u32,
    pub longest: u32,
}

#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    overall: Tally,
    white: Tally,
    black: Tally,
    total_moves: u64,
    move_counts: Vec<u32>,
    by_type: BTreeMap<GameType, GameTypeStats>,
    ratings: BTreeMap<GameType, RatingTracker>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one admitted game into every running total.
    ///
    /// Games where the target's side is unknown only reach the overall
    /// counters. Games without a rating skip the per-type views, and a type
    /// only gets a rating tracker once one of its games carries a date.
    pub fn admit(&mut self, record: &GameRecord) {
        self.overall.record(record.result);
        self.total_moves += u64::from(record.move_count);
        self.move_counts.push(record.move_count);

        match record.perspective {
            Some(Color::White) => self.white.record(record.result),
            Some(Color::Black) => self.black.record(record.result),
            None => {}
        }

        if let Some(rating) = record.rating() {
            self.by_type
                .entry(record.game_type)
                .or_default()
                .record(record, rating);
            if let Some(date) = record.played_on() {
                self.ratings
                    .entry(record.game_type)
                    .or_default()
                    .record(rating, Some(date));
            }
        }
    }

    pub fn total_games(&self) -> u32 {
        self.overall.games
    }

    pub fn overall(&self) -> &Tally {
        &self.overall
    }

    pub fn color(&self, color: Color) -> &Tally {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Games counted overall but in neither color bucket.
    pub fn unknown_color_games(&self) -> u32 {
        self.overall.games - self.white.games - self.black.games
    }

    pub fn average_moves(&self) -> f64 {
        if self.overall.games == 0 {
            0.0
        } else {
            self.total_moves as f64 / f64::from(self.overall.games)
        }
    }

    pub fn move_summary(&self) -> Option<MoveSummary> {
        if self.move_counts.is_empty() {
            return None;
        }
        let mut sorted = self.move_counts.clone();
        sorted.sort_unstable();
        Some(MoveSummary {
            shortest: sorted[0],
            median: sorted[sorted.len() / 2],
            longest: sorted[sorted.len() - 1],
        })
    }

    pub fn game_types(&self) -> &BTreeMap<GameType, GameTypeStats> {
        &self.by_type
    }

    pub fn rating_trackers(&self) -> &BTreeMap<GameType, RatingTracker> {
        &self.ratings
    }
}
