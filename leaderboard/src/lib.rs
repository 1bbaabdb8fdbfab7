//! Flat score records produced at the end of a round, and the top-scores table they are ranked in.
//!
//! Storage is left to the caller; everything here is plain data that derives serde traits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tile_miner_core::{Coord, RoundSummary};

/// Number of records kept on the table.
pub const MAX_ENTRIES: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Player name must not be blank")]
    EmptyName,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub row: Coord,
    pub column: Coord,
}

/// Round length split the way the menu shows it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTime {
    pub minutes: u32,
    pub seconds: u32,
}

impl RoundTime {
    pub fn from_seconds(total: f64) -> Self {
        let total = if total.is_finite() {
            total.max(0.0).round() as u32
        } else {
            0
        };
        Self {
            minutes: total / 60,
            seconds: total % 60,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub date: NaiveDate,
    pub dimensions: Dimensions,
    pub time: RoundTime,
    pub score: u32,
}

impl ScoreRecord {
    /// Builds the record for a finished round. `time` is the configured round length.
    pub fn new(name: &str, date: NaiveDate, summary: &RoundSummary) -> Result<Self, RecordError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecordError::EmptyName);
        }
        Ok(Self {
            name: name.to_owned(),
            date,
            dimensions: Dimensions {
                row: summary.size.0,
                column: summary.size.1,
            },
            time: RoundTime::from_seconds(summary.total_time),
            score: summary.score,
        })
    }
}

/// Best scores, highest first, at most [`MAX_ENTRIES`] long.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<ScoreRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a table from stored records in any order, keeping the best ones.
    pub fn from_records(records: impl IntoIterator<Item = ScoreRecord>) -> Self {
        let mut board = Self::new();
        for record in records {
            board.insert(record);
        }
        board
    }

    pub fn entries(&self) -> &[ScoreRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records paired with their 1-based rank.
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &ScoreRecord)> {
        self.entries.iter().enumerate().map(|(i, record)| (i + 1, record))
    }

    /// Whether `score` would earn a place on the table.
    pub fn qualifies(&self, score: u32) -> bool {
        self.rank_for(score) <= MAX_ENTRIES
    }

    /// Places `record` and returns its rank, or `None` when it does not make the table.
    /// A record only overtakes strictly lower scores.
    pub fn insert(&mut self, record: ScoreRecord) -> Option<usize> {
        let rank = self.rank_for(record.score);
        if rank > MAX_ENTRIES {
            return None;
        }
        self.entries.insert(rank - 1, record);
        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }

    fn rank_for(&self, score: u32) -> usize {
        self.entries
            .iter()
            .position(|entry| score > entry.score)
            .unwrap_or(self.entries.len())
            + 1
    }
}
