//! Core data types for the tabulation engine.

use chrono::NaiveDateTime;
use rustc_hash::FxHashMap;

use crate::tabulation::{Metric, TabulationError};

/// Person id assigned during collation (u32 for compact storage and fast hashing).
pub type PersonId = u32;

/// Highest star score a person can give a timeslot.
pub const MAX_STARS: u8 = 5;

/// A participant and their sparse per-timeslot scores.
///
/// Labels missing from `availability` score 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    pub name: String,
    pub created_at: NaiveDateTime,
    pub availability: FxHashMap<String, u8>,
}

impl Person {
    pub fn new(name: impl Into<String>, created_at: NaiveDateTime) -> Self {
        Self {
            name: name.into(),
            created_at,
            availability: FxHashMap::default(),
        }
    }

    /// Builder-style helper that records `score` for `label`, clamped to `0..=5`.
    /// A zero score removes the label.
    pub fn with_score(mut self, label: impl Into<String>, score: u8) -> Self {
        let label = label.into();
        match score.min(MAX_STARS) {
            0 => {
                self.availability.remove(&label);
            }
            s => {
                self.availability.insert(label, s);
            }
        }
        self
    }

    /// Score for `label`, 0 when absent.
    pub fn score(&self, label: &str) -> u8 {
        self.availability
            .get(label)
            .copied()
            .unwrap_or(0)
            .min(MAX_STARS)
    }
}

/// One person's summed window score for a candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonScore {
    pub person: PersonId,
    pub name: String,
    pub score: u32,
}

/// A candidate window with the people who scored it, before metrics are attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateAvailability {
    pub label: String,
    /// Window start in minutes on the indexer's axis.
    pub start: i64,
    pub people: Vec<PersonScore>,
}

/// A candidate meeting window with its tie-breaking metrics.
///
/// Candidates are plain values; each round works on its own clones so earlier
/// snapshots are never touched by later rounds.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub label: String,
    pub start: i64,
    pub people: Vec<PersonScore>,
    /// Sum of every person's window score.
    pub score: u32,
    /// People whose per-slot average for this window exceeds the five-star threshold.
    pub five_stars: u32,
    /// Pairwise wins against the current round's pool. `None` until computed for that pool.
    pub ranked_wins: Option<u32>,
    pub random_tie_value: f64,
}

impl Candidate {
    /// Exclusive end of the window in minutes.
    pub fn end(&self, duration_minutes: u32) -> i64 {
        self.start + i64::from(duration_minutes)
    }

    /// Value of `metric` for this candidate. Larger is better for every metric.
    pub fn metric(&self, metric: Metric) -> Result<f64, TabulationError> {
        match metric {
            Metric::Score => Ok(f64::from(self.score)),
            Metric::RankedRobin => self
                .ranked_wins
                .map(f64::from)
                .ok_or_else(|| TabulationError::RankedWinsNotComputed(self.label.clone())),
            Metric::FiveStars => Ok(f64::from(self.five_stars)),
            Metric::Random => Ok(self.random_tie_value),
        }
    }
}

/// A chosen time and its normalized score.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedTime {
    pub label: String,
    /// Candidate score divided by the number of timeslots in the window.
    pub score: f64,
}

/// Outcome of a full STAR tabulation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StarResult {
    pub best: Option<RankedTime>,
    pub next_best: Option<RankedTime>,
    /// Share of head-to-head preferences won by `best` against `next_best`, in `[0, 1]`.
    pub preference: Option<f64>,
}
