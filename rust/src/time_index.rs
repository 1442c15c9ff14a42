//! Chronological indexing of timeslot labels.
//!
//! Labels are opaque to the tabulator; window arithmetic only needs each label
//! mapped to a position (in minutes) on a monotonic time axis.

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use thiserror::Error;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Errors that can occur while indexing labels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeIndexError {
    #[error("Invalid timeslot label: {0:?}")]
    InvalidLabel(String),
}

/// Maps a timeslot label to minutes on a monotonic axis.
pub trait TimeIndexer {
    fn minutes(&self, label: &str) -> Result<i64, TimeIndexError>;
}

impl<F> TimeIndexer for F
where
    F: Fn(&str) -> Option<i64>,
{
    fn minutes(&self, label: &str) -> Result<i64, TimeIndexError> {
        self(label).ok_or_else(|| TimeIndexError::InvalidLabel(label.to_string()))
    }
}

/// Indexer for the stored label layouts.
///
/// - Specific dates: `HHmm-DDMMYYYY`, indexed as minutes since the Unix epoch.
/// - Weekdays: `HHmm-d` with `d` in `0..=6`, indexed as `d * 1440 + minute of day`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SlotLabelIndex;

impl SlotLabelIndex {
    fn parse_time_of_day(hhmm: &str) -> Option<NaiveTime> {
        if hhmm.len() != 4 {
            return None;
        }
        NaiveTime::parse_from_str(hhmm, "%H%M").ok()
    }

    fn parse_date(label: &str) -> Option<i64> {
        let dt = NaiveDateTime::parse_from_str(label, "%H%M-%d%m%Y").ok()?;
        Some(dt.and_utc().timestamp() / 60)
    }

    fn parse_weekday(hhmm: &str, day: &str) -> Option<i64> {
        let day: i64 = day.parse().ok()?;
        if !(0..7).contains(&day) {
            return None;
        }
        let time = Self::parse_time_of_day(hhmm)?;
        Some(day * MINUTES_PER_DAY + i64::from(time.hour()) * 60 + i64::from(time.minute()))
    }
}

impl TimeIndexer for SlotLabelIndex {
    fn minutes(&self, label: &str) -> Result<i64, TimeIndexError> {
        let parsed = match label.split_once('-') {
            Some((hhmm, day)) if day.len() == 1 => Self::parse_weekday(hhmm, day),
            Some((hhmm, date)) if date.len() == 8 && hhmm.len() == 4 => Self::parse_date(label),
            _ => None,
        };
        parsed.ok_or_else(|| TimeIndexError::InvalidLabel(label.to_string()))
    }
}
