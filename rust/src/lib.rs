//! STAR tabulation for group meeting times.
//!
//! People score 15-minute timeslots from 0 to 5 stars. This crate turns those
//! scores into candidate meeting windows of a requested duration and picks a
//! best time and runner-up with Score-Then-Automatic-Runoff:
//!
//! 1. Windows are scored by summing every person's slots inside them
//! 2. Windows overlapping the top-scoring one are dropped
//! 3. A scoring round picks two finalists, breaking ties by ranked robin,
//!    five-star count and a seeded random draw
//! 4. A runoff between the finalists decides the winner by head-to-head preference
//!
//! Everything is deterministic: the random draw is seeded from the event id.

pub mod aggregation;
mod config;
pub mod logging;
mod metrics;
mod models;
mod overlap;
#[cfg(feature = "python")]
mod python;
mod selector;
pub mod tabulation;
mod time_index;

pub use aggregation::{
    aggregate_durations, collate_availability, AggregationError, DurationScores, Slot,
};
pub use config::{StarConfig, DEFAULT_FIVE_STAR_THRESHOLD, DEFAULT_SLOT_MINUTES};
pub use metrics::{compute_metrics, TieBreaker};
pub use models::{
    Candidate, CandidateAvailability, Person, PersonId, PersonScore, RankedTime, StarResult,
    MAX_STARS,
};
pub use overlap::remove_overlapping;
pub use selector::{calculate_best_times, select_people, tabulate, StarError};
pub use tabulation::{Metric, TabulationError};
pub use time_index::{SlotLabelIndex, TimeIndexError, TimeIndexer};
