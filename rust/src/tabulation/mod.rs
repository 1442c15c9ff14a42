//! Multi-metric round tabulation.
//!
//! A mini round ranks the undecided candidates under a single metric and
//! either fills the remaining places or hands the tied group to the next
//! metric. A full round chains mini rounds over a fixed metric order until the
//! requested number of winners is decided.

mod metric;
mod ranked_robin;
mod round;

pub use metric::{Metric, RUNOFF_ORDER, SCORING_ORDER};
pub use ranked_robin::{compute_ranked_wins, pairwise_wins};
pub use round::{full_round, mini_round, FullRound, MiniRound, TabulationError};
