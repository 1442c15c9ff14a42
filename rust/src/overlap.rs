//! Removal of candidates that overlap the top-scoring window.
//!
//! Neighbouring starts share most of their slots, so without this the runoff
//! would usually compare two near-identical windows.

use crate::log_checks;
use crate::models::Candidate;
use crate::tabulation::{full_round, TabulationError, SCORING_ORDER};

/// True when `point` lies strictly inside `[start, end)`, excluding `start`.
fn strictly_inside(point: i64, start: i64, end: i64) -> bool {
    point > start && point < end
}

/// Keep the top-scoring candidate and every candidate not overlapping it.
///
/// A candidate overlaps when its start or end falls strictly inside the top
/// window; windows that only touch it are kept. Pools of two or fewer
/// candidates are returned as is, so both go to the runoff.
pub fn remove_overlapping(
    candidates: Vec<Candidate>,
    duration_minutes: u32,
    verbosity: u8,
) -> Result<Vec<Candidate>, TabulationError> {
    if candidates.len() <= 2 {
        return Ok(candidates);
    }

    let top = full_round(&candidates, 1, &SCORING_ORDER, verbosity)?
        .winners
        .into_iter()
        .next()
        .ok_or(TabulationError::Unresolved {
            need: 1,
            tied: candidates.len(),
        })?;
    let (start, end) = (top.start, top.end(duration_minutes));

    let before = candidates.len();
    let kept: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| {
            c.label == top.label
                || !(strictly_inside(c.start, start, end)
                    || strictly_inside(c.end(duration_minutes), start, end))
        })
        .collect();

    log_checks!(
        verbosity,
        "Overlap filter around {}: kept {} of {} candidates",
        top.label,
        kept.len(),
        before
    );

    Ok(kept)
}
