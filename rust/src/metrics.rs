//! Candidate metrics: summed score, five-star count and the seeded tiebreak draw.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::StarConfig;
use crate::models::{Candidate, CandidateAvailability};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a hash of the event id. Stable across platforms and releases,
/// unlike `std`'s hashers.
fn event_seed(event_id: &str) -> u64 {
    event_id.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Deterministic tiebreak generator seeded from an event id.
///
/// The sequence depends only on the event id and the number of draws.
#[derive(Clone, Debug)]
pub struct TieBreaker {
    rng: ChaCha8Rng,
}

impl TieBreaker {
    pub fn for_event(event_id: &str) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(event_seed(event_id)),
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next_value(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Attach metrics to collated candidates.
///
/// One tiebreak value is drawn per candidate, in the order given.
/// `ranked_wins` is left unset; it only has meaning inside a round.
pub fn compute_metrics(
    candidates: Vec<CandidateAvailability>,
    slots_per_window: u32,
    event_id: &str,
    config: &StarConfig,
) -> Vec<Candidate> {
    let mut tie_breaker = TieBreaker::for_event(event_id);
    let slots = f64::from(slots_per_window.max(1));

    candidates
        .into_iter()
        .map(|candidate| {
            let score = candidate.people.iter().map(|p| p.score).sum();
            let five_stars = candidate
                .people
                .iter()
                .filter(|p| f64::from(p.score) / slots > config.five_star_threshold)
                .count() as u32;

            Candidate {
                label: candidate.label,
                start: candidate.start,
                people: candidate.people,
                score,
                five_stars,
                ranked_wins: None,
                random_tie_value: tie_breaker.next_value(),
            }
        })
        .collect()
}
