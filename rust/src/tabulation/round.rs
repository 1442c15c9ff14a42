//! Mini rounds and full rounds.

use thiserror::Error;

use crate::models::Candidate;
use crate::{log_changes, log_checks, log_debug};

use super::metric::Metric;
use super::ranked_robin::compute_ranked_wins;

/// Contract violations raised while tabulating.
///
/// These indicate a caller bug rather than bad user data; they abort the
/// current tabulation only.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TabulationError {
    #[error("Requested {need} winners from only {available} candidates")]
    TooManyWinnersRequested { need: usize, available: usize },
    #[error("Ranked-robin wins were read before being computed for candidate {0}")]
    RankedWinsNotComputed(String),
    #[error("Metrics exhausted with {tied} candidates tied for {need} remaining places")]
    Unresolved { need: usize, tied: usize },
}

/// Outcome of ranking a pool under one metric.
///
/// Holds owned copies of the candidates, so the snapshot is unaffected by
/// anything later rounds do.
#[derive(Clone, Debug, PartialEq)]
pub struct MiniRound {
    pub metric: Metric,
    /// Metric value of the first candidate that did not make the cut.
    pub score_to_beat: f64,
    /// Candidates strictly above `score_to_beat`, best first.
    pub winners: Vec<Candidate>,
    /// Candidates equal to `score_to_beat`; empty when the round is resolved.
    pub tied: Vec<Candidate>,
}

impl MiniRound {
    pub fn is_resolved(&self) -> bool {
        self.tied.is_empty()
    }
}

/// Rank `candidates` by `metric` and pick `need` of them if the metric can.
///
/// For `RankedRobin` the wins are recomputed over exactly `candidates` first.
/// `need` must be strictly less than the number of candidates.
pub fn mini_round(
    candidates: &[Candidate],
    metric: Metric,
    need: usize,
) -> Result<MiniRound, TabulationError> {
    if need >= candidates.len() {
        return Err(TabulationError::TooManyWinnersRequested {
            need,
            available: candidates.len(),
        });
    }

    let mut pool = candidates.to_vec();
    if metric == Metric::RankedRobin {
        compute_ranked_wins(&mut pool);
    }

    let mut ranked = pool
        .into_iter()
        .map(|c| Ok((c.metric(metric)?, c)))
        .collect::<Result<Vec<_>, TabulationError>>()?;
    // Stable sort: equal values keep enumeration order
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

    let score_to_beat = ranked[need].0;
    let mut winners = Vec::with_capacity(need);
    let mut tied = Vec::new();
    for (value, candidate) in ranked {
        if value > score_to_beat {
            winners.push(candidate);
        } else if value == score_to_beat {
            tied.push(candidate);
        }
    }

    if winners.len() == need {
        tied.clear();
    }

    Ok(MiniRound {
        metric,
        score_to_beat,
        winners,
        tied,
    })
}

/// Result of a full round: the decided winners and every mini round that ran.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FullRound {
    pub winners: Vec<Candidate>,
    pub rounds: Vec<MiniRound>,
}

/// Run mini rounds over `order` until `winners_wanted` candidates are decided.
///
/// Never returns more than `winners_wanted` winners. When the undecided pool
/// is exactly as large as the remaining need, the whole pool wins.
pub fn full_round(
    candidates: &[Candidate],
    winners_wanted: usize,
    order: &[Metric],
    verbosity: u8,
) -> Result<FullRound, TabulationError> {
    if winners_wanted > candidates.len() {
        return Err(TabulationError::TooManyWinnersRequested {
            need: winners_wanted,
            available: candidates.len(),
        });
    }

    let mut result = FullRound::default();
    let mut pool = candidates.to_vec();

    for &metric in order {
        let need = winners_wanted - result.winners.len();
        if need == 0 {
            break;
        }
        if pool.len() == need {
            result.winners.append(&mut pool);
            break;
        }

        let round = mini_round(&pool, metric, need)?;
        log_checks!(
            verbosity,
            "  Mini round [{}]: need {}, score to beat {}, {} winners, {} tied",
            metric,
            need,
            round.score_to_beat,
            round.winners.len(),
            round.tied.len()
        );
        for c in round.winners.iter().chain(&round.tied) {
            log_debug!(
                verbosity,
                "    {} {}={}",
                c.label,
                metric,
                c.metric(metric)?
            );
        }

        result.winners.extend(round.winners.iter().cloned());
        pool = round.tied.clone();
        result.rounds.push(round);
    }

    let need = winners_wanted - result.winners.len();
    if need > 0 {
        return Err(TabulationError::Unresolved {
            need,
            tied: pool.len(),
        });
    }

    log_changes!(
        verbosity,
        "Full round decided {:?} after {} mini rounds",
        result
            .winners
            .iter()
            .map(|c| c.label.as_str())
            .collect::<Vec<_>>(),
        result.rounds.len()
    );

    Ok(result)
}
