//! Ranked-robin pairwise tallies.
//!
//! For every pair of candidates in a pool, each person who scored one window
//! strictly higher than the other gives that candidate one win. A missing
//! score counts as 0, so equal scores and mutual absence give nothing.

use rustc_hash::FxHashMap;

use crate::models::{Candidate, PersonId, PersonScore};

type ScoreMap = FxHashMap<PersonId, u32>;

fn score_map(people: &[PersonScore]) -> ScoreMap {
    people.iter().map(|p| (p.person, p.score)).collect()
}

fn head_to_head(
    a_people: &[PersonScore],
    a_scores: &ScoreMap,
    b_people: &[PersonScore],
    b_scores: &ScoreMap,
) -> (u32, u32) {
    let mut a_wins = 0;
    let mut b_wins = 0;

    for p in a_people {
        let other = b_scores.get(&p.person).copied().unwrap_or(0);
        if p.score > other {
            a_wins += 1;
        } else if other > p.score {
            b_wins += 1;
        }
    }

    // People only present on B's side
    for p in b_people {
        if p.score > 0 && !a_scores.contains_key(&p.person) {
            b_wins += 1;
        }
    }

    (a_wins, b_wins)
}

/// Number of people preferring `a` over `b`, and `b` over `a`.
pub fn pairwise_wins(a: &Candidate, b: &Candidate) -> (u32, u32) {
    head_to_head(
        &a.people,
        &score_map(&a.people),
        &b.people,
        &score_map(&b.people),
    )
}

/// Recompute `ranked_wins` for every candidate against the rest of `pool`.
///
/// Any previous values are discarded; wins are only meaningful for the pool
/// they were computed over.
pub fn compute_ranked_wins(pool: &mut [Candidate]) {
    let maps: Vec<ScoreMap> = pool.iter().map(|c| score_map(&c.people)).collect();
    let mut wins = vec![0u32; pool.len()];

    for i in 0..pool.len() {
        for j in (i + 1)..pool.len() {
            let (a, b) = head_to_head(&pool[i].people, &maps[i], &pool[j].people, &maps[j]);
            wins[i] += a;
            wins[j] += b;
        }
    }

    for (candidate, w) in pool.iter_mut().zip(wins) {
        candidate.ranked_wins = Some(w);
    }
}
