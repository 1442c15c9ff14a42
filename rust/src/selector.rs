//! STAR result selection: scoring round, then an automatic runoff.
//!
//! 1. Aggregate slot scores into candidate windows and attach metrics
//! 2. Drop candidates overlapping the top-scoring window
//! 3. Scoring round picks two finalists (score, ranked robin, five stars, random)
//! 4. Runoff picks the winner (ranked robin, score, five stars, random)

use thiserror::Error;

use crate::aggregation::{aggregate_durations, collate_availability, AggregationError};
use crate::config::StarConfig;
use crate::log_changes;
use crate::metrics::compute_metrics;
use crate::models::{Candidate, Person, RankedTime, StarResult};
use crate::overlap::remove_overlapping;
use crate::tabulation::{full_round, pairwise_wins, TabulationError, RUNOFF_ORDER, SCORING_ORDER};
use crate::time_index::TimeIndexer;

/// Errors that can occur while calculating best times.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StarError {
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
    #[error(transparent)]
    Tabulation(#[from] TabulationError),
}

/// Restrict `people` to those named in `names`, keeping their order.
pub fn select_people(people: &[Person], names: &[&str]) -> Vec<Person> {
    people
        .iter()
        .filter(|p| names.contains(&p.name.as_str()))
        .cloned()
        .collect()
}

/// Calculate the best meeting time and runner-up for a group.
///
/// # Arguments
/// * `times` - Timeslot labels in the scheduling window
/// * `people` - Participants with their sparse slot scores
/// * `duration_minutes` - Meeting length; a positive multiple of the slot length
/// * `event_id` - Seeds the random tiebreak
/// * `indexer` - Maps labels onto the time axis
/// * `config` - Slot length, five-star threshold and verbosity
///
/// # Returns
/// * `Ok(StarResult)`; every field is `None` when there are no people
/// * `Err(StarError)` for an invalid duration, unparseable label or tabulation fault
pub fn calculate_best_times<I>(
    times: &[String],
    people: &[Person],
    duration_minutes: u32,
    event_id: &str,
    indexer: &I,
    config: &StarConfig,
) -> Result<StarResult, StarError>
where
    I: TimeIndexer + ?Sized,
{
    if people.is_empty() {
        return Ok(StarResult::default());
    }

    let scores = aggregate_durations(times, people, duration_minutes, indexer, config)?;
    let collated = collate_availability(&scores, people);
    let candidates = compute_metrics(collated, scores.slots_per_window, event_id, config);

    Ok(tabulate(
        candidates,
        duration_minutes,
        scores.slots_per_window,
        config.verbosity,
    )?)
}

/// Run the overlap filter, scoring round and runoff over prepared candidates.
pub fn tabulate(
    candidates: Vec<Candidate>,
    duration_minutes: u32,
    slots_per_window: u32,
    verbosity: u8,
) -> Result<StarResult, TabulationError> {
    let normalize = |c: &Candidate| RankedTime {
        label: c.label.clone(),
        score: f64::from(c.score) / f64::from(slots_per_window.max(1)),
    };

    let candidates = remove_overlapping(candidates, duration_minutes, verbosity)?;
    match candidates.as_slice() {
        [] => return Ok(StarResult::default()),
        [only] => {
            log_changes!(verbosity, "Only candidate left: {}", only.label);
            return Ok(StarResult {
                best: Some(normalize(only)),
                ..StarResult::default()
            });
        }
        _ => {}
    }

    let scoring = full_round(&candidates, 2, &SCORING_ORDER, verbosity)?;
    let runoff = full_round(&scoring.winners, 1, &RUNOFF_ORDER, verbosity)?;

    let unresolved = || TabulationError::Unresolved {
        need: 1,
        tied: scoring.winners.len(),
    };
    let winner = runoff.winners.first().ok_or_else(unresolved)?;
    let runner_up = scoring
        .winners
        .iter()
        .find(|c| c.label != winner.label)
        .ok_or_else(unresolved)?;

    let (winner_wins, runner_up_wins) = pairwise_wins(winner, runner_up);
    let total = winner_wins + runner_up_wins;
    let preference = if total == 0 {
        0.0
    } else {
        f64::from(winner_wins) / f64::from(total)
    };

    log_changes!(
        verbosity,
        "Runoff: {} beats {} ({} to {})",
        winner.label,
        runner_up.label,
        winner_wins,
        runner_up_wins
    );

    Ok(StarResult {
        best: Some(normalize(winner)),
        next_best: Some(normalize(runner_up)),
        preference: Some(preference),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_index::SlotLabelIndex;
    use chrono::{NaiveDate, NaiveDateTime};

    fn created(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(8, minute, 0)
            .unwrap()
    }

    fn label(time: &str) -> String {
        format!("{time}-10032025")
    }

    fn labels(times: &[&str]) -> Vec<String> {
        times.iter().map(|t| label(t)).collect()
    }

    fn run(times: &[String], people: &[Person], duration: u32, event_id: &str) -> StarResult {
        calculate_best_times(
            times,
            people,
            duration,
            event_id,
            &SlotLabelIndex,
            &StarConfig::default(),
        )
        .unwrap()
    }

    /// Three spaced-out slots so 15-minute windows never overlap.
    fn runoff_fixture() -> (Vec<String>, Vec<Person>) {
        let times = labels(&["0900", "1100", "1300"]);
        let people = vec![
            Person::new("p1", created(1))
                .with_score(label("0900"), 4)
                .with_score(label("1100"), 5)
                .with_score(label("1300"), 4),
            Person::new("p2", created(2))
                .with_score(label("0900"), 4)
                .with_score(label("1100"), 5)
                .with_score(label("1300"), 4),
            Person::new("p3", created(3))
                .with_score(label("0900"), 2)
                .with_score(label("1300"), 4),
        ];
        (times, people)
    }

    #[test]
    fn test_no_people() {
        let result = run(&labels(&["0900"]), &[], 15, "evt");
        assert_eq!(result, StarResult::default());
        assert!(result.best.is_none());
        assert!(result.next_best.is_none());
        assert!(result.preference.is_none());
    }

    #[test]
    fn test_single_person_full_hour() {
        let times = labels(&["1100", "1115", "1130", "1145"]);
        let person = times
            .iter()
            .fold(Person::new("Alice", created(0)), |p, l| p.with_score(l, 5));

        let result = run(&times, &[person], 60, "evt");

        let best = result.best.unwrap();
        assert_eq!(best.label, label("1100"));
        assert!((best.score - 5.0).abs() < 1e-9);
        assert!(result.next_best.is_none());
        assert!(result.preference.is_none());
    }

    #[test]
    fn test_score_tie_broken_by_ranked_robin() {
        let times = labels(&["0900", "1100"]);
        // 0900: 4+4+2 = 10, 1100: 5+5+0 = 10. p1 and p2 prefer 1100, p3 prefers 0900.
        let people = vec![
            Person::new("p1", created(1))
                .with_score(label("0900"), 4)
                .with_score(label("1100"), 5),
            Person::new("p2", created(2))
                .with_score(label("0900"), 4)
                .with_score(label("1100"), 5),
            Person::new("p3", created(3)).with_score(label("0900"), 2),
        ];

        let result = run(&times, &people, 15, "evt");

        assert_eq!(result.best.unwrap().label, label("1100"));
        assert_eq!(result.next_best.unwrap().label, label("0900"));
        assert!((result.preference.unwrap() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_runoff_can_overturn_highest_score() {
        let (times, people) = runoff_fixture();
        // Scores: 0900=10, 1100=10, 1300=12. 1300 wins the scoring round outright,
        // 1100 beats 0900 on ranked robin, then beats 1300 head to head.
        let result = run(&times, &people, 15, "evt");

        let best = result.best.unwrap();
        let next = result.next_best.unwrap();
        assert_eq!(best.label, label("1100"));
        assert!((best.score - 10.0).abs() < 1e-9);
        assert_eq!(next.label, label("1300"));
        assert!((next.score - 12.0).abs() < 1e-9);
        assert!((result.preference.unwrap() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_preference_zero_when_nobody_prefers_either() {
        let times = labels(&["0900", "1100"]);
        let people = vec![Person::new("p1", created(1))
            .with_score(label("0900"), 3)
            .with_score(label("1100"), 3)];

        let result = run(&times, &people, 15, "evt");

        assert!(result.best.is_some());
        assert!(result.next_best.is_some());
        assert_eq!(result.preference, Some(0.0));
    }

    #[test]
    fn test_finalists_never_overlap() {
        let times = labels(&["0900", "0915", "0930", "0945", "1000", "1015", "1030", "1045"]);
        let scores = [5, 5, 5, 5, 1, 2, 3, 1];
        let person = times
            .iter()
            .zip(scores)
            .fold(Person::new("Alice", created(0)), |p, (l, s)| p.with_score(l, s));

        // Windows: 0900=20, 0915=16, 0930=13, 0945=11, 1000=7, 1015=6, 1030=4, 1045=1.
        // 0915..0945 start inside [09:00, 10:00); 1000 only touches it.
        let result = run(&times, &[person], 60, "overlap");

        let best = result.best.unwrap();
        let next = result.next_best.unwrap();
        assert_eq!(best.label, label("0900"));
        assert_eq!(next.label, label("1000"));
        assert!((next.score - 1.75).abs() < 1e-9);

        let index = SlotLabelIndex;
        let gap = index.minutes(&next.label).unwrap() - index.minutes(&best.label).unwrap();
        assert!(gap >= 60);
        assert_eq!(result.preference, Some(1.0));
    }

    #[test]
    fn test_two_overlapping_candidates_both_reach_runoff() {
        let times = labels(&["0900", "0915"]);
        let person = Person::new("Alice", created(0))
            .with_score(label("0900"), 5)
            .with_score(label("0915"), 3);

        // Windows: 0900=8, 0915=3. With only two candidates nothing is filtered.
        let result = run(&times, &[person], 30, "pair");

        let best = result.best.unwrap();
        let next = result.next_best.unwrap();
        assert_eq!(best.label, label("0900"));
        assert!((best.score - 4.0).abs() < 1e-9);
        assert_eq!(next.label, label("0915"));
        assert!((next.score - 1.5).abs() < 1e-9);
        assert_eq!(result.preference, Some(1.0));
    }

    #[test]
    fn test_deterministic_across_calls() {
        let times = labels(&["0900", "1000", "1100", "1200"]);
        let people: Vec<Person> = (0..3u32)
            .map(|p| {
                times
                    .iter()
                    .fold(Person::new(format!("p{p}"), created(p)), |person, l| {
                        person.with_score(l, 3)
                    })
            })
            .collect();

        // Every metric ties, so only the seeded draw separates candidates
        let first = run(&times, &people, 15, "abc");
        let second = run(&times, &people, 15, "abc");
        assert_eq!(first, second);
        assert_eq!(first.preference, Some(0.0));
    }

    #[test]
    fn test_select_people() {
        let (times, people) = runoff_fixture();
        let subset = select_people(&people, &["p3"]);
        assert_eq!(subset.len(), 1);

        let result = run(&times, &subset, 15, "evt");
        assert_eq!(result.best.unwrap().label, label("1300"));
        assert_eq!(result.next_best.unwrap().label, label("0900"));
        assert_eq!(result.preference, Some(1.0));
    }

    #[test]
    fn test_invalid_duration_is_an_error() {
        let (times, people) = runoff_fixture();
        let err = calculate_best_times(
            &times,
            &people,
            25,
            "evt",
            &SlotLabelIndex,
            &StarConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StarError::Aggregation(AggregationError::InvalidDuration { duration: 25, .. })
        ));
    }

    #[test]
    fn test_tabulate_empty() {
        assert_eq!(tabulate(Vec::new(), 60, 4, 0), Ok(StarResult::default()));
    }
}
