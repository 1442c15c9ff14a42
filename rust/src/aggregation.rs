//! Duration aggregation and availability collation.
//!
//! People score individual timeslots. A meeting spans several slots, so each
//! slot is also a candidate start whose score is the sum of the slots inside
//! its window. Collation then turns per-person candidate scores into
//! per-candidate people lists.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::config::StarConfig;
use crate::models::{CandidateAvailability, Person, PersonId, PersonScore};
use crate::time_index::{TimeIndexError, TimeIndexer};

/// Errors that can occur during aggregation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregationError {
    #[error("Duration of {duration} minutes is not a positive multiple of the {slot_minutes}-minute timeslot")]
    InvalidDuration { duration: u32, slot_minutes: u32 },
    #[error(transparent)]
    TimeIndex(#[from] TimeIndexError),
}

/// A timeslot label resolved onto the time axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    pub label: String,
    pub start: i64,
}

/// Resolve labels and sort them chronologically.
///
/// The sort is stable, so labels that are already in order keep their order.
pub fn index_slots<I>(labels: &[String], indexer: &I) -> Result<Vec<Slot>, TimeIndexError>
where
    I: TimeIndexer + ?Sized,
{
    let mut slots = labels
        .iter()
        .map(|label| {
            Ok(Slot {
                label: label.clone(),
                start: indexer.minutes(label)?,
            })
        })
        .collect::<Result<Vec<_>, TimeIndexError>>()?;
    slots.sort_by_key(|slot| slot.start);
    Ok(slots)
}

/// Sum one person's scores over every candidate window.
///
/// `slots` must be sorted chronologically. Only the next `lookahead` slots
/// after each start are inspected; a slot belongs to the window when its start
/// lies strictly between the window start and the window end.
pub fn aggregate_person(
    slots: &[Slot],
    person: &Person,
    duration_minutes: u32,
    lookahead: usize,
) -> FxHashMap<String, u32> {
    let dense: Vec<u32> = slots
        .iter()
        .map(|slot| u32::from(person.score(&slot.label)))
        .collect();

    let mut windows = FxHashMap::default();
    for (t, slot) in slots.iter().enumerate() {
        let end = slot.start + i64::from(duration_minutes);
        let mut total = dense[t];

        for (offset, next) in slots[t + 1..].iter().take(lookahead).enumerate() {
            if next.start >= end {
                break;
            }
            if next.start > slot.start {
                total += dense[t + 1 + offset];
            }
        }

        if total > 0 {
            windows.insert(slot.label.clone(), total);
        }
    }
    windows
}

/// Per-person candidate scores over chronologically sorted slots.
#[derive(Clone, Debug, PartialEq)]
pub struct DurationScores {
    pub slots: Vec<Slot>,
    /// One sparse map per person, aligned with the input people.
    pub windows: Vec<FxHashMap<String, u32>>,
    /// Number of timeslots covered by one candidate window.
    pub slots_per_window: u32,
}

/// Expand every person's sparse slot scores into sparse candidate scores.
pub fn aggregate_durations<I>(
    labels: &[String],
    people: &[Person],
    duration_minutes: u32,
    indexer: &I,
    config: &StarConfig,
) -> Result<DurationScores, AggregationError>
where
    I: TimeIndexer + ?Sized,
{
    let slots_per_window = config
        .slots_in(duration_minutes)
        .ok_or(AggregationError::InvalidDuration {
            duration: duration_minutes,
            slot_minutes: config.slot_minutes,
        })?;

    let slots = index_slots(labels, indexer)?;
    let windows = people
        .iter()
        .map(|person| {
            aggregate_person(&slots, person, duration_minutes, slots_per_window as usize)
        })
        .collect();

    Ok(DurationScores {
        slots,
        windows,
        slots_per_window,
    })
}

/// Merge per-person candidate scores into per-candidate people lists.
///
/// Candidates follow slot order. Within a candidate, people are ordered by
/// creation time and then name; people who did not score the window are left out.
/// Person names are assumed unique within an event; ids follow that same order.
pub fn collate_availability(
    scores: &DurationScores,
    people: &[Person],
) -> Vec<CandidateAvailability> {
    let windows = &scores.windows;
    let mut order: Vec<usize> = (0..people.len().min(windows.len())).collect();
    order.sort_by(|&a, &b| {
        people[a]
            .created_at
            .cmp(&people[b].created_at)
            .then_with(|| people[a].name.cmp(&people[b].name))
    });

    let mut assigned: FxHashMap<&str, PersonId> = FxHashMap::default();
    let ids: Vec<PersonId> = order
        .iter()
        .map(|&i| {
            let next = assigned.len() as PersonId;
            *assigned.entry(people[i].name.as_str()).or_insert(next)
        })
        .collect();

    scores
        .slots
        .iter()
        .map(|slot| {
            let people = order
                .iter()
                .zip(&ids)
                .filter_map(|(&i, &id)| {
                    windows[i].get(&slot.label).map(|&score| PersonScore {
                        person: id,
                        name: people[i].name.clone(),
                        score,
                    })
                })
                .collect();
            CandidateAvailability {
                label: slot.label.clone(),
                start: slot.start,
                people,
            }
        })
        .collect()
}
