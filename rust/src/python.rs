//! Python bindings (enabled with the `python` feature).

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDateTime;
use pyo3::prelude::*;
use std::collections::HashMap;

use crate::models::{Person, RankedTime, StarResult};
use crate::{SlotLabelIndex, StarConfig};

/// A participant and their per-timeslot scores (PyO3 wrapper).
#[pyclass(name = "Person")]
#[derive(Clone, Debug)]
pub struct PyPerson {
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub created_at: NaiveDateTime,
    #[pyo3(get, set)]
    pub availability: HashMap<String, u8>,
}

#[pymethods]
impl PyPerson {
    #[new]
    #[pyo3(signature = (name, created_at, availability=None))]
    fn new(
        name: String,
        created_at: NaiveDateTime,
        availability: Option<HashMap<String, u8>>,
    ) -> Self {
        Self {
            name,
            created_at,
            availability: availability.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Person(name={:?}, created_at={}, slots={})",
            self.name,
            self.created_at,
            self.availability.len()
        )
    }
}

impl From<PyPerson> for Person {
    fn from(p: PyPerson) -> Self {
        p.availability
            .into_iter()
            .fold(Person::new(p.name, p.created_at), |person, (label, score)| {
                person.with_score(label, score)
            })
    }
}

/// Tabulation configuration (PyO3 wrapper).
#[pyclass(name = "StarConfig")]
#[derive(Clone, Debug)]
pub struct PyStarConfig {
    #[pyo3(get, set)]
    pub slot_minutes: u32,
    #[pyo3(get, set)]
    pub five_star_threshold: f64,
    #[pyo3(get, set)]
    pub verbosity: u8,
}

#[pymethods]
impl PyStarConfig {
    #[new]
    #[pyo3(signature = (slot_minutes=None, five_star_threshold=None, verbosity=None))]
    fn new(
        slot_minutes: Option<u32>,
        five_star_threshold: Option<f64>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = StarConfig::default();
        Self {
            slot_minutes: slot_minutes.unwrap_or(defaults.slot_minutes),
            five_star_threshold: five_star_threshold.unwrap_or(defaults.five_star_threshold),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "StarConfig(slot_minutes={}, five_star_threshold={}, verbosity={})",
            self.slot_minutes, self.five_star_threshold, self.verbosity
        )
    }
}

impl From<PyStarConfig> for StarConfig {
    fn from(c: PyStarConfig) -> Self {
        Self {
            slot_minutes: c.slot_minutes,
            five_star_threshold: c.five_star_threshold,
            verbosity: c.verbosity,
        }
    }
}

/// A chosen time and its per-slot score.
#[pyclass(name = "RankedTime")]
#[derive(Clone, Debug)]
pub struct PyRankedTime {
    #[pyo3(get)]
    pub label: String,
    #[pyo3(get)]
    pub score: f64,
}

#[pymethods]
impl PyRankedTime {
    fn __repr__(&self) -> String {
        format!("RankedTime(label={:?}, score={})", self.label, self.score)
    }
}

impl From<RankedTime> for PyRankedTime {
    fn from(t: RankedTime) -> Self {
        Self {
            label: t.label,
            score: t.score,
        }
    }
}

/// Best time, runner-up and head-to-head preference.
#[pyclass(name = "StarResult")]
#[derive(Clone, Debug)]
pub struct PyStarResult {
    #[pyo3(get)]
    pub best: Option<PyRankedTime>,
    #[pyo3(get)]
    pub next_best: Option<PyRankedTime>,
    #[pyo3(get)]
    pub preference: Option<f64>,
}

#[pymethods]
impl PyStarResult {
    fn __repr__(&self) -> String {
        format!(
            "StarResult(best={:?}, next_best={:?}, preference={:?})",
            self.best.as_ref().map(|t| &t.label),
            self.next_best.as_ref().map(|t| &t.label),
            self.preference
        )
    }
}

impl From<StarResult> for PyStarResult {
    fn from(r: StarResult) -> Self {
        Self {
            best: r.best.map(Into::into),
            next_best: r.next_best.map(Into::into),
            preference: r.preference,
        }
    }
}

/// Calculate the best meeting time and runner-up using STAR tabulation.
///
/// # Arguments
/// * `times` - Timeslot labels (`HHmm-DDMMYYYY` or `HHmm-d`)
/// * `people` - Participants with their slot scores
/// * `duration` - Meeting length in minutes
/// * `event_id` - Seeds the random tiebreak
/// * `config` - Optional StarConfig
///
/// # Raises
/// * ValueError for an invalid duration or label
#[pyfunction]
#[pyo3(signature = (times, people, duration, event_id, config=None))]
fn calculate_best_times(
    times: Vec<String>,
    people: Vec<PyPerson>,
    duration: u32,
    event_id: String,
    config: Option<PyStarConfig>,
) -> PyResult<PyStarResult> {
    let config: StarConfig = config.map(Into::into).unwrap_or_default();
    let people: Vec<Person> = people.into_iter().map(Into::into).collect();

    match crate::calculate_best_times(
        &times,
        &people,
        duration,
        &event_id,
        &SlotLabelIndex,
        &config,
    ) {
        Ok(result) => Ok(result.into()),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// The star_times Python module.
#[pymodule]
fn star_times(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPerson>()?;
    m.add_class::<PyStarConfig>()?;
    m.add_class::<PyRankedTime>()?;
    m.add_class::<PyStarResult>()?;

    m.add_function(wrap_pyfunction!(calculate_best_times, m)?)?;

    Ok(())
}
