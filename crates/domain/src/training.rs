use chrono::NaiveDateTime;
use derive_more::Deref;
use uuid::Uuid;

use crate::{ExerciseID, Modality, normalize_key};

/// Estimate the one-rep-max of a set using the Epley formula.
#[must_use]
pub fn one_rep_max(weight: f64, reps: u32) -> f64 {
    match reps {
        0 => 0.0,
        1 => weight,
        _ => weight * (1.0 + f64::from(reps) / 30.0),
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct LogEntryID(Uuid);

impl LogEntryID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for LogEntryID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for LogEntryID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoggedSet {
    pub reps: Option<u32>,
    pub weight: Option<f64>,
    pub duration: Option<f64>,
}

impl LoggedSet {
    #[must_use]
    pub fn valid_reps(&self) -> Option<u32> {
        self.reps.filter(|r| *r > 0)
    }

    #[must_use]
    pub fn valid_weight(&self) -> Option<f64> {
        self.weight.filter(|w| is_positive(*w))
    }

    #[must_use]
    pub fn valid_duration(&self) -> Option<f64> {
        self.duration.filter(|d| is_positive(*d))
    }

    /// A set with a recorded but unusable weight is excluded from scoring.
    #[must_use]
    pub fn has_malformed_weight(&self) -> bool {
        self.weight.is_some() && self.valid_weight().is_none()
    }
}

pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggedExercise {
    pub id: LogEntryID,
    pub date: NaiveDateTime,
    pub exercise_id: ExerciseID,
    /// Resolved exercise type name, used to group entries of the same exercise.
    pub exercise_type: String,
    pub modality: Option<Modality>,
    pub sets: Vec<LoggedSet>,
    pub duration: Option<f64>,
    pub reps: Option<u32>,
    pub weight: Option<f64>,
}

impl LoggedExercise {
    #[must_use]
    pub fn type_key(&self) -> String {
        normalize_key(&self.exercise_type)
    }

    /// Reps and weight of the first set, or the legacy flat values if no sets were logged.
    #[must_use]
    pub fn leading_reps_and_weight(&self) -> (Option<u32>, Option<f64>) {
        match self.sets.first() {
            Some(set) => (set.reps, set.weight),
            None => (self.reps, self.weight),
        }
    }

    /// One-rep-max estimated from the leading set, if reps and weight are usable.
    #[must_use]
    pub fn leading_one_rep_max(&self) -> Option<f64> {
        let (reps, weight) = self.leading_reps_and_weight();
        let reps = reps.filter(|r| *r > 0)?;
        let weight = weight.filter(|w| is_positive(*w))?;
        Some(one_rep_max(weight, reps))
    }

    /// Positive per-set durations, or the aggregate duration if no set has one.
    #[must_use]
    pub fn durations(&self) -> Vec<f64> {
        let per_set = self
            .sets
            .iter()
            .filter_map(|s| s.duration)
            .collect::<Vec<_>>();
        if per_set.is_empty() {
            self.duration.filter(|d| is_positive(*d)).into_iter().collect()
        } else {
            per_set.into_iter().filter(|d| is_positive(*d)).collect()
        }
    }
}

/// A user's exercise history. Entries are only ever appended or removed by identity.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExerciseLog(Vec<LoggedExercise>);

impl ExerciseLog {
    #[must_use]
    pub fn new(entries: Vec<LoggedExercise>) -> Self {
        Self(entries)
    }

    pub fn push(&mut self, entry: LoggedExercise) {
        self.0.push(entry);
    }

    pub fn remove(&mut self, id: LogEntryID) -> Option<LoggedExercise> {
        let index = self.0.iter().position(|e| e.id == id)?;
        Some(self.0.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: LogEntryID) -> Option<&LoggedExercise> {
        self.0.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn entries(&self) -> &[LoggedExercise] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
