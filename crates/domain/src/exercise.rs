use std::{collections::BTreeMap, slice::Iter};

use derive_more::{Deref, Display, From};

use crate::{ConfigError, Name, normalize_key};

/// Read-only lookup of catalog exercises.
pub trait Catalog {
    fn exercise_by_id(&self, id: &ExerciseID) -> Option<&CatalogExercise>;
    fn exercise_by_name(&self, name: &str) -> Option<&CatalogExercise>;
    fn is_empty(&self) -> bool;

    /// Resolve an exercise by id, falling back to its name.
    fn resolve(&self, id: &ExerciseID, name: &str) -> Option<&CatalogExercise> {
        self.exercise_by_id(id)
            .or_else(|| self.exercise_by_name(name))
    }
}

#[derive(Deref, Debug, Display, Default, Clone, From, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(String);

impl From<&str> for ExerciseID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogExercise {
    pub id: ExerciseID,
    pub name: Name,
    pub modality: Modality,
    pub dose_type: Option<DoseType>,
    pub equipment: Vec<String>,
    pub primary_muscles: Vec<String>,
    pub secondary_muscles: Vec<String>,
    pub mechanic: Option<Mechanic>,
    pub movement_patterns: Vec<String>,
    pub difficulty: Option<Difficulty>,
}

impl CatalogExercise {
    /// Whether sets of this exercise feed the one-rep-max tracking.
    #[must_use]
    pub fn tracks_one_rep_max(&self) -> bool {
        matches!(self.modality, Modality::Strength | Modality::Power)
            && self.dose_type.is_some_and(DoseType::is_rep_based)
    }

    #[must_use]
    pub fn difficulty_multiplier(&self) -> f64 {
        difficulty_multiplier(self.difficulty)
    }
}

/// In-memory catalog, indexed by id and by case-insensitive name.
#[derive(Debug, Default, Clone)]
pub struct ExerciseCatalog {
    exercises: BTreeMap<ExerciseID, CatalogExercise>,
    names: BTreeMap<String, ExerciseID>,
}

impl ExerciseCatalog {
    pub fn new(exercises: Vec<CatalogExercise>) -> Result<Self, ConfigError> {
        let mut catalog = Self::default();
        for exercise in exercises {
            if catalog.exercises.contains_key(&exercise.id) {
                return Err(ConfigError::DuplicateExercise(exercise.id.to_string()));
            }
            catalog
                .names
                .entry(exercise.name.key())
                .or_insert_with(|| exercise.id.clone());
            catalog.exercises.insert(exercise.id.clone(), exercise);
        }
        Ok(catalog)
    }

    pub fn exercises(&self) -> impl Iterator<Item = &CatalogExercise> {
        self.exercises.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }
}

impl Catalog for ExerciseCatalog {
    fn exercise_by_id(&self, id: &ExerciseID) -> Option<&CatalogExercise> {
        self.exercises.get(id)
    }

    fn exercise_by_name(&self, name: &str) -> Option<&CatalogExercise> {
        self.names
            .get(&normalize_key(name))
            .and_then(|id| self.exercises.get(id))
    }

    fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Modality {
    Strength,
    Power,
    Conditioning,
    Skill,
    Mobility,
}

impl Property for Modality {
    fn iter() -> Iter<'static, Modality> {
        static MODALITY: [Modality; 5] = [
            Modality::Strength,
            Modality::Power,
            Modality::Conditioning,
            Modality::Skill,
            Modality::Mobility,
        ];
        MODALITY.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Modality::Strength => "strength",
            Modality::Power => "power",
            Modality::Conditioning => "conditioning",
            Modality::Skill => "skill",
            Modality::Mobility => "mobility",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DoseType {
    Reps,
    Contacts,
    Time,
    Distance,
    Intervals,
    Holds,
}

impl DoseType {
    #[must_use]
    pub fn is_rep_based(self) -> bool {
        matches!(self, DoseType::Reps | DoseType::Contacts)
    }

    #[must_use]
    pub fn is_duration_based(self) -> bool {
        !self.is_rep_based()
    }
}

impl Property for DoseType {
    fn iter() -> Iter<'static, DoseType> {
        static DOSE_TYPE: [DoseType; 6] = [
            DoseType::Reps,
            DoseType::Contacts,
            DoseType::Time,
            DoseType::Distance,
            DoseType::Intervals,
            DoseType::Holds,
        ];
        DOSE_TYPE.iter()
    }

    fn name(self) -> &'static str {
        match self {
            DoseType::Reps => "reps",
            DoseType::Contacts => "contacts",
            DoseType::Time => "time",
            DoseType::Distance => "distance",
            DoseType::Intervals => "intervals",
            DoseType::Holds => "holds",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mechanic {
    Compound,
    Isolation,
}

impl Property for Mechanic {
    fn iter() -> Iter<'static, Mechanic> {
        static MECHANIC: [Mechanic; 2] = [Mechanic::Compound, Mechanic::Isolation];
        MECHANIC.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Mechanic::Compound => "compound",
            Mechanic::Isolation => "isolation",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            Difficulty::Beginner => 1.0,
            Difficulty::Intermediate => 1.25,
            Difficulty::Expert => 1.5,
        }
    }
}

#[must_use]
pub fn difficulty_multiplier(difficulty: Option<Difficulty>) -> f64 {
    difficulty.map_or(1.0, Difficulty::multiplier)
}

impl Property for Difficulty {
    fn iter() -> Iter<'static, Difficulty> {
        static DIFFICULTY: [Difficulty; 3] = [
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Expert,
        ];
        DIFFICULTY.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Expert => "expert",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Difficulty::Expert => &["advanced"],
            Difficulty::Beginner | Difficulty::Intermediate => &[],
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("Unknown {property} \"{value}\"")]
pub struct PropertyError {
    pub property: &'static str,
    pub value: String,
}

pub trait Property: Clone + Copy + Sized + 'static {
    fn iter() -> Iter<'static, Self>;
    fn name(self) -> &'static str;
    fn aliases(self) -> &'static [&'static str] {
        &[]
    }

    /// Case-insensitive lookup by name or alias.
    fn parse(value: &str, property: &'static str) -> Result<Self, PropertyError> {
        let key = normalize_key(value);
        Self::iter()
            .find(|p| p.name().to_lowercase() == key || p.aliases().contains(&key.as_str()))
            .copied()
            .ok_or_else(|| PropertyError {
                property,
                value: value.to_string(),
            })
    }
}
