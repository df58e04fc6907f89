use std::{collections::BTreeMap, slice::Iter};

use log::warn;

use crate::{
    CatalogExercise, ConfigError, Property, Stat, expand_equipment_list, normalize_equipment,
    normalize_key,
};

/// Raw weight table as read from configuration: `category -> key -> stat -> weight`.
pub type RawStatWeights = BTreeMap<String, BTreeMap<String, BTreeMap<String, f64>>>;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Category {
    Muscles,
    Mechanic,
    Modality,
    DoseType,
    MovementPatterns,
    Equipment,
}

impl Property for Category {
    fn iter() -> Iter<'static, Category> {
        static CATEGORY: [Category; 6] = [
            Category::Muscles,
            Category::Mechanic,
            Category::Modality,
            Category::DoseType,
            Category::MovementPatterns,
            Category::Equipment,
        ];
        CATEGORY.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Category::Muscles => "muscles",
            Category::Mechanic => "mechanic",
            Category::Modality => "modality",
            Category::DoseType => "doseType",
            Category::MovementPatterns => "movementPatterns",
            Category::Equipment => "equipment",
        }
    }
}

/// Immutable per-stat weights of exercise properties.
///
/// The presence of an entry marks a property as relevant to a stat, even if
/// its weight is zero. Keys are stored lower-cased and trimmed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StatWeights(BTreeMap<Category, BTreeMap<String, BTreeMap<Stat, f64>>>);

impl StatWeights {
    pub fn new(raw: RawStatWeights) -> Result<Self, ConfigError> {
        let mut weights: BTreeMap<Category, BTreeMap<String, BTreeMap<Stat, f64>>> =
            BTreeMap::new();

        for (category_name, entries) in raw {
            let category = Category::parse(&category_name, "category")
                .map_err(|_| ConfigError::UnknownCategory(category_name.clone()))?;
            let table = weights.entry(category).or_default();

            for (key, stats) in entries {
                let key = if category == Category::Equipment {
                    normalize_equipment(&key)
                } else {
                    normalize_key(&key)
                };
                let row = table.entry(key.clone()).or_default();

                for (stat_name, weight) in stats {
                    if !weight.is_finite() {
                        return Err(ConfigError::InvalidWeight {
                            category: category_name.clone(),
                            key,
                            stat: stat_name,
                            weight,
                        });
                    }
                    match Stat::try_from(stat_name.as_str()) {
                        Ok(stat) => {
                            row.insert(stat, weight);
                        }
                        Err(err) => {
                            warn!("ignoring weight {category_name}/{key}: {err}");
                        }
                    }
                }
            }
        }

        Ok(Self(weights))
    }

    #[must_use]
    pub fn weight(&self, category: Category, key: &str, stat: Stat) -> Option<f64> {
        self.0
            .get(&category)
            .and_then(|t| t.get(key))
            .and_then(|row| row.get(&stat))
            .copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0
            .values()
            .flat_map(BTreeMap::values)
            .all(BTreeMap::is_empty)
    }
}

/// Scale factors applied to the individual properties of an exercise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyFactors {
    pub secondary_muscles: f64,
    pub movement_patterns: f64,
}

impl PropertyFactors {
    pub const UNIFORM: PropertyFactors = PropertyFactors {
        secondary_muscles: 1.0,
        movement_patterns: 1.0,
    };
}

/// All weight table lookups an exercise resolves to, with their scale factor.
#[must_use]
pub fn property_keys(
    exercise: &CatalogExercise,
    factors: PropertyFactors,
) -> Vec<(Category, String, f64)> {
    let mut keys = vec![];

    for muscle in &exercise.primary_muscles {
        keys.push((Category::Muscles, normalize_key(muscle), 1.0));
    }
    for muscle in &exercise.secondary_muscles {
        keys.push((
            Category::Muscles,
            normalize_key(muscle),
            factors.secondary_muscles,
        ));
    }
    if let Some(mechanic) = exercise.mechanic {
        keys.push((Category::Mechanic, mechanic.name().to_string(), 1.0));
    }
    keys.push((
        Category::Modality,
        exercise.modality.name().to_string(),
        1.0,
    ));
    if let Some(dose_type) = exercise.dose_type {
        keys.push((Category::DoseType, dose_type.name().to_string(), 1.0));
    }
    for pattern in &exercise.movement_patterns {
        keys.push((
            Category::MovementPatterns,
            normalize_key(pattern),
            factors.movement_patterns,
        ));
    }
    for equipment in expand_equipment_list(&exercise.equipment) {
        keys.push((Category::Equipment, equipment, 1.0));
    }

    keys
}

/// Whether any property of the exercise has a weight entry for the stat.
#[must_use]
pub fn is_relevant(exercise: &CatalogExercise, stat: Stat, weights: &StatWeights) -> bool {
    property_keys(exercise, PropertyFactors::UNIFORM)
        .iter()
        .any(|(category, key, _)| weights.weight(*category, key, stat).is_some())
}

/// Sum of the scaled weights of all exercise properties for the stat.
#[must_use]
pub fn weighted_sum(
    exercise: &CatalogExercise,
    stat: Stat,
    weights: &StatWeights,
    factors: PropertyFactors,
) -> f64 {
    property_keys(exercise, factors)
        .iter()
        .filter_map(|(category, key, factor)| {
            weights.weight(*category, key, stat).map(|w| w * factor)
        })
        .sum()
}

/// Per-stat weighting vector of an exercise.
#[must_use]
pub fn stat_weighting(
    exercise: &CatalogExercise,
    weights: &StatWeights,
    factors: PropertyFactors,
) -> BTreeMap<Stat, f64> {
    Stat::iter()
        .map(|stat| (*stat, weighted_sum(exercise, *stat, weights, factors)))
        .collect()
}
