use std::collections::BTreeMap;

use log::debug;

use crate::{
    Catalog, CatalogExercise, LoggedExercise, MAX_LEVEL, MIN_LEVEL, Property, ScoringConfig,
    Stat, StatWeights, is_relevant, weighted_sum,
};

/// Heaviest estimated one-rep-max of an exercise type, together with the
/// catalog metadata in effect when it was computed.
#[derive(Debug, Clone, PartialEq)]
pub struct StrongestLift {
    pub exercise_type: String,
    pub one_rep_max: f64,
    pub exercise: CatalogExercise,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub exercise: String,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PotentialReport {
    pub potentials: BTreeMap<Stat, Option<u32>>,
    pub contributions: BTreeMap<Stat, Vec<Contribution>>,
    /// Keyed by lower-cased exercise type.
    pub strongest_lifts: BTreeMap<String, StrongestLift>,
}

impl PotentialReport {
    #[must_use]
    pub fn potential(&self, stat: Stat) -> Option<u32> {
        self.potentials.get(&stat).copied().flatten()
    }
}

/// Derive the potential of every tracked stat from a user's full history.
///
/// The order of `history` is irrelevant. Entries whose exercise is not in the
/// catalog are ignored.
#[must_use]
pub fn calculate_potential(
    history: &[LoggedExercise],
    catalog: &impl Catalog,
    weights: &StatWeights,
    config: &ScoringConfig,
) -> PotentialReport {
    let mut exercise_types: BTreeMap<String, &CatalogExercise> = BTreeMap::new();
    let mut strongest_lifts: BTreeMap<String, StrongestLift> = BTreeMap::new();

    for entry in history {
        let Some(exercise) = catalog.resolve(&entry.exercise_id, &entry.exercise_type) else {
            debug!(
                "skipping history entry {}: unknown exercise {}",
                *entry.id, entry.exercise_id
            );
            continue;
        };
        let key = entry.type_key();
        exercise_types.entry(key.clone()).or_insert(exercise);

        if !exercise.tracks_one_rep_max() {
            continue;
        }
        let Some(one_rep_max) = entry.leading_one_rep_max() else {
            debug!("skipping unusable set of history entry {}", *entry.id);
            continue;
        };
        if strongest_lifts
            .get(&key)
            .is_none_or(|lift| one_rep_max > lift.one_rep_max)
        {
            strongest_lifts.insert(
                key,
                StrongestLift {
                    exercise_type: entry.exercise_type.trim().to_string(),
                    one_rep_max,
                    exercise: exercise.clone(),
                },
            );
        }
    }

    let mut raw_scores: BTreeMap<Stat, f64> = BTreeMap::new();
    let mut contributions: BTreeMap<Stat, Vec<Contribution>> = BTreeMap::new();

    for lift in strongest_lifts.values() {
        let scale = lift.one_rep_max * lift.exercise.difficulty_multiplier();
        for stat in Stat::iter() {
            let points =
                scale * weighted_sum(&lift.exercise, *stat, weights, config.potential_factors());
            *raw_scores.entry(*stat).or_default() += points;
            if is_relevant(&lift.exercise, *stat, weights) {
                contributions.entry(*stat).or_default().push(Contribution {
                    exercise: lift.exercise.name.to_string(),
                    points,
                });
            }
        }
    }

    let mut potentials = BTreeMap::new();

    for stat in Stat::iter() {
        let potential = if let Some(fixed) = config.fixed_potentials.get(stat) {
            contributions.remove(stat);
            Some(*fixed)
        } else {
            let distinct = exercise_types
                .values()
                .filter(|e| is_relevant(e, *stat, weights))
                .count();
            if strongest_lifts.is_empty() || distinct < config.activation_threshold {
                contributions.remove(stat);
                None
            } else {
                let raw = raw_scores.get(stat).copied().unwrap_or_default();
                let normalized = normalize(raw, config.expected_caps.get(stat).copied());
                Some(smooth(normalized, config.smoothing_slope))
            }
        };
        potentials.insert(*stat, potential);
    }

    PotentialReport {
        potentials,
        contributions,
        strongest_lifts,
    }
}

/// Map a raw score onto the level range, saturating at the expected cap.
#[must_use]
pub fn normalize(raw: f64, expected_cap: Option<f64>) -> u32 {
    if raw <= 0.0 || !raw.is_finite() {
        return MIN_LEVEL;
    }
    let scaled = match expected_cap {
        Some(cap) => (raw / cap).min(1.0) * f64::from(MAX_LEVEL),
        None => raw,
    };
    clamp_level(scaled.round())
}

/// Logistic smoothing centered at the middle of the level range, rescaled so
/// that both ends of the range are fixed points.
#[must_use]
pub fn smooth(normalized: u32, slope: f64) -> u32 {
    let min = f64::from(MIN_LEVEL);
    let max = f64::from(MAX_LEVEL);
    let midpoint = f64::midpoint(min, max);
    let logistic = |x: f64| 1.0 / (1.0 + (-slope * (x - midpoint)).exp());
    let low = logistic(min);
    let high = logistic(max);
    let span = high - low;
    if span.is_nan() || span <= 0.0 {
        return normalized.clamp(MIN_LEVEL, MAX_LEVEL);
    }
    let value = logistic(f64::from(normalized.clamp(MIN_LEVEL, MAX_LEVEL)));
    clamp_level((min + (value - low) / span * (max - min)).round())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn clamp_level(value: f64) -> u32 {
    if value.is_nan() {
        return MIN_LEVEL;
    }
    value.clamp(f64::from(MIN_LEVEL), f64::from(MAX_LEVEL)) as u32
}
