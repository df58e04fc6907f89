use std::collections::BTreeMap;

use log::debug;

use crate::{
    CatalogExercise, DoseType, LoggedExercise, LoggedSet, Modality, ScoringConfig, Stat,
    StatWeights, StrongestLift, one_rep_max, stat_weighting,
};

/// Experience earned per stat by a single logged exercise.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct XpAward(BTreeMap<Stat, f64>);

impl XpAward {
    #[must_use]
    pub fn get(&self, stat: Stat) -> f64 {
        self.0.get(&stat).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Stat, &f64)> {
        self.0.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Stat, f64)> for XpAward {
    fn from_iter<T: IntoIterator<Item = (Stat, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Convert a freshly logged exercise into experience per stat.
///
/// `strongest_lifts` is the map produced by the potential calculation and is
/// used to scale rep-based sets by their effort relative to the best lift.
#[must_use]
pub fn calculate_xp(
    entry: &LoggedExercise,
    exercise: &CatalogExercise,
    weights: &StatWeights,
    strongest_lifts: &BTreeMap<String, StrongestLift>,
    config: &ScoringConfig,
) -> XpAward {
    let weighting = stat_weighting(exercise, weights, config.xp_factors());
    let difficulty = exercise.difficulty_multiplier();
    let mut totals: BTreeMap<Stat, f64> = BTreeMap::new();
    let mut award = |amount: f64| {
        for (stat, weight) in &weighting {
            *totals.entry(*stat).or_default() += amount * weight;
        }
    };

    match exercise.dose_type {
        Some(dose_type) if dose_type.is_rep_based() => {
            let base = if dose_type == DoseType::Contacts {
                config.xp_per_contact_set
            } else {
                config.xp_per_rep_set
            };
            let strongest = strongest_lifts
                .get(&entry.type_key())
                .map(|lift| lift.one_rep_max)
                .filter(|orm| *orm > 0.0);

            for set in rep_sets(entry) {
                let Some(reps) = set.valid_reps() else {
                    continue;
                };
                if set.has_malformed_weight() {
                    debug!("skipping set with malformed weight in entry {}", *entry.id);
                    continue;
                }
                let effort = match (set.valid_weight(), strongest) {
                    (Some(weight), Some(strongest)) => {
                        (one_rep_max(weight, reps) / strongest).min(1.0)
                    }
                    _ => 1.0,
                };
                award(base * difficulty * effort);
            }
        }
        Some(_) => {
            let bonus = if exercise.modality == Modality::Conditioning {
                config.conditioning_bonus
            } else {
                1.0
            };
            for seconds in entry.durations() {
                award(
                    config.xp_per_duration_unit * (seconds / config.duration_unit_seconds)
                        * difficulty
                        * bonus,
                );
            }
        }
        None => {
            if !entry.sets.is_empty() {
                award(config.xp_fallback * difficulty);
            }
        }
    }

    totals
        .into_iter()
        .map(|(stat, xp)| (stat, round_xp(xp)))
        .filter(|(_, xp)| *xp > 0.0)
        .collect()
}

/// Logged sets, or a single set built from the legacy flat reps and weight.
fn rep_sets(entry: &LoggedExercise) -> Vec<LoggedSet> {
    if entry.sets.is_empty() && entry.reps.is_some() {
        vec![LoggedSet {
            reps: entry.reps,
            weight: entry.weight,
            duration: None,
        }]
    } else {
        entry.sets.clone()
    }
}

/// Round to two decimals, never below zero.
#[must_use]
pub fn round_xp(xp: f64) -> f64 {
    if xp.is_finite() && xp > 0.0 {
        (xp * 100.0).round() / 100.0
    } else {
        0.0
    }
}
