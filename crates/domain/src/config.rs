use std::collections::BTreeMap;

use crate::{ConfigError, MAX_LEVEL, MIN_LEVEL, PropertyFactors, Stat};

/// Tunable constants of the scoring engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Distinct relevant exercise types required before a strength stat gets a potential.
    pub activation_threshold: usize,
    /// Raw score at which a stat's normalized potential saturates.
    pub expected_caps: BTreeMap<Stat, f64>,
    /// Stats whose potential is a fixed ceiling rather than derived from strength data.
    pub fixed_potentials: BTreeMap<Stat, u32>,
    pub smoothing_slope: f64,
    pub secondary_muscle_factor: f64,
    pub xp_movement_pattern_factor: f64,
    pub xp_per_rep_set: f64,
    pub xp_per_contact_set: f64,
    pub xp_per_duration_unit: f64,
    pub duration_unit_seconds: f64,
    pub xp_fallback: f64,
    pub conditioning_bonus: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            activation_threshold: 5,
            expected_caps: BTreeMap::from([
                (Stat::UpperBodyStrength, 4000.0),
                (Stat::LowerBodyStrength, 6000.0),
                (Stat::CoreStrength, 2500.0),
                (Stat::PowerExplosiveness, 3000.0),
            ]),
            fixed_potentials: BTreeMap::from([
                (Stat::CardioEndurance, MAX_LEVEL),
                (Stat::FlexibilityMobility, MAX_LEVEL),
            ]),
            smoothing_slope: 0.005,
            secondary_muscle_factor: 0.5,
            xp_movement_pattern_factor: 0.75,
            xp_per_rep_set: 5.0,
            xp_per_contact_set: 4.0,
            xp_per_duration_unit: 8.0,
            duration_unit_seconds: 30.0,
            xp_fallback: 3.0,
            conditioning_bonus: 1.2,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for cap in self.expected_caps.values() {
            positive("expected_cap", *cap)?;
        }
        for potential in self.fixed_potentials.values() {
            if !(MIN_LEVEL..=MAX_LEVEL).contains(potential) {
                return Err(ConfigError::InvalidConstant {
                    name: "fixed_potential",
                    value: f64::from(*potential),
                });
            }
        }
        positive("smoothing_slope", self.smoothing_slope)?;
        positive("duration_unit_seconds", self.duration_unit_seconds)?;
        for (name, value) in [
            ("secondary_muscle_factor", self.secondary_muscle_factor),
            ("xp_movement_pattern_factor", self.xp_movement_pattern_factor),
            ("xp_per_rep_set", self.xp_per_rep_set),
            ("xp_per_contact_set", self.xp_per_contact_set),
            ("xp_per_duration_unit", self.xp_per_duration_unit),
            ("xp_fallback", self.xp_fallback),
            ("conditioning_bonus", self.conditioning_bonus),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidConstant { name, value });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn potential_factors(&self) -> PropertyFactors {
        PropertyFactors {
            secondary_muscles: self.secondary_muscle_factor,
            movement_patterns: 1.0,
        }
    }

    #[must_use]
    pub fn xp_factors(&self) -> PropertyFactors {
        PropertyFactors {
            secondary_muscles: self.secondary_muscle_factor,
            movement_patterns: self.xp_movement_pattern_factor,
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidConstant { name, value })
    }
}
