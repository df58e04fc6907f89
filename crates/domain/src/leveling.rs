use log::debug;

use crate::{
    MAX_LEVEL, PotentialReport, Property, Stat, StatSheet, StatState, XpAward,
    potential::clamp_level,
};

/// Experience required to advance from `level` to the next level.
#[must_use]
pub fn xp_to_next(level: u32) -> f64 {
    (30.0 * 1.015_f64.powf(f64::from(level))).round()
}

/// Level a stat starts at when it first becomes active.
#[must_use]
pub fn initial_level(potential: u32) -> u32 {
    clamp_level((f64::from(potential) * 0.1).round())
}

/// Bring the sheet in line with freshly computed potentials.
///
/// Stats gaining a potential are activated, active stats only get their
/// potential replaced and stats losing their potential are reset.
#[must_use]
pub fn apply_potentials(sheet: &StatSheet, report: &PotentialReport) -> StatSheet {
    let mut sheet = sheet.clone();

    for stat in Stat::iter() {
        let state = sheet.get_mut(*stat);
        match (report.potential(*stat), state.current) {
            (Some(potential), None) => {
                let current = initial_level(potential);
                debug!("activating {} at level {current}", stat.name());
                *state = StatState {
                    current: Some(current),
                    potential: Some(potential),
                    xp: 0.0,
                    xp_to_next: xp_to_next(current),
                };
            }
            (Some(potential), Some(_)) => {
                state.potential = Some(potential);
            }
            (None, _) => {
                if state.current.is_some() || state.potential.is_some() {
                    debug!("deactivating {}", stat.name());
                }
                *state = StatState::inactive();
            }
        }
    }

    sheet
}

/// Add the awarded experience to every active stat and resolve level-ups.
///
/// Experience for inactive stats is dropped.
#[must_use]
pub fn apply_xp_and_level_up(sheet: &StatSheet, award: &XpAward) -> StatSheet {
    let mut sheet = sheet.clone();

    for (stat, delta) in award.iter() {
        if delta.abs() < f64::EPSILON {
            continue;
        }
        let state = sheet.get_mut(*stat);
        let (Some(mut current), Some(_)) = (state.current, state.potential) else {
            debug!("dropping {delta} xp for inactive {}", stat.name());
            continue;
        };

        if !(state.xp_to_next.is_finite() && state.xp_to_next > 0.0) {
            state.xp_to_next = xp_to_next(current);
        }
        state.xp = (state.xp + delta).max(0.0);

        while state.xp >= state.xp_to_next && current < MAX_LEVEL {
            state.xp -= state.xp_to_next;
            current += 1;
            state.xp_to_next = xp_to_next(current);
        }

        if current >= MAX_LEVEL {
            current = MAX_LEVEL;
            state.xp = 0.0;
            state.xp_to_next = xp_to_next(MAX_LEVEL);
        }
        state.current = Some(current);
        state.xp = state.xp.max(0.0);
    }

    sheet
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub stat: Stat,
    pub from: u32,
    pub to: u32,
}

/// Stats whose level increased between two sheets. Activations are not level-ups.
#[must_use]
pub fn level_ups(before: &StatSheet, after: &StatSheet) -> Vec<LevelUp> {
    Stat::iter()
        .filter_map(|stat| {
            let from = before.get(*stat)?.current?;
            let to = after.get(*stat)?.current?;
            (to > from).then_some(LevelUp {
                stat: *stat,
                from,
                to,
            })
        })
        .collect()
}
