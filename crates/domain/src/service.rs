use std::borrow::Cow;

use log::{debug, error, warn};

use crate::{
    Catalog, EngineError, LevelUp, LoggedExercise, PotentialReport, ScoringConfig, StatSheet,
    StatWeights, XpAward, apply_potentials, apply_xp_and_level_up, calculate_potential,
    calculate_xp, level_ups,
};

/// Result of running the scoring pipeline for a user.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreUpdate {
    pub sheet: StatSheet,
    pub award: XpAward,
    pub report: PotentialReport,
    pub level_ups: Vec<LevelUp>,
}

/// Scores logged exercises against a fixed catalog, weight table and configuration.
///
/// The service holds no per-user state. Callers must score the exercises of a
/// single user one at a time and persist each resulting sheet before scoring
/// the next exercise.
pub struct ScoringService<C> {
    catalog: C,
    weights: StatWeights,
    config: ScoringConfig,
}

macro_rules! log_on_error {
    ($func: expr, $action: literal, $entity: expr) => {{
        let result = $func;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                EngineError::UnknownExercise(_) => {
                    warn!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<C: Catalog> ScoringService<C> {
    pub fn new(
        catalog: C,
        weights: StatWeights,
        config: ScoringConfig,
    ) -> Result<Self, EngineError> {
        log_on_error!(
            Self::validate(&catalog, &weights, &config),
            "initialize",
            "scoring service"
        )?;
        Ok(Self {
            catalog,
            weights,
            config,
        })
    }

    fn validate(
        catalog: &C,
        weights: &StatWeights,
        config: &ScoringConfig,
    ) -> Result<(), EngineError> {
        if catalog.is_empty() {
            return Err(EngineError::ConfigUnavailable(
                "exercise catalog is empty".to_string(),
            ));
        }
        if weights.is_empty() {
            return Err(EngineError::ConfigUnavailable(
                "stat weight table is empty".to_string(),
            ));
        }
        config.validate()?;
        Ok(())
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn weights(&self) -> &StatWeights {
        &self.weights
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a freshly logged exercise.
    ///
    /// `history` is the user's complete exercise history. If it does not yet
    /// contain `entry`, the entry is included in the potential calculation.
    /// The passed sheet is never modified.
    pub fn score(
        &self,
        history: &[LoggedExercise],
        entry: &LoggedExercise,
        sheet: &StatSheet,
    ) -> Result<ScoreUpdate, EngineError> {
        log_on_error!(
            self.score_entry(history, entry, sheet),
            "score",
            format!("entry {}", *entry.id)
        )
    }

    fn score_entry(
        &self,
        history: &[LoggedExercise],
        entry: &LoggedExercise,
        sheet: &StatSheet,
    ) -> Result<ScoreUpdate, EngineError> {
        let exercise = self
            .catalog
            .resolve(&entry.exercise_id, &entry.exercise_type)
            .ok_or_else(|| EngineError::UnknownExercise(entry.exercise_id.to_string()))?;

        let history = if history.iter().any(|e| e.id == entry.id) {
            Cow::Borrowed(history)
        } else {
            let mut entries = history.to_vec();
            entries.push(entry.clone());
            Cow::Owned(entries)
        };

        let report = calculate_potential(&history, &self.catalog, &self.weights, &self.config);
        let activated = apply_potentials(sheet, &report);
        let award = calculate_xp(
            entry,
            exercise,
            &self.weights,
            &report.strongest_lifts,
            &self.config,
        );
        let updated = apply_xp_and_level_up(&activated, &award);
        let level_ups = level_ups(&activated, &updated);
        debug!(
            "scored entry {}: {} stats awarded, {} level-ups",
            *entry.id,
            award.iter().count(),
            level_ups.len()
        );

        Ok(ScoreUpdate {
            sheet: updated,
            award,
            report,
            level_ups,
        })
    }

    /// Recompute potentials without awarding experience, e.g. after an entry
    /// was deleted or the weight table changed.
    ///
    /// Unknown exercises in `history` are skipped, so this cannot fail once the
    /// service has been constructed.
    #[must_use]
    pub fn recalculate(&self, history: &[LoggedExercise], sheet: &StatSheet) -> ScoreUpdate {
        let report = calculate_potential(history, &self.catalog, &self.weights, &self.config);
        ScoreUpdate {
            sheet: apply_potentials(sheet, &report),
            award: XpAward::default(),
            report,
            level_ups: vec![],
        }
    }
}
