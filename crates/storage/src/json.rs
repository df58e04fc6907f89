use std::{
    collections::BTreeMap,
    io::{Read, Write},
};

use chrono::NaiveDateTime;
use gainquest_domain::{self as domain, Property};
use log::debug;
use uuid::Uuid;

use crate::StorageError;

pub fn read_catalog(reader: impl Read) -> Result<domain::ExerciseCatalog, StorageError> {
    let exercises: Vec<Exercise> = serde_json::from_reader(reader)?;
    let exercises = exercises
        .into_iter()
        .map(|e| {
            let id = e.id.clone();
            domain::CatalogExercise::try_from(e)
                .map_err(|err| StorageError::Conversion(format!("exercise \"{id}\": {err}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(domain::ExerciseCatalog::new(exercises)?)
}

pub fn read_weights(reader: impl Read) -> Result<domain::StatWeights, StorageError> {
    let raw: domain::RawStatWeights = serde_json::from_reader(reader)?;
    Ok(domain::StatWeights::new(raw)?)
}

pub fn read_history(reader: impl Read) -> Result<domain::ExerciseLog, StorageError> {
    let entries: Vec<LoggedExercise> = serde_json::from_reader(reader)?;
    Ok(domain::ExerciseLog::new(
        entries.into_iter().map(domain::LoggedExercise::from).collect(),
    ))
}

pub fn write_history(writer: impl Write, log: &domain::ExerciseLog) -> Result<(), StorageError> {
    let entries = log
        .entries()
        .iter()
        .map(LoggedExercise::from)
        .collect::<Vec<_>>();
    serde_json::to_writer_pretty(writer, &entries)?;
    Ok(())
}

pub fn read_stat_sheet(reader: impl Read) -> Result<domain::StatSheet, StorageError> {
    let sheet: StatSheet = serde_json::from_reader(reader)?;
    domain::StatSheet::try_from(sheet).map_err(|err| StorageError::Conversion(err.to_string()))
}

pub fn write_stat_sheet(writer: impl Write, sheet: &domain::StatSheet) -> Result<(), StorageError> {
    serde_json::to_writer_pretty(writer, &StatSheet::from(sheet))?;
    Ok(())
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub modality: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dose_type: Option<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub primary_muscles: Vec<String>,
    #[serde(default)]
    pub secondary_muscles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanic: Option<String>,
    #[serde(default)]
    pub movement_patterns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl From<&domain::CatalogExercise> for Exercise {
    fn from(value: &domain::CatalogExercise) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
            modality: value.modality.name().to_string(),
            dose_type: value.dose_type.map(|d| d.name().to_string()),
            equipment: value.equipment.clone(),
            primary_muscles: value.primary_muscles.clone(),
            secondary_muscles: value.secondary_muscles.clone(),
            mechanic: value.mechanic.map(|m| m.name().to_string()),
            movement_patterns: value.movement_patterns.clone(),
            level: value.difficulty.map(|d| d.name().to_string()),
        }
    }
}

impl TryFrom<Exercise> for domain::CatalogExercise {
    type Error = ExerciseError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            name: domain::Name::new(&value.name)?,
            modality: domain::Modality::parse(&value.modality, "modality")?,
            dose_type: optional_property(&value.id, value.dose_type.as_deref(), "dose type"),
            mechanic: optional_property(&value.id, value.mechanic.as_deref(), "mechanic"),
            difficulty: optional_property(&value.id, value.level.as_deref(), "level"),
            id: value.id.into(),
            equipment: value.equipment,
            primary_muscles: value.primary_muscles,
            secondary_muscles: value.secondary_muscles,
            movement_patterns: value.movement_patterns,
        })
    }
}

/// Unrecognized optional properties are treated as absent.
fn optional_property<P: Property>(
    id: &str,
    value: Option<&str>,
    property: &'static str,
) -> Option<P> {
    let value = value?;
    match P::parse(value, property) {
        Ok(p) => Some(p),
        Err(err) => {
            debug!("exercise {id}: {err}");
            None
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ExerciseError {
    #[error(transparent)]
    InvalidName(#[from] domain::NameError),
    #[error(transparent)]
    InvalidProperty(#[from] domain::PropertyError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggedExercise {
    pub id: Uuid,
    pub date: NaiveDateTime,
    pub exercise_id: String,
    pub exercise_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modality: Option<String>,
    #[serde(default)]
    pub sets: Vec<LoggedSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl From<&domain::LoggedExercise> for LoggedExercise {
    fn from(value: &domain::LoggedExercise) -> Self {
        Self {
            id: *value.id,
            date: value.date,
            exercise_id: value.exercise_id.to_string(),
            exercise_type: value.exercise_type.clone(),
            modality: value.modality.map(|m| m.name().to_string()),
            sets: value.sets.iter().map(LoggedSet::from).collect(),
            duration: value.duration,
            reps: value.reps.map(i64::from),
            weight: value.weight,
        }
    }
}

impl From<LoggedExercise> for domain::LoggedExercise {
    fn from(value: LoggedExercise) -> Self {
        let modality = value
            .modality
            .as_deref()
            .and_then(|m| domain::Modality::parse(m, "modality").ok());
        Self {
            id: value.id.into(),
            date: value.date,
            exercise_id: value.exercise_id.into(),
            exercise_type: value.exercise_type,
            modality,
            sets: value.sets.into_iter().map(domain::LoggedSet::from).collect(),
            duration: value.duration,
            reps: value.reps.map(reps),
            weight: value.weight,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct LoggedSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl From<&domain::LoggedSet> for LoggedSet {
    fn from(value: &domain::LoggedSet) -> Self {
        Self {
            reps: value.reps.map(i64::from),
            weight: value.weight,
            duration: value.duration,
        }
    }
}

impl From<LoggedSet> for domain::LoggedSet {
    fn from(value: LoggedSet) -> Self {
        Self {
            reps: value.reps.map(reps),
            weight: value.weight,
            duration: value.duration,
        }
    }
}

/// Negative rep counts are kept as zero, which excludes the set from scoring.
fn reps(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatState {
    pub current: Option<u32>,
    pub potential: Option<u32>,
    #[serde(default)]
    pub xp: f64,
    #[serde(default)]
    pub xp_to_next: f64,
}

impl From<&domain::StatState> for StatState {
    fn from(value: &domain::StatState) -> Self {
        Self {
            current: value.current,
            potential: value.potential,
            xp: value.xp,
            xp_to_next: value.xp_to_next,
        }
    }
}

impl TryFrom<StatState> for domain::StatState {
    type Error = StatStateError;

    fn try_from(value: StatState) -> Result<Self, Self::Error> {
        let levels = domain::MIN_LEVEL..=domain::MAX_LEVEL;
        match (value.current, value.potential) {
            (Some(current), Some(potential)) => {
                if !levels.contains(&current) {
                    return Err(StatStateError::LevelOutOfRange(current));
                }
                if !levels.contains(&potential) {
                    return Err(StatStateError::PotentialOutOfRange(potential));
                }
            }
            (None, None) => {}
            _ => return Err(StatStateError::PartiallyActive),
        }
        for xp in [value.xp, value.xp_to_next] {
            if !xp.is_finite() || xp < 0.0 {
                return Err(StatStateError::InvalidXp(xp));
            }
        }
        Ok(Self {
            current: value.current,
            potential: value.potential,
            xp: value.xp,
            xp_to_next: value.xp_to_next,
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum StatStateError {
    #[error(transparent)]
    UnknownStat(#[from] domain::StatError),
    #[error("current level and potential must both be set or both be null")]
    PartiallyActive,
    #[error("level {0} out of range")]
    LevelOutOfRange(u32),
    #[error("potential {0} out of range")]
    PotentialOutOfRange(u32),
    #[error("invalid experience value {0}")]
    InvalidXp(f64),
}

/// Stat states keyed by stat name.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct StatSheet(pub BTreeMap<String, StatState>);

impl From<&domain::StatSheet> for StatSheet {
    fn from(value: &domain::StatSheet) -> Self {
        Self(
            value
                .iter()
                .map(|(stat, state)| (stat.name().to_string(), StatState::from(state)))
                .collect(),
        )
    }
}

impl TryFrom<StatSheet> for domain::StatSheet {
    type Error = StatStateError;

    fn try_from(value: StatSheet) -> Result<Self, Self::Error> {
        value
            .0
            .into_iter()
            .map(|(name, state)| {
                let stat = domain::Stat::try_from(name.as_str())?;
                let state = domain::StatState::try_from(state)?;
                Ok((stat, state))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::tests::data::{CATALOG_JSON, HISTORY_JSON, STAT_SHEET_JSON, WEIGHTS_JSON};
    use gainquest_domain::Catalog;

    #[test]
    fn test_read_catalog() {
        let catalog = read_catalog(CATALOG_JSON.as_bytes()).unwrap();
        let bench_press = catalog.exercise_by_name("bench press").unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(*bench_press.id, "bench_press");
        assert_eq!(bench_press.dose_type, Some(domain::DoseType::Reps));
        assert_eq!(bench_press.difficulty, None);
        assert_eq!(bench_press.secondary_muscles, vec!["triceps", "shoulders"]);

        let plank = catalog.exercise_by_id(&"plank".into()).unwrap();

        assert_eq!(plank.modality, domain::Modality::Conditioning);
        assert_eq!(plank.difficulty, Some(domain::Difficulty::Expert));
        assert_eq!(plank.mechanic, None);
    }

    #[test]
    fn test_read_catalog_unknown_dose_type() {
        let catalog = read_catalog(CATALOG_JSON.as_bytes()).unwrap();

        assert_eq!(
            catalog
                .exercise_by_id(&"tire_flip".into())
                .unwrap()
                .dose_type,
            None
        );
    }

    #[rstest]
    #[case::unknown_modality(
        r#"[{"id": "a", "name": "A", "modality": "dance"}]"#,
        "exercise \"a\": Unknown modality \"dance\""
    )]
    #[case::empty_name(
        r#"[{"id": "a", "name": " ", "modality": "strength"}]"#,
        "exercise \"a\": Name must not be empty"
    )]
    fn test_read_catalog_invalid_exercise(#[case] json: &str, #[case] message: &str) {
        assert!(matches!(
            read_catalog(json.as_bytes()),
            Err(StorageError::Conversion(m)) if m == message
        ));
    }

    #[test]
    fn test_read_catalog_duplicate_exercise() {
        let json = r#"[
            {"id": "a", "name": "A", "modality": "strength"},
            {"id": "a", "name": "B", "modality": "strength"}
        ]"#;

        assert!(matches!(
            read_catalog(json.as_bytes()),
            Err(StorageError::Config(domain::ConfigError::DuplicateExercise(id))) if id == "a"
        ));
    }

    #[test]
    fn test_read_catalog_invalid_json() {
        assert!(matches!(
            read_catalog("{".as_bytes()),
            Err(StorageError::Json(_))
        ));
    }

    #[test]
    fn test_read_weights() {
        let weights = read_weights(WEIGHTS_JSON.as_bytes()).unwrap();

        assert_eq!(
            weights.weight(
                domain::Category::Muscles,
                "chest",
                domain::Stat::UpperBodyStrength
            ),
            Some(1.0)
        );
        assert_eq!(
            weights.weight(
                domain::Category::Equipment,
                "cable stack",
                domain::Stat::UpperBodyStrength
            ),
            Some(0.2)
        );
    }

    #[test]
    fn test_read_weights_unknown_category() {
        assert!(matches!(
            read_weights(r#"{"tempo": {"slow": {"coreStrength": 1.0}}}"#.as_bytes()),
            Err(StorageError::Config(domain::ConfigError::UnknownCategory(c))) if c == "tempo"
        ));
    }

    #[test]
    fn test_read_history() {
        let log = read_history(HISTORY_JSON.as_bytes()).unwrap();
        let entries = log.entries();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].modality, Some(domain::Modality::Strength));
        assert_eq!(entries[0].sets.len(), 2);
        assert_eq!(entries[0].sets[1].reps, Some(0));
        assert_eq!(entries[1].reps, Some(5));
        assert_approx_eq!(entries[1].leading_one_rep_max().unwrap(), 116.666_666, 1e-6);
        assert_eq!(entries[2].durations(), vec![60.0, 45.0]);
    }

    #[test]
    fn test_write_history() {
        let log = read_history(HISTORY_JSON.as_bytes()).unwrap();
        let mut buffer = vec![];
        write_history(&mut buffer, &log).unwrap();

        assert_eq!(read_history(buffer.as_slice()).unwrap(), log);
    }

    #[test]
    fn test_read_stat_sheet() {
        let sheet = read_stat_sheet(STAT_SHEET_JSON.as_bytes()).unwrap();

        assert_eq!(
            sheet.get(domain::Stat::CardioEndurance),
            Some(&domain::StatState {
                current: Some(100),
                potential: Some(1000),
                xp: 54.0,
                xp_to_next: 133.0,
            })
        );
        assert_eq!(
            sheet.get(domain::Stat::CoreStrength),
            Some(&domain::StatState::inactive())
        );
    }

    #[test]
    fn test_read_stat_sheet_unknown_stat() {
        assert!(matches!(
            read_stat_sheet(r#"{"charisma": {"current": 1, "potential": 1}}"#.as_bytes()),
            Err(StorageError::Conversion(_))
        ));
    }

    #[rstest]
    #[case(Some(0), Some(500), 0.0, 3.0, StatStateError::LevelOutOfRange(0))]
    #[case(Some(1001), Some(1000), 0.0, 3.0, StatStateError::LevelOutOfRange(1001))]
    #[case(Some(50), Some(0), 0.0, 3.0, StatStateError::PotentialOutOfRange(0))]
    #[case(Some(50), Some(2000), 0.0, 3.0, StatStateError::PotentialOutOfRange(2000))]
    #[case(Some(50), None, 0.0, 3.0, StatStateError::PartiallyActive)]
    #[case(None, Some(500), 0.0, 0.0, StatStateError::PartiallyActive)]
    #[case(Some(50), Some(500), -1.0, 3.0, StatStateError::InvalidXp(-1.0))]
    #[case(Some(50), Some(500), 0.0, -3.0, StatStateError::InvalidXp(-3.0))]
    fn test_stat_state_invalid(
        #[case] current: Option<u32>,
        #[case] potential: Option<u32>,
        #[case] xp: f64,
        #[case] xp_to_next: f64,
        #[case] expected: StatStateError,
    ) {
        let state = StatState {
            current,
            potential,
            xp,
            xp_to_next,
        };

        assert_eq!(domain::StatState::try_from(state), Err(expected));
    }

    #[rstest]
    #[case(r#"{"upperBodyStrength": {"current": 0, "potential": 500}}"#, "level 0")]
    #[case(r#"{"upperBodyStrength": {"current": 1001, "potential": 1000}}"#, "level 1001")]
    #[case(r#"{"upperBodyStrength": {"current": 40, "potential": null}}"#, "both")]
    #[case(r#"{"upperBodyStrength": {"current": null, "potential": 400}}"#, "both")]
    fn test_read_stat_sheet_invalid_state(#[case] json: &str, #[case] message: &str) {
        let err = read_stat_sheet(json.as_bytes()).unwrap_err();

        assert!(matches!(err, StorageError::Conversion(_)));
        assert!(err.to_string().contains(message));
    }

    #[test]
    fn test_write_stat_sheet() {
        let sheet = read_stat_sheet(STAT_SHEET_JSON.as_bytes()).unwrap();
        let mut buffer = vec![];
        write_stat_sheet(&mut buffer, &sheet).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(json["cardioEndurance"]["xpToNext"], 133.0);
        assert_eq!(json["coreStrength"]["current"], serde_json::Value::Null);
        assert_eq!(read_stat_sheet(buffer.as_slice()).unwrap(), sheet);
    }

    #[rstest]
    #[case(-3, 0)]
    #[case(0, 0)]
    #[case(12, 12)]
    #[case(i64::MAX, u32::MAX)]
    fn test_reps(#[case] value: i64, #[case] expected: u32) {
        assert_eq!(reps(value), expected);
    }
}
