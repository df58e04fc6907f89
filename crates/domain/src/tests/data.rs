use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    CatalogExercise, Difficulty, DoseType, ExerciseCatalog, LoggedExercise, LoggedSet, Mechanic,
    Modality, Name, RawStatWeights, StatWeights,
};

pub static WEIGHTS: std::sync::LazyLock<StatWeights> =
    std::sync::LazyLock::new(|| StatWeights::new(raw_weights(WEIGHT_ENTRIES)).unwrap());

pub const WEIGHT_ENTRIES: &[(&str, &str, &str, f64)] = &[
    ("muscles", "chest", "upperBodyStrength", 1.0),
    ("muscles", "triceps", "upperBodyStrength", 0.8),
    ("muscles", "shoulders", "upperBodyStrength", 0.9),
    ("muscles", "lats", "upperBodyStrength", 0.9),
    ("muscles", "biceps", "upperBodyStrength", 0.6),
    ("muscles", "quadriceps", "lowerBodyStrength", 1.0),
    ("muscles", "glutes", "lowerBodyStrength", 0.8),
    ("muscles", "glutes", "powerExplosiveness", 0.3),
    ("muscles", "hamstrings", "lowerBodyStrength", 0.9),
    ("muscles", "abdominals", "coreStrength", 1.0),
    ("mechanic", "isolation", "upperBodyStrength", 0.1),
    ("modality", "power", "powerExplosiveness", 1.0),
    ("modality", "conditioning", "cardioEndurance", 1.0),
    ("modality", "mobility", "flexibilityMobility", 1.0),
    ("doseType", "contacts", "powerExplosiveness", 0.5),
    ("doseType", "time", "cardioEndurance", 0.5),
    ("movementPatterns", "horizontal push", "upperBodyStrength", 0.3),
    ("movementPatterns", "squat", "lowerBodyStrength", 0.3),
    ("movementPatterns", "anti-extension", "coreStrength", 0.5),
    ("equipment", "kettlebells", "powerExplosiveness", 0.2),
];

pub fn raw_weights(entries: &[(&str, &str, &str, f64)]) -> RawStatWeights {
    let mut raw = RawStatWeights::new();
    for (category, key, stat, weight) in entries {
        raw.entry((*category).to_string())
            .or_default()
            .entry((*key).to_string())
            .or_default()
            .insert((*stat).to_string(), *weight);
    }
    raw
}

pub static CATALOG: std::sync::LazyLock<ExerciseCatalog> =
    std::sync::LazyLock::new(|| ExerciseCatalog::new(exercises()).unwrap());

pub fn strength(id: &str, name: &str, primary: &[&str], secondary: &[&str]) -> CatalogExercise {
    CatalogExercise {
        id: id.into(),
        name: Name::new(name).unwrap(),
        modality: Modality::Strength,
        dose_type: Some(DoseType::Reps),
        equipment: vec!["barbell".to_string()],
        primary_muscles: primary.iter().map(ToString::to_string).collect(),
        secondary_muscles: secondary.iter().map(ToString::to_string).collect(),
        mechanic: Some(Mechanic::Compound),
        movement_patterns: vec![],
        difficulty: None,
    }
}

pub fn exercises() -> Vec<CatalogExercise> {
    vec![
        CatalogExercise {
            movement_patterns: vec!["horizontal push".to_string()],
            ..strength("bench_press", "Bench Press", &["chest"], &["triceps", "shoulders"])
        },
        strength(
            "incline_bench_press",
            "Incline Bench Press",
            &["chest", "shoulders"],
            &["triceps"],
        ),
        strength(
            "close_grip_bench_press",
            "Close Grip Bench Press",
            &["triceps"],
            &["chest"],
        ),
        CatalogExercise {
            equipment: vec!["dumbbell".to_string()],
            difficulty: Some(Difficulty::Intermediate),
            ..strength(
                "dumbbell_bench_press",
                "Dumbbell Bench Press",
                &["chest"],
                &["triceps"],
            )
        },
        strength("floor_press", "Floor Press", &["chest", "triceps"], &[]),
        strength("overhead_press", "Overhead Press", &["shoulders"], &["triceps"]),
        CatalogExercise {
            movement_patterns: vec!["squat".to_string()],
            ..strength("back_squat", "Back Squat", &["quadriceps"], &["glutes"])
        },
        CatalogExercise {
            difficulty: Some(Difficulty::Expert),
            ..strength("deadlift", "Deadlift", &["hamstrings", "glutes"], &[])
        },
        CatalogExercise {
            mechanic: Some(Mechanic::Isolation),
            equipment: vec!["dumbbell".to_string()],
            ..strength("bicep_curl", "Bicep Curl", &["biceps"], &[])
        },
        CatalogExercise {
            modality: Modality::Conditioning,
            dose_type: Some(DoseType::Time),
            equipment: vec!["bodyweight".to_string()],
            movement_patterns: vec!["anti-extension".to_string()],
            difficulty: Some(Difficulty::Intermediate),
            mechanic: None,
            ..strength("plank", "Plank", &["abdominals"], &[])
        },
        CatalogExercise {
            modality: Modality::Power,
            dose_type: Some(DoseType::Contacts),
            equipment: vec!["box".to_string()],
            ..strength("box_jump", "Box Jump", &["quadriceps", "glutes"], &["calves"])
        },
        CatalogExercise {
            modality: Modality::Power,
            equipment: vec!["kettlebell".to_string()],
            ..strength("kettlebell_swing", "Kettlebell Swing", &["glutes"], &["hamstrings"])
        },
        CatalogExercise {
            modality: Modality::Mobility,
            dose_type: Some(DoseType::Holds),
            equipment: vec![],
            mechanic: None,
            ..strength("hip_stretch", "Hip Flexor Stretch", &[], &[])
        },
        CatalogExercise {
            dose_type: None,
            ..strength("tire_flip", "Tire Flip", &["glutes"], &["chest"])
        },
    ]
}

pub fn date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap()
}

pub fn set(reps: u32, weight: f64) -> LoggedSet {
    LoggedSet {
        reps: Some(reps),
        weight: Some(weight),
        duration: None,
    }
}

pub fn timed(duration: f64) -> LoggedSet {
    LoggedSet {
        reps: None,
        weight: None,
        duration: Some(duration),
    }
}

pub fn logged(id: u128, exercise_id: &str, sets: Vec<LoggedSet>) -> LoggedExercise {
    let exercise = exercises()
        .into_iter()
        .find(|e| *e.id == exercise_id)
        .map(|e| (e.name.to_string(), Some(e.modality)))
        .unwrap_or_else(|| (exercise_id.to_string(), None));
    LoggedExercise {
        id: id.into(),
        date: date(),
        exercise_id: exercise_id.into(),
        exercise_type: exercise.0,
        modality: exercise.1,
        sets,
        duration: None,
        reps: None,
        weight: None,
    }
}

/// Five distinct upper body lifts of the bench press family.
pub fn bench_press_family() -> Vec<LoggedExercise> {
    vec![
        logged(1, "bench_press", vec![set(5, 100.0), set(5, 100.0)]),
        logged(2, "incline_bench_press", vec![set(8, 80.0)]),
        logged(3, "close_grip_bench_press", vec![set(6, 90.0)]),
        logged(4, "dumbbell_bench_press", vec![set(10, 35.0)]),
        logged(5, "floor_press", vec![set(5, 95.0)]),
    ]
}
