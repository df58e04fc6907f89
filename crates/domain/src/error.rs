#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EngineError {
    #[error("configuration unavailable: {0}")]
    ConfigUnavailable(String),
    #[error("unknown exercise: {0}")]
    UnknownExercise(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("unknown weight category \"{0}\"")]
    UnknownCategory(String),
    #[error("weight for {category}/{key}/{stat} must be finite ({weight})")]
    InvalidWeight {
        category: String,
        key: String,
        stat: String,
        weight: f64,
    },
    #[error("duplicate exercise \"{0}\"")]
    DuplicateExercise(String),
    #[error("invalid scoring constant {name} ({value})")]
    InvalidConstant { name: &'static str, value: f64 },
}
