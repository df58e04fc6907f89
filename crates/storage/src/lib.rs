#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use gainquest_domain as domain;

pub mod directory;
pub mod json;

pub use directory::{Directory, Document};
pub use json::{
    read_catalog, read_history, read_stat_sheet, read_weights, write_history, write_stat_sheet,
};

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid document: {0}")]
    Conversion(String),
    #[error(transparent)]
    Config(#[from] domain::ConfigError),
    #[error(transparent)]
    Engine(#[from] domain::EngineError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
