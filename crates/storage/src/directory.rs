use std::{
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::anyhow;
use gainquest_domain::{ExerciseCatalog, ScoringConfig, ScoringService, StatWeights};
use log::debug;
use strum::AsRefStr;

use crate::{StorageError, json};

/// Configuration documents of a data directory.
#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    #[strum(serialize = "exercises.json")]
    Exercises,
    #[strum(serialize = "stat_weights.json")]
    StatWeights,
}

/// A data directory holding the exercise catalog and the stat weight table.
#[derive(Debug, Clone)]
pub struct Directory {
    path: PathBuf,
    catalog: ExerciseCatalog,
    weights: StatWeights,
}

impl Directory {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if !fs::metadata(&path)?.is_dir() {
            return Err(anyhow!("{} is not a directory", path.display()).into());
        }

        let catalog = json::read_catalog(open(&path, Document::Exercises)?)?;
        let weights = json::read_weights(open(&path, Document::StatWeights)?)?;
        debug!(
            "loaded {} exercises from {}",
            catalog.len(),
            path.display()
        );

        Ok(Self {
            path,
            catalog,
            weights,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn catalog(&self) -> &ExerciseCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn weights(&self) -> &StatWeights {
        &self.weights
    }

    pub fn scoring_service(
        self,
        config: ScoringConfig,
    ) -> Result<ScoringService<ExerciseCatalog>, StorageError> {
        Ok(ScoringService::new(self.catalog, self.weights, config)?)
    }
}

fn open(path: &Path, document: Document) -> Result<BufReader<File>, StorageError> {
    let file = File::open(path.join(document.as_ref())).map_err(|err| {
        anyhow!(err).context(format!(
            "failed to open {} in {}",
            document.as_ref(),
            path.display()
        ))
    })?;
    Ok(BufReader::new(file))
}
