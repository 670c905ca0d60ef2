//! Error types for the YAML backend.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML error in {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Config not found: {0}")]
    NotFound(String),
}

pub type YamlResult<T> = Result<T, YamlError>;
