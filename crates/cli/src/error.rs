use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures at the CLI boundary. The core transformation itself never
/// fails; everything here is file transport or malformed graph JSON.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid graph JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn read(path: &Path, source: std::io::Error) -> Self {
        CliError::Read {
            path: path.to_owned(),
            source,
        }
    }

    pub fn write(path: &Path, source: std::io::Error) -> Self {
        CliError::Write {
            path: path.to_owned(),
            source,
        }
    }
}
