//! Environment errors raised while building the docs tree.
//!
//! Each one is local to a destination page except `MissingSourceTree`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("source tree not found: {}", path.display())]
    MissingSourceTree { path: PathBuf },

    #[error("can't find header {}", path.display())]
    MissingHeader { path: PathBuf },

    #[error("destination directory missing: {}", path.display())]
    MissingDestinationDir { path: PathBuf },

    #[error("failed to {action} '{}': {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl BuildError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuildError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
