use std::path::PathBuf;

use thiserror::Error;

/// Errors loading the tasks file. All of these are fatal: the run aborts
/// before any tracker call is made.
#[derive(Debug, Error)]
pub enum TaskDocError {
    #[error("tasks file not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in tasks file: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("invalid tasks structure: 'master' or 'tasks' key not found")]
    MissingContainer,

    #[error("invalid tasks structure: {0}")]
    InvalidShape(#[source] serde_json::Error),
}
