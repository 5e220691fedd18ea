use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced by discovery and assembly.
///
/// All of these abort the current target immediately; the caller decides
/// whether the whole build dies with it. Nothing here is retryable.
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Directory not found: {0}")]
    NotFound(PathBuf),

    #[error("Directory not readable: {path}")]
    Permission {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid suffix pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("Filesystem error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScoutError>;

/// Map an `io::Error` from a directory read onto the error taxonomy.
pub fn classify_io(path: &Path, source: io::Error) -> ScoutError {
    match source.kind() {
        io::ErrorKind::NotFound => ScoutError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => ScoutError::Permission {
            path: path.to_path_buf(),
            source,
        },
        _ => ScoutError::Io {
            path: path.to_path_buf(),
            source,
        },
    }
}
