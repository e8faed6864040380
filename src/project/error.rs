//! Error types for workspace loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort loading a repository.
///
/// Per-file problems (a missing tree, a malformed dependency manifest) are
/// logged and skipped instead; only problems with the root itself or its
/// project configuration surface here.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// The repository root does not exist.
    #[error("Directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The repository root exists but is not a directory.
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A configuration file exists but cannot be understood.
    #[error("Invalid configuration {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// A package manifest cannot be understood.
    #[error("Invalid manifest {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    /// IO error while reading the workspace.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WorkspaceError {
    /// Create a configuration error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a manifest error.
    pub fn manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for workspace operations.
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
