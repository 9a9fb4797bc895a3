//! Application layer errors.
//!
//! These errors represent failures while touching files or resolving an
//! existing solution. Schema problems are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::Anchor;
use crate::error::ErrorCategory;

/// Errors that occur during generation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A builder's target file is already on disk.
    #[error("{path} already exists")]
    AlreadyExists { path: PathBuf },

    /// A modifier could not find its anchor line.
    #[error("anchor '{}' not found in {path}", anchor.marker())]
    AnchorNotFound { path: PathBuf, anchor: Anchor },

    /// A modifier found its anchor line more than once.
    #[error("anchor '{}' appears {count} times in {path}", anchor.marker())]
    AmbiguousAnchor {
        path: PathBuf,
        anchor: Anchor,
        count: usize,
    },

    /// No `*.sln` (or more than one) in the directory of an incremental command.
    #[error("no solution found in {path}: {reason}")]
    SolutionNotFound { path: PathBuf, reason: String },

    /// `src/` and `tests/` are not both present.
    #[error("{path} is not a bounded-context directory")]
    NotABoundedContextDirectory { path: PathBuf },

    /// No DbContext class in the contexts directory.
    #[error("no DbContext found in {path}")]
    ContextNotFound { path: PathBuf },

    /// An entity file targeted by `add prop` is missing.
    #[error("entity '{entity}' not found at {path}")]
    EntityNotFound { entity: String, path: PathBuf },

    /// Rendering an artifact or fragment failed.
    #[error("rendering {what} failed: {reason}")]
    RenderingFailed { what: String, reason: String },

    /// Filesystem operation failed.
    #[error("filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Wrap an I/O failure at `path`.
    pub fn io(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::FilesystemError {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AlreadyExists { path } => vec![
                format!("Refusing to overwrite {}", path.display()),
                "Generate into an empty directory, or remove the file first".into(),
            ],
            Self::AnchorNotFound { anchor, .. } => vec![
                format!("Restore the line `{}` in the file", anchor.marker()),
                "Anchor comments mark where new code is inserted".into(),
            ],
            Self::AmbiguousAnchor { anchor, .. } => vec![format!(
                "Keep a single `{}` line in the file",
                anchor.marker()
            )],
            Self::SolutionNotFound { .. } => vec![
                "Run the command from the solution root (the folder with the .sln)".into(),
                "Or pass --solution <DIR>".into(),
            ],
            Self::NotABoundedContextDirectory { .. } => vec![
                "The directory must contain both src/ and tests/".into(),
                "Run the command from the root of a generated solution".into(),
            ],
            Self::ContextNotFound { .. } => {
                vec!["Check that src/<Solution>.Infrastructure/Contexts contains the DbContext".into()]
            }
            Self::EntityNotFound { entity, .. } => vec![
                format!("Add '{entity}' first with `joinery add entities`"),
                "Entity names are case-sensitive".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::RenderingFailed { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AlreadyExists { .. } => ErrorCategory::Conflict,
            Self::AnchorNotFound { .. } | Self::AmbiguousAnchor { .. } => ErrorCategory::Conflict,
            Self::SolutionNotFound { .. }
            | Self::NotABoundedContextDirectory { .. }
            | Self::ContextNotFound { .. }
            | Self::EntityNotFound { .. } => ErrorCategory::NotFound,
            Self::RenderingFailed { .. } | Self::FilesystemError { .. } => ErrorCategory::Internal,
        }
    }
}
