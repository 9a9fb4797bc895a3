//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the generation engine needs from the outside.
//! The `joinery-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{ArtifactKind, ClassPath, Fragment, RenderModel};
use crate::error::JoineryResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `joinery_adapters::filesystem::LocalFilesystem` (production)
/// - `joinery_adapters::filesystem::MemoryFilesystem` (dry runs and tests)
///
/// Paths are passed as given; the engine always joins them onto the
/// solution root first.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories. Succeeds if it exists.
    fn create_dir_all(&self, path: &Path) -> JoineryResult<()>;

    /// Write a whole file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> JoineryResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> JoineryResult<String>;

    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Direct children of a directory, sorted by path.
    fn list_dir(&self, path: &Path) -> JoineryResult<Vec<PathBuf>>;
}

/// Port for artifact rendering.
///
/// Implementations must be pure: the same inputs always produce the same
/// text. Every anchored file must contain its anchor markers exactly once.
///
/// Implemented by:
/// - `joinery_adapters::renderer::CSharpRenderer`
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactRenderer: Send + Sync {
    /// Render the whole text of a new file.
    fn render(
        &self,
        kind: ArtifactKind,
        location: &ClassPath,
        model: &RenderModel,
    ) -> JoineryResult<String>;

    /// Render a fragment to splice above its anchor, without indentation.
    fn render_fragment(&self, fragment: Fragment, model: &RenderModel) -> JoineryResult<String>;
}
