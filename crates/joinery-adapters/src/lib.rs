//! Infrastructure adapters for Joinery.
//!
//! This crate implements the ports defined in `joinery_core::application::ports`
//! and loads template files. It contains all external dependencies and I/O
//! operations.

pub mod filesystem;
pub mod renderer;
pub mod template_loader;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::CSharpRenderer;
pub use template_loader::{TemplateFormat, TemplateLoader};
