//! Application layer for Joinery.
//!
//! This layer contains:
//! - **Services**: The orchestrator plus the builder and modifier sets
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer sequences the domain rules and performs I/O through
//! ports. Naming, placement and validation rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    ArtifactBuilder, CreatedFiles, FileModifier, RunContext, RunReport, ScaffoldService,
    SkippedFragment, Stage,
};

pub use ports::{ArtifactRenderer, Filesystem};

pub use error::ApplicationError;
