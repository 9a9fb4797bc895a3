//! Application services - orchestrate use cases.
//!
//! `ScaffoldService` sequences the stages; `ArtifactBuilder` and
//! `FileModifier` perform the individual file operations; `RunContext`
//! accumulates what happened.

pub mod builder;
pub mod modifier;
pub mod run;
pub mod scaffold_service;

#[cfg(test)]
pub(crate) mod testing;

pub use builder::ArtifactBuilder;
pub use modifier::FileModifier;
pub use run::{CompletedStage, CreatedFiles, RunContext, RunReport, SkippedFragment, Stage};
pub use scaffold_service::{ScaffoldService, SolutionContext};
