// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Joinery.
//!
//! Pure generation rules: the template model, schema validation, artifact
//! placement and anchor splicing. All I/O and rendering go through ports
//! defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: Only the application layer emits `tracing` events
//! - **Immutable entities**: The template is read-only once validated
//!
// Public API - what the world sees
pub mod anchors;
pub mod artifacts;
pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use anchors::{Anchor, AnchorFault, Fragment, SectionIndex, Splice};
pub use artifacts::{ARTIFACT_REGISTRY, ArtifactDef, Project, SolutionArea, artifact_def};
pub use entities::{
    class_path::ClassPath,
    common::RelativePath,
    render_model::{RenderModel, SolutionSettings, Subject},
    template::{
        AuthorizationSettings, BusConfig, Consumer, DEFAULT_PORT, DbContextConfig, Entity,
        EntityProperty, Environment, Policy, Producer, ProjectTemplate, SwaggerConfig,
    },
};
pub use error::{DomainError, ErrorCategory};
pub use validation::{SchemaValidator, ValidationMode, ValidationReport};
pub use value_objects::{
    ArtifactKind, DbProvider, Endpoint, PolicyType, Primitive, PropertyType,
};
