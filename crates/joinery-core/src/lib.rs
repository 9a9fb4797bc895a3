//! Joinery Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers of the Joinery
//! scaffolding generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           joinery-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ScaffoldService, Builder, Modifier)    │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Driven: Filesystem, Renderer)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    joinery-adapters (Infrastructure)    │
//! │ (LocalFilesystem, CSharpRenderer, etc)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ProjectTemplate, ClassPath, Anchors)   │
//! │         No I/O, No Logging              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use joinery_core::prelude::*;
//!
//! let service = ScaffoldService::new(Box::new(filesystem), Box::new(renderer));
//! let mut ctx = RunContext::new();
//! let root = service.scaffold_solution(&template, Path::new("./out"), &mut ctx)?;
//! let report = ctx.into_report();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, RunContext, RunReport, ScaffoldService,
        ports::{ArtifactRenderer, Filesystem},
    };
    pub use crate::domain::{
        ArtifactKind, ClassPath, DbContextConfig, DomainError, Entity, EntityProperty, Fragment,
        ProjectTemplate, RenderModel, SchemaValidator, Subject, ValidationMode,
    };
    pub use crate::error::{JoineryError, JoineryResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
