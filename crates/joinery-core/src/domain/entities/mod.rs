pub mod class_path;
pub mod common;
pub mod render_model;
pub mod template;

pub use crate::domain::DomainError;
pub use class_path::ClassPath;
pub use render_model::{RenderModel, SolutionSettings, Subject};
pub use template::{Entity, EntityProperty, ProjectTemplate};
