//! The model handed to the renderer port.
//!
//! Owned data only: the renderer receives a snapshot of the solution-level
//! settings plus the one subject (entity, property, policy, ...) the artifact
//! or fragment is about.

use super::template::{
    Consumer, Entity, EntityProperty, Environment, Policy, Producer, ProjectTemplate,
    SwaggerConfig,
};
use crate::domain::value_objects::DbProvider;

/// Solution-wide settings every artifact may need.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionSettings {
    pub solution_name: String,
    pub db_context_name: String,
    pub database_name: String,
    /// Unknown for incremental commands, which never rebuild provider wiring.
    pub provider: Option<DbProvider>,
    pub port: u16,
    pub policies: Vec<Policy>,
    pub swagger: SwaggerConfig,
    pub add_jwt_authentication: bool,
}

impl SolutionSettings {
    /// Settings for a full scaffold of a validated template.
    pub fn from_template(template: &ProjectTemplate) -> Self {
        let db = template.db_context.as_ref();
        Self {
            solution_name: template.solution_name.clone(),
            db_context_name: template.db_context_name(),
            database_name: db
                .map(|c| c.database_name.clone())
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| template.solution_name.clone()),
            provider: db.and_then(|c| c.provider().ok()),
            port: template.port(),
            policies: template.policies().to_vec(),
            swagger: template.swagger_config.clone(),
            add_jwt_authentication: template.add_jwt_authentication,
        }
    }

    /// Settings for an incremental command against an existing solution.
    ///
    /// Only names discovered on disk and the template's policies are known.
    pub fn existing(
        template: &ProjectTemplate,
        solution_name: impl Into<String>,
        db_context_name: impl Into<String>,
    ) -> Self {
        let solution_name = solution_name.into();
        Self {
            database_name: solution_name.clone(),
            solution_name,
            db_context_name: db_context_name.into(),
            provider: None,
            port: template.port(),
            policies: template.policies().to_vec(),
            swagger: template.swagger_config.clone(),
            add_jwt_authentication: template.add_jwt_authentication,
        }
    }
}

/// What a single artifact or fragment is about.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Subject {
    /// Solution-level artifact.
    #[default]
    Solution,
    Entity(Entity),
    /// Every entity of the run (API route tables).
    Entities(Vec<Entity>),
    Property {
        entity: String,
        property: EntityProperty,
    },
    Policy(Policy),
    Environment(Environment),
    Producer(Producer),
    Consumer(Consumer),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderModel {
    pub solution: SolutionSettings,
    pub subject: Subject,
}

impl RenderModel {
    pub fn new(solution: SolutionSettings, subject: Subject) -> Self {
        Self { solution, subject }
    }

    pub fn entity(&self) -> Option<&Entity> {
        match &self.subject {
            Subject::Entity(e) => Some(e),
            _ => None,
        }
    }

    pub fn property(&self) -> Option<(&str, &EntityProperty)> {
        match &self.subject {
            Subject::Property { entity, property } => Some((entity, property)),
            _ => None,
        }
    }
}
