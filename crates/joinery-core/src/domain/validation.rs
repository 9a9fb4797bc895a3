use std::collections::HashSet;

use crate::domain::{
    entities::{
        common::{is_identifier, is_solution_name},
        template::{Entity, EntityProperty, ProjectTemplate},
    },
    error::DomainError,
};

/// Which command the template is being validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// `new`: the template describes a whole solution.
    FullScaffold,
    /// `add entities`: only the entity list matters; solution settings come
    /// from the existing solution.
    AddEntities,
}

/// Every problem found in one template, in discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    issues: Vec<DomainError>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[DomainError] {
        &self.issues
    }

    fn push(&mut self, issue: DomainError) {
        self.issues.push(issue);
    }

    /// One issue converts to itself; several to [`DomainError::Multiple`].
    pub fn into_result(mut self) -> Result<(), DomainError> {
        match self.issues.len() {
            0 => Ok(()),
            1 => Err(self.issues.remove(0)),
            _ => Err(DomainError::Multiple(self.issues)),
        }
    }
}

/// Structural checks on a [`ProjectTemplate`], run before any file I/O.
pub struct SchemaValidator;

impl SchemaValidator {
    pub fn validate(template: &ProjectTemplate, mode: ValidationMode) -> Result<(), DomainError> {
        Self::check(template, mode).into_result()
    }

    /// Collect every issue instead of stopping at the first.
    pub fn check(template: &ProjectTemplate, mode: ValidationMode) -> ValidationReport {
        let mut report = ValidationReport::default();

        match mode {
            ValidationMode::FullScaffold => Self::check_solution(template, &mut report),
            ValidationMode::AddEntities => {
                if template.entities.is_empty() {
                    report.push(DomainError::MissingRequiredField { field: "Entities" });
                }
            }
        }

        let mut seen = HashSet::new();
        for entity in &template.entities {
            if !seen.insert(entity.name.as_str()) {
                report.push(DomainError::NameConflict {
                    name: entity.name.clone(),
                    reason: "entity is declared more than once".into(),
                });
            }
            Self::check_entity(entity, &mut report);
        }

        if !template.solution_name.is_empty() {
            Self::check_solution_conflicts(template, &template.solution_name, &mut report);
        }

        for producer in &template.producers {
            Self::check_identifier("producer", &producer.producer_name, &mut report);
        }
        for consumer in &template.consumers {
            Self::check_identifier("consumer", &consumer.consumer_name, &mut report);
        }
        for env in &template.environments {
            Self::check_identifier("environment", &env.environment_name, &mut report);
        }
        for policy in template.policies() {
            if policy.name.trim().is_empty() {
                report.push(DomainError::MissingRequiredField { field: "Policy.Name" });
            }
        }

        report
    }

    /// Re-run the solution-name conflict check once the name of an existing
    /// solution is known.
    pub fn validate_against_solution(
        template: &ProjectTemplate,
        solution_name: &str,
    ) -> Result<(), DomainError> {
        let mut report = ValidationReport::default();
        Self::check_solution_conflicts(template, solution_name, &mut report);
        report.into_result()
    }

    /// Checks for a single property added to the existing entity `entity_name`.
    pub fn validate_property(
        entity_name: &str,
        property: &EntityProperty,
    ) -> Result<(), DomainError> {
        let mut report = ValidationReport::default();
        Self::check_identifier("entity", entity_name, &mut report);
        Self::check_property(property, &mut report);
        if property.is_primary_key {
            report.push(DomainError::NameConflict {
                name: property.name.clone(),
                reason: "the entity already has a primary key".into(),
            });
        }
        report.into_result()
    }

    // ── Internals ────────────────────────────────────────────────────────────

    fn check_solution(template: &ProjectTemplate, report: &mut ValidationReport) {
        let name = template.solution_name.trim();
        if name.is_empty() {
            report.push(DomainError::InvalidSolutionName {
                name: template.solution_name.clone(),
                reason: "must not be empty".into(),
            });
        } else if !is_solution_name(name) {
            report.push(DomainError::InvalidSolutionName {
                name: template.solution_name.clone(),
                reason: "use letters, digits, '.', '_' or '-', starting with a letter".into(),
            });
        }

        match &template.db_context {
            None => report.push(DomainError::MissingRequiredField { field: "DbContext" }),
            Some(ctx) => {
                if let Err(e) = ctx.provider() {
                    report.push(e);
                }
                let context_name = ctx.context_name.trim();
                if !context_name.is_empty() && !is_identifier(context_name) {
                    report.push(DomainError::InvalidIdentifier {
                        what: "DbContext",
                        value: ctx.context_name.clone(),
                    });
                }
            }
        }
    }

    fn check_solution_conflicts(
        template: &ProjectTemplate,
        solution_name: &str,
        report: &mut ValidationReport,
    ) {
        for entity in template.entities.iter().filter(|e| e.name == solution_name) {
            report.push(DomainError::NameConflict {
                name: entity.name.clone(),
                reason: "entity name matches the solution name".into(),
            });
        }
    }

    fn check_entity(entity: &Entity, report: &mut ValidationReport) {
        Self::check_identifier("entity", &entity.name, report);
        if let Some(plural) = entity.plural.as_deref().map(str::trim) {
            if !plural.is_empty() {
                Self::check_identifier("plural", plural, report);
            }
        }

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for property in &entity.properties {
            Self::check_property(property, report);
            if !seen.insert(property.name.as_str()) && reported.insert(property.name.as_str()) {
                report.push(DomainError::DuplicateProperty {
                    entity: entity.name.clone(),
                    property: property.name.clone(),
                });
            }
        }

        let keys = entity.primary_keys().count();
        if keys != 1 {
            report.push(DomainError::MissingPrimaryKey {
                entity: entity.name.clone(),
                found: keys,
            });
        }
    }

    fn check_property(property: &EntityProperty, report: &mut ValidationReport) {
        if !is_identifier(&property.name) {
            report.push(DomainError::InvalidIdentifier {
                what: "property",
                value: property.name.clone(),
            });
        }
        if let Err(e) = property.property_type() {
            report.push(e);
        }
        if let Some(foreign) = property.foreign_entity_name.as_deref() {
            Self::check_identifier("foreign key", foreign, report);
        }
    }

    fn check_identifier(what: &'static str, value: &str, report: &mut ValidationReport) {
        if !is_identifier(value) {
            report.push(DomainError::InvalidIdentifier {
                what,
                value: value.to_string(),
            });
        }
    }
}
