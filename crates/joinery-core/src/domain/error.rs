// ============================================================================
// domain/error.rs - SCHEMA ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Every variant is raised before any file is touched:
/// - Cloneable (collected into a [`ValidationReport`](crate::domain::ValidationReport))
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Schema shape
    // ========================================================================
    #[error("entity '{entity}' must have exactly one primary key property, found {found}")]
    MissingPrimaryKey { entity: String, found: usize },

    #[error("entity '{entity}' declares property '{property}' more than once")]
    DuplicateProperty { entity: String, property: String },

    #[error("'{value}' is not a valid {what} name")]
    InvalidIdentifier { what: &'static str, value: String },

    #[error("property '{property}' has unsupported type '{type_name}'")]
    InvalidPropertyType { property: String, type_name: String },

    #[error("name conflict on '{name}': {reason}")]
    NameConflict { name: String, reason: String },

    // ========================================================================
    // Solution-level settings
    // ========================================================================
    #[error("invalid solution name '{name}': {reason}")]
    InvalidSolutionName { name: String, reason: String },

    #[error("'{provider}' is not a supported database provider")]
    InvalidDbProvider { provider: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Input format
    // ========================================================================
    #[error("invalid template file '{file}': {reason}")]
    InvalidFileType { file: String, reason: String },

    // ========================================================================
    // Aggregate
    // ========================================================================
    #[error("{} schema problems: {}", .0.len(), join_messages(.0))]
    Multiple(Vec<DomainError>),
}

fn join_messages(errors: &[DomainError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingPrimaryKey { entity, found } => vec![
                format!("Entity '{entity}' has {found} primary key(s)"),
                "Mark exactly one property with `IsPrimaryKey: true`".into(),
            ],
            Self::DuplicateProperty { entity, property } => vec![
                format!("Rename or remove the second '{property}' on '{entity}'"),
            ],
            Self::NameConflict { name, .. } => vec![
                format!("'{name}' is used twice or collides with the solution name"),
                "Entity names must be unique and differ from SolutionName".into(),
            ],
            Self::InvalidDbProvider { .. } => vec![
                "Supported providers:".into(),
                "  • SqlServer".into(),
                "  • Postgres".into(),
                "  • MySql".into(),
                "  • Sqlite".into(),
            ],
            Self::InvalidFileType { .. } => vec![
                "Templates must be YAML (.yaml, .yml) or JSON (.json)".into(),
                "Check that the file parses and uses PascalCase keys".into(),
            ],
            Self::InvalidSolutionName { .. } => vec![
                "Use letters, digits, '.', '_' or '-', starting with a letter".into(),
                "Example: SolutionName: Shop.Api".into(),
            ],
            Self::InvalidPropertyType { .. } => vec![
                "Use a primitive (int, string, DateTime, ...), append '?' for nullable".into(),
                "Or name another entity for a foreign-key reference".into(),
            ],
            Self::Multiple(errors) => errors.iter().flat_map(Self::suggestions).collect(),
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidFileType { .. } => ErrorCategory::Input,
            Self::NameConflict { .. } => ErrorCategory::Conflict,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    Input,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiple_lists_every_message() {
        let err = DomainError::Multiple(vec![
            DomainError::MissingRequiredField { field: "Entities" },
            DomainError::InvalidDbProvider {
                provider: "Oracle".into(),
            },
        ]);
        let text = err.to_string();
        assert!(text.starts_with("2 schema problems"));
        assert!(text.contains("Entities"));
        assert!(text.contains("Oracle"));
    }

    #[test]
    fn provider_suggestions_name_the_supported_set() {
        let err = DomainError::InvalidDbProvider {
            provider: "Oracle".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("Postgres")));
    }

    #[test]
    fn name_conflict_is_conflict_category() {
        let err = DomainError::NameConflict {
            name: "Shop".into(),
            reason: "matches the solution name".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Conflict);
    }
}
