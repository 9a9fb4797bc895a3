//! Template file loader.
//!
//! Parses a YAML or JSON template file into a [`ProjectTemplate`]. The
//! format is chosen by extension (`.yaml`, `.yml`, `.json`). Keys use the
//! PascalCase names of the template model:
//!
//! ```yaml
//! SolutionName: Shop
//! DbContext:
//!   ContextName: ShopDbContext
//!   DatabaseName: Shop
//!   Provider: SqlServer
//! Entities:
//!   - Name: Product
//!     Properties:
//!       - Name: ProductId
//!         Type: int
//!         IsPrimaryKey: true
//!       - Name: Name
//!         Type: string
//!         CanFilter: true
//! ```
//!
//! Loading only parses; schema checks happen in the core validator.

use std::{fs, path::Path};

use joinery_core::domain::{DomainError, ProjectTemplate};
use tracing::{debug, instrument};

/// Serialization format of a template file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFormat {
    Yaml,
    Json,
}

impl TemplateFormat {
    /// Pick the format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Loads [`ProjectTemplate`]s from disk or from text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateLoader;

impl TemplateLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load the template at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidFileType`] if the extension is not a
    /// supported format, the file cannot be read, or it does not parse.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> Result<ProjectTemplate, DomainError> {
        let format = TemplateFormat::from_path(path).ok_or_else(|| DomainError::InvalidFileType {
            file: path.display().to_string(),
            reason: "expected a .yaml, .yml or .json file".into(),
        })?;

        let raw = fs::read_to_string(path).map_err(|e| DomainError::InvalidFileType {
            file: path.display().to_string(),
            reason: format!("failed to read: {e}"),
        })?;

        let template = self.parse(&raw, format).map_err(|e| match e {
            DomainError::InvalidFileType { reason, .. } => DomainError::InvalidFileType {
                file: path.display().to_string(),
                reason,
            },
            other => other,
        })?;

        debug!(
            solution = %template.solution_name,
            entities = template.entities.len(),
            "loaded template"
        );
        Ok(template)
    }

    /// Parse template text in the given format.
    pub fn parse(&self, raw: &str, format: TemplateFormat) -> Result<ProjectTemplate, DomainError> {
        let parsed = match format {
            TemplateFormat::Yaml => serde_yaml::from_str(raw).map_err(|e| e.to_string()),
            TemplateFormat::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
        };
        parsed.map_err(|reason| DomainError::InvalidFileType {
            file: "<input>".into(),
            reason: format!("failed to parse: {reason}"),
        })
    }
}
