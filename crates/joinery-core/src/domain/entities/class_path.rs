use std::fmt;
use std::path::PathBuf;

use super::common::RelativePath;
use crate::domain::artifacts::artifact_def;
use crate::domain::value_objects::ArtifactKind;

/// Resolved location of one generated artifact.
///
/// A pure function of `(kind, subject, project_base_name)`; resolving the
/// same inputs twice yields equal values. Never touches the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassPath {
    namespace: String,
    directory: RelativePath,
    filename: String,
}

impl ClassPath {
    /// Resolve where `kind` for `subject` lives inside the solution
    /// `project_base_name`.
    ///
    /// `subject` is the entity name for per-entity kinds, the context name
    /// for `DbContext`, the producer/consumer name, or the environment name
    /// for `AppSettings`. Kinds with a fixed filename ignore it.
    pub fn resolve(kind: ArtifactKind, subject: &str, project_base_name: &str) -> Self {
        let def = artifact_def(kind);

        let mut below_area: Vec<String> = Vec::new();
        if let Some(project) = def.project {
            below_area.push(project.directory_name(project_base_name));
        }
        below_area.extend(def.segments.iter().map(|s| s.to_string()));
        if def.subject_dir {
            below_area.push(subject.to_string());
        }

        let namespace = if below_area.is_empty() {
            project_base_name.to_string()
        } else {
            below_area.join(".")
        };

        let directory = match def.area().dir_name() {
            Some(area) => RelativePath::from_segments(
                std::iter::once(area.to_string()).chain(below_area),
            ),
            None => RelativePath::from_segments(below_area),
        };

        Self {
            namespace,
            directory,
            filename: def.filename(subject, project_base_name),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Directory relative to the solution root.
    pub fn directory(&self) -> &RelativePath {
        &self.directory
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Class name: the filename without its extension.
    pub fn class_name(&self) -> &str {
        self.filename
            .rsplit_once('.')
            .map_or(self.filename.as_str(), |(stem, _)| stem)
    }

    /// Full path relative to the solution root.
    pub fn relative_path(&self) -> PathBuf {
        self.directory.as_path().join(&self.filename)
    }
}

impl fmt::Display for ClassPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.directory.as_path().as_os_str().is_empty() {
            f.write_str(&self.filename)
        } else {
            write!(f, "{}/{}", self.directory, self.filename)
        }
    }
}
