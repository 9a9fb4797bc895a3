//! Artifact placement registry.
//!
//! Each [`ArtifactKind`] is described exactly once by its [`ArtifactDef`]:
//! which project it lives in, the directory segments below that project,
//! whether the subject (entity, producer, environment, ...) becomes a
//! sub-directory, and how the filename is assembled. [`ClassPath::resolve`]
//! is a table lookup over [`ARTIFACT_REGISTRY`].
//!
//! # Adding a New Artifact Kind
//!
//! 1. Add a variant to `ArtifactKind` in `value_objects.rs`
//! 2. Add one [`ArtifactDef`] entry to [`ARTIFACT_REGISTRY`]
//! 3. Teach the renderer adapter how to render it
//!
//! [`ClassPath::resolve`]: crate::domain::ClassPath::resolve

use crate::domain::value_objects::ArtifactKind;

// ── Project layout ───────────────────────────────────────────────────────────

/// Top-level folder of the solution an artifact belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionArea {
    /// The solution root itself (only the solution marker lives here).
    Root,
    Src,
    Tests,
}

impl SolutionArea {
    pub const fn dir_name(&self) -> Option<&'static str> {
        match self {
            Self::Root => None,
            Self::Src => Some("src"),
            Self::Tests => Some("tests"),
        }
    }
}

/// Generated project an artifact belongs to, as a suffix of the base name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Project {
    Core,
    Infrastructure,
    WebApi,
    Tests,
}

impl Project {
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Core => ".Core",
            Self::Infrastructure => ".Infrastructure",
            Self::WebApi => ".WebApi",
            Self::Tests => ".Tests",
        }
    }

    pub const fn area(&self) -> SolutionArea {
        match self {
            Self::Tests => SolutionArea::Tests,
            _ => SolutionArea::Src,
        }
    }

    /// `Shop` + `Core` → `Shop.Core`.
    pub fn directory_name(&self, project_base_name: &str) -> String {
        format!("{project_base_name}{}", self.suffix())
    }
}

/// What the stem of the filename is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStem {
    /// The subject passed to the resolver (entity, producer, context name, ...).
    Subject,
    /// The project base name (solution name).
    ProjectBase,
    /// A fixed class name.
    Fixed(&'static str),
}

// ── Artifact definitions ─────────────────────────────────────────────────────

/// Everything the resolver needs to know about one artifact kind.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactDef {
    pub kind: ArtifactKind,

    /// `None` places the file directly in the solution root.
    pub project: Option<Project>,

    /// Directory segments below the project directory.
    pub segments: &'static [&'static str],

    /// Whether the subject becomes the last directory segment.
    pub subject_dir: bool,

    pub file_prefix: &'static str,
    pub file_stem: FileStem,
    pub file_suffix: &'static str,
    pub extension: &'static str,
}

impl ArtifactDef {
    /// Filename for the given subject and base name.
    pub fn filename(&self, subject: &str, project_base_name: &str) -> String {
        let stem = match self.file_stem {
            FileStem::Subject => subject,
            FileStem::ProjectBase => project_base_name,
            FileStem::Fixed(name) => name,
        };
        format!(
            "{}{}{}.{}",
            self.file_prefix, stem, self.file_suffix, self.extension
        )
    }

    pub fn area(&self) -> SolutionArea {
        self.project.map_or(SolutionArea::Root, |p| p.area())
    }
}

const fn def(
    kind: ArtifactKind,
    project: Project,
    segments: &'static [&'static str],
    subject_dir: bool,
    file_prefix: &'static str,
    file_stem: FileStem,
    file_suffix: &'static str,
) -> ArtifactDef {
    ArtifactDef {
        kind,
        project: Some(project),
        segments,
        subject_dir,
        file_prefix,
        file_stem,
        file_suffix,
        extension: "cs",
    }
}

/// Single source of truth for where every artifact lands.
pub static ARTIFACT_REGISTRY: &[ArtifactDef] = &[
    ArtifactDef {
        kind: ArtifactKind::SolutionFile,
        project: None,
        segments: &[],
        subject_dir: false,
        file_prefix: "",
        file_stem: FileStem::ProjectBase,
        file_suffix: "",
        extension: "sln",
    },
    // Per-entity
    def(ArtifactKind::Entity, Project::Core, &["Entities"], false, "", FileStem::Subject, ""),
    def(ArtifactKind::DtoRead, Project::Core, &["Dtos"], true, "", FileStem::Subject, "Dto"),
    def(ArtifactKind::DtoCreate, Project::Core, &["Dtos"], true, "", FileStem::Subject, "ForCreationDto"),
    def(ArtifactKind::DtoUpdate, Project::Core, &["Dtos"], true, "", FileStem::Subject, "ForUpdateDto"),
    def(ArtifactKind::DtoReadParameters, Project::Core, &["Dtos"], true, "", FileStem::Subject, "ParametersDto"),
    def(ArtifactKind::Validator, Project::Core, &["Validation"], true, "", FileStem::Subject, "Validator"),
    def(ArtifactKind::Profile, Project::Core, &["Mappings"], false, "", FileStem::Subject, "Profile"),
    def(ArtifactKind::Controller, Project::WebApi, &["Controllers", "v1"], false, "", FileStem::Subject, "Controller"),
    def(ArtifactKind::Fake, Project::Tests, &["Fakes"], true, "Fake", FileStem::Subject, ""),
    // Shared anchored files
    def(ArtifactKind::ServiceRegistration, Project::Infrastructure, &[], false, "", FileStem::Fixed("ServiceRegistration"), ""),
    def(ArtifactKind::Seeder, Project::Infrastructure, &["Seeders"], false, "", FileStem::Fixed("DbSeeder"), ""),
    def(ArtifactKind::DbContext, Project::Infrastructure, &["Contexts"], false, "", FileStem::Subject, ""),
    // Test utilities
    def(ArtifactKind::TestFixture, Project::Tests, &["Utilities"], false, "", FileStem::Fixed("TestFixture"), ""),
    def(ArtifactKind::TestBase, Project::Tests, &["Utilities"], false, "", FileStem::Fixed("TestBase"), ""),
    def(ArtifactKind::ApiRoutes, Project::Tests, &["Utilities"], false, "", FileStem::Fixed("ApiRoutes"), ""),
    def(ArtifactKind::HealthCheckTest, Project::Tests, &["FunctionalTests", "HealthChecks"], false, "", FileStem::Fixed("HealthCheckTests"), ""),
    // Web API extensions and messaging
    def(ArtifactKind::SwaggerRegistration, Project::WebApi, &["Extensions"], false, "", FileStem::Fixed("SwaggerServiceExtension"), ""),
    def(ArtifactKind::BusRegistration, Project::WebApi, &["Extensions"], false, "", FileStem::Fixed("BusServiceExtension"), ""),
    def(ArtifactKind::Producer, Project::WebApi, &["Producers"], false, "", FileStem::Subject, ""),
    def(ArtifactKind::Consumer, Project::WebApi, &["Consumers"], false, "", FileStem::Subject, ""),
    ArtifactDef {
        kind: ArtifactKind::AppSettings,
        project: Some(Project::WebApi),
        segments: &[],
        subject_dir: false,
        file_prefix: "appsettings.",
        file_stem: FileStem::Subject,
        file_suffix: "",
        extension: "json",
    },
];

/// Look up the definition for `kind`.
///
/// Every variant has an entry; the registry test enforces it.
pub fn artifact_def(kind: ArtifactKind) -> &'static ArtifactDef {
    ARTIFACT_REGISTRY
        .iter()
        .find(|d| d.kind == kind)
        .unwrap_or_else(|| unreachable!("artifact kind {kind} missing from ARTIFACT_REGISTRY"))
}
