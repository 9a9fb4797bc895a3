//! Run-scoped state: the created-file registry, modified files, skipped
//! fragments and completed stages of one command invocation.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::Fragment;

// ── Stages ────────────────────────────────────────────────────────────────────

/// One step of a generation run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    ValidateSchema,
    ResolveSolutionContext,
    CreateDirectoryScaffold,
    BuildDbContext,
    BuildEntity,
    BuildDtos,
    BuildValidators,
    BuildProfile,
    BuildController,
    ModifyServiceRegistration,
    BuildFakes,
    ModifySeeders,
    ModifyDbSet,
    BuildCrossCuttingArtifacts,
    ModifyEntity,
    ModifyDtos,
    EmitSummary,
}

impl Stage {
    /// Per-entity stages, in the order they run for each entity.
    pub const PER_ENTITY: [Stage; 7] = [
        Self::BuildEntity,
        Self::BuildDtos,
        Self::BuildValidators,
        Self::BuildProfile,
        Self::BuildController,
        Self::ModifyServiceRegistration,
        Self::BuildFakes,
    ];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedStage {
    pub stage: Stage,
    /// Entity the stage ran for, if it is a per-entity stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

// ── Created-file registry ─────────────────────────────────────────────────────

/// Append-only, ordered list of files written during one run, relative to
/// the solution root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CreatedFiles {
    paths: Vec<PathBuf>,
}

impl CreatedFiles {
    pub fn record(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }

    pub fn all(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// A fragment that was not inserted because the file already had it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFragment {
    pub path: PathBuf,
    pub fragment: Fragment,
}

// ── Run context ───────────────────────────────────────────────────────────────

/// Mutable state owned by the caller for the duration of one command.
///
/// Passed by `&mut` so whatever was written before a failure is still
/// visible to the caller afterwards.
#[derive(Debug, Default)]
pub struct RunContext {
    solution_root: Option<PathBuf>,
    created: CreatedFiles,
    modified: Vec<PathBuf>,
    skipped: Vec<SkippedFragment>,
    stages: Vec<CompletedStage>,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_solution_root(&mut self, root: impl Into<PathBuf>) {
        self.solution_root = Some(root.into());
    }

    pub fn solution_root(&self) -> Option<&Path> {
        self.solution_root.as_deref()
    }

    pub fn record_created(&mut self, path: impl Into<PathBuf>) {
        self.created.record(path);
    }

    /// Record a patched file; each path is listed once.
    pub fn record_modified(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.modified.contains(&path) {
            self.modified.push(path);
        }
    }

    pub fn record_skipped(&mut self, path: impl Into<PathBuf>, fragment: Fragment) {
        self.skipped.push(SkippedFragment {
            path: path.into(),
            fragment,
        });
    }

    pub fn complete(&mut self, stage: Stage) {
        self.stages.push(CompletedStage {
            stage,
            subject: None,
        });
    }

    pub fn complete_for(&mut self, stage: Stage, subject: &str) {
        self.stages.push(CompletedStage {
            stage,
            subject: Some(subject.to_string()),
        });
    }

    pub fn created(&self) -> &CreatedFiles {
        &self.created
    }

    pub fn modified(&self) -> &[PathBuf] {
        &self.modified
    }

    pub fn skipped(&self) -> &[SkippedFragment] {
        &self.skipped
    }

    pub fn stages(&self) -> &[CompletedStage] {
        &self.stages
    }

    pub fn has_completed(&self, stage: Stage) -> bool {
        self.stages.iter().any(|s| s.stage == stage)
    }

    pub fn into_report(self) -> RunReport {
        RunReport {
            solution_root: self.solution_root,
            created: self.created,
            modified: self.modified,
            skipped: self.skipped,
            stages: self.stages,
        }
    }
}

/// End-of-run summary, serializable for the CLI's JSON output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub solution_root: Option<PathBuf>,
    pub created: CreatedFiles,
    pub modified: Vec<PathBuf>,
    pub skipped: Vec<SkippedFragment>,
    pub stages: Vec<CompletedStage>,
}

impl RunReport {
    /// `true` when the run wrote nothing.
    pub fn is_noop(&self) -> bool {
        self.created.is_empty() && self.modified.is_empty()
    }
}
