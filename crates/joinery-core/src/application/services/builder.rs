//! Create-only artifact writer.

use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{ArtifactRenderer, Filesystem},
        services::run::RunContext,
    },
    domain::{ArtifactKind, ClassPath, RenderModel},
    error::JoineryResult,
};

/// Writes exactly one new file per call and never overwrites.
pub struct ArtifactBuilder<'a> {
    filesystem: &'a dyn Filesystem,
    renderer: &'a dyn ArtifactRenderer,
}

impl<'a> ArtifactBuilder<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, renderer: &'a dyn ArtifactRenderer) -> Self {
        Self {
            filesystem,
            renderer,
        }
    }

    /// Resolve, guard, render, write and record one artifact.
    ///
    /// Fails with [`ApplicationError::AlreadyExists`] before rendering if the
    /// target file is already present.
    #[instrument(level = "debug", skip_all, fields(kind = %kind, subject = subject))]
    pub fn build(
        &self,
        root: &Path,
        kind: ArtifactKind,
        subject: &str,
        model: &RenderModel,
        ctx: &mut RunContext,
    ) -> JoineryResult<ClassPath> {
        let class_path = ClassPath::resolve(kind, subject, &model.solution.solution_name);

        self.filesystem
            .create_dir_all(&root.join(class_path.directory()))?;

        let target = root.join(class_path.relative_path());
        if self.filesystem.exists(&target) {
            return Err(ApplicationError::AlreadyExists { path: target }.into());
        }

        let text = self.renderer.render(kind, &class_path, model)?;
        self.filesystem.write_file(&target, &text)?;

        debug!(path = %class_path, "Created");
        ctx.record_created(class_path.relative_path());
        Ok(class_path)
    }
}
