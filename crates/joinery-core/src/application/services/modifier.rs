//! Anchor-based patching of previously generated files.

use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{ArtifactRenderer, Filesystem},
        services::run::RunContext,
    },
    domain::{
        AnchorFault, ClassPath, Fragment, RenderModel, SectionIndex, Splice,
        anchors::{contains_fragment, splice_before},
    },
    error::JoineryResult,
};

/// Splices rendered fragments above anchor lines in existing files.
///
/// Applying the same fragment twice leaves the file unchanged the second time.
pub struct FileModifier<'a> {
    filesystem: &'a dyn Filesystem,
    renderer: &'a dyn ArtifactRenderer,
}

impl<'a> FileModifier<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, renderer: &'a dyn ArtifactRenderer) -> Self {
        Self {
            filesystem,
            renderer,
        }
    }

    #[instrument(level = "debug", skip_all, fields(file = %class_path, fragment = %fragment))]
    pub fn modify(
        &self,
        root: &Path,
        class_path: &ClassPath,
        fragment: Fragment,
        model: &RenderModel,
        ctx: &mut RunContext,
    ) -> JoineryResult<Splice> {
        let relative = class_path.relative_path();
        let path = root.join(&relative);
        let text = self.filesystem.read_to_string(&path)?;

        let anchor = fragment.anchor();
        let line = SectionIndex::build(&text)
            .locate(anchor)
            .map_err(|fault| match fault {
                AnchorFault::Missing => ApplicationError::AnchorNotFound {
                    path: path.clone(),
                    anchor,
                },
                AnchorFault::Ambiguous { count } => ApplicationError::AmbiguousAnchor {
                    path: path.clone(),
                    anchor,
                    count,
                },
            })?;

        let rendered = self.renderer.render_fragment(fragment, model)?;
        if contains_fragment(&text, &rendered) {
            debug!("Fragment already present");
            ctx.record_skipped(relative, fragment);
            return Ok(Splice::AlreadyPresent);
        }

        self.filesystem
            .write_file(
                &path,
                &splice_before(&text, line, &rendered, fragment.blank_line_after()),
            )?;
        debug!(anchor = %anchor, "Inserted");
        ctx.record_modified(relative);
        Ok(Splice::Inserted)
    }
}
