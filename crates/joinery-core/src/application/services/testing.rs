//! In-crate test doubles: a map-backed filesystem and a minimal renderer
//! that emits the anchors the modifiers depend on.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::{
    application::{
        ApplicationError,
        ports::{ArtifactRenderer, Filesystem},
    },
    domain::{Anchor, ArtifactKind, ClassPath, Fragment, RenderModel, Subject},
    error::JoineryResult,
};

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Dir,
    File(String),
}

/// Shared so a test can keep a handle after boxing it into the service.
#[derive(Debug, Clone, Default)]
pub struct MapFs {
    nodes: Arc<Mutex<BTreeMap<PathBuf, Node>>>,
}

impl MapFs {
    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.nodes.lock().unwrap().get(path.as_ref()) {
            Some(Node::File(text)) => Some(text.clone()),
            _ => None,
        }
    }

    pub fn files(&self) -> BTreeMap<PathBuf, String> {
        self.nodes
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(p, n)| match n {
                Node::File(t) => Some((p.clone(), t.clone())),
                Node::Dir => None,
            })
            .collect()
    }

    fn add_dirs(nodes: &mut BTreeMap<PathBuf, Node>, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
    }
}

impl Filesystem for MapFs {
    fn create_dir_all(&self, path: &Path) -> JoineryResult<()> {
        Self::add_dirs(&mut self.nodes.lock().unwrap(), path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> JoineryResult<()> {
        let mut nodes = self.nodes.lock().unwrap();
        if let Some(parent) = path.parent() {
            Self::add_dirs(&mut nodes, parent);
        }
        nodes.insert(path.to_path_buf(), Node::File(content.to_string()));
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> JoineryResult<String> {
        self.file(path)
            .ok_or_else(|| ApplicationError::io(path, "no such file").into())
    }

    fn exists(&self, path: &Path) -> bool {
        self.nodes.lock().unwrap().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.nodes.lock().unwrap().get(path), Some(Node::Dir))
    }

    fn list_dir(&self, path: &Path) -> JoineryResult<Vec<PathBuf>> {
        Ok(self
            .nodes
            .lock()
            .unwrap()
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect())
    }
}

/// Renders one header line per file plus whatever anchors the kind carries.
pub struct StubRenderer;

impl StubRenderer {
    fn anchors(kind: ArtifactKind) -> &'static [Anchor] {
        match kind {
            ArtifactKind::Entity
            | ArtifactKind::DtoRead
            | ArtifactKind::DtoCreate
            | ArtifactKind::DtoUpdate => &[Anchor::Properties],
            ArtifactKind::DbContext => &[Anchor::DbSets],
            ArtifactKind::Seeder => &[Anchor::Seeders],
            ArtifactKind::ServiceRegistration => {
                &[Anchor::DbContext, Anchor::Auth, Anchor::Policies]
            }
            _ => &[],
        }
    }
}

impl ArtifactRenderer for StubRenderer {
    fn render(
        &self,
        kind: ArtifactKind,
        location: &ClassPath,
        model: &RenderModel,
    ) -> JoineryResult<String> {
        let mut out = format!("// {kind} {}.{}\n", location.namespace(), location.class_name());
        if let (Some(entity), true) = (model.entity(), kind.carries_properties()) {
            for p in &entity.properties {
                out.push_str(&format!("    public {} {} {{ get; set; }}\n", p.type_name, p.name));
            }
        }
        for anchor in Self::anchors(kind) {
            out.push_str(&format!("    {}\n", anchor.marker()));
        }
        Ok(out)
    }

    fn render_fragment(&self, fragment: Fragment, model: &RenderModel) -> JoineryResult<String> {
        let entity = model.entity().map(|e| e.name.clone()).unwrap_or_default();
        let text = match (fragment, &model.subject) {
            (Fragment::Property { .. }, Subject::Property { property, .. }) => {
                format!("public {} {} {{ get; set; }}", property.type_name, property.name)
            }
            (Fragment::DbSet, _) => format!("public DbSet<{entity}> {entity}s {{ get; set; }}"),
            (Fragment::Seeder, _) => format!("{entity}Seeder.Seed(context);"),
            (Fragment::DbContextRegistration, _) => {
                format!("services.AddDbContext<{}>();", model.solution.db_context_name)
            }
            (Fragment::Policy, Subject::Policy(policy)) => {
                format!("options.AddPolicy(\"{}\");", policy.name)
            }
            (Fragment::JwtAuth, _) => "services.AddJwtBearer();".to_string(),
            (other, _) => {
                return Err(ApplicationError::RenderingFailed {
                    what: other.to_string(),
                    reason: "unexpected subject".into(),
                }
                .into());
            }
        };
        Ok(text)
    }
}
