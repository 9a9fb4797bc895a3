//! Scaffold Service - main application orchestrator.
//!
//! Sequences the generation stages for the three use cases:
//! 1. `scaffold_solution`: a fresh solution from a full template
//! 2. `add_entities`: new entities in an existing solution
//! 3. `add_property`: one new property on an existing entity
//!
//! Stages are strictly ordered and fail fast. Files written before a failure
//! stay on disk and remain listed in the caller's [`RunContext`].

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{ArtifactRenderer, Filesystem},
        services::{
            builder::ArtifactBuilder,
            modifier::FileModifier,
            run::{RunContext, Stage},
        },
    },
    domain::{
        ArtifactKind, ClassPath, DomainError, Entity, EntityProperty, Fragment, ProjectTemplate,
        RenderModel, SchemaValidator, SolutionSettings, Splice, Subject, ValidationMode,
        anchors::{contains_fragment, declares_property},
    },
    error::JoineryResult,
};

/// Where a run writes and the solution-wide settings it renders with.
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionContext {
    pub root: PathBuf,
    pub settings: SolutionSettings,
}

impl SolutionContext {
    pub fn new(root: impl Into<PathBuf>, settings: SolutionSettings) -> Self {
        Self {
            root: root.into(),
            settings,
        }
    }

    fn model(&self, subject: Subject) -> RenderModel {
        RenderModel::new(self.settings.clone(), subject)
    }

    fn resolve(&self, kind: ArtifactKind, subject: &str) -> ClassPath {
        ClassPath::resolve(kind, subject, &self.settings.solution_name)
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    renderer: Box<dyn ArtifactRenderer>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use joinery_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     Box::new(filesystem), // impl Filesystem
    ///     Box::new(renderer),   // impl ArtifactRenderer
    /// );
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>, renderer: Box<dyn ArtifactRenderer>) -> Self {
        Self {
            filesystem,
            renderer,
        }
    }

    fn builder(&self) -> ArtifactBuilder<'_> {
        ArtifactBuilder::new(self.filesystem.as_ref(), self.renderer.as_ref())
    }

    fn modifier(&self) -> FileModifier<'_> {
        FileModifier::new(self.filesystem.as_ref(), self.renderer.as_ref())
    }

    // -------------------------------------------------------------------------
    // Use cases
    // -------------------------------------------------------------------------

    /// Generate a whole solution into `output_dir/SolutionName`.
    ///
    /// Returns the solution root.
    #[instrument(
        skip_all,
        fields(
            solution = %template.solution_name,
            output = %output_dir.display(),
            entities = template.entities.len()
        )
    )]
    pub fn scaffold_solution(
        &self,
        template: &ProjectTemplate,
        output_dir: &Path,
        ctx: &mut RunContext,
    ) -> JoineryResult<PathBuf> {
        info!("Scaffolding solution");

        SchemaValidator::validate(template, ValidationMode::FullScaffold)?;
        ctx.complete(Stage::ValidateSchema);

        let solution = SolutionContext::new(
            output_dir.join(&template.solution_name),
            SolutionSettings::from_template(template),
        );
        ctx.set_solution_root(&solution.root);
        ctx.complete(Stage::ResolveSolutionContext);

        self.create_directory_scaffold(&solution, ctx)?;
        ctx.complete(Stage::CreateDirectoryScaffold);

        self.build_db_context(&solution, ctx)?;
        self.register_db_context(&solution, ctx)?;
        ctx.complete(Stage::BuildDbContext);

        for entity in &template.entities {
            self.scaffold_entity(&solution, entity, ctx)?;
        }

        self.add_seeders(&solution, &template.entities, ctx)?;
        ctx.complete(Stage::ModifySeeders);
        self.add_db_sets(&solution, &template.entities, ctx)?;
        ctx.complete(Stage::ModifyDbSet);

        self.build_cross_cutting(&solution, template, ctx)?;
        ctx.complete(Stage::BuildCrossCuttingArtifacts);

        self.emit_summary(ctx);
        Ok(solution.root)
    }

    /// Add the template's entities to the solution at `solution_root`.
    #[instrument(
        skip_all,
        fields(root = %solution_root.display(), entities = template.entities.len())
    )]
    pub fn add_entities(
        &self,
        template: &ProjectTemplate,
        solution_root: &Path,
        ctx: &mut RunContext,
    ) -> JoineryResult<()> {
        info!("Adding entities");

        SchemaValidator::validate(template, ValidationMode::AddEntities)?;
        ctx.complete(Stage::ValidateSchema);

        let solution_name = self.find_solution_name(solution_root)?;
        SchemaValidator::validate_against_solution(template, &solution_name)?;
        let context_name = self.find_db_context_name(solution_root, &solution_name)?;
        debug!(solution = %solution_name, context = %context_name, "Resolved existing solution");

        let solution = SolutionContext::new(
            solution_root,
            SolutionSettings::existing(template, solution_name, context_name),
        );
        ctx.set_solution_root(solution_root);
        ctx.complete(Stage::ResolveSolutionContext);

        for entity in &template.entities {
            self.scaffold_entity(&solution, entity, ctx)?;
        }

        self.add_seeders(&solution, &template.entities, ctx)?;
        ctx.complete(Stage::ModifySeeders);
        self.add_db_sets(&solution, &template.entities, ctx)?;
        ctx.complete(Stage::ModifyDbSet);

        self.emit_summary(ctx);
        Ok(())
    }

    /// Append `property` to `entity_name` and its read/create/update DTOs.
    #[instrument(
        skip_all,
        fields(root = %solution_root.display(), entity = entity_name, property = %property.name)
    )]
    pub fn add_property(
        &self,
        solution_root: &Path,
        entity_name: &str,
        property: &EntityProperty,
        ctx: &mut RunContext,
    ) -> JoineryResult<()> {
        info!("Adding property");

        SchemaValidator::validate_property(entity_name, property)?;
        ctx.complete(Stage::ValidateSchema);

        for dir in ["src", "tests"] {
            if !self.filesystem.is_dir(&solution_root.join(dir)) {
                return Err(ApplicationError::NotABoundedContextDirectory {
                    path: solution_root.to_path_buf(),
                }
                .into());
            }
        }
        let solution_name = self.find_solution_name(solution_root)?;
        let solution = SolutionContext::new(
            solution_root,
            SolutionSettings {
                solution_name,
                ..SolutionSettings::default()
            },
        );
        ctx.set_solution_root(solution_root);
        ctx.complete(Stage::ResolveSolutionContext);

        let entity_file = solution.root.join(solution.resolve(ArtifactKind::Entity, entity_name).relative_path());
        if !self.filesystem.exists(&entity_file) {
            return Err(ApplicationError::EntityNotFound {
                entity: entity_name.to_string(),
                path: entity_file,
            }
            .into());
        }
        self.ensure_property_is_new(&solution, entity_name, property)?;

        self.add_entity_properties(&solution, entity_name, property, ctx)?;
        ctx.complete_for(Stage::ModifyEntity, entity_name);
        self.add_dto_properties(&solution, entity_name, property, ctx)?;
        ctx.complete_for(Stage::ModifyDtos, entity_name);

        self.emit_summary(ctx);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Stages
    // -------------------------------------------------------------------------

    fn create_directory_scaffold(
        &self,
        solution: &SolutionContext,
        ctx: &mut RunContext,
    ) -> JoineryResult<()> {
        for dir in ["src", "tests"] {
            self.filesystem.create_dir_all(&solution.root.join(dir))?;
        }
        let builder = self.builder();
        let model = solution.model(Subject::Solution);
        for kind in [
            ArtifactKind::SolutionFile,
            ArtifactKind::ServiceRegistration,
            ArtifactKind::Seeder,
        ] {
            builder.build(&solution.root, kind, "", &model, ctx)?;
        }
        Ok(())
    }

    fn scaffold_entity(
        &self,
        solution: &SolutionContext,
        entity: &Entity,
        ctx: &mut RunContext,
    ) -> JoineryResult<()> {
        let name = entity.name.as_str();

        self.build_entity(solution, entity, ctx)?;
        ctx.complete_for(Stage::BuildEntity, name);
        self.build_dtos(solution, entity, ctx)?;
        ctx.complete_for(Stage::BuildDtos, name);
        self.build_validator(solution, entity, ctx)?;
        ctx.complete_for(Stage::BuildValidators, name);
        self.build_profile(solution, entity, ctx)?;
        ctx.complete_for(Stage::BuildProfile, name);
        self.build_controller(solution, entity, ctx)?;
        ctx.complete_for(Stage::BuildController, name);
        self.add_policies(solution, ctx)?;
        ctx.complete_for(Stage::ModifyServiceRegistration, name);
        self.build_fakes(solution, entity, ctx)?;
        ctx.complete_for(Stage::BuildFakes, name);

        info!(entity = name, "Entity scaffolded");
        Ok(())
    }

    fn build_cross_cutting(
        &self,
        solution: &SolutionContext,
        template: &ProjectTemplate,
        ctx: &mut RunContext,
    ) -> JoineryResult<()> {
        let builder = self.builder();
        let root = solution.root.as_path();

        // Test utilities
        let plain = solution.model(Subject::Solution);
        builder.build(root, ArtifactKind::TestFixture, "", &plain, ctx)?;
        builder.build(root, ArtifactKind::TestBase, "", &plain, ctx)?;
        let routes = solution.model(Subject::Entities(template.entities.clone()));
        builder.build(root, ArtifactKind::ApiRoutes, "", &routes, ctx)?;
        builder.build(root, ArtifactKind::HealthCheckTest, "", &plain, ctx)?;

        builder.build(root, ArtifactKind::SwaggerRegistration, "", &plain, ctx)?;

        for env in &template.environments {
            let model = solution.model(Subject::Environment(env.clone()));
            builder.build(root, ArtifactKind::AppSettings, &env.environment_name, &model, ctx)?;
        }

        if template.add_jwt_authentication {
            self.initialize_auth(solution, ctx)?;
        }

        if template.bus.add_bus {
            builder.build(root, ArtifactKind::BusRegistration, "", &plain, ctx)?;
            for producer in &template.producers {
                let model = solution.model(Subject::Producer(producer.clone()));
                builder.build(root, ArtifactKind::Producer, &producer.producer_name, &model, ctx)?;
            }
            for consumer in &template.consumers {
                let model = solution.model(Subject::Consumer(consumer.clone()));
                builder.build(root, ArtifactKind::Consumer, &consumer.consumer_name, &model, ctx)?;
            }
        } else if !template.producers.is_empty() || !template.consumers.is_empty() {
            warn!("Producers and consumers are ignored unless Bus.AddBus is true");
        }

        Ok(())
    }

    fn emit_summary(&self, ctx: &mut RunContext) {
        info!(
            created = ctx.created().len(),
            modified = ctx.modified().len(),
            skipped = ctx.skipped().len(),
            "Run complete"
        );
        ctx.complete(Stage::EmitSummary);
    }

    // -------------------------------------------------------------------------
    // Builders
    // -------------------------------------------------------------------------

    pub fn build_entity(
        &self,
        solution: &SolutionContext,
        entity: &Entity,
        ctx: &mut RunContext,
    ) -> JoineryResult<ClassPath> {
        self.build_for_entity(solution, ArtifactKind::Entity, entity, ctx)
    }

    /// Read, create, update and read-parameters DTOs.
    pub fn build_dtos(
        &self,
        solution: &SolutionContext,
        entity: &Entity,
        ctx: &mut RunContext,
    ) -> JoineryResult<Vec<ClassPath>> {
        ArtifactKind::DTOS
            .into_iter()
            .map(|kind| self.build_for_entity(solution, kind, entity, ctx))
            .collect()
    }

    pub fn build_validator(
        &self,
        solution: &SolutionContext,
        entity: &Entity,
        ctx: &mut RunContext,
    ) -> JoineryResult<ClassPath> {
        self.build_for_entity(solution, ArtifactKind::Validator, entity, ctx)
    }

    pub fn build_profile(
        &self,
        solution: &SolutionContext,
        entity: &Entity,
        ctx: &mut RunContext,
    ) -> JoineryResult<ClassPath> {
        self.build_for_entity(solution, ArtifactKind::Profile, entity, ctx)
    }

    pub fn build_controller(
        &self,
        solution: &SolutionContext,
        entity: &Entity,
        ctx: &mut RunContext,
    ) -> JoineryResult<ClassPath> {
        self.build_for_entity(solution, ArtifactKind::Controller, entity, ctx)
    }

    pub fn build_fakes(
        &self,
        solution: &SolutionContext,
        entity: &Entity,
        ctx: &mut RunContext,
    ) -> JoineryResult<ClassPath> {
        self.build_for_entity(solution, ArtifactKind::Fake, entity, ctx)
    }

    pub fn build_db_context(
        &self,
        solution: &SolutionContext,
        ctx: &mut RunContext,
    ) -> JoineryResult<ClassPath> {
        self.builder().build(
            &solution.root,
            ArtifactKind::DbContext,
            &solution.settings.db_context_name,
            &solution.model(Subject::Solution),
            ctx,
        )
    }

    fn build_for_entity(
        &self,
        solution: &SolutionContext,
        kind: ArtifactKind,
        entity: &Entity,
        ctx: &mut RunContext,
    ) -> JoineryResult<ClassPath> {
        self.builder().build(
            &solution.root,
            kind,
            &entity.name,
            &solution.model(Subject::Entity(entity.clone())),
            ctx,
        )
    }

    // -------------------------------------------------------------------------
    // Modifiers
    // -------------------------------------------------------------------------

    /// One policy fragment per template policy in `ServiceRegistration`.
    pub fn add_policies(
        &self,
        solution: &SolutionContext,
        ctx: &mut RunContext,
    ) -> JoineryResult<()> {
        let target = solution.resolve(ArtifactKind::ServiceRegistration, "");
        for policy in &solution.settings.policies {
            let model = solution.model(Subject::Policy(policy.clone()));
            self.modifier()
                .modify(&solution.root, &target, Fragment::Policy, &model, ctx)?;
        }
        Ok(())
    }

    pub fn add_seeders(
        &self,
        solution: &SolutionContext,
        entities: &[Entity],
        ctx: &mut RunContext,
    ) -> JoineryResult<()> {
        let target = solution.resolve(ArtifactKind::Seeder, "");
        self.modify_per_entity(solution, &target, Fragment::Seeder, entities, ctx)
    }

    pub fn add_db_sets(
        &self,
        solution: &SolutionContext,
        entities: &[Entity],
        ctx: &mut RunContext,
    ) -> JoineryResult<()> {
        let target = solution.resolve(ArtifactKind::DbContext, &solution.settings.db_context_name);
        self.modify_per_entity(solution, &target, Fragment::DbSet, entities, ctx)
    }

    pub fn register_db_context(
        &self,
        solution: &SolutionContext,
        ctx: &mut RunContext,
    ) -> JoineryResult<Splice> {
        let target = solution.resolve(ArtifactKind::ServiceRegistration, "");
        self.modifier().modify(
            &solution.root,
            &target,
            Fragment::DbContextRegistration,
            &solution.model(Subject::Solution),
            ctx,
        )
    }

    pub fn initialize_auth(
        &self,
        solution: &SolutionContext,
        ctx: &mut RunContext,
    ) -> JoineryResult<Splice> {
        let target = solution.resolve(ArtifactKind::ServiceRegistration, "");
        self.modifier().modify(
            &solution.root,
            &target,
            Fragment::JwtAuth,
            &solution.model(Subject::Solution),
            ctx,
        )
    }

    pub fn add_entity_properties(
        &self,
        solution: &SolutionContext,
        entity_name: &str,
        property: &EntityProperty,
        ctx: &mut RunContext,
    ) -> JoineryResult<Splice> {
        self.add_property_to(solution, ArtifactKind::Entity, entity_name, property, ctx)
    }

    /// Read, create and update DTOs; the parameters DTO has no property list.
    pub fn add_dto_properties(
        &self,
        solution: &SolutionContext,
        entity_name: &str,
        property: &EntityProperty,
        ctx: &mut RunContext,
    ) -> JoineryResult<Vec<Splice>> {
        ArtifactKind::DTOS
            .into_iter()
            .filter(ArtifactKind::carries_properties)
            .map(|kind| self.add_property_to(solution, kind, entity_name, property, ctx))
            .collect()
    }

    fn add_property_to(
        &self,
        solution: &SolutionContext,
        kind: ArtifactKind,
        entity_name: &str,
        property: &EntityProperty,
        ctx: &mut RunContext,
    ) -> JoineryResult<Splice> {
        let target = solution.resolve(kind, entity_name);
        let model = solution.model(Subject::Property {
            entity: entity_name.to_string(),
            property: property.clone(),
        });
        self.modifier().modify(
            &solution.root,
            &target,
            Fragment::Property { target: kind },
            &model,
            ctx,
        )
    }

    /// Fails when any of the entity's property-carrying files already declares
    /// `property.name` with a different rendering. An exact repeat passes and
    /// is later skipped by the modifier. Nothing is written here.
    fn ensure_property_is_new(
        &self,
        solution: &SolutionContext,
        entity_name: &str,
        property: &EntityProperty,
    ) -> JoineryResult<()> {
        let model = solution.model(Subject::Property {
            entity: entity_name.to_string(),
            property: property.clone(),
        });
        let targets = std::iter::once(ArtifactKind::Entity)
            .chain(ArtifactKind::DTOS.into_iter().filter(ArtifactKind::carries_properties));

        for kind in targets {
            let path = solution
                .root
                .join(solution.resolve(kind, entity_name).relative_path());
            let text = self.filesystem.read_to_string(&path)?;
            let rendered = self
                .renderer
                .render_fragment(Fragment::Property { target: kind }, &model)?;
            if !contains_fragment(&text, &rendered) && declares_property(&text, &property.name) {
                debug!(file = %path.display(), "Property already declared");
                return Err(DomainError::DuplicateProperty {
                    entity: entity_name.to_string(),
                    property: property.name.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn modify_per_entity(
        &self,
        solution: &SolutionContext,
        target: &ClassPath,
        fragment: Fragment,
        entities: &[Entity],
        ctx: &mut RunContext,
    ) -> JoineryResult<()> {
        let modifier = self.modifier();
        for entity in entities {
            let model = solution.model(Subject::Entity(entity.clone()));
            modifier.modify(&solution.root, target, fragment, &model, ctx)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Solution context resolution
    // -------------------------------------------------------------------------

    /// Name of the single `*.sln` file directly inside `root`.
    fn find_solution_name(&self, root: &Path) -> JoineryResult<String> {
        let not_found = |reason: String| ApplicationError::SolutionNotFound {
            path: root.to_path_buf(),
            reason,
        };

        if !self.filesystem.is_dir(root) {
            return Err(not_found("directory does not exist".into()).into());
        }

        let solutions: Vec<PathBuf> = self
            .filesystem
            .list_dir(root)?
            .into_iter()
            .filter(|p| p.extension().is_some_and(|ext| ext == "sln"))
            .collect();

        match solutions.as_slice() {
            [] => Err(not_found("no .sln file".into()).into()),
            [single] => single
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
                .ok_or_else(|| not_found(format!("unreadable file name {}", single.display())).into()),
            many => Err(not_found(format!("{} .sln files, expected one", many.len())).into()),
        }
    }

    /// Class name of the first `*.cs` file in the contexts directory.
    fn find_db_context_name(&self, root: &Path, solution_name: &str) -> JoineryResult<String> {
        let dir = root.join(ClassPath::resolve(ArtifactKind::DbContext, "", solution_name).directory());
        if !self.filesystem.is_dir(&dir) {
            return Err(ApplicationError::ContextNotFound { path: dir }.into());
        }

        self.filesystem
            .list_dir(&dir)?
            .into_iter()
            .filter(|p| p.extension().is_some_and(|ext| ext == "cs"))
            .find_map(|p| p.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .ok_or_else(|| ApplicationError::ContextNotFound { path: dir }.into())
    }
}
