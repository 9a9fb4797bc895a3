//! `joinery add`: grow an existing solution.
//!
//! `add entities` runs the per-entity builders and patches the shared files;
//! `add prop` patches one entity and its DTOs. Both are safe to repeat.

use tracing::{info, instrument};

use joinery_adapters::TemplateLoader;
use joinery_core::prelude::{EntityProperty, RunContext};

use super::{local_service, warn_partial};
use crate::{
    cli::{AddCommands, AddEntitiesArgs, AddPropArgs},
    error::CliResult,
    output::OutputManager,
};

/// Dispatch to the correct add subcommand.
pub fn execute(cmd: AddCommands, output: OutputManager) -> CliResult<()> {
    match cmd {
        AddCommands::Entities(args) => add_entities(args, &output),
        AddCommands::Prop(args) => add_prop(args, &output),
    }
}

#[instrument(skip_all, fields(file = %args.file.display(), solution = %args.solution.dir.display()))]
fn add_entities(args: AddEntitiesArgs, output: &OutputManager) -> CliResult<()> {
    let template = TemplateLoader::new().load(&args.file)?;
    let names: Vec<&str> = template.entities.iter().map(|e| e.name.as_str()).collect();

    let mut ctx = RunContext::new();
    let spinner = output.spinner(&format!("Adding {}", names.join(", ")));
    let result = local_service().add_entities(&template, &args.solution.dir, &mut ctx);
    spinner.finish_and_clear();

    if let Err(err) = result {
        warn_partial(&ctx, output)?;
        return Err(err.into());
    }

    let report = ctx.into_report();
    info!(created = report.created.len(), modified = report.modified.len(), "Entities added");
    output.report("add entities", &report, false)?;
    output.success(&format!("Added {}", names.join(", ")))?;
    Ok(())
}

#[instrument(skip_all, fields(entity = %args.entity, property = %args.name))]
fn add_prop(args: AddPropArgs, output: &OutputManager) -> CliResult<()> {
    let property = build_property(&args);

    let mut ctx = RunContext::new();
    if let Err(err) =
        local_service().add_property(&args.solution.dir, &args.entity, &property, &mut ctx)
    {
        warn_partial(&ctx, output)?;
        return Err(err.into());
    }

    let report = ctx.into_report();
    output.report("add prop", &report, false)?;
    if report.is_noop() {
        output.info(&format!(
            "'{}' already has '{}'; nothing changed",
            args.entity, args.name
        ))?;
    } else {
        output.success(&format!("Added '{}' to '{}'", args.name, args.entity))?;
    }
    Ok(())
}

fn build_property(args: &AddPropArgs) -> EntityProperty {
    let property = EntityProperty::new(&args.name, &args.type_name)
        .filterable(args.can_filter)
        .sortable(args.can_sort);
    match &args.foreign_entity {
        Some(foreign) => property.with_foreign_entity(foreign),
        None => property,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SolutionArgs;
    use std::path::PathBuf;

    fn args(foreign: Option<&str>) -> AddPropArgs {
        AddPropArgs {
            entity: "Order".into(),
            name: "Customer".into(),
            type_name: "Customer".into(),
            can_filter: true,
            can_sort: false,
            foreign_entity: foreign.map(str::to_string),
            solution: SolutionArgs {
                dir: PathBuf::from("."),
            },
        }
    }

    #[test]
    fn flags_map_onto_the_property() {
        let property = build_property(&args(None));
        assert_eq!(property.name, "Customer");
        assert_eq!(property.type_name, "Customer");
        assert!(property.can_filter);
        assert!(!property.can_sort);
        assert!(!property.is_primary_key);
        assert_eq!(property.foreign_entity_name, None);
    }

    #[test]
    fn foreign_key_property_is_carried() {
        let property = build_property(&args(Some("CustomerId")));
        assert_eq!(property.foreign_entity_name.as_deref(), Some("CustomerId"));
    }
}
