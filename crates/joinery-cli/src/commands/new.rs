//! Implementation of the `joinery new` command.
//!
//! Responsibility: load the template file, call the core scaffold service,
//! and display results. No generation logic lives here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use joinery_adapters::{CSharpRenderer, MemoryFilesystem, TemplateLoader};
use joinery_core::prelude::{
    ProjectTemplate, RunContext, ScaffoldService, SchemaValidator, ValidationMode,
};

use super::{confirm, local_service, warn_partial};
use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `joinery new` command.
///
/// Dispatch sequence:
/// 1. Load and validate the template (nothing is written if this fails)
/// 2. Resolve the output directory
/// 3. Confirm with user unless `--yes`, `--quiet` or `defaults.assume_yes`
/// 4. `--dry-run`: generate into memory and report
/// 5. Generate on disk via `ScaffoldService`
/// 6. Print the run report and next steps
#[instrument(skip_all, fields(template = %args.template.display()))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Load + validate up front so a bad template never prompts.
    let template = TemplateLoader::new().load(&args.template)?;
    SchemaValidator::validate(&template, ValidationMode::FullScaffold)?;

    // 2. Resolve output directory
    let output_dir = resolve_output_dir(args.output.as_deref(), &config);
    let solution_root = output_dir.join(&template.solution_name);
    debug!(
        solution = %template.solution_name,
        output = %output_dir.display(),
        entities = template.entities.len(),
        "Template loaded"
    );

    // 3. Show configuration and confirm
    let skip_prompt = args.yes || args.dry_run || global.quiet || config.defaults.assume_yes;
    if !skip_prompt {
        show_configuration(&template, &solution_root, &output)?;
        if !confirm("Create this solution?")? {
            return Err(CliError::Cancelled);
        }
    }

    // 4. Dry run: same pipeline, in-memory filesystem.
    if args.dry_run {
        let service = ScaffoldService::new(
            Box::new(MemoryFilesystem::new()),
            Box::new(CSharpRenderer::new()),
        );
        let mut ctx = RunContext::new();
        service.scaffold_solution(&template, &output_dir, &mut ctx)?;

        output.info(&format!(
            "Dry run: would create {} files in {}",
            ctx.created().len(),
            solution_root.display(),
        ))?;
        output.report("new", &ctx.into_report(), true)?;
        return Ok(());
    }

    // 5. Generate
    output.header(&format!("Creating '{}'...", template.solution_name))?;
    info!(solution = %template.solution_name, path = %solution_root.display(), "Scaffold started");

    let service = local_service();
    let mut ctx = RunContext::new();
    let spinner = output.spinner("Generating solution");
    let result = service.scaffold_solution(&template, &output_dir, &mut ctx);
    spinner.finish_and_clear();

    if let Err(err) = result {
        warn_partial(&ctx, &output)?;
        return Err(err.into());
    }

    info!(files = ctx.created().len(), "Scaffold completed");

    // 6. Report + next steps
    let report = ctx.into_report();
    output.report("new", &report, false)?;
    output.success(&format!(
        "Solution '{}' created ({} files)",
        template.solution_name,
        report.created.len()
    ))?;

    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", solution_root.display()))?;
    output.print("  dotnet build")?;
    output.print(&format!(
        "  dotnet run --project src/{}.WebApi",
        template.solution_name
    ))?;

    Ok(())
}

// ── Path resolution ───────────────────────────────────────────────────────────

/// `--output`, then `defaults.output_dir`, then the current directory.
fn resolve_output_dir(flag: Option<&Path>, config: &AppConfig) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| config.defaults.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    template: &ProjectTemplate,
    solution_root: &Path,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Solution:   {}", template.solution_name))?;
    if let Some(db) = &template.db_context {
        out.print(&format!("  DbContext:  {} ({})", db.context_name, db.provider))?;
    }
    let entities: Vec<&str> = template.entities.iter().map(|e| e.name.as_str()).collect();
    out.print(&format!("  Entities:   {}", entities.join(", ")))?;
    out.print(&format!("  Location:   {}", solution_root.display()))?;
    out.print("")?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_flag_wins() {
        let mut config = AppConfig::default();
        config.defaults.output_dir = Some(PathBuf::from("from-config"));
        assert_eq!(
            resolve_output_dir(Some(Path::new("from-flag")), &config),
            PathBuf::from("from-flag")
        );
    }

    #[test]
    fn config_output_dir_is_the_fallback() {
        let mut config = AppConfig::default();
        config.defaults.output_dir = Some(PathBuf::from("from-config"));
        assert_eq!(resolve_output_dir(None, &config), PathBuf::from("from-config"));
    }

    #[test]
    fn current_directory_by_default() {
        assert_eq!(
            resolve_output_dir(None, &AppConfig::default()),
            PathBuf::from(".")
        );
    }
}
