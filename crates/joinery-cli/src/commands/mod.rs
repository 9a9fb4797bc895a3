//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments into calls on the core
//! `ScaffoldService` and display the results. No generation logic lives here.

pub mod add;
pub mod completions;
pub mod config;
pub mod init;
pub mod new;

use std::io::{self, IsTerminal as _, Write as _};

use joinery_adapters::{CSharpRenderer, LocalFilesystem};
use joinery_core::prelude::{RunContext, ScaffoldService};

use crate::{
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Service wired to the real filesystem and the C# renderer.
pub(crate) fn local_service() -> ScaffoldService {
    ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(CSharpRenderer::new()),
    )
}

/// Tell the user what a failed run already wrote; nothing is rolled back.
pub(crate) fn warn_partial(ctx: &RunContext, output: &OutputManager) -> CliResult<()> {
    let created = ctx.created();
    let modified = ctx.modified();
    if created.is_empty() && modified.is_empty() {
        return Ok(());
    }
    output.error(&format!(
        "Stopped after writing {} new and {} modified file(s):",
        created.len(),
        modified.len()
    ))?;
    for path in created.all() {
        output.error(&format!("  + {}", path.display()))?;
    }
    for path in modified {
        output.error(&format!("  ~ {}", path.display()))?;
    }
    Ok(())
}

/// Ask a yes/no question, defaulting to yes.
#[cfg(feature = "interactive")]
pub(crate) fn confirm(prompt: &str) -> CliResult<bool> {
    if !io::stdin().is_terminal() {
        return confirm_from_stdin(prompt);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: io::Error::other(e),
        })
}

/// Ask a yes/no question, defaulting to yes.
#[cfg(not(feature = "interactive"))]
pub(crate) fn confirm(prompt: &str) -> CliResult<bool> {
    confirm_from_stdin(prompt)
}

fn confirm_from_stdin(prompt: &str) -> CliResult<bool> {
    print!("{prompt} [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    let input = input.trim().to_ascii_lowercase();
    input.is_empty() || input == "y" || input == "yes"
}
