//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "joinery",
    bin_name = "joinery",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Schema-driven ASP.NET Core web API scaffolding",
    long_about = "Joinery generates a layered ASP.NET Core solution from a YAML or \
                  JSON template and grows it incrementally with new entities and \
                  properties.",
    after_help = "EXAMPLES:\n\
        \x20 joinery new shop.yaml --output ./out\n\
        \x20 joinery add entities order.yaml --solution ./out/Shop\n\
        \x20 joinery add prop -e Product -n Sku -t string -f\n\
        \x20 joinery completions bash > /usr/share/bash-completion/completions/joinery",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold a new solution from a template file.
    #[command(
        visible_alias = "n",
        about = "Scaffold a new solution",
        after_help = "EXAMPLES:\n\
            \x20 joinery new shop.yaml\n\
            \x20 joinery new shop.json --output ./out --yes\n\
            \x20 joinery new shop.yaml --dry-run --output-format json"
    )]
    New(NewArgs),

    /// Add entities or properties to an existing solution.
    #[command(
        about = "Add to an existing solution",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 joinery add entities order.yaml\n\
            \x20 joinery add prop -e Product -n Sku -t string"
    )]
    Add(AddCommands),

    /// Initialise a Joinery configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 joinery init\n\
            \x20 joinery init --force\n\
            \x20 joinery --config ./joinery.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 joinery completions bash > ~/.local/share/bash-completion/completions/joinery\n\
            \x20 joinery completions zsh  > ~/.zfunc/_joinery\n\
            \x20 joinery completions fish > ~/.config/fish/completions/joinery.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Joinery configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 joinery config get output.format\n\
            \x20 joinery config list\n\
            \x20 joinery config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `joinery new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Template file describing the solution (.yaml, .yml or .json).
    #[arg(value_name = "TEMPLATE", help = "Template file (.yaml, .yml, .json)")]
    pub template: PathBuf,

    /// Directory the solution folder is created in.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── add ───────────────────────────────────────────────────────────────────────

/// Subcommands for `joinery add`.
#[derive(Debug, Subcommand)]
pub enum AddCommands {
    /// Add the entities listed in a template file.
    #[command(visible_alias = "entity")]
    Entities(AddEntitiesArgs),

    /// Add one property to an existing entity and its DTOs.
    #[command(visible_alias = "property")]
    Prop(AddPropArgs),
}

/// Arguments for `joinery add entities`.
#[derive(Debug, Args)]
pub struct AddEntitiesArgs {
    /// Template file whose `Entities` section is added.
    #[arg(value_name = "FILE", help = "Template file with an Entities list")]
    pub file: PathBuf,

    #[command(flatten)]
    pub solution: SolutionArgs,
}

/// Arguments for `joinery add prop`.
#[derive(Debug, Args)]
pub struct AddPropArgs {
    /// Entity that receives the property.
    #[arg(short = 'e', long = "entity", value_name = "ENTITY")]
    pub entity: String,

    /// Property name.
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: String,

    /// Property type, e.g. `string`, `int?`, `Guid` or another entity name.
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub type_name: String,

    /// Allow filtering on the property.
    #[arg(short = 'f', long = "filter")]
    pub can_filter: bool,

    /// Allow sorting on the property.
    #[arg(short = 's', long = "sort")]
    pub can_sort: bool,

    /// Property on the other side of a foreign-key relationship, written
    /// into a `[ForeignKey]` attribute.
    #[arg(short = 'k', long = "foreign-key", value_name = "PROPERTY")]
    pub foreign_entity: Option<String>,

    #[command(flatten)]
    pub solution: SolutionArgs,
}

/// Location of an existing solution.
#[derive(Debug, Args)]
pub struct SolutionArgs {
    /// Solution root (the directory holding the .sln, src/ and tests/).
    #[arg(
        long = "solution",
        value_name = "DIR",
        default_value = ".",
        help = "Solution root directory"
    )]
    pub dir: PathBuf,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `joinery init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `joinery completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `joinery config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `output.format`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
