//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Marginalia - Inspect, merge and query book analyses.
///
/// Every FILE argument accepts either stored record JSON or a raw model
/// response; `-` reads from stdin.
#[derive(Debug, Parser)]
#[command(name = "marginalia")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MARGINALIA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (names only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract and normalise a record from a model response
    Extract(ExtractArgs),

    /// Merge an incremental update into a base record
    Merge(MergeArgs),

    /// Render a record as markdown
    Render(RenderArgs),

    /// List the known entities mentioned in a chapter
    Scan(ScanArgs),

    /// Search entities by name, alias or description
    Search(SearchArgs),

    /// Resolve a connection reference such as "Jane (sister)"
    Resolve(ResolveArgs),

    /// Show one entity in full
    Show(ShowArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Model response or record file
    pub file: PathBuf,
}

/// Arguments for the merge command.
#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Base record
    pub base: PathBuf,

    /// Incremental update
    pub partial: PathBuf,

    /// Write the merged record here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the render command.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Record file
    pub file: PathBuf,

    /// Document title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Reading progress shown under the title
    #[arg(short, long)]
    pub progress: Option<String>,
}

/// Arguments for the scan command.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Record file
    pub file: PathBuf,

    /// Chapter text file
    pub chapter: PathBuf,

    /// Maximum number of entities listed
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the search command.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Record file
    pub file: PathBuf,

    /// Search query text
    pub query: String,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the resolve command.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Record file
    pub file: PathBuf,

    /// Connection reference, e.g. "Elizabeth (sister)"
    pub connection: String,
}

/// Arguments for the show command.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Record file
    pub file: PathBuf,

    /// Entity name or alias
    pub name: String,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
