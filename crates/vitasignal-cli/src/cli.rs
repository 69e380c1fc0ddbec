use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vsdiff",
    about = "VitaSignal document diff — compare two text files line by line",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the line diff between two files
    Diff(DiffArgs),
    /// Show added/removed/unchanged counts
    Stats(StatsArgs),
    /// List changed regions
    Hunks(HunksArgs),
}

/// The two documents being compared.
#[derive(Args)]
pub struct InputArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    /// Lines per side taken into account
    #[arg(long)]
    pub max_lines: Option<usize>,
}

#[derive(Args)]
pub struct DiffArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Only print changed regions with this many lines of context
    #[arg(short = 'U', long)]
    pub context: Option<usize>,
    #[arg(long)]
    pub side_by_side: bool,
    #[arg(long)]
    pub no_line_numbers: bool,
    /// Column width in side-by-side mode
    #[arg(long, default_value = "60")]
    pub width: usize,
}

#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args)]
pub struct HunksArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[arg(short = 'U', long, default_value = "3")]
    pub context: usize,
}
