use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "devpulse",
    version,
    about = "Student GitHub activity scoring and analytics CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory holding devpulse.toml
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Weekly contributions, consistency trend, languages and progress
    Analyze(AnalyzeCommand),
    /// Progress for the project a student belongs to
    Progress(ProgressCommand),
    /// Language distribution across all repositories
    Languages(LanguagesCommand),
}

#[derive(Args)]
pub struct AnalyzeCommand {
    /// Snapshot file or directory of snapshot files
    pub snapshot: PathBuf,
    /// Only count commits by this login
    #[arg(long)]
    pub author: Option<String>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Reference time (RFC 3339); defaults to the current time
    #[arg(long)]
    pub now: Option<String>,
}

#[derive(Args)]
pub struct ProgressCommand {
    pub snapshot: PathBuf,
    #[arg(long)]
    pub student: String,
    #[arg(long)]
    pub now: Option<String>,
}

#[derive(Args)]
pub struct LanguagesCommand {
    pub snapshot: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
