mod analyze;
mod cli;
mod config;
mod error;
mod report;
mod source;
mod types;

use crate::error::{PulseError, Result};
use crate::source::snapshot::Snapshot;
use crate::source::CommitSource;
use crate::types::config::ScoringSettings;
use crate::types::report::Signal;
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const NO_SIGNAL: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(root: &Path) -> Result<ScoringSettings> {
    Ok(config::load_config(root)?
        .map(|cfg| cfg.settings())
        .unwrap_or_default())
}

fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| PulseError::InvalidTimestamp(format!("{raw}: {e}"))),
        None => Ok(Utc::now()),
    }
}

fn signal_exit(signal: Signal) -> i32 {
    match signal {
        Signal::Complete => exit_code::SUCCESS,
        Signal::Partial | Signal::None => exit_code::NO_SIGNAL,
    }
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    let settings = load_settings(&cli.root)?;

    match cli.command {
        cli::Commands::Analyze(cmd) => {
            let now = parse_now(cmd.now.as_deref())?;
            let snapshot = Snapshot::load(&cmd.snapshot)?;
            let repositories = snapshot.repository_names();
            let summaries = snapshot.summaries();
            let author = cmd.author.clone().or_else(|| snapshot.owner.clone());
            let source: Arc<dyn CommitSource> = Arc::new(snapshot.into_source());

            let activity = analyze::run(
                source,
                &repositories,
                &summaries,
                author.as_deref(),
                &settings,
                now,
            );

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
            };
            println!("{}", report::render(&activity, output_format)?);

            if activity.is_empty() {
                eprintln!("warning: no activity found in {}", cmd.snapshot.display());
            }
            Ok(signal_exit(activity.signal))
        }
        cli::Commands::Progress(cmd) => {
            let now = parse_now(cmd.now.as_deref())?;
            let snapshot = Snapshot::load(&cmd.snapshot)?;
            let project = snapshot
                .project_for(&cmd.student)
                .cloned()
                .ok_or_else(|| PulseError::ProjectNotFound(cmd.student.clone()))?;
            let repositories = snapshot.repository_names_in(&project.repositories);
            let summaries = snapshot
                .summaries()
                .into_iter()
                .filter(|summary| repositories.contains(&summary.name))
                .collect::<Vec<_>>();
            let source: Arc<dyn CommitSource> = Arc::new(snapshot.into_source());

            let activity = analyze::run(
                source,
                &repositories,
                &summaries,
                Some(cmd.student.as_str()),
                &settings,
                now,
            );

            println!("project: {}", project.name);
            println!("progress: {}/100", activity.progress);
            for repository in &activity.failed_repositories {
                println!("unavailable: {repository}");
            }
            Ok(signal_exit(activity.signal))
        }
        cli::Commands::Languages(cmd) => {
            let snapshot = Snapshot::load(&cmd.snapshot)?;
            let shares = analyze::language_shares(&snapshot.summaries(), settings.top_languages);

            match cmd.format {
                cli::ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&shares)?),
                cli::ReportFormat::Md => {
                    if shares.is_empty() {
                        println!("languages: none");
                    }
                    for share in &shares {
                        println!("- {}: {}%", share.language, share.percentage);
                    }
                }
            }

            if shares.is_empty() {
                Ok(exit_code::NO_SIGNAL)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
