pub mod buckets;
pub mod consistency;
pub mod languages;
pub mod progress;

use crate::source::{fetch_all, CommitSource, FetchPolicy, RepoFetch};
use crate::types::activity::{week_label, RepositorySummary};
use crate::types::config::ScoringSettings;
use crate::types::report::{
    AnalyticsReport, ConsistencyPoint, LanguageShare, Signal, WeeklyContribution,
};
use chrono::{DateTime, Utc};
use progress::ActivityTotals;
use std::sync::Arc;
use tracing::info;

/// Fetch commits for `repositories` and score them alongside the language
/// metadata in `summaries`.
pub fn run(
    source: Arc<dyn CommitSource>,
    repositories: &[String],
    summaries: &[RepositorySummary],
    author: Option<&str>,
    settings: &ScoringSettings,
    now: DateTime<Utc>,
) -> AnalyticsReport {
    let policy = FetchPolicy {
        repo_cap: settings.repo_cap,
        timeout: settings.fetch_timeout,
        commit_sample: settings.commit_sample,
    };
    let fetched = fetch_all(source, repositories, author, &policy);
    analyze(&fetched, summaries, settings, now)
}

pub fn analyze(
    fetched: &[RepoFetch],
    summaries: &[RepositorySummary],
    settings: &ScoringSettings,
    now: DateTime<Utc>,
) -> AnalyticsReport {
    let window = settings.weeks;
    let mut weekly = buckets::bucketize(&[], window, now);
    let mut total_commits = 0u64;
    let mut failed_repositories = Vec::new();

    for fetch in fetched {
        match &fetch.result {
            Ok(commits) => {
                total_commits += commits.len() as u64;
                buckets::merge(&mut weekly, &buckets::bucketize(commits, window, now));
            }
            Err(_) => failed_repositories.push(fetch.repository.clone()),
        }
    }

    let trend = consistency::trend(&weekly);
    let totals = ActivityTotals {
        total_commits,
        recent_commits: u64::from(buckets::recent_count(&weekly)),
        consistency: consistency::summarize(&trend, settings.consistency_mode),
    };
    let breakdown = progress::progress(&totals, settings);
    let language_distribution = language_shares(summaries, settings.top_languages);

    let signal = if !failed_repositories.is_empty() {
        Signal::Partial
    } else if total_commits == 0 && language_distribution.is_empty() {
        Signal::None
    } else {
        Signal::Complete
    };

    info!(
        repositories = fetched.len(),
        failed = failed_repositories.len(),
        total_commits,
        progress = breakdown.overall,
        "activity scored"
    );

    // Display order runs oldest to newest.
    let weekly_contributions = weekly
        .iter()
        .rev()
        .map(|bucket| WeeklyContribution {
            week: week_label(window, bucket.week_index),
            commits: bucket.commit_count,
        })
        .collect();
    let consistency_trend = trend
        .iter()
        .rev()
        .map(|point| ConsistencyPoint {
            week: week_label(window, point.week_index),
            score: point.score,
        })
        .collect();
    AnalyticsReport {
        weekly_contributions,
        consistency_trend,
        language_distribution,
        progress: breakdown.overall,
        signal,
        failed_repositories,
    }
}

pub fn language_shares(summaries: &[RepositorySummary], top: usize) -> Vec<LanguageShare> {
    languages::proficiency(summaries, top)
        .into_iter()
        .map(|entry| LanguageShare {
            language: entry.language,
            percentage: entry.proficiency,
        })
        .collect()
}
