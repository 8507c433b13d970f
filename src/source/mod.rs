pub mod snapshot;

use crate::types::activity::CommitRecord;
use crossbeam_channel::{unbounded, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// Failure of a single repository fetch. Never fatal to an aggregation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("repository not found: {0}")]
    NotFound(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitQuery {
    pub repository: String,
    pub author: Option<String>,
}

/// Anything that can list commits for a repository, such as a hosting API
/// client or an exported snapshot. Constructed by the caller and shared
/// across fetch workers.
pub trait CommitSource: Send + Sync {
    fn fetch_commits(&self, query: &CommitQuery) -> Result<Vec<CommitRecord>, FetchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Only the first `repo_cap` repositories are fetched.
    pub repo_cap: usize,
    pub timeout: Duration,
    /// Per-repository commit sample; sources return newest first.
    pub commit_sample: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoFetch {
    pub repository: String,
    pub result: Result<Vec<CommitRecord>, FetchError>,
}

/// Fetch commits for each repository on its own worker thread.
///
/// Results come back in input order. Any repository whose fetch fails or
/// misses the shared deadline gets an `Err` outcome; the rest are unaffected.
pub fn fetch_all(
    source: Arc<dyn CommitSource>,
    repositories: &[String],
    author: Option<&str>,
    policy: &FetchPolicy,
) -> Vec<RepoFetch> {
    let selected = repositories
        .iter()
        .take(policy.repo_cap)
        .cloned()
        .collect::<Vec<_>>();
    if repositories.len() > selected.len() {
        debug!(
            skipped = repositories.len() - selected.len(),
            repo_cap = policy.repo_cap,
            "repository list truncated by repo_cap"
        );
    }

    let (tx, rx) = unbounded();
    let mut outcomes: Vec<Option<Result<Vec<CommitRecord>, FetchError>>> =
        vec![None; selected.len()];
    let mut pending = 0usize;

    for (index, repository) in selected.iter().enumerate() {
        let query = CommitQuery {
            repository: repository.clone(),
            author: author.map(ToString::to_string),
        };
        let source = Arc::clone(&source);
        let tx = tx.clone();
        let spawned = thread::Builder::new()
            .name(format!("devpulse-fetch-{index}"))
            .spawn(move || {
                let result = source.fetch_commits(&query);
                // Receiver may be gone after the deadline.
                let _ = tx.send((index, result));
            });
        match spawned {
            Ok(_) => pending += 1,
            Err(e) => {
                outcomes[index] = Some(Err(FetchError::Upstream(format!(
                    "failed to spawn fetch worker: {e}"
                ))));
            }
        }
    }
    drop(tx);

    let deadline = Instant::now() + policy.timeout;
    while pending > 0 {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok((index, result)) => {
                outcomes[index] = Some(result);
                pending -= 1;
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    selected
        .into_iter()
        .zip(outcomes)
        .map(|(repository, outcome)| {
            let result = match outcome {
                Some(Ok(mut commits)) => {
                    commits.truncate(policy.commit_sample);
                    Ok(commits)
                }
                Some(Err(e)) => Err(e),
                None => Err(FetchError::TimedOut(policy.timeout)),
            };
            if let Err(e) = &result {
                warn!(repository = %repository, error = %e, "commit fetch failed; repository contributes zero");
            }
            RepoFetch { repository, result }
        })
        .collect()
}
