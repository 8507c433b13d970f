use super::{CommitQuery, CommitSource, FetchError};
use crate::error::{PulseError, Result};
use crate::types::activity::{CommitRecord, ProjectRecord, RepositorySummary};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// An exported view of one owner's hosting account: repositories with
/// their commits, plus the mentorship projects that reference them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub repositories: Vec<RepositoryExport>,
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryExport {
    #[serde(flatten)]
    pub summary: RepositorySummary,
    #[serde(default)]
    pub commits: Vec<CommitRecord>,
    /// Upstream error recorded at export time instead of commits.
    #[serde(default)]
    pub fetch_error: Option<String>,
}

impl Snapshot {
    /// Load a snapshot file, or merge every `.json` file under a directory in
    /// path order.
    ///
    /// Repositories and projects are keyed by name, with later exports
    /// replacing earlier ones. Commits repeated within a repository are kept
    /// once per sha.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PulseError::SnapshotNotFound(path.display().to_string()));
        }
        let files = if path.is_file() {
            vec![path.to_path_buf()]
        } else {
            list_json_files(path)
        };

        let mut merged = Snapshot::default();
        for file in files {
            merged.absorb(read_snapshot(&file)?);
        }
        for repository in &mut merged.repositories {
            repository.dedupe_commits();
        }
        Ok(merged)
    }

    fn absorb(&mut self, part: Snapshot) {
        if self.owner.is_none() {
            self.owner = part.owner;
        }
        for repository in part.repositories {
            match self
                .repositories
                .iter_mut()
                .find(|existing| existing.summary.name == repository.summary.name)
            {
                Some(existing) => {
                    debug!(repository = %repository.summary.name, "later export replaces repository");
                    *existing = repository;
                }
                None => self.repositories.push(repository),
            }
        }
        for project in part.projects {
            match self
                .projects
                .iter_mut()
                .find(|existing| existing.name == project.name)
            {
                Some(existing) => *existing = project,
                None => self.projects.push(project),
            }
        }
    }

    pub fn summaries(&self) -> Vec<RepositorySummary> {
        self.repositories
            .iter()
            .map(|repository| repository.summary.clone())
            .collect()
    }

    /// Repository names, most recently updated first.
    pub fn repository_names(&self) -> Vec<String> {
        let names = self
            .repositories
            .iter()
            .map(|repository| repository.summary.name.clone())
            .collect::<Vec<_>>();
        self.repository_names_in(&names)
    }

    /// `names` without duplicates, most recently updated first. Names the
    /// snapshot does not know sort last, in their given order.
    pub fn repository_names_in(&self, names: &[String]) -> Vec<String> {
        let mut ordered: Vec<(&String, Option<DateTime<Utc>>)> = Vec::new();
        for name in names {
            if ordered.iter().any(|(seen, _)| *seen == name) {
                continue;
            }
            let updated_at = self
                .repositories
                .iter()
                .find(|repository| &repository.summary.name == name)
                .and_then(|repository| repository.summary.updated_at);
            ordered.push((name, updated_at));
        }
        ordered.sort_by_key(|(_, updated_at)| Reverse(*updated_at));
        ordered.into_iter().map(|(name, _)| name.clone()).collect()
    }

    /// The most recently updated project the student belongs to.
    ///
    /// Membership matches logins case-insensitively; projects updated at the
    /// same instant resolve to the lexicographically smallest name.
    pub fn project_for(&self, student: &str) -> Option<&ProjectRecord> {
        self.projects
            .iter()
            .filter(|project| project.has_member(student))
            .max_by(|a, b| {
                a.updated_at
                    .cmp(&b.updated_at)
                    .then_with(|| b.name.cmp(&a.name))
            })
    }

    pub fn into_source(self) -> SnapshotSource {
        SnapshotSource::new(self.repositories)
    }
}

impl RepositoryExport {
    fn dedupe_commits(&mut self) {
        let mut seen = HashSet::new();
        self.commits.retain(|commit| seen.insert(commit.sha.clone()));
    }
}

fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| PulseError::SnapshotParse(format!("{}: {}", path.display(), e)))
}

fn list_json_files(root: &Path) -> Vec<PathBuf> {
    let mut files = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect::<Vec<_>>();
    files.sort();
    files
}

/// Serves commits out of a loaded snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    repositories: HashMap<String, RepositoryExport>,
}

impl SnapshotSource {
    pub fn new(repositories: Vec<RepositoryExport>) -> Self {
        let repositories = repositories
            .into_iter()
            .map(|repository| (repository.summary.name.clone(), repository))
            .collect();
        Self { repositories }
    }
}

impl CommitSource for SnapshotSource {
    fn fetch_commits(&self, query: &CommitQuery) -> std::result::Result<Vec<CommitRecord>, FetchError> {
        let repository = self
            .repositories
            .get(&query.repository)
            .ok_or_else(|| FetchError::NotFound(query.repository.clone()))?;

        if let Some(message) = &repository.fetch_error {
            return Err(classify_error(message));
        }

        let mut commits = repository
            .commits
            .iter()
            .filter(|commit| {
                query
                    .author
                    .as_deref()
                    .map_or(true, |author| commit.is_authored_by(author))
            })
            .cloned()
            .map(|mut commit| {
                if commit.repository.is_empty() {
                    commit.repository = query.repository.clone();
                }
                commit
            })
            .collect::<Vec<_>>();
        // Newest first, undated last, like the hosting API.
        commits.sort_by_key(|commit| Reverse(commit.authored_at()));

        debug!(repository = %query.repository, commits = commits.len(), "served commits from snapshot");
        Ok(commits)
    }
}

fn classify_error(message: &str) -> FetchError {
    let lowered = message.to_lowercase();
    if lowered.contains("rate limit") {
        FetchError::RateLimited(message.to_string())
    } else if lowered.contains("not found") {
        FetchError::NotFound(message.to_string())
    } else {
        FetchError::Upstream(message.to_string())
    }
}
