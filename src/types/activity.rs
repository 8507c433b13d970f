use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single commit as reported by the upstream hosting API.
///
/// `authored_at` stays the raw ISO-8601 string so that a missing or malformed
/// timestamp drops only that commit during bucketing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub sha: String,
    #[serde(default)]
    pub authored_at: Option<String>,
    #[serde(default)]
    pub repository: String,
    #[serde(default)]
    pub author: Option<String>,
}

impl CommitRecord {
    pub fn authored_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.authored_at.as_deref()?.trim();
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }

    pub fn is_authored_by(&self, login: &str) -> bool {
        self.author
            .as_deref()
            .is_some_and(|author| author.eq_ignore_ascii_case(login.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    #[serde(default)]
    pub primary_language: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RepositorySummary {
    /// Blank language strings count as "no detected language".
    pub fn language(&self) -> Option<&str> {
        self.primary_language
            .as_deref()
            .map(str::trim)
            .filter(|language| !language.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub repositories: Vec<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProjectRecord {
    pub fn has_member(&self, login: &str) -> bool {
        let login = login.trim();
        self.members
            .iter()
            .any(|member| member.trim().eq_ignore_ascii_case(login))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyBucket {
    /// 0 is the most recent seven days.
    pub week_index: usize,
    pub commit_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsistencyScore {
    pub week_index: usize,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProficiency {
    pub language: String,
    pub proficiency: u8,
}

/// Label shown for a bucket, counting from the oldest week in the window.
pub fn week_label(window: usize, week_index: usize) -> String {
    format!("Week {}", window.saturating_sub(week_index))
}
