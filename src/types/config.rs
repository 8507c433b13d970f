use crate::error::PulseError;
use crate::types::scoring::ProgressWeights;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PulseConfig {
    pub window: Option<WindowConfig>,
    pub scoring: Option<ScoringConfig>,
    pub fetch: Option<FetchConfig>,
    pub languages: Option<LanguagesConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    pub weeks: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyMode {
    #[default]
    Latest,
    Average,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub commit_target: Option<f64>,
    pub recent_target: Option<f64>,
    pub consistency: Option<ConsistencyMode>,
    pub weights: Option<HashMap<String, f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    pub repo_cap: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub commit_sample: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguagesConfig {
    pub top: Option<usize>,
}

/// Fully resolved knobs for one scoring run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringSettings {
    pub weeks: usize,
    pub commit_target: f64,
    pub recent_target: f64,
    pub consistency_mode: ConsistencyMode,
    pub weights: ProgressWeights,
    pub repo_cap: usize,
    pub fetch_timeout: Duration,
    pub commit_sample: usize,
    pub top_languages: usize,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weeks: 4,
            commit_target: 50.0,
            recent_target: 10.0,
            consistency_mode: ConsistencyMode::Latest,
            weights: ProgressWeights::default(),
            repo_cap: 10,
            fetch_timeout: Duration::from_secs(10),
            commit_sample: 100,
            top_languages: 5,
        }
    }
}

const MAX_WINDOW_WEEKS: usize = 52;
const ALLOWED_WEIGHT_KEYS: [&str; 3] = ["commits", "recent", "consistency"];

impl PulseConfig {
    pub fn weights(&self) -> ProgressWeights {
        let defaults = ProgressWeights::default();
        match self
            .scoring
            .as_ref()
            .and_then(|scoring| scoring.weights.as_ref())
        {
            Some(weights) => ProgressWeights {
                commits: *weights.get("commits").unwrap_or(&defaults.commits),
                recent: *weights.get("recent").unwrap_or(&defaults.recent),
                consistency: *weights.get("consistency").unwrap_or(&defaults.consistency),
            },
            None => defaults,
        }
    }

    pub fn settings(&self) -> ScoringSettings {
        let defaults = ScoringSettings::default();
        let scoring = self.scoring.as_ref();
        let fetch = self.fetch.as_ref();
        ScoringSettings {
            weeks: self
                .window
                .as_ref()
                .and_then(|window| window.weeks)
                .unwrap_or(defaults.weeks),
            commit_target: scoring
                .and_then(|scoring| scoring.commit_target)
                .unwrap_or(defaults.commit_target),
            recent_target: scoring
                .and_then(|scoring| scoring.recent_target)
                .unwrap_or(defaults.recent_target),
            consistency_mode: scoring
                .and_then(|scoring| scoring.consistency)
                .unwrap_or(defaults.consistency_mode),
            weights: self.weights(),
            repo_cap: fetch
                .and_then(|fetch| fetch.repo_cap)
                .unwrap_or(defaults.repo_cap),
            fetch_timeout: fetch
                .and_then(|fetch| fetch.timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(defaults.fetch_timeout),
            commit_sample: fetch
                .and_then(|fetch| fetch.commit_sample)
                .unwrap_or(defaults.commit_sample),
            top_languages: self
                .languages
                .as_ref()
                .and_then(|languages| languages.top)
                .unwrap_or(defaults.top_languages),
        }
    }

    pub fn validate(&self) -> Result<(), PulseError> {
        let settings = self.settings();

        if settings.weeks == 0 || settings.weeks > MAX_WINDOW_WEEKS {
            return Err(PulseError::ConfigParse(format!(
                "window.weeks must be between 1 and {MAX_WINDOW_WEEKS}"
            )));
        }

        if let Some(weights) = self
            .scoring
            .as_ref()
            .and_then(|scoring| scoring.weights.as_ref())
        {
            let mut unknown = weights
                .keys()
                .filter(|key| !ALLOWED_WEIGHT_KEYS.contains(&key.as_str()))
                .cloned()
                .collect::<Vec<_>>();
            if !unknown.is_empty() {
                unknown.sort();
                return Err(PulseError::ConfigParse(format!(
                    "scoring.weights contains unknown key(s): {}",
                    unknown.join(", ")
                )));
            }
        }

        let weights = settings.weights;
        let values = [weights.commits, weights.recent, weights.consistency];
        if values.iter().any(|weight| !(0.0..=1.0).contains(weight)) {
            return Err(PulseError::ConfigParse(
                "scoring.weights values must be between 0.0 and 1.0".to_string(),
            ));
        }
        let weight_sum: f64 = values.iter().sum();
        if (weight_sum - 1.0).abs() > 0.001 {
            return Err(PulseError::ConfigParse(format!(
                "scoring.weights must sum to 1.0 (found {:.3})",
                weight_sum
            )));
        }

        // NaN fails both comparisons, so test for the positive case.
        if !(settings.commit_target > 0.0) {
            return Err(PulseError::ConfigParse(
                "scoring.commit_target must be greater than 0".to_string(),
            ));
        }
        if !(settings.recent_target > 0.0) {
            return Err(PulseError::ConfigParse(
                "scoring.recent_target must be greater than 0".to_string(),
            ));
        }

        if settings.repo_cap == 0 {
            return Err(PulseError::ConfigParse(
                "fetch.repo_cap must be greater than 0".to_string(),
            ));
        }
        if settings.fetch_timeout.is_zero() {
            return Err(PulseError::ConfigParse(
                "fetch.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if settings.commit_sample == 0 {
            return Err(PulseError::ConfigParse(
                "fetch.commit_sample must be greater than 0".to_string(),
            ));
        }
        if settings.top_languages == 0 {
            return Err(PulseError::ConfigParse(
                "languages.top must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
