use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyContribution {
    pub week: String,
    pub commits: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsistencyPoint {
    pub week: String,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageShare {
    pub language: String,
    pub percentage: u8,
}

/// How much real signal backs a report.
///
/// `None` lets the dashboard fall back to placeholder data instead of
/// treating an all-zero result as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    None,
    Partial,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub weekly_contributions: Vec<WeeklyContribution>,
    pub consistency_trend: Vec<ConsistencyPoint>,
    pub language_distribution: Vec<LanguageShare>,
    pub progress: u8,
    pub signal: Signal,
    pub failed_repositories: Vec<String>,
}

impl AnalyticsReport {
    pub fn is_empty(&self) -> bool {
        matches!(self.signal, Signal::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_with_camel_case_keys() {
        let report = AnalyticsReport {
            weekly_contributions: vec![WeeklyContribution {
                week: "Week 1".to_string(),
                commits: 2,
            }],
            consistency_trend: vec![],
            language_distribution: vec![],
            progress: 12,
            signal: Signal::Partial,
            failed_repositories: vec!["api".to_string()],
        };

        let value = serde_json::to_value(&report).expect("report should serialize");
        assert_eq!(value["weeklyContributions"][0]["week"], "Week 1");
        assert_eq!(value["failedRepositories"][0], "api");
        assert_eq!(value["signal"], "partial");
        assert!(value.get("consistencyTrend").is_some());
        assert!(value.get("languageDistribution").is_some());
    }
}
