use crate::types::report::AnalyticsReport;

pub fn to_json(report: &AnalyticsReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
