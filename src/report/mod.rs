pub mod json;
pub mod md;

use crate::error::PulseError;
use crate::types::report::AnalyticsReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &AnalyticsReport, format: OutputFormat) -> Result<String, PulseError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(PulseError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}
