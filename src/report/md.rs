use crate::types::report::{AnalyticsReport, Signal};

pub fn to_markdown(report: &AnalyticsReport) -> String {
    let mut output = String::new();
    output.push_str("# Activity Report\n\n");
    output.push_str(&format!("Progress: {}/100\n\n", report.progress));
    if matches!(report.signal, Signal::None) {
        output.push_str("_No activity recorded yet._\n\n");
    }

    output.push_str("## Weekly Contributions\n\n");
    output.push_str("| Week | Commits | Consistency |\n|---|---|---|\n");
    for (week, point) in report
        .weekly_contributions
        .iter()
        .zip(&report.consistency_trend)
    {
        output.push_str(&format!(
            "| {} | {} | {} |\n",
            week.week, week.commits, point.score
        ));
    }
    output.push('\n');

    output.push_str("## Languages\n\n");
    if report.language_distribution.is_empty() {
        output.push_str("- none\n");
    } else {
        for share in &report.language_distribution {
            output.push_str(&format!("- {}: {}%\n", share.language, share.percentage));
        }
    }

    if !report.failed_repositories.is_empty() {
        output.push_str("\n## Unavailable Repositories\n\n");
        for repository in &report.failed_repositories {
            output.push_str(&format!("- {repository}\n"));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::report::{ConsistencyPoint, WeeklyContribution};

    #[test]
    fn markdown_report_contains_sections() {
        let report = AnalyticsReport {
            weekly_contributions: vec![WeeklyContribution {
                week: "Week 1".to_string(),
                commits: 4,
            }],
            consistency_trend: vec![ConsistencyPoint {
                week: "Week 1".to_string(),
                score: 70,
            }],
            language_distribution: vec![],
            progress: 37,
            signal: Signal::Partial,
            failed_repositories: vec!["web".to_string()],
        };

        let rendered = to_markdown(&report);
        assert!(rendered.contains("Progress: 37/100"));
        assert!(rendered.contains("| Week 1 | 4 | 70 |"));
        assert!(rendered.contains("## Unavailable Repositories"));
        assert!(rendered.contains("- web"));
    }

    #[test]
    fn markdown_flags_empty_reports() {
        let report = AnalyticsReport {
            weekly_contributions: vec![],
            consistency_trend: vec![],
            language_distribution: vec![],
            progress: 0,
            signal: Signal::None,
            failed_repositories: vec![],
        };
        assert!(to_markdown(&report).contains("No activity recorded yet"));
    }
}
