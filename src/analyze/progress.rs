use crate::types::config::ScoringSettings;
use crate::types::scoring::{ProgressBreakdown, Score};

/// Inputs gathered across every repository that fetched successfully.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActivityTotals {
    pub total_commits: u64,
    pub recent_commits: u64,
    pub consistency: Score,
}

pub fn progress(totals: &ActivityTotals, settings: &ScoringSettings) -> ProgressBreakdown {
    let commits = ratio_score(totals.total_commits, settings.commit_target);
    let recent = ratio_score(totals.recent_commits, settings.recent_target);
    ProgressBreakdown::new(commits, recent, totals.consistency).finalize(&settings.weights)
}

/// `count / target * 100`, capped at 100. A non-positive target yields 0.
fn ratio_score(count: u64, target: f64) -> Score {
    if !(target > 0.0) {
        return 0.0;
    }
    (count as f64 / target * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(total: u64, recent: u64, consistency: Score) -> ActivityTotals {
        ActivityTotals {
            total_commits: total,
            recent_commits: recent,
            consistency,
        }
    }

    #[test]
    fn capped_sub_scores_blend_to_ninety_five() {
        let breakdown = progress(&totals(60, 12, 83.0), &ScoringSettings::default());
        assert_eq!(breakdown.commits, 100.0);
        assert_eq!(breakdown.recent, 100.0);
        assert_eq!(breakdown.overall, 95);
    }

    #[test]
    fn no_activity_is_zero() {
        let breakdown = progress(&ActivityTotals::default(), &ScoringSettings::default());
        assert_eq!(breakdown.overall, 0);
    }

    #[test]
    fn partial_volume_scales_linearly() {
        // 25/50 -> 50, 5/10 -> 50, consistency 80
        let breakdown = progress(&totals(25, 5, 80.0), &ScoringSettings::default());
        assert_eq!(breakdown.commits, 50.0);
        assert_eq!(breakdown.recent, 50.0);
        assert_eq!(breakdown.overall, 59);
    }

    #[test]
    fn output_stays_bounded_for_extreme_inputs() {
        for (total, recent, consistency) in [
            (u64::MAX, u64::MAX, 100.0),
            (0, u64::MAX, 0.0),
            (u64::MAX, 0, 250.0),
            (3, 1, -10.0),
        ] {
            let breakdown = progress(
                &totals(total, recent, consistency),
                &ScoringSettings::default(),
            );
            assert!(breakdown.overall <= 100);
        }
    }

    #[test]
    fn zero_target_short_circuits_to_zero() {
        let settings = ScoringSettings {
            commit_target: 0.0,
            ..ScoringSettings::default()
        };
        let breakdown = progress(&totals(40, 0, 0.0), &settings);
        assert_eq!(breakdown.commits, 0.0);
        assert_eq!(breakdown.overall, 0);
    }
}
