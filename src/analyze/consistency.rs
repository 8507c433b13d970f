use crate::types::activity::{ConsistencyScore, WeeklyBucket};
use crate::types::config::ConsistencyMode;

/// Highest score a single week can earn.
const SATURATION: u32 = 95;

/// Map one week's commit count to a 0..=100 consistency score.
///
/// Any activity jumps straight to 55, then returns diminish until the score
/// saturates at 95 from 15 commits on. Non-decreasing in `commit_count`.
pub fn week_score(commit_count: u32) -> u8 {
    let score = match commit_count {
        0 => 0,
        1..=5 => 50 + 5 * commit_count,
        6..=15 => 75 + 2 * (commit_count - 5),
        _ => SATURATION,
    };
    score.min(100) as u8
}

pub fn trend(buckets: &[WeeklyBucket]) -> Vec<ConsistencyScore> {
    buckets
        .iter()
        .map(|bucket| ConsistencyScore {
            week_index: bucket.week_index,
            score: week_score(bucket.commit_count),
        })
        .collect()
}

/// Collapse a trend into the single consistency input for progress.
pub fn summarize(trend: &[ConsistencyScore], mode: ConsistencyMode) -> f64 {
    match mode {
        ConsistencyMode::Latest => trend
            .iter()
            .find(|point| point.week_index == 0)
            .map(|point| f64::from(point.score))
            .unwrap_or(0.0),
        ConsistencyMode::Average => {
            if trend.is_empty() {
                return 0.0;
            }
            let total: f64 = trend.iter().map(|point| f64::from(point.score)).sum();
            total / trend.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_match_documented_values() {
        assert_eq!(week_score(0), 0);
        assert_eq!(week_score(1), 55);
        assert_eq!(week_score(5), 75);
        assert_eq!(week_score(6), 77);
        assert_eq!(week_score(15), 95);
        assert_eq!(week_score(16), 95);
        assert_eq!(week_score(500), 95);
    }

    #[test]
    fn score_is_bounded_and_non_decreasing() {
        let mut previous = 0;
        for count in 0..=200 {
            let score = week_score(count);
            assert!(score <= 100);
            assert!(score >= previous, "score dropped at {count}");
            previous = score;
        }
        assert!(week_score(u32::MAX) <= 100);
        assert!(week_score(u32::MAX) >= previous);
    }

    #[test]
    fn summarize_latest_uses_most_recent_week() {
        let buckets = [
            WeeklyBucket {
                week_index: 0,
                commit_count: 9,
            },
            WeeklyBucket {
                week_index: 1,
                commit_count: 0,
            },
        ];
        let points = trend(&buckets);
        assert_eq!(points[0].score, 83);
        assert_eq!(summarize(&points, ConsistencyMode::Latest), 83.0);
        assert_eq!(summarize(&points, ConsistencyMode::Average), 41.5);
    }

    #[test]
    fn summarize_empty_trend_is_zero() {
        assert_eq!(summarize(&[], ConsistencyMode::Latest), 0.0);
        assert_eq!(summarize(&[], ConsistencyMode::Average), 0.0);
    }
}
