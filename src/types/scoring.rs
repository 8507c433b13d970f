pub type Score = f64;

/// Sub-scores feeding the progress blend, each already clamped to 0..=100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressBreakdown {
    pub commits: Score,
    pub recent: Score,
    pub consistency: Score,
    pub overall: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressWeights {
    pub commits: Score,
    pub recent: Score,
    pub consistency: Score,
}

impl Default for ProgressWeights {
    fn default() -> Self {
        Self {
            commits: 0.4,
            recent: 0.3,
            consistency: 0.3,
        }
    }
}

impl ProgressBreakdown {
    pub fn new(commits: Score, recent: Score, consistency: Score) -> Self {
        Self {
            commits: clamp_score(commits),
            recent: clamp_score(recent),
            consistency: clamp_score(consistency),
            overall: 0,
        }
    }

    pub fn finalize(mut self, weights: &ProgressWeights) -> Self {
        let blended = self.commits * weights.commits
            + self.recent * weights.recent
            + self.consistency * weights.consistency;
        self.overall = to_percent(blended);
        self
    }
}

/// Clamp to 0..=100, mapping NaN to zero.
pub fn clamp_score(value: Score) -> Score {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

pub fn to_percent(value: Score) -> u8 {
    clamp_score(value).round() as u8
}
