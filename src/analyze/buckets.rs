use crate::types::activity::{CommitRecord, WeeklyBucket};
use chrono::{DateTime, Utc};
use tracing::debug;

const SECONDS_PER_WEEK: i64 = 7 * 86_400;

/// Group commits into `window` trailing seven-day buckets ending at `now`.
///
/// Always returns exactly `window` buckets indexed `0..window`, with index 0
/// being the most recent week. Commits outside the window, in the future, or
/// without a parseable timestamp are ignored.
pub fn bucketize(commits: &[CommitRecord], window: usize, now: DateTime<Utc>) -> Vec<WeeklyBucket> {
    let mut buckets = (0..window)
        .map(|week_index| WeeklyBucket {
            week_index,
            commit_count: 0,
        })
        .collect::<Vec<_>>();

    for commit in commits {
        let Some(authored_at) = commit.authored_at() else {
            debug!(sha = %commit.sha, "skipping commit without a valid timestamp");
            continue;
        };
        let Some(index) = week_index(authored_at, now) else {
            continue;
        };
        if let Some(bucket) = buckets.get_mut(index) {
            bucket.commit_count = bucket.commit_count.saturating_add(1);
        }
    }

    buckets
}

fn week_index(authored_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<usize> {
    let age = now.signed_duration_since(authored_at).num_seconds();
    if age < 0 {
        return None;
    }
    usize::try_from(age / SECONDS_PER_WEEK).ok()
}

/// Commits that landed in the most recent week.
pub fn recent_count(buckets: &[WeeklyBucket]) -> u32 {
    buckets
        .iter()
        .find(|bucket| bucket.week_index == 0)
        .map(|bucket| bucket.commit_count)
        .unwrap_or(0)
}

/// Element-wise sum of equally sized bucket lists.
pub fn merge(target: &mut [WeeklyBucket], other: &[WeeklyBucket]) {
    for (slot, bucket) in target.iter_mut().zip(other) {
        slot.commit_count = slot.commit_count.saturating_add(bucket.commit_count);
    }
}
