//! Staleness policy for cached snapshots

use chrono::{DateTime, Days, Utc};

/// Number of calendar days a snapshot stays valid
pub const MAX_CACHE_AGE_DAYS: u64 = 7;

pub struct FeedCachePolicy;

impl FeedCachePolicy {
    /// Whether a snapshot taken at `timestamp` is still valid at `now`
    ///
    /// Valid strictly before `timestamp + MAX_CACHE_AGE_DAYS`; the boundary
    /// itself is already stale.
    pub fn validate(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match timestamp.checked_add_days(Days::new(MAX_CACHE_AGE_DAYS)) {
            Some(max_age) => now < max_age,
            None => false,
        }
    }
}
