//! Quota guards for rate-limited upstreams.

use std::sync::Mutex;

use chrono::{NaiveDate, Utc};

use crate::traits::QuotaGuard;

/// A guard that never refuses.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unlimited;

impl QuotaGuard for Unlimited {
    fn check_quota(&self) -> bool {
        true
    }

    fn increment_quota(&self) {}
}

/// In-memory daily call counter, keyed by UTC calendar day.
///
/// The count resets the first time it is touched on a new day. Share one
/// instance (by reference or `Arc`) across requests to enforce a process-wide
/// limit; `try_acquire` checks and counts under a single lock, so concurrent
/// requests never overshoot it.
pub struct DailyQuota {
    limit: u32,
    today: fn() -> NaiveDate,
    state: Mutex<(NaiveDate, u32)>,
}

impl DailyQuota {
    pub fn new(limit: u32) -> Self {
        Self::with_clock(limit, utc_today)
    }

    pub fn with_clock(limit: u32, today: fn() -> NaiveDate) -> Self {
        Self {
            limit,
            today,
            state: Mutex::new((today(), 0)),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Calls recorded today.
    pub fn used(&self) -> u32 {
        self.with_state(|count| *count)
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut u32) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let today = (self.today)();
        if state.0 != today {
            *state = (today, 0);
        }
        f(&mut state.1)
    }
}

impl std::fmt::Debug for DailyQuota {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DailyQuota")
            .field("limit", &self.limit)
            .field("used", &self.used())
            .finish()
    }
}

impl QuotaGuard for DailyQuota {
    fn check_quota(&self) -> bool {
        self.with_state(|count| *count < self.limit)
    }

    fn increment_quota(&self) {
        self.with_state(|count| *count = count.saturating_add(1));
    }

    fn try_acquire(&self) -> bool {
        self.with_state(|count| {
            let allowed = *count < self.limit;
            if allowed {
                *count += 1;
            }
            allowed
        })
    }

    fn limit(&self) -> Option<u32> {
        Some(self.limit)
    }
}

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}
