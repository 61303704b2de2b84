//! Successful-booking records, used to keep one account from holding two
//! slots for the same day.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use courtbot_core::DaySelector;

/// Remembers which (account, day) pairs already hold a confirmed booking.
/// Records expire after the TTL; expired entries are dropped lazily when
/// new records are written.
pub struct AttemptStore {
    ttl: Duration,
    records: HashMap<(String, DaySelector), Instant>,
}

impl AttemptStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            records: HashMap::new(),
        }
    }

    /// True when `username` already holds a live booking record for `day`.
    pub fn is_recorded(&self, username: &str, day: DaySelector) -> bool {
        self.records
            .get(&(username.to_string(), day))
            .is_some_and(|created| created.elapsed() < self.ttl)
    }

    /// Record a confirmed booking for (`username`, `day`).
    pub fn record(&mut self, username: &str, day: DaySelector) {
        self.purge_expired();
        self.records.insert((username.to_string(), day), Instant::now());
    }

    fn purge_expired(&mut self) {
        let ttl = self.ttl;
        self.records.retain(|_, created| created.elapsed() < ttl);
    }
}
