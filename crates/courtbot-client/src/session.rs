//! Login session cache with TTL-bounded reuse.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use courtbot_core::{Credential, Result};
use tracing::debug;

use crate::transport::{CourtSite, SiteSession};

struct CachedSession {
    session: SiteSession,
    established: Instant,
}

/// Hands out authenticated sessions, reusing cached ones until their TTL
/// lapses. Expired entries are evicted lazily on lookup. A failed stage
/// or confirm step should [`invalidate`](Self::invalidate) the entry so
/// the next attempt starts from a fresh handshake.
pub struct SessionAuthenticator {
    site: Arc<dyn CourtSite>,
    ttl: Duration,
    cache: HashMap<String, CachedSession>,
}

impl SessionAuthenticator {
    pub fn new(site: Arc<dyn CourtSite>, ttl: Duration) -> Self {
        Self {
            site,
            ttl,
            cache: HashMap::new(),
        }
    }

    /// A session for `credential`: cached when still fresh, otherwise via
    /// a new login handshake.
    pub async fn session_for(&mut self, credential: &Credential) -> Result<SiteSession> {
        if let Some(cached) = self.cache.get(&credential.username) {
            if !is_expired(cached.established.elapsed(), self.ttl) {
                debug!(username = %credential.username, "reusing cached session");
                return Ok(cached.session.clone());
            }
            debug!(username = %credential.username, "cached session expired");
            self.cache.remove(&credential.username);
        }

        let session = self.site.login(credential).await?;
        self.cache.insert(
            credential.username.clone(),
            CachedSession {
                session: session.clone(),
                established: Instant::now(),
            },
        );
        Ok(session)
    }

    /// Drop the cached session for `username`, forcing the next request
    /// through a fresh login.
    pub fn invalidate(&mut self, username: &str) {
        self.cache.remove(username);
    }
}

fn is_expired(age: Duration, ttl: Duration) -> bool {
    age >= ttl
}
