//! Per-client fixed window rate limiting.
//!
//! Each client identity owns a counter and the instant its current window
//! opened. Every request that reaches the limiter bumps the counter, denied or
//! not; once `max_requests` is exceeded the client is turned away until the
//! window closes.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use super::client::ClientIdentity;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("The rate limit window must be longer than zero")]
    ZeroWindow,
    #[error("The rate limit must admit at least one request per window")]
    ZeroQuota,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allow,
    Deny { retry_after: Duration },
}

#[derive(Debug)]
struct ClientWindow {
    count: u32,
    started_at: Instant,
}

#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    clients: DashMap<ClientIdentity, ClientWindow>,
    last_purge: Mutex<Instant>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Result<Self, RateLimitError> {
        if window.is_zero() {
            return Err(RateLimitError::ZeroWindow);
        }
        if max_requests == 0 {
            return Err(RateLimitError::ZeroQuota);
        }
        Ok(Self {
            max_requests,
            window,
            clients: DashMap::new(),
            last_purge: Mutex::new(Instant::now()),
        })
    }

    pub fn check(&self, client: &ClientIdentity) -> RateLimitDecision {
        self.check_at(client, Instant::now())
    }

    /// Counts one request from `client` at `now` and decides whether it may proceed.
    pub fn check_at(&self, client: &ClientIdentity, now: Instant) -> RateLimitDecision {
        self.purge_if_due(now);

        // The shard lock is held until `entry` drops, so concurrent requests from
        // one client are counted one at a time.
        let mut entry = self
            .clients
            .entry(client.clone())
            .or_insert_with(|| ClientWindow {
                count: 0,
                started_at: now,
            });
        let window = entry.value_mut();

        if now.saturating_duration_since(window.started_at) >= self.window {
            window.count = 0;
            window.started_at = now;
        }
        window.count = window.count.saturating_add(1);

        if window.count <= self.max_requests {
            RateLimitDecision::Allow
        } else {
            let retry_after = (window.started_at + self.window).saturating_duration_since(now);
            drop(entry);
            tracing::debug!(
                client = %client,
                retry_after_seconds = retry_after.as_secs(),
                "Rate limit exceeded"
            );
            RateLimitDecision::Deny { retry_after }
        }
    }

    /// Drops every client whose window has closed.
    pub fn purge_expired(&self, now: Instant) {
        self.clients
            .retain(|_, window| now.saturating_duration_since(window.started_at) < self.window);
    }

    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }

    fn purge_if_due(&self, now: Instant) {
        // Whoever holds the lock does the sweep, everyone else skips it.
        let Ok(mut last_purge) = self.last_purge.try_lock() else {
            return;
        };
        if now.saturating_duration_since(*last_purge) < self.window {
            return;
        }
        *last_purge = now;
        self.purge_expired(now);
    }
}
