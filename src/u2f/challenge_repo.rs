//! Pending-challenge store.
//!
//! Holds the serialized challenge payloads issued by the engine, keyed by
//! their request identifiers, between the start and finish phases of an
//! operation. Consumption is destructive: under a race on the same request
//! identifier exactly one caller takes the payload and every other caller
//! observes [`Error::UnknownRequestId`]. Entries older than the configured
//! TTL are evicted on access and behave as if they were never issued.

use crate::u2f::errors::Error;
use std::{
    collections::HashMap,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

struct PendingChallenge {
    payload: String,
    created_at: Instant,
}

pub struct ChallengeStore {
    ttl: Duration,
    pending: Mutex<HashMap<String, PendingChallenge>>,
}

impl ChallengeStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Park a challenge payload under its engine-issued request identifier.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateRequestId`] if the identifier already has a
    /// live entry. Engine-generated identifiers should never collide, but a
    /// collision must not silently drop an outstanding challenge.
    pub async fn put(&self, request_id: &str, payload: String) -> Result<(), Error> {
        let mut pending = self.pending.lock().await;
        prune(&mut pending, self.ttl);

        if pending.contains_key(request_id) {
            return Err(Error::DuplicateRequestId {
                request_id: request_id.to_string(),
            });
        }

        pending.insert(
            request_id.to_string(),
            PendingChallenge {
                payload,
                created_at: Instant::now(),
            },
        );
        Ok(())
    }

    /// Consume the challenge for a request identifier, removing it.
    ///
    /// # Errors
    /// Returns [`Error::UnknownRequestId`] if there is no live entry: never
    /// issued, already consumed, or expired.
    pub async fn take_and_remove(&self, request_id: &str) -> Result<String, Error> {
        let mut pending = self.pending.lock().await;
        prune(&mut pending, self.ttl);

        pending
            .remove(request_id)
            .map(|entry| entry.payload)
            .ok_or_else(|| Error::UnknownRequestId {
                request_id: request_id.to_string(),
            })
    }

    /// Number of live entries, for diagnostics.
    pub async fn pending_count(&self) -> usize {
        let mut pending = self.pending.lock().await;
        prune(&mut pending, self.ttl);
        pending.len()
    }
}

fn prune(pending: &mut HashMap<String, PendingChallenge>, ttl: Duration) {
    pending.retain(|_, entry| entry.created_at.elapsed() < ttl);
}
