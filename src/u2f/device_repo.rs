//! Per-user device credential registry.
//!
//! Keeps each username's set of registered credentials keyed by key handle.
//! Absence of a user is not an error: user existence is the identity
//! collaborator's concern, so an unknown username simply has an empty set.
//! Deletion is likewise a collaborator's responsibility and has no
//! operation here.

use crate::u2f::models::DeviceCredential;
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct DeviceRegistry {
    devices: Mutex<HashMap<String, HashMap<String, DeviceCredential>>>,
}

impl DeviceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All credentials registered for a user, empty for an unknown user.
    pub async fn devices_for(&self, username: &str) -> Vec<DeviceCredential> {
        let devices = self.devices.lock().await;
        devices
            .get(username)
            .map(|set| set.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Insert or replace the credential for (username, key handle).
    ///
    /// Upserting the same key handle replaces the stored state wholesale;
    /// this is how counter advances and clone-detection updates land.
    pub async fn upsert(&self, username: &str, credential: DeviceCredential) {
        let mut devices = self.devices.lock().await;
        devices
            .entry(username.to_string())
            .or_default()
            .insert(credential.key_handle.clone(), credential);
    }
}
