//! The crypto-engine capability boundary.
//!
//! The engine owns the elliptic-curve challenge-response protocol: it mints
//! challenges, verifies signatures and attestation, derives key handles, and
//! detects counter rollback. This crate treats all of that as opaque and
//! only sequences the exchanges, so the engine surface is a trait injected
//! into [`crate::u2f::U2fService`] at construction time.

use crate::u2f::models::{Challenge, DeviceCredential};
use anyhow::Result;

/// Outcome of starting an authentication over a user's device set.
#[derive(Debug)]
pub enum BeginAuth {
    Challenge(Challenge),
    /// No registered device can take part in the exchange (the set is empty
    /// or every credential is unusable).
    NoEligibleDevices,
}

/// Outcome of completing an authentication exchange.
///
/// `Compromised` is a verdict, not a plain error: the engine hands back the
/// credential with the counter it observed so the orchestrator can record it
/// before surfacing the failure.
#[derive(Debug)]
pub enum AuthVerdict {
    Verified(DeviceCredential),
    Compromised(DeviceCredential),
    Rejected(anyhow::Error),
}

/// Opaque challenge-response engine.
///
/// Challenge and response payloads are serialized blobs in the engine's wire
/// format (for example standard U2F registration and authentication
/// messages); the orchestrator stores and forwards them unchanged.
pub trait U2fEngine: Send + Sync {
    /// Mint a registration challenge scoped to `app_id`, excluding devices
    /// the user already enrolled.
    ///
    /// # Errors
    /// Returns error if the engine cannot produce a challenge.
    fn begin_registration(
        &self,
        app_id: &str,
        existing_devices: &[DeviceCredential],
    ) -> Result<Challenge>;

    /// Verify a registration response against its challenge and derive the
    /// new device credential.
    ///
    /// # Errors
    /// Returns error if signature or attestation verification fails.
    fn complete_registration(
        &self,
        challenge_payload: &str,
        response: &str,
    ) -> Result<DeviceCredential>;

    /// Mint an authentication challenge over exactly the given device set.
    ///
    /// # Errors
    /// Returns error if the engine cannot produce a challenge; ineligibility
    /// is reported through [`BeginAuth::NoEligibleDevices`], not an error.
    fn begin_authentication(
        &self,
        app_id: &str,
        existing_devices: &[DeviceCredential],
    ) -> Result<BeginAuth>;

    /// Verify an authentication response against its challenge and the
    /// user's current device set.
    fn complete_authentication(
        &self,
        challenge_payload: &str,
        response: &str,
        existing_devices: &[DeviceCredential],
    ) -> AuthVerdict;
}
