//! Hardware-key protocol orchestrator.
//!
//! Sequences the four two-phase operations (start/finish for registration
//! and authentication) around the injected crypto engine:
//!
//! 1. `start_*` reads the user's device set, asks the engine for a
//!    challenge, and parks the payload under its request identifier.
//! 2. `finish_*` consumes the pending challenge exactly once, hands it to
//!    the engine with the device response, and applies the credential
//!    update.
//!
//! A finish consumes its challenge regardless of outcome, so no terminal
//! response can be replayed. The clone-detection path deliberately mutates
//! state before failing: the credential carrying the observed counter is
//! recorded first, then [`Error::DeviceCompromised`] is surfaced, so a
//! later attempt with the stale counter is still caught.

use crate::u2f::{
    challenge_repo::ChallengeStore,
    config::U2fConfig,
    device_repo::DeviceRegistry,
    directory::UserDirectory,
    engine::{AuthVerdict, BeginAuth, U2fEngine},
    errors::Error,
    models::{self, DeviceCredential},
};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct U2fService {
    config: U2fConfig,
    engine: Arc<dyn U2fEngine>,
    directory: Arc<dyn UserDirectory>,
    challenges: ChallengeStore,
    devices: DeviceRegistry,
}

impl U2fService {
    /// Create a new service over explicit collaborators. Nothing here is
    /// global: the stores are owned by this instance and mutated by no one
    /// else.
    #[must_use]
    pub fn new(
        config: U2fConfig,
        engine: Arc<dyn U2fEngine>,
        directory: Arc<dyn UserDirectory>,
        challenges: ChallengeStore,
        devices: DeviceRegistry,
    ) -> Self {
        Self {
            config,
            engine,
            directory,
            challenges,
            devices,
        }
    }

    #[must_use]
    pub fn config(&self) -> &U2fConfig {
        &self.config
    }

    /// Read access to the device registry, for callers listing a user's
    /// enrolled keys.
    #[must_use]
    pub fn devices(&self) -> &DeviceRegistry {
        &self.devices
    }

    /// Starts the registration of a new device for a not-yet-enrolled user.
    ///
    /// Returns the serialized challenge payload for the client, unchanged
    /// from the engine.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPassword`] if the password is empty or
    /// contains a disallowed character, [`Error::UserAlreadyExists`] if the
    /// identity directory already knows the username, or an engine/store
    /// error.
    pub async fn start_device_registration(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<String, Error> {
        self.check_password(password)?;

        if self.directory.user_exists(username) {
            return Err(Error::UserAlreadyExists {
                username: username.to_string(),
            });
        }

        let existing = self.devices.devices_for(username).await;
        let challenge = self
            .engine
            .begin_registration(self.config.app_id(), &existing)
            .map_err(Error::EngineRejected)?;

        self.challenges
            .put(&challenge.request_id, challenge.payload.clone())
            .await?;

        debug!("Issued registration challenge for user '{username}'");
        Ok(challenge.payload)
    }

    /// Finishes a device registration.
    ///
    /// Consumes the pending challenge whatever the outcome, then stores the
    /// new credential on success.
    ///
    /// # Errors
    /// Returns [`Error::MalformedResponse`] if the response blob cannot be
    /// parsed, [`Error::UnknownRequestId`] if no pending challenge matches
    /// (stale, replayed, or forged response), or [`Error::EngineRejected`]
    /// if verification fails.
    pub async fn finish_device_registration(
        &self,
        response: &str,
        username: &str,
    ) -> Result<DeviceCredential, Error> {
        let request_id = models::request_id_of(response)?;
        let challenge = self.challenges.take_and_remove(&request_id).await?;

        let credential = self
            .engine
            .complete_registration(&challenge, response)
            .map_err(Error::EngineRejected)?;

        self.devices.upsert(username, credential.clone()).await;
        debug!("Registered device '{}' for user '{username}'", credential.key_handle);
        Ok(credential)
    }

    /// Starts a device authentication over the user's registered set.
    ///
    /// The password is accepted for interface parity but verified by the
    /// identity collaborator, not here.
    ///
    /// # Errors
    /// Returns [`Error::NoEligibleDevices`] if the user has no usable
    /// device, or an engine/store error.
    pub async fn start_device_authentication(
        &self,
        username: &str,
        _password: &SecretString,
    ) -> Result<String, Error> {
        let existing = self.devices.devices_for(username).await;

        let challenge = match self
            .engine
            .begin_authentication(self.config.app_id(), &existing)
            .map_err(Error::EngineRejected)?
        {
            BeginAuth::Challenge(challenge) => challenge,
            BeginAuth::NoEligibleDevices => {
                return Err(Error::NoEligibleDevices {
                    username: username.to_string(),
                });
            }
        };

        self.challenges
            .put(&challenge.request_id, challenge.payload.clone())
            .await?;

        debug!("Issued authentication challenge for user '{username}'");
        Ok(challenge.payload)
    }

    /// Finishes a device authentication.
    ///
    /// On a verified response the advanced-counter credential replaces the
    /// stored one. On clone detection the partially-updated credential is
    /// recorded *before* the error surfaces, so the registry always reflects
    /// the highest counter the server has seen; callers must treat
    /// [`Error::DeviceCompromised`] as "failed, but state changed" and flag
    /// the account rather than retry.
    ///
    /// # Errors
    /// Returns [`Error::MalformedResponse`], [`Error::UnknownRequestId`],
    /// [`Error::DeviceCompromised`], or [`Error::EngineRejected`].
    pub async fn finish_device_authentication(
        &self,
        response: &str,
        username: &str,
    ) -> Result<DeviceCredential, Error> {
        let request_id = models::request_id_of(response)?;
        let challenge = self.challenges.take_and_remove(&request_id).await?;

        let existing = self.devices.devices_for(username).await;
        match self
            .engine
            .complete_authentication(&challenge, response, &existing)
        {
            AuthVerdict::Verified(credential) => {
                self.devices.upsert(username, credential.clone()).await;
                debug!(
                    "Authenticated user '{username}' with device '{}'",
                    credential.key_handle
                );
                Ok(credential)
            }
            AuthVerdict::Compromised(credential) => {
                self.devices.upsert(username, credential.clone()).await;
                warn!(
                    "Device '{}' of user '{username}' failed counter verification; \
                     recorded observed state",
                    credential.key_handle
                );
                Err(Error::DeviceCompromised {
                    username: username.to_string(),
                    credential,
                })
            }
            AuthVerdict::Rejected(reason) => Err(Error::EngineRejected(reason)),
        }
    }

    fn check_password(&self, password: &SecretString) -> Result<(), Error> {
        let password = password.expose_secret();
        let disallowed = self.config.disallowed_characters();

        if password.is_empty() || password.chars().any(|c| disallowed.contains(c)) {
            return Err(Error::InvalidPassword {
                disallowed: disallowed.to_string(),
            });
        }
        Ok(())
    }
}
