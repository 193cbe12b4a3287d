use crate::u2f::models::DeviceCredential;
use thiserror::Error;

/// Shared error vocabulary for the four protocol operations.
///
/// Every variant carries the context a caller needs to log or audit the
/// rejection: the username, the offending request identifier, or the
/// credential recorded on the clone-detection path.
#[derive(Debug, Error)]
pub enum Error {
    #[error("password contains disallowed characters ({disallowed})")]
    InvalidPassword { disallowed: String },
    #[error("user '{username}' already exists")]
    UserAlreadyExists { username: String },
    #[error("user '{username}' has no eligible devices")]
    NoEligibleDevices { username: String },
    /// The authenticator's use counter did not advance past the last value
    /// the server observed, indicating the device may have been cloned. The
    /// carried credential reflects the observed counter and has already been
    /// recorded in the device registry.
    #[error("device '{key_handle}' of user '{username}' may be cloned", key_handle = .credential.key_handle)]
    DeviceCompromised {
        username: String,
        credential: DeviceCredential,
    },
    #[error("unknown request id '{request_id}'")]
    UnknownRequestId { request_id: String },
    #[error("duplicate request id '{request_id}'")]
    DuplicateRequestId { request_id: String },
    #[error("malformed device response")]
    MalformedResponse(#[source] serde_json::Error),
    #[error("engine rejected the exchange")]
    EngineRejected(#[source] anyhow::Error),
}
