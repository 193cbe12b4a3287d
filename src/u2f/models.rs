use crate::u2f::errors::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered device credential belonging to exactly one user.
///
/// The key handle identifies the physical authenticator within the user's
/// device set. The credential state (public key material and use counter) is
/// serialized by the engine and opaque to this crate; it is replaced
/// wholesale whenever the engine reports an updated credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCredential {
    pub key_handle: String,
    pub state: String,
}

impl fmt::Display for DeviceCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeviceCredential(key_handle={})", self.key_handle)
    }
}

/// An engine-issued challenge: the correlation identifier plus the
/// serialized payload the client device must sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub request_id: String,
    pub payload: String,
}

#[derive(Deserialize)]
struct ResponseEnvelope {
    #[serde(rename = "requestId")]
    request_id: String,
}

/// Extract the request identifier from an opaque device response.
///
/// Responses are engine-defined JSON blobs; the only field this crate reads
/// is the `requestId` correlation token.
///
/// # Errors
/// Returns [`Error::MalformedResponse`] if the blob is not JSON or lacks a
/// `requestId` field.
pub fn request_id_of(response: &str) -> Result<String, Error> {
    let envelope: ResponseEnvelope =
        serde_json::from_str(response).map_err(Error::MalformedResponse)?;
    Ok(envelope.request_id)
}
