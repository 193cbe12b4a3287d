//! # fikey (Hardware-Key Second Factor Core)
//!
//! `fikey` is the enrollment and authentication core for hardware security
//! keys used as a second factor. It sequences the two-phase U2F-style
//! protocol (start/finish for registration and authentication), correlates
//! asynchronous device responses to pending challenges through opaque
//! request identifiers, and keeps each user's set of registered device
//! credentials consistent — including on the clone-detection failure path,
//! where a rejected authentication still records the observed counter.
//!
//! The cryptographic engine that mints and verifies challenges, the
//! persistence backend, and the identity directory are all collaborators
//! injected at construction time; this crate owns only the orchestration:
//!
//! 1. `start_*` asks the engine for a challenge and parks it under its
//!    engine-issued request identifier.
//! 2. `finish_*` consumes the pending challenge exactly once, hands it to
//!    the engine together with the device response, and applies the
//!    resulting credential update.
//!
//! Pending challenges carry a TTL and are evicted on access, so a start
//! without a matching finish cannot grow the store without bound.

pub mod u2f;

pub use u2f::{
    AuthVerdict, BeginAuth, Challenge, ChallengeStore, DeviceCredential, DeviceRegistry, Error,
    MemoryUserDirectory, U2fConfig, U2fEngine, U2fService, UserDirectory,
};
