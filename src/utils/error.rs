//! The `error` module defines the error taxonomy shared by every broker operation.
//!
//! Authentication and authorization failures are ordinary variants so the
//! transport layer can map each one onto a rejection. "Not found" is never an
//! error here: lookups return `Option`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrokerError {
    /// A request signature did not match its canonical body.
    #[error("bad signature")]
    BadSignature,

    /// The administrative credential was missing or wrong.
    #[error("bad admin key")]
    BadAdminKey,

    /// The target machine is not on the configured allow-list.
    #[error("machine not allowed: {0}")]
    MachineNotAllowed(String),

    /// The shared signing secret is empty.
    #[error("shared secret missing")]
    MissingSecret,

    #[error("canonical encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BrokerError>;
