//! The `auth` module binds every message exchange to the shared secret.
//!
//! - `canonical`: the deterministic byte form that gets signed.
//! - `signer`: HMAC-SHA256 signing and constant-time verification.
//! - `policy`: the admin credential and machine allow-list checks.

pub mod canonical;
pub mod policy;
pub mod signer;

pub use canonical::canonical_bytes;
pub use policy::AccessPolicy;
pub use signer::Signer;

#[cfg(test)]
mod tests;
