//! Canonical byte encoding for signed messages.
//!
//! Every signed message is encoded with the JSON Canonicalization Scheme
//! (RFC 8785): object keys sorted at every level, no whitespace, ECMAScript
//! number formatting. Signer and verifier must both use this encoding, in
//! any language, or no signature will ever match.

use serde::Serialize;

use crate::utils::Result;

/// Encodes `value` into its canonical signing bytes.
pub fn canonical_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_jcs::to_vec(value)?)
}
