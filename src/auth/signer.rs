use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

use crate::auth::canonical::canonical_bytes;
use crate::utils::{BrokerError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Computes and checks HMAC-SHA256 tags keyed by the shared secret.
///
/// Tags are lowercase hex, 64 characters long.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha256,
}

impl Signer {
    pub fn new(secret: &str) -> Result<Self> {
        if secret.is_empty() {
            return Err(BrokerError::MissingSecret);
        }
        let mac =
            HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| BrokerError::MissingSecret)?;
        Ok(Self { mac })
    }

    /// Signs the exact bytes given.
    pub fn sign(&self, bytes: &[u8]) -> String {
        let mut mac = self.mac.clone();
        mac.update(bytes);
        hex::encode(mac.finalize().into_bytes())
    }

    /// Checks `tag` against the bytes in constant time.
    ///
    /// A tag that is not valid hex fails verification.
    pub fn verify(&self, bytes: &[u8], tag: &str) -> bool {
        let Ok(expected) = hex::decode(tag) else {
            return false;
        };
        let mut mac = self.mac.clone();
        mac.update(bytes);
        mac.verify_slice(&expected).is_ok()
    }

    /// Signs the canonical encoding of a message.
    pub fn sign_message<T: Serialize>(&self, message: &T) -> Result<String> {
        Ok(self.sign(&canonical_bytes(message)?))
    }

    /// Signs a raw JSON body as it would be sent to `/poll` or `/ack`.
    ///
    /// The body is parsed and canonicalized first, so key order and
    /// whitespace in `body` do not matter. Defaulted fields must be present.
    pub fn sign_json(&self, body: &str) -> Result<String> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        self.sign_message(&value)
    }

    /// Verifies a tag over the canonical encoding of a message.
    pub fn verify_message<T: Serialize>(&self, message: &T, tag: &str) -> Result<()> {
        if self.verify(&canonical_bytes(message)?, tag) {
            Ok(())
        } else {
            Err(BrokerError::BadSignature)
        }
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer").field("key", &"<redacted>").finish()
    }
}
