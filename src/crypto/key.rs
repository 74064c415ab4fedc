//! Process-wide encryption key handling
//!
//! The key protecting sensitive fields at rest is supplied as a 64-character
//! hex string through the `ELOAN_ENCRYPTION_KEY` environment variable and
//! decoded exactly once at startup. A missing or malformed key is fatal
//! before any command runs, since every later encrypt/decrypt would be
//! meaningless without it.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use std::fmt;
use zeroize::Zeroize;

use crate::error::{LoanError, LoanResult};

/// Key length in bytes (AES-256)
pub const KEY_LENGTH: usize = 32;

/// Environment variable supplying the hex-encoded key
pub const ENCRYPTION_KEY_ENV: &str = "ELOAN_ENCRYPTION_KEY";

/// The 256-bit key used by the field cipher
///
/// Read-only after construction; zeroed on drop.
pub struct EncryptionKey {
    bytes: [u8; KEY_LENGTH],
}

impl EncryptionKey {
    /// Decode a key from its 64-character hex representation
    pub fn from_hex(hex_key: &str) -> LoanResult<Self> {
        let decoded = hex::decode(hex_key.trim())
            .map_err(|e| LoanError::KeyConfig(format!("key is not valid hex: {}", e)))?;

        if decoded.len() != KEY_LENGTH {
            return Err(LoanError::KeyConfig(format!(
                "key must be {} bytes ({} hex characters), got {} bytes",
                KEY_LENGTH,
                KEY_LENGTH * 2,
                decoded.len()
            )));
        }

        let mut bytes = [0u8; KEY_LENGTH];
        bytes.copy_from_slice(&decoded);
        Ok(Self { bytes })
    }

    /// Load the key from `ELOAN_ENCRYPTION_KEY`
    pub fn from_env() -> LoanResult<Self> {
        let hex_key = std::env::var(ENCRYPTION_KEY_ENV).map_err(|_| {
            LoanError::KeyConfig(format!("{} is not set", ENCRYPTION_KEY_ENV))
        })?;
        Self::from_hex(&hex_key)
    }

    /// Generate a fresh random key
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LENGTH];
        OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Hex representation, for handing to an operator setting up the env var
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// The raw key bytes
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.bytes
    }
}

impl Drop for EncryptionKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

// Never print key material
impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionKey").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    #[test]
    fn test_from_hex() {
        let key = EncryptionKey::from_hex(SAMPLE_KEY).unwrap();
        assert_eq!(key.as_bytes()[0], 0x00);
        assert_eq!(key.as_bytes()[31], 0x1f);
        assert_eq!(key.to_hex(), SAMPLE_KEY);
    }

    #[test]
    fn test_from_hex_trims_whitespace() {
        let key = EncryptionKey::from_hex(&format!("  {}\n", SAMPLE_KEY)).unwrap();
        assert_eq!(key.to_hex(), SAMPLE_KEY);
    }

    #[test]
    fn test_rejects_bad_hex() {
        let err = EncryptionKey::from_hex("zz").unwrap_err();
        assert!(matches!(err, LoanError::KeyConfig(_)));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = EncryptionKey::from_hex("deadbeef").unwrap_err();
        assert!(matches!(err, LoanError::KeyConfig(_)));
        assert!(err.to_string().contains("64 hex characters"));
    }

    #[test]
    fn test_generate_distinct_keys() {
        let a = EncryptionKey::generate();
        let b = EncryptionKey::generate();
        assert_ne!(a.to_hex(), b.to_hex());
        assert_eq!(a.to_hex().len(), KEY_LENGTH * 2);
    }

    #[test]
    fn test_debug_redacts() {
        let key = EncryptionKey::from_hex(SAMPLE_KEY).unwrap();
        let debug = format!("{:?}", key);
        assert!(!debug.contains("0001"));
    }
}
