//! Authenticated encryption of individual sensitive fields
//!
//! National id numbers, tax ids, and bank details are encrypted one value at
//! a time with AES-256-GCM before they are persisted. Each record is
//! serialized as `hex(iv):hex(tag):hex(ciphertext)` with a fresh random
//! 16-byte IV per encryption, so identical plaintexts never produce identical
//! records and any tampering is detected at decryption time.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce};
use thiserror::Error;
use tracing::warn;

use super::key::EncryptionKey;
use crate::error::{LoanError, LoanResult};

/// IV length in bytes, as written by the previous generation of this system
const IV_LENGTH: usize = 16;

/// GCM authentication tag length in bytes
const TAG_LENGTH: usize = 16;

/// Separator between the hex segments; never collides with the hex alphabet
const SEGMENT_DELIMITER: char = ':';

// Existing records carry 16-byte IVs, so GCM is instantiated with the
// matching nonce size rather than the crate-default 12 bytes.
type FieldAead = AesGcm<Aes256, U16>;

/// Why a serialized field could not be decrypted
///
/// `Malformed` means the stored string does not parse as an IV/tag/ciphertext
/// triple; `AuthenticationFailure` means it parses but the tag does not
/// verify (corruption, tampering, or the wrong key). Neither is ever
/// conflated with "the field was never set"; absence is a data-model
/// concern, not a cipher outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecryptError {
    #[error("malformed ciphertext: {0}")]
    Malformed(String),

    #[error("authentication tag mismatch")]
    AuthenticationFailure,
}

/// Encrypts and decrypts individual field values under one process-wide key
pub struct FieldCipher {
    cipher: FieldAead,
}

impl FieldCipher {
    /// Create a cipher bound to the given key
    pub fn new(key: &EncryptionKey) -> LoanResult<Self> {
        let cipher = FieldAead::new_from_slice(key.as_bytes())
            .map_err(|e| LoanError::Encryption(format!("Failed to initialize cipher: {}", e)))?;
        Ok(Self { cipher })
    }

    /// Encrypt one field value
    ///
    /// Returns `hex(iv):hex(tag):hex(ciphertext)`. The ciphertext segment has
    /// the same byte length as the UTF-8 plaintext. Two calls with the same
    /// plaintext produce different outputs because the IV is random per call.
    pub fn encrypt(&self, plaintext: &str) -> LoanResult<String> {
        let mut iv = [0u8; IV_LENGTH];
        OsRng.fill_bytes(&mut iv);
        let nonce = Nonce::from_slice(&iv);

        let mut sealed = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| LoanError::Encryption(format!("Encryption failed: {}", e)))?;

        // The aead API appends the tag to the ciphertext; the stored format
        // keeps them in separate segments.
        let tag = sealed.split_off(sealed.len() - TAG_LENGTH);

        Ok(format!(
            "{}{delim}{}{delim}{}",
            hex::encode(iv),
            hex::encode(tag),
            hex::encode(sealed),
            delim = SEGMENT_DELIMITER,
        ))
    }

    /// Decrypt a serialized field value
    ///
    /// Returns the exact original plaintext, or a classified failure. The
    /// failure class is also logged for operational diagnosis.
    pub fn decrypt(&self, serialized: &str) -> Result<String, DecryptError> {
        let result = self.decrypt_inner(serialized);
        match &result {
            Err(DecryptError::Malformed(reason)) => {
                warn!(%reason, "rejecting malformed encrypted field");
            }
            Err(DecryptError::AuthenticationFailure) => {
                warn!("encrypted field failed authentication; data corrupted, tampered, or wrong key");
            }
            Ok(_) => {}
        }
        result
    }

    fn decrypt_inner(&self, serialized: &str) -> Result<String, DecryptError> {
        let mut segments = serialized.split(SEGMENT_DELIMITER);
        let (Some(iv_hex), Some(tag_hex), Some(ct_hex), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(DecryptError::Malformed(
                "expected iv:tag:ciphertext hex segments".into(),
            ));
        };

        let iv = hex::decode(iv_hex)
            .map_err(|_| DecryptError::Malformed("IV segment is not valid hex".into()))?;
        let tag = hex::decode(tag_hex)
            .map_err(|_| DecryptError::Malformed("tag segment is not valid hex".into()))?;
        let ciphertext = hex::decode(ct_hex)
            .map_err(|_| DecryptError::Malformed("ciphertext segment is not valid hex".into()))?;

        if iv.len() != IV_LENGTH {
            return Err(DecryptError::Malformed(format!(
                "IV must be {} bytes, got {}",
                IV_LENGTH,
                iv.len()
            )));
        }
        if tag.len() != TAG_LENGTH {
            return Err(DecryptError::Malformed(format!(
                "tag must be {} bytes, got {}",
                TAG_LENGTH,
                tag.len()
            )));
        }

        let nonce = Nonce::from_slice(&iv);
        let mut sealed = ciphertext;
        sealed.extend_from_slice(&tag);

        let plaintext = self
            .cipher
            .decrypt(nonce, sealed.as_ref())
            .map_err(|_| DecryptError::AuthenticationFailure)?;

        String::from_utf8(plaintext)
            .map_err(|_| DecryptError::Malformed("plaintext is not valid UTF-8".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_A: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
    const KEY_B: &str = "ffeeddccbbaa99887766554433221100ffeeddccbbaa99887766554433221100";

    fn cipher_with(key_hex: &str) -> FieldCipher {
        let key = EncryptionKey::from_hex(key_hex).unwrap();
        FieldCipher::new(&key).unwrap()
    }

    fn test_cipher() -> FieldCipher {
        cipher_with(KEY_A)
    }

    #[test]
    fn test_round_trip() {
        let cipher = test_cipher();
        for plaintext in ["1234-5678-9012", "", "ACCT: 998877", "überweisung-Ω", "a:b:c"] {
            let sealed = cipher.encrypt(plaintext).unwrap();
            assert_eq!(cipher.decrypt(&sealed).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_encryption_is_nondeterministic() {
        let cipher = test_cipher();
        let first = cipher.encrypt("PAN-ABCDE1234F").unwrap();
        let second = cipher.encrypt("PAN-ABCDE1234F").unwrap();

        assert_ne!(first, second);
        assert_eq!(cipher.decrypt(&first).unwrap(), "PAN-ABCDE1234F");
        assert_eq!(cipher.decrypt(&second).unwrap(), "PAN-ABCDE1234F");
    }

    #[test]
    fn test_serialized_shape() {
        let cipher = test_cipher();
        let plaintext = "routing-0042";
        let sealed = cipher.encrypt(plaintext).unwrap();

        let segments: Vec<&str> = sealed.split(':').collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].len(), IV_LENGTH * 2);
        assert_eq!(segments[1].len(), TAG_LENGTH * 2);
        assert_eq!(segments[2].len(), plaintext.len() * 2);
        assert!(segments
            .iter()
            .all(|s| s.chars().all(|c| c.is_ascii_hexdigit())));
    }

    #[test]
    fn test_tampered_tag_fails_authentication() {
        let cipher = test_cipher();
        let sealed = cipher.encrypt("4111111111111111").unwrap();

        let mut segments: Vec<String> = sealed.split(':').map(str::to_string).collect();
        // Flip a single hex digit inside the tag segment
        let first = segments[1].remove(0);
        let flipped = if first == '0' { '1' } else { '0' };
        segments[1].insert(0, flipped);
        let tampered = segments.join(":");

        assert_eq!(
            cipher.decrypt(&tampered),
            Err(DecryptError::AuthenticationFailure)
        );
    }

    #[test]
    fn test_tampered_ciphertext_fails_authentication() {
        let cipher = test_cipher();
        let sealed = cipher.encrypt("IFSC0001234").unwrap();

        let mut segments: Vec<String> = sealed.split(':').map(str::to_string).collect();
        let last = segments[2].pop().unwrap();
        let flipped = if last == 'f' { 'e' } else { 'f' };
        segments[2].push(flipped);
        let tampered = segments.join(":");

        assert_eq!(
            cipher.decrypt(&tampered),
            Err(DecryptError::AuthenticationFailure)
        );
    }

    #[test]
    fn test_wrong_key_fails_authentication() {
        let sealed = cipher_with(KEY_A).encrypt("secret-field").unwrap();
        assert_eq!(
            cipher_with(KEY_B).decrypt(&sealed),
            Err(DecryptError::AuthenticationFailure)
        );
    }

    #[test]
    fn test_malformed_segment_count() {
        let cipher = test_cipher();
        for input in ["", "aabb", "aa:bb", "aa:bb:cc:dd"] {
            assert!(matches!(
                cipher.decrypt(input),
                Err(DecryptError::Malformed(_))
            ));
        }
    }

    #[test]
    fn test_malformed_hex() {
        let cipher = test_cipher();
        let sealed = cipher.encrypt("x").unwrap();
        let mut segments: Vec<String> = sealed.split(':').map(str::to_string).collect();
        segments[0] = "not-hex!".repeat(4);
        assert!(matches!(
            cipher.decrypt(&segments.join(":")),
            Err(DecryptError::Malformed(_))
        ));
    }

    #[test]
    fn test_malformed_iv_and_tag_lengths() {
        let cipher = test_cipher();
        let sealed = cipher.encrypt("x").unwrap();
        let segments: Vec<&str> = sealed.split(':').collect();

        let short_iv = format!("aabb:{}:{}", segments[1], segments[2]);
        assert!(matches!(
            cipher.decrypt(&short_iv),
            Err(DecryptError::Malformed(_))
        ));

        let short_tag = format!("{}:aabb:{}", segments[0], segments[2]);
        assert!(matches!(
            cipher.decrypt(&short_tag),
            Err(DecryptError::Malformed(_))
        ));
    }
}
