//! Cryptographic functions for eLoan
//!
//! Provides AES-256-GCM field encryption for PII at rest and process-wide
//! key handling. The serialized ciphertext format is a compatibility
//! contract with previously written records.

pub mod field_cipher;
pub mod key;

pub use field_cipher::{DecryptError, FieldCipher};
pub use key::{EncryptionKey, ENCRYPTION_KEY_ENV, KEY_LENGTH};
