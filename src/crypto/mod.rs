//! Cryptographic primitives for sealpage
//!
//! This module provides:
//! - Salt generation and validation
//! - PBKDF2-HMAC-SHA256 key derivation
//! - AES-256-GCM authenticated encryption
//! - Share-link hashes
//! - Secure memory handling with automatic zeroing

pub mod cipher;
pub mod kdf;
mod salt;
mod secure_bytes;
mod share;

pub use cipher::{decrypt, encrypt, EncryptedPayload, NONCE_LEN};
pub use kdf::{derive_key, derive_key_from_share_hash, DerivedKey, KdfParams, KEY_LEN};
pub use salt::{generate_random_salt, obtain_salt, Salt, SaltChoice, SALT_HEX_LEN, SALT_LEN};
pub use secure_bytes::SecureBytes;
pub use share::{hash_passphrase, share_url, ShareHash, REMEMBER_PARAM, SHARE_PARAM};

/// Version of the embedded payload format
pub const FORMAT_VERSION: u32 = 1;
