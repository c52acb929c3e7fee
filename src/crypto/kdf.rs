//! PBKDF2-HMAC-SHA256 passphrase key derivation
//!
//! The derivation has to be reproducible inside a browser with nothing but
//! WebCrypto, which rules out memory-hard functions. The chain is:
//!
//! ```text
//! stretched   = PBKDF2-HMAC-SHA256(passphrase, salt, iterations, 32)
//! share_hash  = HMAC-SHA256(stretched,  SHARE_LABEL)
//! derived_key = HMAC-SHA256(share_hash, KEY_LABEL)
//! ```
//!
//! The page embeds `iterations` and both labels, and its script runs the
//! same steps. Changing any of them is a format change.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use zeroize::Zeroize;

use super::{Salt, SecureBytes};
use crate::error::{Result, SealPageError};

type HmacSha256 = Hmac<Sha256>;

/// Derived key length in bytes (256 bits for AES-256)
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count (OWASP 2023 figure for HMAC-SHA256)
pub const DEFAULT_ITERATIONS: u32 = 600_000;

/// HMAC label separating the share-link hash from the raw PBKDF2 output
pub const SHARE_LABEL: &str = "sealpage/v1/share-link";

/// HMAC label separating the content key from the share-link hash
pub const KEY_LABEL: &str = "sealpage/v1/content-key";

/// Tunable part of the derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    pub iterations: u32,
}

impl KdfParams {
    /// Low iteration count for tests. Never use for real pages.
    pub const fn testing() -> Self {
        Self { iterations: 1_000 }
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Key material for the content cipher
pub struct DerivedKey {
    key: SecureBytes,
}

impl DerivedKey {
    /// Wrap raw key bytes, e.g. a remembered key read back from storage
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != KEY_LEN {
            return Err(SealPageError::KeyDerivationFailed(format!(
                "Invalid key length: expected {}, got {}",
                KEY_LEN,
                bytes.len()
            )));
        }
        Ok(Self {
            key: SecureBytes::from(bytes),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }

    /// Hex form, as stored by the page's remember-me logic
    pub fn to_hex(&self) -> String {
        self.key.to_hex()
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey").field("key", &self.key).finish()
    }
}

/// PBKDF2 output for (passphrase, salt)
pub(crate) fn stretch(
    passphrase: &SecretString,
    salt: &Salt,
    params: &KdfParams,
) -> Result<SecureBytes> {
    let password = passphrase.expose_secret();
    if password.is_empty() {
        return Err(SealPageError::EmptyPassphrase);
    }
    if params.iterations == 0 {
        return Err(SealPageError::KeyDerivationFailed(
            "iteration count must be positive".into(),
        ));
    }

    let mut out = vec![0u8; KEY_LEN];
    pbkdf2::pbkdf2::<HmacSha256>(password.as_bytes(), salt.as_bytes(), params.iterations, &mut out)
        .map_err(|e| SealPageError::KeyDerivationFailed(e.to_string()))?;

    Ok(SecureBytes::new(out))
}

/// HMAC-SHA256 of `label` under `key`
pub(crate) fn hmac_label(key: &[u8], label: &str) -> Result<SecureBytes> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| SealPageError::KeyDerivationFailed(e.to_string()))?;
    mac.update(label.as_bytes());

    let mut tag: [u8; KEY_LEN] = mac.finalize().into_bytes().into();
    let out = SecureBytes::new(tag.to_vec());
    tag.zeroize();
    Ok(out)
}

/// Derive the content key from a passphrase and salt
///
/// Deterministic: the same inputs always give the same key, with no
/// dependence on time or randomness. The browser repeats this derivation
/// when the visitor types the passphrase.
pub fn derive_key(passphrase: &SecretString, salt: &Salt, params: &KdfParams) -> Result<DerivedKey> {
    let stretched = stretch(passphrase, salt, params)?;
    let share_hash = hmac_label(&stretched, SHARE_LABEL)?;
    derive_key_from_share_hash(&share_hash)
}

/// Final step of the chain, starting from a share-link hash
pub fn derive_key_from_share_hash(share_hash: &[u8]) -> Result<DerivedKey> {
    let key = hmac_label(share_hash, KEY_LABEL)?;
    DerivedKey::from_bytes(&key)
}
