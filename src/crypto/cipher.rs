//! AES-256-GCM content encryption
//!
//! AES-GCM is the AEAD that every WebCrypto implementation ships, so the
//! page can decrypt without bundling a cipher. The tag is appended to the
//! ciphertext, which is the layout `SubtleCrypto.decrypt` expects.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::rngs::OsRng;
use rand::RngCore;

use super::{DerivedKey, SecureBytes};
use crate::error::{Result, SealPageError};

/// Nonce length for AES-GCM (96 bits)
pub const NONCE_LEN: usize = 12;

/// Authentication tag length (128 bits)
pub const TAG_LEN: usize = 16;

/// Ciphertext of one page plus the nonce it was sealed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext with the tag appended
    pub ciphertext: Vec<u8>,
}

impl EncryptedPayload {
    /// Base64 of (nonce, ciphertext), as embedded in the page
    pub fn to_base64_parts(&self) -> (String, String) {
        (STANDARD.encode(self.nonce), STANDARD.encode(&self.ciphertext))
    }

    /// Inverse of [`to_base64_parts`](Self::to_base64_parts)
    ///
    /// Malformed input is reported as `DecryptionFailed`, the same error a
    /// wrong password gives.
    pub fn from_base64_parts(nonce: &str, ciphertext: &str) -> Result<Self> {
        let nonce_bytes = STANDARD
            .decode(nonce)
            .map_err(|_| SealPageError::DecryptionFailed)?;
        let nonce: [u8; NONCE_LEN] = nonce_bytes
            .try_into()
            .map_err(|_| SealPageError::DecryptionFailed)?;

        let ciphertext = STANDARD
            .decode(ciphertext)
            .map_err(|_| SealPageError::DecryptionFailed)?;
        if ciphertext.len() < TAG_LEN {
            return Err(SealPageError::DecryptionFailed);
        }

        Ok(Self { nonce, ciphertext })
    }
}

/// Encrypt `content` under `key` with a fresh random nonce
pub fn encrypt(content: &[u8], key: &DerivedKey) -> Result<EncryptedPayload> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| SealPageError::EncryptionFailed(e.to_string()))?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), content)
        .map_err(|e| SealPageError::EncryptionFailed(e.to_string()))?;

    Ok(EncryptedPayload { nonce, ciphertext })
}

/// Decrypt and authenticate a payload
///
/// # Errors
/// `DecryptionFailed` on any tag mismatch; no plaintext is returned unless
/// the tag verifies.
pub fn decrypt(payload: &EncryptedPayload, key: &DerivedKey) -> Result<SecureBytes> {
    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| SealPageError::DecryptionFailed)?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(&payload.nonce), payload.ciphertext.as_slice())
        .map_err(|_| SealPageError::DecryptionFailed)?;

    Ok(SecureBytes::new(plaintext))
}
