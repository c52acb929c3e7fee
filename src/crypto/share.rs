//! Share-link hashes
//!
//! A share link carries the middle value of the derivation chain in the URL
//! fragment, so a recipient can open the page without typing the passphrase.
//! Fragments are not sent to the server by browsers.

use secrecy::SecretString;

use super::kdf::{self, KdfParams, SHARE_LABEL};
use super::{DerivedKey, Salt, SecureBytes};
use crate::error::Result;

/// Fragment parameter carrying the hash
pub const SHARE_PARAM: &str = "sealpage_share";

/// Fragment flag asking the page to remember the visitor
pub const REMEMBER_PARAM: &str = "sealpage_remember";

/// One-way hash of (passphrase, salt) for share links
#[derive(Debug)]
pub struct ShareHash(SecureBytes);

impl ShareHash {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    /// Key the page derives after reading this hash from the URL
    pub fn content_key(&self) -> Result<DerivedKey> {
        kdf::derive_key_from_share_hash(&self.0)
    }
}

/// Hash a passphrase for use in a share link
pub fn hash_passphrase(
    passphrase: &SecretString,
    salt: &Salt,
    params: &KdfParams,
) -> Result<ShareHash> {
    let stretched = kdf::stretch(passphrase, salt, params)?;
    Ok(ShareHash(kdf::hmac_label(&stretched, SHARE_LABEL)?))
}

/// Build `<base_url>#sealpage_share=<hex>[&sealpage_remember]`
///
/// Any fragment already present on `base_url` is dropped.
pub fn share_url(base_url: &str, hash: &ShareHash, remember: bool) -> String {
    let base = base_url.split('#').next().unwrap_or_default();
    let mut url = format!("{}#{}={}", base, SHARE_PARAM, hash.to_hex());
    if remember {
        url.push('&');
        url.push_str(REMEMBER_PARAM);
    }
    url
}
