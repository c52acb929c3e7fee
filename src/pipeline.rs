//! Generation pipeline
//!
//! `prepare` resolves the salt against the caller's config and derives the
//! key once; `Prepared::protect` then turns any number of documents into
//! pages. Nothing here touches the file system: the config goes in as a
//! value and comes back out with a flag saying whether it must be saved.

use secrecy::SecretString;
use tracing::{debug, info};

use crate::config::{PersistedConfig, TemplateOptions};
use crate::crypto::{self, DerivedKey, KdfParams, Salt, SaltChoice, SecureBytes, ShareHash};
use crate::error::Result;
use crate::page::{self, RememberPolicy};

/// Salt and key ready for encryption
#[derive(Debug)]
pub struct Prepared {
    pub salt: SaltChoice,
    pub params: KdfParams,
    key: DerivedKey,
    share: ShareHash,
    /// Config with the resolved salt recorded
    pub config: PersistedConfig,
    /// True when `config` differs from what was passed in
    pub config_changed: bool,
}

/// Resolve the salt and derive the content key
///
/// Salt validation runs before key derivation, so a bad salt fails fast.
pub fn prepare(
    passphrase: &SecretString,
    explicit_salt: Option<&str>,
    mut config: PersistedConfig,
    params: KdfParams,
) -> Result<Prepared> {
    let salt = crypto::obtain_salt(explicit_salt, config.salt.as_deref())?;
    if salt.is_new {
        info!(salt = %salt.salt, "generated new salt");
    } else {
        debug!(salt = %salt.salt, "using existing salt");
    }

    let resolved = salt.salt.to_hex();
    let config_changed = config.salt.as_deref() != Some(resolved.as_str());
    config.salt = Some(resolved);

    debug!(iterations = params.iterations, "deriving key");
    // One PBKDF2 run serves both the share link and the content key
    let share = crypto::hash_passphrase(passphrase, &salt.salt, &params)?;
    let key = share.content_key()?;

    Ok(Prepared {
        salt,
        params,
        key,
        share,
        config,
        config_changed,
    })
}

impl Prepared {
    /// Encrypt one document and render its page
    pub fn protect(
        &self,
        content: &[u8],
        options: &TemplateOptions,
        remember: RememberPolicy,
    ) -> Result<String> {
        let payload = crypto::encrypt(content, &self.key)?;
        page::assemble(&payload, &self.salt.salt, &self.params, options, remember)
    }

    /// Share-link hash for the same passphrase and salt
    pub fn share_hash(&self) -> &ShareHash {
        &self.share
    }
}

/// One-shot form of [`prepare`] + [`Prepared::protect`] for a known salt
pub fn protect_document(
    content: &[u8],
    passphrase: &SecretString,
    salt: &Salt,
    params: &KdfParams,
    options: &TemplateOptions,
    remember: RememberPolicy,
) -> Result<String> {
    let key = crypto::derive_key(passphrase, salt, params)?;
    let payload = crypto::encrypt(content, &key)?;
    page::assemble(&payload, salt, params, options, remember)
}

/// Recover the original document from a generated page
///
/// Runs the same steps as the page script: parameters from the embedded
/// block, key derivation, then authenticated decryption.
pub fn unprotect_document(html: &str, passphrase: &SecretString) -> Result<SecureBytes> {
    let embedded = page::extract_payload(html)?;
    let payload = embedded.encrypted_payload()?;
    let key = crypto::derive_key(passphrase, &embedded.salt()?, &embedded.kdf_params())?;
    crypto::decrypt(&payload, &key)
}

/// Decrypt a generated page with a remembered key, as a returning visitor's
/// browser does
pub fn unprotect_with_key(html: &str, key: &DerivedKey) -> Result<SecureBytes> {
    let payload = page::extract_payload(html)?.encrypted_payload()?;
    crypto::decrypt(&payload, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SealPageError;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string())
    }

    const SALT: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_prepare_records_new_salt() {
        let prepared = prepare(
            &secret("pw"),
            None,
            PersistedConfig::default(),
            KdfParams::testing(),
        )
        .unwrap();

        assert!(prepared.salt.is_new);
        assert!(prepared.config_changed);
        assert_eq!(prepared.config.salt, Some(prepared.salt.salt.to_hex()));
    }

    #[test]
    fn test_prepare_keeps_persisted_salt() {
        let prepared = prepare(
            &secret("pw"),
            None,
            PersistedConfig::with_salt(SALT),
            KdfParams::testing(),
        )
        .unwrap();

        assert!(!prepared.salt.is_new);
        assert!(!prepared.config_changed);
        assert_eq!(prepared.salt.salt.to_hex(), SALT);
    }

    #[test]
    fn test_explicit_salt_overrides_and_marks_change() {
        let prepared = prepare(
            &secret("pw"),
            Some(SALT),
            PersistedConfig::with_salt("ffffffffffffffffffffffffffffffff"),
            KdfParams::testing(),
        )
        .unwrap();

        assert!(prepared.config_changed);
        assert_eq!(prepared.config.salt.as_deref(), Some(SALT));
    }

    #[test]
    fn test_bad_salt_fails_before_derivation() {
        // Empty passphrase would fail derivation; the salt error must win
        let result = prepare(
            &secret(""),
            Some("nothex!!"),
            PersistedConfig::default(),
            KdfParams::testing(),
        );

        assert!(matches!(result, Err(SealPageError::InvalidSaltFormat)));
    }

    #[test]
    fn test_prepared_key_matches_direct_derivation() {
        let prepared = prepare(
            &secret("pw"),
            Some(SALT),
            PersistedConfig::default(),
            KdfParams::testing(),
        )
        .unwrap();
        let salt = Salt::parse(SALT).unwrap();
        let direct = crypto::derive_key(&secret("pw"), &salt, &KdfParams::testing()).unwrap();

        let html = prepared
            .protect(b"x", &TemplateOptions::default(), RememberPolicy::Disabled)
            .unwrap();
        assert_eq!(&*unprotect_with_key(&html, &direct).unwrap(), b"x");
    }

    #[test]
    fn test_protect_and_unprotect() {
        let prepared = prepare(
            &secret("pw"),
            Some(SALT),
            PersistedConfig::default(),
            KdfParams::testing(),
        )
        .unwrap();

        let html = prepared
            .protect(b"<p>hello</p>", &TemplateOptions::default(), RememberPolicy::Disabled)
            .unwrap();

        let content = unprotect_document(&html, &secret("pw")).unwrap();
        assert_eq!(&*content, b"<p>hello</p>");
    }

    #[test]
    fn test_share_hash_opens_page() {
        let prepared = prepare(
            &secret("pw"),
            Some(SALT),
            PersistedConfig::default(),
            KdfParams::testing(),
        )
        .unwrap();
        let html = prepared
            .protect(b"shared", &TemplateOptions::default(), RememberPolicy::Disabled)
            .unwrap();

        let key = prepared.share_hash().content_key().unwrap();
        assert_eq!(&*unprotect_with_key(&html, &key).unwrap(), b"shared");
    }
}
