//! Passphrase checks
//!
//! Length is advisory unless strict mode is on.

use secrecy::{ExposeSecret, SecretString};

use crate::error::{Result, SealPageError};

/// Passphrases shorter than this get a warning, or are rejected in strict mode
pub const RECOMMENDED_PASSPHRASE_LEN: usize = 14;

/// Outcome of a successful check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassphraseStrength {
    Ok,
    /// Accepted, but the caller should warn
    Short { len: usize },
}

/// Validate a passphrase
///
/// # Errors
/// - `EmptyPassphrase` for an empty or whitespace-only passphrase
/// - `PassphraseTooShort` for a short passphrase when `strict` is set
pub fn check_passphrase(passphrase: &SecretString, strict: bool) -> Result<PassphraseStrength> {
    let value = passphrase.expose_secret();
    if value.trim().is_empty() {
        return Err(SealPageError::EmptyPassphrase);
    }

    let len = value.chars().count();
    if len >= RECOMMENDED_PASSPHRASE_LEN {
        return Ok(PassphraseStrength::Ok);
    }

    if strict {
        Err(SealPageError::PassphraseTooShort(RECOMMENDED_PASSPHRASE_LEN))
    } else {
        Ok(PassphraseStrength::Short { len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string())
    }

    #[test]
    fn test_long_passphrase_ok() {
        assert_eq!(
            check_passphrase(&secret("correct horse battery staple"), true).unwrap(),
            PassphraseStrength::Ok
        );
    }

    #[test]
    fn test_short_passphrase_is_advisory() {
        assert_eq!(
            check_passphrase(&secret("short"), false).unwrap(),
            PassphraseStrength::Short { len: 5 }
        );
    }

    #[test]
    fn test_short_passphrase_rejected_in_strict_mode() {
        assert!(matches!(
            check_passphrase(&secret("short"), true),
            Err(SealPageError::PassphraseTooShort(RECOMMENDED_PASSPHRASE_LEN))
        ));
    }

    #[test]
    fn test_empty_passphrase_rejected() {
        assert!(check_passphrase(&secret(""), false).is_err());
        assert!(check_passphrase(&secret("   "), false).is_err());
    }

    #[test]
    fn test_length_counts_characters() {
        // 14 characters, 28 bytes
        let cyrillic = "пароль-пароль!";
        assert_eq!(
            check_passphrase(&secret(cyrillic), true).unwrap(),
            PassphraseStrength::Ok
        );
    }
}
