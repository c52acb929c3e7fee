//! Remember-me settings shared between the generator and the page script
//!
//! After a successful decryption the page may keep the derived key (never
//! the passphrase) in `localStorage` together with an expiry timestamp. A
//! later visit uses it directly; if it no longer opens the page the entry
//! is erased and the visitor is prompted again. The rules themselves run in
//! the page script; this module only fixes the names and the duration.

use std::num::NonZeroU32;

/// `localStorage` key holding the hex derived key
pub const STORAGE_KEY: &str = "sealpage_key";

/// `localStorage` key holding the expiry, epoch milliseconds
pub const STORAGE_EXPIRATION: &str = "sealpage_expiration";

/// Fragment flag that erases stored credentials
pub const LOGOUT_PARAM: &str = "sealpage_logout";

/// How long a successful visit is remembered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RememberPolicy {
    #[default]
    Disabled,
    ForDays(NonZeroU32),
}

impl RememberPolicy {
    /// Zero days disables remembering entirely
    pub fn from_days(days: u32) -> Self {
        NonZeroU32::new(days).map_or(Self::Disabled, Self::ForDays)
    }

    /// Value embedded in the page; `0` means disabled
    pub fn days(&self) -> u32 {
        match self {
            Self::Disabled => 0,
            Self::ForDays(days) => days.get(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::ForDays(_))
    }
}
