//! Salt generation and validation
//!
//! A salt is 16 random bytes. Outside the process it always travels as a
//! 32-character lowercase hex string, both in the config file and inside the
//! generated page, so validation happens on the string form.

use std::fmt;
use std::str::FromStr;

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{Result, SealPageError};

/// Salt length in bytes (128 bits)
pub const SALT_LEN: usize = 16;

/// Length of the hex form
pub const SALT_HEX_LEN: usize = SALT_LEN * 2;

/// A validated salt
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    /// Parse the hex form. Uppercase digits are rejected so that the string
    /// written to the config and the page is canonical.
    pub fn parse(value: &str) -> Result<Self> {
        let well_formed = value.len() == SALT_HEX_LEN
            && value
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !well_formed {
            return Err(SealPageError::InvalidSaltFormat);
        }

        let mut bytes = [0u8; SALT_LEN];
        hex::decode_to_slice(value, &mut bytes).map_err(|_| SealPageError::InvalidSaltFormat)?;
        Ok(Self(bytes))
    }

    pub fn from_bytes(bytes: [u8; SALT_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for Salt {
    type Err = SealPageError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Salt({})", self.to_hex())
    }
}

/// The resolved salt and whether it was generated during this run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaltChoice {
    pub salt: Salt,
    /// True when freshly generated; the caller should persist it
    pub is_new: bool,
}

/// Generate a new random salt from the OS RNG
pub fn generate_random_salt() -> Salt {
    let mut bytes = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut bytes);
    Salt(bytes)
}

/// Resolve the salt for a run
///
/// Precedence: `explicit` (from the command line), then `persisted` (from
/// the config file), then a freshly generated one. A malformed persisted
/// value is an error, never silently replaced.
pub fn obtain_salt(explicit: Option<&str>, persisted: Option<&str>) -> Result<SaltChoice> {
    if let Some(value) = explicit {
        return Ok(SaltChoice {
            salt: Salt::parse(value)?,
            is_new: false,
        });
    }

    if let Some(value) = persisted {
        return Ok(SaltChoice {
            salt: Salt::parse(value)?,
            is_new: false,
        });
    }

    Ok(SaltChoice {
        salt: generate_random_salt(),
        is_new: true,
    })
}
