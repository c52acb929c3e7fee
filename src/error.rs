use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SealPageError>;

#[derive(Debug, Error)]
pub enum SealPageError {
    #[error("Invalid salt: expected 32 lowercase hex characters")]
    InvalidSaltFormat,

    #[error("Cannot read source '{}': {}", .path.display(), .source)]
    MissingSourceContent {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Decryption failed: wrong password or corrupted page")]
    DecryptionFailed,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Cannot write config '{}': {}", .path.display(), .source)]
    ConfigPersistenceFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Password cannot be empty")]
    EmptyPassphrase,

    #[error("Password is too short (minimum {0} characters in strict mode)")]
    PassphraseTooShort(usize),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("No input files found")]
    NoInputFiles,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not a protected page: {0}")]
    NotAProtectedPage(String),

    #[error("Template rendering failed: {0}")]
    TemplateRender(#[from] askama::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
