//! sealpage - password-protected static pages
//!
//! This crate turns a static document into a single HTML page that:
//! - Carries the document encrypted with AES-256-GCM
//! - Derives the key from a password with PBKDF2-HMAC-SHA256
//! - Decrypts in the visitor's browser with WebCrypto, no server involved
//! - Optionally remembers the visitor or opens from a share link

pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod page;
pub mod passphrase;
pub mod pipeline;

pub use error::{Result, SealPageError};
