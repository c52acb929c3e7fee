//! Configuration for sealpage
//!
//! Handles:
//! - The persisted config file holding the salt
//! - Typed template options for the generated page

mod options;
mod storage;

pub use options::TemplateOptions;
pub use storage::{load_config, save_config, ConfigLocation, PersistedConfig, DEFAULT_CONFIG_FILE};
