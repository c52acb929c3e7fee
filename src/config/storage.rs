//! Persisted configuration file
//!
//! A flat JSON object, `.sealpage.json` by default. The only field sealpage
//! owns is `salt`; any other keys are kept as they are so the file can be
//! shared with other tooling.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, SealPageError};

/// Default config file name, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".sealpage.json";

/// Contents of the config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,

    /// Keys sealpage does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PersistedConfig {
    pub fn with_salt(salt: impl Into<String>) -> Self {
        Self {
            salt: Some(salt.into()),
            extra: Map::new(),
        }
    }
}

/// Where the config lives, or `Disabled` for `--no-config`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLocation {
    Disabled,
    File(PathBuf),
}

impl ConfigLocation {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Disabled => None,
            Self::File(path) => Some(path),
        }
    }
}

/// Read the config; a missing file yields an empty config
pub fn load_config(location: &ConfigLocation) -> Result<PersistedConfig> {
    let Some(path) = location.path() else {
        return Ok(PersistedConfig::default());
    };

    if !path.exists() {
        debug!(path = %path.display(), "no config file, starting empty");
        return Ok(PersistedConfig::default());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(PersistedConfig::default());
    }

    serde_json::from_str(&content).map_err(|e| {
        SealPageError::InvalidConfig(format!("{}: {}", path.display(), e))
    })
}

/// Write the config as pretty JSON
///
/// The file is written to a sibling and renamed into place, so a failed
/// write leaves the previous config intact. Returns `Ok(false)` without
/// touching the disk when the location is disabled.
pub fn save_config(location: &ConfigLocation, config: &PersistedConfig) -> Result<bool> {
    let Some(path) = location.path() else {
        return Ok(false);
    };

    let persist_err = |source: std::io::Error| SealPageError::ConfigPersistenceFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut json = serde_json::to_string_pretty(config)?;
    json.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(persist_err)?;
    }

    let temp_path = temp_path_for(path);
    let written = File::create(&temp_path).and_then(|mut file| {
        file.write_all(json.as_bytes())?;
        file.sync_all()
    });
    if let Err(e) = written.and_then(|()| fs::rename(&temp_path, path)) {
        let _ = fs::remove_file(&temp_path);
        return Err(persist_err(e));
    }

    debug!(path = %path.display(), "config written");
    Ok(true)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
    path.with_file_name(format!("{}.{}.tmp", name, std::process::id()))
}
