//! CLI command implementations

pub mod decrypt;
pub mod encrypt;
pub mod salt;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::error::{Result, SealPageError};

/// A file to process and its path relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub source: PathBuf,
    pub relative: PathBuf,
    pub content: Vec<u8>,
}

/// Take the password from the command line / environment, or prompt for it
pub fn resolve_password(given: Option<String>, confirm: bool) -> Result<SecretString> {
    if let Some(password) = given {
        return Ok(SecretString::new(password));
    }
    if confirm {
        prompt_new_password()
    } else {
        prompt_password()
    }
}

/// Ask for a new password twice until both entries match
pub fn prompt_new_password() -> Result<SecretString> {
    loop {
        let password = SecretString::new(rpassword::prompt_password("Enter password: ")?);
        let confirm = SecretString::new(rpassword::prompt_password("Confirm password: ")?);

        if password.expose_secret() != confirm.expose_secret() {
            println!("{} {}", "Error:".red(), SealPageError::PasswordMismatch);
            continue;
        }

        return Ok(password);
    }
}

/// Ask for an existing password
pub fn prompt_password() -> Result<SecretString> {
    Ok(SecretString::new(rpassword::prompt_password("Enter password: ")?))
}

/// Expand the command line paths into files and read them all
///
/// Every source is read before anything is written, so an unreadable file
/// aborts the run without partial output. Two sources that would land on the
/// same output path are rejected.
pub fn collect_inputs(paths: &[PathBuf], recursive: bool) -> Result<Vec<InputFile>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            if !recursive {
                return Err(SealPageError::InvalidInput(format!(
                    "'{}' is a directory, pass --recursive to process it",
                    path.display()
                )));
            }
            let base = path.file_name().map(PathBuf::from).unwrap_or_default();
            walk_dir(path, &base, &mut files)?;
        } else {
            let relative = path
                .file_name()
                .map(PathBuf::from)
                .ok_or_else(|| SealPageError::InvalidInput(format!("'{}'", path.display())))?;
            files.push(read_input(path, relative)?);
        }
    }

    if files.is_empty() {
        return Err(SealPageError::NoInputFiles);
    }
    check_unique_outputs(&files)?;
    Ok(files)
}

fn check_unique_outputs(files: &[InputFile]) -> Result<()> {
    let mut seen: HashMap<&Path, &Path> = HashMap::with_capacity(files.len());
    for file in files {
        if let Some(first) = seen.insert(&file.relative, &file.source) {
            return Err(SealPageError::InvalidInput(format!(
                "'{}' and '{}' would both be written to '{}'",
                first.display(),
                file.source.display(),
                file.relative.display()
            )));
        }
    }
    Ok(())
}

fn walk_dir(dir: &Path, relative: &Path, files: &mut Vec<InputFile>) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .map_err(|source| SealPageError::MissingSourceContent {
            path: dir.to_path_buf(),
            source,
        })?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let child = relative.join(entry.file_name());
        if path.is_dir() {
            walk_dir(&path, &child, files)?;
        } else {
            files.push(read_input(&path, child)?);
        }
    }
    Ok(())
}

fn read_input(path: &Path, relative: PathBuf) -> Result<InputFile> {
    let content = fs::read(path).map_err(|source| SealPageError::MissingSourceContent {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "read source");

    Ok(InputFile {
        source: path.to_path_buf(),
        relative,
        content,
    })
}

/// Write `data` under `out_dir`, creating parent directories
pub fn write_output(out_dir: &Path, relative: &Path, data: &[u8]) -> Result<PathBuf> {
    let target = out_dir.join(relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, data)?;
    debug!(path = %target.display(), "wrote output");
    Ok(target)
}
