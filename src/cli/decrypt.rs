//! Recover the original documents from protected pages

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use crate::error::Result;
use crate::pipeline;

use super::{collect_inputs, resolve_password, write_output};

#[derive(Debug, Args)]
pub struct DecryptArgs {
    /// Protected pages or directories
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Password (prompted for when absent)
    #[arg(short, long, env = "SEALPAGE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Output directory
    #[arg(short = 'd', long, default_value = "decrypted")]
    pub directory: PathBuf,

    /// Descend into directories
    #[arg(short, long)]
    pub recursive: bool,
}

pub fn run(args: DecryptArgs) -> Result<()> {
    let inputs = collect_inputs(&args.paths, args.recursive)?;
    let password = resolve_password(args.password, false)?;

    // Decrypt everything first so a wrong password writes nothing
    let mut decrypted = Vec::with_capacity(inputs.len());
    for input in &inputs {
        let html = String::from_utf8_lossy(&input.content);
        decrypted.push(pipeline::unprotect_document(&html, &password)?);
    }

    for (input, content) in inputs.iter().zip(&decrypted) {
        let target = write_output(&args.directory, &input.relative, content)?;
        println!(
            "{} {} -> {}",
            "Decrypted".green(),
            input.source.display(),
            target.display()
        );
    }

    Ok(())
}
