use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use sealpage::cli;
use sealpage::cli::decrypt::DecryptArgs;
use sealpage::cli::encrypt::EncryptArgs;
use sealpage::Result;

#[derive(Parser)]
#[command(name = "sealpage")]
#[command(version)]
#[command(about = "Password-protect static HTML pages, decrypted in the browser", long_about = None)]
struct Cli {
    /// Log level (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt files into password-protected pages
    Encrypt(EncryptArgs),

    /// Decrypt pages produced by `encrypt`
    Decrypt(DecryptArgs),

    /// Print a new random salt and exit
    Salt,
}

fn init_tracing(level: &str) {
    let level: tracing::Level = level.parse().unwrap_or(tracing::Level::WARN);
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Encrypt(args) => cli::encrypt::run(args),
        Commands::Decrypt(args) => cli::decrypt::run(args),
        Commands::Salt => cli::salt::run(),
    }
}
