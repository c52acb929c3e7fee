//! Encrypt documents into password-protected pages

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use tracing::{info, warn};

use crate::config::{self, ConfigLocation, TemplateOptions, DEFAULT_CONFIG_FILE};
use crate::crypto::{self, KdfParams, Salt};
use crate::error::Result;
use crate::page::RememberPolicy;
use crate::passphrase::{self, PassphraseStrength, RECOMMENDED_PASSPHRASE_LEN};
use crate::pipeline::{self, Prepared};

use super::{collect_inputs, resolve_password, write_output, InputFile};

#[derive(Debug, Args)]
pub struct EncryptArgs {
    /// Files or directories to encrypt
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Password (prompted for when absent)
    #[arg(short, long, env = "SEALPAGE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Do not warn about short passwords
    #[arg(long)]
    pub short: bool,

    /// Refuse passwords shorter than the recommended length
    #[arg(long, conflicts_with = "short")]
    pub strict: bool,

    /// Salt to use, 32 lowercase hex characters (default: from config, or new)
    #[arg(long)]
    pub salt: Option<String>,

    /// Config file holding the salt
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Neither read nor write a config file
    #[arg(long)]
    pub no_config: bool,

    /// Output directory
    #[arg(short = 'd', long, default_value = "encrypted")]
    pub directory: PathBuf,

    /// Descend into directories
    #[arg(short, long)]
    pub recursive: bool,

    /// Offer "remember me" for this many days (0 disables)
    #[arg(long, value_name = "DAYS", default_value_t = 0)]
    pub remember: u32,

    /// Print a share link for the published URL; without a URL only the fragment is printed
    #[arg(long, value_name = "URL", num_args = 0..=1, default_missing_value = "")]
    pub share: Option<String>,

    /// Make the share link remember the visitor
    #[arg(long, requires = "share")]
    pub share_remember: bool,

    #[command(flatten)]
    pub template: TemplateArgs,
}

/// Overrides for the prompt page text
#[derive(Debug, Default, Args)]
pub struct TemplateArgs {
    /// Page title
    #[arg(long)]
    pub template_title: Option<String>,

    /// Text shown above the password field
    #[arg(long)]
    pub template_instructions: Option<String>,

    /// Decrypt button label
    #[arg(long)]
    pub template_button: Option<String>,

    /// Password field placeholder
    #[arg(long)]
    pub template_placeholder: Option<String>,

    /// Message for a wrong password
    #[arg(long)]
    pub template_error: Option<String>,

    /// Label of the remember-me checkbox
    #[arg(long)]
    pub template_remember: Option<String>,

    /// Button colour (CSS)
    #[arg(long)]
    pub template_color_primary: Option<String>,

    /// Background colour (CSS)
    #[arg(long)]
    pub template_color_secondary: Option<String>,
}

impl TemplateArgs {
    pub fn into_options(self) -> TemplateOptions {
        let mut options = TemplateOptions::default();
        let overrides = [
            (self.template_title, &mut options.title),
            (self.template_instructions, &mut options.instructions),
            (self.template_button, &mut options.button),
            (self.template_placeholder, &mut options.placeholder),
            (self.template_error, &mut options.error),
            (self.template_remember, &mut options.remember),
            (self.template_color_primary, &mut options.color_primary),
            (self.template_color_secondary, &mut options.color_secondary),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        options
    }
}

pub fn run(args: EncryptArgs) -> Result<()> {
    run_with_params(args, KdfParams::default())
}

/// Body of `run` with the derivation parameters injectable for tests
pub fn run_with_params(args: EncryptArgs, params: KdfParams) -> Result<()> {
    // Salts are checked before any source file is opened
    if let Some(salt) = &args.salt {
        Salt::parse(salt)?;
    }

    let location = if args.no_config {
        ConfigLocation::Disabled
    } else {
        ConfigLocation::File(args.config.clone())
    };
    let persisted = config::load_config(&location)?;
    if args.salt.is_none() {
        if let Some(salt) = &persisted.salt {
            Salt::parse(salt)?;
        }
    }

    let inputs = collect_inputs(&args.paths, args.recursive)?;

    let password = resolve_password(args.password, true)?;
    match passphrase::check_passphrase(&password, args.strict)? {
        PassphraseStrength::Short { len } if !args.short => {
            println!(
                "{} password is {} characters; {} or more is recommended (use --short to silence)",
                "Warning:".yellow().bold(),
                len,
                RECOMMENDED_PASSPHRASE_LEN
            );
        }
        _ => {}
    }

    print!("{}", "Deriving encryption key... ".cyan());
    std::io::Write::flush(&mut std::io::stdout())?;
    let prepared = pipeline::prepare(&password, args.salt.as_deref(), persisted, params)?;
    println!("{}", "done".green());

    if prepared.config_changed {
        match config::save_config(&location, &prepared.config) {
            Ok(true) => info!(path = %args.config.display(), "salt saved to config"),
            Ok(false) => {}
            Err(e) if prepared.salt.is_new => return Err(e),
            Err(e) => warn!(error = %e, "could not update config"),
        }
    }
    if prepared.salt.is_new && args.no_config {
        println!(
            "{} new salt {} was not saved; pass it with --salt to re-encrypt with the same links",
            "Note:".yellow().bold(),
            prepared.salt.salt
        );
    }

    let options = args.template.into_options();
    let remember = RememberPolicy::from_days(args.remember);

    let pages = render_pages(&prepared, &inputs, &options, remember)?;

    for (input, html) in inputs.iter().zip(&pages) {
        let target = write_output(&args.directory, &input.relative, html.as_bytes())?;
        println!(
            "{} {} -> {}",
            "Encrypted".green(),
            input.source.display(),
            target.display()
        );
    }

    if let Some(base) = &args.share {
        println!();
        println!("{}", "Share link:".cyan().bold());
        println!(
            "{}",
            crypto::share_url(base, prepared.share_hash(), args.share_remember)
        );
        if base.is_empty() {
            println!("Append this fragment to the URL of any page encrypted above.");
        }
    }

    Ok(())
}

/// Render every page before any of them is written
fn render_pages(
    prepared: &Prepared,
    inputs: &[InputFile],
    options: &TemplateOptions,
    remember: RememberPolicy,
) -> Result<Vec<String>> {
    inputs
        .iter()
        .map(|input| prepared.protect(&input.content, options, remember))
        .collect()
}
