//! Grip - verified git package fetcher
//!
//! Usage:
//!   grip fetch github:org/repo@^1.2.3 ./dest --key maintainer.asc
//!   grip fetch onion:org/repo@~1.1.0 ./dest --mirrors mirrors.toml --keyring ~/.gnupg

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grip_core::fetch::Fetcher;
use grip_core::git::Keyring;
use grip_core::source::MirrorRegistry;

#[derive(Parser)]
#[command(name = "grip")]
#[command(about = "Verified git package fetcher", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a package source into a destination directory
    ///
    /// Exits zero only when the resolved revision was cloned AND its
    /// signature verified against the trusted keys.
    Fetch {
        /// Source specifier (scheme:path@range)
        specifier: String,

        /// Destination directory for the checkout
        dest: PathBuf,

        /// Mirror registry file (TOML); defaults to the built-in registry
        #[arg(long)]
        mirrors: Option<PathBuf>,

        /// Existing keyring directory holding the trusted keys
        #[arg(long, conflicts_with = "keys")]
        keyring: Option<PathBuf>,

        /// Armored public key file to trust (repeatable)
        #[arg(long = "key")]
        keys: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable summary
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

/// Mirror registry file: a `[mirrors]` table mapping each scheme to its
/// ordered base location list.
#[derive(Debug, Deserialize)]
struct MirrorsFile {
    mirrors: MirrorRegistry,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grip=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Fetch {
            specifier,
            dest,
            mirrors,
            keyring,
            keys,
            format,
        } => run_fetch(&specifier, &dest, mirrors.as_deref(), keyring, &keys, format),
    }
}

fn run_fetch(
    specifier: &str,
    dest: &Path,
    mirrors: Option<&Path>,
    keyring: Option<PathBuf>,
    keys: &[PathBuf],
    format: OutputFormat,
) -> Result<()> {
    let registry = load_registry(mirrors)?;
    let trusted = build_keyring(keyring, keys)?;

    let source = registry.expand(specifier)?;
    let outcome = Fetcher::new().fetch(&source, dest, &trusted)?;

    match format {
        OutputFormat::Table => {
            println!("verified {} at {} ({})", specifier, outcome.tag, outcome.revision);
            println!("  from {}", outcome.origin);
            println!("  into {}", outcome.path.display());
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }
    Ok(())
}

/// Load the mirror registry from a TOML file, or fall back to the
/// compiled-in public forges.
fn load_registry(path: Option<&Path>) -> Result<MirrorRegistry> {
    let Some(path) = path else {
        debug!("no mirrors file given, using built-in registry");
        return Ok(MirrorRegistry::builtin());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mirrors file: {}", path.display()))?;
    let file: MirrorsFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse mirrors file: {}", path.display()))?;
    Ok(file.mirrors)
}

/// Resolve the trusted keyring from an existing directory or by importing
/// key files into the default state location.
fn build_keyring(dir: Option<PathBuf>, keys: &[PathBuf]) -> Result<Keyring> {
    if let Some(dir) = dir {
        return Ok(Keyring::at(dir));
    }
    if keys.is_empty() {
        anyhow::bail!("No trusted keys: pass --keyring DIR or at least one --key FILE");
    }
    let home = Keyring::default_home()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine state directory for the keyring"))?;
    Ok(Keyring::import(home, keys)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrors_file_parses_scheme_tables() {
        let content = r#"
[mirrors]
github = ["https://github.com"]
onion = [
  "ssh://git@fszyuaceipjhnbyy44mtfmoocwzgzunmdu46votrm5c72poeeffa.onion:22",
  "ssh://git@xg5jwb4xxwajkhur2ahuhtdwifniyoyvbm5h4yzawawwjziol3jq.onion:22",
]
"#;
        let file: MirrorsFile = toml::from_str(content).unwrap();
        let github = file.mirrors.mirrors("github").unwrap();
        assert_eq!(github.len(), 1);
        assert_eq!(github[0], "https://github.com");
        assert_eq!(file.mirrors.mirrors("onion").unwrap().len(), 2);
    }

    #[test]
    fn missing_key_material_is_rejected() {
        let result = build_keyring(None, &[]);
        assert!(result.is_err());
    }
}
