//! CLI entry point for the veridoc document intake pipeline.
//!
//! This binary provides the `veridoc` command with subcommands for key
//! management, at-rest encryption of stored documents, text extraction, and
//! full document verification. It is a thin composition layer: all pipeline
//! behaviour lives in the library crates.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use veridoc_extract::{DocumentExtractor, ExtractorConfig};
use veridoc_vault::file;
use veridoc_vault::keystore::KeyStore;
use veridoc_verify::{DocumentVerifier, EngineConfig, VerificationReport};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// veridoc — document intake pipeline.
#[derive(Parser)]
#[command(
    name = "veridoc",
    version,
    about = "Verify, extract, and encrypt loan-application documents",
    long_about = "A rule-based document intake pipeline: at-rest encryption of \
                  uploaded files, OCR/text extraction, and per-type field \
                  verification."
)]
struct Cli {
    /// Path to the encryption key file.
    #[arg(long, default_value = "secret.key", global = true)]
    key_file: PathBuf,

    /// Optional TOML configuration file with [extract] and [verify] sections.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new encryption key, overwriting any existing one.
    GenerateKey {
        /// Required when a key already exists: regeneration makes every
        /// previously encrypted file permanently unrecoverable.
        #[arg(long)]
        force: bool,
    },

    /// Encrypt a stored document in place.
    Encrypt { path: PathBuf },

    /// Decrypt a stored document in place.
    Decrypt { path: PathBuf },

    /// Extract the text of a document and print it.
    Extract { path: PathBuf },

    /// Run the full pipeline on a document and print the verification report.
    Verify {
        path: PathBuf,

        /// Emit the report as JSON instead of the human-readable summary.
        #[arg(long)]
        json: bool,
    },
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Optional on-disk configuration, merged over the built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PipelineConfig {
    extract: ExtractorConfig,
    verify: EngineConfig,
}

fn load_config(path: Option<&PathBuf>) -> Result<PipelineConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("failed to parse config file {}", path.display()))
        }
        None => Ok(PipelineConfig::default()),
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    let store = KeyStore::new(&cli.key_file);

    match cli.command {
        Commands::GenerateKey { force } => cmd_generate_key(&store, force),
        Commands::Encrypt { path } => cmd_encrypt(&store, &path),
        Commands::Decrypt { path } => cmd_decrypt(&store, &path),
        Commands::Extract { path } => cmd_extract(&store, config, &path),
        Commands::Verify { path, json } => cmd_verify(&store, config, &path, json),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

fn cmd_generate_key(store: &KeyStore, force: bool) -> Result<()> {
    if store.exists() && !force {
        bail!(
            "a key already exists at {} — pass --force to overwrite it \
             (files encrypted under the old key become unrecoverable)",
            store.path().display()
        );
    }

    store.generate().context("failed to generate key")?;
    println!("New key generated at '{}'.", store.path().display());
    println!("Keep this file safe: without it, encrypted documents cannot be recovered.");
    Ok(())
}

fn cmd_encrypt(store: &KeyStore, path: &PathBuf) -> Result<()> {
    let key = store.load().context("failed to load key")?;
    file::encrypt_file(path, &key)
        .with_context(|| format!("failed to encrypt {}", path.display()))?;
    println!("Encrypted '{}' in place.", path.display());
    Ok(())
}

fn cmd_decrypt(store: &KeyStore, path: &PathBuf) -> Result<()> {
    let key = store.load().context("failed to load key")?;
    file::decrypt_file(path, &key)
        .with_context(|| format!("failed to decrypt {}", path.display()))?;
    println!("Decrypted '{}' in place.", path.display());
    Ok(())
}

fn cmd_extract(store: &KeyStore, config: PipelineConfig, path: &PathBuf) -> Result<()> {
    let extractor = build_extractor(store, config.extract)?;
    let text = extractor
        .extract(path)
        .with_context(|| format!("failed to extract text from {}", path.display()))?;
    println!("{text}");
    Ok(())
}

fn cmd_verify(store: &KeyStore, config: PipelineConfig, path: &PathBuf, json: bool) -> Result<()> {
    let extractor = build_extractor(store, config.extract)?;
    let text = extractor
        .extract(path)
        .with_context(|| format!("failed to extract text from {}", path.display()))?;

    let verifier = DocumentVerifier::new(&config.verify)
        .context("failed to build verification engines")?;
    let report = verifier.verify_text(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Wire up the production extractor, attaching the key when one exists so
/// at-rest-encrypted documents are handled transparently.
fn build_extractor(store: &KeyStore, config: ExtractorConfig) -> Result<DocumentExtractor> {
    let extractor = DocumentExtractor::with_defaults(config);
    if store.exists() {
        let key = store.load().context("failed to load key")?;
        Ok(extractor.with_key(key))
    } else {
        tracing::debug!(
            key_file = %store.path().display(),
            "no key file present — encrypted documents will be rejected"
        );
        Ok(extractor)
    }
}

// ---------------------------------------------------------------------------
// Report rendering
// ---------------------------------------------------------------------------

fn print_report(report: &VerificationReport) {
    println!("--- Verification Report ---");
    println!("Document Type: {}", report.doc_type);
    println!("Status: {}", report.status);

    if !report.fields.is_empty() {
        println!();
        for (name, value) in report.fields.iter() {
            println!("  {name}: {value}");
        }
    }

    if !report.failure_reasons.is_empty() {
        println!();
        println!("Failure reasons:");
        for reason in &report.failure_reasons {
            println!("  - {reason}");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
