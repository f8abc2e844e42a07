//! At-rest encryption for the veridoc document intake pipeline.
//!
//! Uploaded loan-application documents are protected on disk with AES-256-GCM
//! under a single deployment key. The crate is deliberately small: it knows
//! nothing about document types or extraction, only about bytes, files, and
//! the key that guards them.
//!
//! # Modules
//!
//! - [`crypto`] — AES-256-GCM envelope encryption/decryption.
//! - [`keystore`] — generation and loading of the on-disk key.
//! - [`file`] — in-place encryption of stored files with atomic replace.
//! - [`locks`] — per-path mutual exclusion for in-place cycles.
//! - [`error`] — unified error types.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use veridoc_vault::keystore::KeyStore;
//! use veridoc_vault::file;
//!
//! # fn example() -> veridoc_vault::error::Result<()> {
//! let store = KeyStore::new("data/secret.key");
//! let key = store.generate()?;
//!
//! file::encrypt_file("data/processed/sample_pan.png".as_ref(), &key)?;
//! let plaintext = file::read_decrypted("data/processed/sample_pan.png".as_ref(), Some(&key))?;
//! # let _ = plaintext;
//! # Ok(())
//! # }
//! ```

pub mod crypto;
pub mod error;
pub mod file;
pub mod keystore;
pub mod locks;

// Re-export the most commonly used types at the crate root for convenience.
pub use crypto::EncryptionKey;
pub use error::{Result, VaultError};
pub use keystore::KeyStore;
