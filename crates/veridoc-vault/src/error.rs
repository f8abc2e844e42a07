//! Vault error types.
//!
//! All vault subsystems surface errors through [`VaultError`], the single
//! error type returned by every public API in this crate.

use std::path::PathBuf;

/// Unified error type for the veridoc secure-storage engine.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    // -- Crypto errors ------------------------------------------------------
    /// Encryption failed (e.g. CSPRNG failure, ring internal error).
    #[error("encryption failed: {reason}")]
    EncryptionFailed { reason: String },

    /// Decryption failed. The message is identical for a wrong key and for
    /// corrupted or truncated ciphertext so callers cannot be used as an
    /// oracle for which one occurred.
    #[error("decryption failed: invalid key or corrupted data")]
    DecryptionFailed,

    // -- Key store errors ---------------------------------------------------
    /// No key file exists at the configured path. The caller must generate
    /// a key before any crypto operation.
    #[error("encryption key not found — generate one first")]
    KeyNotFound,

    /// The key file exists but does not hold a key of the expected length.
    #[error("key file is corrupted: expected {expected} bytes, got {actual}")]
    InvalidKeyFile { expected: usize, actual: usize },

    // -- File errors --------------------------------------------------------
    /// `encrypt_file` was asked to encrypt a file that already carries the
    /// envelope magic.
    #[error("file is already encrypted: {path}")]
    AlreadyEncrypted { path: PathBuf },

    /// `decrypt_file` was asked to decrypt a file without the envelope magic.
    #[error("file is not encrypted: {path}")]
    NotEncrypted { path: PathBuf },

    // -- Underlying errors --------------------------------------------------
    /// I/O error from the filesystem.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the vault crate.
pub type Result<T> = std::result::Result<T, VaultError>;
