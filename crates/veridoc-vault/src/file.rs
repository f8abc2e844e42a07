//! In-place encryption of stored files.
//!
//! Accepted documents are overwritten on disk with their encrypted envelope;
//! the plaintext is not retained. Every transform follows the
//! write-to-temp-then-rename discipline so an interrupted process never
//! leaves a half-written file: the target path always holds either the
//! complete old bytes or the complete new bytes.
//!
//! All operations on a given path serialize through [`crate::locks`].

use std::io::Write;
use std::path::Path;
use std::sync::PoisonError;

use crate::crypto::{self, EncryptionKey};
use crate::error::{Result, VaultError};
use crate::locks;

/// Encrypt `path` in place.
///
/// Fails with [`VaultError::AlreadyEncrypted`] when the file already carries
/// the envelope magic — double encryption is always a caller bug, never a
/// desired state.
pub fn encrypt_file(path: &Path, key: &EncryptionKey) -> Result<()> {
    let lock = locks::for_path(path);
    let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

    let plaintext = std::fs::read(path)?;
    if crypto::is_encrypted(&plaintext) {
        return Err(VaultError::AlreadyEncrypted {
            path: path.to_path_buf(),
        });
    }

    let envelope = crypto::encrypt(&plaintext, key)?;
    atomic_replace(path, &envelope)?;

    tracing::info!(path = %path.display(), bytes = envelope.len(), "encrypted file in place");
    Ok(())
}

/// Decrypt `path` in place, restoring the original plaintext bytes.
///
/// Fails with [`VaultError::NotEncrypted`] when the file does not carry the
/// envelope magic, and with [`VaultError::DecryptionFailed`] when the key is
/// wrong or the envelope is corrupted. On failure the file is left untouched.
pub fn decrypt_file(path: &Path, key: &EncryptionKey) -> Result<()> {
    let lock = locks::for_path(path);
    let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

    let envelope = std::fs::read(path)?;
    if !crypto::is_encrypted(&envelope) {
        return Err(VaultError::NotEncrypted {
            path: path.to_path_buf(),
        });
    }

    let plaintext = crypto::decrypt(&envelope, key)?;
    atomic_replace(path, &plaintext)?;

    tracing::info!(path = %path.display(), bytes = plaintext.len(), "decrypted file in place");
    Ok(())
}

/// Read `path`, transparently decrypting to a transient buffer when the file
/// is at rest encrypted.
///
/// The on-disk bytes are never rewritten, so the file's at-rest encryption
/// state is unchanged whether or not the caller's subsequent processing
/// succeeds. An encrypted file with `key == None` fails with
/// [`VaultError::KeyNotFound`].
pub fn read_decrypted(path: &Path, key: Option<&EncryptionKey>) -> Result<Vec<u8>> {
    let lock = locks::for_path(path);
    let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

    let bytes = std::fs::read(path)?;
    if !crypto::is_encrypted(&bytes) {
        return Ok(bytes);
    }

    let key = key.ok_or(VaultError::KeyNotFound)?;
    let plaintext = crypto::decrypt(&bytes, key)?;

    tracing::debug!(path = %path.display(), "read encrypted file into transient buffer");
    Ok(plaintext)
}

/// Write `data` to `path` atomically: temp file in the same directory, then
/// rename over the target.
fn atomic_replace(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| VaultError::Io(e.error))?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
