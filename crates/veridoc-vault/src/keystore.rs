//! On-disk key storage.
//!
//! The deployment key lives in a single opaque binary file at a fixed,
//! caller-chosen path. There is no escrow and no implicit rotation: the file
//! holds exactly one key, [`KeyStore::generate`] overwrites it destructively,
//! and [`KeyStore::load`] refuses to invent a key when none exists.

use std::path::{Path, PathBuf};

use crate::crypto::EncryptionKey;
use crate::error::{Result, VaultError};

/// Default key file name, relative to a data directory.
pub const KEY_FILE_NAME: &str = "secret.key";

/// Loads and generates the deployment encryption key.
pub struct KeyStore {
    /// Path to the raw key file.
    key_file: PathBuf,
}

impl KeyStore {
    /// Create a key store over the key file at `key_file`.
    ///
    /// The file itself is only created by [`KeyStore::generate`].
    pub fn new(key_file: impl Into<PathBuf>) -> Self {
        Self {
            key_file: key_file.into(),
        }
    }

    /// Default key file location: `<data_dir>/secret.key`.
    pub fn default_path(data_dir: &Path) -> PathBuf {
        data_dir.join(KEY_FILE_NAME)
    }

    /// The path this store reads from and writes to.
    pub fn path(&self) -> &Path {
        &self.key_file
    }

    /// Generate a new random key and persist it, overwriting any existing
    /// key file.
    ///
    /// Overwriting is destructive: every blob encrypted under the previous
    /// key becomes permanently undecryptable. Callers are expected to have
    /// confirmed the operation before invoking this.
    pub fn generate(&self) -> Result<EncryptionKey> {
        if self.key_file.exists() {
            tracing::warn!(
                path = %self.key_file.display(),
                "overwriting existing key — previously encrypted files become unrecoverable"
            );
        }

        let key = EncryptionKey::generate()?;

        if let Some(parent) = self.key_file.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.key_file, key.as_bytes())?;

        // Restrict file permissions on Unix (owner read/write only).
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.key_file, perms)?;
        }

        tracing::info!(path = %self.key_file.display(), "generated new encryption key");
        Ok(key)
    }

    /// Load the persisted key.
    ///
    /// Fails with [`VaultError::KeyNotFound`] when the key file is absent and
    /// [`VaultError::InvalidKeyFile`] when it does not hold exactly
    /// [`crate::crypto::KEY_LEN`] bytes. There is no auto-generation fallback.
    pub fn load(&self) -> Result<EncryptionKey> {
        if !self.key_file.exists() {
            return Err(VaultError::KeyNotFound);
        }

        let bytes = std::fs::read(&self.key_file)?;
        let key = EncryptionKey::from_bytes(&bytes)?;

        tracing::debug!(path = %self.key_file.display(), "loaded encryption key");
        Ok(key)
    }

    /// Check whether a key file exists.
    pub fn exists(&self) -> bool {
        self.key_file.exists()
    }

    /// Delete the key file if present.
    ///
    /// Like regeneration, this makes previously encrypted blobs
    /// unrecoverable.
    pub fn delete(&self) -> Result<()> {
        if self.key_file.exists() {
            std::fs::remove_file(&self.key_file)?;
            tracing::info!(path = %self.key_file.display(), "deleted encryption key");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, KeyStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyStore::new(KeyStore::default_path(dir.path()));
        (dir, store)
    }

    #[test]
    fn generate_then_load_roundtrip() {
        let (_dir, store) = temp_store();

        assert!(!store.exists());

        let generated = store.generate().unwrap();
        assert!(store.exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded, generated);
    }

    #[test]
    fn load_missing_key_returns_not_found() {
        let (_dir, store) = temp_store();

        let result = store.load();
        assert!(matches!(result, Err(VaultError::KeyNotFound)));
    }

    #[test]
    fn generate_overwrites_previous_key() {
        let (_dir, store) = temp_store();

        let key1 = store.generate().unwrap();
        let key2 = store.generate().unwrap();

        assert_ne!(key1, key2);
        assert_eq!(store.load().unwrap(), key2);
    }

    #[test]
    fn load_rejects_truncated_key_file() {
        let (_dir, store) = temp_store();

        store.generate().unwrap();
        std::fs::write(store.path(), b"short").unwrap();

        let result = store.load();
        assert!(matches!(result, Err(VaultError::InvalidKeyFile { .. })));
    }

    #[test]
    fn delete_removes_key_file() {
        let (_dir, store) = temp_store();

        store.generate().unwrap();
        store.delete().unwrap();

        assert!(!store.exists());
        // Deleting again is a no-op.
        store.delete().unwrap();
    }

    #[test]
    fn generate_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyStore::new(dir.path().join("nested/keys/secret.key"));

        store.generate().unwrap();
        assert!(store.exists());
    }

    #[cfg(unix)]
    #[test]
    fn key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, store) = temp_store();
        store.generate().unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
