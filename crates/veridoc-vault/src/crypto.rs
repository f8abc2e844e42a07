//! AES-256-GCM envelope encryption using the `ring` crate.
//!
//! Every encrypted blob is a self-contained envelope:
//!
//! ```text
//! [4 bytes: magic "VDV1"]
//! [12 bytes: random nonce]
//! [remaining: AES-256-GCM ciphertext + 16-byte tag]
//! ```
//!
//! The magic prefix lets callers check whether a blob is at rest encrypted
//! without attempting (and failing) a decryption — encryption state is a
//! property that is inspected, never inferred from an error path.
//!
//! # Security Notes
//!
//! - Nonces are generated randomly for each encryption call. With a 96-bit
//!   nonce the collision probability is negligible for up to ~2^32
//!   encryptions under the same key.
//! - Decryption failures are collapsed into a single [`VaultError::DecryptionFailed`]
//!   so the error surface does not reveal whether the key was wrong or the
//!   data was tampered with.

use ring::aead::{self, Aad, BoundKey, NONCE_LEN, Nonce, NonceSequence, SealingKey, UnboundKey};
use ring::rand::{SecureRandom, SystemRandom};

use crate::error::{Result, VaultError};

/// Length of the AES-256-GCM key in bytes.
pub const KEY_LEN: usize = 32;

/// Length of the AES-256-GCM nonce in bytes (96 bits).
pub const NONCE_LEN_BYTES: usize = NONCE_LEN;

/// Magic prefix identifying a veridoc encrypted envelope.
pub const MAGIC: &[u8; 4] = b"VDV1";

/// Length of the GCM authentication tag appended to the ciphertext.
const TAG_LEN: usize = 16;

/// Smallest possible envelope: magic + nonce + tag (empty plaintext).
const ENVELOPE_MIN_LEN: usize = MAGIC.len() + NONCE_LEN_BYTES + TAG_LEN;

/// AES-256-GCM algorithm from `ring`.
static AEAD_ALG: &aead::Algorithm = &aead::AES_256_GCM;

// ---------------------------------------------------------------------------
// Key type
// ---------------------------------------------------------------------------

/// A 256-bit symmetric encryption key.
///
/// Exactly one key exists per deployment; it is produced by
/// [`KeyStore::generate`](crate::keystore::KeyStore::generate) and read back
/// by [`KeyStore::load`](crate::keystore::KeyStore::load). Losing the key
/// makes every blob encrypted under it permanently unrecoverable.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptionKey([u8; KEY_LEN]);

impl EncryptionKey {
    /// Generate a fresh random key from the system CSPRNG.
    pub fn generate() -> Result<Self> {
        let rng = SystemRandom::new();
        let mut bytes = [0u8; KEY_LEN];
        rng.fill(&mut bytes)
            .map_err(|_| VaultError::EncryptionFailed {
                reason: "failed to generate random key".into(),
            })?;
        Ok(Self(bytes))
    }

    /// Construct a key from raw bytes, validating the length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; KEY_LEN] =
            bytes
                .try_into()
                .map_err(|_| VaultError::InvalidKeyFile {
                    expected: KEY_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for EncryptionKey {
    // Key material must never end up in logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EncryptionKey(..)")
    }
}

// ---------------------------------------------------------------------------
// Nonce handling
// ---------------------------------------------------------------------------

/// A single-use nonce sequence that yields exactly one nonce and then errors.
///
/// `ring` requires a [`NonceSequence`] for sealing operations. Since a fresh
/// random nonce is generated per encryption call, this wrapper ensures each
/// sealing key is used exactly once.
struct SingleNonce(Option<[u8; NONCE_LEN_BYTES]>);

impl SingleNonce {
    fn new(bytes: [u8; NONCE_LEN_BYTES]) -> Self {
        Self(Some(bytes))
    }
}

impl NonceSequence for SingleNonce {
    fn advance(&mut self) -> std::result::Result<Nonce, ring::error::Unspecified> {
        self.0
            .take()
            .map(Nonce::assume_unique_for_key)
            .ok_or(ring::error::Unspecified)
    }
}

// ---------------------------------------------------------------------------
// Envelope inspection
// ---------------------------------------------------------------------------

/// Check whether `bytes` carry the veridoc envelope magic.
///
/// This is the explicit capability check used before every in-place file
/// operation and before transparent decryption in the extractor.
pub fn is_encrypted(bytes: &[u8]) -> bool {
    bytes.len() >= MAGIC.len() && &bytes[..MAGIC.len()] == MAGIC
}

// ---------------------------------------------------------------------------
// Encryption
// ---------------------------------------------------------------------------

/// Encrypt `plaintext` with AES-256-GCM under `key`.
///
/// Returns the self-contained envelope `magic || nonce || ciphertext+tag`.
/// The nonce is freshly random per call, so two encryptions of the same
/// plaintext never produce the same envelope.
///
/// # Errors
///
/// Returns [`VaultError::EncryptionFailed`] if `ring` reports a failure.
pub fn encrypt(plaintext: &[u8], key: &EncryptionKey) -> Result<Vec<u8>> {
    let rng = SystemRandom::new();

    let mut nonce_bytes = [0u8; NONCE_LEN_BYTES];
    rng.fill(&mut nonce_bytes)
        .map_err(|_| VaultError::EncryptionFailed {
            reason: "failed to generate random nonce".into(),
        })?;

    let unbound_key =
        UnboundKey::new(AEAD_ALG, key.as_bytes()).map_err(|_| VaultError::EncryptionFailed {
            reason: "failed to create AES-256-GCM key".into(),
        })?;

    let mut sealing_key = SealingKey::new(unbound_key, SingleNonce::new(nonce_bytes));

    // `ring` encrypts in-place and appends the authentication tag.
    let mut in_out = plaintext.to_vec();
    sealing_key
        .seal_in_place_append_tag(Aad::empty(), &mut in_out)
        .map_err(|_| VaultError::EncryptionFailed {
            reason: "seal_in_place failed".into(),
        })?;

    let mut envelope = Vec::with_capacity(ENVELOPE_MIN_LEN + in_out.len());
    envelope.extend_from_slice(MAGIC);
    envelope.extend_from_slice(&nonce_bytes);
    envelope.extend_from_slice(&in_out);

    tracing::trace!(
        plaintext_len = plaintext.len(),
        envelope_len = envelope.len(),
        "encrypted data"
    );

    Ok(envelope)
}

// ---------------------------------------------------------------------------
// Decryption
// ---------------------------------------------------------------------------

/// Decrypt an envelope produced by [`encrypt`].
///
/// Returns the original plaintext, or [`VaultError::DecryptionFailed`] when
/// the magic is missing, the envelope is truncated, the key is wrong, or the
/// ciphertext has been tampered with. The error carries no indication of
/// which of those occurred, and no partial plaintext is ever returned.
pub fn decrypt(envelope: &[u8], key: &EncryptionKey) -> Result<Vec<u8>> {
    if envelope.len() < ENVELOPE_MIN_LEN || !is_encrypted(envelope) {
        return Err(VaultError::DecryptionFailed);
    }

    let body = &envelope[MAGIC.len()..];
    let (nonce_bytes, ciphertext) = body.split_at(NONCE_LEN_BYTES);

    let mut nonce = [0u8; NONCE_LEN_BYTES];
    nonce.copy_from_slice(nonce_bytes);

    let unbound_key = UnboundKey::new(AEAD_ALG, key.as_bytes())
        .map_err(|_| VaultError::DecryptionFailed)?;

    let mut opening_key = aead::OpeningKey::new(unbound_key, SingleNonce::new(nonce));

    let mut in_out = ciphertext.to_vec();
    let plaintext = opening_key
        .open_in_place(Aad::empty(), &mut in_out)
        .map_err(|_| VaultError::DecryptionFailed)?;

    let result = plaintext.to_vec();

    tracing::trace!(
        envelope_len = envelope.len(),
        plaintext_len = result.len(),
        "decrypted data"
    );

    Ok(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let key = EncryptionKey::generate().unwrap();
        let plaintext = b"scanned PAN card bytes";

        let envelope = encrypt(plaintext, &key).unwrap();
        let decrypted = decrypt(&envelope, &key).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn envelope_carries_magic() {
        let key = EncryptionKey::generate().unwrap();
        let envelope = encrypt(b"data", &key).unwrap();

        assert!(is_encrypted(&envelope));
        assert!(!is_encrypted(b"data"));
        assert!(!is_encrypted(b"VD"));
    }

    #[test]
    fn decrypt_with_wrong_key_fails() {
        let key1 = EncryptionKey::generate().unwrap();
        let key2 = EncryptionKey::generate().unwrap();

        let envelope = encrypt(b"secret data", &key1).unwrap();
        let result = decrypt(&envelope, &key2);

        assert!(matches!(result, Err(VaultError::DecryptionFailed)));
    }

    #[test]
    fn decrypt_with_tampered_ciphertext_fails() {
        let key = EncryptionKey::generate().unwrap();
        let mut envelope = encrypt(b"secret data", &key).unwrap();

        // Flip a single bit in the ciphertext body.
        let last = envelope.len() - 1;
        envelope[last] ^= 0x01;

        let result = decrypt(&envelope, &key);
        assert!(matches!(result, Err(VaultError::DecryptionFailed)));
    }

    #[test]
    fn decrypt_truncated_envelope_fails() {
        let key = EncryptionKey::generate().unwrap();
        let envelope = encrypt(b"secret data", &key).unwrap();

        let result = decrypt(&envelope[..ENVELOPE_MIN_LEN - 1], &key);
        assert!(matches!(result, Err(VaultError::DecryptionFailed)));
    }

    #[test]
    fn decrypt_without_magic_fails() {
        let key = EncryptionKey::generate().unwrap();
        let mut envelope = encrypt(b"secret data", &key).unwrap();
        envelope[0] = b'X';

        let result = decrypt(&envelope, &key);
        assert!(matches!(result, Err(VaultError::DecryptionFailed)));
    }

    #[test]
    fn repeated_encryption_is_nondeterministic() {
        let key = EncryptionKey::generate().unwrap();
        let plaintext = b"same plaintext";

        let e1 = encrypt(plaintext, &key).unwrap();
        let e2 = encrypt(plaintext, &key).unwrap();

        assert_ne!(e1, e2);
        assert_eq!(decrypt(&e1, &key).unwrap(), plaintext);
        assert_eq!(decrypt(&e2, &key).unwrap(), plaintext);
    }

    #[test]
    fn empty_plaintext_roundtrip() {
        let key = EncryptionKey::generate().unwrap();
        let envelope = encrypt(b"", &key).unwrap();
        let decrypted = decrypt(&envelope, &key).unwrap();

        assert_eq!(decrypted, b"");
    }

    #[test]
    fn large_plaintext_roundtrip() {
        let key = EncryptionKey::generate().unwrap();
        let plaintext = vec![0xAB_u8; 1_000_000]; // 1 MB scan

        let envelope = encrypt(&plaintext, &key).unwrap();
        let decrypted = decrypt(&envelope, &key).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn key_from_bytes_validates_length() {
        assert!(EncryptionKey::from_bytes(&[0u8; KEY_LEN]).is_ok());
        assert!(matches!(
            EncryptionKey::from_bytes(&[0u8; 16]),
            Err(VaultError::InvalidKeyFile {
                expected: KEY_LEN,
                actual: 16
            })
        ));
    }

    #[test]
    fn key_debug_is_redacted() {
        let key = EncryptionKey::generate().unwrap();
        assert_eq!(format!("{key:?}"), "EncryptionKey(..)");
    }
}
