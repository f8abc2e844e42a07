//! Per-path mutual exclusion for in-place file cycles.
//!
//! Two concurrent operations on the *same* file — say, an in-place
//! re-encryption racing a transparent read during extraction — would corrupt
//! the observable state of that file. Operations on different files never
//! contend. The registry hands out one `Mutex` per canonical path; callers
//! hold the guard for the duration of their read/transform/replace cycle.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use dashmap::DashMap;

static REGISTRY: OnceLock<DashMap<PathBuf, Arc<Mutex<()>>>> = OnceLock::new();

fn registry() -> &'static DashMap<PathBuf, Arc<Mutex<()>>> {
    REGISTRY.get_or_init(DashMap::new)
}

/// Return the lock guarding `path`.
///
/// Paths are canonicalized where possible so that two spellings of the same
/// file resolve to the same lock. Callers lock the returned `Mutex` for the
/// whole in-place cycle:
///
/// ```rust,no_run
/// # use std::sync::PoisonError;
/// let lock = veridoc_vault::locks::for_path("data/doc.pdf".as_ref());
/// let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
/// // read / transform / atomic replace
/// ```
pub fn for_path(path: &Path) -> Arc<Mutex<()>> {
    let canonical = path
        .canonicalize()
        .unwrap_or_else(|_| path.to_path_buf());

    registry()
        .entry(canonical)
        .or_default()
        .clone()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_path_yields_same_lock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.bin");
        std::fs::write(&path, b"x").unwrap();

        let a = for_path(&path);
        let b = for_path(&path);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn different_paths_do_not_contend() {
        let dir = tempfile::tempdir().unwrap();
        let p1 = dir.path().join("a.bin");
        let p2 = dir.path().join("b.bin");
        std::fs::write(&p1, b"x").unwrap();
        std::fs::write(&p2, b"x").unwrap();

        let a = for_path(&p1);
        let b = for_path(&p2);
        assert!(!Arc::ptr_eq(&a, &b));

        // Holding one must not block the other.
        let _ga = a.lock().unwrap();
        let _gb = b.try_lock().unwrap();
    }

    #[test]
    fn relative_and_canonical_spellings_share_a_lock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.bin");
        std::fs::write(&path, b"x").unwrap();

        let via_plain = for_path(&path);
        let via_canonical = for_path(&path.canonicalize().unwrap());
        assert!(Arc::ptr_eq(&via_plain, &via_canonical));
    }
}
