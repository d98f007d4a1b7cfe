// SPDX-License-Identifier: MIT

//! Persisted token slot.
//!
//! The browser original keeps exactly one localStorage key alive across
//! page loads. Here that is a trait over a single opaque string, with a
//! file-backed implementation for real use and an in-memory one for tests.

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// A durable slot holding at most one token.
pub trait TokenStore: Send + Sync {
    /// Read the persisted token, if any.
    fn load(&self) -> Option<String>;

    /// Persist `token`, replacing any previous value.
    fn save(&self, token: &str) -> io::Result<()>;

    /// Remove the persisted token. Clearing an empty slot is fine.
    fn clear(&self) -> io::Result<()>;
}

/// Token slot backed by a single file.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn save(&self, token: &str) -> io::Result<()> {
        std::fs::write(&self.path, token)
    }

    fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

/// In-memory token slot for tests.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot.lock().unwrap().clone()
    }

    fn save(&self, token: &str) -> io::Result<()> {
        *self.slot.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));

        assert_eq!(store.load(), None);

        store.save("demo-jwt-token-12345").unwrap();
        assert_eq!(store.load(), Some("demo-jwt-token-12345".to_string()));

        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn clearing_an_empty_file_store_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));
        assert!(store.clear().is_ok());
    }

    #[test]
    fn whitespace_only_file_counts_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "  \n").unwrap();

        let store = FileTokenStore::new(path);
        assert_eq!(store.load(), None);
    }
}
