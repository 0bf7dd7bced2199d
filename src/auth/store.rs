//! Credential persistence.
//!
//! The session credential is two string keys (access token, refresh token)
//! behind an injectable trait so tests can substitute an in-memory fake for
//! the file-backed store.

use std::fs;
use std::path::PathBuf;

use parking_lot::RwLock;

use crate::domain::Credential;

/// Errors from credential persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write credential file: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to serialize credential: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// Durable store for the session credential.
///
/// Lifecycle: written on successful login or refresh, read on every
/// outbound call, cleared on logout or unrecoverable refresh failure.
pub trait CredentialStore: Send + Sync {
    /// Current credential, if a session exists.
    fn load(&self) -> Option<Credential>;

    /// Persist a credential, replacing any existing one.
    fn store(&self, credential: &Credential) -> Result<(), StoreError>;

    /// Forget the credential.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Ephemeral credential store for tests and embedded use.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Option<Credential>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start out already holding a credential.
    #[must_use]
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            inner: RwLock::new(Some(credential)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<Credential> {
        self.inner.read().clone()
    }

    fn store(&self, credential: &Credential) -> Result<(), StoreError> {
        *self.inner.write() = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.inner.write() = None;
        Ok(())
    }
}

/// JSON-file-backed credential store.
///
/// Reads the file on every `load` so concurrent `tradelog` invocations see
/// the latest session.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location under the user config directory.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tradelog")
            .join("credentials.json")
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<Credential> {
        let bytes = fs::read(&self.path).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    fn store(&self, credential: &Credential) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(StoreError::Write)?;
        }
        let json = serde_json::to_vec_pretty(credential).map_err(StoreError::Serialization)?;
        fs::write(&self.path, json).map_err(StoreError::Write)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600));
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Write(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryCredentialStore::new();
        assert!(store.load().is_none());

        let credential = Credential::new("access", "refresh");
        store.store(&credential).unwrap();
        assert_eq!(store.load(), Some(credential));

        store.clear().unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));

        assert!(store.load().is_none());

        let credential = Credential::new("access", "refresh");
        store.store(&credential).unwrap();
        assert_eq!(store.load(), Some(credential));

        store.clear().unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn file_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested").join("credentials.json"));
        store.store(&Credential::new("a", "r")).unwrap();
        assert!(store.load().is_some());
    }
}
