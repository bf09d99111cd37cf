//! Time-gated cache for the cat API key stored in a plain-text file.
//!
//! The key file is re-read at most once per refresh interval no matter how
//! many commands arrive. Refreshes take the write lock; URL construction only
//! takes the read lock, so concurrent readers never block each other.
//!
//! [`CredentialCache::refresh`] reads the file synchronously while holding the
//! write lock. Async callers should run it on a blocking thread, as
//! `CatCommandRuntime` does with `tokio::task::spawn_blocking`.

use std::{
    path::{Path, PathBuf},
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::{Duration, Instant},
};

pub const DEFAULT_KEY_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Default)]
struct CredentialState {
    key: String,
    key_path: Option<PathBuf>,
    refresh_after: Option<Instant>,
}

#[derive(Debug)]
/// Public struct `CredentialCache` used across meow components.
pub struct CredentialCache {
    refresh_interval: Duration,
    state: RwLock<CredentialState>,
}

impl Default for CredentialCache {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_REFRESH_INTERVAL)
    }
}

impl CredentialCache {
    pub fn new(refresh_interval: Duration) -> Self {
        Self {
            refresh_interval,
            state: RwLock::new(CredentialState::default()),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Re-reads the key from `key_path` unless the current window is still open.
    /// Returns `true` when a refresh actually happened.
    pub fn refresh(&self, key_path: Option<&Path>) -> bool {
        self.refresh_at(key_path, Instant::now())
    }

    pub fn refresh_at(&self, key_path: Option<&Path>, now: Instant) -> bool {
        let mut state = self.write_state();
        if state.refresh_after.is_some_and(|deadline| now < deadline) {
            return false;
        }
        state.refresh_after = Some(now + self.refresh_interval);

        let Some(path) = key_path.filter(|path| !path.as_os_str().is_empty()) else {
            state.key.clear();
            state.key_path = None;
            return true;
        };
        state.key_path = Some(path.to_path_buf());
        match std::fs::read_to_string(path) {
            Ok(raw) => {
                state.key = raw.trim().to_string();
                tracing::debug!(
                    key_path = %path.display(),
                    has_key = !state.key.is_empty(),
                    "refreshed cat api key"
                );
            }
            Err(error) => {
                tracing::error!(
                    key_path = %path.display(),
                    error = %error,
                    "failed to read cat api key"
                );
                state.key.clear();
            }
        }
        true
    }

    /// Returns the cached key, or an empty string when running keyless.
    pub fn current_key(&self) -> String {
        self.read_state().key.clone()
    }

    pub fn key_path(&self) -> Option<PathBuf> {
        self.read_state().key_path.clone()
    }

    /// Runs `f` with the key while holding the shared lock.
    pub(crate) fn with_key<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let state = self.read_state();
        f(&state.key)
    }

    fn read_state(&self) -> RwLockReadGuard<'_, CredentialState> {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CredentialState> {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
