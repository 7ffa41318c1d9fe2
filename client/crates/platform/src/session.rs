//! Provider session token holder
//!
//! The hosted provider hands out an access token on sign-in. Whoever talks to
//! the provider needs it; nobody above the adapters ever sees it. Tokens live
//! in memory and, when a file is configured, are mirrored to disk so a later
//! process resumes the same provider session.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

/// Tokens issued by the provider for one signed-in session
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSession {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl fmt::Debug for ProviderSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSession")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Shared handle to the current provider session (cheap to clone)
#[derive(Clone, Default)]
pub struct SessionTokens {
    current: Arc<RwLock<Option<ProviderSession>>>,
    file: Option<Arc<PathBuf>>,
}

impl SessionTokens {
    /// Tokens that die with the process
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Tokens mirrored to `path`; an existing readable file is loaded
    pub async fn persisted(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let loaded = load_file(&path).await;
        if loaded.is_some() {
            tracing::debug!(path = %path.display(), "Restored provider session from disk");
        }
        Self {
            current: Arc::new(RwLock::new(loaded)),
            file: Some(Arc::new(path)),
        }
    }

    pub async fn access_token(&self) -> Option<String> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    pub async fn is_present(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Replace the held session
    ///
    /// Failing to write the mirror file is logged and otherwise ignored: the
    /// in-memory session is still valid for this process. The write guard is
    /// held across the file write so memory and disk agree on the last store.
    pub async fn store(&self, session: ProviderSession) {
        let mut current = self.current.write().await;
        if let Some(path) = &self.file {
            match serde_json::to_vec(&session) {
                Ok(bytes) => {
                    if let Err(e) = write_private(path, &bytes).await {
                        tracing::warn!(error = %e, path = %path.display(), "Failed to persist provider session");
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to encode provider session");
                }
            }
        }
        *current = Some(session);
    }

    /// Forget the held session (and its mirror file)
    pub async fn clear(&self) {
        let mut current = self.current.write().await;
        *current = None;
        if let Some(path) = &self.file {
            match tokio::fs::remove_file(path.as_path()).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(error = %e, path = %path.display(), "Failed to remove provider session file");
                }
            }
        }
    }
}

/// Sibling path the mirror is staged in before it replaces the target
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `bytes` to `path` readable by the owner only, replacing it atomically
async fn write_private(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let staging = staging_path(path);

    // A leftover from a crashed write keeps its old mode unless recreated
    match tokio::fs::remove_file(&staging).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(&staging).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    drop(file);

    tokio::fs::rename(&staging, path).await
}

async fn load_file(path: &Path) -> Option<ProviderSession> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "Failed to read provider session file");
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "Ignoring unreadable provider session file");
            None
        }
    }
}
