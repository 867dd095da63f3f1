use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use anyhow::{anyhow, Context};

/// The key, under which the session token is persisted
pub const TOKEN_KEY: &str = "token";

/// The single source of truth for the credential of the logged-in user. \
/// Every view receives one of these when it is constructed and reads the token
/// again for every request that needs it.
pub trait SessionStore: Debug + Send + Sync {

    /// The current session token, if there is one
    fn token(&self) -> Option<String>;

    /// Replaces the current session token
    fn store_token(&self, token: &str) -> anyhow::Result<()>;

    /// Forgets the current session token
    fn clear(&self) -> anyhow::Result<()>;
}

/// A [`SessionStore`], that only lives as long as the process
#[derive(Debug, Default)]
pub struct MemorySession {
    token: Mutex<Option<String>>,
}

impl MemorySession {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl SessionStore for MemorySession {
    fn token(&self) -> Option<String> {
        self.token.lock()
            .map(|token| (*token).clone())
            .unwrap_or_default()
    }

    fn store_token(&self, token: &str) -> anyhow::Result<()> {
        let mut current = self.token.lock().map_err(|_| anyhow!("Session lock poisoned"))?;
        *current = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        let mut current = self.token.lock().map_err(|_| anyhow!("Session lock poisoned"))?;
        *current = None;
        Ok(())
    }
}

/// A [`SessionStore`] backed by a small JSON key-value file. \
/// The file is read on every access, so other processes writing to it are picked up.
#[derive(Debug)]
pub struct FileSession {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileSession {

    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> anyhow::Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Could not read session file {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Could not parse session file {}", self.path.display()))
    }

    fn update_entries(&self, update: impl FnOnce(&mut HashMap<String, String>)) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().map_err(|_| anyhow!("Session lock poisoned"))?;
        let mut entries = self.read_entries()?;
        update(&mut entries);
        let content = serde_json::to_string_pretty(&entries)
            .context("Could not serialize session entries")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Could not write session file {}", self.path.display()))
    }
}

impl SessionStore for FileSession {
    fn token(&self) -> Option<String> {
        match self.read_entries() {
            Ok(mut entries) => entries.remove(TOKEN_KEY),
            Err(err) => {
                log::warn!("Ignoring unreadable session: {:#}", err);
                None
            }
        }
    }

    fn store_token(&self, token: &str) -> anyhow::Result<()> {
        self.update_entries(|entries| {
            entries.insert(TOKEN_KEY.to_string(), token.to_string());
        })
    }

    fn clear(&self) -> anyhow::Result<()> {
        self.update_entries(|entries| {
            entries.remove(TOKEN_KEY);
        })
    }
}
