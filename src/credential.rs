//! Credential storage
//!
//! One opaque API key, persisted under a fixed key. No format validation
//! and no expiry; a write always replaces what was there.

use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

use crate::error::{PolishError, PolishResult};

/// Fixed storage key for the Gemini API key
pub const STORAGE_KEY: &str = "gemini_api_key";

/// Environment override for a single run
pub const ENV_API_KEY: &str = "POLISH_API_KEY";

/// Opaque API access token
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Short hint safe to print, e.g. `****abcd`
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{}", tail)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}

/// Trait for credential backends
pub trait CredentialStore: Send + Sync {
    fn get(&self) -> PolishResult<Option<Credential>>;

    fn set(&self, credential: Credential) -> PolishResult<()>;
}

/// JSON key-value file on disk
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform data directory
    pub fn open_default() -> Self {
        Self::new(default_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> PolishResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(PolishError::Credential(format!(
                "{} is not a JSON object",
                self.path.display()
            ))),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> PolishResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> PolishResult<Option<Credential>> {
        let map = self.read_map()?;
        Ok(map
            .get(STORAGE_KEY)
            .and_then(|v| v.as_str())
            .map(Credential::new))
    }

    fn set(&self, credential: Credential) -> PolishResult<()> {
        let mut map = self.read_map()?;
        map.insert(
            STORAGE_KEY.to_string(),
            Value::String(credential.expose().to_string()),
        );
        self.write_map(&map)?;
        debug!("🔑 Credential written to {}", self.path.display());
        Ok(())
    }
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    value: Mutex<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(credential: Credential) -> Self {
        Self {
            value: Mutex::new(Some(credential)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> PolishResult<Option<Credential>> {
        Ok(self.value.lock()?.clone())
    }

    fn set(&self, credential: Credential) -> PolishResult<()> {
        *self.value.lock()? = Some(credential);
        Ok(())
    }
}

pub fn default_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("polish")
        .join("credentials.json")
}

/// Credential for this run: the environment override wins over the store
pub fn resolve(store: &dyn CredentialStore) -> PolishResult<Option<Credential>> {
    resolve_with(store, std::env::var(ENV_API_KEY).ok())
}

/// Same as [`resolve`] with the override value supplied by the caller
pub fn resolve_with(
    store: &dyn CredentialStore,
    override_value: Option<String>,
) -> PolishResult<Option<Credential>> {
    if let Some(value) = override_value {
        if !value.trim().is_empty() {
            debug!("Using credential from {}", ENV_API_KEY);
            return Ok(Some(Credential::new(value.trim())));
        }
    }
    store.get()
}
