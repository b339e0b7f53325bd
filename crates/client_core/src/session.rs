//! Bearer-token session and its durable storage.

use std::{
    collections::HashSet,
    fs,
    path::PathBuf,
    sync::Mutex,
};

use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use shared::domain::User;
use tracing::{info, warn};

use crate::error::Result;

/// Key the token is persisted under.
pub const TOKEN_KEY: &str = "token";

pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default, rename = "token", skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// Keeps `{"token": "..."}` in a JSON file.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str::<StoredSession>(&raw) {
            Ok(stored) => Ok(stored.token),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    "ignoring unreadable session file: {err}"
                );
                Ok(None)
            }
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let stored = StoredSession {
            token: Some(token.to_string()),
        };
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(&stored)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Ok(())
    }
}

#[derive(Deserialize)]
struct ExpiryClaims {
    #[serde(default)]
    exp: Option<i64>,
}

/// Reads `exp` from a JWT without verifying its signature. Opaque tokens
/// (anything that does not decode) never count as expired.
fn token_expired(token: &str, now_unix: i64) -> bool {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();

    match jsonwebtoken::decode::<ExpiryClaims>(token, &DecodingKey::from_secret(&[]), &validation)
    {
        Ok(data) => data.claims.exp.is_some_and(|exp| exp <= now_unix),
        Err(_) => false,
    }
}

pub struct Session {
    token: Option<String>,
    user: Option<User>,
    store: Box<dyn TokenStore>,
}

impl Session {
    /// Restores the persisted token, discarding one that has already expired.
    pub fn start(store: Box<dyn TokenStore>) -> Result<Self> {
        let mut token = store.load()?.filter(|token| !token.trim().is_empty());
        if let Some(existing) = &token {
            if token_expired(existing, chrono::Utc::now().timestamp()) {
                info!("discarding expired session token");
                store.clear()?;
                token = None;
            }
        }
        Ok(Self {
            token,
            user: None,
            store,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Stores a fresh token. Any remembered user belongs to the old identity and is dropped.
    pub fn establish(&mut self, token: String) -> Result<()> {
        self.store.save(&token)?;
        self.token = Some(token);
        self.user = None;
        Ok(())
    }

    pub fn remember_user(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Drops the token and all in-memory user state.
    pub fn clear(&mut self) -> Result<()> {
        self.token = None;
        self.user = None;
        self.store.clear()
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
