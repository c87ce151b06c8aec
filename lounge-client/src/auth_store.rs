// lounge-client/src/auth_store.rs
// 登录状态持久化 - JSON 文件存储
//
// The storage file is a flat JSON object of namespaced keys, the auth state
// living under `persist:auth` as `{ "version": 1, "state": { .. } }`.
// Documents written before versioning held the state fields directly under
// the key and are migrated on read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared::client::UserInfo;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::ClientResult;

pub const AUTH_KEY: &str = "persist:auth";
pub const AUTH_VERSION: u32 = 1;
const STORAGE_FILE: &str = "storage.json";

/// Persisted login state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
    #[serde(default, alias = "isAuthenticated")]
    pub is_authenticated: bool,
}

impl AuthState {
    pub fn signed_in(token: String, user: UserInfo) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
            is_authenticated: true,
        }
    }

    /// A flag without a token is not a session
    fn normalized(self) -> Self {
        if self.is_authenticated && self.token.is_some() {
            self
        } else {
            Self::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Versioned {
    version: u32,
    state: AuthState,
}

/// Bring any stored document up to the current version
fn migrate(doc: Value) -> Option<AuthState> {
    let version = doc.get("version").and_then(Value::as_u64);
    match version {
        Some(v) if v == u64::from(AUTH_VERSION) => serde_json::from_value::<Versioned>(doc)
            .ok()
            .map(|d| d.state),
        // v0: unversioned, fields at the top level
        None => serde_json::from_value::<AuthState>(doc).ok(),
        Some(v) => {
            tracing::warn!(version = v, "Unknown auth state version, ignoring");
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct PersistedAuthStore {
    path: PathBuf,
}

impl PersistedAuthStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(STORAGE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> ClientResult<Map<String, Value>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<Map<String, Value>>(&text) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Storage file unreadable, starting empty");
                Ok(Map::new())
            }
        }
    }

    fn write_all(&self, map: &Map<String, Value>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(map)?)?;
        Ok(())
    }

    /// Load the stored state, migrating older documents in place
    pub fn hydrate(&self) -> ClientResult<AuthState> {
        let map = self.read_all()?;
        let Some(doc) = map.get(AUTH_KEY).cloned() else {
            return Ok(AuthState::default());
        };

        let was_current = doc.get("version").and_then(Value::as_u64) == Some(u64::from(AUTH_VERSION));
        let state = migrate(doc).unwrap_or_default().normalized();
        if !was_current {
            tracing::info!("Migrating persisted auth state to v{}", AUTH_VERSION);
            self.save(&state)?;
        }
        Ok(state)
    }

    pub fn save(&self, state: &AuthState) -> ClientResult<()> {
        let mut map = self.read_all()?;
        let doc = Versioned {
            version: AUTH_VERSION,
            state: state.clone(),
        };
        map.insert(AUTH_KEY.to_string(), serde_json::to_value(doc)?);
        self.write_all(&map)
    }

    /// Remove the auth key, leaving other keys alone
    pub fn purge(&self) -> ClientResult<()> {
        let mut map = self.read_all()?;
        if map.remove(AUTH_KEY).is_some() {
            self.write_all(&map)?;
        }
        Ok(())
    }
}
