use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::error::{ClientError, Result};

pub const DEFAULT_GRAPHQL_URL: &str = "http://localhost:3000/graphql";
pub const SETTINGS_FILE: &str = "deptadmin.toml";
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub graphql_url: String,
    /// `None` when no per-user data directory exists and none was configured.
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            graphql_url: DEFAULT_GRAPHQL_URL.into(),
            data_dir: default_data_dir(),
        }
    }
}

impl ClientSettings {
    pub fn endpoint(&self) -> Result<Url> {
        parse_endpoint(&self.graphql_url)
    }

    pub fn token_path(&self) -> Result<PathBuf> {
        self.data_dir
            .as_ref()
            .map(|dir| dir.join(SESSION_FILE))
            .ok_or(ClientError::NoDataDir)
    }

    /// Command-line flags win over file and environment.
    pub fn with_overrides(mut self, graphql_url: Option<String>, data_dir: Option<PathBuf>) -> Self {
        if let Some(url) = graphql_url.filter(|url| !url.trim().is_empty()) {
            self.graphql_url = url;
        }
        if let Some(dir) = data_dir {
            self.data_dir = Some(dir);
        }
        self
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    graphql_url: Option<String>,
    data_dir: Option<PathBuf>,
}

/// Defaults, then `deptadmin.toml` in the working directory, then environment.
pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from(
    file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings {
        graphql_url: DEFAULT_GRAPHQL_URL.into(),
        data_dir: default_data_dir(),
    };

    if let Ok(raw) = fs::read_to_string(file) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.graphql_url {
                    settings.graphql_url = v;
                }
                if let Some(v) = file_cfg.data_dir {
                    settings.data_dir = Some(v);
                }
            }
            Err(err) => warn!(path = %file.display(), "ignoring malformed settings file: {err}"),
        }
    }

    if let Some(v) = non_empty(&env, "GRAPHQL_URL") {
        settings.graphql_url = v;
    }
    if let Some(v) = non_empty(&env, "APP__GRAPHQL_URL") {
        settings.graphql_url = v;
    }

    if let Some(v) = non_empty(&env, "DEPTADMIN_DATA_DIR") {
        settings.data_dir = Some(PathBuf::from(v));
    }
    if let Some(v) = non_empty(&env, "APP__DATA_DIR") {
        settings.data_dir = Some(PathBuf::from(v));
    }

    settings
}

fn non_empty(env: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    env(name).filter(|value| !value.trim().is_empty())
}

/// Platform local data directory, e.g. `~/.local/share/deptadmin` or
/// `%LOCALAPPDATA%\deptadmin`.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("deptadmin"))
}

pub fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|err| ClientError::InvalidEndpoint {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ClientError::InvalidEndpoint {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
