use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use shared::protocol::LOGIN_PATH;
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "client.toml";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
/// Prefix the backend puts in front of the `GET /` body for signed-in sessions.
pub const DEFAULT_AUTH_MARKER: &str = "Autenticado";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub auth_marker: String,
    /// `name=value` cookie seeded into the jar before the first request.
    pub session_cookie: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            auth_marker: DEFAULT_AUTH_MARKER.into(),
            session_cookie: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    auth_marker: Option<String>,
    session_cookie: Option<String>,
}

impl ClientSettings {
    /// Base URL with a trailing slash so endpoint paths join beneath it.
    pub fn base_url(&self) -> Result<Url> {
        let raw = self.api_base_url.trim();
        let mut url = Url::parse(raw)
            .with_context(|| format!("invalid backend base url '{raw}'"))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("backend base url '{raw}' must use http or https");
        }
        if url.cannot_be_a_base() {
            bail!("backend base url '{raw}' cannot hold endpoint paths");
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }

    /// Where the browser goes to start the marketplace sign-in.
    pub fn login_url(&self) -> Result<Url> {
        self.base_url()?
            .join(LOGIN_PATH)
            .context("failed to build login url")
    }
}

pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the optional settings file, then environment variables.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.api_base_url {
                    settings.api_base_url = v;
                }
                if let Some(v) = file_cfg.auth_marker {
                    settings.auth_marker = v;
                }
                if let Some(v) = file_cfg.session_cookie {
                    settings.session_cookie = Some(v);
                }
            }
            Err(err) => warn!(path = %path.display(), %err, "ignoring unreadable settings file"),
        }
    }

    if let Some(v) = env("API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("APP__AUTH_MARKER") {
        settings.auth_marker = v;
    }

    if let Some(v) = env("APP__SESSION_COOKIE") {
        settings.session_cookie = Some(v);
    }

    settings
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
