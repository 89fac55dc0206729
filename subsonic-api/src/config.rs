//! Client configuration and the on-disk login profile.
//!
//! The profile file lives at `~/.config/subsonic-api/profile.json`:
//!
//! ```json
//! {
//!   "url": "music.example.com",
//!   "username": "alice",
//!   "password": "sesame",
//!   "client": "subsonic-cli",
//!   "use_https": true,
//!   "use_token": true,
//!   "use_get": false
//! }
//! ```
//!
//! The password is stored as entered; token auth needs it to sign every
//! request, so there is nothing safer to persist.

use crate::auth::Credentials;
use crate::error::{Result, SubsonicError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default value of the `c` parameter.
pub const DEFAULT_CLIENT_NAME: &str = "subsonic-api";

/// How parameters travel to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RequestMethod {
    /// URL-encoded form body. Keeps credentials out of server access logs.
    #[default]
    Post,
    /// Query string.
    Get,
}

/// Everything needed to build a [`SubsonicClient`](crate::SubsonicClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server address, with or without scheme (`music.example.com`,
    /// `https://music.example.com/`).
    pub url: String,
    pub credentials: Credentials,
    pub method: RequestMethod,
    /// Whole-request timeout handed to the HTTP client.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            url: url.into(),
            credentials,
            method: RequestMethod::Post,
            timeout: Duration::from_secs(30),
        }
    }

    #[must_use]
    pub fn method(mut self, method: RequestMethod) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Persistent login profile backed by a JSON file on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default = "default_client")]
    pub client: String,
    #[serde(default = "default_true")]
    pub use_https: bool,
    #[serde(default = "default_true")]
    pub use_token: bool,
    #[serde(default)]
    pub use_get: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            url: None,
            username: None,
            password: None,
            client: default_client(),
            use_https: true,
            use_token: true,
            use_get: false,
        }
    }
}

impl Profile {
    /// Load the profile from `~/.config/subsonic-api/profile.json`.
    ///
    /// Returns a default (empty) profile if the file does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Save the profile to disk, creating parent directories if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(&path, data)?;
        Ok(())
    }

    /// Delete the profile file from disk.
    pub fn clear() -> Result<()> {
        let path = Self::path()?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Whether server, username and password are all set (not validated).
    pub fn is_logged_in(&self) -> bool {
        self.url.as_ref().is_some_and(|u| !u.is_empty())
            && self.username.as_ref().is_some_and(|u| !u.is_empty())
            && self.password.is_some()
    }

    /// Turn the profile into a client configuration.
    pub fn to_config(&self) -> Result<ClientConfig> {
        let (Some(url), Some(username), Some(password)) =
            (&self.url, &self.username, &self.password)
        else {
            return Err(SubsonicError::Other("no saved login profile".into()));
        };

        let credentials = Credentials {
            username: username.clone(),
            password: password.clone(),
            client: self.client.clone(),
            use_https: self.use_https,
            use_token: self.use_token,
        };
        let method = if self.use_get {
            RequestMethod::Get
        } else {
            RequestMethod::Post
        };
        Ok(ClientConfig::new(url.clone(), credentials).method(method))
    }

    fn path() -> Result<PathBuf> {
        let config = dirs::config_dir()
            .ok_or_else(|| SubsonicError::Other("cannot determine config directory".into()))?;
        Ok(config.join("subsonic-api").join("profile.json"))
    }
}

fn default_client() -> String {
    DEFAULT_CLIENT_NAME.to_owned()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_profile_fills_defaults() {
        let profile: Profile =
            serde_json::from_str(r#"{"url":"demo.example","username":"a","password":"b"}"#)
                .unwrap();
        assert!(profile.is_logged_in());
        assert!(profile.use_https);
        assert!(profile.use_token);
        assert!(!profile.use_get);
        assert_eq!(profile.client, DEFAULT_CLIENT_NAME);
    }

    #[test]
    fn empty_profile_cannot_build_config() {
        let profile = Profile::default();
        assert!(!profile.is_logged_in());
        assert!(profile.to_config().is_err());
    }

    #[test]
    fn profile_maps_onto_config() {
        let profile = Profile {
            url: Some("demo.example".into()),
            username: Some("alice".into()),
            password: Some("pw".into()),
            use_token: false,
            use_get: true,
            ..Profile::default()
        };
        let config = profile.to_config().unwrap();
        assert_eq!(config.method, RequestMethod::Get);
        assert!(!config.credentials.use_token);
        assert_eq!(config.credentials.username, "alice");
    }
}
