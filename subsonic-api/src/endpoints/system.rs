//! System API: connectivity and server capabilities.
//!
//! Endpoints: `ping`, `getLicense`, `getOpenSubsonicExtensions`
//!
//! `getOpenSubsonicExtensions` response:
//! ```json
//! {
//!   "status": "ok",
//!   "openSubsonicExtensions": [
//!     { "name": "formPost", "versions": [1] },
//!     { "name": "songLyrics", "versions": [1] }
//!   ]
//! }
//! ```

use crate::client::SubsonicClient;
use crate::error::Result;
use crate::params::Params;
use crate::types::{License, OpenSubsonicExtension};

impl SubsonicClient {
    /// Check connectivity and credentials.
    ///
    /// Succeeds with no data; wrong credentials surface as
    /// [`ErrorCode::WrongCredentials`](crate::ErrorCode::WrongCredentials).
    pub fn ping(&self) -> Result<()> {
        self.call("ping", &Params::new())
    }

    pub fn get_license(&self) -> Result<License> {
        self.fetch("getLicense", &Params::new(), "license")
    }

    /// Extensions supported by an OpenSubsonic server. Empty for plain
    /// Subsonic servers that answer the call without the key.
    pub fn get_open_subsonic_extensions(&self) -> Result<Vec<OpenSubsonicExtension>> {
        let mut payload = self.request("getOpenSubsonicExtensions", &Params::new())?;
        match payload.remove("openSubsonicExtensions") {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }
}
