use crate::client::ClientRef;
use crate::error::Result;
use crate::time;
use crate::types::require;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server license state from `getLicense`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct License {
    pub valid: bool,
    pub email: Option<String>,
    pub license_expires: Option<DateTime<Utc>>,
    pub trial_expires: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LicenseFragment {
    valid: Option<bool>,
    email: Option<String>,
    license_expires: Option<String>,
    trial_expires: Option<String>,
}

impl_from_json!(License => LicenseFragment);

impl License {
    pub(crate) fn from_fragment(f: LicenseFragment, _client: &ClientRef) -> Result<Self> {
        Ok(Self {
            valid: require(f.valid, "license", "valid")?,
            email: f.email,
            license_expires: time::parse_opt(f.license_expires.as_deref())?,
            trial_expires: time::parse_opt(f.trial_expires.as_deref())?,
        })
    }
}

/// Progress of a library scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStatus {
    pub scanning: bool,
    /// Files scanned so far.
    pub count: Option<u64>,
}

/// An OpenSubsonic extension and the versions the server implements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenSubsonicExtension {
    pub name: String,
    #[serde(default)]
    pub versions: Vec<u32>,
}
