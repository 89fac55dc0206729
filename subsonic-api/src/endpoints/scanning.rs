//! Library scanning.
//!
//! Endpoints: `getScanStatus`, `startScan`

use crate::client::SubsonicClient;
use crate::error::Result;
use crate::params::Params;
use crate::types::ScanStatus;

impl SubsonicClient {
    pub fn get_scan_status(&self) -> Result<ScanStatus> {
        self.fetch_record("getScanStatus", &Params::new(), "scanStatus")
    }

    /// Start a rescan of the media folders. Returns immediately with the
    /// initial status.
    pub fn start_scan(&self) -> Result<ScanStatus> {
        self.fetch_record("startScan", &Params::new(), "scanStatus")
    }
}
