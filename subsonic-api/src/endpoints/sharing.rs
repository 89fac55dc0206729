//! Sharing API.
//!
//! Endpoints: `getShares`, `createShare`, `updateShare`, `deleteShare`

use crate::client::SubsonicClient;
use crate::endpoints::find;
use crate::error::{Result, SubsonicError};
use crate::params::Params;
use crate::types::Share;
use chrono::{DateTime, Utc};

impl SubsonicClient {
    pub fn get_shares(&self) -> Result<Vec<Share>> {
        self.fetch_list("getShares", &Params::new(), "shares", "share")
    }

    pub fn get_share(&self, id: &str) -> Result<Share> {
        find(self.get_shares()?, "share", id, |s| s.id == id)
    }

    /// Share songs, albums or folders by id.
    pub fn create_share(
        &self,
        ids: &[&str],
        description: Option<&str>,
        expires: Option<DateTime<Utc>>,
    ) -> Result<Share> {
        let params = Params::new()
            .list("id", ids)
            .opt("description", description)
            .opt("expires", expires);
        let mut shares: Vec<Share> = self.fetch_list("createShare", &params, "shares", "share")?;
        if shares.is_empty() {
            return Err(SubsonicError::MalformedResponse(
                "`createShare` returned no share".into(),
            ));
        }
        Ok(shares.swap_remove(0))
    }

    pub fn update_share(
        &self,
        id: &str,
        description: Option<&str>,
        expires: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let params = Params::new()
            .set("id", id)
            .opt("description", description)
            .opt("expires", expires);
        self.call("updateShare", &params)
    }

    pub fn delete_share(&self, id: &str) -> Result<()> {
        self.call("deleteShare", &Params::new().set("id", id))
    }
}
