//! Annotation API: stars, ratings and scrobbles.
//!
//! Endpoints: `star`, `unstar`, `setRating`, `scrobble`

use crate::client::SubsonicClient;
use crate::endpoints::StarTarget;
use crate::error::{Result, SubsonicError};
use crate::params::Params;
use chrono::{DateTime, Utc};

impl SubsonicClient {
    pub fn star(&self, target: StarTarget, id: &str) -> Result<()> {
        self.call("star", &Params::new().set(target.param(), id))
    }

    pub fn unstar(&self, target: StarTarget, id: &str) -> Result<()> {
        self.call("unstar", &Params::new().set(target.param(), id))
    }

    /// Rate an item from 1 to 5 stars.
    ///
    /// Other values fail with [`SubsonicError::InvalidArgument`] without
    /// contacting the server. Use [`remove_rating`](Self::remove_rating) to
    /// clear a rating.
    pub fn set_rating(&self, id: &str, rating: u8) -> Result<()> {
        if !(1..=5).contains(&rating) {
            return Err(SubsonicError::InvalidArgument(format!(
                "rating must be between 1 and 5, got {rating}"
            )));
        }
        self.call("setRating", &Params::new().set("id", id).set("rating", rating))
    }

    pub fn remove_rating(&self, id: &str) -> Result<()> {
        self.call("setRating", &Params::new().set("id", id).set("rating", 0u8))
    }

    /// Register plays (`submission = true`) or "now playing" notices.
    /// `time` is when the song was played, defaulting to now on the server.
    pub fn scrobble(
        &self,
        ids: &[&str],
        time: Option<DateTime<Utc>>,
        submission: bool,
    ) -> Result<()> {
        let params = Params::new()
            .list("id", ids)
            .opt("time", time)
            .set("submission", submission);
        self.call("scrobble", &params)
    }
}
