//! Jukebox API.
//!
//! Endpoint: `jukeboxControl?action=<action>`
//!
//! `get` answers with the queue:
//! ```json
//! { "jukeboxPlaylist": { "currentIndex": 0, "playing": true, "gain": 0.75,
//!                        "position": 12, "entry": [ { "id": "1" } ] } }
//! ```
//! Every other action answers with the status only:
//! ```json
//! { "jukeboxStatus": { "currentIndex": 0, "playing": true, "gain": 0.75 } }
//! ```

use crate::client::SubsonicClient;
use crate::error::{Result, SubsonicError};
use crate::params::Params;
use crate::types::Jukebox;

const STATUS_KEY: &str = "jukeboxStatus";

fn action(name: &str) -> Params {
    Params::new().set("action", name)
}

impl SubsonicClient {
    fn jukebox_control(&self, params: &Params) -> Result<Jukebox> {
        self.fetch("jukeboxControl", params, STATUS_KEY)
    }

    /// Status together with the queued songs.
    pub fn jukebox_get(&self) -> Result<Jukebox> {
        self.fetch("jukeboxControl", &action("get"), "jukeboxPlaylist")
    }

    /// Status without the queue.
    pub fn jukebox_status(&self) -> Result<Jukebox> {
        self.jukebox_control(&action("status"))
    }

    pub fn jukebox_start(&self) -> Result<Jukebox> {
        self.jukebox_control(&action("start"))
    }

    pub fn jukebox_stop(&self) -> Result<Jukebox> {
        self.jukebox_control(&action("stop"))
    }

    /// Jump to queue position `index`, `offset` seconds into the song.
    pub fn jukebox_skip(&self, index: u32, offset: Option<u32>) -> Result<Jukebox> {
        self.jukebox_control(&action("skip").set("index", index).opt("offset", offset))
    }

    pub fn jukebox_add(&self, song_ids: &[&str]) -> Result<Jukebox> {
        self.jukebox_control(&action("add").list("id", song_ids))
    }

    /// Replace the queue with `song_ids`.
    pub fn jukebox_set(&self, song_ids: &[&str]) -> Result<Jukebox> {
        self.jukebox_control(&action("set").list("id", song_ids))
    }

    pub fn jukebox_remove(&self, index: u32) -> Result<Jukebox> {
        self.jukebox_control(&action("remove").set("index", index))
    }

    pub fn jukebox_clear(&self) -> Result<Jukebox> {
        self.jukebox_control(&action("clear"))
    }

    pub fn jukebox_shuffle(&self) -> Result<Jukebox> {
        self.jukebox_control(&action("shuffle"))
    }

    /// Set the volume, from `0.0` to `1.0`.
    ///
    /// Other values (and NaN) fail with [`SubsonicError::InvalidArgument`]
    /// without contacting the server.
    pub fn jukebox_set_gain(&self, gain: f32) -> Result<Jukebox> {
        if !(0.0..=1.0).contains(&gain) {
            return Err(SubsonicError::InvalidArgument(format!(
                "gain must be between 0.0 and 1.0, got {gain}"
            )));
        }
        self.jukebox_control(&action("setGain").set("gain", gain))
    }
}
