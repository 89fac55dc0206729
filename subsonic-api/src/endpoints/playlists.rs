//! Playlist API.
//!
//! Endpoints: `getPlaylists`, `getPlaylist`, `createPlaylist`,
//! `updatePlaylist`, `deletePlaylist`
//!
//! `getPlaylist` response:
//! ```json
//! {
//!   "playlist": {
//!     "id": "15", "name": "Chill", "owner": "admin", "public": false,
//!     "songCount": 2, "duration": 490,
//!     "created": "2023-03-01T10:00:00.000Z",
//!     "allowedUser": ["sindre"],
//!     "entry": [ { "id": "657", "title": "..." }, { "id": "658", "title": "..." } ]
//!   }
//! }
//! ```

use crate::client::SubsonicClient;
use crate::error::Result;
use crate::params::Params;
use crate::types::Playlist;

impl SubsonicClient {
    /// Playlists visible to the current user, or owned by `username`
    /// (admin only).
    pub fn get_playlists(&self, username: Option<&str>) -> Result<Vec<Playlist>> {
        let params = Params::new().opt("username", username);
        self.fetch_list("getPlaylists", &params, "playlists", "playlist")
    }

    /// A playlist with its songs.
    pub fn get_playlist(&self, id: &str) -> Result<Playlist> {
        self.fetch("getPlaylist", &Params::new().set("id", id), "playlist")
    }

    pub fn create_playlist(&self, name: &str, song_ids: &[&str]) -> Result<Playlist> {
        let params = Params::new().set("name", name).list("songId", song_ids);
        self.fetch("createPlaylist", &params, "playlist")
    }

    /// Change metadata and contents. `None` fields are left as they are.
    /// `remove_indexes` are positions in the playlist before the update.
    pub fn update_playlist(
        &self,
        id: &str,
        name: Option<&str>,
        comment: Option<&str>,
        public: Option<bool>,
        add_song_ids: &[&str],
        remove_indexes: &[u32],
    ) -> Result<()> {
        let params = Params::new()
            .set("playlistId", id)
            .opt("name", name)
            .opt("comment", comment)
            .opt("public", public)
            .list("songIdToAdd", add_song_ids)
            .list("songIndexToRemove", remove_indexes);
        self.call("updatePlaylist", &params)
    }

    pub fn delete_playlist(&self, id: &str) -> Result<()> {
        self.call("deletePlaylist", &Params::new().set("id", id))
    }
}
