//! Bookmarks and the saved play queue.
//!
//! Endpoints: `getBookmarks`, `createBookmark`, `deleteBookmark`,
//! `getPlayQueue`, `savePlayQueue`

use crate::client::SubsonicClient;
use crate::endpoints::find;
use crate::error::Result;
use crate::params::Params;
use crate::types::{Bookmark, FromJson, PlayQueue};
use serde_json::{Map, Value};

impl SubsonicClient {
    pub fn get_bookmarks(&self) -> Result<Vec<Bookmark>> {
        self.fetch_list("getBookmarks", &Params::new(), "bookmarks", "bookmark")
    }

    /// The current user's bookmark on a song.
    pub fn get_bookmark(&self, song_id: &str) -> Result<Bookmark> {
        find(self.get_bookmarks()?, "bookmark", song_id, |b| b.song.id == song_id)
    }

    /// Create or overwrite the bookmark on a song. `position` is in
    /// milliseconds.
    pub fn save_bookmark(&self, song_id: &str, position: u64, comment: Option<&str>) -> Result<()> {
        let params = Params::new()
            .set("id", song_id)
            .set("position", position)
            .opt("comment", comment);
        self.call("createBookmark", &params)
    }

    /// Like [`save_bookmark`](Self::save_bookmark), returning the stored
    /// bookmark.
    pub fn create_bookmark(
        &self,
        song_id: &str,
        position: u64,
        comment: Option<&str>,
    ) -> Result<Bookmark> {
        self.save_bookmark(song_id, position, comment)?;
        self.get_bookmark(song_id)
    }

    pub fn delete_bookmark(&self, song_id: &str) -> Result<()> {
        self.call("deleteBookmark", &Params::new().set("id", song_id))
    }

    /// The saved play queue. A user who never saved one gets an empty
    /// queue with every field unset.
    pub fn get_play_queue(&self) -> Result<PlayQueue> {
        let mut payload = self.request("getPlayQueue", &Params::new())?;
        let value = payload
            .remove("playQueue")
            .unwrap_or_else(|| Value::Object(Map::new()));
        PlayQueue::from_json(value, &self.handle())
    }

    /// Store a play queue. `position` is milliseconds into `current`.
    pub fn save_play_queue(
        &self,
        song_ids: &[&str],
        current: Option<&str>,
        position: Option<u64>,
    ) -> Result<()> {
        let params = Params::new()
            .list("id", song_ids)
            .opt("current", current)
            .opt("position", position);
        self.call("savePlayQueue", &params)
    }
}
