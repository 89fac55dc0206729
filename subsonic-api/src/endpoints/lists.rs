//! Album and song lists.
//!
//! Endpoints: `getAlbumList2`, `getRandomSongs`, `getSongsByGenre`,
//! `getNowPlaying`, `getStarred2`

use crate::client::SubsonicClient;
use crate::error::Result;
use crate::params::Params;
use crate::types::{Album, AlbumListType, FromJson, NowPlayingEntry, Song, Starred};
use serde_json::{Map, Value};

impl SubsonicClient {
    /// Albums ordered by `list_type`. `size` defaults to 10 on the server,
    /// max 500.
    pub fn get_album_list(
        &self,
        list_type: &AlbumListType,
        size: Option<u32>,
        offset: Option<u32>,
        music_folder_id: Option<&str>,
    ) -> Result<Vec<Album>> {
        let params = list_type
            .params()
            .opt("size", size)
            .opt("offset", offset)
            .opt("musicFolderId", music_folder_id);
        self.fetch_list("getAlbumList2", &params, "albumList2", "album")
    }

    pub fn get_random_songs(
        &self,
        size: Option<u32>,
        genre: Option<&str>,
        from_year: Option<i32>,
        to_year: Option<i32>,
        music_folder_id: Option<&str>,
    ) -> Result<Vec<Song>> {
        let params = Params::new()
            .opt("size", size)
            .opt("genre", genre)
            .opt("fromYear", from_year)
            .opt("toYear", to_year)
            .opt("musicFolderId", music_folder_id);
        self.fetch_list("getRandomSongs", &params, "randomSongs", "song")
    }

    pub fn get_songs_by_genre(
        &self,
        genre: &str,
        count: Option<u32>,
        offset: Option<u32>,
        music_folder_id: Option<&str>,
    ) -> Result<Vec<Song>> {
        let params = Params::new()
            .set("genre", genre)
            .opt("count", count)
            .opt("offset", offset)
            .opt("musicFolderId", music_folder_id);
        self.fetch_list("getSongsByGenre", &params, "songsByGenre", "song")
    }

    /// What every user is playing right now.
    pub fn get_now_playing(&self) -> Result<Vec<NowPlayingEntry>> {
        self.fetch_list("getNowPlaying", &Params::new(), "nowPlaying", "entry")
    }

    /// Starred artists, albums and songs of the current user.
    pub fn get_starred(&self, music_folder_id: Option<&str>) -> Result<Starred> {
        let params = Params::new().opt("musicFolderId", music_folder_id);
        let mut payload = self.request("getStarred2", &params)?;
        let value = payload
            .remove("starred2")
            .unwrap_or_else(|| Value::Object(Map::new()));
        Starred::from_json(value, &self.handle())
    }
}
