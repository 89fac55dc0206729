//! Browsing API: music folders, genres and the ID3 tree.
//!
//! | Method                        | Endpoint            |
//! |-------------------------------|---------------------|
//! | `get_music_folders`           | `getMusicFolders`   |
//! | `get_genres`                  | `getGenres`         |
//! | `get_artists`                 | `getArtists`        |
//! | `get_artist`                  | `getArtist`         |
//! | `get_album`                   | `getAlbum`          |
//! | `get_song`                    | `getSong`           |
//! | `get_music_directory`         | `getMusicDirectory` |
//! | `get_album_info`              | `getAlbumInfo2`     |
//! | `get_artist_info`             | `getArtistInfo2`    |
//! | `get_similar_songs`           | `getSimilarSongs2`  |
//! | `get_top_songs`               | `getTopSongs`       |
//! | `get_videos`                  | `getVideos`         |
//!
//! `get_music_folder`, `get_genre` and `get_video` have no endpoint of their
//! own; they search the matching listing.

use crate::client::SubsonicClient;
use crate::endpoints::{find, nested};
use crate::error::Result;
use crate::params::Params;
use crate::types::{
    Album, AlbumInfo, Artist, ArtistInfo, FromJson, Genre, MusicDirectory, MusicFolder, Song,
    Video, decode_all, elements,
};
use serde_json::Value;

impl SubsonicClient {
    pub fn get_music_folders(&self) -> Result<Vec<MusicFolder>> {
        self.fetch_list("getMusicFolders", &Params::new(), "musicFolders", "musicFolder")
    }

    pub fn get_music_folder(&self, id: &str) -> Result<MusicFolder> {
        find(self.get_music_folders()?, "music folder", id, |f| f.id == id)
    }

    pub fn get_genres(&self) -> Result<Vec<Genre>> {
        self.fetch_list("getGenres", &Params::new(), "genres", "genre")
    }

    pub fn get_genre(&self, name: &str) -> Result<Genre> {
        find(self.get_genres()?, "genre", name, |g| g.name == name)
    }

    /// All artists, optionally limited to one music folder.
    ///
    /// The server groups artists by index letter; the groups are flattened
    /// in the order received.
    ///
    /// ```json
    /// { "artists": { "ignoredArticles": "The", "index": [
    ///     { "name": "A", "artist": [ { "id": "1", "name": "ABBA" } ] }
    /// ] } }
    /// ```
    pub fn get_artists(&self, music_folder_id: Option<&str>) -> Result<Vec<Artist>> {
        let params = Params::new().opt("musicFolderId", music_folder_id);
        let mut payload = self.request("getArtists", &params)?;
        let indexes = nested(&mut payload, "artists", "index");

        let client = self.handle();
        let mut out = Vec::new();
        for index in elements(indexes) {
            if let Value::Object(mut index) = index {
                out.extend(decode_all::<Artist>(index.remove("artist"), &client)?);
            }
        }
        Ok(out)
    }

    pub fn get_artist(&self, id: &str) -> Result<Artist> {
        self.fetch("getArtist", &Params::new().set("id", id), "artist")
    }

    pub fn get_album(&self, id: &str) -> Result<Album> {
        self.fetch("getAlbum", &Params::new().set("id", id), "album")
    }

    pub fn get_song(&self, id: &str) -> Result<Song> {
        self.fetch("getSong", &Params::new().set("id", id), "song")
    }

    /// A folder in file-structure browsing. `id` comes from
    /// [`MusicFolder`] listings or from a child's `parent`.
    pub fn get_music_directory(&self, id: &str) -> Result<MusicDirectory> {
        self.fetch("getMusicDirectory", &Params::new().set("id", id), "directory")
    }

    pub fn get_album_info(&self, id: &str) -> Result<AlbumInfo> {
        self.fetch_record("getAlbumInfo2", &Params::new().set("id", id), "albumInfo")
    }

    /// Artist biography and similar artists. `count` caps the similar
    /// artists; `include_not_present` adds ones missing from the library.
    pub fn get_artist_info(
        &self,
        id: &str,
        count: Option<u32>,
        include_not_present: bool,
    ) -> Result<ArtistInfo> {
        let params = Params::new()
            .set("id", id)
            .opt("count", count)
            .set("includeNotPresent", include_not_present);
        let mut payload = self.request("getArtistInfo2", &params)?;
        let value = payload
            .remove("artistInfo2")
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
        ArtistInfo::from_json(value, &self.handle())
    }

    /// Songs similar to the given song, album or artist.
    pub fn get_similar_songs(&self, id: &str, count: Option<u32>) -> Result<Vec<Song>> {
        let params = Params::new().set("id", id).opt("count", count);
        self.fetch_list("getSimilarSongs2", &params, "similarSongs2", "song")
    }

    /// Top songs of an artist, by artist name.
    pub fn get_top_songs(&self, artist: &str, count: Option<u32>) -> Result<Vec<Song>> {
        let params = Params::new().set("artist", artist).opt("count", count);
        self.fetch_list("getTopSongs", &params, "topSongs", "song")
    }

    pub fn get_videos(&self) -> Result<Vec<Video>> {
        self.fetch_list("getVideos", &Params::new(), "videos", "video")
    }

    pub fn get_video(&self, id: &str) -> Result<Video> {
        find(self.get_videos()?, "video", id, |v| v.id == id)
    }
}
