use crate::client::{ClientRef, SubsonicClient};
use crate::endpoints::StarTarget;
use crate::error::{Result, SubsonicError};
use crate::refresh::{Mutation, Refreshable, settle};
use crate::time;
use crate::types::artist::{Artist, ArtistFragment};
use crate::types::browsing::Genre;
use crate::types::song::{ItemGenre, Song, SongFragment};
use crate::types::{convert_list, de, require};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLabel {
    pub name: String,
}

/// Title of one disc of a multi-disc album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscTitle {
    pub disc: u32,
    pub title: String,
}

/// A possibly partial date (`year` only, `year` + `month`, or all three).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

/// Notes and images from `getAlbumInfo2`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumInfo {
    pub notes: Option<String>,
    pub music_brainz_id: Option<String>,
    pub last_fm_url: Option<String>,
    pub small_image_url: Option<String>,
    pub medium_image_url: Option<String>,
    pub large_image_url: Option<String>,
}

/// An album, from ID3 browsing (`getAlbum`, `getAlbumList2`) or as a
/// summary embedded in a song.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Album {
    pub id: String,
    pub parent: Option<String>,
    /// `name` on ID3 endpoints, `title` or `album` on folder-based ones.
    pub name: Option<String>,
    pub is_dir: Option<bool>,
    pub cover_art: Option<String>,
    pub song_count: Option<u32>,
    pub created: Option<DateTime<Utc>>,
    /// Seconds.
    pub duration: Option<u32>,
    pub play_count: Option<u64>,
    pub artist: Option<Artist>,
    pub year: Option<i32>,
    pub genre: Option<Genre>,
    pub songs: Option<Vec<Song>>,
    pub played: Option<DateTime<Utc>>,
    pub user_rating: Option<u8>,
    pub average_rating: Option<f64>,
    pub starred: Option<DateTime<Utc>>,
    pub record_labels: Option<Vec<RecordLabel>>,
    pub music_brainz_id: Option<String>,
    pub genres: Option<Vec<ItemGenre>>,
    pub artists: Option<Vec<Artist>>,
    pub display_artist: Option<String>,
    pub release_types: Option<Vec<String>>,
    pub moods: Option<Vec<String>>,
    pub sort_name: Option<String>,
    pub original_release_date: Option<ItemDate>,
    pub release_date: Option<ItemDate>,
    pub is_compilation: Option<bool>,
    pub disc_titles: Option<Vec<DiscTitle>>,
    #[serde(skip)]
    pub(crate) client: ClientRef,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AlbumFragment {
    #[serde(default, deserialize_with = "de::opt_id")]
    id: Option<String>,
    parent: Option<String>,
    name: Option<String>,
    title: Option<String>,
    album: Option<String>,
    is_dir: Option<bool>,
    cover_art: Option<String>,
    song_count: Option<u32>,
    created: Option<String>,
    duration: Option<u32>,
    play_count: Option<u64>,
    artist: Option<String>,
    #[serde(default, deserialize_with = "de::opt_id")]
    artist_id: Option<String>,
    year: Option<i32>,
    genre: Option<String>,
    song: Option<Vec<SongFragment>>,
    played: Option<String>,
    user_rating: Option<u8>,
    average_rating: Option<f64>,
    starred: Option<String>,
    record_labels: Option<Vec<RecordLabel>>,
    music_brainz_id: Option<String>,
    genres: Option<Vec<ItemGenre>>,
    artists: Option<Vec<ArtistFragment>>,
    display_artist: Option<String>,
    release_types: Option<Vec<String>>,
    moods: Option<Vec<String>>,
    sort_name: Option<String>,
    original_release_date: Option<ItemDate>,
    release_date: Option<ItemDate>,
    is_compilation: Option<bool>,
    disc_titles: Option<Vec<DiscTitle>>,
}

impl_from_json!(Album => AlbumFragment);

impl Album {
    pub(crate) fn from_fragment(f: AlbumFragment, client: &ClientRef) -> Result<Self> {
        let artist = match (f.artist_id, f.artist) {
            (Some(id), Some(name)) => Some(Artist::summary(id, name, client)),
            _ => None,
        };

        Ok(Self {
            id: require(f.id, "album", "id")?,
            parent: f.parent,
            name: f.name.or(f.title).or(f.album),
            is_dir: f.is_dir,
            cover_art: f.cover_art,
            song_count: f.song_count,
            created: time::parse_opt(f.created.as_deref())?,
            duration: f.duration,
            play_count: f.play_count,
            artist,
            year: f.year,
            genre: f.genre.map(|name| Genre::summary(name, client)),
            songs: convert_list(f.song, |s| Song::from_fragment(s, client))?,
            played: time::parse_opt(f.played.as_deref())?,
            user_rating: f.user_rating,
            average_rating: f.average_rating,
            starred: time::parse_opt(f.starred.as_deref())?,
            record_labels: f.record_labels,
            music_brainz_id: f.music_brainz_id,
            genres: f.genres,
            artists: convert_list(f.artists, |a| Artist::from_fragment(a, client))?,
            display_artist: f.display_artist,
            release_types: f.release_types,
            moods: f.moods,
            sort_name: f.sort_name,
            original_release_date: f.original_release_date,
            release_date: f.release_date,
            is_compilation: f.is_compilation,
            disc_titles: f.disc_titles,
            client: client.clone(),
        })
    }

    /// The `{id, name}` pair a song carries about its album.
    pub(crate) fn summary(id: String, name: String, client: &ClientRef) -> Self {
        Self {
            id,
            name: Some(name),
            client: client.clone(),
            ..Self::default()
        }
    }

    fn client(&self) -> Result<SubsonicClient> {
        self.client.upgrade()
    }

    /// Notes and image links (`getAlbumInfo2`).
    pub fn info(&self) -> Result<AlbumInfo> {
        self.client()?.get_album_info(&self.id)
    }

    pub fn star(self) -> Result<Self> {
        self.client()?.star(StarTarget::Album, &self.id)?;
        settle(self, Mutation::Star, |album| album.starred = Some(Utc::now()))
    }

    pub fn unstar(self) -> Result<Self> {
        self.client()?.unstar(StarTarget::Album, &self.id)?;
        settle(self, Mutation::Unstar, |album| album.starred = None)
    }

    pub fn set_rating(self, rating: u8) -> Result<Self> {
        self.client()?.set_rating(&self.id, rating)?;
        settle(self, Mutation::SetRating, |album| album.user_rating = Some(rating))
    }

    pub fn remove_rating(self) -> Result<Self> {
        self.client()?.remove_rating(&self.id)?;
        settle(self, Mutation::RemoveRating, |album| album.user_rating = None)
    }

    /// Save the album cover. `dest` may be a directory.
    pub fn download_cover_art(&self, dest: &Path, size: Option<u32>) -> Result<PathBuf> {
        let cover = self.cover_art.as_deref().ok_or(SubsonicError::MissingField {
            entity: "album",
            field: "coverArt",
        })?;
        self.client()?.get_cover_art(cover, size, dest)
    }
}

impl Refreshable for Album {
    fn generate(&self) -> Result<Self> {
        self.client()?.get_album(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FromJson;
    use serde_json::json;

    fn album(value: serde_json::Value) -> Result<Album> {
        Album::from_json(value, &ClientRef::detached())
    }

    #[test]
    fn album_embeds_songs_that_point_back() {
        let a = album(json!({
            "id": "a1",
            "name": "A",
            "artistId": "ar1",
            "artist": "Ar",
            "songCount": 2,
            "song": [
                {"id": "s1", "title": "One", "albumId": "a1", "album": "A"},
                {"id": "s2", "title": "Two"}
            ]
        }))
        .unwrap();

        assert_eq!(a.artist.as_ref().map(|ar| ar.id.as_str()), Some("ar1"));
        let songs = a.songs.unwrap();
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].album.as_ref().unwrap().id, "a1");
        assert!(songs[1].album.is_none());
    }

    #[test]
    fn name_falls_back_to_title() {
        let a = album(json!({"id": "a1", "title": "Folder Title", "isDir": true})).unwrap();
        assert_eq!(a.name.as_deref(), Some("Folder Title"));
    }

    #[test]
    fn list_without_songs_is_none() {
        let a = album(json!({"id": "a1", "name": "A"})).unwrap();
        assert!(a.songs.is_none());
        let a = album(json!({"id": "a1", "name": "A", "song": []})).unwrap();
        assert_eq!(a.songs, Some(vec![]));
    }

    #[test]
    fn opensubsonic_fields_are_read() {
        let a = album(json!({
            "id": "a1",
            "recordLabels": [{"name": "Label"}],
            "releaseDate": {"year": 2001, "month": 3},
            "discTitles": [{"disc": 1, "title": "Side A"}],
            "isCompilation": false,
            "releaseTypes": ["Album"]
        }))
        .unwrap();
        assert_eq!(a.record_labels.unwrap()[0].name, "Label");
        assert_eq!(
            a.release_date,
            Some(ItemDate { year: Some(2001), month: Some(3), day: None })
        );
        assert_eq!(a.disc_titles.unwrap()[0].title, "Side A");
        assert_eq!(a.is_compilation, Some(false));
        assert!(a.original_release_date.is_none());
    }

    #[test]
    fn cover_download_needs_cover_id() {
        let a = album(json!({"id": "a1"})).unwrap();
        let err = a.download_cover_art(Path::new("."), None).unwrap_err();
        assert!(matches!(err, SubsonicError::MissingField { field: "coverArt", .. }));
    }
}
