use crate::client::{ClientRef, SubsonicClient};
use crate::endpoints::StarTarget;
use crate::error::Result;
use crate::refresh::{Mutation, Refreshable, settle};
use crate::time;
use crate::types::album::Album;
use crate::types::artist::{Artist, ArtistFragment};
use crate::types::browsing::Genre;
use crate::types::{convert_list, de, require};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One entry of an OpenSubsonic `genres` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGenre {
    pub name: String,
}

/// ReplayGain values in dB (gains) and linear scale (peaks).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayGain {
    pub track_gain: Option<f64>,
    pub album_gain: Option<f64>,
    pub track_peak: Option<f64>,
    pub album_peak: Option<f64>,
    pub base_gain: Option<f64>,
    pub fallback_gain: Option<f64>,
}

/// A credited contributor (composer, producer, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contributor {
    pub role: String,
    pub sub_role: Option<String>,
    pub artist: Artist,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContributorFragment {
    role: Option<String>,
    sub_role: Option<String>,
    artist: Option<ArtistFragment>,
}

impl Contributor {
    fn from_fragment(f: ContributorFragment, client: &ClientRef) -> Result<Self> {
        Ok(Self {
            role: require(f.role, "contributor", "role")?,
            sub_role: f.sub_role,
            artist: Artist::from_fragment(require(f.artist, "contributor", "artist")?, client)?,
        })
    }
}

/// Plain-text lyrics from `getLyrics`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lyrics {
    pub artist: Option<String>,
    pub title: Option<String>,
    pub value: Option<String>,
}

/// A song (the protocol's "child" element with `isDir: false`).
///
/// `album`, `artist` and `genre` are summaries rebuilt from the flat
/// `albumId`/`album`, `artistId`/`artist` and `genre` fields; call
/// `generate()` on them for the full entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Song {
    pub id: String,
    pub parent: Option<String>,
    pub is_dir: Option<bool>,
    pub title: Option<String>,
    pub album: Option<Album>,
    pub artist: Option<Artist>,
    pub track: Option<u32>,
    pub year: Option<i32>,
    pub genre: Option<Genre>,
    pub cover_art: Option<String>,
    pub size: Option<u64>,
    pub content_type: Option<String>,
    pub suffix: Option<String>,
    pub transcoded_content_type: Option<String>,
    pub transcoded_suffix: Option<String>,
    /// Seconds.
    pub duration: Option<u32>,
    /// Kbps.
    pub bit_rate: Option<u32>,
    pub bit_depth: Option<u32>,
    pub sampling_rate: Option<u32>,
    pub channel_count: Option<u32>,
    pub path: Option<String>,
    pub is_video: Option<bool>,
    pub user_rating: Option<u8>,
    pub average_rating: Option<f64>,
    pub play_count: Option<u64>,
    pub disc_number: Option<u32>,
    pub created: Option<DateTime<Utc>>,
    pub starred: Option<DateTime<Utc>>,
    pub played: Option<DateTime<Utc>>,
    /// `music`, `podcast`, `audiobook` or `video`.
    pub media_type: Option<String>,
    /// Milliseconds.
    pub bookmark_position: Option<u64>,
    pub bpm: Option<u32>,
    pub comment: Option<String>,
    pub sort_name: Option<String>,
    pub music_brainz_id: Option<String>,
    pub genres: Option<Vec<ItemGenre>>,
    pub artists: Option<Vec<Artist>>,
    pub display_artist: Option<String>,
    pub album_artists: Option<Vec<Artist>>,
    pub display_album_artist: Option<String>,
    pub contributors: Option<Vec<Contributor>>,
    pub display_composer: Option<String>,
    pub moods: Option<Vec<String>>,
    pub replay_gain: Option<ReplayGain>,
    #[serde(skip)]
    pub(crate) client: ClientRef,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SongFragment {
    #[serde(default, deserialize_with = "de::opt_id")]
    id: Option<String>,
    parent: Option<String>,
    is_dir: Option<bool>,
    title: Option<String>,
    album: Option<String>,
    #[serde(default, deserialize_with = "de::opt_id")]
    album_id: Option<String>,
    artist: Option<String>,
    #[serde(default, deserialize_with = "de::opt_id")]
    artist_id: Option<String>,
    track: Option<u32>,
    year: Option<i32>,
    genre: Option<String>,
    cover_art: Option<String>,
    size: Option<u64>,
    content_type: Option<String>,
    suffix: Option<String>,
    transcoded_content_type: Option<String>,
    transcoded_suffix: Option<String>,
    duration: Option<u32>,
    bit_rate: Option<u32>,
    bit_depth: Option<u32>,
    sampling_rate: Option<u32>,
    channel_count: Option<u32>,
    path: Option<String>,
    is_video: Option<bool>,
    user_rating: Option<u8>,
    average_rating: Option<f64>,
    play_count: Option<u64>,
    disc_number: Option<u32>,
    created: Option<String>,
    starred: Option<String>,
    played: Option<String>,
    #[serde(rename = "type")]
    media_type: Option<String>,
    bookmark_position: Option<u64>,
    bpm: Option<u32>,
    comment: Option<String>,
    sort_name: Option<String>,
    music_brainz_id: Option<String>,
    genres: Option<Vec<ItemGenre>>,
    artists: Option<Vec<ArtistFragment>>,
    display_artist: Option<String>,
    album_artists: Option<Vec<ArtistFragment>>,
    display_album_artist: Option<String>,
    contributors: Option<Vec<ContributorFragment>>,
    display_composer: Option<String>,
    moods: Option<Vec<String>>,
    replay_gain: Option<ReplayGain>,
}

impl_from_json!(Song => SongFragment);

impl Song {
    pub(crate) fn from_fragment(f: SongFragment, client: &ClientRef) -> Result<Self> {
        let album = match (f.album_id, f.album) {
            (Some(id), Some(name)) => Some(Album::summary(id, name, client)),
            _ => None,
        };
        let artist = match (f.artist_id, f.artist) {
            (Some(id), Some(name)) => Some(Artist::summary(id, name, client)),
            _ => None,
        };

        Ok(Self {
            id: require(f.id, "song", "id")?,
            parent: f.parent,
            is_dir: f.is_dir,
            title: f.title,
            album,
            artist,
            track: f.track,
            year: f.year,
            genre: f.genre.map(|name| Genre::summary(name, client)),
            cover_art: f.cover_art,
            size: f.size,
            content_type: f.content_type,
            suffix: f.suffix,
            transcoded_content_type: f.transcoded_content_type,
            transcoded_suffix: f.transcoded_suffix,
            duration: f.duration,
            bit_rate: f.bit_rate,
            bit_depth: f.bit_depth,
            sampling_rate: f.sampling_rate,
            channel_count: f.channel_count,
            path: f.path,
            is_video: f.is_video,
            user_rating: f.user_rating,
            average_rating: f.average_rating,
            play_count: f.play_count,
            disc_number: f.disc_number,
            created: time::parse_opt(f.created.as_deref())?,
            starred: time::parse_opt(f.starred.as_deref())?,
            played: time::parse_opt(f.played.as_deref())?,
            media_type: f.media_type,
            bookmark_position: f.bookmark_position,
            bpm: f.bpm,
            comment: f.comment,
            sort_name: f.sort_name,
            music_brainz_id: f.music_brainz_id,
            genres: f.genres,
            artists: convert_list(f.artists, |a| Artist::from_fragment(a, client))?,
            display_artist: f.display_artist,
            album_artists: convert_list(f.album_artists, |a| Artist::from_fragment(a, client))?,
            display_album_artist: f.display_album_artist,
            contributors: convert_list(f.contributors, |c| Contributor::from_fragment(c, client))?,
            display_composer: f.display_composer,
            moods: f.moods,
            replay_gain: f.replay_gain,
            client: client.clone(),
        })
    }

    /// A song known only by id, e.g. a play queue's `current` entry.
    pub fn from_id(id: impl Into<String>, client: &ClientRef) -> Self {
        Self {
            id: id.into(),
            client: client.clone(),
            ..Self::default()
        }
    }

    fn client(&self) -> Result<SubsonicClient> {
        self.client.upgrade()
    }

    pub fn star(self) -> Result<Self> {
        self.client()?.star(StarTarget::Song, &self.id)?;
        settle(self, Mutation::Star, |song| song.starred = Some(Utc::now()))
    }

    pub fn unstar(self) -> Result<Self> {
        self.client()?.unstar(StarTarget::Song, &self.id)?;
        settle(self, Mutation::Unstar, |song| song.starred = None)
    }

    /// Rate from 1 to 5. Out-of-range values fail before any request.
    pub fn set_rating(self, rating: u8) -> Result<Self> {
        self.client()?.set_rating(&self.id, rating)?;
        settle(self, Mutation::SetRating, |song| song.user_rating = Some(rating))
    }

    pub fn remove_rating(self) -> Result<Self> {
        self.client()?.remove_rating(&self.id)?;
        settle(self, Mutation::RemoveRating, |song| song.user_rating = None)
    }

    /// Register a play (`submission = true`) or a "now playing" notice.
    pub fn scrobble(self, time: Option<DateTime<Utc>>, submission: bool) -> Result<Self> {
        self.client()?.scrobble(&[self.id.as_str()], time, submission)?;
        settle(self, Mutation::Scrobble, |song| {
            if submission {
                song.played = Some(time.unwrap_or_else(Utc::now));
            }
        })
    }

    /// Songs similar to this one (`getSimilarSongs2`).
    pub fn similar(&self, count: Option<u32>) -> Result<Vec<Song>> {
        self.client()?.get_similar_songs(&self.id, count)
    }

    /// Save the original file. `dest` may be a directory.
    pub fn download(&self, dest: &Path) -> Result<PathBuf> {
        self.client()?.download(&self.id, dest)
    }

    /// Signed streaming URL for a media player.
    pub fn stream_url(&self, max_bit_rate: Option<u32>, format: Option<&str>) -> Result<String> {
        Ok(self.client()?.stream_url(&self.id, max_bit_rate, format))
    }
}

impl Refreshable for Song {
    fn generate(&self) -> Result<Self> {
        self.client()?.get_song(&self.id)
    }
}
