use crate::client::ClientRef;
use crate::error::Result;
use crate::params::Params;
use crate::types::album::{Album, AlbumFragment};
use crate::types::artist::{Artist, ArtistFragment};
use crate::types::song::{Song, SongFragment};
use crate::types::user::User;
use crate::types::{convert_list, require};
use serde::{Deserialize, Serialize};

/// Ordering for `getAlbumList2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlbumListType {
    Random,
    Newest,
    Highest,
    Frequent,
    Recent,
    AlphabeticalByName,
    AlphabeticalByArtist,
    Starred,
    /// Inclusive range; `from > to` lists in reverse order.
    ByYear { from: i32, to: i32 },
    ByGenre(String),
}

impl AlbumListType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Newest => "newest",
            Self::Highest => "highest",
            Self::Frequent => "frequent",
            Self::Recent => "recent",
            Self::AlphabeticalByName => "alphabeticalByName",
            Self::AlphabeticalByArtist => "alphabeticalByArtist",
            Self::Starred => "starred",
            Self::ByYear { .. } => "byYear",
            Self::ByGenre(_) => "byGenre",
        }
    }

    pub(crate) fn params(&self) -> Params {
        let params = Params::new().set("type", self.as_str());
        match self {
            Self::ByYear { from, to } => params.set("fromYear", from).set("toYear", to),
            Self::ByGenre(genre) => params.set("genre", genre),
            _ => params,
        }
    }
}

/// Parameters for `search3`. Counts default to the server's (20).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub artist_count: Option<u32>,
    pub artist_offset: Option<u32>,
    pub album_count: Option<u32>,
    pub album_offset: Option<u32>,
    pub song_count: Option<u32>,
    pub song_offset: Option<u32>,
    pub music_folder_id: Option<String>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Limit every result kind to `count` entries.
    #[must_use]
    pub fn count(mut self, count: u32) -> Self {
        self.artist_count = Some(count);
        self.album_count = Some(count);
        self.song_count = Some(count);
        self
    }

    /// Skip `offset` entries of every kind.
    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.artist_offset = Some(offset);
        self.album_offset = Some(offset);
        self.song_offset = Some(offset);
        self
    }

    #[must_use]
    pub fn music_folder(mut self, id: impl Into<String>) -> Self {
        self.music_folder_id = Some(id.into());
        self
    }

    pub(crate) fn params(&self) -> Params {
        Params::new()
            .set("query", &self.query)
            .opt("artistCount", self.artist_count)
            .opt("artistOffset", self.artist_offset)
            .opt("albumCount", self.album_count)
            .opt("albumOffset", self.album_offset)
            .opt("songCount", self.song_count)
            .opt("songOffset", self.song_offset)
            .opt("musicFolderId", self.music_folder_id.as_deref())
    }
}

/// Artists, albums and songs, as returned by `search3` and `getStarred2`.
///
/// The server omits empty kinds, so every list here is plain and possibly
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResult {
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
    pub songs: Vec<Song>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResultFragment {
    artist: Option<Vec<ArtistFragment>>,
    album: Option<Vec<AlbumFragment>>,
    song: Option<Vec<SongFragment>>,
}

impl_from_json!(SearchResult => SearchResultFragment);

impl SearchResult {
    pub(crate) fn from_fragment(f: SearchResultFragment, client: &ClientRef) -> Result<Self> {
        Ok(Self {
            artists: convert_list(f.artist, |a| Artist::from_fragment(a, client))?
                .unwrap_or_default(),
            albums: convert_list(f.album, |a| Album::from_fragment(a, client))?
                .unwrap_or_default(),
            songs: convert_list(f.song, |s| Song::from_fragment(s, client))?.unwrap_or_default(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty() && self.albums.is_empty() && self.songs.is_empty()
    }
}

/// Everything the current user has starred.
pub type Starred = SearchResult;

/// A song someone is playing right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowPlayingEntry {
    pub song: Song,
    pub user: User,
    pub minutes_ago: Option<u32>,
    pub player_id: Option<i64>,
    pub player_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NowPlayingEntryFragment {
    #[serde(flatten)]
    song: SongFragment,
    username: Option<String>,
    minutes_ago: Option<u32>,
    player_id: Option<i64>,
    player_name: Option<String>,
}

impl_from_json!(NowPlayingEntry => NowPlayingEntryFragment);

impl NowPlayingEntry {
    pub(crate) fn from_fragment(f: NowPlayingEntryFragment, client: &ClientRef) -> Result<Self> {
        Ok(Self {
            song: Song::from_fragment(f.song, client)?,
            user: User::summary(require(f.username, "now playing entry", "username")?, client),
            minutes_ago: f.minutes_ago,
            player_id: f.player_id,
            player_name: f.player_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FromJson;
    use serde_json::json;

    #[test]
    fn album_list_type_params() {
        let params = AlbumListType::ByYear { from: 1990, to: 1999 }.params();
        assert_eq!(params.get("type"), Some("byYear"));
        assert_eq!(params.get("fromYear"), Some("1990"));
        assert_eq!(params.get("toYear"), Some("1999"));

        let params = AlbumListType::ByGenre("Jazz".into()).params();
        assert_eq!(params.get("genre"), Some("Jazz"));

        let params = AlbumListType::Newest.params();
        assert_eq!(params.pairs().len(), 1);
    }

    #[test]
    fn search_query_drops_unset_counts() {
        let params = SearchQuery::new("beatles").count(5).params();
        assert_eq!(params.get("query"), Some("beatles"));
        assert_eq!(params.get("songCount"), Some("5"));
        assert_eq!(params.get("songOffset"), None);
        assert_eq!(params.get("musicFolderId"), None);
    }

    #[test]
    fn search_result_missing_kinds_are_empty() {
        let result = SearchResult::from_json(
            json!({"song": [{"id": "s1"}]}),
            &ClientRef::detached(),
        )
        .unwrap();
        assert!(result.artists.is_empty());
        assert!(result.albums.is_empty());
        assert_eq!(result.songs.len(), 1);
        assert!(!result.is_empty());
    }

    #[test]
    fn now_playing_entry_flattens_the_song() {
        let entry = NowPlayingEntry::from_json(
            json!({
                "id": "s1",
                "title": "T",
                "username": "alice",
                "minutesAgo": 2,
                "playerId": 3,
                "playerName": "web"
            }),
            &ClientRef::detached(),
        )
        .unwrap();
        assert_eq!(entry.song.title.as_deref(), Some("T"));
        assert_eq!(entry.user.username, "alice");
        assert_eq!(entry.player_id, Some(3));
    }
}
