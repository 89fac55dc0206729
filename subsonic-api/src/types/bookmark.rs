use crate::client::{ClientRef, SubsonicClient};
use crate::error::{Result, SubsonicError};
use crate::refresh::{Mutation, Refreshable, settle};
use crate::time;
use crate::types::song::{Song, SongFragment};
use crate::types::user::User;
use crate::types::{convert_list, de, require};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved position inside a song. There is at most one per song and user,
/// so the song id identifies it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Bookmark {
    pub song: Song,
    /// Milliseconds.
    pub position: Option<u64>,
    pub user: Option<User>,
    pub comment: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub changed: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub(crate) client: ClientRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookmarkFragment {
    entry: Option<SongFragment>,
    position: Option<u64>,
    username: Option<String>,
    comment: Option<String>,
    created: Option<String>,
    changed: Option<String>,
}

impl_from_json!(Bookmark => BookmarkFragment);

impl Bookmark {
    pub(crate) fn from_fragment(f: BookmarkFragment, client: &ClientRef) -> Result<Self> {
        Ok(Self {
            song: Song::from_fragment(require(f.entry, "bookmark", "entry")?, client)?,
            position: f.position,
            user: f.username.map(|name| User::summary(name, client)),
            comment: f.comment,
            created: time::parse_opt(f.created.as_deref())?,
            changed: time::parse_opt(f.changed.as_deref())?,
            client: client.clone(),
        })
    }

    fn client(&self) -> Result<SubsonicClient> {
        self.client.upgrade()
    }

    /// Save the local `position` and `comment` to the server. A bookmark
    /// without a position fails with [`SubsonicError::InvalidArgument`]
    /// before any request.
    pub fn update(self) -> Result<Self> {
        let Some(position) = self.position else {
            return Err(SubsonicError::InvalidArgument(format!(
                "bookmark for song `{}` has no position to save",
                self.song.id
            )));
        };
        self.client()?
            .save_bookmark(&self.song.id, position, self.comment.as_deref())?;
        settle(self, Mutation::BookmarkUpdate, |bookmark| {
            bookmark.changed = Some(Utc::now());
        })
    }

    pub fn delete(self) -> Result<()> {
        self.client()?.delete_bookmark(&self.song.id)
    }
}

impl Refreshable for Bookmark {
    fn generate(&self) -> Result<Self> {
        self.client()?.get_bookmark(&self.song.id)
    }
}

/// The play queue saved by the current user, for resuming on another device.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayQueue {
    /// Only the id is known; call `generate()` on it for details.
    pub current: Option<Song>,
    /// Milliseconds into `current`.
    pub position: Option<u64>,
    pub user: Option<User>,
    pub changed: Option<DateTime<Utc>>,
    /// Client name that saved the queue.
    pub changed_by: Option<String>,
    pub songs: Option<Vec<Song>>,
    #[serde(skip)]
    pub(crate) client: ClientRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayQueueFragment {
    #[serde(default, deserialize_with = "de::opt_id")]
    current: Option<String>,
    position: Option<u64>,
    username: Option<String>,
    changed: Option<String>,
    changed_by: Option<String>,
    entry: Option<Vec<SongFragment>>,
}

impl_from_json!(PlayQueue => PlayQueueFragment);

impl PlayQueue {
    pub(crate) fn from_fragment(f: PlayQueueFragment, client: &ClientRef) -> Result<Self> {
        Ok(Self {
            current: f.current.map(|id| Song::from_id(id, client)),
            position: f.position,
            user: f.username.map(|name| User::summary(name, client)),
            changed: time::parse_opt(f.changed.as_deref())?,
            changed_by: f.changed_by,
            songs: convert_list(f.entry, |s| Song::from_fragment(s, client))?,
            client: client.clone(),
        })
    }

    fn client(&self) -> Result<SubsonicClient> {
        self.client.upgrade()
    }

    /// Store the local songs, current song and position on the server.
    pub fn save(self) -> Result<Self> {
        let ids: Vec<&str> = self
            .songs
            .iter()
            .flatten()
            .map(|song| song.id.as_str())
            .collect();
        self.client()?.save_play_queue(
            &ids,
            self.current.as_ref().map(|song| song.id.as_str()),
            self.position,
        )?;
        settle(self, Mutation::PlayQueueSave, |queue| {
            queue.changed = Some(Utc::now());
        })
    }
}

impl Refreshable for PlayQueue {
    fn generate(&self) -> Result<Self> {
        self.client()?.get_play_queue()
    }
}
