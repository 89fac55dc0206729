use crate::client::{ClientRef, SubsonicClient};
use crate::error::Result;
use crate::refresh::{Mutation, Refreshable, settle};
use crate::time;
use crate::types::song::{Song, SongFragment};
use crate::types::user::User;
use crate::types::{convert_list, de, require};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A playlist. `songs` is only filled by `getPlaylist`, not by listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Playlist {
    pub id: String,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub owner: Option<User>,
    pub public: Option<bool>,
    pub song_count: Option<u32>,
    /// Seconds.
    pub duration: Option<u32>,
    pub created: Option<DateTime<Utc>>,
    pub changed: Option<DateTime<Utc>>,
    pub cover_art: Option<String>,
    pub allowed_users: Option<Vec<User>>,
    pub songs: Option<Vec<Song>>,
    #[serde(skip)]
    pub(crate) client: ClientRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlaylistFragment {
    #[serde(default, deserialize_with = "de::opt_id")]
    id: Option<String>,
    name: Option<String>,
    comment: Option<String>,
    owner: Option<String>,
    public: Option<bool>,
    song_count: Option<u32>,
    duration: Option<u32>,
    created: Option<String>,
    changed: Option<String>,
    cover_art: Option<String>,
    allowed_user: Option<Vec<String>>,
    entry: Option<Vec<SongFragment>>,
}

impl_from_json!(Playlist => PlaylistFragment);

impl Playlist {
    pub(crate) fn from_fragment(f: PlaylistFragment, client: &ClientRef) -> Result<Self> {
        Ok(Self {
            id: require(f.id, "playlist", "id")?,
            name: f.name,
            comment: f.comment,
            owner: f.owner.map(|username| User::summary(username, client)),
            public: f.public,
            song_count: f.song_count,
            duration: f.duration,
            created: time::parse_opt(f.created.as_deref())?,
            changed: time::parse_opt(f.changed.as_deref())?,
            cover_art: f.cover_art,
            allowed_users: f.allowed_user.map(|users| {
                users
                    .into_iter()
                    .map(|username| User::summary(username, client))
                    .collect()
            }),
            songs: convert_list(f.entry, |s| Song::from_fragment(s, client))?,
            client: client.clone(),
        })
    }

    fn client(&self) -> Result<SubsonicClient> {
        self.client.upgrade()
    }

    /// Push the local `name`, `comment` and `public` values to the server.
    pub fn update(self) -> Result<Self> {
        self.client()?.update_playlist(
            &self.id,
            self.name.as_deref(),
            self.comment.as_deref(),
            self.public,
            &[],
            &[],
        )?;
        settle(self, Mutation::PlaylistUpdate, |_| {})
    }

    /// Append songs; returns the playlist as the server now has it.
    pub fn add_songs(self, song_ids: &[&str]) -> Result<Self> {
        self.client()?
            .update_playlist(&self.id, None, None, None, song_ids, &[])?;
        settle(self, Mutation::PlaylistAddSongs, |_| {})
    }

    /// Remove songs by their position in the playlist.
    pub fn remove_songs(self, indexes: &[u32]) -> Result<Self> {
        self.client()?
            .update_playlist(&self.id, None, None, None, &[], indexes)?;
        settle(self, Mutation::PlaylistRemoveSongs, |_| {})
    }

    pub fn delete(self) -> Result<()> {
        self.client()?.delete_playlist(&self.id)
    }
}

impl Refreshable for Playlist {
    fn generate(&self) -> Result<Self> {
        self.client()?.get_playlist(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FromJson;
    use serde_json::json;

    #[test]
    fn owner_and_allowed_users_become_users() {
        let p = Playlist::from_json(
            json!({
                "id": "p1",
                "name": "Mix",
                "owner": "alice",
                "public": true,
                "allowedUser": ["bob", "carol"],
                "created": "2022-01-01T00:00:00Z",
                "entry": [{"id": "s1"}]
            }),
            &ClientRef::detached(),
        )
        .unwrap();
        assert_eq!(p.owner.unwrap().username, "alice");
        let allowed: Vec<_> = p
            .allowed_users
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(allowed, ["bob", "carol"]);
        assert_eq!(p.songs.unwrap()[0].id, "s1");
    }

    #[test]
    fn listing_entry_has_no_songs() {
        let p = Playlist::from_json(json!({"id": "p1", "songCount": 3}), &ClientRef::detached())
            .unwrap();
        assert!(p.songs.is_none());
        assert!(p.owner.is_none());
        assert!(p.allowed_users.is_none());
    }
}
