use crate::client::{ClientRef, SubsonicClient};
use crate::error::Result;
use crate::refresh::{Mutation, Refreshable, settle};
use crate::time;
use crate::types::{de, require};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A user account. Identified by `username`.
///
/// Entities that mention a user by name (playlist owner, share creator,
/// chat author) carry a `User` with only `username` set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct User {
    pub username: String,
    pub email: Option<String>,
    pub scrobbling_enabled: Option<bool>,
    /// Kbps, `0` meaning no limit.
    pub max_bit_rate: Option<u32>,
    pub admin_role: Option<bool>,
    pub settings_role: Option<bool>,
    pub download_role: Option<bool>,
    pub upload_role: Option<bool>,
    pub playlist_role: Option<bool>,
    pub cover_art_role: Option<bool>,
    pub comment_role: Option<bool>,
    pub podcast_role: Option<bool>,
    pub stream_role: Option<bool>,
    pub jukebox_role: Option<bool>,
    pub share_role: Option<bool>,
    pub video_conversion_role: Option<bool>,
    pub avatar_last_changed: Option<DateTime<Utc>>,
    /// Ids of the music folders the user may access.
    pub folders: Option<Vec<String>>,
    #[serde(skip)]
    pub(crate) client: ClientRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserFragment {
    username: Option<String>,
    email: Option<String>,
    scrobbling_enabled: Option<bool>,
    max_bit_rate: Option<u32>,
    admin_role: Option<bool>,
    settings_role: Option<bool>,
    download_role: Option<bool>,
    upload_role: Option<bool>,
    playlist_role: Option<bool>,
    cover_art_role: Option<bool>,
    comment_role: Option<bool>,
    podcast_role: Option<bool>,
    stream_role: Option<bool>,
    jukebox_role: Option<bool>,
    share_role: Option<bool>,
    video_conversion_role: Option<bool>,
    avatar_last_changed: Option<String>,
    #[serde(default, deserialize_with = "de::opt_ids")]
    folder: Option<Vec<String>>,
}

impl_from_json!(User => UserFragment);

impl User {
    pub(crate) fn from_fragment(f: UserFragment, client: &ClientRef) -> Result<Self> {
        Ok(Self {
            username: require(f.username, "user", "username")?,
            email: f.email,
            scrobbling_enabled: f.scrobbling_enabled,
            max_bit_rate: f.max_bit_rate,
            admin_role: f.admin_role,
            settings_role: f.settings_role,
            download_role: f.download_role,
            upload_role: f.upload_role,
            playlist_role: f.playlist_role,
            cover_art_role: f.cover_art_role,
            comment_role: f.comment_role,
            podcast_role: f.podcast_role,
            stream_role: f.stream_role,
            jukebox_role: f.jukebox_role,
            share_role: f.share_role,
            video_conversion_role: f.video_conversion_role,
            avatar_last_changed: time::parse_opt(f.avatar_last_changed.as_deref())?,
            folders: f.folder,
            client: client.clone(),
        })
    }

    /// A user known only by name.
    pub fn summary(username: impl Into<String>, client: &ClientRef) -> Self {
        Self {
            username: username.into(),
            client: client.clone(),
            ..Self::default()
        }
    }

    fn client(&self) -> Result<SubsonicClient> {
        self.client.upgrade()
    }

    /// Create this account on the server from the local fields.
    pub fn create(self, password: &str) -> Result<Self> {
        self.client()?.create_user(&self, password)?;
        Ok(self)
    }

    /// Push the local fields to the server.
    pub fn update(self) -> Result<Self> {
        self.client()?.update_user(&self)?;
        settle(self, Mutation::UserUpdate, |_| {})
    }

    pub fn delete(self) -> Result<()> {
        self.client()?.delete_user(&self.username)
    }

    pub fn change_password(&self, new_password: &str) -> Result<()> {
        self.client()?.change_password(&self.username, new_password)
    }

    /// Save the user's avatar image. `dest` may be a directory.
    pub fn download_avatar(&self, dest: &Path) -> Result<PathBuf> {
        self.client()?.get_avatar(&self.username, dest)
    }
}

impl Refreshable for User {
    fn generate(&self) -> Result<Self> {
        self.client()?.get_user(&self.username)
    }
}
