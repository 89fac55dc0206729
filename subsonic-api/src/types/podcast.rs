use crate::client::{ClientRef, SubsonicClient};
use crate::error::Result;
use crate::refresh::{Mutation, Refreshable, settle};
use crate::time;
use crate::types::{convert_list, de, require};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A subscribed podcast feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Channel {
    pub id: String,
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_art: Option<String>,
    pub original_image_url: Option<String>,
    /// `new`, `downloading`, `completed`, `error`, `deleted` or `skipped`.
    pub status: Option<String>,
    pub error_message: Option<String>,
    pub episodes: Option<Vec<Episode>>,
    #[serde(skip)]
    pub(crate) client: ClientRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChannelFragment {
    #[serde(default, deserialize_with = "de::opt_id")]
    id: Option<String>,
    url: Option<String>,
    title: Option<String>,
    description: Option<String>,
    cover_art: Option<String>,
    original_image_url: Option<String>,
    status: Option<String>,
    error_message: Option<String>,
    episode: Option<Vec<EpisodeFragment>>,
}

impl_from_json!(Channel => ChannelFragment);

impl Channel {
    pub(crate) fn from_fragment(f: ChannelFragment, client: &ClientRef) -> Result<Self> {
        Ok(Self {
            id: require(f.id, "podcast channel", "id")?,
            url: f.url,
            title: f.title,
            description: f.description,
            cover_art: f.cover_art,
            original_image_url: f.original_image_url,
            status: f.status,
            error_message: f.error_message,
            episodes: convert_list(f.episode, |e| Episode::from_fragment(e, client))?,
            client: client.clone(),
        })
    }

    fn summary(id: String, client: &ClientRef) -> Self {
        Self {
            id,
            client: client.clone(),
            ..Self::default()
        }
    }

    fn client(&self) -> Result<SubsonicClient> {
        self.client.upgrade()
    }

    /// Unsubscribe and remove downloaded episodes.
    pub fn delete(self) -> Result<()> {
        self.client()?.delete_podcast_channel(&self.id)
    }
}

impl Refreshable for Channel {
    fn generate(&self) -> Result<Self> {
        self.client()?.get_podcast(&self.id, true)
    }
}

/// One episode of a podcast channel.
///
/// `stream_id` is the id of the downloaded media file and only exists once
/// the server has fetched the episode.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Episode {
    pub id: String,
    pub stream_id: Option<String>,
    pub channel: Option<Channel>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub publish_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub cover_art: Option<String>,
    pub size: Option<u64>,
    pub content_type: Option<String>,
    pub suffix: Option<String>,
    /// Seconds.
    pub duration: Option<u32>,
    pub bit_rate: Option<u32>,
    pub path: Option<String>,
    pub created: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub(crate) client: ClientRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EpisodeFragment {
    #[serde(default, deserialize_with = "de::opt_id")]
    id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_id")]
    stream_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_id")]
    channel_id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    publish_date: Option<String>,
    status: Option<String>,
    cover_art: Option<String>,
    size: Option<u64>,
    content_type: Option<String>,
    suffix: Option<String>,
    duration: Option<u32>,
    bit_rate: Option<u32>,
    path: Option<String>,
    created: Option<String>,
}

impl_from_json!(Episode => EpisodeFragment);

impl Episode {
    pub(crate) fn from_fragment(f: EpisodeFragment, client: &ClientRef) -> Result<Self> {
        Ok(Self {
            id: require(f.id, "podcast episode", "id")?,
            stream_id: f.stream_id,
            channel: f.channel_id.map(|id| Channel::summary(id, client)),
            title: f.title,
            description: f.description,
            publish_date: time::parse_opt(f.publish_date.as_deref())?,
            status: f.status,
            cover_art: f.cover_art,
            size: f.size,
            content_type: f.content_type,
            suffix: f.suffix,
            duration: f.duration,
            bit_rate: f.bit_rate,
            path: f.path,
            created: time::parse_opt(f.created.as_deref())?,
            client: client.clone(),
        })
    }

    fn client(&self) -> Result<SubsonicClient> {
        self.client.upgrade()
    }

    /// Ask the server to fetch the episode from the feed.
    pub fn download(self) -> Result<Self> {
        self.client()?.download_podcast_episode(&self.id)?;
        settle(self, Mutation::EpisodeDownload, |_| {})
    }

    /// Save the downloaded media file locally. `dest` may be a directory.
    pub fn save_to(&self, dest: &Path) -> Result<PathBuf> {
        let stream_id = require(self.stream_id.as_deref(), "podcast episode", "streamId")?;
        self.client()?.download(stream_id, dest)
    }

    pub fn delete(self) -> Result<()> {
        self.client()?.delete_podcast_episode(&self.id)
    }
}

impl Refreshable for Episode {
    fn generate(&self) -> Result<Self> {
        self.client()?.get_podcast_episode(&self.id)
    }
}
