use crate::client::{ClientRef, SubsonicClient};
use crate::endpoints::StarTarget;
use crate::error::Result;
use crate::refresh::{Mutation, Refreshable, settle};
use crate::time;
use crate::types::{de, require};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A video file from `getVideos`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Video {
    pub id: String,
    pub parent: Option<String>,
    pub title: Option<String>,
    pub cover_art: Option<String>,
    pub size: Option<u64>,
    pub content_type: Option<String>,
    pub suffix: Option<String>,
    pub transcoded_content_type: Option<String>,
    pub transcoded_suffix: Option<String>,
    /// Seconds.
    pub duration: Option<u32>,
    pub bit_rate: Option<u32>,
    pub path: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub starred: Option<DateTime<Utc>>,
    pub play_count: Option<u64>,
    #[serde(skip)]
    pub(crate) client: ClientRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoFragment {
    #[serde(default, deserialize_with = "de::opt_id")]
    id: Option<String>,
    parent: Option<String>,
    title: Option<String>,
    cover_art: Option<String>,
    size: Option<u64>,
    content_type: Option<String>,
    suffix: Option<String>,
    transcoded_content_type: Option<String>,
    transcoded_suffix: Option<String>,
    duration: Option<u32>,
    bit_rate: Option<u32>,
    path: Option<String>,
    created: Option<String>,
    starred: Option<String>,
    play_count: Option<u64>,
}

impl_from_json!(Video => VideoFragment);

impl Video {
    pub(crate) fn from_fragment(f: VideoFragment, client: &ClientRef) -> Result<Self> {
        Ok(Self {
            id: require(f.id, "video", "id")?,
            parent: f.parent,
            title: f.title,
            cover_art: f.cover_art,
            size: f.size,
            content_type: f.content_type,
            suffix: f.suffix,
            transcoded_content_type: f.transcoded_content_type,
            transcoded_suffix: f.transcoded_suffix,
            duration: f.duration,
            bit_rate: f.bit_rate,
            path: f.path,
            created: time::parse_opt(f.created.as_deref())?,
            starred: time::parse_opt(f.starred.as_deref())?,
            play_count: f.play_count,
            client: client.clone(),
        })
    }

    fn client(&self) -> Result<SubsonicClient> {
        self.client.upgrade()
    }

    pub fn star(self) -> Result<Self> {
        self.client()?.star(StarTarget::Song, &self.id)?;
        settle(self, Mutation::Star, |video| video.starred = Some(Utc::now()))
    }

    pub fn unstar(self) -> Result<Self> {
        self.client()?.unstar(StarTarget::Song, &self.id)?;
        settle(self, Mutation::Unstar, |video| video.starred = None)
    }

    pub fn download(&self, dest: &Path) -> Result<PathBuf> {
        self.client()?.download(&self.id, dest)
    }

    /// Save the subtitles (`getCaptions`), as `srt` or `vtt`.
    pub fn download_captions(&self, dest: &Path, format: Option<&str>) -> Result<PathBuf> {
        self.client()?.get_captions(&self.id, format, dest)
    }
}

impl Refreshable for Video {
    fn generate(&self) -> Result<Self> {
        self.client()?.get_video(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FromJson;
    use serde_json::json;

    #[test]
    fn video_fields() {
        let v = Video::from_json(
            json!({
                "id": "460",
                "title": "Clip",
                "isVideo": true,
                "contentType": "video/mp4",
                "transcodedSuffix": "flv",
                "duration": 120
            }),
            &ClientRef::detached(),
        )
        .unwrap();
        assert_eq!(v.content_type.as_deref(), Some("video/mp4"));
        assert_eq!(v.transcoded_suffix.as_deref(), Some("flv"));
        assert!(v.starred.is_none());
    }
}
