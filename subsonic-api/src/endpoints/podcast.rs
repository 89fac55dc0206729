//! Podcast API.
//!
//! Endpoints: `getPodcasts`, `getNewestPodcasts`, `refreshPodcasts`,
//! `createPodcastChannel`, `deletePodcastChannel`,
//! `downloadPodcastEpisode`, `deletePodcastEpisode`
//!
//! `getPodcasts` response:
//! ```json
//! {
//!   "podcasts": {
//!     "channel": [ {
//!       "id": "1", "url": "https://feeds.example.com/show.xml",
//!       "title": "Show", "status": "completed",
//!       "episode": [ {
//!         "id": "34", "streamId": "523", "channelId": "1",
//!         "title": "Episode 1", "status": "completed",
//!         "publishDate": "2011-02-03T14:46:43"
//!       } ]
//!     } ]
//!   }
//! }
//! ```

use crate::client::SubsonicClient;
use crate::endpoints::find;
use crate::error::{Result, SubsonicError};
use crate::params::Params;
use crate::types::{Channel, Episode};

impl SubsonicClient {
    pub fn get_podcasts(&self, include_episodes: bool) -> Result<Vec<Channel>> {
        let params = Params::new().set("includeEpisodes", include_episodes);
        self.fetch_list("getPodcasts", &params, "podcasts", "channel")
    }

    pub fn get_podcast(&self, id: &str, include_episodes: bool) -> Result<Channel> {
        let params = Params::new()
            .set("id", id)
            .set("includeEpisodes", include_episodes);
        let channels: Vec<Channel> =
            self.fetch_list("getPodcasts", &params, "podcasts", "channel")?;
        find(channels, "podcast channel", id, |c| c.id == id)
    }

    /// Most recently published episodes over all channels.
    pub fn get_newest_podcasts(&self, count: Option<u32>) -> Result<Vec<Episode>> {
        let params = Params::new().opt("count", count);
        self.fetch_list("getNewestPodcasts", &params, "newestPodcasts", "episode")
    }

    /// Look an episode up in the channel listing.
    pub fn get_podcast_episode(&self, id: &str) -> Result<Episode> {
        self.get_podcasts(true)?
            .into_iter()
            .flat_map(|channel| channel.episodes.unwrap_or_default())
            .find(|episode| episode.id == id)
            .ok_or_else(|| SubsonicError::ResourceNotFound {
                kind: "podcast episode",
                id: id.to_owned(),
            })
    }

    /// Ask the server to check every channel for new episodes.
    pub fn refresh_podcasts(&self) -> Result<()> {
        self.call("refreshPodcasts", &Params::new())
    }

    pub fn create_podcast_channel(&self, url: &str) -> Result<()> {
        self.call("createPodcastChannel", &Params::new().set("url", url))
    }

    pub fn delete_podcast_channel(&self, id: &str) -> Result<()> {
        self.call("deletePodcastChannel", &Params::new().set("id", id))
    }

    /// Start fetching an episode from its feed. The download runs on the
    /// server; poll the episode's `status` to follow it.
    pub fn download_podcast_episode(&self, id: &str) -> Result<()> {
        self.call("downloadPodcastEpisode", &Params::new().set("id", id))
    }

    pub fn delete_podcast_episode(&self, id: &str) -> Result<()> {
        self.call("deletePodcastEpisode", &Params::new().set("id", id))
    }
}
