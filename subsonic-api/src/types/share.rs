use crate::client::{ClientRef, SubsonicClient};
use crate::error::Result;
use crate::refresh::{Mutation, Refreshable, settle};
use crate::time;
use crate::types::song::{Song, SongFragment};
use crate::types::user::User;
use crate::types::{convert_list, de, require};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A public link to a set of songs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Share {
    pub id: String,
    pub url: Option<String>,
    pub user: Option<User>,
    pub description: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub expires: Option<DateTime<Utc>>,
    pub last_visited: Option<DateTime<Utc>>,
    pub visit_count: Option<u64>,
    pub songs: Option<Vec<Song>>,
    #[serde(skip)]
    pub(crate) client: ClientRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShareFragment {
    #[serde(default, deserialize_with = "de::opt_id")]
    id: Option<String>,
    url: Option<String>,
    username: Option<String>,
    description: Option<String>,
    created: Option<String>,
    expires: Option<String>,
    last_visited: Option<String>,
    visit_count: Option<u64>,
    entry: Option<Vec<SongFragment>>,
}

impl_from_json!(Share => ShareFragment);

impl Share {
    pub(crate) fn from_fragment(f: ShareFragment, client: &ClientRef) -> Result<Self> {
        Ok(Self {
            id: require(f.id, "share", "id")?,
            url: f.url,
            user: f.username.map(|name| User::summary(name, client)),
            description: f.description,
            created: time::parse_opt(f.created.as_deref())?,
            expires: time::parse_opt(f.expires.as_deref())?,
            last_visited: time::parse_opt(f.last_visited.as_deref())?,
            visit_count: f.visit_count,
            songs: convert_list(f.entry, |s| Song::from_fragment(s, client))?,
            client: client.clone(),
        })
    }

    fn client(&self) -> Result<SubsonicClient> {
        self.client.upgrade()
    }

    /// Push the local `description` and `expires` to the server.
    pub fn update(self) -> Result<Self> {
        self.client()?
            .update_share(&self.id, self.description.as_deref(), self.expires)?;
        settle(self, Mutation::ShareUpdate, |_| {})
    }

    pub fn delete(self) -> Result<()> {
        self.client()?.delete_share(&self.id)
    }
}

impl Refreshable for Share {
    fn generate(&self) -> Result<Self> {
        self.client()?.get_share(&self.id)
    }
}
