use crate::client::{ClientRef, SubsonicClient};
use crate::error::Result;
use crate::refresh::{Mutation, Refreshable, settle};
use crate::types::{de, require};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InternetRadioStation {
    pub id: String,
    pub name: Option<String>,
    pub stream_url: Option<String>,
    pub homepage_url: Option<String>,
    #[serde(skip)]
    pub(crate) client: ClientRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InternetRadioStationFragment {
    #[serde(default, deserialize_with = "de::opt_id")]
    id: Option<String>,
    name: Option<String>,
    stream_url: Option<String>,
    homepage_url: Option<String>,
}

impl_from_json!(InternetRadioStation => InternetRadioStationFragment);

impl InternetRadioStation {
    pub(crate) fn from_fragment(
        f: InternetRadioStationFragment,
        client: &ClientRef,
    ) -> Result<Self> {
        Ok(Self {
            id: require(f.id, "internet radio station", "id")?,
            name: f.name,
            stream_url: f.stream_url,
            homepage_url: f.homepage_url,
            client: client.clone(),
        })
    }

    fn client(&self) -> Result<SubsonicClient> {
        self.client.upgrade()
    }

    /// Push the local name and URLs to the server. Name and stream URL must
    /// be set.
    pub fn update(self) -> Result<Self> {
        let name = require(self.name.as_deref(), "internet radio station", "name")?;
        let stream_url = require(
            self.stream_url.as_deref(),
            "internet radio station",
            "streamUrl",
        )?;
        self.client()?.update_internet_radio_station(
            &self.id,
            stream_url,
            name,
            self.homepage_url.as_deref(),
        )?;
        settle(self, Mutation::RadioUpdate, |_| {})
    }

    pub fn delete(self) -> Result<()> {
        self.client()?.delete_internet_radio_station(&self.id)
    }
}

impl Refreshable for InternetRadioStation {
    fn generate(&self) -> Result<Self> {
        self.client()?.get_internet_radio_station(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubsonicError;
    use crate::types::FromJson;
    use serde_json::json;

    #[test]
    fn station_fields() {
        let station = InternetRadioStation::from_json(
            json!({
                "id": "1",
                "name": "Radio",
                "streamUrl": "http://stream.example.com/live",
                "homepageUrl": "http://example.com"
            }),
            &ClientRef::detached(),
        )
        .unwrap();
        assert_eq!(station.name.as_deref(), Some("Radio"));
        assert_eq!(
            station.stream_url.as_deref(),
            Some("http://stream.example.com/live")
        );
    }

    #[test]
    fn update_needs_stream_url() {
        let station = InternetRadioStation::from_json(
            json!({"id": "1", "name": "Radio"}),
            &ClientRef::detached(),
        )
        .unwrap();
        assert!(matches!(
            station.update(),
            Err(SubsonicError::MissingField { field: "streamUrl", .. })
        ));
    }
}
