//! Internet radio API.
//!
//! Endpoints: `getInternetRadioStations`, `createInternetRadioStation`,
//! `updateInternetRadioStation`, `deleteInternetRadioStation`

use crate::client::SubsonicClient;
use crate::endpoints::find;
use crate::error::Result;
use crate::params::Params;
use crate::types::InternetRadioStation;

impl SubsonicClient {
    pub fn get_internet_radio_stations(&self) -> Result<Vec<InternetRadioStation>> {
        self.fetch_list(
            "getInternetRadioStations",
            &Params::new(),
            "internetRadioStations",
            "internetRadioStation",
        )
    }

    pub fn get_internet_radio_station(&self, id: &str) -> Result<InternetRadioStation> {
        find(
            self.get_internet_radio_stations()?,
            "internet radio station",
            id,
            |s| s.id == id,
        )
    }

    pub fn create_internet_radio_station(
        &self,
        stream_url: &str,
        name: &str,
        homepage_url: Option<&str>,
    ) -> Result<()> {
        let params = Params::new()
            .set("streamUrl", stream_url)
            .set("name", name)
            .opt("homepageUrl", homepage_url);
        self.call("createInternetRadioStation", &params)
    }

    pub fn update_internet_radio_station(
        &self,
        id: &str,
        stream_url: &str,
        name: &str,
        homepage_url: Option<&str>,
    ) -> Result<()> {
        let params = Params::new()
            .set("id", id)
            .set("streamUrl", stream_url)
            .set("name", name)
            .opt("homepageUrl", homepage_url);
        self.call("updateInternetRadioStation", &params)
    }

    pub fn delete_internet_radio_station(&self, id: &str) -> Result<()> {
        self.call("deleteInternetRadioStation", &Params::new().set("id", id))
    }
}
