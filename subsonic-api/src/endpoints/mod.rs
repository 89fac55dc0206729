//! Endpoint wrappers, one module per API category.
//!
//! Every module adds an `impl SubsonicClient` block. Wrappers build the
//! endpoint's parameters, call [`SubsonicClient::request`] and decode the
//! payload key that holds the result. Listing endpoints nest their items
//! one level down (`{"genres": {"genre": [...]}}`); a missing container or
//! item key is an empty list, since servers leave empty arrays out.

mod annotation;
mod bookmarks;
mod browsing;
mod chat;
mod jukebox;
mod lists;
mod media;
mod playlists;
mod podcast;
mod radio;
mod scanning;
mod searching;
mod sharing;
mod system;
mod users;

use crate::client::SubsonicClient;
use crate::envelope::Payload;
use crate::error::{Result, SubsonicError};
use crate::params::Params;
use crate::types::{FromJson, decode_all};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Kind of item passed to `star` and `unstar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarTarget {
    /// A song, video or folder.
    Song,
    Album,
    Artist,
}

impl StarTarget {
    pub(crate) const fn param(self) -> &'static str {
        match self {
            Self::Song => "id",
            Self::Album => "albumId",
            Self::Artist => "artistId",
        }
    }
}

impl SubsonicClient {
    /// Call `endpoint` and decode the entity stored under `key`.
    pub(crate) fn fetch<T: FromJson>(
        &self,
        endpoint: &str,
        params: &Params,
        key: &str,
    ) -> Result<T> {
        let mut payload = self.request(endpoint, params)?;
        let value = take(&mut payload, endpoint, key)?;
        T::from_json(value, &self.handle())
    }

    /// Call `endpoint` and decode the list at `container.key`.
    pub(crate) fn fetch_list<T: FromJson>(
        &self,
        endpoint: &str,
        params: &Params,
        container: &str,
        key: &str,
    ) -> Result<Vec<T>> {
        let mut payload = self.request(endpoint, params)?;
        decode_all(nested(&mut payload, container, key), &self.handle())
    }

    /// Call `endpoint` and deserialize the plain record under `key`.
    pub(crate) fn fetch_record<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &Params,
        key: &str,
    ) -> Result<T> {
        let mut payload = self.request(endpoint, params)?;
        Ok(serde_json::from_value(take(&mut payload, endpoint, key)?)?)
    }

    /// Call an endpoint whose success carries no data.
    pub(crate) fn call(&self, endpoint: &str, params: &Params) -> Result<()> {
        self.request(endpoint, params).map(drop)
    }
}

fn take(payload: &mut Payload, endpoint: &str, key: &str) -> Result<Value> {
    payload.remove(key).ok_or_else(|| {
        SubsonicError::MalformedResponse(format!("`{endpoint}` response has no `{key}`"))
    })
}

fn nested(payload: &mut Payload, container: &str, key: &str) -> Option<Value> {
    match payload.remove(container) {
        Some(Value::Object(mut inner)) => inner.remove(key),
        _ => None,
    }
}

/// Pick one item out of a listing, for entities the API has no direct
/// lookup for.
pub(crate) fn find<T>(
    items: Vec<T>,
    kind: &'static str,
    id: impl ToString,
    matches: impl Fn(&T) -> bool,
) -> Result<T> {
    items
        .into_iter()
        .find(|item| matches(item))
        .ok_or_else(|| SubsonicError::ResourceNotFound {
            kind,
            id: id.to_string(),
        })
}
