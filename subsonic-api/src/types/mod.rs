//! Typed domain entities built from response fragments.
//!
//! Each entity kind is decoded in two steps:
//!
//! 1. serde reads the server-shaped JSON (camelCase keys, every field
//!    optional) into a private `*Fragment` struct;
//! 2. an explicit `from_fragment` conversion checks identity fields, parses
//!    timestamps and builds nested entities.
//!
//! Conversion rules shared by every kind:
//!
//! - an absent optional field is `None`, never a default like `0` or `""`;
//! - a missing identity field is [`SubsonicError::MissingField`];
//! - a malformed timestamp fails the whole entity;
//! - a nested object is only built when all of its identity fields are
//!   present (a song's album needs both `albumId` and `album`);
//! - an absent nested list is `None`, an empty one is `Some(vec![])`.
//!
//! Songs, albums and artists embed each other. Since all kinds live in this
//! module tree, their fragments and conversions reference each other
//! directly.

use crate::client::ClientRef;
use crate::error::{Result, SubsonicError};
use serde_json::Value;

/// Implements [`FromJson`] by way of a fragment struct and the type's
/// `from_fragment` conversion.
macro_rules! impl_from_json {
    ($ty:ty => $fragment:ty) => {
        impl $crate::types::FromJson for $ty {
            fn from_json(
                value: serde_json::Value,
                client: &$crate::client::ClientRef,
            ) -> $crate::error::Result<Self> {
                let fragment: $fragment = serde_json::from_value(value)?;
                Self::from_fragment(fragment, client)
            }
        }
    };
}

mod album;
mod artist;
mod bookmark;
mod browsing;
mod chat;
mod jukebox;
mod lists;
mod playlist;
mod podcast;
mod radio;
mod share;
mod song;
mod system;
mod user;
mod video;

pub use album::{Album, AlbumInfo, DiscTitle, ItemDate, RecordLabel};
pub use artist::{Artist, ArtistInfo};
pub use bookmark::{Bookmark, PlayQueue};
pub use browsing::{Genre, MusicDirectory, MusicFolder};
pub use chat::ChatMessage;
pub use jukebox::Jukebox;
pub use lists::{AlbumListType, NowPlayingEntry, SearchQuery, SearchResult, Starred};
pub use playlist::Playlist;
pub use podcast::{Channel, Episode};
pub use radio::InternetRadioStation;
pub use share::Share;
pub use song::{Contributor, ItemGenre, Lyrics, ReplayGain, Song};
pub use system::{License, OpenSubsonicExtension, ScanStatus};
pub use user::User;
pub use video::Video;

/// Build a typed value from one JSON fragment.
///
/// The client handle is stored in the result (and in every nested entity)
/// so it can refresh or mutate itself later.
pub trait FromJson: Sized {
    fn from_json(value: Value, client: &ClientRef) -> Result<Self>;
}

/// Unwrap an identity field or report which one is missing.
pub(crate) fn require<T>(value: Option<T>, entity: &'static str, field: &'static str) -> Result<T> {
    value.ok_or(SubsonicError::MissingField { entity, field })
}

/// Map a nested fragment list, keeping absent distinct from empty.
pub(crate) fn convert_list<F, T>(
    list: Option<Vec<F>>,
    convert: impl FnMut(F) -> Result<T>,
) -> Result<Option<Vec<T>>> {
    list.map(|items| items.into_iter().map(convert).collect())
        .transpose()
}

/// Decode every element of a JSON array. A missing value is an empty list:
/// servers omit empty arrays from listing containers.
pub(crate) fn decode_all<T: FromJson>(value: Option<Value>, client: &ClientRef) -> Result<Vec<T>> {
    elements(value)
        .into_iter()
        .map(|item| T::from_json(item, client))
        .collect()
}

/// The elements of a JSON array, tolerating a missing value.
pub(crate) fn elements(value: Option<Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        // Some servers collapse one-element arrays into the element itself.
        Some(single) => vec![single],
    }
}

/// Serde helpers for fields whose wire type varies between servers.
pub(crate) mod de {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        Str(String),
        Int(i64),
    }

    impl From<StringOrInt> for String {
        fn from(id: StringOrInt) -> Self {
            match id {
                StringOrInt::Str(s) => s,
                StringOrInt::Int(n) => n.to_string(),
            }
        }
    }

    /// Ids are strings in the protocol, but some servers send integers.
    pub fn opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(Option::<StringOrInt>::deserialize(d)?.map(String::from))
    }

    /// [`opt_id`] for a list of ids.
    pub fn opt_ids<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
        Ok(Option::<Vec<StringOrInt>>::deserialize(d)?
            .map(|ids| ids.into_iter().map(String::from).collect()))
    }
}
