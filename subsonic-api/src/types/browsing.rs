use crate::client::{ClientRef, SubsonicClient};
use crate::error::Result;
use crate::refresh::Refreshable;
use crate::time;
use crate::types::artist::Artist;
use crate::types::song::{Song, SongFragment};
use crate::types::{convert_list, de, require};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A genre. Identified by its name; there is no separate id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Genre {
    pub name: String,
    pub song_count: Option<u32>,
    pub album_count: Option<u32>,
    #[serde(skip)]
    pub(crate) client: ClientRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenreFragment {
    value: Option<String>,
    song_count: Option<u32>,
    album_count: Option<u32>,
}

impl_from_json!(Genre => GenreFragment);

impl Genre {
    pub(crate) fn from_fragment(f: GenreFragment, client: &ClientRef) -> Result<Self> {
        Ok(Self {
            name: require(f.value, "genre", "value")?,
            song_count: f.song_count,
            album_count: f.album_count,
            client: client.clone(),
        })
    }

    pub(crate) fn summary(name: String, client: &ClientRef) -> Self {
        Self {
            name,
            client: client.clone(),
            ..Self::default()
        }
    }

    fn client(&self) -> Result<SubsonicClient> {
        self.client.upgrade()
    }

    /// Songs tagged with this genre (`getSongsByGenre`).
    pub fn songs(&self, count: Option<u32>, offset: Option<u32>) -> Result<Vec<Song>> {
        self.client()?
            .get_songs_by_genre(&self.name, count, offset, None)
    }
}

impl Refreshable for Genre {
    fn generate(&self) -> Result<Self> {
        self.client()?.get_genre(&self.name)
    }
}

/// A top-level media folder configured on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MusicFolder {
    pub id: String,
    pub name: Option<String>,
    #[serde(skip)]
    pub(crate) client: ClientRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MusicFolderFragment {
    #[serde(default, deserialize_with = "de::opt_id")]
    id: Option<String>,
    name: Option<String>,
}

impl_from_json!(MusicFolder => MusicFolderFragment);

impl MusicFolder {
    pub(crate) fn from_fragment(f: MusicFolderFragment, client: &ClientRef) -> Result<Self> {
        Ok(Self {
            id: require(f.id, "music folder", "id")?,
            name: f.name,
            client: client.clone(),
        })
    }

    fn client(&self) -> Result<SubsonicClient> {
        self.client.upgrade()
    }

    /// Artists whose files live in this folder.
    pub fn artists(&self) -> Result<Vec<Artist>> {
        self.client()?.get_artists(Some(&self.id))
    }
}

impl Refreshable for MusicFolder {
    fn generate(&self) -> Result<Self> {
        self.client()?.get_music_folder(&self.id)
    }
}

/// A directory in file-structure browsing (`getMusicDirectory`).
///
/// Children are folders (`is_dir == Some(true)`) or files, both decoded as
/// [`Song`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MusicDirectory {
    pub id: String,
    pub parent: Option<String>,
    pub name: Option<String>,
    pub starred: Option<DateTime<Utc>>,
    pub user_rating: Option<u8>,
    pub average_rating: Option<f64>,
    pub play_count: Option<u64>,
    pub children: Option<Vec<Song>>,
    #[serde(skip)]
    pub(crate) client: ClientRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MusicDirectoryFragment {
    #[serde(default, deserialize_with = "de::opt_id")]
    id: Option<String>,
    parent: Option<String>,
    name: Option<String>,
    starred: Option<String>,
    user_rating: Option<u8>,
    average_rating: Option<f64>,
    play_count: Option<u64>,
    child: Option<Vec<SongFragment>>,
}

impl_from_json!(MusicDirectory => MusicDirectoryFragment);

impl MusicDirectory {
    pub(crate) fn from_fragment(f: MusicDirectoryFragment, client: &ClientRef) -> Result<Self> {
        Ok(Self {
            id: require(f.id, "directory", "id")?,
            parent: f.parent,
            name: f.name,
            starred: time::parse_opt(f.starred.as_deref())?,
            user_rating: f.user_rating,
            average_rating: f.average_rating,
            play_count: f.play_count,
            children: convert_list(f.child, |c| Song::from_fragment(c, client))?,
            client: client.clone(),
        })
    }

    fn client(&self) -> Result<SubsonicClient> {
        self.client.upgrade()
    }

    /// The parent directory, if this is not a top-level one.
    pub fn parent_directory(&self) -> Result<Option<MusicDirectory>> {
        match &self.parent {
            Some(parent) => self.client()?.get_music_directory(parent).map(Some),
            None => Ok(None),
        }
    }
}

impl Refreshable for MusicDirectory {
    fn generate(&self) -> Result<Self> {
        self.client()?.get_music_directory(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubsonicError;
    use crate::types::FromJson;
    use serde_json::json;

    #[test]
    fn genre_is_named_by_value() {
        let g = Genre::from_json(
            json!({"value": "Rock", "songCount": 10, "albumCount": 2}),
            &ClientRef::detached(),
        )
        .unwrap();
        assert_eq!(g.name, "Rock");
        assert_eq!(g.song_count, Some(10));
    }

    #[test]
    fn genre_without_value_fails() {
        let err = Genre::from_json(json!({"songCount": 1}), &ClientRef::detached()).unwrap_err();
        assert!(matches!(err, SubsonicError::MissingField { entity: "genre", .. }));
    }

    #[test]
    fn directory_children_mix_files_and_folders() {
        let dir = MusicDirectory::from_json(
            json!({
                "id": "d1",
                "name": "Music",
                "child": [
                    {"id": "d2", "isDir": true, "title": "Sub"},
                    {"id": "s1", "isDir": false, "title": "Song"}
                ]
            }),
            &ClientRef::detached(),
        )
        .unwrap();
        let children = dir.children.unwrap();
        assert_eq!(children[0].is_dir, Some(true));
        assert_eq!(children[1].id, "s1");
        assert!(dir.parent.is_none());
    }

    #[test]
    fn folder_ids_accept_strings_and_integers() {
        let numeric =
            MusicFolder::from_json(json!({"id": 3, "name": "Library"}), &ClientRef::detached())
                .unwrap();
        assert_eq!(numeric.id, "3");

        let textual =
            MusicFolder::from_json(json!({"id": "lib-1", "name": "Music"}), &ClientRef::detached())
                .unwrap();
        assert_eq!(textual.id, "lib-1");
    }
}
