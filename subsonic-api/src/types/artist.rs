use crate::client::{ClientRef, SubsonicClient};
use crate::endpoints::StarTarget;
use crate::error::Result;
use crate::refresh::{Mutation, Refreshable, settle};
use crate::time;
use crate::types::album::{Album, AlbumFragment};
use crate::types::song::Song;
use crate::types::{convert_list, de, require};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An artist from ID3 browsing, or a summary embedded in a song or album.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Artist {
    pub id: String,
    pub name: Option<String>,
    pub cover_art: Option<String>,
    pub artist_image_url: Option<String>,
    pub album_count: Option<u32>,
    pub albums: Option<Vec<Album>>,
    pub starred: Option<DateTime<Utc>>,
    pub user_rating: Option<u8>,
    pub average_rating: Option<f64>,
    pub music_brainz_id: Option<String>,
    pub sort_name: Option<String>,
    pub roles: Option<Vec<String>>,
    #[serde(skip)]
    pub(crate) client: ClientRef,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ArtistFragment {
    #[serde(default, deserialize_with = "de::opt_id")]
    id: Option<String>,
    name: Option<String>,
    cover_art: Option<String>,
    artist_image_url: Option<String>,
    album_count: Option<u32>,
    album: Option<Vec<AlbumFragment>>,
    starred: Option<String>,
    user_rating: Option<u8>,
    average_rating: Option<f64>,
    music_brainz_id: Option<String>,
    sort_name: Option<String>,
    roles: Option<Vec<String>>,
}

impl_from_json!(Artist => ArtistFragment);

impl Artist {
    pub(crate) fn from_fragment(f: ArtistFragment, client: &ClientRef) -> Result<Self> {
        Ok(Self {
            id: require(f.id, "artist", "id")?,
            name: f.name,
            cover_art: f.cover_art,
            artist_image_url: f.artist_image_url,
            album_count: f.album_count,
            albums: convert_list(f.album, |a| Album::from_fragment(a, client))?,
            starred: time::parse_opt(f.starred.as_deref())?,
            user_rating: f.user_rating,
            average_rating: f.average_rating,
            music_brainz_id: f.music_brainz_id,
            sort_name: f.sort_name,
            roles: f.roles,
            client: client.clone(),
        })
    }

    pub(crate) fn summary(id: String, name: String, client: &ClientRef) -> Self {
        Self {
            id,
            name: Some(name),
            client: client.clone(),
            ..Self::default()
        }
    }

    fn client(&self) -> Result<SubsonicClient> {
        self.client.upgrade()
    }

    /// Biography, images and similar artists (`getArtistInfo2`).
    pub fn info(&self, count: Option<u32>, include_not_present: bool) -> Result<ArtistInfo> {
        self.client()?
            .get_artist_info(&self.id, count, include_not_present)
    }

    /// Most played songs of this artist, looked up by name (`getTopSongs`).
    pub fn top_songs(&self, count: Option<u32>) -> Result<Vec<Song>> {
        let name = require(self.name.as_deref(), "artist", "name")?;
        self.client()?.get_top_songs(name, count)
    }

    pub fn star(self) -> Result<Self> {
        self.client()?.star(StarTarget::Artist, &self.id)?;
        settle(self, Mutation::Star, |artist| artist.starred = Some(Utc::now()))
    }

    pub fn unstar(self) -> Result<Self> {
        self.client()?.unstar(StarTarget::Artist, &self.id)?;
        settle(self, Mutation::Unstar, |artist| artist.starred = None)
    }

    pub fn set_rating(self, rating: u8) -> Result<Self> {
        self.client()?.set_rating(&self.id, rating)?;
        settle(self, Mutation::SetRating, |artist| artist.user_rating = Some(rating))
    }

    pub fn remove_rating(self) -> Result<Self> {
        self.client()?.remove_rating(&self.id)?;
        settle(self, Mutation::RemoveRating, |artist| artist.user_rating = None)
    }
}

impl Refreshable for Artist {
    fn generate(&self) -> Result<Self> {
        self.client()?.get_artist(&self.id)
    }
}

/// Biography and related artists from `getArtistInfo2`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArtistInfo {
    pub biography: Option<String>,
    pub music_brainz_id: Option<String>,
    pub last_fm_url: Option<String>,
    pub small_image_url: Option<String>,
    pub medium_image_url: Option<String>,
    pub large_image_url: Option<String>,
    pub similar_artists: Option<Vec<Artist>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ArtistInfoFragment {
    biography: Option<String>,
    music_brainz_id: Option<String>,
    last_fm_url: Option<String>,
    small_image_url: Option<String>,
    medium_image_url: Option<String>,
    large_image_url: Option<String>,
    similar_artist: Option<Vec<ArtistFragment>>,
}

impl_from_json!(ArtistInfo => ArtistInfoFragment);

impl ArtistInfo {
    pub(crate) fn from_fragment(f: ArtistInfoFragment, client: &ClientRef) -> Result<Self> {
        Ok(Self {
            biography: f.biography,
            music_brainz_id: f.music_brainz_id,
            last_fm_url: f.last_fm_url,
            small_image_url: f.small_image_url,
            medium_image_url: f.medium_image_url,
            large_image_url: f.large_image_url,
            similar_artists: convert_list(f.similar_artist, |a| Artist::from_fragment(a, client))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubsonicError;
    use crate::types::FromJson;
    use serde_json::json;

    #[test]
    fn artist_with_albums() {
        let artist = Artist::from_json(
            json!({
                "id": "ar1",
                "name": "Ar",
                "albumCount": 1,
                "starred": "2024-02-03T04:05:06Z",
                "album": [{"id": "a1", "name": "A", "artistId": "ar1", "artist": "Ar"}]
            }),
            &ClientRef::detached(),
        )
        .unwrap();

        assert_eq!(artist.album_count, Some(1));
        assert!(artist.starred.is_some());
        let albums = artist.albums.unwrap();
        assert_eq!(albums[0].artist.as_ref().unwrap().name.as_deref(), Some("Ar"));
    }

    #[test]
    fn artist_info_lists_similar_artists() {
        let info = ArtistInfo::from_json(
            json!({
                "biography": "bio",
                "similarArtist": [{"id": "ar2", "name": "Other"}]
            }),
            &ClientRef::detached(),
        )
        .unwrap();
        assert_eq!(info.biography.as_deref(), Some("bio"));
        assert_eq!(info.similar_artists.unwrap()[0].id, "ar2");
        assert!(info.last_fm_url.is_none());
    }

    #[test]
    fn top_songs_needs_a_name() {
        let artist = Artist::from_json(json!({"id": "ar1"}), &ClientRef::detached()).unwrap();
        assert!(matches!(
            artist.top_songs(None),
            Err(SubsonicError::MissingField { entity: "artist", field: "name" })
        ));
    }
}
