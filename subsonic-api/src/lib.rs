//! Subsonic / OpenSubsonic REST API client library.
//!
//! Provides authenticated access to any server speaking the Subsonic
//! protocol (Navidrome, Gonic, Airsonic, Subsonic itself), with typed
//! entities that can refresh and mutate themselves.
//!
//! # Authentication
//!
//! Every request carries the user name, protocol version `1.16.1`, a client
//! name and either a salted MD5 token (default) or the plain password. The
//! connection settings can be persisted to
//! `~/.config/subsonic-api/profile.json`.
//!
//! ```no_run
//! use subsonic_api::{ClientConfig, Credentials, SubsonicClient};
//!
//! let credentials = Credentials::new("alice", "sesame", "my-player");
//! let client = SubsonicClient::new(ClientConfig::new("music.example.com", credentials))?;
//! client.ping()?;
//! # Ok::<(), subsonic_api::SubsonicError>(())
//! ```
//!
//! # Entities
//!
//! Entities keep a weak handle to the client that built them:
//!
//! ```no_run
//! use subsonic_api::{Refreshable, SubsonicClient};
//!
//! # let client: SubsonicClient = unimplemented!();
//! let album = client.get_album("al-42")?;
//! let song = album.songs.unwrap_or_default().remove(0);
//! let song = song.star()?.set_rating(5)?;
//! let song = song.generate()?;
//! # Ok::<(), subsonic_api::SubsonicError>(())
//! ```
//!
//! Mutations consume the entity and return its new state, either patched
//! locally or fetched again, as listed by [`Mutation::policy`].
//!
//! # API endpoint mapping
//!
//! | Category        | Endpoints                                                        |
//! |-----------------|------------------------------------------------------------------|
//! | System          | `ping`, `getLicense`, `getOpenSubsonicExtensions`                |
//! | Browsing        | `getMusicFolders`, `getGenres`, `getArtists`, `getArtist`, `getAlbum`, `getSong`, `getMusicDirectory`, `getAlbumInfo2`, `getArtistInfo2`, `getSimilarSongs2`, `getTopSongs`, `getVideos` |
//! | Lists           | `getAlbumList2`, `getRandomSongs`, `getSongsByGenre`, `getNowPlaying`, `getStarred2` |
//! | Searching       | `search3`                                                        |
//! | Playlists       | `getPlaylists`, `getPlaylist`, `createPlaylist`, `updatePlaylist`, `deletePlaylist` |
//! | Media retrieval | `stream`, `download`, `getCoverArt`, `getAvatar`, `getCaptions`, `getLyrics` |
//! | Annotation      | `star`, `unstar`, `setRating`, `scrobble`                        |
//! | Sharing         | `getShares`, `createShare`, `updateShare`, `deleteShare`         |
//! | Podcasts        | `getPodcasts`, `getNewestPodcasts`, `refreshPodcasts`, `createPodcastChannel`, `deletePodcastChannel`, `downloadPodcastEpisode`, `deletePodcastEpisode` |
//! | Jukebox         | `jukeboxControl`                                                 |
//! | Internet radio  | `getInternetRadioStations`, `createInternetRadioStation`, `updateInternetRadioStation`, `deleteInternetRadioStation` |
//! | Chat            | `getChatMessages`, `addChatMessage`                              |
//! | Users           | `getUser`, `getUsers`, `createUser`, `updateUser`, `deleteUser`, `changePassword` |
//! | Bookmarks       | `getBookmarks`, `createBookmark`, `deleteBookmark`, `getPlayQueue`, `savePlayQueue` |
//! | Scanning        | `getScanStatus`, `startScan`                                     |

pub mod auth;
pub mod client;
pub mod config;
mod endpoints;
pub mod envelope;
pub mod error;
pub mod params;
pub mod refresh;
mod time;
pub mod types;

pub use auth::Credentials;
pub use client::{ClientRef, SubsonicClient};
pub use config::{ClientConfig, Profile, RequestMethod};
pub use endpoints::StarTarget;
pub use error::{ErrorCode, Result, SubsonicError};
pub use params::Params;
pub use refresh::{Mutation, Refresh, Refreshable};
pub use types::*;
