//! Server-side playback through the jukebox.
//!
//! `jukeboxControl?action=get` returns the status together with the queue;
//! every other action returns the status alone. `Jukebox::playlist` keeps
//! that difference: `None` means the queue was not part of the response,
//! `Some(vec![])` means the queue is empty.

use crate::client::{ClientRef, SubsonicClient};
use crate::error::Result;
use crate::refresh::{Mutation, Refreshable, settle};
use crate::types::song::{Song, SongFragment};
use crate::types::{convert_list, require};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Jukebox {
    /// Index into the queue, `-1` when nothing is selected.
    pub current_index: i32,
    pub playing: bool,
    /// Volume between `0.0` and `1.0`.
    pub gain: f32,
    /// Seconds into the current song.
    pub position: Option<u32>,
    pub playlist: Option<Vec<Song>>,
    #[serde(skip)]
    pub(crate) client: ClientRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JukeboxFragment {
    current_index: Option<i32>,
    playing: Option<bool>,
    gain: Option<f32>,
    position: Option<u32>,
    entry: Option<Vec<SongFragment>>,
}

impl_from_json!(Jukebox => JukeboxFragment);

impl Jukebox {
    pub(crate) fn from_fragment(f: JukeboxFragment, client: &ClientRef) -> Result<Self> {
        Ok(Self {
            current_index: require(f.current_index, "jukebox", "currentIndex")?,
            playing: require(f.playing, "jukebox", "playing")?,
            gain: require(f.gain, "jukebox", "gain")?,
            position: f.position,
            playlist: convert_list(f.entry, |s| Song::from_fragment(s, client))?,
            client: client.clone(),
        })
    }

    fn client(&self) -> Result<SubsonicClient> {
        self.client.upgrade()
    }

    /// Take the playback state from a status answer, keeping the local queue.
    fn adopt(&mut self, status: &Jukebox) {
        self.current_index = status.current_index;
        self.playing = status.playing;
        self.gain = status.gain;
        self.position = status.position;
    }

    pub fn start(self) -> Result<Self> {
        let status = self.client()?.jukebox_start()?;
        settle(self, Mutation::JukeboxStart, |j| j.adopt(&status))
    }

    pub fn stop(self) -> Result<Self> {
        let status = self.client()?.jukebox_stop()?;
        settle(self, Mutation::JukeboxStop, |j| j.adopt(&status))
    }

    /// Jump to `index` in the queue, `offset` seconds in.
    pub fn skip(self, index: u32, offset: Option<u32>) -> Result<Self> {
        self.client()?.jukebox_skip(index, offset)?;
        settle(self, Mutation::JukeboxSkip, |_| {})
    }

    pub fn add(self, song_ids: &[&str]) -> Result<Self> {
        self.client()?.jukebox_add(song_ids)?;
        settle(self, Mutation::JukeboxAdd, |_| {})
    }

    /// Replace the queue.
    pub fn set(self, song_ids: &[&str]) -> Result<Self> {
        self.client()?.jukebox_set(song_ids)?;
        settle(self, Mutation::JukeboxSet, |_| {})
    }

    /// Drop the song at `index` from the queue. The current index comes
    /// from the server, which shifts it when an earlier song goes away.
    pub fn remove(self, index: u32) -> Result<Self> {
        let status = self.client()?.jukebox_remove(index)?;
        settle(self, Mutation::JukeboxRemove, |j| {
            if let Some(playlist) = &mut j.playlist {
                let index = index as usize;
                if index < playlist.len() {
                    playlist.remove(index);
                }
            }
            j.adopt(&status);
        })
    }

    pub fn clear(self) -> Result<Self> {
        let status = self.client()?.jukebox_clear()?;
        settle(self, Mutation::JukeboxClear, |j| {
            j.playlist = Some(Vec::new());
            j.adopt(&status);
        })
    }

    pub fn shuffle(self) -> Result<Self> {
        self.client()?.jukebox_shuffle()?;
        settle(self, Mutation::JukeboxShuffle, |_| {})
    }

    /// Set the volume. Values outside `0.0..=1.0` fail before any request.
    pub fn set_gain(self, gain: f32) -> Result<Self> {
        let status = self.client()?.jukebox_set_gain(gain)?;
        settle(self, Mutation::JukeboxSetGain, |j| j.adopt(&status))
    }
}

impl Refreshable for Jukebox {
    fn generate(&self) -> Result<Self> {
        self.client()?.jukebox_get()
    }
}
