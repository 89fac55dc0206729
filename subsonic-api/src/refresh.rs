//! Re-synchronizing entities with the server.
//!
//! Entities keep a [`ClientRef`](crate::ClientRef) so they can fetch a fresh
//! copy of themselves ([`Refreshable::generate`]) or run mutations such as
//! `star()` or `jukebox.shuffle()` without the caller passing the client
//! around.
//!
//! After a mutation succeeds, the entity either patches its own fields
//! (the effect is fully known locally) or is re-fetched (the server decides
//! the outcome, e.g. shuffled order). Which one applies is decided by
//! [`Mutation::policy`] alone.

use crate::error::Result;

/// What happens to an entity after a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Apply the known effect to the local copy and return it.
    PatchLocal,
    /// Discard the local copy and return a fresh one from the server.
    ForceRefetch,
}

/// Every mutation an entity can perform on itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Star,
    Unstar,
    SetRating,
    RemoveRating,
    Scrobble,
    PlaylistUpdate,
    PlaylistAddSongs,
    PlaylistRemoveSongs,
    ShareUpdate,
    RadioUpdate,
    UserUpdate,
    BookmarkUpdate,
    PlayQueueSave,
    EpisodeDownload,
    JukeboxStart,
    JukeboxStop,
    JukeboxSkip,
    JukeboxAdd,
    JukeboxSet,
    JukeboxRemove,
    JukeboxClear,
    JukeboxShuffle,
    JukeboxSetGain,
}

impl Mutation {
    /// The refresh policy for this mutation.
    pub const fn policy(self) -> Refresh {
        match self {
            Self::Star
            | Self::Unstar
            | Self::SetRating
            | Self::RemoveRating
            | Self::Scrobble
            | Self::PlaylistUpdate
            | Self::ShareUpdate
            | Self::RadioUpdate
            | Self::UserUpdate
            | Self::BookmarkUpdate
            | Self::PlayQueueSave
            | Self::JukeboxStart
            | Self::JukeboxStop
            | Self::JukeboxRemove
            | Self::JukeboxClear
            | Self::JukeboxSetGain => Refresh::PatchLocal,
            // Track positions, download state and playback order are chosen
            // by the server.
            Self::PlaylistAddSongs
            | Self::PlaylistRemoveSongs
            | Self::EpisodeDownload
            | Self::JukeboxSkip
            | Self::JukeboxAdd
            | Self::JukeboxSet
            | Self::JukeboxShuffle => Refresh::ForceRefetch,
        }
    }
}

/// An entity that can fetch its current server-side state.
pub trait Refreshable: Sized {
    /// Fetch the richest available version of this entity by its id.
    ///
    /// Never modifies `self`; rebind the result: `song = song.generate()?`.
    fn generate(&self) -> Result<Self>;
}

/// Finish a mutation that already succeeded on the server.
pub(crate) fn settle<T, F>(mut entity: T, mutation: Mutation, patch: F) -> Result<T>
where
    T: Refreshable,
    F: FnOnce(&mut T),
{
    match mutation.policy() {
        Refresh::PatchLocal => {
            patch(&mut entity);
            Ok(entity)
        }
        Refresh::ForceRefetch => entity.generate(),
    }
}
