//! Media retrieval: streaming, downloads, cover art, avatars, captions and
//! lyrics.
//!
//! Binary endpoints go through [`SubsonicClient::download_to`]. `dest` may
//! be a directory, in which case the server's file name is used, or a full
//! file path.

use crate::client::SubsonicClient;
use crate::error::Result;
use crate::params::Params;
use crate::types::Lyrics;
use std::path::{Path, PathBuf};

impl SubsonicClient {
    /// Signed `stream` URL for handing to a media player. No request is
    /// made.
    ///
    /// `max_bit_rate` (kbps) and `format` (`mp3`, `opus`, `raw`, ...) ask the
    /// server to transcode.
    pub fn stream_url(&self, id: &str, max_bit_rate: Option<u32>, format: Option<&str>) -> String {
        let params = Params::new()
            .set("id", id)
            .opt("maxBitRate", max_bit_rate)
            .opt("format", format);
        self.signed_url("stream", &params)
    }

    /// Download the original file of a song or video.
    pub fn download(&self, id: &str, dest: &Path) -> Result<PathBuf> {
        self.download_to("download", &Params::new().set("id", id), id, dest)
    }

    /// `size` scales the image to at most that many pixels wide.
    pub fn get_cover_art(&self, id: &str, size: Option<u32>, dest: &Path) -> Result<PathBuf> {
        let params = Params::new().set("id", id).opt("size", size);
        self.download_to("getCoverArt", &params, id, dest)
    }

    pub fn get_avatar(&self, username: &str, dest: &Path) -> Result<PathBuf> {
        let params = Params::new().set("username", username);
        self.download_to("getAvatar", &params, username, dest)
    }

    /// Subtitles of a video, `srt` or `vtt`.
    pub fn get_captions(&self, id: &str, format: Option<&str>, dest: &Path) -> Result<PathBuf> {
        let params = Params::new().set("id", id).opt("format", format);
        self.download_to("getCaptions", &params, id, dest)
    }

    /// Lyrics matched by artist and title. Unknown songs yield empty lyrics.
    pub fn get_lyrics(&self, artist: Option<&str>, title: Option<&str>) -> Result<Lyrics> {
        let params = Params::new().opt("artist", artist).opt("title", title);
        let mut payload = self.request("getLyrics", &params)?;
        match payload.remove("lyrics") {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Lyrics::default()),
        }
    }
}
