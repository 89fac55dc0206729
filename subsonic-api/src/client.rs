//! HTTP client for the Subsonic REST API.
//!
//! Every call goes to `<scheme>://<host>/rest/<endpoint>` carrying the
//! authentication parameters from [`Credentials::auth_params`] followed by
//! the endpoint's own parameters. Depending on [`RequestMethod`] they travel
//! as a URL-encoded form body (POST) or as the query string (GET).
//!
//! JSON endpoints are unwrapped by [`envelope`](crate::envelope); binary
//! endpoints (download, cover art, avatar, captions) go through
//! [`SubsonicClient::download_to`], which validates the response before it
//! touches the filesystem.

use crate::auth::Credentials;
use crate::config::{ClientConfig, Profile, RequestMethod};
use crate::envelope::{self, Payload};
use crate::error::{Result, SubsonicError};
use crate::params::{self, Params};
use reqwest::blocking::{Client, Response};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderMap};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};
use tracing::debug;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub(crate) struct ClientInner {
    http: Client,
    base_url: String,
    credentials: Credentials,
    method: RequestMethod,
}

/// Blocking client for a Subsonic-compatible server.
///
/// Cheap to clone; clones share the same HTTP connection pool and
/// credentials. API methods are implemented per category in the
/// `endpoints` modules as `impl SubsonicClient` blocks.
#[derive(Clone)]
pub struct SubsonicClient {
    inner: Arc<ClientInner>,
}

impl SubsonicClient {
    /// Create a client from an explicit configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        let base_url = normalize_base_url(&config.url, config.credentials.use_https);
        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                credentials: config.credentials,
                method: config.method,
            }),
        })
    }

    /// Create a client from the profile saved at
    /// `~/.config/subsonic-api/profile.json`.
    pub fn from_profile() -> Result<Self> {
        Self::new(Profile::load()?.to_config()?)
    }

    /// Normalized server root, e.g. `https://music.example.com`.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    pub fn method(&self) -> RequestMethod {
        self.inner.method
    }

    /// A non-owning handle stored inside every entity this client builds.
    pub fn handle(&self) -> ClientRef {
        ClientRef(Arc::downgrade(&self.inner))
    }

    /// Full URL of an endpoint, without parameters.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/rest/{endpoint}", self.inner.base_url)
    }

    /// URL with authentication and `params` in the query string.
    ///
    /// Meant for handing to a media player (`stream`, `hls.m3u8`). The URL
    /// embeds a one-off token, or the password when token auth is off.
    pub fn signed_url(&self, endpoint: &str, params: &Params) -> String {
        format!("{}?{}", self.endpoint_url(endpoint), self.encode_params(params))
    }

    /// Send one authenticated request and return the unparsed response.
    ///
    /// Network failures are returned as [`SubsonicError::Http`] and never
    /// retried. The HTTP status is not checked here.
    pub fn raw_request(&self, endpoint: &str, params: &Params) -> Result<Response> {
        let url = self.endpoint_url(endpoint);
        let encoded = self.encode_params(params);
        debug!(endpoint, method = ?self.inner.method, "sending request");

        let req = match self.inner.method {
            RequestMethod::Get => self.inner.http.get(format!("{url}?{encoded}")),
            RequestMethod::Post => self
                .inner
                .http
                .post(&url)
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(encoded),
        };

        Ok(req.send()?)
    }

    /// Call a JSON endpoint and return the payload of a successful envelope.
    ///
    /// Returns [`SubsonicError::Api`] if the server reports `"failed"`.
    pub fn request(&self, endpoint: &str, params: &Params) -> Result<Payload> {
        let resp = self.raw_request(endpoint, params)?;
        let json: Value = resp.json()?;
        envelope::open(json)
    }

    /// Call a binary endpoint and save the body.
    ///
    /// If `dest` is an existing directory the file name comes from the
    /// `Content-Disposition` header, falling back to `<stem>.<ext>` with the
    /// extension guessed from `Content-Type`. Otherwise `dest` is the file
    /// path.
    ///
    /// Nothing is written unless the server answered 2xx with a non-JSON
    /// body, and the body is staged in a `.part` sibling that is renamed
    /// into place once complete. Returns the path written.
    pub fn download_to(
        &self,
        endpoint: &str,
        params: &Params,
        stem: &str,
        dest: &Path,
    ) -> Result<PathBuf> {
        let resp = self.raw_request(endpoint, params)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SubsonicError::Status {
                status,
                url: self.endpoint_url(endpoint),
            });
        }

        let headers = resp.headers().clone();
        let content_type = header_str(&headers, CONTENT_TYPE.as_str());
        if content_type.is_some_and(is_json) {
            // Errors on binary endpoints arrive as a regular envelope.
            let json: Value = resp.json()?;
            envelope::open(json)?;
            return Err(SubsonicError::MalformedResponse(format!(
                "`{endpoint}` returned JSON instead of a file"
            )));
        }

        let target = if dest.is_dir() {
            dest.join(derive_filename(&headers, stem))
        } else {
            dest.to_path_buf()
        };

        let bytes = resp.bytes()?;
        debug!(endpoint, dest = %target.display(), size = bytes.len(), "saving download");
        write_atomically(&target, &bytes)?;
        Ok(target)
    }

    fn encode_params(&self, params: &Params) -> String {
        let auth = self.inner.credentials.auth_params();
        params::encode(
            auth.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .chain(params.pairs().iter().map(|(k, v)| (k.as_str(), v.as_str()))),
        )
    }
}

impl fmt::Debug for SubsonicClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubsonicClient")
            .field("base_url", &self.inner.base_url)
            .field("credentials", &self.inner.credentials)
            .field("method", &self.inner.method)
            .finish_non_exhaustive()
    }
}

/// Non-owning link from an entity back to the client that built it.
///
/// Holding one never keeps the client alive. Entity methods that talk to
/// the server fail with [`SubsonicError::ClientDropped`] once the last
/// [`SubsonicClient`] clone is gone. The handle carries no data of its own,
/// so all handles compare equal and entity equality only looks at fields.
#[derive(Clone, Default)]
pub struct ClientRef(Weak<ClientInner>);

impl ClientRef {
    /// A handle attached to no client, for entities built by hand.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Recover the client, if it still exists.
    pub fn upgrade(&self) -> Result<SubsonicClient> {
        self.0
            .upgrade()
            .map(|inner| SubsonicClient { inner })
            .ok_or(SubsonicError::ClientDropped)
    }

    pub fn is_attached(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl PartialEq for ClientRef {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ClientRef {}

impl fmt::Debug for ClientRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_attached() {
            "ClientRef(attached)"
        } else {
            "ClientRef(detached)"
        })
    }
}

/// Force the configured scheme onto a user-supplied server address.
///
/// `music.example.com`, `http://music.example.com/` and even
/// `https://http://music.example.com` all end up as
/// `https://music.example.com` when `use_https` is set.
pub fn normalize_base_url(url: &str, use_https: bool) -> String {
    let mut host = url.trim();
    loop {
        let stripped = host
            .strip_prefix("https://")
            .or_else(|| host.strip_prefix("http://"));
        match stripped {
            Some(rest) => host = rest,
            None => break,
        }
    }
    let host = host.trim_end_matches('/');
    let scheme = if use_https { "https" } else { "http" };
    format!("{scheme}://{host}")
}

fn is_json(content_type: &str) -> bool {
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    mime.eq_ignore_ascii_case("application/json") || mime.eq_ignore_ascii_case("text/json")
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// File name for a download saved into a directory.
fn derive_filename(headers: &HeaderMap, stem: &str) -> String {
    header_str(headers, CONTENT_DISPOSITION.as_str())
        .and_then(disposition_filename)
        .unwrap_or_else(|| {
            let ext = header_str(headers, CONTENT_TYPE.as_str()).map_or("bin", extension_for);
            let stem = sanitize(stem).unwrap_or_else(|| "download".to_owned());
            format!("{stem}.{ext}")
        })
}

/// Pull `filename*=` (RFC 5987) or `filename=` out of a
/// `Content-Disposition` value. Only the final path component is kept.
fn disposition_filename(value: &str) -> Option<String> {
    let mut plain = None;
    for part in value.split(';').map(str::trim) {
        if let Some(encoded) = part.strip_prefix("filename*=") {
            let encoded = encoded
                .split_once("''")
                .map_or(encoded, |(_, rest)| rest)
                .trim_matches('"');
            if let Ok(decoded) = urlencoding::decode(encoded) {
                return sanitize(&decoded);
            }
        } else if let Some(name) = part.strip_prefix("filename=") {
            plain = sanitize(name.trim_matches('"'));
        }
    }
    plain
}

fn sanitize(name: &str) -> Option<String> {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
}

fn extension_for(content_type: &str) -> &'static str {
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    match mime.to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/flac" | "audio/x-flac" => "flac",
        "audio/ogg" => "ogg",
        "audio/aac" => "aac",
        "audio/mp4" | "audio/m4a" | "audio/x-m4a" => "m4a",
        "audio/wav" | "audio/x-wav" => "wav",
        "video/mp4" => "mp4",
        "text/vtt" => "vtt",
        "application/x-subrip" | "text/srt" => "srt",
        "application/zip" => "zip",
        _ => "bin",
    }
}

fn write_atomically(target: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut staging = target.as_os_str().to_owned();
    staging.push(".part");
    let staging = PathBuf::from(staging);

    if let Err(e) = fs::write(&staging, bytes).and_then(|()| fs::rename(&staging, target)) {
        let _ = fs::remove_file(&staging);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn base_url_gets_exactly_one_scheme() {
        assert_eq!(normalize_base_url("demo.example", true), "https://demo.example");
        assert_eq!(normalize_base_url("http://demo.example/", true), "https://demo.example");
        assert_eq!(
            normalize_base_url("https://http://demo.example", false),
            "http://demo.example"
        );
        assert_eq!(
            normalize_base_url(" demo.example:4533/music/ ", false),
            "http://demo.example:4533/music"
        );
    }

    #[test]
    fn disposition_prefers_extended_filename() {
        assert_eq!(
            disposition_filename(r#"attachment; filename="a.mp3"; filename*=UTF-8''B%20c.mp3"#),
            Some("B c.mp3".to_owned())
        );
        assert_eq!(
            disposition_filename(r#"attachment; filename="song.flac""#),
            Some("song.flac".to_owned())
        );
        assert_eq!(disposition_filename("inline"), None);
    }

    #[test]
    fn disposition_cannot_escape_target_directory() {
        assert_eq!(
            disposition_filename(r#"attachment; filename="../../etc/passwd""#),
            Some("passwd".to_owned())
        );
    }

    #[test]
    fn filename_falls_back_to_content_type() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("image/png"));
        assert_eq!(derive_filename(&headers, "al-1"), "al-1.png");

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/x-unknown"));
        assert_eq!(derive_filename(&headers, "x"), "x.bin");
    }

    #[test]
    fn fallback_stem_cannot_escape_target_directory() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("image/png"));
        assert_eq!(derive_filename(&headers, "../x"), "x.png");
        assert_eq!(derive_filename(&headers, "a/b/c"), "c.png");
        assert_eq!(derive_filename(&headers, ".."), "download.png");
    }

    #[test]
    fn json_detection_ignores_parameters() {
        assert!(is_json("application/json; charset=utf-8"));
        assert!(!is_json("audio/mpeg"));
    }

    #[test]
    fn handle_does_not_keep_client_alive() {
        let config = ClientConfig::new("demo.example", Credentials::new("u", "p", "test"));
        let client = SubsonicClient::new(config).unwrap();
        let handle = client.handle();
        assert!(handle.is_attached());
        assert!(handle.upgrade().is_ok());

        drop(client);
        assert!(!handle.is_attached());
        assert!(matches!(handle.upgrade(), Err(SubsonicError::ClientDropped)));
    }
}
