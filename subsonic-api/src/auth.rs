//! Per-request authentication parameters.
//!
//! Every request carries `u` (username), `v` (protocol version), `c` (client
//! name) and `f=json`, plus one of two credential forms:
//!
//! - token auth (default): `t = md5(password + salt)` as lowercase hex and
//!   `s = salt`, a fresh 16-byte random value rendered as 32 hex chars;
//! - legacy auth: `p = password` in clear text.
//!
//! The salt is regenerated for every call. A token/salt pair is never reused.

use md5::{Digest, Md5};
use rand::Rng;
use std::fmt;
use std::fmt::Write as _;

/// Protocol version announced in the `v` parameter.
pub const PROTOCOL_VERSION: &str = "1.16.1";

/// Response format requested in the `f` parameter.
pub const RESPONSE_FORMAT: &str = "json";

const SALT_BYTES: usize = 16;

/// Account credentials, immutable for the lifetime of a client.
///
/// The password stays in memory in clear text because token auth needs it
/// to hash every request.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    /// Value of the `c` parameter identifying this application.
    pub client: String,
    /// Talk `https://` (default) or plain `http://`.
    pub use_https: bool,
    /// Salted token auth (default) or plaintext password.
    pub use_token: bool,
}

impl Credentials {
    /// Credentials with token auth over HTTPS.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            client: client.into(),
            use_https: true,
            use_token: true,
        }
    }

    /// Send the password in clear text instead of a salted token.
    ///
    /// Some servers (LDAP-backed accounts, error code 41) only accept this.
    #[must_use]
    pub fn plaintext(mut self) -> Self {
        self.use_token = false;
        self
    }

    /// Use `http://` instead of `https://`.
    #[must_use]
    pub fn insecure(mut self) -> Self {
        self.use_https = false;
        self
    }

    /// Build the authentication parameters for one outgoing request.
    pub fn auth_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("u", self.username.clone()),
            ("v", PROTOCOL_VERSION.to_owned()),
            ("c", self.client.clone()),
            ("f", RESPONSE_FORMAT.to_owned()),
        ];

        if self.use_token {
            let salt = random_salt();
            let token = token(&self.password, &salt);
            params.push(("t", token));
            params.push(("s", salt));
        } else {
            params.push(("p", self.password.clone()));
        }

        params
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("client", &self.client)
            .field("use_https", &self.use_https)
            .field("use_token", &self.use_token)
            .finish()
    }
}

/// `hex(md5(password || salt))`.
pub fn token(password: &str, salt: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    to_hex(&hasher.finalize())
}

fn random_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    rand::rng().fill(&mut bytes);
    to_hex(&bytes)
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn token_matches_known_md5() {
        // Example from the Subsonic API documentation.
        assert_eq!(token("sesame", "c19b2d"), "26719a1196d2a940705a59634eb18eab");
    }

    #[test]
    fn common_params_always_present() {
        let creds = Credentials::new("alice", "secret", "test-client");
        let params = creds.auth_params();
        assert_eq!(lookup(&params, "u"), Some("alice"));
        assert_eq!(lookup(&params, "v"), Some("1.16.1"));
        assert_eq!(lookup(&params, "c"), Some("test-client"));
        assert_eq!(lookup(&params, "f"), Some("json"));
    }

    #[test]
    fn plaintext_never_emits_token() {
        let creds = Credentials::new("alice", "secret", "test-client").plaintext();
        for _ in 0..5 {
            let params = creds.auth_params();
            assert_eq!(lookup(&params, "p"), Some("secret"));
            assert!(lookup(&params, "t").is_none());
            assert!(lookup(&params, "s").is_none());
        }
    }

    #[test]
    fn token_auth_uses_fresh_salt_per_call() {
        let creds = Credentials::new("alice", "secret", "test-client");
        let first = creds.auth_params();
        let second = creds.auth_params();

        let (t1, s1) = (lookup(&first, "t").unwrap(), lookup(&first, "s").unwrap());
        let (t2, s2) = (lookup(&second, "t").unwrap(), lookup(&second, "s").unwrap());
        assert_ne!(s1, s2);
        assert_ne!(t1, t2);
        assert!(lookup(&first, "p").is_none());

        assert_eq!(s1.len(), 32);
        assert!(s1.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(t1, token("secret", s1));
    }

    #[test]
    fn debug_hides_password() {
        let creds = Credentials::new("alice", "secret", "test-client");
        let shown = format!("{creds:?}");
        assert!(!shown.contains("secret"));
        assert!(shown.contains("alice"));
    }
}
