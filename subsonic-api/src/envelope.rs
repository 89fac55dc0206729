//! Response envelope handling.
//!
//! Every JSON response is wrapped like this:
//!
//! ```json
//! {
//!   "subsonic-response": {
//!     "status": "ok",
//!     "version": "1.16.1",
//!     ...endpoint-specific keys...
//!   }
//! }
//! ```
//!
//! and failures like this:
//!
//! ```json
//! {
//!   "subsonic-response": {
//!     "status": "failed",
//!     "version": "1.16.1",
//!     "error": { "code": 40, "message": "Wrong username or password." }
//!   }
//! }
//! ```
//!
//! A failed status is final. Nothing here retries.

use crate::error::{ErrorCode, Result, SubsonicError};
use serde_json::{Map, Value};
use tracing::warn;

/// Key of the outer wrapper object.
pub const ROOT_KEY: &str = "subsonic-response";

/// Envelope keys that describe the response itself rather than its payload.
/// OpenSubsonic servers add `type`, `serverVersion` and `openSubsonic`.
const BOOKKEEPING_KEYS: [&str; 6] = [
    "status",
    "version",
    "type",
    "serverVersion",
    "openSubsonic",
    "error",
];

/// Endpoint-specific keys of a successful response.
pub type Payload = Map<String, Value>;

/// Unwrap a full response body (`{"subsonic-response": {...}}`).
pub fn open(body: Value) -> Result<Payload> {
    let Value::Object(mut root) = body else {
        return Err(SubsonicError::MalformedResponse(
            "response body is not a JSON object".into(),
        ));
    };
    let envelope = root.remove(ROOT_KEY).ok_or_else(|| {
        SubsonicError::MalformedResponse(format!("missing `{ROOT_KEY}` key"))
    })?;
    unwrap(envelope)
}

/// Validate the inner envelope and return its payload, or raise the error
/// the server reported.
pub fn unwrap(envelope: Value) -> Result<Payload> {
    let Value::Object(mut envelope) = envelope else {
        return Err(SubsonicError::MalformedResponse(
            "envelope is not a JSON object".into(),
        ));
    };

    match envelope.get("status").and_then(Value::as_str) {
        Some("ok") => {
            for key in BOOKKEEPING_KEYS {
                envelope.remove(key);
            }
            Ok(envelope)
        }
        Some("failed") => Err(failure(envelope.get("error"))),
        Some(other) => Err(SubsonicError::MalformedResponse(format!(
            "unexpected status {other:?}"
        ))),
        None => Err(SubsonicError::MalformedResponse("missing status".into())),
    }
}

fn failure(error: Option<&Value>) -> SubsonicError {
    let code = error
        .and_then(|e| e.get("code"))
        .and_then(Value::as_i64)
        .unwrap_or(0);
    let message = error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();

    let code = ErrorCode::from(code);
    warn!(code = code.code(), message = %message, "server reported failure");
    SubsonicError::Api { code, message }
}
