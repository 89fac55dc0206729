//! Error types for the Subsonic API client.

use std::fmt;

use thiserror::Error;

/// Numeric error codes defined by the Subsonic protocol.
///
/// The mapping from the wire integer is total: every code outside the
/// documented table becomes [`ErrorCode::Unknown`].
///
/// | Code | Variant                 | Meaning                                   |
/// |------|-------------------------|-------------------------------------------|
/// | 0    | `Generic`               | A generic error                           |
/// | 10   | `MissingParameter`      | Required parameter is missing             |
/// | 20   | `ClientOutdated`        | Client must upgrade (protocol too old)    |
/// | 30   | `ServerOutdated`        | Server must upgrade (protocol too old)    |
/// | 40   | `WrongCredentials`      | Wrong username or password                |
/// | 41   | `TokenAuthUnsupported`  | Token auth not supported for this user    |
/// | 50   | `Unauthorized`          | User is not authorized for the operation  |
/// | 60   | `TrialExpired`          | Trial period for the server is over       |
/// | 70   | `NotFound`              | The requested data was not found          |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Generic,
    MissingParameter,
    ClientOutdated,
    ServerOutdated,
    WrongCredentials,
    TokenAuthUnsupported,
    Unauthorized,
    TrialExpired,
    NotFound,
    /// Any code the protocol table does not define.
    Unknown(i64),
}

impl ErrorCode {
    /// The integer sent by the server for this code.
    pub fn code(self) -> i64 {
        match self {
            Self::Generic => 0,
            Self::MissingParameter => 10,
            Self::ClientOutdated => 20,
            Self::ServerOutdated => 30,
            Self::WrongCredentials => 40,
            Self::TokenAuthUnsupported => 41,
            Self::Unauthorized => 50,
            Self::TrialExpired => 60,
            Self::NotFound => 70,
            Self::Unknown(code) => code,
        }
    }
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Generic,
            10 => Self::MissingParameter,
            20 => Self::ClientOutdated,
            30 => Self::ServerOutdated,
            40 => Self::WrongCredentials,
            41 => Self::TokenAuthUnsupported,
            50 => Self::Unauthorized,
            60 => Self::TrialExpired,
            70 => Self::NotFound,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Generic => "generic error",
            Self::MissingParameter => "required parameter is missing",
            Self::ClientOutdated => "client protocol version too old",
            Self::ServerOutdated => "server protocol version too old",
            Self::WrongCredentials => "wrong username or password",
            Self::TokenAuthUnsupported => "token authentication not supported",
            Self::Unauthorized => "not authorized for the operation",
            Self::TrialExpired => "trial period is over",
            Self::NotFound => "requested data not found",
            Self::Unknown(_) => "unknown error code",
        };
        write!(f, "{} ({label})", self.code())
    }
}

/// Errors that can occur when interacting with a Subsonic server.
#[derive(Debug, Error)]
pub enum SubsonicError {
    /// HTTP transport error (connection refused, timeout, TLS failure, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A binary endpoint answered with a non-2xx HTTP status.
    #[error("server answered {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The response envelope reported `"status": "failed"`.
    #[error("API error {code}: {message}")]
    Api {
        /// Protocol error code, see [`ErrorCode`].
        code: ErrorCode,
        /// Message from the server, verbatim.
        message: String,
    },

    /// An argument was rejected locally; no request was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A lookup over a listing endpoint found no matching entry.
    #[error("{kind} not found: {id}")]
    ResourceNotFound { kind: &'static str, id: String },

    /// A fragment lacked a field required to build the entity.
    #[error("{entity} is missing required field `{field}`")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// A timestamp field could not be parsed.
    #[error("invalid timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        source: chrono::ParseError,
    },

    /// The body was JSON but not shaped like a Subsonic envelope.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The client an entity was built from no longer exists.
    #[error("the client backing this entity has been dropped")]
    ClientDropped,

    /// File I/O error (profile read/write, download write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors (e.g. missing config directory).
    #[error("{0}")]
    Other(String),
}

impl SubsonicError {
    /// The protocol error code, when this is an [`SubsonicError::Api`] error.
    pub fn api_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Convenience alias for `Result<T, SubsonicError>`.
pub type Result<T> = std::result::Result<T, SubsonicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_their_variants() {
        let table = [
            (0, ErrorCode::Generic),
            (10, ErrorCode::MissingParameter),
            (20, ErrorCode::ClientOutdated),
            (30, ErrorCode::ServerOutdated),
            (40, ErrorCode::WrongCredentials),
            (41, ErrorCode::TokenAuthUnsupported),
            (50, ErrorCode::Unauthorized),
            (60, ErrorCode::TrialExpired),
            (70, ErrorCode::NotFound),
        ];
        for (code, expected) in table {
            assert_eq!(ErrorCode::from(code), expected);
            assert_eq!(expected.code(), code);
        }
    }

    #[test]
    fn unlisted_codes_degrade_to_unknown() {
        for code in [80, -1, 999, 11, i64::MAX] {
            assert_eq!(ErrorCode::from(code), ErrorCode::Unknown(code));
        }
    }

    #[test]
    fn api_error_display_keeps_message() {
        let err = SubsonicError::Api {
            code: ErrorCode::WrongCredentials,
            message: "Wrong username or password.".into(),
        };
        let text = err.to_string();
        assert!(text.contains("40"));
        assert!(text.ends_with("Wrong username or password."));
        assert_eq!(err.api_code(), Some(ErrorCode::WrongCredentials));
    }
}
