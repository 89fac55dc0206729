use crate::client::ClientRef;
use crate::error::{Result, SubsonicError};
use crate::types::require;
use crate::types::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message from the server's shared chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub user: User,
    pub time: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatMessageFragment {
    username: Option<String>,
    /// Milliseconds since the epoch, unlike most timestamps.
    time: Option<i64>,
    message: Option<String>,
}

impl_from_json!(ChatMessage => ChatMessageFragment);

impl ChatMessage {
    pub(crate) fn from_fragment(f: ChatMessageFragment, client: &ClientRef) -> Result<Self> {
        let millis = require(f.time, "chat message", "time")?;
        let time = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
            SubsonicError::MalformedResponse(format!("chat message time {millis} out of range"))
        })?;
        Ok(Self {
            user: User::summary(require(f.username, "chat message", "username")?, client),
            time,
            message: require(f.message, "chat message", "message")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FromJson;
    use serde_json::json;

    #[test]
    fn time_is_epoch_millis() {
        let msg = ChatMessage::from_json(
            json!({"username": "alice", "time": 1_704_164_645_000_i64, "message": "hi"}),
            &ClientRef::detached(),
        )
        .unwrap();
        assert_eq!(msg.time.to_rfc3339(), "2024-01-02T03:04:05+00:00");
        assert_eq!(msg.user.username, "alice");
    }
}
