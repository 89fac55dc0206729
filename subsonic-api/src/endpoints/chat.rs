//! Chat API.
//!
//! Endpoints: `getChatMessages`, `addChatMessage`

use crate::client::SubsonicClient;
use crate::error::Result;
use crate::params::Params;
use crate::types::ChatMessage;
use chrono::{DateTime, Utc};

impl SubsonicClient {
    /// Messages posted after `since`, or all retained messages.
    pub fn get_chat_messages(&self, since: Option<DateTime<Utc>>) -> Result<Vec<ChatMessage>> {
        let params = Params::new().opt("since", since);
        self.fetch_list("getChatMessages", &params, "chatMessages", "chatMessage")
    }

    pub fn add_chat_message(&self, message: &str) -> Result<()> {
        self.call("addChatMessage", &Params::new().set("message", message))
    }
}
