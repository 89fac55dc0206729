//! Search API.
//!
//! Endpoint: `search3`
//!
//! Response:
//! ```json
//! {
//!   "searchResult3": {
//!     "artist": [ { "id": "1", "name": "ABBA", "albumCount": 3 } ],
//!     "album":  [ { "id": "11", "name": "Arrival", "artistId": "1", "artist": "ABBA" } ],
//!     "song":   [ { "id": "111", "title": "Dancing Queen", "albumId": "11", "album": "Arrival" } ]
//!   }
//! }
//! ```

use crate::client::SubsonicClient;
use crate::error::Result;
use crate::types::{FromJson, SearchQuery, SearchResult};
use serde_json::{Map, Value};

impl SubsonicClient {
    /// Search artists, albums and songs by ID3 tags.
    ///
    /// Some servers treat an empty query as "match everything", which is
    /// how clients page through the whole library.
    pub fn search(&self, query: &SearchQuery) -> Result<SearchResult> {
        let mut payload = self.request("search3", &query.params())?;
        let value = payload
            .remove("searchResult3")
            .unwrap_or_else(|| Value::Object(Map::new()));
        SearchResult::from_json(value, &self.handle())
    }
}
