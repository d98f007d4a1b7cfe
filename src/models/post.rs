//! Post model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Store-assigned id, monotonic for the process lifetime
    pub id: u64,
    /// Display name of the author
    pub author: String,
    /// Post body, at most 500 characters after trimming
    pub content: String,
    /// Like count
    pub likes: u32,
    /// Comment count
    pub comments: u32,
    /// Creation time
    pub created_at: DateTime<Utc>,
}
