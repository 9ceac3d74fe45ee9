use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maps a chat-platform identity onto the internal numeric user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub external_id: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}
