use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub body: Option<String>,
    pub posted_at_ms: i64,
}
