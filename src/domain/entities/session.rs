use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Authenticated session as the UI shell sees it. The user profile is a
/// server-issued JSON document and stays opaque to the client core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub user: Value,
    pub token: String,
    pub role: Option<String>,
}

impl Session {
    pub fn new(user: Value, token: String, role: Option<String>) -> Self {
        Self { user, token, role }
    }
}
