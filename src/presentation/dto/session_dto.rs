use crate::presentation::dto::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user: Value,
    pub token: String,
    pub role: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), String> {
        if self.token.is_empty() {
            return Err("Token is required".to_string());
        }
        if self.role.is_empty() {
            return Err("Role is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: Value,
    pub token: String,
    pub role: Option<String>,
}
