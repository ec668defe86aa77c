use crate::presentation::dto::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordAttendanceRequest {
    pub student_id: String,
    pub class_id: Option<String>,
    pub date: String,
    pub status: String,
    pub notes: Option<String>,
}

impl Validate for RecordAttendanceRequest {
    fn validate(&self) -> Result<(), String> {
        if self.student_id.is_empty() {
            return Err("Student ID is required".to_string());
        }
        if self.date.is_empty() {
            return Err("Date is required".to_string());
        }
        if self.status.is_empty() {
            return Err("Status is required".to_string());
        }
        if let Some(notes) = &self.notes {
            if notes.len() > 2_000 {
                return Err("Notes are too long (max 2000 characters)".to_string());
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceResponse {
    pub id: i64,
    pub local_id: String,
    pub student_id: String,
    pub class_id: Option<String>,
    pub date: String,
    pub status: String,
    pub notes: Option<String>,
    pub synced: bool,
    pub timestamp: i64,
}
