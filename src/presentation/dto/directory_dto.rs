use crate::presentation::dto::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    pub id: String,
    pub admission_number: String,
    pub first_name: String,
    pub last_name: String,
    pub class_id: Option<String>,
    #[serde(default = "default_enrollment_status")]
    pub enrollment_status: String,
}

fn default_enrollment_status() -> String {
    "active".to_string()
}

impl Validate for StudentDto {
    fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("Student id is required".to_string());
        }
        if self.admission_number.is_empty() {
            return Err("Admission number is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDto {
    pub id: String,
    pub name: String,
    pub grade_level: Option<String>,
}

impl Validate for ClassDto {
    fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("Class id is required".to_string());
        }
        if self.name.is_empty() {
            return Err("Class name is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDto {
    pub id: String,
    pub invoice_number: String,
    pub student_id: String,
    pub amount: Option<f64>,
    pub status: String,
}

impl Validate for InvoiceDto {
    fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("Invoice id is required".to_string());
        }
        if self.student_id.is_empty() {
            return Err("Invoice student id is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementDto {
    pub id: String,
    pub title: String,
    pub body: Option<String>,
    pub posted_at: i64,
}

impl Validate for AnnouncementDto {
    fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("Announcement id is required".to_string());
        }
        Ok(())
    }
}
