use crate::domain::value_objects::{AdmissionNumber, ClassId, EnrollmentStatus, StudentId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub id: StudentId,
    pub admission_number: AdmissionNumber,
    pub first_name: String,
    pub last_name: String,
    pub class_id: Option<ClassId>,
    pub enrollment_status: EnrollmentStatus,
    pub updated_at_ms: i64,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
