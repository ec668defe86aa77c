use serde::{Deserialize, Serialize};
use std::fmt;

/// School-assigned admission number, unique per student.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdmissionNumber(String);

impl AdmissionNumber {
    pub fn new(value: String) -> Result<Self, String> {
        Self::validate(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            return Err("Admission number cannot be empty".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for AdmissionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<AdmissionNumber> for String {
    fn from(value: AdmissionNumber) -> Self {
        value.0
    }
}
