use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    #[default]
    Active,
    Graduated,
    Transferred,
    Withdrawn,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "active",
            EnrollmentStatus::Graduated => "graduated",
            EnrollmentStatus::Transferred => "transferred",
            EnrollmentStatus::Withdrawn => "withdrawn",
        }
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "active" => Ok(EnrollmentStatus::Active),
            "graduated" => Ok(EnrollmentStatus::Graduated),
            "transferred" => Ok(EnrollmentStatus::Transferred),
            "withdrawn" => Ok(EnrollmentStatus::Withdrawn),
            other => Err(format!("Unknown enrollment status: {other}")),
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
