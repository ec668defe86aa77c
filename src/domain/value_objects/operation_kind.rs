use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag naming the remote operation a queue entry replays. Held as a
/// validated string rather than a closed enum so entries whose kind has no
/// dispatcher survive load and stay queued untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationKind(String);

impl OperationKind {
    pub const ATTENDANCE: &'static str = "attendance";

    pub fn new(value: String) -> Result<Self, String> {
        Self::validate(&value)?;
        Ok(Self(value))
    }

    pub fn attendance() -> Self {
        Self(Self::ATTENDANCE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_attendance(&self) -> bool {
        self.0 == Self::ATTENDANCE
    }

    fn validate(value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            return Err("Operation kind cannot be empty".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<OperationKind> for String {
    fn from(kind: OperationKind) -> Self {
        kind.0
    }
}
