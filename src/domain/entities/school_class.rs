use crate::domain::value_objects::ClassId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchoolClass {
    pub id: ClassId,
    pub name: String,
    pub grade_level: Option<String>,
    pub updated_at_ms: i64,
}
