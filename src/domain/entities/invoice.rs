use crate::domain::value_objects::StudentId;
use serde::{Deserialize, Serialize};

/// Fee invoice cached from the server. Status vocabulary is server-defined
/// and treated opaquely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    pub student_id: StudentId,
    pub amount: Option<f64>,
    pub status: String,
    pub updated_at_ms: i64,
}
