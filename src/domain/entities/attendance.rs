use crate::domain::value_objects::{AttendanceStatus, ClassId, StudentId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Input shape of one attendance mark, exactly what the remote
/// attendance endpoint accepts. Serialized verbatim into the queue payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceDraft {
    pub student_id: StudentId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<ClassId>,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Locally persisted attendance mark. Created unsynced by the offline
/// write path; only the reconciler flips `synced`; never deleted here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceRecord {
    pub record_id: Option<i64>,
    pub local_id: String,
    pub student_id: StudentId,
    pub class_id: Option<ClassId>,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
    pub synced: bool,
    pub timestamp_ms: i64,
}

impl AttendanceRecord {
    pub fn new_unsynced(draft: &AttendanceDraft, local_id: String, timestamp_ms: i64) -> Self {
        Self {
            record_id: None,
            local_id,
            student_id: draft.student_id.clone(),
            class_id: draft.class_id.clone(),
            date: draft.date,
            status: draft.status,
            notes: draft.notes.clone(),
            synced: false,
            timestamp_ms,
        }
    }

    pub fn with_record_id(mut self, record_id: i64) -> Self {
        self.record_id = Some(record_id);
        self
    }

    pub fn mark_synced(&mut self) {
        self.synced = true;
    }
}
