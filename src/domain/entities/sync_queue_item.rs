use crate::domain::value_objects::{OperationKind, SyncPayload, SyncQueueId};
use serde::{Deserialize, Serialize};

/// One pending remote operation. Owned exclusively by the queue; removed
/// only after confirmed remote acknowledgment. Failure is implicit: a
/// failed entry simply remains for the next drain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueueEntry {
    pub id: SyncQueueId,
    pub kind: OperationKind,
    pub payload: SyncPayload,
    pub timestamp_ms: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueueEntryDraft {
    pub kind: OperationKind,
    pub payload: SyncPayload,
    pub timestamp_ms: i64,
}

impl QueueEntryDraft {
    pub fn new(kind: OperationKind, payload: SyncPayload, timestamp_ms: i64) -> Self {
        Self {
            kind,
            payload,
            timestamp_ms,
        }
    }
}
