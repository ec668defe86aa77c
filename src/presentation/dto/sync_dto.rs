use serde::{Deserialize, Serialize};

/// Result of one drain pass. `queued_at_start` is the queue length when
/// the drain began, not the number of entries that synced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrainQueueResponse {
    pub queued_at_start: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingSyncCountResponse {
    pub pending: u32,
}
