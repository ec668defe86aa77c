use crate::application::ports::{OfflinePersistence, RemoteApi};
use crate::domain::entities::QueueEntry;
use crate::domain::value_objects::StudentId;
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;

const ATTENDANCE_ENDPOINT: &str = "/api/attendance/";

#[async_trait]
pub trait SyncServiceTrait: Send + Sync {
    /// Replays every currently queued entry against the remote API, in
    /// enqueue order, one at a time. Returns the number of entries in the
    /// queue when the drain started, not the number that succeeded.
    async fn drain_queue(&self, api: &dyn RemoteApi) -> Result<u32, AppError>;
    /// Current queue size. Pure read, no side effects.
    async fn pending_sync_count(&self) -> Result<u32, AppError>;
}

pub struct SyncService {
    store: Arc<dyn OfflinePersistence>,
}

impl SyncService {
    pub fn new(store: Arc<dyn OfflinePersistence>) -> Self {
        Self { store }
    }

    async fn replay_entry(&self, api: &dyn RemoteApi, entry: &QueueEntry) -> Result<(), AppError> {
        api.post(ATTENDANCE_ENDPOINT, entry.payload.as_json())
            .await?;

        // Remove first, then mark; a crash between the two leaves an
        // unsynced record with no queue entry, which the invariant
        // tolerates and the next full refresh repairs.
        self.store.remove_queue_entry(entry.id).await?;
        self.reconcile_attendance(entry).await
    }

    /// Flip `synced` on every attendance row matching the payload's
    /// student and date. Payloads without both fields reconcile nothing;
    /// the remote write already succeeded, so the entry stays removed.
    async fn reconcile_attendance(&self, entry: &QueueEntry) -> Result<(), AppError> {
        let payload = entry.payload.as_json();
        let student_id = payload.get("student_id").and_then(Value::as_str);
        let date = payload
            .get("date")
            .and_then(Value::as_str)
            .and_then(|raw| raw.parse::<NaiveDate>().ok());

        let (Some(student_id), Some(date)) = (student_id, date) else {
            tracing::debug!(id = %entry.id, "queue payload has no student/date to reconcile");
            return Ok(());
        };
        let student_id =
            StudentId::new(student_id.to_string()).map_err(AppError::ValidationError)?;

        for record in self.store.attendance_for(&student_id, date).await? {
            if let Some(record_id) = record.record_id {
                self.store.mark_attendance_synced(record_id).await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl SyncServiceTrait for SyncService {
    async fn drain_queue(&self, api: &dyn RemoteApi) -> Result<u32, AppError> {
        let snapshot = self.store.queued_entries().await?;
        let drained = snapshot.len() as u32;

        for entry in &snapshot {
            if !entry.kind.is_attendance() {
                tracing::debug!(
                    id = %entry.id,
                    kind = %entry.kind,
                    "no dispatcher for queued operation kind, entry retained"
                );
                continue;
            }

            // One failed entry never aborts the drain: log, keep the entry
            // for the next pass, move on.
            if let Err(e) = self.replay_entry(api, entry).await {
                tracing::warn!(id = %entry.id, error = %e, "sync failed for queued entry");
            }
        }

        Ok(drained)
    }

    async fn pending_sync_count(&self) -> Result<u32, AppError> {
        self.store.queue_len().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::attendance_service::{
        AttendanceService, AttendanceServiceTrait,
    };
    use crate::domain::entities::{AttendanceDraft, QueueEntryDraft};
    use crate::domain::value_objects::{AttendanceStatus, OperationKind, SyncPayload};
    use crate::infrastructure::store::SqliteLocalStore;
    use sqlx::sqlite::SqlitePoolOptions;
    use tokio::sync::Mutex;

    async fn setup_store() -> Arc<SqliteLocalStore> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        Arc::new(SqliteLocalStore::new(pool))
    }

    /// Remote API double: records every call, rejects payloads whose
    /// student_id is in the reject list.
    struct RecordingApi {
        calls: Mutex<Vec<(String, Value)>>,
        reject_students: Vec<String>,
    }

    impl RecordingApi {
        fn accepting() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reject_students: Vec::new(),
            }
        }

        fn rejecting(students: &[&str]) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reject_students: students.iter().map(|s| s.to_string()).collect(),
            }
        }

        async fn call_count(&self) -> usize {
            self.calls.lock().await.len()
        }
    }

    #[async_trait]
    impl RemoteApi for RecordingApi {
        async fn post(&self, path: &str, body: &Value) -> Result<Value, AppError> {
            self.calls
                .lock()
                .await
                .push((path.to_string(), body.clone()));
            let student = body.get("student_id").and_then(Value::as_str).unwrap_or("");
            if self.reject_students.iter().any(|s| s == student) {
                return Err(AppError::SyncDispatch("rejected by server".into()));
            }
            Ok(serde_json::json!({"ok": true}))
        }
    }

    fn draft(student: &str, date: &str) -> AttendanceDraft {
        AttendanceDraft {
            student_id: StudentId::new(student.into()).unwrap(),
            class_id: None,
            date: date.parse().unwrap(),
            status: AttendanceStatus::Present,
            notes: None,
        }
    }

    async fn record(store: &Arc<SqliteLocalStore>, student: &str, date: &str) {
        AttendanceService::new(store.clone())
            .record_attendance_offline(draft(student, date))
            .await
            .unwrap();
    }

    fn student(id: &str) -> StudentId {
        StudentId::new(id.into()).unwrap()
    }

    #[tokio::test]
    async fn empty_queue_drains_to_zero_without_network_calls() {
        let store = setup_store().await;
        let service = SyncService::new(store.clone());
        let api = RecordingApi::accepting();

        assert_eq!(service.drain_queue(&api).await.unwrap(), 0);
        assert_eq!(api.call_count().await, 0);
    }

    #[tokio::test]
    async fn accepted_entries_are_removed_and_records_marked_synced() {
        let store = setup_store().await;
        record(&store, "S1", "2024-01-10").await;
        record(&store, "S2", "2024-01-10").await;
        record(&store, "S3", "2024-01-11").await;

        let service = SyncService::new(store.clone());
        let api = RecordingApi::accepting();

        assert_eq!(service.drain_queue(&api).await.unwrap(), 3);
        assert_eq!(api.call_count().await, 3);
        assert_eq!(store.queue_len().await.unwrap(), 0);
        assert!(store.unsynced_attendance().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn dispatch_hits_the_attendance_endpoint_with_the_payload() {
        let store = setup_store().await;
        record(&store, "S1", "2024-01-10").await;

        let service = SyncService::new(store.clone());
        let api = RecordingApi::accepting();
        service.drain_queue(&api).await.unwrap();

        let calls = api.calls.lock().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "/api/attendance/");
        assert_eq!(calls[0].1.get("student_id").unwrap(), "S1");
        assert_eq!(calls[0].1.get("status").unwrap(), "present");
    }

    #[tokio::test]
    async fn rejected_entry_stays_queued_and_others_still_sync() {
        let store = setup_store().await;
        record(&store, "S1", "2024-01-10").await;
        record(&store, "S2", "2024-01-10").await;
        record(&store, "S3", "2024-01-10").await;

        let service = SyncService::new(store.clone());
        let api = RecordingApi::rejecting(&["S2"]);

        // Return value reports the snapshot size, not successes.
        assert_eq!(service.drain_queue(&api).await.unwrap(), 3);

        let remaining = store.queued_entries().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(
            remaining[0].payload.as_json().get("student_id").unwrap(),
            "S2"
        );

        let unsynced = store.unsynced_attendance().await.unwrap();
        assert_eq!(unsynced.len(), 1);
        assert_eq!(unsynced[0].student_id.as_str(), "S2");
    }

    #[tokio::test]
    async fn second_drain_retries_only_the_failed_entry() {
        let store = setup_store().await;
        record(&store, "S1", "2024-01-10").await;
        record(&store, "S2", "2024-01-10").await;

        let service = SyncService::new(store.clone());

        let first = RecordingApi::rejecting(&["S2"]);
        service.drain_queue(&first).await.unwrap();
        assert_eq!(first.call_count().await, 2);

        let second = RecordingApi::accepting();
        assert_eq!(service.drain_queue(&second).await.unwrap(), 1);

        let calls = second.calls.lock().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.get("student_id").unwrap(), "S2");
        drop(calls);

        assert_eq!(store.queue_len().await.unwrap(), 0);
        assert!(store.unsynced_attendance().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn pending_count_tracks_queue_rows_not_record_state() {
        let store = setup_store().await;
        let service = SyncService::new(store.clone());
        assert_eq!(service.pending_sync_count().await.unwrap(), 0);

        record(&store, "S1", "2024-01-10").await;
        record(&store, "S2", "2024-01-10").await;
        assert_eq!(service.pending_sync_count().await.unwrap(), 2);

        // Marking a record synced by hand does not touch the queue.
        let records = store
            .attendance_for(&student("S1"), "2024-01-10".parse().unwrap())
            .await
            .unwrap();
        store
            .mark_attendance_synced(records[0].record_id.unwrap())
            .await
            .unwrap();
        assert_eq!(service.pending_sync_count().await.unwrap(), 2);

        let api = RecordingApi::accepting();
        service.drain_queue(&api).await.unwrap();
        assert_eq!(service.pending_sync_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn drain_marks_every_record_matching_student_and_date() {
        let store = setup_store().await;
        // Same student and date marked twice while offline; both rows flip
        // on the first acknowledgment, the second is a no-op repost.
        record(&store, "S1", "2024-01-10").await;
        record(&store, "S1", "2024-01-10").await;

        let service = SyncService::new(store.clone());
        let api = RecordingApi::accepting();
        assert_eq!(service.drain_queue(&api).await.unwrap(), 2);

        let rows = store
            .attendance_for(&student("S1"), "2024-01-10".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.synced));
    }

    #[tokio::test]
    async fn unknown_operation_kinds_are_retained_and_never_dispatched() {
        let store = setup_store().await;
        let entry = QueueEntryDraft::new(
            OperationKind::new("grade_submission".into()).unwrap(),
            SyncPayload::from_json_str(r#"{"student_id":"S9"}"#).unwrap(),
            1_704_000_000_000,
        );
        store.enqueue(&entry).await.unwrap();
        record(&store, "S1", "2024-01-10").await;

        let service = SyncService::new(store.clone());
        let api = RecordingApi::accepting();

        assert_eq!(service.drain_queue(&api).await.unwrap(), 2);
        assert_eq!(api.call_count().await, 1);

        let remaining = store.queued_entries().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].kind.as_str(), "grade_submission");
    }

    #[tokio::test]
    async fn acknowledged_entry_without_matching_records_is_still_removed() {
        let store = setup_store().await;
        // Payload matching no local row; the remote accepts it, the entry
        // goes away, nothing is marked.
        let entry = QueueEntryDraft::new(
            OperationKind::attendance(),
            SyncPayload::from_json_str(
                r#"{"student_id":"S404","date":"2024-01-10","status":"present"}"#,
            )
            .unwrap(),
            1_704_000_000_000,
        );
        store.enqueue(&entry).await.unwrap();

        let service = SyncService::new(store.clone());
        let api = RecordingApi::accepting();
        assert_eq!(service.drain_queue(&api).await.unwrap(), 1);
        assert_eq!(store.queue_len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn spec_scenario_single_mark_round_trip() {
        let store = setup_store().await;
        record(&store, "S1", "2024-01-10").await;

        let service = SyncService::new(store.clone());
        let api = RecordingApi::accepting();
        service.drain_queue(&api).await.unwrap();

        assert_eq!(store.queue_len().await.unwrap(), 0);
        let rows = store
            .attendance_for(&student("S1"), "2024-01-10".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].synced);
    }
}
