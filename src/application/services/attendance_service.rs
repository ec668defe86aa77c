use crate::application::ports::OfflinePersistence;
use crate::domain::entities::{AttendanceDraft, AttendanceRecord, QueueEntryDraft};
use crate::domain::value_objects::{ClassId, OperationKind, StudentId, SyncPayload};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

#[async_trait]
pub trait AttendanceServiceTrait: Send + Sync {
    async fn record_attendance_offline(
        &self,
        draft: AttendanceDraft,
    ) -> Result<AttendanceRecord, AppError>;
    async fn student_attendance_on(
        &self,
        student_id: &StudentId,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, AppError>;
    async fn class_attendance_on(
        &self,
        class_id: &ClassId,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, AppError>;
    async fn unsynced_attendance(&self) -> Result<Vec<AttendanceRecord>, AppError>;
}

pub struct AttendanceService {
    store: Arc<dyn OfflinePersistence>,
}

impl AttendanceService {
    pub fn new(store: Arc<dyn OfflinePersistence>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AttendanceServiceTrait for AttendanceService {
    /// Persist an attendance mark locally and queue its replay. Two local
    /// writes, no cross-table atomicity: if the enqueue fails after the
    /// record insert, the record stays behind with no queue entry and the
    /// reconciler will never pick it up.
    async fn record_attendance_offline(
        &self,
        draft: AttendanceDraft,
    ) -> Result<AttendanceRecord, AppError> {
        let now = Utc::now().timestamp_millis();
        let local_id = Uuid::new_v4().to_string();

        let record = AttendanceRecord::new_unsynced(&draft, local_id, now);
        let record_id = self.store.insert_attendance(&record).await?;

        let payload =
            SyncPayload::new(serde_json::to_value(&draft)?).map_err(AppError::ValidationError)?;
        let entry = QueueEntryDraft::new(OperationKind::attendance(), payload, now);
        let queue_id = self.store.enqueue(&entry).await?;

        tracing::debug!(
            student_id = %draft.student_id,
            date = %draft.date,
            queue_id = %queue_id,
            "attendance recorded offline"
        );

        Ok(record.with_record_id(record_id))
    }

    async fn student_attendance_on(
        &self,
        student_id: &StudentId,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        self.store.attendance_for(student_id, date).await
    }

    async fn class_attendance_on(
        &self,
        class_id: &ClassId,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        self.store.attendance_for_class_on(class_id, date).await
    }

    async fn unsynced_attendance(&self) -> Result<Vec<AttendanceRecord>, AppError> {
        self.store.unsynced_attendance().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{QueueEntry, QueueEntryDraft};
    use crate::domain::value_objects::{AttendanceStatus, SyncQueueId};
    use crate::infrastructure::store::SqliteLocalStore;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_store() -> Arc<SqliteLocalStore> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        Arc::new(SqliteLocalStore::new(pool))
    }

    fn sample_draft() -> AttendanceDraft {
        AttendanceDraft {
            student_id: StudentId::new("S1".into()).unwrap(),
            class_id: Some(ClassId::new("C1".into()).unwrap()),
            date: "2024-01-10".parse().unwrap(),
            status: AttendanceStatus::Present,
            notes: None,
        }
    }

    #[tokio::test]
    async fn record_offline_creates_one_record_and_one_queue_entry() {
        let store = setup_store().await;
        let service = AttendanceService::new(store.clone());

        let record = service
            .record_attendance_offline(sample_draft())
            .await
            .unwrap();

        assert!(!record.synced);
        assert!(record.record_id.is_some());
        assert!(!record.local_id.is_empty());

        let stored = store
            .attendance_for(&record.student_id, record.date)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert!(!stored[0].synced);

        let entries = store.queued_entries().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].kind.is_attendance());
        assert_eq!(
            entries[0].payload.as_json().get("student_id").unwrap(),
            "S1"
        );
        assert_eq!(
            entries[0].payload.as_json().get("date").unwrap(),
            "2024-01-10"
        );
    }

    #[tokio::test]
    async fn queue_payload_matches_the_draft_input_shape() {
        let store = setup_store().await;
        let service = AttendanceService::new(store.clone());

        let draft = sample_draft();
        service
            .record_attendance_offline(draft.clone())
            .await
            .unwrap();

        let entries = store.queued_entries().await.unwrap();
        let replayed: AttendanceDraft =
            serde_json::from_value(entries[0].payload.as_json().clone()).unwrap();
        assert_eq!(replayed, draft);
    }

    /// Store whose enqueue always fails, delegating everything else.
    /// Reproduces a device that rejects the second write of the pair.
    struct EnqueueFailure(Arc<SqliteLocalStore>);

    #[async_trait]
    impl OfflinePersistence for EnqueueFailure {
        async fn insert_attendance(&self, record: &AttendanceRecord) -> Result<i64, AppError> {
            self.0.insert_attendance(record).await
        }
        async fn attendance_for(
            &self,
            student_id: &StudentId,
            date: NaiveDate,
        ) -> Result<Vec<AttendanceRecord>, AppError> {
            self.0.attendance_for(student_id, date).await
        }
        async fn attendance_for_class_on(
            &self,
            class_id: &ClassId,
            date: NaiveDate,
        ) -> Result<Vec<AttendanceRecord>, AppError> {
            self.0.attendance_for_class_on(class_id, date).await
        }
        async fn unsynced_attendance(&self) -> Result<Vec<AttendanceRecord>, AppError> {
            self.0.unsynced_attendance().await
        }
        async fn mark_attendance_synced(&self, record_id: i64) -> Result<(), AppError> {
            self.0.mark_attendance_synced(record_id).await
        }
        async fn enqueue(&self, _draft: &QueueEntryDraft) -> Result<SyncQueueId, AppError> {
            Err(AppError::Database("disk full".into()))
        }
        async fn queued_entries(&self) -> Result<Vec<QueueEntry>, AppError> {
            self.0.queued_entries().await
        }
        async fn remove_queue_entry(&self, id: SyncQueueId) -> Result<(), AppError> {
            self.0.remove_queue_entry(id).await
        }
        async fn queue_len(&self) -> Result<u32, AppError> {
            self.0.queue_len().await
        }
    }

    /// Documents the orphan-write gap: when the enqueue step fails the
    /// attendance row already exists, no queue entry references it, and no
    /// later drain will ever sync it.
    #[tokio::test]
    async fn enqueue_failure_leaves_an_orphan_record() {
        let store = setup_store().await;
        let service = AttendanceService::new(Arc::new(EnqueueFailure(store.clone())));

        let err = service
            .record_attendance_offline(sample_draft())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));

        let student = StudentId::new("S1".into()).unwrap();
        let records = store
            .attendance_for(&student, "2024-01-10".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].synced);
        assert_eq!(store.queue_len().await.unwrap(), 0);
    }
}
