use crate::domain::entities::{
    Announcement, AttendanceRecord, Invoice, QueueEntry, QueueEntryDraft, SchoolClass, Student,
};
use crate::domain::value_objects::{AdmissionNumber, ClassId, StudentId, SyncQueueId};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Persistence contract of the offline core: the attendance collection and
/// the pending-operations queue. Single-record operations are atomic in the
/// underlying store; nothing here is atomic across two calls.
#[async_trait]
pub trait OfflinePersistence: Send + Sync {
    /// Auto-id insert; returns the store-assigned record id.
    async fn insert_attendance(&self, record: &AttendanceRecord) -> Result<i64, AppError>;
    async fn attendance_for(
        &self,
        student_id: &StudentId,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, AppError>;
    async fn attendance_for_class_on(
        &self,
        class_id: &ClassId,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, AppError>;
    async fn unsynced_attendance(&self) -> Result<Vec<AttendanceRecord>, AppError>;
    async fn mark_attendance_synced(&self, record_id: i64) -> Result<(), AppError>;

    /// Appends with a store-assigned, monotonically increasing id.
    async fn enqueue(&self, draft: &QueueEntryDraft) -> Result<SyncQueueId, AppError>;
    /// Full queue snapshot in insertion order.
    async fn queued_entries(&self) -> Result<Vec<QueueEntry>, AppError>;
    async fn remove_queue_entry(&self, id: SyncQueueId) -> Result<(), AppError>;
    async fn queue_len(&self) -> Result<u32, AppError>;
}

/// Reference data cached from the server for offline viewing. `put_*` is
/// insert-or-overwrite by primary key.
#[async_trait]
pub trait ReferencePersistence: Send + Sync {
    async fn put_student(&self, student: &Student) -> Result<(), AppError>;
    async fn student(&self, id: &StudentId) -> Result<Option<Student>, AppError>;
    async fn student_by_admission_number(
        &self,
        number: &AdmissionNumber,
    ) -> Result<Option<Student>, AppError>;
    async fn students_in_class(&self, class_id: &ClassId) -> Result<Vec<Student>, AppError>;

    async fn put_class(&self, class: &SchoolClass) -> Result<(), AppError>;
    async fn classes(&self) -> Result<Vec<SchoolClass>, AppError>;

    async fn put_invoice(&self, invoice: &Invoice) -> Result<(), AppError>;
    async fn invoices_for_student(&self, student_id: &StudentId) -> Result<Vec<Invoice>, AppError>;
    async fn invoices_with_status(&self, status: &str) -> Result<Vec<Invoice>, AppError>;

    async fn put_announcement(&self, announcement: &Announcement) -> Result<(), AppError>;
    async fn recent_announcements(&self, limit: u32) -> Result<Vec<Announcement>, AppError>;
}

/// Small string key-value surface backing session and preference state.
#[async_trait]
pub trait PreferencePersistence: Send + Sync {
    async fn put_value(&self, key: &str, value: &str) -> Result<(), AppError>;
    async fn value(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn remove_value(&self, key: &str) -> Result<(), AppError>;
}
