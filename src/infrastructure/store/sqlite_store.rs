use crate::application::ports::{OfflinePersistence, PreferencePersistence, ReferencePersistence};
use crate::domain::entities::{
    Announcement, AttendanceRecord, Invoice, QueueEntry, QueueEntryDraft, SchoolClass, Student,
};
use crate::domain::value_objects::{AdmissionNumber, ClassId, StudentId, SyncQueueId};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Row, Sqlite};

use super::rows::{
    AnnouncementRow, AttendanceRow, ClassRow, InvoiceRow, StudentRow, SyncQueueRow,
};

/// SQLite-backed implementation of all three store ports. Every method is
/// one statement; atomicity across two calls is explicitly not provided.
pub struct SqliteLocalStore {
    pool: Pool<Sqlite>,
}

impl SqliteLocalStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OfflinePersistence for SqliteLocalStore {
    async fn insert_attendance(&self, record: &AttendanceRecord) -> Result<i64, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (
                local_id, student_id, class_id, date, status, notes, synced, timestamp
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&record.local_id)
        .bind(record.student_id.as_str())
        .bind(record.class_id.as_ref().map(|id| id.as_str()))
        .bind(record.date.to_string())
        .bind(record.status.as_str())
        .bind(&record.notes)
        .bind(record.synced)
        .bind(record.timestamp_ms)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn attendance_for(
        &self,
        student_id: &StudentId,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            "SELECT * FROM attendance WHERE student_id = ?1 AND date = ?2 ORDER BY id ASC",
        )
        .bind(student_id.as_str())
        .bind(date.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AttendanceRow::into_record).collect()
    }

    async fn attendance_for_class_on(
        &self,
        class_id: &ClassId,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            "SELECT * FROM attendance WHERE class_id = ?1 AND date = ?2 ORDER BY id ASC",
        )
        .bind(class_id.as_str())
        .bind(date.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AttendanceRow::into_record).collect()
    }

    async fn unsynced_attendance(&self) -> Result<Vec<AttendanceRecord>, AppError> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            "SELECT * FROM attendance WHERE synced = 0 ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AttendanceRow::into_record).collect()
    }

    async fn mark_attendance_synced(&self, record_id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE attendance SET synced = 1 WHERE id = ?1")
            .bind(record_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn enqueue(&self, draft: &QueueEntryDraft) -> Result<SyncQueueId, AppError> {
        let payload = serde_json::to_string(draft.payload.as_json())?;
        let result = sqlx::query(
            "INSERT INTO sync_queue (kind, payload, timestamp) VALUES (?1, ?2, ?3)",
        )
        .bind(draft.kind.as_str())
        .bind(payload)
        .bind(draft.timestamp_ms)
        .execute(&self.pool)
        .await?;

        SyncQueueId::new(result.last_insert_rowid()).map_err(AppError::Database)
    }

    async fn queued_entries(&self) -> Result<Vec<QueueEntry>, AppError> {
        let rows =
            sqlx::query_as::<_, SyncQueueRow>("SELECT * FROM sync_queue ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(SyncQueueRow::into_entry).collect()
    }

    async fn remove_queue_entry(&self, id: SyncQueueId) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sync_queue WHERE id = ?1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn queue_len(&self) -> Result<u32, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM sync_queue")
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = row.try_get("count")?;
        Ok(count as u32)
    }
}

#[async_trait]
impl ReferencePersistence for SqliteLocalStore {
    async fn put_student(&self, student: &Student) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO students (
                id, admission_number, first_name, last_name, class_id,
                enrollment_status, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(student.id.as_str())
        .bind(student.admission_number.as_str())
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(student.class_id.as_ref().map(|id| id.as_str()))
        .bind(student.enrollment_status.as_str())
        .bind(student.updated_at_ms)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn student(&self, id: &StudentId) -> Result<Option<Student>, AppError> {
        let row = sqlx::query_as::<_, StudentRow>("SELECT * FROM students WHERE id = ?1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(StudentRow::into_student).transpose()
    }

    async fn student_by_admission_number(
        &self,
        number: &AdmissionNumber,
    ) -> Result<Option<Student>, AppError> {
        let row = sqlx::query_as::<_, StudentRow>(
            "SELECT * FROM students WHERE admission_number = ?1",
        )
        .bind(number.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(StudentRow::into_student).transpose()
    }

    async fn students_in_class(&self, class_id: &ClassId) -> Result<Vec<Student>, AppError> {
        let rows = sqlx::query_as::<_, StudentRow>(
            "SELECT * FROM students WHERE class_id = ?1 ORDER BY last_name, first_name",
        )
        .bind(class_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(StudentRow::into_student).collect()
    }

    async fn put_class(&self, class: &SchoolClass) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO classes (id, name, grade_level, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(class.id.as_str())
        .bind(&class.name)
        .bind(&class.grade_level)
        .bind(class.updated_at_ms)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn classes(&self) -> Result<Vec<SchoolClass>, AppError> {
        let rows = sqlx::query_as::<_, ClassRow>("SELECT * FROM classes ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ClassRow::into_class).collect()
    }

    async fn put_invoice(&self, invoice: &Invoice) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO invoices (
                id, invoice_number, student_id, amount, status, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&invoice.id)
        .bind(&invoice.invoice_number)
        .bind(invoice.student_id.as_str())
        .bind(invoice.amount)
        .bind(&invoice.status)
        .bind(invoice.updated_at_ms)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn invoices_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<Invoice>, AppError> {
        let rows = sqlx::query_as::<_, InvoiceRow>(
            "SELECT * FROM invoices WHERE student_id = ?1 ORDER BY invoice_number",
        )
        .bind(student_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(InvoiceRow::into_invoice).collect()
    }

    async fn invoices_with_status(&self, status: &str) -> Result<Vec<Invoice>, AppError> {
        let rows = sqlx::query_as::<_, InvoiceRow>(
            "SELECT * FROM invoices WHERE status = ?1 ORDER BY invoice_number",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(InvoiceRow::into_invoice).collect()
    }

    async fn put_announcement(&self, announcement: &Announcement) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO announcements (id, title, body, posted_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&announcement.id)
        .bind(&announcement.title)
        .bind(&announcement.body)
        .bind(announcement.posted_at_ms)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn recent_announcements(&self, limit: u32) -> Result<Vec<Announcement>, AppError> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(
            "SELECT * FROM announcements ORDER BY posted_at DESC LIMIT ?1",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(AnnouncementRow::into_announcement)
            .collect())
    }
}

#[async_trait]
impl PreferencePersistence for SqliteLocalStore {
    async fn put_value(&self, key: &str, value: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO preferences (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn value(&self, key: &str) -> Result<Option<String>, AppError> {
        let row = sqlx::query("SELECT value FROM preferences WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| row.try_get::<String, _>("value"))
            .transpose()
            .map_err(AppError::from)
    }

    async fn remove_value(&self, key: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM preferences WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
