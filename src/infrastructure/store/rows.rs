use crate::domain::entities::{
    Announcement, AttendanceRecord, Invoice, QueueEntry, SchoolClass, Student,
};
use crate::domain::value_objects::{
    AdmissionNumber, AttendanceStatus, ClassId, EnrollmentStatus, OperationKind, StudentId,
    SyncPayload, SyncQueueId,
};
use crate::shared::error::AppError;
use chrono::NaiveDate;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct AttendanceRow {
    pub id: i64,
    pub local_id: String,
    pub student_id: String,
    pub class_id: Option<String>,
    pub date: String,
    pub status: String,
    pub notes: Option<String>,
    pub synced: bool,
    pub timestamp: i64,
}

impl AttendanceRow {
    pub fn into_record(self) -> Result<AttendanceRecord, AppError> {
        let class_id = self
            .class_id
            .map(ClassId::new)
            .transpose()
            .map_err(AppError::Database)?;
        Ok(AttendanceRecord {
            record_id: Some(self.id),
            local_id: self.local_id,
            student_id: StudentId::new(self.student_id).map_err(AppError::Database)?,
            class_id,
            date: self
                .date
                .parse::<NaiveDate>()
                .map_err(|e| AppError::Database(format!("Invalid attendance date: {e}")))?,
            status: AttendanceStatus::parse(&self.status).map_err(AppError::Database)?,
            notes: self.notes,
            synced: self.synced,
            timestamp_ms: self.timestamp,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct SyncQueueRow {
    pub id: i64,
    pub kind: String,
    pub payload: String,
    pub timestamp: i64,
}

impl SyncQueueRow {
    pub fn into_entry(self) -> Result<QueueEntry, AppError> {
        Ok(QueueEntry {
            id: SyncQueueId::new(self.id).map_err(AppError::Database)?,
            kind: OperationKind::new(self.kind).map_err(AppError::Database)?,
            payload: SyncPayload::from_json_str(&self.payload).map_err(AppError::Database)?,
            timestamp_ms: self.timestamp,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct StudentRow {
    pub id: String,
    pub admission_number: String,
    pub first_name: String,
    pub last_name: String,
    pub class_id: Option<String>,
    pub enrollment_status: String,
    pub updated_at: i64,
}

impl StudentRow {
    pub fn into_student(self) -> Result<Student, AppError> {
        let class_id = self
            .class_id
            .map(ClassId::new)
            .transpose()
            .map_err(AppError::Database)?;
        Ok(Student {
            id: StudentId::new(self.id).map_err(AppError::Database)?,
            admission_number: AdmissionNumber::new(self.admission_number)
                .map_err(AppError::Database)?,
            first_name: self.first_name,
            last_name: self.last_name,
            class_id,
            enrollment_status: EnrollmentStatus::parse(&self.enrollment_status)
                .map_err(AppError::Database)?,
            updated_at_ms: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ClassRow {
    pub id: String,
    pub name: String,
    pub grade_level: Option<String>,
    pub updated_at: i64,
}

impl ClassRow {
    pub fn into_class(self) -> Result<SchoolClass, AppError> {
        Ok(SchoolClass {
            id: ClassId::new(self.id).map_err(AppError::Database)?,
            name: self.name,
            grade_level: self.grade_level,
            updated_at_ms: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct InvoiceRow {
    pub id: String,
    pub invoice_number: String,
    pub student_id: String,
    pub amount: Option<f64>,
    pub status: String,
    pub updated_at: i64,
}

impl InvoiceRow {
    pub fn into_invoice(self) -> Result<Invoice, AppError> {
        Ok(Invoice {
            id: self.id,
            invoice_number: self.invoice_number,
            student_id: StudentId::new(self.student_id).map_err(AppError::Database)?,
            amount: self.amount,
            status: self.status,
            updated_at_ms: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct AnnouncementRow {
    pub id: String,
    pub title: String,
    pub body: Option<String>,
    pub posted_at: i64,
}

impl AnnouncementRow {
    pub fn into_announcement(self) -> Announcement {
        Announcement {
            id: self.id,
            title: self.title,
            body: self.body,
            posted_at_ms: self.posted_at,
        }
    }
}
