use crate::application::services::AttendanceServiceTrait;
use crate::domain::entities::{AttendanceDraft, AttendanceRecord};
use crate::domain::value_objects::{AttendanceStatus, ClassId, StudentId};
use crate::presentation::dto::attendance_dto::{AttendanceResponse, RecordAttendanceRequest};
use crate::presentation::dto::Validate;
use crate::shared::AppError;
use std::sync::Arc;

pub struct AttendanceHandler {
    service: Arc<dyn AttendanceServiceTrait>,
}

impl AttendanceHandler {
    pub fn new(service: Arc<dyn AttendanceServiceTrait>) -> Self {
        Self { service }
    }

    pub async fn record_attendance(
        &self,
        request: RecordAttendanceRequest,
    ) -> Result<AttendanceResponse, AppError> {
        request.validate().map_err(AppError::ValidationError)?;

        let draft = AttendanceDraft {
            student_id: StudentId::new(request.student_id).map_err(AppError::ValidationError)?,
            class_id: request
                .class_id
                .map(ClassId::new)
                .transpose()
                .map_err(AppError::ValidationError)?,
            date: request
                .date
                .parse()
                .map_err(|e| AppError::ValidationError(format!("Invalid date: {e}")))?,
            status: AttendanceStatus::parse(&request.status).map_err(AppError::ValidationError)?,
            notes: request.notes,
        };

        let record = self.service.record_attendance_offline(draft).await?;
        Ok(map_record(&record))
    }

    pub async fn class_attendance_on(
        &self,
        class_id: &str,
        date: &str,
    ) -> Result<Vec<AttendanceResponse>, AppError> {
        let class_id =
            ClassId::new(class_id.to_string()).map_err(AppError::ValidationError)?;
        let date = date
            .parse()
            .map_err(|e| AppError::ValidationError(format!("Invalid date: {e}")))?;

        let records = self.service.class_attendance_on(&class_id, date).await?;
        Ok(records.iter().map(map_record).collect())
    }

    pub async fn student_attendance_on(
        &self,
        student_id: &str,
        date: &str,
    ) -> Result<Vec<AttendanceResponse>, AppError> {
        let student_id =
            StudentId::new(student_id.to_string()).map_err(AppError::ValidationError)?;
        let date = date
            .parse()
            .map_err(|e| AppError::ValidationError(format!("Invalid date: {e}")))?;

        let records = self.service.student_attendance_on(&student_id, date).await?;
        Ok(records.iter().map(map_record).collect())
    }

    pub async fn unsynced_attendance(&self) -> Result<Vec<AttendanceResponse>, AppError> {
        let records = self.service.unsynced_attendance().await?;
        Ok(records.iter().map(map_record).collect())
    }
}

fn map_record(record: &AttendanceRecord) -> AttendanceResponse {
    AttendanceResponse {
        id: record.record_id.unwrap_or_default(),
        local_id: record.local_id.clone(),
        student_id: record.student_id.to_string(),
        class_id: record.class_id.as_ref().map(ToString::to_string),
        date: record.date.to_string(),
        status: record.status.as_str().to_string(),
        notes: record.notes.clone(),
        synced: record.synced,
        timestamp: record.timestamp_ms,
    }
}
