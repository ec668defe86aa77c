use crate::application::services::DirectoryService;
use crate::domain::entities::{Announcement, Invoice, SchoolClass, Student};
use crate::domain::value_objects::{
    AdmissionNumber, ClassId, EnrollmentStatus, StudentId,
};
use crate::presentation::dto::directory_dto::{
    AnnouncementDto, ClassDto, InvoiceDto, StudentDto,
};
use crate::presentation::dto::Validate;
use crate::shared::AppError;
use chrono::Utc;
use std::sync::Arc;

pub struct DirectoryHandler {
    service: Arc<DirectoryService>,
}

impl DirectoryHandler {
    pub fn new(service: Arc<DirectoryService>) -> Self {
        Self { service }
    }

    pub async fn cache_students(&self, students: Vec<StudentDto>) -> Result<(), AppError> {
        let now = Utc::now().timestamp_millis();
        let students = students
            .into_iter()
            .map(|dto| student_from_dto(dto, now))
            .collect::<Result<Vec<_>, _>>()?;
        self.service.cache_students(&students).await
    }

    pub async fn students_in_class(&self, class_id: &str) -> Result<Vec<StudentDto>, AppError> {
        let class_id = ClassId::new(class_id.to_string()).map_err(AppError::ValidationError)?;
        let students = self.service.students_in_class(&class_id).await?;
        Ok(students.iter().map(student_to_dto).collect())
    }

    pub async fn student_by_admission_number(
        &self,
        number: &str,
    ) -> Result<Option<StudentDto>, AppError> {
        let number =
            AdmissionNumber::new(number.to_string()).map_err(AppError::ValidationError)?;
        let student = self.service.student_by_admission_number(&number).await?;
        Ok(student.as_ref().map(student_to_dto))
    }

    pub async fn cache_classes(&self, classes: Vec<ClassDto>) -> Result<(), AppError> {
        let now = Utc::now().timestamp_millis();
        let classes = classes
            .into_iter()
            .map(|dto| class_from_dto(dto, now))
            .collect::<Result<Vec<_>, _>>()?;
        self.service.cache_classes(&classes).await
    }

    pub async fn classes(&self) -> Result<Vec<ClassDto>, AppError> {
        let classes = self.service.classes().await?;
        Ok(classes
            .iter()
            .map(|class| ClassDto {
                id: class.id.to_string(),
                name: class.name.clone(),
                grade_level: class.grade_level.clone(),
            })
            .collect())
    }

    pub async fn cache_invoices(&self, invoices: Vec<InvoiceDto>) -> Result<(), AppError> {
        let now = Utc::now().timestamp_millis();
        let invoices = invoices
            .into_iter()
            .map(|dto| invoice_from_dto(dto, now))
            .collect::<Result<Vec<_>, _>>()?;
        self.service.cache_invoices(&invoices).await
    }

    pub async fn invoices_for_student(
        &self,
        student_id: &str,
    ) -> Result<Vec<InvoiceDto>, AppError> {
        let student_id =
            StudentId::new(student_id.to_string()).map_err(AppError::ValidationError)?;
        let invoices = self.service.invoices_for_student(&student_id).await?;
        Ok(invoices.iter().map(invoice_to_dto).collect())
    }

    pub async fn cache_announcements(
        &self,
        announcements: Vec<AnnouncementDto>,
    ) -> Result<(), AppError> {
        let announcements = announcements
            .into_iter()
            .map(announcement_from_dto)
            .collect::<Result<Vec<_>, _>>()?;
        self.service.cache_announcements(&announcements).await
    }

    pub async fn recent_announcements(
        &self,
        limit: u32,
    ) -> Result<Vec<AnnouncementDto>, AppError> {
        let announcements = self.service.recent_announcements(limit).await?;
        Ok(announcements
            .iter()
            .map(|a| AnnouncementDto {
                id: a.id.clone(),
                title: a.title.clone(),
                body: a.body.clone(),
                posted_at: a.posted_at_ms,
            })
            .collect())
    }
}

fn student_from_dto(dto: StudentDto, now_ms: i64) -> Result<Student, AppError> {
    dto.validate().map_err(AppError::ValidationError)?;
    Ok(Student {
        id: StudentId::new(dto.id).map_err(AppError::ValidationError)?,
        admission_number: AdmissionNumber::new(dto.admission_number)
            .map_err(AppError::ValidationError)?,
        first_name: dto.first_name,
        last_name: dto.last_name,
        class_id: dto
            .class_id
            .map(ClassId::new)
            .transpose()
            .map_err(AppError::ValidationError)?,
        enrollment_status: EnrollmentStatus::parse(&dto.enrollment_status)
            .map_err(AppError::ValidationError)?,
        updated_at_ms: now_ms,
    })
}

fn student_to_dto(student: &Student) -> StudentDto {
    StudentDto {
        id: student.id.to_string(),
        admission_number: student.admission_number.to_string(),
        first_name: student.first_name.clone(),
        last_name: student.last_name.clone(),
        class_id: student.class_id.as_ref().map(ToString::to_string),
        enrollment_status: student.enrollment_status.as_str().to_string(),
    }
}

fn class_from_dto(dto: ClassDto, now_ms: i64) -> Result<SchoolClass, AppError> {
    dto.validate().map_err(AppError::ValidationError)?;
    Ok(SchoolClass {
        id: ClassId::new(dto.id).map_err(AppError::ValidationError)?,
        name: dto.name,
        grade_level: dto.grade_level,
        updated_at_ms: now_ms,
    })
}

fn invoice_from_dto(dto: InvoiceDto, now_ms: i64) -> Result<Invoice, AppError> {
    dto.validate().map_err(AppError::ValidationError)?;
    Ok(Invoice {
        id: dto.id,
        invoice_number: dto.invoice_number,
        student_id: StudentId::new(dto.student_id).map_err(AppError::ValidationError)?,
        amount: dto.amount,
        status: dto.status,
        updated_at_ms: now_ms,
    })
}

fn invoice_to_dto(invoice: &Invoice) -> InvoiceDto {
    InvoiceDto {
        id: invoice.id.clone(),
        invoice_number: invoice.invoice_number.clone(),
        student_id: invoice.student_id.to_string(),
        amount: invoice.amount,
        status: invoice.status.clone(),
    }
}

fn announcement_from_dto(dto: AnnouncementDto) -> Result<Announcement, AppError> {
    dto.validate().map_err(AppError::ValidationError)?;
    Ok(Announcement {
        id: dto.id,
        title: dto.title,
        body: dto.body,
        posted_at_ms: dto.posted_at,
    })
}
