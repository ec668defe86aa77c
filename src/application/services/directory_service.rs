use crate::application::ports::ReferencePersistence;
use crate::domain::entities::{Announcement, Invoice, SchoolClass, Student};
use crate::domain::value_objects::{AdmissionNumber, ClassId, StudentId};
use crate::shared::error::AppError;
use std::sync::Arc;

/// Keeps server reference data (students, classes, invoices,
/// announcements) available offline. Writes are insert-or-overwrite by
/// primary key, so repeated refreshes never duplicate rows.
pub struct DirectoryService {
    store: Arc<dyn ReferencePersistence>,
}

impl DirectoryService {
    pub fn new(store: Arc<dyn ReferencePersistence>) -> Self {
        Self { store }
    }

    pub async fn cache_students(&self, students: &[Student]) -> Result<(), AppError> {
        for student in students {
            self.store.put_student(student).await?;
        }
        Ok(())
    }

    pub async fn student(&self, id: &StudentId) -> Result<Option<Student>, AppError> {
        self.store.student(id).await
    }

    pub async fn student_by_admission_number(
        &self,
        number: &AdmissionNumber,
    ) -> Result<Option<Student>, AppError> {
        self.store.student_by_admission_number(number).await
    }

    pub async fn students_in_class(&self, class_id: &ClassId) -> Result<Vec<Student>, AppError> {
        self.store.students_in_class(class_id).await
    }

    pub async fn cache_classes(&self, classes: &[SchoolClass]) -> Result<(), AppError> {
        for class in classes {
            self.store.put_class(class).await?;
        }
        Ok(())
    }

    pub async fn classes(&self) -> Result<Vec<SchoolClass>, AppError> {
        self.store.classes().await
    }

    pub async fn cache_invoices(&self, invoices: &[Invoice]) -> Result<(), AppError> {
        for invoice in invoices {
            self.store.put_invoice(invoice).await?;
        }
        Ok(())
    }

    pub async fn invoices_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<Invoice>, AppError> {
        self.store.invoices_for_student(student_id).await
    }

    pub async fn invoices_with_status(&self, status: &str) -> Result<Vec<Invoice>, AppError> {
        self.store.invoices_with_status(status).await
    }

    pub async fn cache_announcements(
        &self,
        announcements: &[Announcement],
    ) -> Result<(), AppError> {
        for announcement in announcements {
            self.store.put_announcement(announcement).await?;
        }
        Ok(())
    }

    pub async fn recent_announcements(&self, limit: u32) -> Result<Vec<Announcement>, AppError> {
        self.store.recent_announcements(limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::EnrollmentStatus;
    use crate::infrastructure::store::SqliteLocalStore;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_service() -> DirectoryService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        DirectoryService::new(Arc::new(SqliteLocalStore::new(pool)))
    }

    fn sample_student(id: &str, admission: &str, class: &str) -> Student {
        Student {
            id: StudentId::new(id.into()).unwrap(),
            admission_number: AdmissionNumber::new(admission.into()).unwrap(),
            first_name: "Amina".into(),
            last_name: "Odhiambo".into(),
            class_id: Some(ClassId::new(class.into()).unwrap()),
            enrollment_status: EnrollmentStatus::Active,
            updated_at_ms: 1_704_000_000_000,
        }
    }

    #[tokio::test]
    async fn caches_and_looks_up_students_by_declared_keys() {
        let service = setup_service().await;
        service
            .cache_students(&[
                sample_student("1", "ADM-001", "c1"),
                sample_student("2", "ADM-002", "c1"),
                sample_student("3", "ADM-003", "c2"),
            ])
            .await
            .unwrap();

        let by_admission = service
            .student_by_admission_number(&AdmissionNumber::new("ADM-002".into()).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_admission.id.as_str(), "2");

        let in_class = service
            .students_in_class(&ClassId::new("c1".into()).unwrap())
            .await
            .unwrap();
        assert_eq!(in_class.len(), 2);
    }

    #[tokio::test]
    async fn recaching_overwrites_instead_of_duplicating() {
        let service = setup_service().await;
        service
            .cache_students(&[sample_student("1", "ADM-001", "c1")])
            .await
            .unwrap();

        let mut updated = sample_student("1", "ADM-001", "c2");
        updated.first_name = "Grace".into();
        service.cache_students(&[updated]).await.unwrap();

        let student = service
            .student(&StudentId::new("1".into()).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(student.first_name, "Grace");
        assert_eq!(
            service
                .students_in_class(&ClassId::new("c1".into()).unwrap())
                .await
                .unwrap()
                .len(),
            0
        );
    }

    #[tokio::test]
    async fn recent_announcements_orders_newest_first() {
        let service = setup_service().await;
        let announcements: Vec<Announcement> = (0..3)
            .map(|i| Announcement {
                id: format!("a{i}"),
                title: format!("Term notice {i}"),
                body: None,
                posted_at_ms: 1_704_000_000_000 + i * 1000,
            })
            .collect();
        service.cache_announcements(&announcements).await.unwrap();

        let recent = service.recent_announcements(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, "a2");
        assert_eq!(recent[1].id, "a1");
    }
}
