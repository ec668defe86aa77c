pub mod admission_number;
pub mod attendance_status;
pub mod class_id;
pub mod enrollment_status;
pub mod language_tag;
pub mod operation_kind;
pub mod student_id;
pub mod sync_payload;
pub mod sync_queue_id;
pub mod theme;

pub use admission_number::AdmissionNumber;
pub use attendance_status::AttendanceStatus;
pub use class_id::ClassId;
pub use enrollment_status::EnrollmentStatus;
pub use language_tag::LanguageTag;
pub use operation_kind::OperationKind;
pub use student_id::StudentId;
pub use sync_payload::SyncPayload;
pub use sync_queue_id::SyncQueueId;
pub use theme::Theme;
