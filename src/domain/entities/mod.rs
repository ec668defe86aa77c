pub mod announcement;
pub mod attendance;
pub mod invoice;
pub mod school_class;
pub mod session;
pub mod student;
pub mod sync_queue_item;

pub use announcement::Announcement;
pub use attendance::{AttendanceDraft, AttendanceRecord};
pub use invoice::Invoice;
pub use school_class::SchoolClass;
pub use session::Session;
pub use student::Student;
pub use sync_queue_item::{QueueEntry, QueueEntryDraft};
