pub mod attendance_service;
pub mod directory_service;
pub mod preferences_service;
pub mod session_service;
pub mod sync_service;

pub use attendance_service::{AttendanceService, AttendanceServiceTrait};
pub use directory_service::DirectoryService;
pub use preferences_service::PreferencesService;
pub use session_service::SessionService;
pub use sync_service::{SyncService, SyncServiceTrait};
