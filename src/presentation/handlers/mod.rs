pub mod attendance_handler;
pub mod directory_handler;
pub mod preferences_handler;
pub mod session_handler;
pub mod sync_handler;

pub use attendance_handler::AttendanceHandler;
pub use directory_handler::DirectoryHandler;
pub use preferences_handler::PreferencesHandler;
pub use session_handler::SessionHandler;
pub use sync_handler::SyncHandler;
