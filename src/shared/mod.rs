pub mod config;
pub mod error;
pub mod i18n;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use i18n::TranslationCatalog;
