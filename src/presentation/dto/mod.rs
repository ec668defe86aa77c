pub mod attendance_dto;
pub mod directory_dto;
pub mod preferences_dto;
pub mod session_dto;
pub mod sync_dto;

use crate::shared::AppError;
use serde::{Deserialize, Serialize};

/// Request-side shape checks, run before anything touches a service.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Envelope every handler result is wrapped in for the UI shell.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn from_app_error(error: AppError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }

    pub fn from_result(result: crate::shared::Result<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::from_app_error(err),
        }
    }
}
