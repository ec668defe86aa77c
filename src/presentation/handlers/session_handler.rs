use crate::application::services::SessionService;
use crate::domain::entities::Session;
use crate::presentation::dto::session_dto::{LoginRequest, SessionResponse};
use crate::presentation::dto::Validate;
use crate::shared::AppError;
use std::sync::Arc;

pub struct SessionHandler {
    service: Arc<SessionService>,
}

impl SessionHandler {
    pub fn new(service: Arc<SessionService>) -> Self {
        Self { service }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<SessionResponse, AppError> {
        request.validate().map_err(AppError::ValidationError)?;
        let session = self
            .service
            .login(request.user, &request.token, &request.role)
            .await?;
        Ok(map_session(session))
    }

    pub async fn current_session(&self) -> Result<Option<SessionResponse>, AppError> {
        Ok(self.service.current_session().await?.map(map_session))
    }

    pub async fn is_authenticated(&self) -> Result<bool, AppError> {
        self.service.is_authenticated().await
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        self.service.logout().await
    }
}

fn map_session(session: Session) -> SessionResponse {
    SessionResponse {
        user: session.user,
        token: session.token,
        role: session.role,
    }
}
