use crate::application::ports::PreferencePersistence;
use crate::domain::entities::Session;
use crate::shared::error::AppError;
use serde_json::Value;
use std::sync::Arc;

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";
pub const USER_KEY: &str = "user";

/// Authentication state persisted under fixed storage keys. The token is
/// server-issued and opaque; no credential handling happens on this side.
pub struct SessionService {
    store: Arc<dyn PreferencePersistence>,
}

impl SessionService {
    pub fn new(store: Arc<dyn PreferencePersistence>) -> Self {
        Self { store }
    }

    pub async fn login(&self, user: Value, token: &str, role: &str) -> Result<Session, AppError> {
        if token.trim().is_empty() {
            return Err(AppError::Auth("Token cannot be empty".to_string()));
        }
        if role.trim().is_empty() {
            return Err(AppError::Auth("Role cannot be empty".to_string()));
        }

        self.store
            .put_value(USER_KEY, &serde_json::to_string(&user)?)
            .await?;
        self.store.put_value(TOKEN_KEY, token).await?;
        self.store.put_value(ROLE_KEY, role).await?;

        Ok(Session::new(user, token.to_string(), Some(role.to_string())))
    }

    /// Restore the session persisted earlier; requires both a user profile
    /// and a token, role is carried along when present.
    pub async fn current_session(&self) -> Result<Option<Session>, AppError> {
        let user = self.store.value(USER_KEY).await?;
        let token = self.store.value(TOKEN_KEY).await?;

        match (user, token) {
            (Some(user), Some(token)) => {
                let user: Value = serde_json::from_str(&user)?;
                let role = self.store.value(ROLE_KEY).await?;
                Ok(Some(Session::new(user, token, role)))
            }
            _ => Ok(None),
        }
    }

    /// A session counts as authenticated only with both token and role.
    pub async fn is_authenticated(&self) -> Result<bool, AppError> {
        let token = self.store.value(TOKEN_KEY).await?;
        let role = self.store.value(ROLE_KEY).await?;
        Ok(token.is_some() && role.is_some())
    }

    pub async fn token(&self) -> Result<Option<String>, AppError> {
        self.store.value(TOKEN_KEY).await
    }

    pub async fn role(&self) -> Result<Option<String>, AppError> {
        self.store.value(ROLE_KEY).await
    }

    /// Clears the session keys only; theme and language survive a logout.
    pub async fn logout(&self) -> Result<(), AppError> {
        self.store.remove_value(USER_KEY).await?;
        self.store.remove_value(TOKEN_KEY).await?;
        self.store.remove_value(ROLE_KEY).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::SqliteLocalStore;
    use serde_json::json;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_service() -> SessionService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        SessionService::new(Arc::new(SqliteLocalStore::new(pool)))
    }

    #[tokio::test]
    async fn login_persists_and_restores_a_session() {
        let service = setup_service().await;
        assert!(service.current_session().await.unwrap().is_none());
        assert!(!service.is_authenticated().await.unwrap());

        let user = json!({"id": 7, "name": "Mr. Otieno"});
        service.login(user.clone(), "tok-123", "teacher").await.unwrap();

        let session = service.current_session().await.unwrap().unwrap();
        assert_eq!(session.user, user);
        assert_eq!(session.token, "tok-123");
        assert_eq!(session.role.as_deref(), Some("teacher"));
        assert!(service.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn logout_clears_only_session_keys() {
        let service = setup_service().await;
        service
            .login(json!({"id": 1}), "tok", "teacher")
            .await
            .unwrap();
        service.logout().await.unwrap();

        assert!(service.current_session().await.unwrap().is_none());
        assert!(service.token().await.unwrap().is_none());
        assert!(service.role().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_token_is_rejected() {
        let service = setup_service().await;
        let err = service
            .login(json!({}), "  ", "teacher")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[tokio::test]
    async fn token_without_user_does_not_restore_a_session() {
        let service = setup_service().await;
        service
            .login(json!({"id": 1}), "tok", "teacher")
            .await
            .unwrap();
        service.store.remove_value(USER_KEY).await.unwrap();

        assert!(service.current_session().await.unwrap().is_none());
        // checkAuth-style gate only needs token and role.
        assert!(service.is_authenticated().await.unwrap());
    }
}
