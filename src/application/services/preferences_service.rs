use crate::application::ports::PreferencePersistence;
use crate::domain::value_objects::{LanguageTag, Theme};
use crate::shared::error::AppError;
use std::sync::Arc;

pub const THEME_KEY: &str = "theme";
pub const LANGUAGE_KEY: &str = "language";

/// Theme and language preferences under fixed storage keys. Unreadable
/// stored values degrade to the defaults (light, "en") rather than failing
/// the UI.
pub struct PreferencesService {
    store: Arc<dyn PreferencePersistence>,
}

impl PreferencesService {
    pub fn new(store: Arc<dyn PreferencePersistence>) -> Self {
        Self { store }
    }

    pub async fn theme(&self) -> Result<Theme, AppError> {
        let stored = self.store.value(THEME_KEY).await?;
        Ok(stored
            .as_deref()
            .and_then(|raw| Theme::parse(raw).ok())
            .unwrap_or_default())
    }

    /// Flips light/dark, persists the choice and returns the new theme so
    /// the shell can apply its presentation class.
    pub async fn toggle_theme(&self) -> Result<Theme, AppError> {
        let next = self.theme().await?.toggled();
        self.store.put_value(THEME_KEY, next.as_str()).await?;
        Ok(next)
    }

    pub async fn language(&self) -> Result<LanguageTag, AppError> {
        let stored = self.store.value(LANGUAGE_KEY).await?;
        Ok(stored
            .and_then(|raw| LanguageTag::new(raw).ok())
            .unwrap_or_default())
    }

    pub async fn set_language(&self, language: &LanguageTag) -> Result<(), AppError> {
        self.store.put_value(LANGUAGE_KEY, language.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::SqliteLocalStore;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_service() -> PreferencesService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        PreferencesService::new(Arc::new(SqliteLocalStore::new(pool)))
    }

    #[tokio::test]
    async fn defaults_are_light_and_english() {
        let service = setup_service().await;
        assert_eq!(service.theme().await.unwrap(), Theme::Light);
        assert_eq!(service.language().await.unwrap().as_str(), "en");
    }

    #[tokio::test]
    async fn toggle_flips_and_persists_the_theme() {
        let service = setup_service().await;

        let dark = service.toggle_theme().await.unwrap();
        assert_eq!(dark, Theme::Dark);
        assert_eq!(dark.css_class(), Some("dark"));
        assert_eq!(service.theme().await.unwrap(), Theme::Dark);

        let light = service.toggle_theme().await.unwrap();
        assert_eq!(light, Theme::Light);
        assert_eq!(light.css_class(), None);
    }

    #[tokio::test]
    async fn language_round_trips() {
        let service = setup_service().await;
        let sw = LanguageTag::new("sw".into()).unwrap();
        service.set_language(&sw).await.unwrap();
        assert_eq!(service.language().await.unwrap(), sw);
    }

    #[tokio::test]
    async fn unknown_stored_theme_degrades_to_light() {
        let service = setup_service().await;
        service.store.put_value(THEME_KEY, "sepia").await.unwrap();
        assert_eq!(service.theme().await.unwrap(), Theme::Light);
    }
}
