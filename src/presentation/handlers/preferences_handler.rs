use crate::application::services::PreferencesService;
use crate::domain::value_objects::{LanguageTag, Theme};
use crate::presentation::dto::preferences_dto::{
    LanguageResponse, SetLanguageRequest, ThemeResponse, TranslationResponse,
};
use crate::presentation::dto::Validate;
use crate::shared::{AppError, TranslationCatalog};
use std::sync::Arc;

pub struct PreferencesHandler {
    service: Arc<PreferencesService>,
    catalog: Arc<TranslationCatalog>,
}

impl PreferencesHandler {
    pub fn new(service: Arc<PreferencesService>, catalog: Arc<TranslationCatalog>) -> Self {
        Self { service, catalog }
    }

    pub async fn theme(&self) -> Result<ThemeResponse, AppError> {
        Ok(map_theme(self.service.theme().await?))
    }

    pub async fn toggle_theme(&self) -> Result<ThemeResponse, AppError> {
        Ok(map_theme(self.service.toggle_theme().await?))
    }

    pub async fn language(&self) -> Result<LanguageResponse, AppError> {
        Ok(LanguageResponse {
            language: self.service.language().await?.to_string(),
        })
    }

    pub async fn set_language(
        &self,
        request: SetLanguageRequest,
    ) -> Result<LanguageResponse, AppError> {
        request.validate().map_err(AppError::ValidationError)?;
        let language = LanguageTag::new(request.language).map_err(AppError::ValidationError)?;
        self.service.set_language(&language).await?;
        Ok(LanguageResponse {
            language: language.to_string(),
        })
    }

    /// Translate against the stored language; unknown keys come back as the
    /// key itself.
    pub async fn translate(&self, key: &str) -> Result<TranslationResponse, AppError> {
        let language = self.service.language().await?;
        Ok(TranslationResponse {
            key: key.to_string(),
            text: self.catalog.lookup(language.as_str(), key),
        })
    }
}

fn map_theme(theme: Theme) -> ThemeResponse {
    ThemeResponse {
        theme: theme.as_str().to_string(),
        css_class: theme.css_class().map(ToString::to_string),
    }
}
