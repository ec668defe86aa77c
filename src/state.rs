use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::application::ports::{OfflinePersistence, PreferencePersistence, RemoteApi};
use crate::application::services::{
    AttendanceService, AttendanceServiceTrait, DirectoryService, PreferencesService,
    SessionService, SyncService, SyncServiceTrait,
};
use crate::infrastructure::api::HttpApiClient;
use crate::infrastructure::database::ConnectionPool;
use crate::infrastructure::store::SqliteLocalStore;
use crate::presentation::handlers::{
    AttendanceHandler, DirectoryHandler, PreferencesHandler, SessionHandler, SyncHandler,
};
use crate::shared::{AppConfig, TranslationCatalog};

/// Composition root. The UI shell builds one of these at startup instead
/// of relying on module-level singletons, and tears it down on exit.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pool: ConnectionPool,
    pub attendance: Arc<AttendanceHandler>,
    pub sync: Arc<SyncHandler>,
    pub directory: Arc<DirectoryHandler>,
    pub session: Arc<SessionHandler>,
    pub preferences: Arc<PreferencesHandler>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        config.validate().map_err(anyhow::Error::msg)?;

        if let Some(dir) = database_parent_dir(&config.database.url) {
            std::fs::create_dir_all(&dir)?;
        }

        let pool =
            ConnectionPool::new(&config.database.url, config.database.max_connections).await?;
        pool.migrate().await?;

        let store = Arc::new(SqliteLocalStore::new(pool.get_pool().clone()));
        let api: Arc<dyn RemoteApi> = Arc::new(HttpApiClient::new(&config.api)?);
        let catalog = Arc::new(TranslationCatalog::new());

        let offline: Arc<dyn OfflinePersistence> = store.clone();
        let prefs: Arc<dyn PreferencePersistence> = store.clone();

        let attendance_service: Arc<dyn AttendanceServiceTrait> =
            Arc::new(AttendanceService::new(offline.clone()));
        let sync_service: Arc<dyn SyncServiceTrait> = Arc::new(SyncService::new(offline));
        let directory_service = Arc::new(DirectoryService::new(store));
        let session_service = Arc::new(SessionService::new(prefs.clone()));
        let preferences_service = Arc::new(PreferencesService::new(prefs));

        info!("Application state initialized");

        Ok(Self {
            config,
            pool,
            attendance: Arc::new(AttendanceHandler::new(attendance_service)),
            sync: Arc::new(SyncHandler::new(sync_service, api)),
            directory: Arc::new(DirectoryHandler::new(directory_service)),
            session: Arc::new(SessionHandler::new(session_service)),
            preferences: Arc::new(PreferencesHandler::new(preferences_service, catalog)),
        })
    }

    pub async fn teardown(&self) {
        self.pool.close().await;
        info!("Application state torn down");
    }
}

fn database_parent_dir(url: &str) -> Option<PathBuf> {
    let path = url.strip_prefix("sqlite:")?;
    let path = path.split('?').next().unwrap_or(path);
    let path = path.trim_start_matches("//");
    if path.is_empty() || path.starts_with(':') {
        return None;
    }
    PathBuf::from(path).parent().map(Path::to_path_buf)
}
