pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod shared;
pub mod state;

pub use shared::{AppConfig, AppError, Result, TranslationCatalog};
pub use state::AppState;

/// Initialize tracing for the embedding shell. Call once at startup.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "faithschool_client=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
