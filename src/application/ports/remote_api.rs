use crate::shared::error::AppError;
use async_trait::async_trait;
use serde_json::Value;

/// The remote API collaborator, reduced to the one capability the
/// reconciler needs. Any error is a failed dispatch; any Ok is
/// confirmation.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    async fn post(&self, path: &str, body: &Value) -> Result<Value, AppError>;
}
