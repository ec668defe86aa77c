use crate::application::ports::RemoteApi;
use crate::application::services::SyncServiceTrait;
use crate::presentation::dto::sync_dto::{DrainQueueResponse, PendingSyncCountResponse};
use crate::shared::AppError;
use std::sync::Arc;

/// Surface the UI shell calls on reconnect or on a timer; the core has no
/// scheduler of its own.
pub struct SyncHandler {
    service: Arc<dyn SyncServiceTrait>,
    api: Arc<dyn RemoteApi>,
}

impl SyncHandler {
    pub fn new(service: Arc<dyn SyncServiceTrait>, api: Arc<dyn RemoteApi>) -> Self {
        Self { service, api }
    }

    pub async fn sync_pending(&self) -> Result<DrainQueueResponse, AppError> {
        let queued_at_start = self.service.drain_queue(self.api.as_ref()).await?;
        Ok(DrainQueueResponse { queued_at_start })
    }

    pub async fn pending_sync_count(&self) -> Result<PendingSyncCountResponse, AppError> {
        let pending = self.service.pending_sync_count().await?;
        Ok(PendingSyncCountResponse { pending })
    }
}
