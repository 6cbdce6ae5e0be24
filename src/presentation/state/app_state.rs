use std::sync::Arc;

use crate::application::ports::{ProcessRunner, StagingStore};
use crate::application::services::ConversionService;
use crate::infrastructure::delivery::FileDelivery;

pub struct AppState<R: ?Sized>
where
    R: ProcessRunner,
{
    pub conversion_service: Arc<ConversionService<R>>,
    pub staging_store: Arc<dyn StagingStore>,
    pub file_delivery: Arc<FileDelivery>,
    pub max_upload_bytes: usize,
}

impl<R: ?Sized> Clone for AppState<R>
where
    R: ProcessRunner,
{
    fn clone(&self) -> Self {
        Self {
            conversion_service: Arc::clone(&self.conversion_service),
            staging_store: Arc::clone(&self.staging_store),
            file_delivery: Arc::clone(&self.file_delivery),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}
