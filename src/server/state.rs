use crate::media::MediaService;
use std::sync::Arc;

use super::RequestsLoggingLevel;

pub type GuardedMediaService = Arc<MediaService>;

#[derive(Clone)]
pub struct ServerState {
    pub requests_logging_level: RequestsLoggingLevel,
    pub media: GuardedMediaService,
}

impl ServerState {
    pub fn new(requests_logging_level: RequestsLoggingLevel, media: MediaService) -> Self {
        Self {
            requests_logging_level,
            media: Arc::new(media),
        }
    }

    pub fn developer(&self) -> &str {
        self.media.developer()
    }
}
