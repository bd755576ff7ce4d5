mod extractor;
mod normalize;
mod tikwm;
mod types;

pub use extractor::Extractor;
pub use normalize::normalize;
pub use tikwm::TikwmExtractor;
pub use types::{NormalizedResult, RawExtractionResult};

use anyhow::{anyhow, Result};
use tracing::{info, warn};

pub struct MediaService {
    extractor: Box<dyn Extractor>,
    developer: String,
}

impl MediaService {
    pub fn new(extractor: Box<dyn Extractor>, developer: impl Into<String>) -> Self {
        Self {
            extractor,
            developer: developer.into(),
        }
    }

    pub fn developer(&self) -> &str {
        &self.developer
    }

    pub async fn download(&self, url: &str) -> Result<NormalizedResult> {
        info!(
            "Starting extraction with {} for URL: {}",
            self.extractor.name(),
            url
        );

        let result = match self.extractor.extract(url).await {
            Ok(raw) => normalize(raw.as_ref(), &self.developer).map_err(anyhow::Error::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(normalized) => {
                info!(
                    "Extracted {} media item(s) for URL: {}",
                    normalized.data.len(),
                    url
                );
                Ok(normalized)
            }
            Err(e) => {
                warn!("{} failed for {}: {:#}", self.extractor.name(), url, e);
                Err(anyhow!("TikTok download failed: {}", e))
            }
        }
    }
}
