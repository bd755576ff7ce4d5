use super::types::RawExtractionResult;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Extractor: Send + Sync {
    /// Human-readable name of the extraction backend
    fn name(&self) -> &'static str;

    /// Resolve a post URL into the service payload.
    /// `Ok(None)` means the service answered but had nothing for this URL.
    async fn extract(&self, url: &str) -> Result<Option<RawExtractionResult>>;
}
