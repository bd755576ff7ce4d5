use super::{
    extractor::Extractor,
    types::{ExtractionEnvelope, RawExtractionResult},
};
use crate::config::ExtractorConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT,
};
use tracing::{debug, info, warn};
use url::Url;

/// Client for the tikwm extraction API: one form-encoded POST per post URL.
pub struct TikwmExtractor {
    client: reqwest::Client,
    endpoint: Url,
    hd: bool,
}

impl TikwmExtractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .with_context(|| format!("Invalid extractor endpoint: {}", config.endpoint))?;

        let mut builder = reqwest::Client::builder()
            .default_headers(Self::default_headers(&endpoint, &config.user_agent)?);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        info!("Extractor initialized with endpoint {}", endpoint);

        Ok(Self {
            client,
            endpoint,
            hd: config.hd,
        })
    }

    fn default_headers(endpoint: &Url, user_agent: &str) -> Result<HeaderMap> {
        let origin = endpoint.origin().ascii_serialization();

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("id-ID,id;q=0.9,en-US;q=0.8,en;q=0.7"),
        );
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
        );
        headers.insert(
            ORIGIN,
            HeaderValue::from_str(&origin).context("Invalid origin header")?,
        );
        headers.insert(
            REFERER,
            HeaderValue::from_str(&format!("{}/", origin)).context("Invalid referer header")?,
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).context("Invalid user agent")?,
        );
        Ok(headers)
    }

    fn form_body(&self, url: &str) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("url", url)
            .append_pair("hd", if self.hd { "1" } else { "0" })
            .finish()
    }
}

#[async_trait]
impl Extractor for TikwmExtractor {
    fn name(&self) -> &'static str {
        "tikwm"
    }

    async fn extract(&self, url: &str) -> Result<Option<RawExtractionResult>> {
        debug!("Requesting extraction for: {}", url);

        let response = self
            .client
            .post(self.endpoint.clone())
            .body(self.form_body(url))
            .send()
            .await
            .context("Failed to reach extraction service")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read extraction service response")?;
        debug!("Extraction service replied {}: {}", status, body);

        let envelope: ExtractionEnvelope = serde_json::from_str(&body)
            .with_context(|| format!("Invalid extraction service response (HTTP {})", status))?;

        if envelope.data.is_none() {
            warn!(
                "Extraction service returned no data for {} (code: {:?}, msg: {:?})",
                url, envelope.code, envelope.msg
            );
        }

        Ok(envelope.data)
    }
}
