use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::SourceError;
use crate::plugins::metrics::MetricsPlugin;
use crate::plugins::stories::models::Media;
use crate::plugins::stories::sources::MediaSource;

const ORIGIN: &str = "media";

/// A feed entry that could not be read as [`Media`].
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedEntry {
    pub position: usize,
    pub reason: String,
}

/// Decodes feed entries one by one; a malformed entry is rejected on its own.
pub fn decode_entries(entries: Vec<Value>) -> (Vec<Media>, Vec<RejectedEntry>) {
    let mut media = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();
    for (position, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<Media>(entry) {
            Ok(m) => media.push(m),
            Err(e) => rejected.push(RejectedEntry { position, reason: e.to_string() }),
        }
    }
    (media, rejected)
}

/// Reads the flat media list from the remote media service.
#[derive(Clone)]
pub struct HttpMediaClient {
    client: Client,
    endpoint: String,
    metrics: Option<MetricsPlugin>,
}

impl HttpMediaClient {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.media_connect_timeout)
            .read_timeout(config.media_read_timeout)
            .build()?;
        Ok(Self { client, endpoint: config.media_endpoint.clone(), metrics: None })
    }

    pub fn with_metrics(mut self, metrics: MetricsPlugin) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MediaSource for HttpMediaClient {
    async fn fetch_media(&self) -> Result<Vec<Media>, SourceError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| SourceError::unavailable(ORIGIN, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::unavailable(ORIGIN, format!("{} returned {}", self.endpoint, status)));
        }

        // only the outer shape is fatal
        let entries = response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| SourceError::unavailable(ORIGIN, format!("undecodable media payload: {}", e)))?;

        let (media, rejected) = decode_entries(entries);
        for r in &rejected {
            tracing::warn!(position = r.position, "dropping malformed media entry: {}", r.reason);
            if let Some(m) = &self.metrics {
                m.record_format_error("media_entry");
            }
        }
        Ok(media)
    }
}
