//! HTTP candle feed
//!
//! One GET to a fixed path, body decoded as a JSON array of candle records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

use crate::domain::CandleRecord;

/// Path of the candle endpoint, relative to the configured base URL
pub const DATA_PATH: &str = "/api/data";

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Feed returned status {0}")]
    BadStatus(StatusCode),

    #[error("Deserialization failed: {0}")]
    DeserializeFailed(String),
}

pub type Result<T> = std::result::Result<T, FeedError>;

/// Anything that can produce one batch of candle records per call
#[async_trait]
pub trait CandleSource: Send + Sync {
    async fn fetch_candles(&self) -> Result<Vec<CandleRecord>>;
}

/// Candle source backed by `GET <base_url>/api/data`
pub struct HttpCandleSource {
    url: String,
    client: Client,
}

impl HttpCandleSource {
    /// Create a source for `base_url`.
    ///
    /// No timeout is applied unless one is given.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            url: data_url(base_url),
            client: builder.build()?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CandleSource for HttpCandleSource {
    async fn fetch_candles(&self) -> Result<Vec<CandleRecord>> {
        debug!("Fetching candles from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::BadStatus(response.status()));
        }

        let body = response.text().await?;
        let candles = decode_candles(&body)?;

        debug!("Fetched {} candles", candles.len());
        Ok(candles)
    }
}

/// Decode a feed body; anything but a JSON array of objects is an error
pub fn decode_candles(body: &str) -> Result<Vec<CandleRecord>> {
    serde_json::from_str(body).map_err(|e| FeedError::DeserializeFailed(e.to_string()))
}

fn data_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), DATA_PATH)
}
