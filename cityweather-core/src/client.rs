use std::{fmt::Debug, time::Duration};

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    Config,
    error::FetchError,
    model::{ErrorBody, ServerHealth, WeatherSnapshot},
};

/// The two endpoints the client talks to.
#[async_trait]
pub trait WeatherService: Send + Sync + Debug {
    /// `GET /health`.
    async fn health(&self) -> Result<ServerHealth, FetchError>;

    /// `GET /weather?city=...`. `city` is expected to be trimmed already.
    async fn weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError>;
}

/// reqwest-backed [`WeatherService`].
#[derive(Debug, Clone)]
pub struct HttpWeatherService {
    base_url: String,
    http: Client,
}

impl HttpWeatherService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Build a client for the configured base URL, honouring the optional timeout.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { base_url: config.resolved_base_url(), http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let res = self
            .http
            .get(self.endpoint(path))
            .query(query)
            .send()
            .await
            .map_err(FetchError::Connectivity)?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::Connectivity)?;

        if !status.is_success() {
            tracing::warn!(%status, body = %truncate_body(&body), "/{path} request failed");
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::into_message);
            return Err(FetchError::Service { status, message });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(error = %e, body = %truncate_body(&body), "/{path} returned an unreadable body");
            FetchError::Malformed(e)
        })
    }
}

#[async_trait]
impl WeatherService for HttpWeatherService {
    async fn health(&self) -> Result<ServerHealth, FetchError> {
        self.get_json("health", &[]).await
    }

    async fn weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        self.get_json("weather", &[("city", city)]).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
