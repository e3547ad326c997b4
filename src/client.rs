use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Config;
use crate::constants::GEO_JSON;
use crate::error::FetchError;

/// Something that can answer a GET for a URL with a JSON document.
#[async_trait]
pub trait JsonSource: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// HTTP client for the National Weather Service API
#[derive(Debug, Clone)]
pub struct NwsClient {
    client: Client,
}

impl NwsClient {
    /// Builds a client that sends the configured user agent and asks for GeoJSON
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GEO_JSON));

        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl JsonSource for NwsClient {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let network = |source: reqwest::Error| FetchError::Network {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(network)?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Fetches `url` and decodes it as `T`.
///
/// Network errors, non-success statuses and undecodable bodies are logged and
/// all come back as `None`: the data is simply unavailable.
pub async fn fetch_json<T: DeserializeOwned>(source: &dyn JsonSource, url: &str) -> Option<T> {
    tracing::debug!("Fetching {}", url);

    let result = source.get_json(url).await.and_then(|value| {
        serde_json::from_value::<T>(value).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    });

    match result {
        Ok(data) => Some(data),
        Err(err) => {
            tracing::warn!("Error making NWS request: {}", err);
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use reqwest::StatusCode;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory source: known URLs answer with their document, anything else is a 404.
    #[derive(Default)]
    pub struct StubSource {
        responses: HashMap<String, Value>,
        calls: Mutex<Vec<String>>,
    }

    impl StubSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, url: &str, body: Value) -> Self {
            self.responses.insert(url.to_string(), body);
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl JsonSource for StubSource {
        async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
            self.calls.lock().unwrap().push(url.to_string());
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::Status {
                    url: url.to_string(),
                    status: StatusCode::NOT_FOUND,
                })
        }
    }
}
