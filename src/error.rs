use reqwest::StatusCode;
use thiserror::Error;

/// Why an upstream request produced no usable data.
///
/// These never reach a tool caller; the client wrapper logs them and reports
/// the data as unavailable.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed with status: {status}")]
    Status { url: String, status: StatusCode },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
