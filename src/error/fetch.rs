use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid data source URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to join '{path}' onto the data source URL: {source}")]
    JoinUrl {
        path: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to build HTTP client: {source}")]
    BuildClient {
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {url} returned HTTP {status}.")]
    Status { url: String, status: u16 },
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Data source unavailable: {message}")]
    Unavailable { message: String },
}

impl From<String> for FetchError {
    fn from(message: String) -> Self {
        FetchError::Unavailable { message }
    }
}

impl From<&'static str> for FetchError {
    fn from(message: &'static str) -> Self {
        FetchError::Unavailable {
            message: message.to_owned(),
        }
    }
}
