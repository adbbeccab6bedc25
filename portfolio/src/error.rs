use thiserror::Error;

use crate::render::NoticeKind;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {endpoint} failed: {source}")]
    Transient {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} answered with status {status}")]
    Status { endpoint: &'static str, status: u16 },
    #[error("malformed response from {endpoint}: {source}")]
    Malformed {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn kind(&self) -> NoticeKind {
        match self {
            FetchError::Transient { .. } | FetchError::Status { .. } => NoticeKind::TransientFetch,
            FetchError::Malformed { .. } => NoticeKind::MalformedResponse,
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            FetchError::Transient { endpoint, .. }
            | FetchError::Status { endpoint, .. }
            | FetchError::Malformed { endpoint, .. } => endpoint,
        }
    }

    /// Text shown in the notice region.
    pub fn notice_message(&self) -> String {
        match self.kind() {
            NoticeKind::TransientFetch => format!("Could not reach the server ({self}). Showing the last loaded data."),
            NoticeKind::MalformedResponse => format!("The server sent an unreadable reply ({self}). Showing the last loaded data."),
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error while reading config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid base url `{0}`")]
    BaseUrl(String),
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}
