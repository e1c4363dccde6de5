use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("'{0}' not found")]
    NotFound(String),

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Catalog is offline or unreachable")]
    Offline,

    #[error("Request timed out")]
    Timeout,

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// One or more members of a concurrent fan-out failed
    #[error("{failed} of {total} requests failed, first: {first}")]
    Aggregate {
        failed: usize,
        total: usize,
        first: Box<CatalogError>,
    },
}

impl CatalogError {
    /// Whether this is a missing-resource failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Timeout
        } else if err.is_connect() {
            CatalogError::Offline
        } else if err.is_decode() {
            CatalogError::Serialization(err.to_string())
        } else {
            CatalogError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Serialization(err.to_string())
    }
}
