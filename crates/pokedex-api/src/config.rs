use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default root of the public catalog API
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Page size requested when a listing must return the whole catalog.
/// Comfortably above the number of records the catalog holds.
pub const DEFAULT_ALL_LIMIT: u32 = 10000;

/// Connection settings for the catalog client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root, without a trailing slash
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Page size used for "list everything" requests
    pub all_limit: u32,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            all_limit: DEFAULT_ALL_LIMIT,
            user_agent: concat!("pokedex/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Absolute URL for a path below the API root
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
