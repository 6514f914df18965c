//! RAWG game search client.
//!
//! RAWG takes `page` and `page_size` directly, so the gateway pins
//! `page_size` to 4 and passes the caller's page through. Each result's
//! nested platform objects are flattened into a plain list of platform
//! names. The API key is injected as the `key` query parameter.

pub mod response;

pub use response::GameItem;

use crate::error::ProviderError;
use crate::page::{PAGE_SIZE, SearchPage, total_pages};
use reqwest::header;
use std::time::{Duration, Instant};

/// Default base URL for the RAWG API.
const DEFAULT_BASE_URL: &str = "https://api.rawg.io/api";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "shelfmark/0.1";

/// RAWG client configuration.
#[derive(Debug, Clone)]
pub struct GamesConfig {
    /// API key injected as the `key` query parameter.
    pub api_key: String,
    /// Base URL (default: https://api.rawg.io/api).
    pub base_url: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string.
    pub user_agent: String,
}

impl Default for GamesConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// RAWG search client.
#[derive(Debug, Clone)]
pub struct GamesClient {
    http: reqwest::Client,
    config: GamesConfig,
}

impl GamesClient {
    /// Create a new RAWG client with the given configuration.
    pub fn new(config: GamesConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_empty() {
            return Err(ProviderError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .build()?;

        Ok(Self { http, config })
    }

    /// Search games, returning the caller-facing 4-item page.
    pub async fn search(&self, query: &str, page: u32) -> Result<SearchPage<GameItem>, ProviderError> {
        let start = Instant::now();
        let url = format!("{}/games", self.config.base_url);

        tracing::debug!(page, "searching RAWG");

        let response = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("search", query),
                ("page", &page.max(1).to_string()),
                ("page_size", &PAGE_SIZE.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body: response::RawgSearchResponse = response.json().await?;

        let results: Vec<GameItem> = body.results.into_iter().map(GameItem::from).collect();

        tracing::debug!(
            items = results.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "RAWG search completed"
        );

        Ok(SearchPage { results, total_pages: total_pages(body.count) })
    }
}
