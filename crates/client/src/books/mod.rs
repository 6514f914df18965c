//! Google Books search client.
//!
//! The volumes endpoint takes an arbitrary offset/limit pair, so the mapping
//! is direct: `startIndex = (page - 1) * 4`, `maxResults = 4`, and
//! `total_pages` is recomputed from `totalItems`. Google still serves book
//! links and cover thumbnails over plain HTTP, so every embedded link is
//! rewritten to https before the page leaves the client.

pub mod response;

pub use response::{BookItem, to_https};

use crate::error::ProviderError;
use crate::page::{PAGE_SIZE, SearchPage, total_pages};
use reqwest::header;
use std::time::{Duration, Instant};

/// Default base URL for the Google Books v1 API.
const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "shelfmark/0.1";

/// Google Books client configuration.
#[derive(Debug, Clone)]
pub struct BooksConfig {
    /// Optional API key, appended as the `key` query parameter when present.
    pub api_key: Option<String>,
    /// Base URL (default: https://www.googleapis.com/books/v1).
    pub base_url: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string.
    pub user_agent: String,
}

impl Default for BooksConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Google Books search client.
#[derive(Debug, Clone)]
pub struct BooksClient {
    http: reqwest::Client,
    config: BooksConfig,
}

impl BooksClient {
    /// Create a new Google Books client with the given configuration.
    pub fn new(config: BooksConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .build()?;

        Ok(Self { http, config })
    }

    /// Search book volumes, returning the caller-facing 4-item page.
    pub async fn search(&self, query: &str, page: u32) -> Result<SearchPage<BookItem>, ProviderError> {
        let start = Instant::now();
        let url = format!("{}/volumes", self.config.base_url);

        tracing::debug!(page, "searching Google Books");

        let mut request = self.http.get(&url).header(header::ACCEPT, "application/json").query(&[
            ("q", query),
            ("startIndex", &offset(page).to_string()),
            ("maxResults", &PAGE_SIZE.to_string()),
        ]);
        if let Some(key) = &self.config.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body: response::BooksSearchResponse = response.json().await?;

        let results: Vec<BookItem> = body.items.into_iter().map(BookItem::into_secure).collect();

        tracing::debug!(
            items = results.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Google Books search completed"
        );

        Ok(SearchPage { results, total_pages: total_pages(body.total_items) })
    }
}

/// Zero-based item offset for a caller-facing page.
fn offset(page: u32) -> u32 {
    (page.max(1) - 1) * PAGE_SIZE
}
