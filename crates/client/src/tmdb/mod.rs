//! TMDB search client for movies and TV shows.
//!
//! TMDB paginates in fixed blocks of 20 while the gateway exposes blocks of
//! 4, so five caller-facing pages map onto each upstream page:
//!
//! - `upstream_page = ceil(page / 5)`
//! - the 20 returned items are sliced at `((page - 1) mod 5) * 4`
//! - `total_pages` is recomputed from TMDB's `total_results` against the
//!   caller-facing page size
//!
//! The API key is injected as the `api_key` query parameter.

pub mod response;

pub use response::ScreenItem;

use crate::error::ProviderError;
use crate::page::{PAGE_SIZE, SearchPage, total_pages};
use reqwest::header;
use std::time::{Duration, Instant};

/// Default base URL for the TMDB v3 API.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "shelfmark/0.1";

/// How many caller-facing pages fit in one upstream page (20 / 4).
const PAGES_PER_UPSTREAM: u32 = 5;

/// Which TMDB search endpoint to hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Movie,
    Tv,
}

impl ScreenKind {
    /// Path segment under `/search/`.
    pub fn path_segment(self) -> &'static str {
        match self {
            ScreenKind::Movie => "movie",
            ScreenKind::Tv => "tv",
        }
    }

    /// Stable name used in cache keys.
    pub fn as_str(self) -> &'static str {
        self.path_segment()
    }
}

/// TMDB client configuration.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// API key injected as the `api_key` query parameter.
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    pub base_url: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string.
    pub user_agent: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// TMDB search client.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    config: TmdbConfig,
}

impl TmdbClient {
    /// Create a new TMDB client with the given configuration.
    pub fn new(config: TmdbConfig) -> Result<Self, ProviderError> {
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

    /// Search movies or TV shows, returning the caller-facing 4-item page.
    pub async fn search(&self, query: &str, page: u32, kind: ScreenKind) -> Result<SearchPage<ScreenItem>, ProviderError> {
        let start = Instant::now();
        let page = page.max(1);
        let url = format!("{}/search/{}", self.config.base_url, kind.path_segment());

        tracing::debug!(kind = kind.as_str(), page, "searching TMDB");

        let response = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("query", query),
                ("page", &upstream_page(page).to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body: response::TmdbSearchResponse = response.json().await?;

        let slice = slice_range(page, body.results.len());
        let results: Vec<ScreenItem> = body.results.into_iter().skip(slice.start).take(slice.len()).collect();

        tracing::debug!(
            kind = kind.as_str(),
            items = results.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "TMDB search completed"
        );

        Ok(SearchPage { results, total_pages: total_pages(body.total_results) })
    }
}

/// The upstream TMDB page that contains a given caller-facing page.
fn upstream_page(page: u32) -> u32 {
    page.max(1).div_ceil(PAGES_PER_UPSTREAM)
}

/// Where a caller-facing page sits inside the fetched upstream page.
///
/// Clamped against `available` so a short final upstream page yields a short
/// (possibly empty) slice instead of panicking.
fn slice_range(page: u32, available: usize) -> std::ops::Range<usize> {
    let start = (((page.max(1) - 1) % PAGES_PER_UPSTREAM) * PAGE_SIZE) as usize;
    let start = start.min(available);
    let end = (start + PAGE_SIZE as usize).min(available);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_five_pages_share_upstream_page_one() {
        for page in 1..=5 {
            assert_eq!(upstream_page(page), 1, "page {} should map to upstream page 1", page);
        }
        assert_eq!(upstream_page(6), 2);
        assert_eq!(upstream_page(10), 2);
        assert_eq!(upstream_page(11), 3);
    }

    #[test]
    fn test_slices_partition_the_upstream_block() {
        let ranges: Vec<_> = (1..=5).map(|p| slice_range(p, 20)).collect();
        assert_eq!(ranges, vec![0..4, 4..8, 8..12, 12..16, 16..20]);
        // Page 6 starts over at the top of upstream page 2.
        assert_eq!(slice_range(6, 20), 0..4);
    }

    #[test]
    fn test_slice_clamps_to_short_final_block() {
        // Upstream returned only 18 items; page 5 gets the 2-item tail.
        assert_eq!(slice_range(5, 18), 16..18);
        // And the slice past the end is empty rather than panicking.
        assert_eq!(slice_range(5, 10), 10..10);
    }

    #[test]
    fn test_page_zero_is_treated_as_page_one() {
        assert_eq!(upstream_page(0), 1);
        assert_eq!(slice_range(0, 20), 0..4);
    }

    #[test]
    fn test_client_new_missing_key() {
        let config = TmdbConfig::default();
        assert!(matches!(TmdbClient::new(config), Err(ProviderError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_client_new_with_key() {
        let config = TmdbConfig { api_key: "test-key".into(), ..Default::default() };
        assert!(TmdbClient::new(config).is_ok());
    }
}
