//! Shared application state.
//!
//! Everything here is constructed exactly once at startup and cloned into
//! handlers: the cache store is an explicit injected instance rather than a
//! process-wide global, and the category-to-client mapping is fixed struct
//! fields, so wiring a new category in is a compile-time change.

use anyhow::Result;
use shelfmark_client::{
    BooksClient, BooksConfig, GamesClient, GamesConfig, ImageFetchConfig, ImageFetcher, TmdbClient, TmdbConfig,
};
use shelfmark_core::{AppConfig, TtlCache};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AppState {
    pub cache: Arc<TtlCache>,
    pub search_ttl: chrono::Duration,
    pub screen: TmdbClient,
    pub books: BooksClient,
    pub games: GamesClient,
    pub images: ImageFetcher,
}

impl AppState {
    /// Build the cache store and all upstream clients from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let screen = TmdbClient::new(TmdbConfig {
            api_key: config.require_tmdb_api_key()?.to_string(),
            timeout: config.provider_timeout(),
            user_agent: config.user_agent.clone(),
            ..Default::default()
        })?;

        let books = BooksClient::new(BooksConfig {
            api_key: config.books_api_key.clone(),
            timeout: config.provider_timeout(),
            user_agent: config.user_agent.clone(),
            ..Default::default()
        })?;

        let games = GamesClient::new(GamesConfig {
            api_key: config.require_rawg_api_key()?.to_string(),
            timeout: config.provider_timeout(),
            user_agent: config.user_agent.clone(),
            ..Default::default()
        })?;

        let images = ImageFetcher::new(ImageFetchConfig {
            max_bytes: config.image_max_bytes,
            timeout: config.image_timeout(),
            max_redirects: config.image_max_redirects,
            user_agent: config.user_agent.clone(),
            ..Default::default()
        })?;

        Ok(Self {
            cache: Arc::new(TtlCache::new()),
            search_ttl: config.search_ttl(),
            screen,
            books,
            games,
            images,
        })
    }
}
