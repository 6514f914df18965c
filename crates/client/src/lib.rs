//! Upstream clients for the shelfmark gateway.
//!
//! This crate provides the three catalog search clients (TMDB, Google Books,
//! RAWG), the uniform page contract they all normalize into, and the hardened
//! image fetch pipeline used by the reverse-proxy endpoint.

pub mod books;
pub mod error;
pub mod fetch;
pub mod games;
pub mod page;
pub mod tmdb;

pub use books::{BookItem, BooksClient, BooksConfig};
pub use error::ProviderError;
pub use fetch::{FetchedImage, ImageError, ImageFetchConfig, ImageFetcher};
pub use games::{GameItem, GamesClient, GamesConfig};
pub use page::{PAGE_SIZE, SearchPage, total_pages};
pub use tmdb::{ScreenItem, ScreenKind, TmdbClient, TmdbConfig};
