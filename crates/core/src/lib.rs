//! Core types and shared functionality for the shelfmark gateway.
//!
//! This crate provides:
//! - In-memory TTL cache for normalized search responses
//! - Cache key composition
//! - Configuration structures

pub mod cache;
pub mod config;

pub use cache::{TtlCache, search_key, sweep_interval};
pub use config::AppConfig;
