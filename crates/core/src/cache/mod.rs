//! In-memory TTL cache for normalized search responses.
//!
//! The store holds the exact serialized response bodies handed to clients, so
//! a cache hit is byte-identical to the fresh response that produced it. It
//! supports:
//!
//! - `get`/`set` with per-entry expiry
//! - A background sweep task that purges expired entries to bound memory
//! - Deterministic key composition over all request components
//!
//! No stampede protection: concurrent misses on the same key each fetch
//! upstream and each overwrite the same entry. The writes are idempotent
//! and the short TTL bounds the redundancy.

pub mod key;
pub mod store;

pub use key::search_key;
pub use store::{TtlCache, sweep_interval};
