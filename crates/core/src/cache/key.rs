//! Cache key composition for search responses.

use sha2::{Digest, Sha256};

/// Compose the cache key for a search response.
///
/// The key is a SHA-256 hex digest over every component that selects a
/// distinct response body: endpoint path, category, query text, 1-based page,
/// and the subtype for endpoints that have one. All components are hashed
/// unconditionally; a missing subtype hashes as the empty string.
pub fn search_key(endpoint: &str, category: &str, query: &str, page: u32, subtype: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    for part in [endpoint, category, query, subtype.unwrap_or("")] {
        hasher.update(part.as_bytes());
        // Separator byte so ("ab", "c") and ("a", "bc") never collide.
        hasher.update([0u8]);
    }
    hasher.update(page.to_le_bytes());
    hex::encode(hasher.finalize())
}
