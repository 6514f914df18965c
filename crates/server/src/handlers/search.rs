//! Search endpoints: cache lookup, client invocation, cache population.
//!
//! Each handler validates the query, composes the full cache key, and runs
//! through [`respond_cached`]: the one place that owns the hit/miss/populate
//! ordering. The fetch future is only awaited on a miss, so a hit never
//! touches the upstream client, and a failed fetch is never written to the
//! cache, so the next request simply retries upstream.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Duration;
use serde::Deserialize;
use shelfmark_client::{ScreenKind, SearchPage};
use shelfmark_core::{TtlCache, search_key};
use std::future::Future;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub page: Option<u32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// GET /api/tmdb: movie and TV search, `type` selects the variant.
pub async fn screen(State(state): State<AppState>, Query(params): Query<SearchParams>) -> ApiResult<Response> {
    let query = required_query(&params)?;
    let page = params.page.unwrap_or(1).max(1);
    let kind = screen_kind(params.kind.as_deref())?;

    let key = search_key("/api/tmdb", "tmdb", query, page, Some(kind.as_str()));
    respond_cached(&state.cache, state.search_ttl, &key, async {
        let results = state.screen.search(query, page, kind).await?;
        serialize(&results)
    })
    .await
}

/// GET /api/books: book search.
pub async fn books(State(state): State<AppState>, Query(params): Query<SearchParams>) -> ApiResult<Response> {
    let query = required_query(&params)?;
    let page = params.page.unwrap_or(1).max(1);

    let key = search_key("/api/books", "books", query, page, None);
    respond_cached(&state.cache, state.search_ttl, &key, async {
        let results = state.books.search(query, page).await?;
        serialize(&results)
    })
    .await
}

/// GET /api/rawg: game search.
pub async fn games(State(state): State<AppState>, Query(params): Query<SearchParams>) -> ApiResult<Response> {
    let query = required_query(&params)?;
    let page = params.page.unwrap_or(1).max(1);

    let key = search_key("/api/rawg", "rawg", query, page, None);
    respond_cached(&state.cache, state.search_ttl, &key, async {
        let results = state.games.search(query, page).await?;
        serialize(&results)
    })
    .await
}

/// Serve from cache, or await `fetch` and populate the cache before
/// responding. The cached body is returned verbatim, so a hit is
/// byte-identical to the fresh response that produced it.
pub(crate) async fn respond_cached<F>(cache: &TtlCache, ttl: Duration, key: &str, fetch: F) -> ApiResult<Response>
where
    F: Future<Output = ApiResult<String>>,
{
    if let Some(body) = cache.get(key) {
        tracing::debug!(key, "search cache hit");
        return Ok(json_response(body));
    }

    let body = fetch.await?;
    cache.set(key, body.clone(), ttl);
    Ok(json_response(body))
}

fn json_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

fn serialize<T: serde::Serialize>(page: &SearchPage<T>) -> ApiResult<String> {
    serde_json::to_string(page).map_err(|e| {
        tracing::error!("failed to serialize search page: {e}");
        ApiError::internal("failed to serialize results")
    })
}

fn required_query(params: &SearchParams) -> Result<&str, ApiError> {
    match params.query.as_deref().map(str::trim) {
        Some(query) if !query.is_empty() => Ok(query),
        _ => Err(ApiError::bad_request("query parameter is required")),
    }
}

fn screen_kind(raw: Option<&str>) -> Result<ScreenKind, ApiError> {
    match raw {
        None | Some("movie") => Ok(ScreenKind::Movie),
        Some("tv") => Ok(ScreenKind::Tv),
        Some(other) => Err(ApiError::bad_request(format!("unknown type: {other}"))),
    }
}
