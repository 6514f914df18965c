//! Image reverse-proxy endpoint.
//!
//! Relays a single validated upstream image per request. All validation and
//! capping lives in the client fetch pipeline; this handler maps its errors
//! to HTTP statuses and wires the capped byte stream straight into the
//! response body. A mid-stream failure surfaces as an error on the body
//! stream, which terminates the response abruptly rather than completing
//! with a truncated image. If the caller disconnects, axum drops the body,
//! which drops the upstream stream with it.

use axum::{
    body::Body,
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;
use shelfmark_client::ImageError;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ImageParams {
    /// The absolute upstream URL to relay.
    pub u: Option<String>,
}

/// GET /api/image?u=<url>: stream one remote image through the proxy.
pub async fn proxy(State(state): State<AppState>, Query(params): Query<ImageParams>) -> ApiResult<Response> {
    let raw = params.u.as_deref().ok_or(ImageError::MissingUrl)?;

    let image = state.images.fetch(raw).await?;

    let mut response = Response::new(Body::from_stream(image.stream));
    *response.headers_mut() = image.headers;
    Ok(response)
}
