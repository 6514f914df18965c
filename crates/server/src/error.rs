//! Unified API error type with HTTP status mapping.
//!
//! Validation failures surface as 4xx with their own message; upstream
//! failures map to the most specific applicable status with a generic
//! message, and the upstream detail goes to the log instead of the caller.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use shelfmark_client::{ImageError, ProviderError};
use std::fmt;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "message": self.message,
                "status": self.status.as_u16(),
            }
        }));

        (self.status, body).into_response()
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        tracing::warn!("upstream search failed: {err}");
        Self::internal("failed to fetch results from upstream provider")
    }
}

impl From<ImageError> for ApiError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::MissingUrl => Self::bad_request("image url parameter is required"),
            ImageError::InvalidUrl(_) | ImageError::DisallowedScheme(_) | ImageError::DisallowedHost(_) => {
                tracing::debug!("rejected image url: {err}");
                Self::bad_request("image url is not an allowed asset url")
            }
            ImageError::NotAnImage(_) => {
                tracing::debug!("rejected image fetch: {err}");
                Self::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, "upstream did not return an image")
            }
            ImageError::TooLarge { .. } => Self::new(StatusCode::PAYLOAD_TOO_LARGE, "image exceeds the size limit"),
            ImageError::Timeout => {
                tracing::warn!("upstream image fetch timed out");
                Self::new(StatusCode::GATEWAY_TIMEOUT, "upstream image request timed out")
            }
            ImageError::UpstreamStatus(status) => {
                tracing::warn!(status, "upstream image fetch failed");
                Self::new(
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    "upstream image fetch failed",
                )
            }
            ImageError::Upstream(detail) => {
                tracing::warn!("upstream image fetch failed: {detail}");
                Self::new(StatusCode::BAD_GATEWAY, "upstream image fetch failed")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_errors_collapse_to_generic_500() {
        for err in [
            ProviderError::Status(404),
            ProviderError::Timeout,
            ProviderError::Decode("unexpected field".into()),
        ] {
            let api: ApiError = err.into();
            assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
            // No upstream detail leaks into the caller-facing message.
            assert!(!api.message.contains("404"));
            assert!(!api.message.contains("unexpected field"));
        }
    }

    #[test]
    fn test_image_error_status_mapping() {
        let cases: Vec<(ImageError, StatusCode)> = vec![
            (ImageError::MissingUrl, StatusCode::BAD_REQUEST),
            (ImageError::DisallowedHost("evil.example".into()), StatusCode::BAD_REQUEST),
            (ImageError::DisallowedScheme("ftp".into()), StatusCode::BAD_REQUEST),
            (ImageError::NotAnImage("text/html".into()), StatusCode::UNSUPPORTED_MEDIA_TYPE),
            (ImageError::TooLarge { limit: 2048 }, StatusCode::PAYLOAD_TOO_LARGE),
            (ImageError::Timeout, StatusCode::GATEWAY_TIMEOUT),
            (ImageError::Upstream("connection reset".into()), StatusCode::BAD_GATEWAY),
        ];
        for (err, expected) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status, expected);
        }
    }

    #[test]
    fn test_upstream_status_is_propagated() {
        let api: ApiError = ImageError::UpstreamStatus(404).into();
        assert_eq!(api.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unmappable_upstream_status_becomes_502() {
        let api: ApiError = ImageError::UpstreamStatus(99).into();
        assert_eq!(api.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_host_detail_not_echoed_to_caller() {
        let api: ApiError = ImageError::DisallowedHost("internal-service.local".into()).into();
        assert!(!api.message.contains("internal-service.local"));
    }
}
