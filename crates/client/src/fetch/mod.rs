//! Hardened fetch pipeline for the image reverse-proxy.
//!
//! ### Validation gates (fail-closed, in order)
//! - URL must be absolute http/https with a host on the fixed allowlist.
//!   This is the primary SSRF defense, checked before any upstream request.
//! - Upstream status must be in [200, 400).
//! - `Content-Type` must be `image/*`; checked before any body bytes move.
//! - A declared `Content-Length` over the cap rejects the fetch outright.
//!
//! ### Streaming
//! The body is relayed as a stream, never buffered whole, so per-request
//! memory stays bounded by the cap. A running byte counter aborts the
//! transfer if the body outgrows the cap mid-stream, covering upstreams
//! that omit or understate `Content-Length`.

pub mod allowlist;

pub use allowlist::ALLOWED_IMAGE_HOSTS;

use bytes::Bytes;
use futures_util::{Stream, StreamExt, future, stream::BoxStream};
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::time::Duration;

/// Default byte cap for a proxied image (2 MiB).
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Default upstream fetch timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(7);

/// Default maximum redirects.
const DEFAULT_MAX_REDIRECTS: usize = 3;

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "shelfmark/0.1";

/// Response headers relayed to the caller; everything else is dropped.
const PASSTHROUGH_HEADERS: &[header::HeaderName] = &[
    header::CONTENT_TYPE,
    header::CACHE_CONTROL,
    header::ETAG,
    header::LAST_MODIFIED,
    header::EXPIRES,
];

/// Injected when upstream omitted cache-control, so clients can cache the
/// asset instead of re-proxying it.
const DEFAULT_CACHE_CONTROL: &str = "public, max-age=86400, immutable";

/// Errors from the image fetch pipeline.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ImageError {
    /// No URL was supplied.
    #[error("missing image url")]
    MissingUrl,

    /// The URL did not parse as an absolute URL.
    #[error("invalid image url: {0}")]
    InvalidUrl(String),

    /// The URL scheme is not http or https.
    #[error("scheme not allowed: {0}")]
    DisallowedScheme(String),

    /// The host is not on the asset-host allowlist.
    #[error("host not allowed: {0}")]
    DisallowedHost(String),

    /// Upstream served something other than an image.
    #[error("unsupported content type: {0}")]
    NotAnImage(String),

    /// The body exceeds the byte cap, declared or streamed.
    #[error("image exceeds {limit} byte limit")]
    TooLarge { limit: usize },

    /// The upstream request timed out.
    #[error("upstream request timed out")]
    Timeout,

    /// Upstream answered with a status outside [200, 400).
    #[error("upstream returned status {0}")]
    UpstreamStatus(u16),

    /// Transport-level failure.
    #[error("upstream request failed: {0}")]
    Upstream(String),
}

/// Image fetch configuration.
#[derive(Debug, Clone)]
pub struct ImageFetchConfig {
    /// Hosts the proxy is willing to fetch from, one per upstream provider.
    pub allowed_hosts: Vec<String>,
    /// Maximum bytes relayed per request (default: 2 MiB).
    pub max_bytes: usize,
    /// Upstream request timeout (default: 7s).
    pub timeout: Duration,
    /// Maximum redirects followed (default: 3).
    pub max_redirects: usize,
    /// User-agent string.
    pub user_agent: String,
}

impl Default for ImageFetchConfig {
    fn default() -> Self {
        Self {
            allowed_hosts: ALLOWED_IMAGE_HOSTS.iter().map(|host| host.to_string()).collect(),
            max_bytes: MAX_IMAGE_BYTES,
            timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// A validated upstream image ready to relay.
pub struct FetchedImage {
    /// Upstream content type, always `image/*`.
    pub content_type: String,
    /// The restricted header set to forward, cache-control default included.
    pub headers: HeaderMap,
    /// Body bytes, capped at the configured limit.
    pub stream: BoxStream<'static, Result<Bytes, ImageError>>,
}

impl std::fmt::Debug for FetchedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchedImage")
            .field("content_type", &self.content_type)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Image fetch client with validation gates and a streaming byte cap.
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    http: reqwest::Client,
    config: ImageFetchConfig,
}

impl ImageFetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: ImageFetchConfig) -> Result<Self, ImageError> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .build()
            .map_err(|e| ImageError::Upstream(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Validate `raw`, fetch it, and hand back a capped byte stream.
    ///
    /// No upstream request is made once any gate fails. Dropping the
    /// returned stream (for instance when the caller disconnects) drops
    /// the upstream connection with it.
    pub async fn fetch(&self, raw: &str) -> Result<FetchedImage, ImageError> {
        let url = allowlist::validate(raw, &self.config.allowed_hosts)?;

        tracing::debug!(host = url.host_str().unwrap_or_default(), "proxying image");

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "image/*,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| if e.is_timeout() { ImageError::Timeout } else { ImageError::Upstream(e.to_string()) })?;

        let status = response.status().as_u16();
        if !(200..400).contains(&status) {
            return Err(ImageError::UpstreamStatus(status));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        require_image_content_type(&content_type)?;
        check_declared_length(response.content_length(), self.config.max_bytes)?;

        let headers = passthrough_headers(response.headers());

        let body = response.bytes_stream().map(|chunk| {
            chunk.map_err(|e| if e.is_timeout() { ImageError::Timeout } else { ImageError::Upstream(e.to_string()) })
        });
        let stream = cap_stream(body, self.config.max_bytes).boxed();

        Ok(FetchedImage { content_type, headers, stream })
    }
}

/// Reject any upstream body that is not an image, before bytes move.
fn require_image_content_type(content_type: &str) -> Result<(), ImageError> {
    if content_type.starts_with("image/") {
        Ok(())
    } else {
        Err(ImageError::NotAnImage(content_type.to_string()))
    }
}

/// Reject a declared `Content-Length` over the cap before streaming begins.
/// An absent or understated declaration is caught later by the running
/// counter in [`cap_stream`].
fn check_declared_length(declared: Option<u64>, cap: usize) -> Result<(), ImageError> {
    match declared {
        Some(length) if length as usize > cap => Err(ImageError::TooLarge { limit: cap }),
        _ => Ok(()),
    }
}

/// Filter upstream headers down to the relay allowlist, injecting the
/// default cache-control when upstream omitted one.
pub fn passthrough_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut filtered = HeaderMap::new();
    for name in PASSTHROUGH_HEADERS {
        if let Some(value) = upstream.get(name) {
            filtered.insert(name.clone(), value.clone());
        }
    }
    if !filtered.contains_key(header::CACHE_CONTROL) {
        filtered.insert(header::CACHE_CONTROL, HeaderValue::from_static(DEFAULT_CACHE_CONTROL));
    }
    filtered
}

/// Enforce the byte cap on a body stream.
///
/// Counts bytes as they pass; the chunk that pushes the running total past
/// `cap` is replaced with an error and the stream ends there, so a caller
/// never quietly receives a truncated image as success.
fn cap_stream<S>(body: S, cap: usize) -> impl Stream<Item = Result<Bytes, ImageError>>
where
    S: Stream<Item = Result<Bytes, ImageError>>,
{
    body.scan((0usize, false), move |(seen, done), chunk| {
        if *done {
            return future::ready(None);
        }
        let item = match chunk {
            Ok(bytes) => {
                *seen += bytes.len();
                if *seen > cap {
                    *done = true;
                    Err(ImageError::TooLarge { limit: cap })
                } else {
                    Ok(bytes)
                }
            }
            Err(err) => {
                *done = true;
                Err(err)
            }
        };
        future::ready(Some(item))
    })
}
