//! Response-caching middleware for axum hosts.
//!
//! Persists eligible responses (GET answered with 200) as a side effect and
//! returns the response unchanged. The cache layer is a trust boundary: no
//! cache failure may reach the HTTP client, so everything here is
//! log-and-continue.

use std::sync::Arc;

use axum::{
    body::{Body, HttpBody},
    extract::State,
    http::{Method, Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument, warn};

use super::store::{PageStore, RequestFacts, ResponseFacts};

/// Largest response body the middleware will buffer for caching. Larger
/// responses pass through uncached.
const BODY_LIMIT_BYTES: usize = 8 * 1024 * 1024;

/// Shared cache state for the middleware layer.
#[derive(Clone)]
pub struct CacheState {
    pub store: Arc<PageStore>,
}

/// Eligibility predicate: only GET requests answered with 200 are stored.
fn should_cache(method: &Method, status: StatusCode) -> bool {
    method == Method::GET && status == StatusCode::OK
}

/// Middleware that persists eligible responses to the page cache.
///
/// Install with `axum::middleware::from_fn_with_state`. The client always
/// receives the handler's response unchanged; cache writes happen after the
/// handler completes and failures are logged and swallowed.
#[instrument(skip_all, fields(path = %request.uri().path()))]
pub async fn page_cache_layer(
    State(cache): State<CacheState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);

    let response = next.run(request).await;

    if !should_cache(&method, response.status()) {
        return response;
    }

    let (parts, body) = response.into_parts();

    // Only bodies known to fit the buffer are eligible; anything larger (or
    // of unknown length) is handed back untouched rather than consumed.
    if body
        .size_hint()
        .upper()
        .is_none_or(|upper| upper > BODY_LIMIT_BYTES as u64)
    {
        debug!("response body exceeds cache buffer limit, skipping cache");
        return Response::from_parts(parts, body);
    }

    let bytes = match axum::body::to_bytes(body, BODY_LIMIT_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            // Mid-stream read failure: the body is consumed and there is
            // nothing left to deliver.
            warn!(error = %err, "failed to buffer response body for caching");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.split(';').next().unwrap_or(value).trim().to_string());

    let request_facts = RequestFacts {
        method: method.to_string(),
        path,
        query,
    };
    let response_facts = ResponseFacts {
        status: parts.status.as_u16(),
        content_type,
        structured_json: false,
        body: bytes.clone(),
    };

    match cache.store.put(&request_facts, &response_facts).await {
        Ok(()) => debug!(cache = "page", "response persisted to page cache"),
        Err(err) => warn!(error = %err, "failed to persist page cache entry"),
    }

    Response::from_parts(parts, Body::from(bytes))
}
