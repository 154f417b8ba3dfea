//! HTTP request handlers for the URL shortener API
//!
//! This module implements the endpoints backed by the registry:
//! - Shortening URLs (create-or-reuse with deduplication)
//! - Redirecting short codes to their original destinations
//! - Per-code statistics
//! - Listing recent entries
//!
//! All URL validation happens inside the registry; the handlers perform
//! none of their own.

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};
use serde_json::{json, Value};

use crate::error::RegistryError;
use crate::model::{Entry, ListParams, ShortenRequest, ShortenResponse};
use crate::registry::AppState;

/// Default number of entries returned by the listing endpoint.
const DEFAULT_LIST_LIMIT: usize = 10;

/// Shortens a URL, reusing the existing code for repeat submissions
///
/// This handler:
/// 1. Passes the submitted URL to the registry for validation and
///    create-or-reuse
/// 2. Renders the full short link from the configured base origin
/// 3. Returns the code, the rendered link, whether the entry is new, and
///    the registry's total entry count
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/very/long/url" }
/// ```
///
/// # Response
///
/// - **200 OK** - Short code assigned (newly created or reused)
/// - **400 Bad Request** - Input is not an absolute URL with a host
pub async fn shorten_url(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, RegistryError> {
    let (code, is_new) = state.registry.create_or_reuse(&payload.url)?;

    let response = ShortenResponse {
        short_url: format!("{}/{}", state.base_url, code),
        code,
        is_new,
        total_urls: state.registry.len(),
    };

    Ok(Json(response))
}

/// Redirects a short code to its original destination
///
/// When a user visits `http://localhost:8080/a3f91c`, this handler looks
/// the code up, increments its click counter, and sends a 307 Temporary
/// Redirect to the original URL.
///
/// # Path Parameters
///
/// - `code` - The short code to resolve
///
/// # Response
///
/// - **307 Temporary Redirect** - Redirects to the original URL
/// - **404 Not Found** - Short code does not exist
///
/// # Note
///
/// Uses 307 Temporary Redirect instead of 301 Permanent Redirect so
/// browsers re-resolve on every visit and clicks keep being counted.
pub async fn redirect_url(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, RegistryError> {
    let entry = state.registry.resolve_and_count(&code)?;
    Ok(Redirect::temporary(&entry.original_url))
}

/// Returns statistics for a short code without counting a click
///
/// # Path Parameters
///
/// - `code` - The short code to look up
///
/// # Response
///
/// - **200 OK** - Entry snapshot: original URL, code, clicks, creation time
/// - **404 Not Found** - Short code does not exist
pub async fn url_stats(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Entry>, RegistryError> {
    let entry = state.registry.stats(&code)?;
    Ok(Json(entry))
}

/// Lists recent entries, oldest first
///
/// # Query Parameters
///
/// - `limit` (optional) - Maximum entries to return (default: 10)
///
/// # Response
///
/// ```json
/// {
///   "limit": 10,
///   "total": 42,
///   "data": [...]
/// }
/// ```
///
/// `total` is the full registry count, independent of the limit.
pub async fn list_recent_urls(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<Value> {
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let entries = state.registry.recent(limit);

    Json(json!({
        "limit": limit,
        "total": state.registry.len(),
        "data": entries,
    }))
}
