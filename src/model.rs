//! Data models for the URL shortener application
//!
//! This module defines the stored entry structure and the
//! request/response models used by the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored short-code mapping
///
/// One record per shortened URL:
/// - The short code (primary key)
/// - The original target URL
/// - Creation timestamp
/// - Click tracking counter
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Entry {
    /// Short code identifying this mapping (e.g. "a3f91c")
    pub code: String,

    /// The original long URL, stored verbatim as submitted
    pub original_url: String,

    /// Timestamp when this entry was created; set once at insertion
    pub created_at: DateTime<Utc>,

    /// Number of times this short link has been resolved
    pub clicks: u64,
}

/// Request payload for shortening a URL
///
/// # Example
/// ```json
/// { "url": "https://example.com/very/long/url" }
/// ```
#[derive(Deserialize)]
pub struct ShortenRequest {
    /// The original URL to be shortened
    pub url: String,
}

/// Response returned by the shorten endpoint
///
/// The same shape is returned whether the submission created a new entry
/// or reused an existing one; `is_new` carries the distinction.
///
/// # Example
/// ```json
/// {
///   "code": "a3f91c",
///   "short_url": "http://localhost:8080/a3f91c",
///   "is_new": true,
///   "total_urls": 1
/// }
/// ```
#[derive(Serialize)]
pub struct ShortenResponse {
    /// The short code assigned to the submitted URL
    pub code: String,

    /// The full short link, rendered from the configured base origin
    pub short_url: String,

    /// Whether this submission created a new entry
    pub is_new: bool,

    /// Total number of entries in the registry after this submission
    pub total_urls: usize,
}

/// Query parameters for the recent-entries listing
///
/// # Example
/// Query string: `?limit=20`
#[derive(Deserialize)]
pub struct ListParams {
    /// Maximum number of entries to return
    /// Defaults to 10 if not provided
    pub limit: Option<usize>,
}
