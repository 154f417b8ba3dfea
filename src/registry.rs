//! In-memory short-link registry
//!
//! This module owns the bidirectional mapping between short codes and
//! target URLs. It provides:
//! - Short-code generation (6 lowercase hex characters)
//! - Create-or-reuse with exact-match deduplication
//! - Redirect resolution with click counting
//! - Read-only stats and recent-entry listing
//!
//! All state lives in process memory for the lifetime of the process and
//! is discarded on exit.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use rand::Rng;
use url::Url;

use crate::error::RegistryError;
use crate::model::Entry;

/// Length of every generated short code.
pub const CODE_LENGTH: usize = 6;

/// Upper bound on code-generation redraws before giving up.
///
/// At 24 bits of entropy per code a single collision is already rare;
/// hitting this cap means the code space is effectively full for the
/// observed load and the operation fails with
/// [`RegistryError::CodeSpaceExhausted`] instead of overwriting anything.
const MAX_CODE_ATTEMPTS: usize = 64;

/// Application state shared across all request handlers
///
/// Wraps the registry in an Arc for thread-safe sharing across async
/// handlers in the Axum web framework, together with the base origin the
/// HTTP layer uses to render full short links.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe reference to the shared registry
    pub registry: Arc<Registry>,

    /// Base origin for rendered short links (e.g. "http://localhost:8080").
    /// Comes from configuration, never from the inbound request's Host header.
    pub base_url: String,
}

/// The collection of all short-code mappings.
///
/// One coarse lock guards the whole collection: every operation is a
/// short in-memory computation, so create and click-increment sequences
/// run to completion under a single lock acquisition and never observe a
/// half-applied state from another request.
#[derive(Default)]
pub struct Registry {
    inner: RwLock<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    /// All entries, keyed by short code.
    entries: HashMap<String, Entry>,

    /// Codes in insertion order, oldest first. Drives `recent()`.
    order: Vec<String>,
}

/// Generates a random short code: 3 cryptographically-sourced random
/// bytes, hex-encoded to exactly [`CODE_LENGTH`] lowercase characters.
pub fn generate_code() -> String {
    let bytes: [u8; CODE_LENGTH / 2] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Checks that the input parses as an absolute URL with a host.
///
/// Any scheme is accepted. Host-less inputs such as `"htp:/bad"` parse as
/// non-special URLs without an authority and are rejected here.
fn is_valid_url(input: &str) -> bool {
    match Url::parse(input) {
        Ok(parsed) => parsed.has_host(),
        Err(_) => false,
    }
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the short code for `url`, creating a new entry if needed.
    ///
    /// The returned flag is `true` when a new entry was inserted and
    /// `false` when an existing entry for the exact same URL string was
    /// reused. URLs are compared verbatim: no trailing-slash, casing, or
    /// query-order canonicalization is applied.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidUrl`] if `url` is empty or not an
    ///   absolute URL with a host. The registry is left unchanged.
    /// - [`RegistryError::CodeSpaceExhausted`] if generation keeps
    ///   colliding past the retry cap. The registry is left unchanged.
    pub fn create_or_reuse(&self, url: &str) -> Result<(String, bool), RegistryError> {
        if url.is_empty() || !is_valid_url(url) {
            return Err(RegistryError::InvalidUrl);
        }

        // Hold the write lock for the whole check-generate-insert
        // sequence so concurrent submissions of the same URL cannot both
        // insert.
        let mut inner = self.inner.write().unwrap();

        // Dedup path: scan by value for an exact URL match.
        if let Some(existing) = inner.entries.values().find(|e| e.original_url == url) {
            return Ok((existing.code.clone(), false));
        }

        // Generate a fresh code, redrawing while the candidate is taken.
        let mut code = generate_code();
        let mut attempts = 1;
        while inner.entries.contains_key(&code) {
            if attempts >= MAX_CODE_ATTEMPTS {
                return Err(RegistryError::CodeSpaceExhausted);
            }
            code = generate_code();
            attempts += 1;
        }

        let entry = Entry {
            code: code.clone(),
            original_url: url.to_string(),
            created_at: Utc::now(),
            clicks: 0,
        };

        inner.entries.insert(code.clone(), entry);
        inner.order.push(code.clone());

        Ok((code, true))
    }

    /// Looks up `code`, increments its click counter, and returns a
    /// post-increment snapshot of the entry.
    ///
    /// The increment happens under the write lock, so concurrent
    /// resolutions of the same code never lose updates.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] if no entry exists for `code`.
    pub fn resolve_and_count(&self, code: &str) -> Result<Entry, RegistryError> {
        let mut inner = self.inner.write().unwrap();
        let entry = inner
            .entries
            .get_mut(code)
            .ok_or(RegistryError::NotFound)?;
        entry.clicks += 1;
        Ok(entry.clone())
    }

    /// Returns a snapshot of the entry for `code` without touching its
    /// click counter.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] if no entry exists for `code`.
    pub fn stats(&self, code: &str) -> Result<Entry, RegistryError> {
        let inner = self.inner.read().unwrap();
        inner
            .entries
            .get(code)
            .cloned()
            .ok_or(RegistryError::NotFound)
    }

    /// Returns up to `limit` entries in insertion order, oldest first.
    pub fn recent(&self, limit: usize) -> Vec<Entry> {
        let inner = self.inner.read().unwrap();
        inner
            .order
            .iter()
            .take(limit)
            .filter_map(|code| inner.entries.get(code))
            .cloned()
            .collect()
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().entries.len()
    }

    /// Whether the registry holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
