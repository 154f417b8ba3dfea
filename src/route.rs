//! Route definitions for the URL shortener API
//!
//! This module configures all HTTP routes and maps them to their
//! respective handlers.

use axum::routing::{get, post};
use axum::Router;

use crate::handler::{list_recent_urls, redirect_url, shorten_url, url_stats};
use crate::registry::AppState;

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `GET /{code}` - Redirects to the original URL (public endpoint)
/// - `POST /api/shorten` - Shortens a URL (create-or-reuse)
/// - `GET /api/stats/{code}` - Returns stats for a short code
/// - `GET /api/urls` - Lists recent entries
///
/// # Arguments
///
/// * `state` - Application state containing the shared registry
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/shorten", post(shorten_url))
        .route("/stats/{code}", get(url_stats))
        .route("/urls", get(list_recent_urls));

    Router::new()
        // Public redirect endpoint - resolves a short code to its target
        .route("/{code}", get(redirect_url))
        // Mount API routes under /api
        .nest("/api", api_routes)
        // Inject the application state into all handlers
        .with_state(state)
}
