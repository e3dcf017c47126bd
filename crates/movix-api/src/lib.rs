//! API client library for movix.
//!
//! Provides the TMDB client with its retry policy, a cancellable fetch hook
//! for consumers that refetch when their request key changes, the catalog
//! bootstrap (image URLs, genres) and presentation helpers.

/// Catalog data loaded once at startup (image base URLs, genres).
pub mod catalog;

/// TMDB API client.
pub mod tmdb;

/// Presentation helpers for catalog entries.
pub mod view;

/// Cancellable data-fetch hook.
pub mod watch;
