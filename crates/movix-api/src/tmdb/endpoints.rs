//! Request descriptors for the TMDB endpoints the discovery pages consume.
//!
//! Shared by the typed client methods and by fetch-hook consumers, so a
//! page and the client agree on the request key for the same data.

use super::media::{DiscoverParams, MediaType, TimeWindow};
use super::params::Request;

/// `/configuration` (image base URLs).
#[must_use]
pub fn configuration() -> Request {
    Request::new("/configuration")
}

/// `/genre/{media}/list`.
#[must_use]
pub fn genres(media: MediaType) -> Request {
    Request::new(format!("/genre/{media}/list"))
}

/// `/trending/{media}/{window}`.
#[must_use]
pub fn trending(media: MediaType, window: TimeWindow) -> Request {
    Request::new(format!("/trending/{media}/{window}"))
}

/// `/{media}/popular`.
#[must_use]
pub fn popular(media: MediaType, page: u32) -> Request {
    paged(format!("/{media}/popular"), page)
}

/// `/{media}/top_rated` (also the home hero banner source).
#[must_use]
pub fn top_rated(media: MediaType, page: u32) -> Request {
    paged(format!("/{media}/top_rated"), page)
}

/// `/search/multi?query=..&page=..`.
#[must_use]
pub fn search_multi(query: &str, page: u32) -> Request {
    Request::new("/search/multi")
        .param("query", query)
        .param("page", page)
}

/// `/discover/{media}` with filters.
#[must_use]
pub fn discover(media: MediaType, params: &DiscoverParams) -> Request {
    Request::new(format!("/discover/{media}")).params(params.to_query())
}

/// `/{media}/{id}`.
#[must_use]
pub fn details(media: MediaType, id: u64) -> Request {
    Request::new(format!("/{media}/{id}"))
}

/// `/{media}/{id}/credits`.
#[must_use]
pub fn credits(media: MediaType, id: u64) -> Request {
    Request::new(format!("/{media}/{id}/credits"))
}

/// `/{media}/{id}/videos`.
#[must_use]
pub fn videos(media: MediaType, id: u64) -> Request {
    Request::new(format!("/{media}/{id}/videos"))
}

/// `/{media}/{id}/similar`.
#[must_use]
pub fn similar(media: MediaType, id: u64) -> Request {
    Request::new(format!("/{media}/{id}/similar"))
}

/// `/{media}/{id}/recommendations`.
#[must_use]
pub fn recommendations(media: MediaType, id: u64) -> Request {
    Request::new(format!("/{media}/{id}/recommendations"))
}

/// Page 1 is the API default and is left off so the key matches a bare path.
fn paged(path: String, page: u32) -> Request {
    let request = Request::new(path);
    if page > 1 {
        request.param("page", page)
    } else {
        request
    }
}
