//! TMDB API client module.
//!
//! Sends authenticated GET requests to the TMDB API v3, retries transient
//! failures with linear backoff and decodes the catalog responses consumed by
//! the discovery pages.

mod api;
mod client;
pub mod endpoints;
mod error;
mod media;
mod params;
mod retry;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{JsonFetcher, LocalJsonFetcher, LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use error::FetchError;
pub use media::{DiscoverParams, MediaType, SortBy, TimeWindow, UnknownVariant};
pub use params::{ParamValue, QueryParams, Request};
pub use retry::{Classify, FailureKind, RetryDecision, RetryPolicy, retry_with_policy};
pub use types::{
    ApiConfiguration, CastMember, Credits, CrewMember, Genre, GenreList, ImagesConfiguration,
    MediaDetails, MediaItem, MediaKind, Paged, TmdbErrorResponse, Video, VideoList,
};
