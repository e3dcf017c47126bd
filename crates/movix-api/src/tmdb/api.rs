//! `JsonFetcher` and `TmdbApi` trait definitions.
#![allow(clippy::future_not_send)]

use serde_json::Value;

use super::error::FetchError;
use super::media::{DiscoverParams, MediaType, TimeWindow};
use super::params::Request;
use super::types::{
    ApiConfiguration, Credits, GenreList, MediaDetails, MediaItem, Paged, VideoList,
};

/// Raw JSON fetch: the resilient fetch wrapper seen by the fetch hook.
///
/// Abstracts the transport for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[trait_variant::make(JsonFetcher: Send)]
pub trait LocalJsonFetcher {
    /// Fetches `request` and returns the decoded JSON body unchanged.
    ///
    /// # Errors
    ///
    /// Returns the last attempt's error after a non-retryable failure or
    /// once retries are exhausted.
    async fn fetch_json(&self, request: &Request) -> Result<Value, FetchError>;
}

/// TMDB API trait.
///
/// Typed access to the endpoint families the discovery pages consume.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches image CDN configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    async fn configuration(&self) -> Result<ApiConfiguration, FetchError>;

    /// Fetches the genre list for a media type.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    async fn genres(&self, media: MediaType) -> Result<GenreList, FetchError>;

    /// Fetches trending entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    async fn trending(
        &self,
        media: MediaType,
        window: TimeWindow,
    ) -> Result<Paged<MediaItem>, FetchError>;

    /// Fetches popular entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    async fn popular(&self, media: MediaType, page: u32) -> Result<Paged<MediaItem>, FetchError>;

    /// Fetches top-rated entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    async fn top_rated(
        &self,
        media: MediaType,
        page: u32,
    ) -> Result<Paged<MediaItem>, FetchError>;

    /// Searches movies, TV and people at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    async fn search_multi(&self, query: &str, page: u32) -> Result<Paged<MediaItem>, FetchError>;

    /// Lists entries matching discover filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    async fn discover(
        &self,
        media: MediaType,
        params: &DiscoverParams,
    ) -> Result<Paged<MediaItem>, FetchError>;

    /// Fetches movie or TV details.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    async fn details(&self, media: MediaType, id: u64) -> Result<MediaDetails, FetchError>;

    /// Fetches cast and crew.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    async fn credits(&self, media: MediaType, id: u64) -> Result<Credits, FetchError>;

    /// Fetches trailers, teasers and other videos.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    async fn videos(&self, media: MediaType, id: u64) -> Result<VideoList, FetchError>;

    /// Fetches similar entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    async fn similar(&self, media: MediaType, id: u64) -> Result<Paged<MediaItem>, FetchError>;

    /// Fetches recommendations.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    async fn recommendations(
        &self,
        media: MediaType,
        id: u64,
    ) -> Result<Paged<MediaItem>, FetchError>;
}
