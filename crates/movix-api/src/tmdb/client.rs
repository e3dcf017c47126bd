//! `TmdbClient` - TMDB API client implementation.

use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use super::api::{JsonFetcher, TmdbApi};
use super::endpoints;
use super::error::FetchError;
use super::media::{DiscoverParams, MediaType, TimeWindow};
use super::params::{QueryParams, Request};
use super::retry::{RetryPolicy, retry_with_policy};
use super::types::{
    ApiConfiguration, Credits, GenreList, MediaDetails, MediaItem, Paged, VideoList,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests (always ends with `/`).
    base_url: Url,
    /// Bearer API token.
    api_token: String,
    /// Parameters sent with every request that does not set them
    /// (`language`, `region`).
    default_params: QueryParams,
    /// Retry policy for every request.
    retry_policy: RetryPolicy,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
    default_params: QueryParams,
    retry_policy: Option<RetryPolicy>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            user_agent: None,
            default_params: QueryParams::new(),
            retry_policy: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token (required).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the default response language (e.g. "en-US").
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.default_params.insert("language", language.into());
        self
    }

    /// Sets the default ISO 3166-1 region (e.g. "US").
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.default_params.insert("region", region.into());
        self
    }

    /// Sets the retry policy (default: 2 retries, 1s backoff unit).
    #[must_use]
    pub const fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_token` is not set or blank.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_token = self.api_token.context("api_token is required")?;
        if api_token.trim().is_empty() {
            bail!("api_token is required (got an empty token)");
        }
        let user_agent = self.user_agent.context("user_agent is required")?;

        let mut base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?,
        };
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_token,
            default_params: self.default_params,
            retry_policy: self.retry_policy.unwrap_or_default(),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends `request` with Bearer auth under the retry policy and returns the
    /// decoded JSON body.
    #[instrument(skip_all, fields(request = %request))]
    async fn request_json(&self, request: &Request) -> Result<Value, FetchError> {
        let path = request.path();
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| FetchError::InvalidPath {
                path: String::from(path),
                source,
            })?;

        let mut query = request.query().clone();
        for (key, value) in self.default_params.iter() {
            if !query.contains(key) {
                query.insert(key, value.clone());
            }
        }
        let pairs = query.to_pairs();

        retry_with_policy(&self.retry_policy, |attempt| {
            self.send_once(&url, &pairs, attempt)
        })
        .await
    }

    /// Issues one GET attempt.
    async fn send_once(
        &self,
        url: &Url,
        query: &[(String, String)],
        attempt: u32,
    ) -> Result<Value, FetchError> {
        let request = self
            .http_client
            .get(url.clone())
            .bearer_auth(&self.api_token)
            .query(query)
            .build()?;

        tracing::debug!(url = %request.url(), attempt, "TMDB API request");

        let response = self.http_client.execute(request).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::from_response(status.as_u16(), &body));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetches `request` and decodes the body into `T`.
    async fn get_json<T: DeserializeOwned>(&self, request: &Request) -> Result<T, FetchError> {
        let value = self.request_json(request).await?;
        Ok(serde_json::from_value(value)?)
    }
}

impl JsonFetcher for TmdbClient {
    async fn fetch_json(&self, request: &Request) -> Result<Value, FetchError> {
        self.request_json(request).await
    }
}

impl TmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn configuration(&self) -> Result<ApiConfiguration, FetchError> {
        self.get_json(&endpoints::configuration()).await
    }

    #[instrument(skip_all)]
    async fn genres(&self, media: MediaType) -> Result<GenreList, FetchError> {
        self.get_json(&endpoints::genres(media)).await
    }

    #[instrument(skip_all)]
    async fn trending(
        &self,
        media: MediaType,
        window: TimeWindow,
    ) -> Result<Paged<MediaItem>, FetchError> {
        self.get_json(&endpoints::trending(media, window)).await
    }

    #[instrument(skip_all)]
    async fn popular(&self, media: MediaType, page: u32) -> Result<Paged<MediaItem>, FetchError> {
        self.get_json(&endpoints::popular(media, page)).await
    }

    #[instrument(skip_all)]
    async fn top_rated(
        &self,
        media: MediaType,
        page: u32,
    ) -> Result<Paged<MediaItem>, FetchError> {
        self.get_json(&endpoints::top_rated(media, page)).await
    }

    #[instrument(skip_all)]
    async fn search_multi(&self, query: &str, page: u32) -> Result<Paged<MediaItem>, FetchError> {
        self.get_json(&endpoints::search_multi(query, page)).await
    }

    #[instrument(skip_all)]
    async fn discover(
        &self,
        media: MediaType,
        params: &DiscoverParams,
    ) -> Result<Paged<MediaItem>, FetchError> {
        self.get_json(&endpoints::discover(media, params)).await
    }

    #[instrument(skip_all)]
    async fn details(&self, media: MediaType, id: u64) -> Result<MediaDetails, FetchError> {
        self.get_json(&endpoints::details(media, id)).await
    }

    #[instrument(skip_all)]
    async fn credits(&self, media: MediaType, id: u64) -> Result<Credits, FetchError> {
        self.get_json(&endpoints::credits(media, id)).await
    }

    #[instrument(skip_all)]
    async fn videos(&self, media: MediaType, id: u64) -> Result<VideoList, FetchError> {
        self.get_json(&endpoints::videos(media, id)).await
    }

    #[instrument(skip_all)]
    async fn similar(&self, media: MediaType, id: u64) -> Result<Paged<MediaItem>, FetchError> {
        self.get_json(&endpoints::similar(media, id)).await
    }

    #[instrument(skip_all)]
    async fn recommendations(
        &self,
        media: MediaType,
        id: u64,
    ) -> Result<Paged<MediaItem>, FetchError> {
        self.get_json(&endpoints::recommendations(media, id)).await
    }
}
