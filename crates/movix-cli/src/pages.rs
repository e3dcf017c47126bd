//! Discovery pages, rendered as log lines.
//!
//! Carousels and detail sections read through `FetchHook`s keyed by endpoint
//! requests; paged listings (search, explore) go through the typed API.

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use movix_api::catalog::Catalog;
use movix_api::tmdb::{
    Credits, DiscoverParams, MediaDetails, MediaItem, MediaType, Paged, Request, TimeWindow,
    TmdbApi, TmdbClient, Video, VideoList, endpoints,
};
use movix_api::view;
use movix_api::watch::FetchHook;
use serde::de::DeserializeOwned;
use tracing::instrument;

/// Top cast entries shown on the details page.
const TOP_CAST: usize = 10;

/// Shared state for every page.
#[derive(Debug)]
pub struct Pages {
    client: Arc<TmdbClient>,
    catalog: Catalog,
}

impl Pages {
    /// Loads the catalog and prepares the pages.
    pub async fn load(client: TmdbClient) -> Self {
        let catalog = Catalog::load(&client).await;
        Self {
            client: Arc::new(client),
            catalog,
        }
    }

    fn hook(&self, key: Request) -> FetchHook<TmdbClient> {
        FetchHook::with_key(Arc::clone(&self.client), key)
    }

    /// Home page: hero backdrop plus the trending, popular and top-rated
    /// carousels. A failing section is logged and skipped.
    ///
    /// The hero backdrop is drawn from the top-rated list, so the banner and
    /// the Top Rated carousel share one request.
    #[instrument(skip_all)]
    pub async fn home(&self) -> Result<()> {
        let trending = self.hook(endpoints::trending(MediaType::Movie, TimeWindow::Day));
        let popular = self.hook(endpoints::popular(MediaType::Movie, 1));
        let top_rated = self.hook(endpoints::top_rated(MediaType::Movie, 1));

        match settle::<Paged<MediaItem>>(&top_rated).await {
            Ok(page) => self.print_banner(&page.results),
            Err(e) => tracing::error!("Banner: {e:#}"),
        }

        for (title, hook) in [
            ("Trending", &trending),
            ("What's Popular", &popular),
            ("Top Rated", &top_rated),
        ] {
            match settle::<Paged<MediaItem>>(hook).await {
                Ok(page) => self.print_carousel(title, &page.results, MediaType::Movie),
                Err(e) => tracing::error!("{title}: {e:#}"),
            }
        }

        Ok(())
    }

    /// Trending movies for a time window.
    #[instrument(skip_all)]
    pub async fn trending(&self, window: TimeWindow) -> Result<()> {
        let hook = self.hook(endpoints::trending(MediaType::Movie, window));
        let page = settle::<Paged<MediaItem>>(&hook)
            .await
            .context("failed to fetch trending titles")?;
        self.print_carousel("Trending", &page.results, MediaType::Movie);
        Ok(())
    }

    /// Popular movies or TV shows.
    #[instrument(skip_all)]
    pub async fn popular(&self, media: MediaType) -> Result<()> {
        let hook = self.hook(endpoints::popular(media, 1));
        let page = settle::<Paged<MediaItem>>(&hook)
            .await
            .context("failed to fetch popular titles")?;
        self.print_carousel("What's Popular", &page.results, media);
        Ok(())
    }

    /// Top-rated movies or TV shows.
    #[instrument(skip_all)]
    pub async fn top_rated(&self, media: MediaType) -> Result<()> {
        let hook = self.hook(endpoints::top_rated(media, 1));
        let page = settle::<Paged<MediaItem>>(&hook)
            .await
            .context("failed to fetch top-rated titles")?;
        self.print_carousel("Top Rated", &page.results, media);
        Ok(())
    }

    /// Multi-search over `pages` pages; people are left out.
    #[instrument(skip_all)]
    pub async fn search(&self, query: &str, pages: u32) -> Result<()> {
        let results = self.search_results(query, pages).await?;

        let total = results.total_results;
        let items = view::without_people(results.results);
        if items.is_empty() {
            tracing::info!("{}", view::NO_RESULTS);
            return Ok(());
        }
        tracing::info!("{}", view::search_heading(query, total));
        self.print_items(&items, MediaType::Movie);
        Ok(())
    }

    /// Discover listing with genre and sort filters over `pages` pages.
    #[instrument(skip_all)]
    pub async fn explore(
        &self,
        media: MediaType,
        params: DiscoverParams,
        pages: u32,
    ) -> Result<()> {
        let results = self.explore_results(media, params, pages).await?;

        tracing::info!("{}", view::explore_heading(media));
        if results.results.is_empty() {
            tracing::info!("{}", view::NO_RESULTS);
            return Ok(());
        }
        self.print_items(&results.results, media);
        Ok(())
    }

    /// Loads up to `pages` search pages, stopping early at the last reported
    /// page or at an empty page.
    async fn search_results(&self, query: &str, pages: u32) -> Result<Paged<MediaItem>> {
        let mut results = self
            .client
            .search_multi(query, 1)
            .await
            .context("TMDB search/multi request failed")?;
        for page in 2..=pages {
            if !results.has_page(page) {
                break;
            }
            let next = self
                .client
                .search_multi(query, page)
                .await
                .context("TMDB search/multi request failed")?;
            if next.results.is_empty() {
                break;
            }
            results.append(next);
        }
        Ok(results)
    }

    /// Loads up to `pages` discover pages starting at `params.page`, stopping
    /// early at the last reported page or at an empty page.
    async fn explore_results(
        &self,
        media: MediaType,
        mut params: DiscoverParams,
        pages: u32,
    ) -> Result<Paged<MediaItem>> {
        let first = params.page;
        let last = first.saturating_add(pages.saturating_sub(1));
        let mut results = self
            .client
            .discover(media, &params)
            .await
            .context("TMDB discover request failed")?;
        for page in (first..last).map(|p| p.saturating_add(1)) {
            if !results.has_page(page) {
                break;
            }
            params.page = page;
            let next = self
                .client
                .discover(media, &params)
                .await
                .context("TMDB discover request failed")?;
            if next.results.is_empty() {
                break;
            }
            results.append(next);
        }
        Ok(results)
    }

    /// Details page: banner, cast, videos, similar and recommendations.
    #[instrument(skip_all)]
    pub async fn details(&self, media: MediaType, id: u64) -> Result<()> {
        let videos = self.hook(endpoints::videos(media, id));
        let similar = self.hook(endpoints::similar(media, id));
        let recommendations = self.hook(endpoints::recommendations(media, id));

        let (details, credits) = futures::try_join!(
            self.client.details(media, id),
            self.client.credits(media, id),
        )
        .with_context(|| format!("failed to fetch {media} {id}"))?;

        let videos = match settle::<VideoList>(&videos).await {
            Ok(list) => list.results,
            Err(e) => {
                tracing::error!("Videos: {e:#}");
                Vec::new()
            }
        };

        self.print_details(&details, &credits, &videos);

        for (title, hook) in [
            (view::similar_heading(media), &similar),
            (String::from("Recommendations"), &recommendations),
        ] {
            match settle::<Paged<MediaItem>>(hook).await {
                Ok(page) if page.results.is_empty() => {}
                Ok(page) => self.print_carousel(&title, &page.results, media),
                Err(e) => tracing::error!("{title}: {e:#}"),
            }
        }

        Ok(())
    }

    /// Genre lookup loaded at startup.
    pub fn genres(&self) {
        tracing::info!("ID\tName");
        for (id, name) in self.catalog.genres.iter() {
            tracing::info!("{id}\t{name}");
        }
        tracing::info!("Total: {} genres", self.catalog.genres.len());
    }

    fn print_banner(&self, items: &[MediaItem]) {
        let backdrop = view::pick_backdrop(items, &mut rand::rng());
        let url = self
            .catalog
            .images
            .as_ref()
            .and_then(|images| images.backdrop_url(backdrop));
        tracing::info!("Welcome.");
        tracing::info!("Millions of movies, TV shows and people to discover. Explore now.");
        if let Some(url) = url {
            tracing::info!("Backdrop: {url}");
        }
    }

    fn print_carousel(&self, title: &str, items: &[MediaItem], fallback: MediaType) {
        tracing::info!("== {title} ==");
        self.print_items(items, fallback);
    }

    fn print_items(&self, items: &[MediaItem], fallback: MediaType) {
        tracing::info!("ID\tType\tRating\tDate\t\tTitle\t\t\tGenres");
        for item in items {
            let genres = self.catalog.genres.names(&item.genre_ids);
            tracing::info!(
                "{}\t{}\t{}\t{}\t{}\t\t{}",
                item.id,
                item.media_type_or(fallback),
                view::format_rating(item.vote_average),
                view::format_date(item.date()),
                item.display_title(),
                if genres.is_empty() {
                    String::from("-")
                } else {
                    genres.join(", ")
                },
            );
        }
        tracing::info!("Total: {} titles", items.len());
    }

    fn print_details(&self, details: &MediaDetails, credits: &Credits, videos: &[Video]) {
        let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();

        tracing::info!(
            "{} ({})",
            details.display_title(),
            details.date().and_then(|d| d.get(..4)).unwrap_or("-")
        );
        if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
            tracing::info!("{tagline}");
        }
        tracing::info!("Genres: {}", genres.join(", "));
        tracing::info!("Rating: {}", view::format_rating(details.vote_average));
        tracing::info!("Overview: {}", details.overview.as_deref().unwrap_or("-"));
        tracing::info!("Status: {}", details.status.as_deref().unwrap_or("-"));
        tracing::info!("Release Date: {}", view::format_date(details.date()));
        if let Some(minutes) = details.runtime_minutes() {
            tracing::info!("Runtime: {}", view::format_runtime(minutes));
        }
        if let Some(poster) = self
            .catalog
            .images
            .as_ref()
            .and_then(|images| images.poster_url(details.poster_path.as_deref()))
        {
            tracing::info!("Poster: {poster}");
        }

        let directors = view::directors(&credits.crew);
        if !directors.is_empty() {
            let names: Vec<&str> = directors.iter().map(|m| m.name.as_str()).collect();
            tracing::info!("Director: {}", names.join(", "));
        }
        let writers = view::writers(&credits.crew);
        if !writers.is_empty() {
            let names: Vec<&str> = writers.iter().map(|m| m.name.as_str()).collect();
            tracing::info!("Writer: {}", names.join(", "));
        }
        if let Some(url) = view::official_trailer(videos).and_then(Video::watch_url) {
            tracing::info!("Watch Trailer: {url}");
        }

        if !credits.cast.is_empty() {
            tracing::info!("== Top Cast ==");
            for member in credits.cast.iter().take(TOP_CAST) {
                let profile = self
                    .catalog
                    .images
                    .as_ref()
                    .and_then(|images| images.profile_url(member.profile_path.as_deref()));
                tracing::info!(
                    "{}\t{}\t{}",
                    member.name,
                    member.character.as_deref().unwrap_or("-"),
                    profile.as_deref().unwrap_or("-")
                );
            }
        }

        if !videos.is_empty() {
            tracing::info!("== Official Videos ==");
            for video in videos {
                tracing::info!(
                    "{}\t{}",
                    video.name,
                    video.watch_url().as_deref().unwrap_or("-")
                );
            }
        }
    }
}

/// Waits for `hook` to settle and decodes its payload.
async fn settle<T: DeserializeOwned>(hook: &FetchHook<TmdbClient>) -> Result<T> {
    let snapshot = hook.settled().await;
    if let Some(error) = snapshot.error {
        return Err(anyhow!(error));
    }
    snapshot
        .decode::<T>()
        .context("fetch finished without data")?
        .context("unexpected response shape")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::time::Duration;

    use movix_api::tmdb::RetryPolicy;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn pages_for(server: &MockServer) -> Pages {
        let client = TmdbClient::builder()
            .base_url(format!("{}/3/", server.uri()).parse().unwrap())
            .api_token("test-token")
            .user_agent("test/0.0.0")
            .retry_policy(RetryPolicy::new(0, Duration::from_millis(1)))
            .build()
            .unwrap();
        Pages {
            client: Arc::new(client),
            catalog: Catalog::default(),
        }
    }

    /// One-entry list body without a `page` field.
    fn body(id: u64, total_pages: u32) -> String {
        format!(
            r#"{{"results":[{{"id":{id},"media_type":"movie","title":"Title {id}"}}],"total_pages":{total_pages},"total_results":{total_pages}}}"#
        )
    }

    async fn mount_page(
        server: &MockServer,
        route: &str,
        page: u32,
        body: impl Into<String>,
        calls: u64,
    ) {
        Mock::given(method("GET"))
            .and(path(route))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(calls)
            .mount(server)
            .await;
    }

    fn ids(results: &Paged<MediaItem>) -> Vec<u64> {
        results.results.iter().map(|r| r.id).collect()
    }

    #[tokio::test]
    async fn test_search_without_page_field_stops_at_requested_pages() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/search/multi"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body(1, 5)))
            .expect(2)
            .mount(&mock_server)
            .await;
        let pages = pages_for(&mock_server);

        // Act
        let results = tokio::time::timeout(Duration::from_secs(5), pages.search_results("x", 2))
            .await
            .unwrap()
            .unwrap();

        // Assert
        assert_eq!(ids(&results), vec![1, 1]);
    }

    #[tokio::test]
    async fn test_search_appends_following_page() {
        // Arrange
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, "/3/search/multi", 1, body(1, 3), 1).await;
        mount_page(&mock_server, "/3/search/multi", 2, body(2, 3), 1).await;
        mount_page(&mock_server, "/3/search/multi", 3, body(3, 3), 0).await;
        let pages = pages_for(&mock_server);

        // Act
        let results = pages.search_results("batman", 2).await.unwrap();

        // Assert
        assert_eq!(ids(&results), vec![1, 2]);
        assert_eq!(results.total_pages, 3);
    }

    #[tokio::test]
    async fn test_search_stops_at_last_reported_page() {
        // Arrange
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, "/3/search/multi", 1, body(1, 2), 1).await;
        mount_page(&mock_server, "/3/search/multi", 2, body(2, 2), 1).await;
        mount_page(&mock_server, "/3/search/multi", 3, body(3, 2), 0).await;
        let pages = pages_for(&mock_server);

        // Act
        let results = pages.search_results("batman", 5).await.unwrap();

        // Assert
        assert_eq!(ids(&results), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_search_stops_on_empty_page() {
        // Arrange
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, "/3/search/multi", 1, body(1, 5), 1).await;
        mount_page(
            &mock_server,
            "/3/search/multi",
            2,
            r#"{"results":[],"total_pages":5}"#,
            1,
        )
        .await;
        mount_page(&mock_server, "/3/search/multi", 3, body(3, 5), 0).await;
        let pages = pages_for(&mock_server);

        // Act
        let results = pages.search_results("batman", 5).await.unwrap();

        // Assert
        assert_eq!(ids(&results), vec![1]);
    }

    #[tokio::test]
    async fn test_search_without_totals_loads_one_page() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/search/multi"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"results":[{"id":7}]}"#))
            .expect(1)
            .mount(&mock_server)
            .await;
        let pages = pages_for(&mock_server);

        // Act
        let results = pages.search_results("batman", 3).await.unwrap();

        // Assert
        assert_eq!(ids(&results), vec![7]);
    }

    #[tokio::test]
    async fn test_explore_counts_from_start_page() {
        // Arrange
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, "/3/discover/movie", 3, body(3, 9), 1).await;
        mount_page(&mock_server, "/3/discover/movie", 4, body(4, 9), 1).await;
        mount_page(&mock_server, "/3/discover/movie", 5, body(5, 9), 0).await;
        let pages = pages_for(&mock_server);

        // Act
        let results = tokio::time::timeout(
            Duration::from_secs(5),
            pages.explore_results(MediaType::Movie, DiscoverParams::default().page(3), 2),
        )
        .await
        .unwrap()
        .unwrap();

        // Assert
        assert_eq!(ids(&results), vec![3, 4]);
    }
}
