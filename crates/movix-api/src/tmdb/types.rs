//! TMDB API response types.

use serde::Deserialize;

use super::media::MediaType;

// --- Lists ---

/// Paged list response (`results` plus paging totals).
#[derive(Debug, Clone, Deserialize)]
pub struct Paged<T> {
    /// Current page number.
    #[serde(default = "first_page")]
    pub page: u32,
    /// Entries on this page.
    pub results: Vec<T>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

const fn first_page() -> u32 {
    1
}

impl<T> Paged<T> {
    /// Appends the following page: results are concatenated and the paging
    /// fields take the newer page's values.
    pub fn append(&mut self, next: Self) {
        self.results.extend(next.results);
        self.page = next.page;
        self.total_pages = next.total_pages;
        self.total_results = next.total_results;
    }

    /// Returns `true` if `page` is within the reported page count.
    ///
    /// Lists without `total_pages` report a single page.
    #[must_use]
    pub const fn has_page(&self, page: u32) -> bool {
        page <= self.total_pages || (page == 1 && self.total_pages == 0)
    }
}

/// Kind tag carried by `search/multi` and `trending` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Movie entry.
    Movie,
    /// TV entry.
    Tv,
    /// Person entry.
    Person,
    /// Anything else TMDB may add.
    #[serde(other)]
    Other,
}

/// A movie, TV or person entry in a list.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaItem {
    /// TMDB ID.
    pub id: u64,
    /// Entry kind (only on mixed lists).
    pub media_type: Option<MediaKind>,
    /// Movie title.
    pub title: Option<String>,
    /// TV or person name.
    pub name: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Movie release date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// TV first air date (YYYY-MM-DD).
    pub first_air_date: Option<String>,
}

impl MediaItem {
    /// Title for movies, name for TV and people.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    /// Release or first air date.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
            .filter(|d| !d.is_empty())
    }

    /// Media type of the entry, falling back to the list's type.
    #[must_use]
    pub const fn media_type_or(&self, fallback: MediaType) -> MediaType {
        match self.media_type {
            Some(MediaKind::Tv) => MediaType::Tv,
            Some(MediaKind::Movie) => MediaType::Movie,
            _ => fallback,
        }
    }

    /// Returns `true` for person entries.
    #[must_use]
    pub fn is_person(&self) -> bool {
        self.media_type == Some(MediaKind::Person)
    }
}

// --- Genres ---

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Response from `genre/{media}/list`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenreList {
    /// Genres.
    pub genres: Vec<Genre>,
}

// --- Configuration ---

/// Response from `configuration`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfiguration {
    /// Image CDN settings.
    pub images: ImagesConfiguration,
}

/// Image CDN settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesConfiguration {
    /// HTTPS base URL for images.
    pub secure_base_url: String,
}

// --- Details ---

/// Response from `{media}/{id}` (movie or TV).
#[derive(Debug, Clone, Deserialize)]
pub struct MediaDetails {
    /// TMDB ID.
    pub id: u64,
    /// Movie title.
    pub title: Option<String>,
    /// TV name.
    pub name: Option<String>,
    /// Tagline.
    pub tagline: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Status (e.g. "Released", "Returning Series").
    pub status: Option<String>,
    /// Movie release date.
    pub release_date: Option<String>,
    /// TV first air date.
    pub first_air_date: Option<String>,
    /// Movie runtime in minutes.
    pub runtime: Option<u32>,
    /// TV episode runtimes in minutes.
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

impl MediaDetails {
    /// Title for movies, name for TV.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    /// Release or first air date.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
            .filter(|d| !d.is_empty())
    }

    /// Runtime in minutes (movie runtime, else first episode runtime).
    #[must_use]
    pub fn runtime_minutes(&self) -> Option<u32> {
        self.runtime
            .filter(|m| *m > 0)
            .or_else(|| self.episode_run_time.first().copied())
    }
}

// --- Credits ---

/// Response from `{media}/{id}/credits`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    /// Cast, in billing order.
    #[serde(default)]
    pub cast: Vec<CastMember>,
    /// Crew.
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

/// Cast entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    /// Person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Character played.
    pub character: Option<String>,
    /// Profile image path.
    pub profile_path: Option<String>,
}

/// Crew entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CrewMember {
    /// Person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Job (e.g. "Director", "Screenplay").
    pub job: String,
    /// Department.
    pub department: Option<String>,
}

// --- Videos ---

/// Response from `{media}/{id}/videos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoList {
    /// Videos.
    #[serde(default)]
    pub results: Vec<Video>,
}

/// Video entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    /// Video name.
    pub name: String,
    /// Site key (e.g. `YouTube` video ID).
    pub key: String,
    /// Hosting site.
    pub site: String,
    /// Video type (e.g. "Trailer", "Teaser").
    #[serde(rename = "type")]
    pub kind: String,
    /// Official flag.
    #[serde(default)]
    pub official: bool,
}

impl Video {
    /// Watch URL for `YouTube` videos.
    #[must_use]
    pub fn watch_url(&self) -> Option<String> {
        (self.site == "YouTube").then(|| format!("https://www.youtube.com/watch?v={}", self.key))
    }
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    pub success: bool,
}
