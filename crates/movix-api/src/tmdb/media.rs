//! Media type, trending window and discover filters.

use std::fmt;
use std::str::FromStr;

use super::params::QueryParams;

/// Error for a string that names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

/// Browsable media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// Movies (`movie`).
    Movie,
    /// TV series (`tv`).
    Tv,
}

impl MediaType {
    /// Path segment used by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }

    /// Plural display label (`Movies`, `TV Shows`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movies",
            Self::Tv => "TV Shows",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(Self::Movie),
            "tv" => Ok(Self::Tv),
            other => Err(UnknownVariant {
                kind: "media type",
                value: String::from(other),
                expected: "movie, tv",
            }),
        }
    }
}

/// Trending time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeWindow {
    /// Last 24 hours.
    #[default]
    Day,
    /// Last 7 days.
    Week,
}

impl TimeWindow {
    /// Path segment used by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            other => Err(UnknownVariant {
                kind: "time window",
                value: String::from(other),
                expected: "day, week",
            }),
        }
    }
}

/// Sort order for `discover` listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortBy {
    /// Most popular first.
    PopularityDesc,
    /// Highest rated first.
    VoteAverageDesc,
    /// Newest release first.
    ReleaseDateDesc,
    /// Title A-Z.
    TitleAsc,
}

impl SortBy {
    /// All sort orders, in menu order.
    pub const ALL: [Self; 4] = [
        Self::PopularityDesc,
        Self::VoteAverageDesc,
        Self::ReleaseDateDesc,
        Self::TitleAsc,
    ];

    /// API value for `sort_by`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PopularityDesc => "popularity.desc",
            Self::VoteAverageDesc => "vote_average.desc",
            Self::ReleaseDateDesc => "primary_release_date.desc",
            Self::TitleAsc => "original_title.asc",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "sort order",
                value: String::from(s),
                expected: "popularity.desc, vote_average.desc, primary_release_date.desc, original_title.asc",
            })
    }
}

/// Filters for the `discover/{media}` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverParams {
    /// Result page (default: 1).
    pub page: u32,
    /// Genre IDs that must all match.
    pub with_genres: Vec<u32>,
    /// Sort order (API default when `None`).
    pub sort_by: Option<SortBy>,
}

impl Default for DiscoverParams {
    fn default() -> Self {
        Self {
            page: 1,
            with_genres: Vec::new(),
            sort_by: None,
        }
    }
}

impl DiscoverParams {
    /// Sets the page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the genre filter.
    #[must_use]
    pub fn with_genres(mut self, genres: impl IntoIterator<Item = u32>) -> Self {
        self.with_genres = genres.into_iter().collect();
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub const fn sort_by(mut self, sort: SortBy) -> Self {
        self.sort_by = Some(sort);
        self
    }

    /// Converts the filters into query parameters.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new().with("page", self.page);
        if !self.with_genres.is_empty() {
            let genres = self
                .with_genres
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            query.insert("with_genres", genres);
        }
        if let Some(sort) = self.sort_by {
            query.insert("sort_by", sort.as_str());
        }
        query
    }
}
