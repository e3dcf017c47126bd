//! Catalog data shared by every page: image base URLs and genre names.

use std::collections::BTreeMap;

use anyhow::Context;

use crate::tmdb::{ApiConfiguration, GenreList, MediaType, TmdbApi};

/// Image size segment used for every image kind.
const IMAGE_SIZE: &str = "original";

/// Absolute image URL prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrls {
    /// Prefix for backdrop paths.
    pub backdrop: String,
    /// Prefix for poster paths.
    pub poster: String,
    /// Prefix for profile paths.
    pub profile: String,
}

impl ImageUrls {
    /// Builds prefixes from the API configuration (full-size images).
    #[must_use]
    pub fn from_configuration(config: &ApiConfiguration) -> Self {
        let prefix = format!("{}{IMAGE_SIZE}", config.images.secure_base_url);
        Self {
            backdrop: prefix.clone(),
            poster: prefix.clone(),
            profile: prefix,
        }
    }

    /// Absolute backdrop URL.
    #[must_use]
    pub fn backdrop_url(&self, path: Option<&str>) -> Option<String> {
        path.map(|p| format!("{}{p}", self.backdrop))
    }

    /// Absolute poster URL.
    #[must_use]
    pub fn poster_url(&self, path: Option<&str>) -> Option<String> {
        path.map(|p| format!("{}{p}", self.poster))
    }

    /// Absolute profile image URL.
    #[must_use]
    pub fn profile_url(&self, path: Option<&str>) -> Option<String> {
        path.map(|p| format!("{}{p}", self.profile))
    }
}

/// Genre id to name lookup across movie and TV genres.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreMap(BTreeMap<u32, String>);

impl GenreMap {
    /// Merges genre lists. Later lists win on id collisions.
    #[must_use]
    pub fn merge(lists: impl IntoIterator<Item = GenreList>) -> Self {
        let map = lists
            .into_iter()
            .flat_map(|list| list.genres)
            .map(|genre| (genre.id, genre.name))
            .collect();
        Self(map)
    }

    /// Name of a genre id.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    /// Names for `ids` in order, skipping unknown ids.
    #[must_use]
    pub fn names(&self, ids: &[u32]) -> Vec<&str> {
        ids.iter().filter_map(|id| self.get(*id)).collect()
    }

    /// Iterates `(id, name)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.0.iter().map(|(id, name)| (*id, name.as_str()))
    }

    /// Number of known genres.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no genres are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Startup catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Image prefixes (`None` when the configuration call failed).
    pub images: Option<ImageUrls>,
    /// Genre names (empty when a genre call failed).
    pub genres: GenreMap,
}

impl Catalog {
    /// Loads image configuration and both genre lists concurrently.
    ///
    /// Failures are logged and leave the affected half empty.
    pub async fn load<A: TmdbApi + Sync>(api: &A) -> Self {
        let (config, genres) = futures::join!(
            api.configuration(),
            futures::future::try_join(api.genres(MediaType::Tv), api.genres(MediaType::Movie)),
        );

        let images = match config.context("failed to load image configuration") {
            Ok(config) => Some(ImageUrls::from_configuration(&config)),
            Err(e) => {
                tracing::error!("{e:#}");
                None
            }
        };

        let genres = match genres.context("failed to load genres") {
            Ok((tv, movie)) => GenreMap::merge([tv, movie]),
            Err(e) => {
                tracing::error!("{e:#}");
                GenreMap::default()
            }
        };

        tracing::debug!(genres = genres.len(), images = images.is_some(), "catalog loaded");
        Self { images, genres }
    }
}
