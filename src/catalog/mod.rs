/// Data structures and traits for TV show catalog lookups.
///
/// This module provides the normalized `Show` and `Episode` records, the
/// configuration for catalog clients, and the `ShowCatalog` trait that
/// catalog implementations fulfil.
mod tvmaze;
mod tvmaze_types;

pub use tvmaze::TvMazeCatalog;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base URL of the public TVMaze API
pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// Placeholder image used for shows the catalog has no image for
pub const DEFAULT_FALLBACK_IMAGE: &str = "https://static.tvmaze.com/images/no-img/no-img-portrait-text.png";

/// Identifier of a show in the catalog
pub type ShowId = u64;

/// Errors that can occur during catalog lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Request to the catalog failed or returned a non-success status
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Failed to parse the catalog's JSON response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The requested show does not exist
    #[error("Show not found: {0}")]
    ShowNotFound(ShowId),

    /// The search term was empty or whitespace only
    #[error("Search term must not be empty")]
    EmptyQuery,

    /// A configured URL could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A television show as returned by a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    /// Catalog identifier, used to request the episode list
    pub id: ShowId,
    /// The show's title
    pub name: String,
    /// Summary as provided by the catalog; may contain HTML markup
    pub summary: String,
    /// Poster image URL, always a valid URL
    pub image: String,
}

/// A single episode of a show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Catalog identifier of the episode
    pub id: u64,
    /// The episode title
    pub name: String,
    /// The season number this episode belongs to
    pub season: u32,
    /// The episode number within the season, `None` for specials
    pub number: Option<u32>,
}

/// Connection settings for a catalog client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    base_url: String,
    fallback_image: String,
}

impl CatalogConfig {
    /// Creates a configuration after checking that both values are valid URLs.
    ///
    /// A trailing slash on `base_url` is dropped so endpoint paths can be
    /// appended directly.
    pub fn new(base_url: &str, fallback_image: &str) -> Result<Self, CatalogError> {
        Url::parse(base_url)
            .map_err(|e| CatalogError::InvalidConfig(format!("base URL '{}': {}", base_url, e)))?;
        Url::parse(fallback_image).map_err(|e| {
            CatalogError::InvalidConfig(format!("fallback image '{}': {}", fallback_image, e))
        })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            fallback_image: fallback_image.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn fallback_image(&self) -> &str {
        &self.fallback_image
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            fallback_image: DEFAULT_FALLBACK_IMAGE.to_string(),
        }
    }
}

/// Trait for catalogs that can look up shows and their episodes.
///
/// Each call is an independent request/response cycle; implementors keep no
/// state between calls.
pub trait ShowCatalog {
    /// Searches the catalog for shows matching `term`.
    ///
    /// # Returns
    ///
    /// One `Show` per upstream result, in upstream order
    ///
    /// # Errors
    ///
    /// `EmptyQuery` for a blank term, otherwise a request or parse failure.
    fn search_shows(&self, term: &str) -> Result<Vec<Show>, CatalogError>;

    /// Fetches the episode list of the show with the given identifier.
    ///
    /// Episodes are returned in upstream order without re-sorting.
    fn fetch_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, CatalogError>;
}
