/// TVMaze API response types for deserialization.
///
/// These structures mirror the JSON response format from the TVMaze API.
use serde::Deserialize;

/// A single entry of the `/search/shows` response.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeSearchResult {
    /// The matched show; the relevance score next to it is not used
    pub show: TvMazeShow,
}

/// A show as embedded in search results.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeShow {
    pub id: u64,
    /// The name of the TV show
    pub name: String,
    /// Show summary in HTML format (may be null)
    pub summary: Option<String>,
    /// Poster image, null for shows without one
    pub image: Option<TvMazeImage>,
}

/// Image links in two resolutions.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeImage {
    pub medium: Option<String>,
    pub original: Option<String>,
}

/// A single episode from the `/shows/{id}/episodes` endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeEpisode {
    pub id: u64,
    /// Episode title (may be null for episodes without a title)
    pub name: Option<String>,
    /// Season number
    pub season: u32,
    /// Episode number within the season (null for specials)
    pub number: Option<u32>,
}
