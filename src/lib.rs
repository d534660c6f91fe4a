//! ShowFinder - Search TV shows and browse their episodes
//!
//! This library looks shows up in a catalog (TVMaze by default), normalizes
//! the results into `Show` and `Episode` records, and keeps them in a
//! `DisplayArea` that each user action replaces wholesale.

mod catalog;
mod display;
mod render;
mod request_sequence;

pub use catalog::{
    CatalogConfig, CatalogError, DEFAULT_BASE_URL, DEFAULT_FALLBACK_IMAGE, Episode, Show,
    ShowCatalog, ShowId, TvMazeCatalog,
};
pub use display::{DisplayArea, EpisodesView};
pub use render::{episode_label, render_display, render_episodes, render_shows};
pub use request_sequence::RequestTicket;

use std::io;
use thiserror::Error;

/// Progress event emitted while a user action runs
///
/// These events allow library users to report what is happening, or to
/// ignore it entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A show search was sent to the catalog
    Searching { term: String },

    /// The catalog answered a search
    ShowsFound { term: String, count: usize },

    /// An episode list was requested
    FetchingEpisodes { show_id: ShowId },

    /// The catalog answered an episode list request
    EpisodesFetched { show_id: ShowId, count: usize },

    /// A response arrived after a newer request had been started and was
    /// not shown
    StaleResponseDiscarded { ticket: RequestTicket },
}

/// Top-level error type for ShowFinder operations
#[derive(Debug, Error)]
pub enum ShowFinderError {
    /// Error during a catalog lookup
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Searches the catalog and puts the results into the display area
///
/// The search takes a request ticket before it is sent. If another search is
/// started on the same display area while this one is in flight, the older
/// results are dropped instead of overwriting the newer ones.
///
/// # Arguments
///
/// * `catalog` - The catalog to search
/// * `display` - The display area to update
/// * `term` - The search term entered by the user
/// * `progress_callback` - Closure called with progress events
///
/// # Returns
///
/// `true` if the results were shown, `false` if they were discarded as stale
///
/// # Examples
///
/// ```no_run
/// use show_finder::{DisplayArea, TvMazeCatalog, render_display, search_and_display};
///
/// let catalog = TvMazeCatalog::new();
/// let display = DisplayArea::new();
///
/// search_and_display(&catalog, &display, "lost", |_| {}).unwrap();
/// render_display(&mut std::io::stdout(), &display).unwrap();
/// ```
pub fn search_and_display<C, F>(
    catalog: &C,
    display: &DisplayArea,
    term: &str,
    mut progress_callback: F,
) -> Result<bool, ShowFinderError>
where
    C: ShowCatalog + ?Sized,
    F: FnMut(ProgressEvent),
{
    let ticket = display.begin_search();

    progress_callback(ProgressEvent::Searching {
        term: term.to_string(),
    });

    let shows = catalog.search_shows(term)?;

    progress_callback(ProgressEvent::ShowsFound {
        term: term.to_string(),
        count: shows.len(),
    });

    let applied = display.present_shows(ticket, shows);
    if !applied {
        progress_callback(ProgressEvent::StaleResponseDiscarded { ticket });
    }

    Ok(applied)
}

/// Fetches a show's episodes and reveals them in the display area
///
/// Works like [`search_and_display`]: a response that was overtaken by a
/// newer episode request, or by a new search, is discarded.
///
/// # Returns
///
/// `true` if the episodes were shown, `false` if they were discarded as stale
pub fn episodes_and_display<C, F>(
    catalog: &C,
    display: &DisplayArea,
    show_id: ShowId,
    mut progress_callback: F,
) -> Result<bool, ShowFinderError>
where
    C: ShowCatalog + ?Sized,
    F: FnMut(ProgressEvent),
{
    let ticket = display.begin_episodes(show_id);

    progress_callback(ProgressEvent::FetchingEpisodes { show_id });

    let episodes = catalog.fetch_episodes(show_id)?;

    progress_callback(ProgressEvent::EpisodesFetched {
        show_id,
        count: episodes.len(),
    });

    let applied = display.present_episodes(ticket, show_id, episodes);
    if !applied {
        progress_callback(ProgressEvent::StaleResponseDiscarded { ticket });
    }

    Ok(applied)
}
