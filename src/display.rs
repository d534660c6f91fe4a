//! Display area module
//!
//! The display area is the one resource shared by all user actions: a show
//! list and an episodes area that is only visible after episodes have been
//! requested. Every completed request replaces its part wholesale. Request
//! tickets keep a slow, older response from overwriting newer content.

use crate::catalog::{Episode, Show, ShowId};
use crate::request_sequence::{RequestSequencer, RequestTicket};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::warn;

/// The episodes currently listed for a single show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodesView {
    /// The show the episodes belong to
    pub show_id: ShowId,
    /// Episodes in catalog order
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Default)]
struct DisplayState {
    shows: Vec<Show>,
    /// `None` while the episodes area is hidden
    episodes: Option<EpisodesView>,
}

/// Handle to the display area
///
/// All methods take `&self`, so a single display area can be shared between
/// threads (e.g. behind an `Arc`) while requests are in flight.
#[derive(Debug, Default)]
pub struct DisplayArea {
    state: Mutex<DisplayState>,
    search_requests: RequestSequencer,
    episode_requests: RequestSequencer,
}

impl DisplayArea {
    /// Creates an empty display area with the episodes area hidden
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, DisplayState> {
        // State is replaced wholesale, so a panic mid-update cannot leave it torn
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a search request.
    ///
    /// Outstanding episode requests are invalidated as well, since the list
    /// they would be shown next to is about to be replaced.
    pub fn begin_search(&self) -> RequestTicket {
        self.episode_requests.issue();
        self.search_requests.issue()
    }

    /// Replaces the show list and hides the episodes area.
    ///
    /// # Returns
    ///
    /// `false` if a newer search was started after `ticket`; the shows are
    /// discarded in that case and the display is left untouched.
    pub fn present_shows(&self, ticket: RequestTicket, shows: Vec<Show>) -> bool {
        let mut state = self.state();

        if !self.search_requests.is_current(ticket) {
            warn!(%ticket, "discarding stale search response");
            return false;
        }

        state.shows = shows;
        state.episodes = None;
        true
    }

    /// Starts an episode list request for the given show.
    pub fn begin_episodes(&self, show_id: ShowId) -> RequestTicket {
        let ticket = self.episode_requests.issue();
        tracing::debug!(%ticket, show_id, "episode request started");
        ticket
    }

    /// Replaces and reveals the episodes area.
    ///
    /// Returns `false` and leaves the display untouched if the ticket has been
    /// superseded by a newer episode request or by a new search.
    pub fn present_episodes(
        &self,
        ticket: RequestTicket,
        show_id: ShowId,
        episodes: Vec<Episode>,
    ) -> bool {
        let mut state = self.state();

        if !self.episode_requests.is_current(ticket) {
            warn!(%ticket, show_id, "discarding stale episodes response");
            return false;
        }

        state.episodes = Some(EpisodesView { show_id, episodes });
        true
    }

    /// Returns a copy of the current show list
    pub fn shows(&self) -> Vec<Show> {
        self.state().shows.clone()
    }

    /// Returns a copy of the episodes area, or `None` while it is hidden
    pub fn episodes(&self) -> Option<EpisodesView> {
        self.state().episodes.clone()
    }

    /// Looks up a show in the current list by its identifier
    pub fn find_show(&self, show_id: ShowId) -> Option<Show> {
        self.state().shows.iter().find(|s| s.id == show_id).cloned()
    }
}
