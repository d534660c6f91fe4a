//! Text rendering of shows and episodes
//!
//! Rendering writes to any `io::Write`, so the same functions serve the
//! terminal and tests.

use crate::catalog::{Episode, Show};
use crate::display::DisplayArea;
use std::io::{self, Write};

/// Converts an HTML summary to a single trimmed line of plain text
fn summary_text(summary: &str) -> String {
    nanohtml2text::html2text(summary)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats the season/episode label of an episode, e.g. `S01E02`
pub fn episode_label(episode: &Episode) -> String {
    match episode.number {
        Some(number) => format!("S{:02}E{:02}", episode.season, number),
        None => format!("S{:02} special", episode.season),
    }
}

/// Writes one block per show: title line, image URL and plain-text summary.
pub fn render_shows<W: Write + ?Sized>(out: &mut W, shows: &[Show]) -> io::Result<()> {
    if shows.is_empty() {
        writeln!(out, "No shows found.")?;
        return Ok(());
    }

    for show in shows {
        writeln!(out, "[{}] {}", show.id, show.name)?;
        writeln!(out, "  Image: {}", show.image)?;

        let summary = summary_text(&show.summary);
        if !summary.is_empty() {
            writeln!(out, "  {}", summary)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Writes the episode list, headed by the show's name when it is known.
pub fn render_episodes<W: Write + ?Sized>(
    out: &mut W,
    show: Option<&Show>,
    episodes: &[Episode],
) -> io::Result<()> {
    if let Some(show) = show {
        writeln!(out, "=== Episodes of {} ===", show.name)?;
    }

    if episodes.is_empty() {
        writeln!(out, "No episodes listed.")?;
        return Ok(());
    }

    for episode in episodes {
        let name = if episode.name.is_empty() {
            "(untitled)"
        } else {
            episode.name.as_str()
        };
        writeln!(out, "{} - {} ({})", episode_label(episode), name, episode.id)?;
    }

    Ok(())
}

/// Writes the whole display area: the show list, then the episodes area if
/// it is visible.
pub fn render_display<W: Write + ?Sized>(out: &mut W, display: &DisplayArea) -> io::Result<()> {
    let shows = display.shows();
    render_shows(out, &shows)?;

    if let Some(view) = display.episodes() {
        let show = shows.iter().find(|s| s.id == view.show_id);
        render_episodes(out, show, &view.episodes)?;
    }

    Ok(())
}
