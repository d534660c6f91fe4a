mod cli;

use clap::Parser;
use cli::{Cli, Command};
use dialoguer::{Input, Select};
use serde::Serialize;
use show_finder::{
    CatalogConfig, DisplayArea, ProgressEvent, ShowFinderError, TvMazeCatalog,
    episodes_and_display, render_episodes, render_shows, search_and_display,
};
use std::io::{self, Write};
use std::process;
use tracing_subscriber::EnvFilter;

/// Sets up logging to stderr; `RUST_LOG` takes precedence over `-v`
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("show_finder={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

/// Handles progress events and prints formatted output to stderr
fn handle_progress_event(event: ProgressEvent) {
    match event {
        ProgressEvent::Searching { term } => {
            eprintln!("Searching for '{}'...", term);
        }
        ProgressEvent::ShowsFound { term, count } => {
            eprintln!("Found {} show(s) for '{}'\n", count, term);
        }
        ProgressEvent::FetchingEpisodes { show_id } => {
            eprintln!("Retrieving episodes of show {}...", show_id);
        }
        ProgressEvent::EpisodesFetched { show_id, count } => {
            eprintln!("Found {} episode(s) for show {}\n", count, show_id);
        }
        ProgressEvent::StaleResponseDiscarded { ticket } => {
            eprintln!("Ignoring outdated response {}", ticket);
        }
    }
}

fn write_json<T: Serialize + ?Sized>(value: &T) -> Result<(), ShowFinderError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::from)?;
    writeln!(stdout)?;
    Ok(())
}

/// Repeatedly asks for a search term, lets the user pick a show from the
/// results and lists its episodes. An empty term ends the session.
fn run_interactive<F>(
    catalog: &TvMazeCatalog,
    display: &DisplayArea,
    mut progress: F,
) -> Result<(), ShowFinderError>
where
    F: FnMut(ProgressEvent),
{
    loop {
        let term = Input::<String>::new()
            .with_prompt("Search for a show (empty to quit)")
            .allow_empty(true)
            .interact_text()
            .map_err(io::Error::other)?;

        if term.trim().is_empty() {
            return Ok(());
        }

        // Lookup failures are reported and the session continues
        if let Err(e) = search_and_display(catalog, display, &term, &mut progress) {
            eprintln!("Error: {}", e);
            continue;
        }

        let shows = display.shows();
        if shows.is_empty() {
            render_shows(&mut io::stdout(), &shows)?;
            continue;
        }

        let mut items: Vec<String> = shows
            .iter()
            .map(|show| format!("{} [{}]", show.name, show.id))
            .collect();
        items.push("New search".to_string());

        loop {
            let selection = Select::new()
                .with_prompt("Pick a show to list its episodes")
                .items(&items)
                .default(0)
                .interact_opt()
                .map_err(io::Error::other)?;

            let show = match selection {
                Some(index) if index < shows.len() => &shows[index],
                _ => break,
            };

            if let Err(e) = episodes_and_display(catalog, display, show.id, &mut progress) {
                eprintln!("Error: {}", e);
                continue;
            }

            if let Some(view) = display.episodes() {
                let mut stdout = io::stdout().lock();
                render_episodes(&mut stdout, Some(show), &view.episodes)?;
                writeln!(stdout)?;
            }
        }
    }
}

fn run(cli: Cli) -> Result<(), ShowFinderError> {
    let config = CatalogConfig::new(&cli.base_url, &cli.fallback_image)?;
    let catalog = TvMazeCatalog::with_config(config);
    let display = DisplayArea::new();

    let quiet = cli.quiet;
    let progress = move |event: ProgressEvent| {
        if !quiet {
            handle_progress_event(event);
        }
    };

    match cli.command {
        Command::Search { term } => {
            search_and_display(&catalog, &display, &term.join(" "), progress)?;
            let shows = display.shows();
            if cli.json {
                write_json(&shows)?;
            } else {
                render_shows(&mut io::stdout().lock(), &shows)?;
            }
        }
        Command::Episodes { show_id } => {
            episodes_and_display(&catalog, &display, show_id, progress)?;
            let episodes = display
                .episodes()
                .map(|view| view.episodes)
                .unwrap_or_default();
            if cli.json {
                write_json(&episodes)?;
            } else {
                render_episodes(&mut io::stdout().lock(), None, &episodes)?;
            }
        }
        Command::Interactive => run_interactive(&catalog, &display, progress)?,
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("\nError: {}", e);
        process::exit(1);
    }
}
