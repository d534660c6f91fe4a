//! Command line interface definition

use clap::{ArgAction, Parser, Subcommand};
use show_finder::{DEFAULT_BASE_URL, DEFAULT_FALLBACK_IMAGE, ShowId};

/// Search TV shows on TVMaze and browse their episode lists
#[derive(Parser, Debug)]
#[command(
    name = "show_finder",
    version,
    about = "Search TV shows on TVMaze and browse their episode lists",
    after_help = "EXAMPLES:\n\
                  show_finder search lost                Search for shows\n\
                  show_finder episodes 123 --json        List episodes as JSON\n\
                  show_finder interactive                Search and browse interactively"
)]
pub struct Cli {
    /// Print results as JSON
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress progress output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Base URL of the catalog API
    #[arg(long, global = true, env = "SHOW_FINDER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Image URL used for shows without an image
    #[arg(
        long,
        global = true,
        env = "SHOW_FINDER_FALLBACK_IMAGE",
        default_value = DEFAULT_FALLBACK_IMAGE
    )]
    pub fallback_image: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Search for shows matching a term
    #[command(visible_alias = "s")]
    Search {
        /// Search term; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },

    /// List the episodes of a show
    #[command(visible_alias = "e")]
    Episodes {
        /// Catalog identifier of the show
        show_id: ShowId,
    },

    /// Search and browse episodes interactively
    #[command(visible_alias = "i")]
    Interactive,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_collects_words() {
        let cli = Cli::try_parse_from(["show_finder", "search", "the", "wire"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Search {
                term: vec!["the".to_string(), "wire".to_string()]
            }
        );
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_episodes_with_global_flags() {
        let cli =
            Cli::try_parse_from(["show_finder", "episodes", "42", "--json", "-vv", "-q"]).unwrap();
        assert_eq!(cli.command, Command::Episodes { show_id: 42 });
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_base_url_override() {
        let cli = Cli::try_parse_from([
            "show_finder",
            "--base-url",
            "http://localhost:8080",
            "interactive",
        ])
        .unwrap();
        assert_eq!(cli.base_url, "http://localhost:8080");
        assert_eq!(cli.command, Command::Interactive);
    }

    #[test]
    fn test_search_requires_term() {
        assert!(Cli::try_parse_from(["show_finder", "search"]).is_err());
    }

    #[test]
    fn test_episodes_requires_numeric_id() {
        assert!(Cli::try_parse_from(["show_finder", "episodes", "lost"]).is_err());
    }
}
