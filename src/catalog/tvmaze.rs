/// TVMaze catalog implementation.
use super::tvmaze_types::{TvMazeEpisode, TvMazeImage, TvMazeSearchResult, TvMazeShow};
use super::{CatalogConfig, CatalogError, Episode, Show, ShowCatalog, ShowId};
use reqwest::Url;
use reqwest::blocking::Response;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Catalog client for the TVMaze API.
///
/// Shows are found through the `search/shows` endpoint and episode lists
/// come from `shows/{id}/episodes`.
pub struct TvMazeCatalog {
    client: reqwest::blocking::Client,
    config: CatalogConfig,
}

impl TvMazeCatalog {
    /// Creates a TVMaze catalog against the public API.
    pub fn new() -> Self {
        Self::with_config(CatalogConfig::default())
    }

    /// Creates a TVMaze catalog with custom connection settings.
    pub fn with_config(config: CatalogConfig) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            config,
        }
    }

    /// Picks the image URL for a show.
    ///
    /// Prefers the medium resolution, then the original. Missing or
    /// unparseable links fall through to the configured fallback.
    fn select_image(&self, image: Option<TvMazeImage>) -> String {
        let Some(image) = image else {
            return self.config.fallback_image().to_string();
        };

        [image.medium, image.original]
            .into_iter()
            .flatten()
            .find(|url| match Url::parse(url) {
                Ok(_) => true,
                Err(e) => {
                    debug!(url = %url, error = %e, "ignoring unparseable image URL");
                    false
                }
            })
            .unwrap_or_else(|| self.config.fallback_image().to_string())
    }

    /// Converts a TVMaze show to our internal Show structure.
    fn convert_show(&self, tvmaze_show: TvMazeShow) -> Show {
        Show {
            id: tvmaze_show.id,
            name: tvmaze_show.name,
            summary: tvmaze_show.summary.unwrap_or_default(),
            image: self.select_image(tvmaze_show.image),
        }
    }

    /// Converts a TVMaze episode to our internal Episode structure.
    fn convert_episode(tvmaze_episode: TvMazeEpisode) -> Episode {
        Episode {
            id: tvmaze_episode.id,
            name: tvmaze_episode.name.unwrap_or_default(),
            season: tvmaze_episode.season,
            number: tvmaze_episode.number,
        }
    }

    /// Checks the status and decodes the JSON body of a response.
    fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, CatalogError> {
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "received response");

        if !status.is_success() {
            return Err(CatalogError::RequestError(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response
            .text()
            .map_err(|e| CatalogError::RequestError(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| CatalogError::ParseError(e.to_string()))
    }
}

impl Default for TvMazeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ShowCatalog for TvMazeCatalog {
    fn search_shows(&self, term: &str) -> Result<Vec<Show>, CatalogError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(CatalogError::EmptyQuery);
        }

        let url = format!("{}/search/shows", self.config.base_url());
        debug!(url = %url, term, "searching shows");

        let response = self
            .client
            .get(&url)
            .query(&[("q", term)])
            .send()
            .map_err(|e| CatalogError::RequestError(e.to_string()))?;

        let results: Vec<TvMazeSearchResult> = Self::read_json(response)?;

        Ok(results
            .into_iter()
            .map(|result| self.convert_show(result.show))
            .collect())
    }

    fn fetch_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, CatalogError> {
        let url = format!("{}/shows/{}/episodes", self.config.base_url(), show_id);
        debug!(url = %url, show_id, "fetching episodes");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| CatalogError::RequestError(e.to_string()))?;

        if response.status() == 404 {
            return Err(CatalogError::ShowNotFound(show_id));
        }

        let episodes: Vec<TvMazeEpisode> = Self::read_json(response)?;

        Ok(episodes.into_iter().map(Self::convert_episode).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DEFAULT_FALLBACK_IMAGE;
    use mockito::{Matcher, Server};

    fn catalog_for(server: &Server) -> TvMazeCatalog {
        let config = CatalogConfig::new(&server.url(), DEFAULT_FALLBACK_IMAGE).unwrap();
        TvMazeCatalog::with_config(config)
    }

    #[test]
    fn test_search_without_image_uses_fallback() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/search/shows")
            .match_query(Matcher::UrlEncoded("q".into(), "lost".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"score":0.9,"show":{"id":1,"name":"Lost","summary":"<p>s</p>","image":null}}]"#)
            .create();

        let shows = catalog_for(&server).search_shows("lost").unwrap();

        mock.assert();
        assert_eq!(
            shows,
            vec![Show {
                id: 1,
                name: "Lost".to_string(),
                summary: "<p>s</p>".to_string(),
                image: DEFAULT_FALLBACK_IMAGE.to_string(),
            }]
        );
    }

    #[test]
    fn test_search_prefers_medium_image_and_keeps_order() {
        let mut server = Server::new();
        let body = r#"[
            {"score":0.9,"show":{"id":3,"name":"Lost Girl","summary":null,
                "image":{"medium":"https://img.example/m3.jpg","original":"https://img.example/o3.jpg"}}},
            {"score":0.8,"show":{"id":1,"name":"Lost","summary":"<p>Island</p>",
                "image":{"medium":"https://img.example/m1.jpg","original":"https://img.example/o1.jpg"}}},
            {"score":0.5,"show":{"id":7,"name":"Lost in Space","summary":"","image":null}}
        ]"#;
        let mock = server
            .mock("GET", "/search/shows")
            .match_query(Matcher::UrlEncoded("q".into(), "lost".into()))
            .with_status(200)
            .with_body(body)
            .create();

        let shows = catalog_for(&server).search_shows("lost").unwrap();

        mock.assert();
        let ids: Vec<ShowId> = shows.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 1, 7]);
        assert_eq!(shows[0].image, "https://img.example/m3.jpg");
        assert_eq!(shows[0].summary, "");
        assert_eq!(shows[1].image, "https://img.example/m1.jpg");
        assert_eq!(shows[2].image, DEFAULT_FALLBACK_IMAGE);
    }

    #[test]
    fn test_search_trims_term() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/search/shows")
            .match_query(Matcher::UrlEncoded("q".into(), "the wire".into()))
            .with_status(200)
            .with_body("[]")
            .create();

        let shows = catalog_for(&server).search_shows("  the wire ").unwrap();

        mock.assert();
        assert!(shows.is_empty());
    }

    #[test]
    fn test_search_empty_term_sends_no_request() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create();

        let result = catalog_for(&server).search_shows("   ");

        assert!(matches!(result, Err(CatalogError::EmptyQuery)));
        mock.assert();
    }

    #[test]
    fn test_search_unexpected_shape_is_parse_error() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/search/shows")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"message":"not a list"}"#)
            .create();

        let result = catalog_for(&server).search_shows("lost");

        assert!(matches!(result, Err(CatalogError::ParseError(_))));
    }

    #[test]
    fn test_search_server_error_is_request_error() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/search/shows")
            .match_query(Matcher::Any)
            .with_status(500)
            .create();

        let result = catalog_for(&server).search_shows("lost");

        match result {
            Err(CatalogError::RequestError(message)) => assert!(message.contains("500")),
            other => panic!("expected request error, got {:?}", other),
        }
    }

    #[test]
    fn test_unreachable_catalog_is_request_error() {
        // Port 9 (discard) is not expected to accept HTTP connections
        let config = CatalogConfig::new("http://127.0.0.1:9", DEFAULT_FALLBACK_IMAGE).unwrap();
        let result = TvMazeCatalog::with_config(config).search_shows("lost");

        assert!(matches!(result, Err(CatalogError::RequestError(_))));
    }

    #[test]
    fn test_fetch_episodes_copies_fields_verbatim() {
        let mut server = Server::new();
        let body = r#"[
            {"id":10,"name":"Pilot","season":1,"number":1,"airdate":"2004-09-22"},
            {"id":11,"name":"Tabula Rasa","season":1,"number":3},
            {"id":12,"name":null,"season":2,"number":null}
        ]"#;
        let mock = server
            .mock("GET", "/shows/42/episodes")
            .with_status(200)
            .with_body(body)
            .create();

        let episodes = catalog_for(&server).fetch_episodes(42).unwrap();

        mock.assert();
        assert_eq!(
            episodes,
            vec![
                Episode {
                    id: 10,
                    name: "Pilot".to_string(),
                    season: 1,
                    number: Some(1),
                },
                Episode {
                    id: 11,
                    name: "Tabula Rasa".to_string(),
                    season: 1,
                    number: Some(3),
                },
                Episode {
                    id: 12,
                    name: String::new(),
                    season: 2,
                    number: None,
                },
            ]
        );
    }

    #[test]
    fn test_fetch_episodes_unknown_show() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/shows/999/episodes")
            .with_status(404)
            .create();

        let result = catalog_for(&server).fetch_episodes(999);

        assert!(matches!(result, Err(CatalogError::ShowNotFound(999))));
    }

    #[test]
    fn test_select_image_falls_back_to_original() {
        let catalog = TvMazeCatalog::new();
        let image = TvMazeImage {
            medium: None,
            original: Some("https://img.example/o.jpg".to_string()),
        };
        assert_eq!(catalog.select_image(Some(image)), "https://img.example/o.jpg");
    }

    #[test]
    fn test_select_image_skips_invalid_urls() {
        let catalog = TvMazeCatalog::new();
        let image = TvMazeImage {
            medium: Some("not a url".to_string()),
            original: None,
        };
        assert_eq!(catalog.select_image(Some(image)), DEFAULT_FALLBACK_IMAGE);
        assert_eq!(catalog.select_image(None), DEFAULT_FALLBACK_IMAGE);
    }
}
