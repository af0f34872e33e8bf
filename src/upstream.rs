//! Sports-data REST provider.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

use crate::config::SportsConfig;

/// A provider endpoint together with its path parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    GamesByDate(String),
    StandingsByYear(String),
    AllStarsByYear(String),
    RosterByTeam(String),
    PlayerStatsByDate(String),
}

impl Endpoint {
    /// Path segments below the configured base URL.
    pub fn segments(&self) -> [&str; 4] {
        match self {
            Endpoint::GamesByDate(day) => ["scores", "json", "GamesByDate", day.as_str()],
            Endpoint::StandingsByYear(year) => ["scores", "json", "Standings", year.as_str()],
            Endpoint::AllStarsByYear(year) => ["stats", "json", "AllStars", year.as_str()],
            Endpoint::RosterByTeam(team) => ["scores", "json", "PlayersBasic", team.as_str()],
            Endpoint::PlayerStatsByDate(day) => ["stats", "json", "PlayerGameStatsByDate", day.as_str()],
        }
    }

    /// Human-readable path, safe to log.
    pub fn path(&self) -> String {
        self.segments().join("/")
    }
}

/// Fetches raw JSON bodies from the sports-data provider.
#[async_trait]
pub trait SportsData: Send + Sync {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value>;
}

/// HTTP client for the sportsdata.io v3 API.
pub struct SportsDataClient {
    client: reqwest::Client,
    config: SportsConfig,
}

impl SportsDataClient {
    pub fn new(client: reqwest::Client, config: SportsConfig) -> Self {
        Self { client, config }
    }

    fn url_for(&self, endpoint: &Endpoint) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)
            .with_context(|| format!("Invalid sports data base URL: {}", self.config.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Sports data base URL cannot take a path"))?
            .pop_if_empty()
            .extend(endpoint.segments());
        url.query_pairs_mut().append_pair("key", &self.config.api_key);
        Ok(url)
    }
}

#[async_trait]
impl SportsData for SportsDataClient {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value> {
        let url = self.url_for(endpoint)?;
        let path = endpoint.path();
        tracing::debug!("GET {path}");

        // Errors are reported by path; the URL carries the key.
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Failed to call sports data API ({path})"))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Sports data API ({path}) returned {status}: {body}");
        }

        resp.json::<Value>()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Failed to parse sports data response ({path})"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client_for(base_url: String) -> SportsDataClient {
        SportsDataClient::new(
            reqwest::Client::new(),
            SportsConfig {
                base_url,
                api_key: "test-key".to_string(),
            },
        )
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(
            Endpoint::GamesByDate("2023-FEB-12".into()).path(),
            "scores/json/GamesByDate/2023-FEB-12"
        );
        assert_eq!(
            Endpoint::StandingsByYear("2023".into()).path(),
            "scores/json/Standings/2023"
        );
        assert_eq!(
            Endpoint::AllStarsByYear("2023".into()).path(),
            "stats/json/AllStars/2023"
        );
        assert_eq!(
            Endpoint::RosterByTeam("BOS".into()).path(),
            "scores/json/PlayersBasic/BOS"
        );
        assert_eq!(
            Endpoint::PlayerStatsByDate("2023-FEB-12".into()).path(),
            "stats/json/PlayerGameStatsByDate/2023-FEB-12"
        );
    }

    #[test]
    fn test_url_encodes_segments_and_appends_key() {
        let client = client_for("https://api.example.com/v3/nba/".to_string());
        let url = client
            .url_for(&Endpoint::RosterByTeam("B/S".to_string()))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v3/nba/scores/json/PlayersBasic/B%2FS?key=test-key"
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_body_unmodified() {
        let mut server = Server::new_async().await;
        let body = json!([{"GameID": 1, "Status": "Final", "Extra": {"nested": true}}]);
        let mock = server
            .mock("GET", "/v3/nba/scores/json/GamesByDate/2023-FEB-12")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = client_for(format!("{}/v3/nba", server.url()));
        let result = client
            .fetch(&Endpoint::GamesByDate("2023-FEB-12".into()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result, body);
    }

    #[tokio::test]
    async fn test_fetch_fails_on_error_status() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/scores/json/Standings/2023")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body("Access denied")
            .create_async()
            .await;

        let client = client_for(server.url());
        let err = client
            .fetch(&Endpoint::StandingsByYear("2023".into()))
            .await
            .unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("401"));
        assert!(!msg.contains("test-key"));
    }

    #[tokio::test]
    async fn test_fetch_fails_on_malformed_json() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/stats/json/AllStars/2023")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client = client_for(server.url());
        let err = client
            .fetch(&Endpoint::AllStarsByYear("2023".into()))
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse"));
    }
}
