use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::Duration;

use quiz_core::{CatalogSource, LeaderboardStore};
use quiz_types::{Champion, HighScoreRecord};

pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).build()
}

async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!("{} request returned status: {}", what, status);
        bail!("{} request failed with status {}", what, status);
    }

    response
        .json()
        .await
        .with_context(|| format!("Failed to parse {} response", what))
}

/// Champion catalog served by the remote API at `{base_url}/champions`
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch_champions(&self) -> Result<Vec<Champion>> {
        let url = format!("{}/champions", self.base_url);
        tracing::debug!("Fetching champions from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;
        let champions: Vec<Champion> = read_json(response, "champions").await?;

        tracing::info!("Fetched {} champions", champions.len());
        Ok(champions)
    }
}

#[derive(Serialize)]
struct HighScoreBody<'a> {
    name: &'a str,
    score: u32,
}

/// Remote high score collection at `{base_url}/highscores`
pub struct HttpLeaderboard {
    client: Client,
    base_url: String,
}

impl HttpLeaderboard {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/highscores", self.base_url)
    }
}

#[async_trait]
impl LeaderboardStore for HttpLeaderboard {
    async fn fetch_high_scores(&self) -> Result<Vec<HighScoreRecord>> {
        let url = self.collection_url();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;
        read_json(response, "high scores").await
    }

    async fn create_high_score(&self, player_name: &str, score: u32) -> Result<HighScoreRecord> {
        let url = self.collection_url();
        let response = self
            .client
            .post(&url)
            .json(&HighScoreBody {
                name: player_name,
                score,
            })
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        let record: HighScoreRecord = read_json(response, "create high score").await?;
        tracing::info!("Posted high score {} for {}", record.score, record.player_name);
        Ok(record)
    }

    async fn update_high_score(&self, id: &str, player_name: &str, score: u32) -> Result<HighScoreRecord> {
        let url = format!("{}/{}", self.collection_url(), id);
        let response = self
            .client
            .put(&url)
            .json(&HighScoreBody {
                name: player_name,
                score,
            })
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        let record: HighScoreRecord = read_json(response, "update high score").await?;
        tracing::info!("Updated high score {} for {}", record.score, record.player_name);
        Ok(record)
    }
}

/// Champion catalog bundled as a JSON array on disk
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl CatalogSource for FileCatalog {
    async fn fetch_champions(&self) -> Result<Vec<Champion>> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let champions: Vec<Champion> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;

        tracing::info!("Loaded {} champions from {}", champions.len(), self.path.display());
        Ok(champions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_file_catalog_reads_champion_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"Zed","name":"Zed","tags":["Assassin"]}},{{"id":"Kaisa","name":"Kai'Sa"}}]"#
        )
        .unwrap();

        let champions = FileCatalog::new(file.path()).fetch_champions().await.unwrap();
        let names: Vec<&str> = champions.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Kai'Sa"]);
    }

    #[tokio::test]
    async fn test_file_catalog_missing_file_is_an_error() {
        let result = FileCatalog::new("/definitely/not/here.json").fetch_champions().await;
        assert!(result.unwrap_err().to_string().contains("Failed to read"));
    }

    #[test]
    fn test_base_urls_drop_trailing_slash() {
        let client = Client::new();
        let leaderboard = HttpLeaderboard::new(client.clone(), "https://scores.example.test/");
        assert_eq!(leaderboard.collection_url(), "https://scores.example.test/highscores");

        let catalog = HttpCatalog::new(client, "https://api.example.test//");
        assert_eq!(catalog.base_url, "https://api.example.test");
    }
}
