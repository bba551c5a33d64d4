use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use quiz_core::model::Leaderboard;

use crate::error::DataError;
use crate::repository::LeaderboardRepository;
use crate::wire::{ApiResponse, LeaderboardDataDto};

const DEFAULT_BASE_URL: &str = "https://api.quizapp.example";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the remote API.
#[derive(Clone, Debug)]
pub struct RemoteConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Read `QUIZ_API_BASE_URL` and `QUIZ_API_TIMEOUT_SECS`, falling back to
    /// defaults for anything missing or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("QUIZ_API_BASE_URL")
            .ok()
            .and_then(|raw| Url::parse(&raw).ok())
            .unwrap_or_else(|| {
                Url::parse(DEFAULT_BASE_URL).expect("default base url should parse")
            });
        let timeout = env::var("QUIZ_API_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS), Duration::from_secs);
        Self { base_url, timeout }
    }
}

/// Leaderboard reads over HTTP against the real backend.
///
/// Implements the same trait as [`crate::demo::DemoLeaderboard`], so the two
/// swap behind `Arc<dyn LeaderboardRepository>` without touching callers.
#[derive(Clone)]
pub struct RemoteLeaderboard {
    client: Client,
    config: RemoteConfig,
}

impl RemoteLeaderboard {
    /// Build a client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns `DataError::Http` if the client cannot be constructed.
    pub fn new(config: RemoteConfig) -> Result<Self, DataError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> Result<Url, DataError> {
        self.config
            .base_url
            .join(path)
            .map_err(DataError::invalid)
    }

    async fn fetch(&self, url: Url) -> Result<Leaderboard, DataError> {
        debug!(%url, "fetching remote leaderboard");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "remote leaderboard request failed");
            return Err(DataError::Api {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_owned(),
            });
        }

        let envelope: ApiResponse<LeaderboardDataDto> = response.json().await?;
        let (data, pagination) = envelope.into_data()?;
        data.into_domain(pagination)
    }
}

#[async_trait]
impl LeaderboardRepository for RemoteLeaderboard {
    async fn page(&self, page: u32, page_size: u32) -> Result<Leaderboard, DataError> {
        let mut url = self.endpoint("/api/v1/leaderboard")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("page_size", &page_size.to_string());
        self.fetch(url).await
    }

    async fn top(&self, limit: u32) -> Result<Leaderboard, DataError> {
        let mut url = self.endpoint("/api/v1/leaderboard/top")?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        self.fetch(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_paged_endpoint_url() {
        let config = RemoteConfig {
            base_url: Url::parse("https://api.quizapp.example").unwrap(),
            timeout: Duration::from_secs(10),
        };
        let remote = RemoteLeaderboard::new(config).unwrap();
        let mut url = remote.endpoint("/api/v1/leaderboard").unwrap();
        url.query_pairs_mut()
            .append_pair("page", "2")
            .append_pair("page_size", "10");
        assert_eq!(
            url.as_str(),
            "https://api.quizapp.example/api/v1/leaderboard?page=2&page_size=10"
        );
    }
}
