use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, error, instrument};

use crate::{error::AppError, profile::{ProfileSummary, UserResponse}, validation::validate_input_username};

/// Looks up public profile data by username
///
/// Failures of any kind come back as `None`; implementations log the cause.
#[async_trait]
pub trait ProfileLookup: Send + Sync {
    async fn search(&self, username: &str) -> Option<ProfileSummary>;
}

/// Settings for the GitHub REST client
#[derive(Debug, Clone)]
pub struct GithubLookupConfig {
    /// API root, `https://api.github.com` in production
    pub base_url: String,
    /// Sent as `User-Agent`, which GitHub requires
    pub user_agent: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for GithubLookupConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            user_agent: concat!("ghfaves/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Profile lookup against the GitHub users API
pub struct GithubLookup {
    http: Client,
    base_url: String,
}

impl GithubLookup {
    pub fn new(config: GithubLookupConfig) -> Result<Self, AppError> {
        let http: Client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn user_url(&self, username: &str) -> String {
        format!("{}/users/{}", self.base_url, username)
    }
}

#[async_trait]
impl ProfileLookup for GithubLookup {
    #[instrument(skip(self))]
    async fn search(&self, username: &str) -> Option<ProfileSummary> {
        if let Err(err) = validate_input_username(username) {
            error!(error = %err, "refusing lookup for malformed username");
            return None;
        }

        let url: String = self.user_url(username);
        let response = match self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                error!(%url, error = %err, "github api unreachable");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            error!(%url, %status, "github api returned an error status");
            return None;
        }

        match response.json::<UserResponse>().await {
            Ok(raw) => {
                let summary = ProfileSummary::from(raw);
                debug!(login = %summary.login, "profile found");
                Some(summary)
            }
            Err(err) => {
                error!(%url, error = %err, "github api response missing profile fields");
                None
            }
        }
    }
}
