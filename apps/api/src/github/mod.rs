//! GitHub client: the source-repository collaborator.
//!
//! Only used to gather prompt material (READMEs, descriptions, languages,
//! topics). Every call is made with the caller's own OAuth access token.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const USER_AGENT: &str = "Portfolio-Generator";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw+json";
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub rejected the access token")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// The authenticated user's public profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubUser {
    pub login: String,
    #[serde(alias = "avatar_url")]
    pub avatar_url: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub bio: Option<String>,
    #[serde(alias = "public_repos", default)]
    pub public_repos: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryDetails {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    pub html_url: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

/// Read access to a source-control host. Carried in `AppState` as `Arc<dyn RepositorySource>`.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    async fn current_user(&self, token: &str) -> Result<GitHubUser, GitHubError>;

    /// README text, or `None` when the repository has none.
    async fn readme(&self, token: &str, owner: &str, repo: &str)
        -> Result<Option<String>, GitHubError>;

    async fn repository(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
    ) -> Result<RepositoryDetails, GitHubError>;

    /// Language names, largest byte count first.
    async fn languages(&self, token: &str, owner: &str, repo: &str)
        -> Result<Vec<String>, GitHubError>;
}

#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
}

impl GitHubClient {
    pub fn new(api_url: String) -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn get(&self, token: &str, path: &str, accept: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{}", self.api_url, path))
            .bearer_auth(token)
            .header(header::ACCEPT, accept)
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    async fn get_json<T: DeserializeOwned>(&self, token: &str, path: &str) -> Result<T, GitHubError> {
        let response = check_status(self.get(token, path, JSON_MEDIA_TYPE).send().await?, path).await?;
        Ok(response.json().await?)
    }
}

async fn check_status(response: reqwest::Response, path: &str) -> Result<reqwest::Response, GitHubError> {
    match response.status() {
        s if s.is_success() => Ok(response),
        StatusCode::UNAUTHORIZED => Err(GitHubError::Unauthorized),
        StatusCode::NOT_FOUND => Err(GitHubError::NotFound(path.to_string())),
        s => Err(GitHubError::Api {
            status: s.as_u16(),
            message: response.text().await.unwrap_or_default(),
        }),
    }
}

#[async_trait]
impl RepositorySource for GitHubClient {
    async fn current_user(&self, token: &str) -> Result<GitHubUser, GitHubError> {
        self.get_json(token, "/user").await
    }

    async fn readme(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
    ) -> Result<Option<String>, GitHubError> {
        let path = format!("/repos/{owner}/{repo}/readme");
        let response = self.get(token, &path, RAW_MEDIA_TYPE).send().await?;
        match check_status(response, &path).await {
            Ok(response) => Ok(Some(response.text().await?)),
            Err(GitHubError::NotFound(_)) => {
                debug!("README not found for {owner}/{repo}");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn repository(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
    ) -> Result<RepositoryDetails, GitHubError> {
        self.get_json(token, &format!("/repos/{owner}/{repo}")).await
    }

    async fn languages(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<String>, GitHubError> {
        let bytes: HashMap<String, u64> = self
            .get_json(token, &format!("/repos/{owner}/{repo}/languages"))
            .await?;
        Ok(rank_languages(bytes))
    }
}

fn rank_languages(bytes: HashMap<String, u64>) -> Vec<String> {
    let mut ranked: Vec<(String, u64)> = bytes.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().map(|(name, _)| name).collect()
}
