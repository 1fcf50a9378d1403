// In-memory collaborators for handler tests.
//
// Each fake implements the same trait the production client does, so a test
// builds an AppState from fakes and drives the real router.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::config::Config;
use crate::errors::AppError;
use crate::github::{GitHubError, GitHubUser, RepositoryDetails, RepositorySource};
use crate::llm_client::{ChatRequest, LlmError, TextGenerator};
use crate::models::repository::SelectedRepositoryRow;
use crate::models::user::UserRow;
use crate::state::AppState;
use crate::store::PortfolioStore;

pub fn test_state(llm: FakeLlm, github: FakeGitHub, store: FakeStore) -> AppState {
    AppState {
        llm: Arc::new(llm),
        github: Arc::new(github),
        store: Arc::new(store),
        config: Config::for_tests(),
    }
}

// =============================================================================
// Fake text generator
// =============================================================================

/// Returns a canned reply and records every request it receives.
#[derive(Clone)]
pub struct FakeLlm {
    reply: Option<String>,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl FakeLlm {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            delay: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every call fails as if the upstream returned a 500.
    pub fn failing() -> Self {
        Self {
            reply: None,
            delay: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for FakeLlm {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.reply.clone().ok_or_else(|| LlmError::Api {
            status: 500,
            message: "upstream unavailable".to_string(),
        })
    }
}

// =============================================================================
// Fake repository source
// =============================================================================

/// Serves the repositories it was given; anything else is a 404.
#[derive(Clone)]
pub struct FakeGitHub {
    login: String,
    /// Repository name to README (`None` when it has none).
    repos: HashMap<String, Option<String>>,
    /// Repositories whose details and languages fail with a 500.
    failing: HashSet<String>,
    rejects_token: bool,
}

impl Default for FakeGitHub {
    fn default() -> Self {
        Self {
            login: "octocat".to_string(),
            repos: HashMap::new(),
            failing: HashSet::new(),
            rejects_token: false,
        }
    }
}

impl FakeGitHub {
    pub fn with_readme(repo: &str, readme: &str) -> Self {
        Self::default().readme_for(repo, readme)
    }

    pub fn readme_for(mut self, repo: &str, readme: &str) -> Self {
        self.repos.insert(repo.to_string(), Some(readme.to_string()));
        self
    }

    pub fn without_readme(mut self, repo: &str) -> Self {
        self.repos.insert(repo.to_string(), None);
        self
    }

    pub fn failing_details(mut self, repo: &str) -> Self {
        self.failing.insert(repo.to_string());
        self
    }

    /// Every repository call answers 401; `current_user` still succeeds.
    pub fn rejecting_token(mut self) -> Self {
        self.rejects_token = true;
        self
    }

    pub fn logged_in_as(mut self, login: &str) -> Self {
        self.login = login.to_string();
        self
    }

    fn known(&self, owner: &str, repo: &str) -> Result<(), GitHubError> {
        if self.rejects_token {
            Err(GitHubError::Unauthorized)
        } else if self.failing.contains(repo) {
            Err(GitHubError::Api {
                status: 500,
                message: "server error".to_string(),
            })
        } else if self.repos.contains_key(repo) {
            Ok(())
        } else {
            Err(GitHubError::NotFound(format!("/repos/{owner}/{repo}")))
        }
    }
}

#[async_trait]
impl RepositorySource for FakeGitHub {
    async fn current_user(&self, _token: &str) -> Result<GitHubUser, GitHubError> {
        Ok(GitHubUser {
            login: self.login.clone(),
            avatar_url: None,
            name: Some("The Octocat".to_string()),
            location: None,
            company: None,
            bio: None,
            public_repos: self.repos.len() as u32,
        })
    }

    async fn readme(
        &self,
        _token: &str,
        _owner: &str,
        repo: &str,
    ) -> Result<Option<String>, GitHubError> {
        if self.rejects_token {
            return Err(GitHubError::Unauthorized);
        }
        Ok(self.repos.get(repo).cloned().flatten())
    }

    async fn repository(
        &self,
        _token: &str,
        owner: &str,
        repo: &str,
    ) -> Result<RepositoryDetails, GitHubError> {
        self.known(owner, repo)?;
        Ok(RepositoryDetails {
            name: repo.to_string(),
            description: Some(format!("{repo} description")),
            language: Some("Rust".to_string()),
            stargazers_count: 3,
            forks_count: 1,
            html_url: format!("https://github.com/{owner}/{repo}"),
            topics: vec!["axum".to_string()],
        })
    }

    async fn languages(
        &self,
        _token: &str,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<String>, GitHubError> {
        self.known(owner, repo)?;
        Ok(vec!["Rust".to_string()])
    }
}

// =============================================================================
// Fake portfolio store
// =============================================================================

#[derive(Clone, Default)]
pub struct FakeStore {
    users: Vec<(UserRow, Vec<SelectedRepositoryRow>)>,
}

impl FakeStore {
    /// One stored user with the named repositories saved, in order.
    pub fn with_user(github_login: &str, repos: &[&str]) -> Self {
        let user = UserRow {
            id: 1,
            name: "Test User".to_string(),
            email: format!("{github_login}@example.com"),
            linkedin: String::new(),
            summary: String::new(),
            github_login: github_login.to_string(),
        };
        let selected = repos
            .iter()
            .enumerate()
            .map(|(i, name)| selected_repository(user.id, i as i32 + 1, name))
            .collect();
        Self {
            users: vec![(user, selected)],
        }
    }
}

fn selected_repository(user_id: i32, id: i32, name: &str) -> SelectedRepositoryRow {
    SelectedRepositoryRow {
        id,
        user_id,
        repo_id: (id * 100).to_string(),
        name: name.to_string(),
        description: String::new(),
        custom_description: format!("{name} custom description"),
        language: "Rust".to_string(),
        star_count: 0,
        url: format!("https://github.com/octocat/{name}"),
        custom_title: String::new(),
        custom_bullet_points: Vec::new(),
        added_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, id as u32).unwrap(),
    }
}

#[async_trait]
impl PortfolioStore for FakeStore {
    async fn find_user_by_login(&self, github_login: &str) -> Result<Option<UserRow>, AppError> {
        Ok(self
            .users
            .iter()
            .find(|(user, _)| user.github_login == github_login)
            .map(|(user, _)| user.clone()))
    }

    async fn selected_repositories(
        &self,
        user_id: i32,
    ) -> Result<Vec<SelectedRepositoryRow>, AppError> {
        Ok(self
            .users
            .iter()
            .find(|(user, _)| user.id == user_id)
            .map(|(_, repos)| repos.clone())
            .unwrap_or_default())
    }
}
