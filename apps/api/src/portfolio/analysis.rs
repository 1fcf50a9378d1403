//! Comparative analysis: the user's saved portfolio against a job description.
//!
//! Flow: GitHub login → stored user → saved repositories → GitHub details per
//! repository → prompt → model → comparative-analysis shape.

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::github::GitHubError;
use crate::interpret::{interpret, DomainResult, ResponseShape};
use crate::llm_client::prompts::truncate_with_ellipsis;
use crate::llm_client::ChatRequest;
use crate::models::repository::SelectedRepositoryRow;
use crate::portfolio::complete_with_timeout;
use crate::portfolio::prompts::{render_analysis_prompt, ANALYSIS_SYSTEM, README_SNIPPET_CHARS};
use crate::state::AppState;

/// Low temperature for consistent, factual output.
const ANALYSIS_TEMPERATURE: f32 = 0.1;
const ANALYSIS_MAX_TOKENS: u32 = 2048;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparePortfolioRequest {
    pub job_description: String,
}

/// Everything about one project that goes into the prompt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectProfile {
    pub name: String,
    pub title: String,
    pub description: String,
    pub languages: Vec<String>,
    pub topics: Vec<String>,
    pub key_contributions: Vec<String>,
    pub readme: Option<String>,
}

pub async fn compare_portfolio(
    state: &AppState,
    token: &str,
    request: &ComparePortfolioRequest,
) -> Result<DomainResult, AppError> {
    let login = state.github.current_user(token).await?.login;

    let user = state
        .store
        .find_user_by_login(&login)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found in the database".to_string()))?;

    let selected = state.store.selected_repositories(user.id).await?;
    if selected.is_empty() {
        return Err(AppError::Validation(
            "No selected repositories found for analysis. Please save a portfolio with selected repositories first."
                .to_string(),
        ));
    }

    let mut profiles = Vec::with_capacity(selected.len());
    for repo in &selected {
        match fetch_profile(state, token, &login, repo).await {
            Ok(profile) => profiles.push(profile),
            Err(GitHubError::Unauthorized) => return Err(GitHubError::Unauthorized.into()),
            Err(e) => warn!("Error fetching details for repository {login}/{}: {e}", repo.name),
        }
    }

    if profiles.is_empty() {
        return Err(AppError::Validation(
            "Could not fetch details for any of the selected repositories.".to_string(),
        ));
    }

    let prompt = render_analysis_prompt(&request.job_description, &render_projects(&profiles));
    let chat = ChatRequest::new(&state.config.llm_model)
        .system(ANALYSIS_SYSTEM)
        .user(prompt)
        .temperature(ANALYSIS_TEMPERATURE)
        .max_tokens(ANALYSIS_MAX_TOKENS);

    let raw = complete_with_timeout(state.llm.as_ref(), &chat, state.config.llm_timeout).await?;
    let analysis = interpret(&raw, ResponseShape::ComparativeAnalysis)?;

    info!(
        "Comparative analysis complete for {login} across {} project(s)",
        profiles.len()
    );
    Ok(analysis)
}

async fn fetch_profile(
    state: &AppState,
    token: &str,
    owner: &str,
    repo: &SelectedRepositoryRow,
) -> Result<ProjectProfile, GitHubError> {
    let details = state.github.repository(token, owner, &repo.name).await?;
    let languages = state.github.languages(token, owner, &repo.name).await?;
    let readme = state.github.readme(token, owner, &repo.name).await?;

    Ok(ProjectProfile {
        name: repo.name.clone(),
        title: repo.display_title().to_string(),
        description: repo.custom_description.clone(),
        languages,
        topics: details.topics,
        key_contributions: repo.custom_bullet_points.clone(),
        readme,
    })
}

/// Renders project blocks, omitting empty sections.
pub fn render_projects(profiles: &[ProjectProfile]) -> String {
    profiles.iter().map(render_project).collect()
}

fn render_project(p: &ProjectProfile) -> String {
    let mut lines = vec![
        format!("--- Project: {} ---", p.name),
        format!("Title: {}", p.title),
    ];
    if !p.description.trim().is_empty() {
        lines.push(format!("Description: {}", p.description));
    }
    if !p.languages.is_empty() {
        lines.push(format!("Languages: {}", p.languages.join(", ")));
    }
    if !p.topics.is_empty() {
        lines.push(format!("Topics/Technologies: {}", p.topics.join(", ")));
    }
    if !p.key_contributions.is_empty() {
        lines.push("Key Contributions:".to_string());
        lines.extend(p.key_contributions.iter().map(|b| format!("  - {b}")));
    }
    if let Some(readme) = p.readme.as_deref().filter(|r| !r.trim().is_empty()) {
        lines.push(format!(
            "README Snippet (first {README_SNIPPET_CHARS} chars): {}",
            truncate_with_ellipsis(readme, README_SNIPPET_CHARS)
        ));
    }
    lines.push("--- End of Project ---\n".to_string());

    lines.iter().map(|line| format!("{line}\n")).collect()
}
