//! Cover letters from up to four repositories and a job description.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::github::{GitHubError, RepositoryDetails};
use crate::interpret::{interpret, DomainResult, ResponseShape};
use crate::llm_client::prompts::fill_template;
use crate::llm_client::ChatRequest;
use crate::portfolio::complete_with_timeout;
use crate::portfolio::prompts::{COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM};
use crate::state::AppState;

/// Only the first few repositories are sent, to keep the prompt bounded.
pub const MAX_COVER_LETTER_REPOS: usize = 4;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    pub owner: String,
    pub repo_names: Vec<String>,
    pub position_requirements: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

pub async fn generate_cover_letter(
    state: &AppState,
    token: &str,
    request: &CoverLetterRequest,
) -> Result<CoverLetterResponse, AppError> {
    let sections = collect_project_sections(state, token, request).await?;
    if sections.is_empty() {
        return Err(AppError::Validation(
            "No README files found for the selected repositories.".to_string(),
        ));
    }

    let projects = sections.join("\n\n");
    let prompt = fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("job_description", request.position_requirements.as_str()),
            ("projects", projects.as_str()),
            ("owner", request.owner.as_str()),
        ],
    );
    let chat = ChatRequest::new(&state.config.llm_model)
        .system(COVER_LETTER_SYSTEM)
        .user(prompt);

    let raw = complete_with_timeout(state.llm.as_ref(), &chat, state.config.llm_timeout).await?;
    let DomainResult::FreeText(letter) = interpret(&raw, ResponseShape::FreeText)? else {
        return Err(anyhow::anyhow!("free-text shape produced a structured result").into());
    };

    info!(
        "Generated cover letter for {} from {} project(s)",
        request.owner,
        sections.len()
    );
    Ok(CoverLetterResponse {
        cover_letter: letter.text,
    })
}

/// One prompt section per repository: the README, or a details block when
/// there is none. Repositories whose details cannot be fetched are skipped.
async fn collect_project_sections(
    state: &AppState,
    token: &str,
    request: &CoverLetterRequest,
) -> Result<Vec<String>, AppError> {
    let mut sections = Vec::new();

    for repo_name in request.repo_names.iter().take(MAX_COVER_LETTER_REPOS) {
        match state.github.readme(token, &request.owner, repo_name).await? {
            Some(readme) => sections.push(readme_section(repo_name, &readme)),
            None => {
                warn!("README not found for repository: {}/{repo_name}", request.owner);
                match state.github.repository(token, &request.owner, repo_name).await {
                    Ok(details) => sections.push(details_section(&details)),
                    Err(GitHubError::Unauthorized) => return Err(GitHubError::Unauthorized.into()),
                    Err(e) => {
                        warn!(
                            "Error fetching repository details for {}/{repo_name}: {e}",
                            request.owner
                        );
                    }
                }
            }
        }
    }

    Ok(sections)
}

fn readme_section(repo_name: &str, readme: &str) -> String {
    format!("--- Repository: {repo_name} ---\n{readme}\n--- End of {repo_name} ---")
}

fn details_section(details: &RepositoryDetails) -> String {
    format!(
        "--- Repository: {} (No README) ---\n\
         Description: {}\n\
         Language: {}\n\
         Stars: {}\n\
         Forks: {}\n\
         URL: {}\n",
        details.name,
        details.description.as_deref().unwrap_or("No description provided"),
        details.language.as_deref().unwrap_or("Not specified"),
        details.stargazers_count,
        details.forks_count,
        details.html_url,
    )
}
