//! Resume bullets for a single repository, generated from its README.

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::interpret::{interpret, DomainResult, ResponseShape};
use crate::llm_client::prompts::fill_template;
use crate::llm_client::ChatRequest;
use crate::portfolio::complete_with_timeout;
use crate::portfolio::prompts::{bullets_system, BULLETS_PROMPT_TEMPLATE};
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBulletsRequest {
    pub owner: String,
    pub repo_name: String,
}

/// Fetches the README, asks the model for bullets, and interprets the answer
/// as the bullet-list shape. A repository without a README is a 404.
pub async fn generate_bullet_points(
    state: &AppState,
    token: &str,
    request: &GenerateBulletsRequest,
) -> Result<DomainResult, AppError> {
    let GenerateBulletsRequest { owner, repo_name } = request;

    let Some(readme) = state.github.readme(token, owner, repo_name).await? else {
        warn!("README not found for {owner}/{repo_name}");
        return Err(AppError::NotFound(
            "Could not find a README file for this repository.".to_string(),
        ));
    };

    let prompt = fill_template(
        BULLETS_PROMPT_TEMPLATE,
        &[("repo_name", repo_name.as_str()), ("readme", readme.as_str())],
    );
    let chat = ChatRequest::new(&state.config.llm_model)
        .system(bullets_system())
        .user(prompt);

    let raw = complete_with_timeout(state.llm.as_ref(), &chat, state.config.llm_timeout).await?;
    let result = interpret(&raw, ResponseShape::BulletList)?;

    info!("Generated bullet points for {owner}/{repo_name}");
    Ok(result)
}
