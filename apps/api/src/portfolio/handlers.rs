//! Axum route handlers for the AI and user endpoints.

use axum::{extract::State, Json};

use crate::auth::AccessToken;
use crate::errors::AppError;
use crate::github::GitHubUser;
use crate::interpret::DomainResult;
use crate::portfolio::analysis::{compare_portfolio, ComparePortfolioRequest};
use crate::portfolio::bullets::{generate_bullet_points, GenerateBulletsRequest};
use crate::portfolio::cover_letter::{generate_cover_letter, CoverLetterRequest, CoverLetterResponse};
use crate::state::AppState;

/// POST /api/ai/generate-bullets
///
/// Returns `{"bulletPoints": [...]}` for one repository.
pub async fn handle_generate_bullets(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Json(request): Json<GenerateBulletsRequest>,
) -> Result<Json<DomainResult>, AppError> {
    if request.owner.trim().is_empty() || request.repo_name.trim().is_empty() {
        return Err(AppError::Validation(
            "owner and repoName cannot be empty".to_string(),
        ));
    }

    let result = generate_bullet_points(&state, &token, &request).await?;
    Ok(Json(result))
}

/// POST /api/ai/generate-cover-letter
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    if request.position_requirements.trim().is_empty() {
        return Err(AppError::Validation(
            "positionRequirements cannot be empty".to_string(),
        ));
    }
    if request.repo_names.is_empty() {
        return Err(AppError::Validation(
            "repoNames must contain at least one repository".to_string(),
        ));
    }

    let response = generate_cover_letter(&state, &token, &request).await?;
    Ok(Json(response))
}

/// POST /api/ai/compare-portfolio
///
/// Compares the caller's saved repositories against a job description.
pub async fn handle_compare_portfolio(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Json(request): Json<ComparePortfolioRequest>,
) -> Result<Json<DomainResult>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription cannot be empty".to_string(),
        ));
    }

    let analysis = compare_portfolio(&state, &token, &request).await?;
    Ok(Json(analysis))
}

/// GET /api/user/me
pub async fn handle_current_user(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
) -> Result<Json<GitHubUser>, AppError> {
    let user = state.github.current_user(&token).await?;
    Ok(Json(user))
}
