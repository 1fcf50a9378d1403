// AI call sites: bullet generation, cover letters, and portfolio comparison.
// Each builds a prompt, calls the TextGenerator, then hands the raw text to
// crate::interpret with its result shape.

pub mod analysis;
pub mod bullets;
pub mod cover_letter;
pub mod handlers;
pub mod prompts;

use std::time::Duration;

use crate::errors::AppError;
use crate::llm_client::{ChatRequest, TextGenerator};

/// Calls the model, bounded by `timeout`.
///
/// On timeout the in-flight call is dropped and no interpretation runs.
pub async fn complete_with_timeout(
    llm: &dyn TextGenerator,
    request: &ChatRequest,
    timeout: Duration,
) -> Result<String, AppError> {
    match tokio::time::timeout(timeout, llm.complete(request)).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(AppError::LlmTimeout(timeout.as_secs())),
    }
}
