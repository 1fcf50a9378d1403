use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository the user saved to their portfolio, with their own edits.
/// Loaded by `crate::store`, which splits the stored bullet-point column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedRepositoryRow {
    pub id: i32,
    pub user_id: i32,
    pub repo_id: String,
    pub name: String,
    pub description: String,
    pub custom_description: String,
    pub language: String,
    pub star_count: i32,
    pub url: String,
    pub custom_title: String,
    pub custom_bullet_points: Vec<String>,
    pub added_at: DateTime<Utc>,
}

impl SelectedRepositoryRow {
    /// The user's custom title, or the repository name when none was set.
    pub fn display_title(&self) -> &str {
        if self.custom_title.trim().is_empty() {
            &self.name
        } else {
            &self.custom_title
        }
    }
}
