use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A portfolio owner, keyed by GitHub login.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub linkedin: String,
    pub summary: String,
    pub github_login: String,
}
