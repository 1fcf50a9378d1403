//! Portfolio store: read access to users and their saved repositories.
//!
//! Reads the `"Users"` and `"SelectedRepositories"` tables owned by the
//! portfolio's existing schema (quoted PascalCase identifiers).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tracing::info;

use crate::errors::AppError;
use crate::models::repository::SelectedRepositoryRow;
use crate::models::user::UserRow;

/// Carried in `AppState` as `Arc<dyn PortfolioStore>`.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    async fn find_user_by_login(&self, github_login: &str) -> Result<Option<UserRow>, AppError>;

    /// Saved repositories in the order they were added.
    async fn selected_repositories(
        &self,
        user_id: i32,
    ) -> Result<Vec<SelectedRepositoryRow>, AppError>;
}

#[derive(Clone)]
pub struct PgPortfolioStore {
    pool: PgPool,
}

impl PgPortfolioStore {
    /// Opens a PostgreSQL connection pool.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }
}

#[async_trait]
impl PortfolioStore for PgPortfolioStore {
    async fn find_user_by_login(&self, github_login: &str) -> Result<Option<UserRow>, AppError> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT "Id" AS id, "Name" AS name, "Email" AS email, "LinkedIn" AS linkedin,
                   "Summary" AS summary, "GitHubLogin" AS github_login
            FROM "Users"
            WHERE "GitHubLogin" = $1
            "#,
        )
        .bind(github_login)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn selected_repositories(
        &self,
        user_id: i32,
    ) -> Result<Vec<SelectedRepositoryRow>, AppError> {
        let rows = sqlx::query_as::<_, StoredRepositoryRow>(
            r#"
            SELECT "Id" AS id, "UserId" AS user_id, "RepoId" AS repo_id, "Name" AS name,
                   "Description" AS description, "CustomDescription" AS custom_description,
                   "Language" AS language, "StarCount" AS star_count, "Url" AS url,
                   "CustomTitle" AS custom_title, "CustomBulletPoints" AS custom_bullet_points,
                   "AddedAt" AS added_at
            FROM "SelectedRepositories"
            WHERE "UserId" = $1
            ORDER BY "AddedAt", "Id"
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(SelectedRepositoryRow::from).collect())
    }
}

/// `SelectedRepositories` as stored: bullet points are one `||`-joined text column.
#[derive(Debug, FromRow)]
struct StoredRepositoryRow {
    id: i32,
    user_id: i32,
    repo_id: String,
    name: String,
    description: String,
    custom_description: String,
    language: String,
    star_count: i32,
    url: String,
    custom_title: String,
    custom_bullet_points: String,
    added_at: DateTime<Utc>,
}

impl From<StoredRepositoryRow> for SelectedRepositoryRow {
    fn from(row: StoredRepositoryRow) -> Self {
        SelectedRepositoryRow {
            id: row.id,
            user_id: row.user_id,
            repo_id: row.repo_id,
            name: row.name,
            description: row.description,
            custom_description: row.custom_description,
            language: row.language,
            star_count: row.star_count,
            url: row.url,
            custom_title: row.custom_title,
            custom_bullet_points: split_bullet_points(&row.custom_bullet_points),
            added_at: row.added_at,
        }
    }
}

const BULLET_SEPARATOR: &str = "||";

fn split_bullet_points(stored: &str) -> Vec<String> {
    stored
        .split(BULLET_SEPARATOR)
        .filter(|bullet| !bullet.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_bullet_points_drops_empty_entries() {
        assert_eq!(
            split_bullet_points("Built the API||||Cut latency 30%||"),
            vec!["Built the API", "Cut latency 30%"]
        );
    }

    #[test]
    fn test_split_empty_column_is_no_bullets() {
        assert!(split_bullet_points("").is_empty());
    }

    #[test]
    fn test_stored_row_converts_with_split_bullets() {
        let stored = StoredRepositoryRow {
            id: 7,
            user_id: 1,
            repo_id: "123".into(),
            name: "ledger".into(),
            description: String::new(),
            custom_description: "Accounting engine".into(),
            language: "Rust".into(),
            star_count: 4,
            url: "https://github.com/o/ledger".into(),
            custom_title: String::new(),
            custom_bullet_points: "Designed schema||Wrote importer".into(),
            added_at: Utc::now(),
        };
        let row = SelectedRepositoryRow::from(stored);
        assert_eq!(row.custom_bullet_points, vec!["Designed schema", "Wrote importer"]);
        assert_eq!(row.display_title(), "ledger");
    }
}
