//! Repository for the `members` table.

use programs_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::member::{CreateMember, Member};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, name, description, created_at, updated_at";

/// Provides create/find/update operations for program hosts.
pub struct MemberRepo;

impl MemberRepo {
    /// Insert a new member, returning the created row.
    ///
    /// No lookup by email is performed: every call creates a fresh row.
    pub async fn create<'e, E>(executor: E, input: &CreateMember) -> Result<Member, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO members (email, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(executor)
            .await
    }

    /// Find a member by its internal ID.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Member>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM members WHERE id = $1");
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Replace a member's free-text description.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_description<'e, E>(
        executor: E,
        id: DbId,
        description: &str,
    ) -> Result<Option<Member>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE members SET description = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .bind(description)
            .fetch_optional(executor)
            .await
    }
}
