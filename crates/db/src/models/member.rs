//! Member (program host) entity model and DTOs.

use programs_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Member {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new member.
#[derive(Debug, Clone)]
pub struct CreateMember {
    pub email: String,
    pub name: String,
    pub description: String,
}
