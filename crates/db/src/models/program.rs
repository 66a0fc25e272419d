//! Program entity model, create DTO and listing projection.

use programs_core::listing::ListingEntry;
use programs_core::program::Location;
use programs_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::status::StatusId;

/// A row from the `programs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Program {
    pub id: DbId,
    pub member_id: DbId,
    pub name: String,
    pub road_name_address: String,
    pub category: String,
    pub description: String,
    pub start_date_time: Timestamp,
    pub price: i64,
    pub chat_link: String,
    pub spend_time: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new program. Status defaults to available.
#[derive(Debug, Clone)]
pub struct CreateProgram {
    pub member_id: DbId,
    pub name: String,
    pub road_name_address: String,
    pub category: String,
    pub description: String,
    pub start_date_time: Timestamp,
    pub price: i64,
    pub chat_link: String,
    pub spend_time: String,
    pub location: Location,
}

/// Listing projection: key program fields plus the cover image URL.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgramSummary {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub road_name_address: String,
    pub start_date_time: Timestamp,
    pub price: i64,
    pub main_image_url: Option<String>,
}

impl ListingEntry for ProgramSummary {
    fn id(&self) -> DbId {
        self.id
    }

    fn has_main_image(&self) -> bool {
        self.main_image_url.is_some()
    }
}
