//! Gallery image entity model and DTOs.

use programs_core::types::{DbId, SlotOrder, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `program_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgramImage {
    pub id: DbId,
    pub program_id: DbId,
    pub url: String,
    pub slot_order: SlotOrder,
    pub created_at: Timestamp,
}

/// DTO for inserting a gallery image at a service-assigned slot.
#[derive(Debug, Clone)]
pub struct CreateProgramImage {
    pub program_id: DbId,
    pub url: String,
    pub slot_order: SlotOrder,
}
