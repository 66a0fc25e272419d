//! Repository for the `program_images` table.

use programs_core::types::{DbId, SlotOrder};
use sqlx::PgExecutor;

use crate::models::program_image::{CreateProgramImage, ProgramImage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, program_id, url, slot_order, created_at";

/// Provides batch insert and ordered reads for gallery images.
pub struct ProgramImageRepo;

impl ProgramImageRepo {
    /// Batch-insert gallery images, returning the created rows in slot order.
    pub async fn create_batch<'e, E>(
        executor: E,
        images: &[CreateProgramImage],
    ) -> Result<Vec<ProgramImage>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        if images.is_empty() {
            return Ok(vec![]);
        }

        let program_ids: Vec<DbId> = images.iter().map(|i| i.program_id).collect();
        let urls: Vec<String> = images.iter().map(|i| i.url.clone()).collect();
        let slots: Vec<SlotOrder> = images.iter().map(|i| i.slot_order).collect();

        let query = format!(
            "WITH inserted AS ( \
                INSERT INTO program_images (program_id, url, slot_order) \
                SELECT * FROM UNNEST($1::bigint[], $2::text[], $3::int[]) \
                RETURNING {COLUMNS} \
             ) \
             SELECT {COLUMNS} FROM inserted ORDER BY program_id, slot_order"
        );
        sqlx::query_as::<_, ProgramImage>(&query)
            .bind(&program_ids)
            .bind(&urls)
            .bind(&slots)
            .fetch_all(executor)
            .await
    }

    /// List all images for a program, ordered by slot.
    pub async fn list_by_program<'e, E>(
        executor: E,
        program_id: DbId,
    ) -> Result<Vec<ProgramImage>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM program_images
             WHERE program_id = $1
             ORDER BY slot_order ASC"
        );
        sqlx::query_as::<_, ProgramImage>(&query)
            .bind(program_id)
            .fetch_all(executor)
            .await
    }

    /// Highest slot in use for a program, or `None` for an empty gallery.
    pub async fn max_slot_order<'e, E>(
        executor: E,
        program_id: DbId,
    ) -> Result<Option<SlotOrder>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, Option<SlotOrder>>(
            "SELECT MAX(slot_order) FROM program_images WHERE program_id = $1",
        )
        .bind(program_id)
        .fetch_one(executor)
        .await
    }
}
