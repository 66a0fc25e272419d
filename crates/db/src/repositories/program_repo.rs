//! Repository for the `programs` table.

use programs_core::slot_order::MAIN_IMAGE_SLOT;
use programs_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::program::{CreateProgram, Program, ProgramSummary};
use crate::models::status::{ProgramStatus, StatusId};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, member_id, name, road_name_address, category, description, \
     start_date_time, price, chat_link, spend_time, latitude, longitude, status_id, \
     created_at, updated_at";

/// Provides create/find/update operations for programs plus the listing query.
pub struct ProgramRepo;

impl ProgramRepo {
    /// Insert a new program with status available, returning the created row.
    pub async fn create<'e, E>(executor: E, input: &CreateProgram) -> Result<Program, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO programs
                (member_id, name, road_name_address, category, description,
                 start_date_time, price, chat_link, spend_time, latitude, longitude, status_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(input.member_id)
            .bind(&input.name)
            .bind(&input.road_name_address)
            .bind(&input.category)
            .bind(&input.description)
            .bind(input.start_date_time)
            .bind(input.price)
            .bind(&input.chat_link)
            .bind(&input.spend_time)
            .bind(input.location.latitude())
            .bind(input.location.longitude())
            .bind(ProgramStatus::Available.id())
            .fetch_one(executor)
            .await
    }

    /// Find a program by its internal ID.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Program>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM programs WHERE id = $1");
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a program and take a row lock held until the surrounding
    /// transaction ends. Serializes gallery appends for the same program.
    pub async fn find_by_id_for_update<'e, E>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Program>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM programs WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List every program with the given status alongside its cover image
    /// URL (`NULL` when the program has no image in the cover slot).
    ///
    /// Rows come back in id order; listing order is applied by the caller.
    pub async fn list_summaries_by_status<'e, E>(
        executor: E,
        status: ProgramStatus,
    ) -> Result<Vec<ProgramSummary>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, ProgramSummary>(
            "SELECT p.id, p.name, p.category, p.road_name_address, p.start_date_time, p.price, \
                    i.url AS main_image_url \
             FROM programs p \
             LEFT JOIN program_images i \
                ON i.program_id = p.id AND i.slot_order = $2 \
             WHERE p.status_id = $1 \
             ORDER BY p.id",
        )
        .bind(StatusId::from(status))
        .bind(MAIN_IMAGE_SLOT)
        .fetch_all(executor)
        .await
    }

    /// Replace a program's description and road name address.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_details<'e, E>(
        executor: E,
        id: DbId,
        description: &str,
        road_name_address: &str,
    ) -> Result<Option<Program>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE programs SET
                description = $2,
                road_name_address = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .bind(description)
            .bind(road_name_address)
            .fetch_optional(executor)
            .await
    }

    /// Change a program's status. Returns `true` if a row was updated.
    pub async fn set_status<'e, E>(
        executor: E,
        id: DbId,
        status: ProgramStatus,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result =
            sqlx::query("UPDATE programs SET status_id = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(status.id())
                .execute(executor)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
