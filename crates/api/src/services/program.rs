//! Program enrollment, listing, lookups and gallery management.
//!
//! Every mutating operation runs inside one database transaction that is
//! committed on success and rolled back when dropped on any error path.
//! Uploaded objects are not removed from storage when a later step fails.

use std::sync::Arc;

use programs_cloud::{ObjectStorage, StorageError, UploadFile};
use programs_core::error::CoreError;
use programs_core::listing::order_for_listing;
use programs_core::program::{EnrollProgram, UpdateProgramDetails, IMAGE_CATEGORY};
use programs_core::slot_order::{append_slots, initial_slots};
use programs_core::types::{DbId, SlotOrder, Timestamp};
use programs_db::models::member::{CreateMember, Member};
use programs_db::models::program::{CreateProgram, Program, ProgramSummary};
use programs_db::models::program_image::{CreateProgramImage, ProgramImage};
use programs_db::models::status::ProgramStatus;
use programs_db::repositories::{MemberRepo, ProgramImageRepo, ProgramRepo};
use programs_db::DbPool;
use serde::Serialize;

use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// Read models
// ---------------------------------------------------------------------------

/// Full program view: attributes, host and gallery in slot order.
#[derive(Debug, Serialize)]
pub struct ProgramDetail {
    pub program: Program,
    pub host: Member,
    pub images: Vec<ProgramImage>,
}

/// When a program takes place.
#[derive(Debug, Serialize)]
pub struct ProgramSchedule {
    pub program_id: DbId,
    pub start_date_time: Timestamp,
    pub spend_time: String,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Orchestrates member, program and image stores plus object storage.
pub struct ProgramService {
    pool: DbPool,
    storage: Arc<dyn ObjectStorage>,
}

fn program_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Program",
        id,
    })
}

impl ProgramService {
    pub fn new(pool: DbPool, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { pool, storage }
    }

    /// Name of the object storage provider backing uploads.
    pub fn storage_provider(&self) -> &'static str {
        self.storage.provider()
    }

    /// Create a host, a program and its gallery. Images get slots `0..n` in
    /// input order. Returns the new program id.
    pub async fn enroll(&self, input: EnrollProgram, images: Vec<UploadFile>) -> AppResult<DbId> {
        input.check()?;

        tracing::info!(
            host_email = %input.host_email,
            program_name = %input.program_name,
            price = input.price,
            image_count = images.len(),
            "Enrolling program",
        );

        let mut tx = self.pool.begin().await?;

        let host = MemberRepo::create(
            &mut *tx,
            &CreateMember {
                email: input.host_email,
                name: input.host_name,
                description: input.host_description,
            },
        )
        .await?;

        let program = ProgramRepo::create(
            &mut *tx,
            &CreateProgram {
                member_id: host.id,
                name: input.program_name,
                road_name_address: input.road_name_address,
                category: input.category,
                description: input.description,
                start_date_time: input.start_date_time,
                price: input.price,
                chat_link: input.chat_link,
                spend_time: input.spend_time,
                location: input.location,
            },
        )
        .await?;

        if !images.is_empty() {
            let slots = initial_slots(images.len());
            let urls = self.upload_all(program.id, images).await?;
            let rows = gallery_rows(program.id, urls, slots);
            ProgramImageRepo::create_batch(&mut *tx, &rows).await?;
        }

        tx.commit().await?;
        tracing::info!(program_id = program.id, member_id = host.id, "Program enrolled");
        Ok(program.id)
    }

    /// Available programs: those with a cover image first, then the rest,
    /// each group newest first.
    pub async fn list_available(&self) -> AppResult<Vec<ProgramSummary>> {
        let rows = ProgramRepo::list_summaries_by_status(&self.pool, ProgramStatus::Available)
            .await?;
        Ok(order_for_listing(rows))
    }

    /// Program attributes, host and gallery.
    pub async fn detail(&self, id: DbId) -> AppResult<ProgramDetail> {
        let program = self.find_program(id).await?;

        let host = MemberRepo::find_by_id(&self.pool, program.member_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Member",
                id: program.member_id,
            }))?;
        let images = ProgramImageRepo::list_by_program(&self.pool, id).await?;

        Ok(ProgramDetail {
            program,
            host,
            images,
        })
    }

    pub async fn available_date(&self, id: DbId) -> AppResult<ProgramSchedule> {
        let program = self.find_program(id).await?;
        Ok(ProgramSchedule {
            program_id: program.id,
            start_date_time: program.start_date_time,
            spend_time: program.spend_time,
        })
    }

    pub async fn chat_link(&self, id: DbId) -> AppResult<String> {
        Ok(self.find_program(id).await?.chat_link)
    }

    /// Append images after the program's current last slot (slot 1 when the
    /// gallery is empty).
    ///
    /// The program row stays locked from slot computation to commit, so
    /// concurrent calls for the same program cannot claim the same slots.
    pub async fn add_images(
        &self,
        id: DbId,
        images: Vec<UploadFile>,
    ) -> AppResult<Vec<ProgramImage>> {
        if images.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "At least one image is required".into(),
            )));
        }

        let mut tx = self.pool.begin().await?;

        ProgramRepo::find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| program_not_found(id))?;

        let current_max = ProgramImageRepo::max_slot_order(&mut *tx, id).await?;
        let slots = append_slots(current_max, images.len());
        let urls = self.upload_all(id, images).await?;
        let created = ProgramImageRepo::create_batch(&mut *tx, &gallery_rows(id, urls, slots))
            .await?;

        tx.commit().await?;
        tracing::info!(program_id = id, count = created.len(), "Images added to program");
        Ok(created)
    }

    /// Replace the program description and address and the host description.
    pub async fn update_details(&self, id: DbId, input: UpdateProgramDetails) -> AppResult<()> {
        input.check()?;

        let mut tx = self.pool.begin().await?;

        let program = ProgramRepo::update_details(
            &mut *tx,
            id,
            &input.program_description,
            &input.road_name_address,
        )
        .await?
        .ok_or_else(|| program_not_found(id))?;

        MemberRepo::update_description(&mut *tx, program.member_id, &input.host_description)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Member",
                id: program.member_id,
            }))?;

        tx.commit().await?;
        tracing::info!(program_id = id, "Program details updated");
        Ok(())
    }

    async fn find_program(&self, id: DbId) -> AppResult<Program> {
        ProgramRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| program_not_found(id))
    }

    /// Upload files one at a time in input order. The first failure aborts
    /// the remaining uploads.
    async fn upload_all(
        &self,
        program_id: DbId,
        files: Vec<UploadFile>,
    ) -> Result<Vec<String>, StorageError> {
        let total = files.len();
        let mut urls = Vec::with_capacity(total);

        for file in files {
            match self.storage.upload(file, IMAGE_CATEGORY).await {
                Ok(url) => urls.push(url),
                Err(e) => {
                    if !urls.is_empty() {
                        tracing::warn!(
                            program_id,
                            orphaned = ?urls,
                            "Upload batch aborted; earlier objects remain in storage",
                        );
                    }
                    tracing::error!(
                        program_id,
                        uploaded = urls.len(),
                        total,
                        error = %e,
                        "Image upload failed",
                    );
                    return Err(e);
                }
            }
        }
        Ok(urls)
    }
}

fn gallery_rows(
    program_id: DbId,
    urls: Vec<String>,
    slots: Vec<SlotOrder>,
) -> Vec<CreateProgramImage> {
    urls.into_iter()
        .zip(slots)
        .map(|(url, slot_order)| CreateProgramImage {
            program_id,
            url,
            slot_order,
        })
        .collect()
}
