//! Demo data for local development (`POST /api/v1/test/init`).
//!
//! Each call inserts a fresh batch of hosts and programs inside one
//! transaction. No images are attached, so seeded programs sort into the
//! no-cover group of the listing.

use chrono::{Duration, Utc};
use programs_core::error::CoreError;
use programs_core::program::Location;
use programs_core::types::DbId;

use crate::models::member::CreateMember;
use crate::models::program::CreateProgram;
use crate::models::status::ProgramStatus;
use crate::repositories::{MemberRepo, ProgramRepo};
use crate::DbPool;

/// Failure while inserting demo data.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Invalid demo data: {0}")]
    InvalidDemoData(#[from] CoreError),
}

struct DemoProgram {
    host_email: &'static str,
    host_name: &'static str,
    host_description: &'static str,
    name: &'static str,
    road_name_address: &'static str,
    category: &'static str,
    description: &'static str,
    days_from_now: i64,
    price: i64,
    spend_time: &'static str,
    latitude: f64,
    longitude: f64,
    status: ProgramStatus,
}

const DEMO_PROGRAMS: &[DemoProgram] = &[
    DemoProgram {
        host_email: "sunrise@example.com",
        host_name: "Sunrise Club",
        host_description: "Early risers who like the coast.",
        name: "Sunrise Coastal Walk",
        road_name_address: "12 Haean-ro, Jeju-si",
        category: "outdoor",
        description: "A gentle 5 km walk along the northern coast.",
        days_from_now: 3,
        price: 10_000,
        spend_time: "2 hours",
        latitude: 33.5167,
        longitude: 126.5219,
        status: ProgramStatus::Available,
    },
    DemoProgram {
        host_email: "pottery@example.com",
        host_name: "Clay Studio",
        host_description: "Small studio teaching hand-building.",
        name: "Hand-built Pottery Basics",
        road_name_address: "48 Gwandeok-ro, Jeju-si",
        category: "craft",
        description: "Make a cup and a small plate. Materials included.",
        days_from_now: 7,
        price: 35_000,
        spend_time: "3 hours",
        latitude: 33.5130,
        longitude: 126.5270,
        status: ProgramStatus::Available,
    },
    DemoProgram {
        host_email: "orchard@example.com",
        host_name: "Tangerine Farm",
        host_description: "Family orchard open for the winter harvest.",
        name: "Tangerine Picking",
        road_name_address: "201 Namjo-ro, Seogwipo-si",
        category: "farm",
        description: "Pick and take home up to 2 kg of tangerines.",
        days_from_now: 14,
        price: 15_000,
        spend_time: "1 hour",
        latitude: 33.2890,
        longitude: 126.6520,
        status: ProgramStatus::Closed,
    },
];

/// Insert the demo hosts and programs, returning the new program ids.
pub async fn seed_demo_programs(pool: &DbPool) -> Result<Vec<DbId>, SeedError> {
    let mut tx = pool.begin().await?;
    let mut ids = Vec::with_capacity(DEMO_PROGRAMS.len());

    for demo in DEMO_PROGRAMS {
        let host = MemberRepo::create(
            &mut *tx,
            &CreateMember {
                email: demo.host_email.to_string(),
                name: demo.host_name.to_string(),
                description: demo.host_description.to_string(),
            },
        )
        .await?;

        let location = Location::new(demo.latitude, demo.longitude)?;

        let program = ProgramRepo::create(
            &mut *tx,
            &CreateProgram {
                member_id: host.id,
                name: demo.name.to_string(),
                road_name_address: demo.road_name_address.to_string(),
                category: demo.category.to_string(),
                description: demo.description.to_string(),
                start_date_time: Utc::now() + Duration::days(demo.days_from_now),
                price: demo.price,
                chat_link: String::new(),
                spend_time: demo.spend_time.to_string(),
                location,
            },
        )
        .await?;

        if demo.status != ProgramStatus::Available {
            ProgramRepo::set_status(&mut *tx, program.id, demo.status).await?;
        }
        ids.push(program.id);
    }

    tx.commit().await?;
    tracing::info!(count = ids.len(), "Seeded demo programs");
    Ok(ids)
}
