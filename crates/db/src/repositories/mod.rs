//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept any [`sqlx::PgExecutor`] as the first argument, so the same call
//! works against `&PgPool` or `&mut *tx` inside a transaction.

pub mod member_repo;
pub mod program_image_repo;
pub mod program_repo;

pub use member_repo::MemberRepo;
pub use program_image_repo::ProgramImageRepo;
pub use program_repo::ProgramRepo;
