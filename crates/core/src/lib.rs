//! Pure domain logic for the programs backend.
//!
//! Nothing in this crate performs I/O. The db, cloud and api crates build on
//! these types and rules.

pub mod error;
pub mod image;
pub mod listing;
pub mod program;
pub mod slot_order;
pub mod types;
