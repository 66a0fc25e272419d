//! Application services that orchestrate repositories and object storage.

pub mod program;

pub use program::ProgramService;
