//! Request handlers.
//!
//! Handlers extract and parse the request, delegate to the program service
//! or a repository, and wrap results in [`DataResponse`](crate::response::DataResponse).

pub mod program;
pub mod system;
