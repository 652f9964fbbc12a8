//! Service layer: one method per use case, one connection scope per call.
//!
//! - `trains.rs` - `TrainService`
//! - `movies.rs` - `MovieTaskService` and its movie operations
//! - `tasks.rs` - daily task operations of `MovieTaskService`

mod movies;
mod tasks;
mod trains;

pub use movies::MovieTaskService;
pub use trains::TrainService;
