//! Entity types persisted by the services.
//!
//! All entities are flat records with a storage-assigned `id` and scalar
//! fields only. No entity references another.

pub mod daily_task;
pub mod movie;
pub mod train;

pub use daily_task::DailyTask;
pub use movie::Movie;
pub use train::Train;
