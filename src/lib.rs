pub mod config;
pub mod db;
pub mod demo;
pub mod domain;
pub mod error;
pub mod service;

pub use config::{ConfigError, Settings};
pub use db::{ContextFactory, DbContext};
pub use domain::{DailyTask, Movie, Train};
pub use error::AppError;
pub use service::{MovieTaskService, TrainService};
