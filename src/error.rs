use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}
