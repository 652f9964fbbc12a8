//! Database module for SQLite operations.
//!
//! This module provides:
//! - Per-operation connection scopes built from a connection string
//! - Destructive schema reset for each program's tables

pub mod context;
pub mod schema;

pub use context::{ContextFactory, DbContext};
pub use schema::{recreate_schema, Schema};
