//! Demonstration sequences run by the two binaries.

pub mod movies;
pub mod trains;
