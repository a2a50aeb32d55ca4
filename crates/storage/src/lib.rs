//! Storage layer for cloud-hunter
//!
//! SQLite-backed ledger of sightings. The `image_hash` UNIQUE constraint is
//! the only guard against the same upload being recorded twice.

mod error;
mod migrations;
mod storage;
#[cfg(test)]
mod tests;

pub use error::StorageError;
pub use migrations::SCHEMA_VERSION;
pub use storage::{Result, Storage};
