//! Service layer for cloud-hunter
//!
//! The discovery ledger: ties upload validation, classification, scoring and
//! persistence together, and answers every collection query the HTTP and CLI
//! front ends need.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]

mod error;
mod ledger_service;

#[cfg(test)]
mod tests;

pub use error::{Result, ServiceError};
pub use cloud_hunter_core::fingerprint;
pub use ledger_service::{Dashboard, LedgerService, RecordOutcome, StoredImage, UploadLookup};
