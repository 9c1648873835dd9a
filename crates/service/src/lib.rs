//! Service layer for the mala counter
//!
//! Turns user intents (increment, bulk add, reset, image change, backup) into
//! sparse merges against a [`mala_counter_storage::CounterStore`].

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

pub mod backup;
mod backup_service;
mod counter_service;
mod error;

pub use backup::{ExportError, ExportFormat, ImportError};
pub use backup_service::{BackupService, ImportOutcome};
pub use counter_service::{CounterService, IncrementOutcome, validate_image_payload};
pub use error::ServiceError;
