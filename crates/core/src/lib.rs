//! Core types for the mala counter
//!
//! Domain types shared across all other crates: the fixed table of tracked
//! items, the counter record, and the sparse field map used for merges.

mod constants;
mod env_config;
mod error;
mod field;
mod record;
mod tracked_item;
mod user;

pub use constants::*;
pub use env_config::env_parse_with_default;
pub use error::CoreError;
pub use field::{CounterField, FieldKind, FieldValue, SparseFieldMap, UnknownKeys};
pub use record::{CounterRecord, ItemTally};
pub use tracked_item::{ItemDescriptor, TrackedItem};
pub use user::UserAccount;
