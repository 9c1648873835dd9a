//! Storage layer for the mala counter
//!
//! Holds the single counter record behind the [`CounterStore`] trait so the
//! request layer can be handed an in-memory store, a remote one, or a test double.

mod error;
mod memory;
#[cfg(test)]
mod tests;
pub mod traits;

pub use error::StorageError;
pub use memory::MemStorage;
pub use traits::{CounterStore, SharedStore};
