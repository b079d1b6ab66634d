//! # Storage Layer
//!
//! The durable medium behind the persistence bridge: a synchronous string
//! key-value store, the same contract a browser's local storage offers.
//!
//! ## Contract
//!
//! - Each `set` replaces the whole value under one key and is atomic: a
//!   reader sees either the old value or the new one, never a mix.
//! - There are no transactions across keys.
//! - Capacity may be limited; exceeding it is a write error, not a panic.
//!
//! ## Implementations
//!
//! - [`fs::FileStorage`]: one file per key in a directory, written via a
//!   temporary file and rename.
//! - [`memory::MemStorage`]: in-process map, with an optional byte quota and
//!   write-failure simulation for testing degraded persistence.
//!
//! All methods take `&self`; implementations handle their own interior
//! mutability since the notebook is single-threaded.

use crate::error::Result;

pub mod fs;
pub mod memory;

pub trait KeyValueStorage {
    /// Returns `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}
