//! # Storage Layer
//!
//! Cards live in one named slot of a string key-value store. The [`SlotStore`]
//! trait is that store, treated as opaque: it knows nothing about cards, only
//! how to read and replace a text value under a key.
//!
//! ## Implementations
//!
//! - [`fs::FsSlots`]: one file per slot, `<root>/<key>.json`, written atomically
//!   (temp file then rename).
//! - [`memory::MemSlots`]: in-memory slots for tests and embedding hosts that
//!   persist elsewhere.
//!
//! Serialization of the card collection is not done here; see
//! [`crate::persist`].

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Abstract string-keyed slot storage.
///
/// All methods take `&self`; backends that need mutation use interior
/// mutability since cardbox is single-threaded.
pub trait SlotStore {
    /// Read the value stored under `key`. `Ok(None)` when nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
