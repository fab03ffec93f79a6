//! Open-addressing hash table from string keys to owned byte blobs.
//!
//! Slots are indexed with FNV-1a and a power-of-two bitmask, collisions are
//! resolved with linear probing. The default [`Options`] reproduce a table
//! whose search and delete only look at the home slot; see [`Lookup`] for
//! the probing variant.

pub mod entry;
pub mod hash;
pub mod hash_table;
pub mod options;
pub mod probe;

use std::collections::TryReserveError;

use thiserror::Error;

pub use entry::Entry;
pub use hash_table::{HashTable, Iter};
pub use options::{Lookup, Options};
pub use probe::ProbeSequence;

#[derive(Debug, Error)]
pub enum TableError {
    /// The table was asked for a capacity the bitmask indexing can't use
    #[error("Invalid table capacity {capacity}, expected a non-zero power of two")]
    InvalidCapacity { capacity: usize },

    /// Slot array or entry storage could not be reserved
    #[error("Allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// Every slot is occupied and expansion is turned off
    #[error("Insertion failed: hash table is full (capacity: {capacity})")]
    CapacityExhausted { capacity: usize },

    /// Doubling the capacity would not fit into a `usize`
    #[error("Couldnt expand table of capacity {capacity} without overflowing")]
    CapacityOverflow { capacity: usize },
}
