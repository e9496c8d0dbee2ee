//! sscont: a small library of generic containers.
//!
//! Internal Design:
//!
//! Summary
//! - DynamicArray<T>: positionally addressed sequence; capacity doubles
//!   when an append or insert would overflow it. Scratch and result
//!   storage for the other containers.
//! - HashTable<V>: string keys hashed with SuperFastHash into a fixed
//!   number of buckets; each bucket is a growable slot array. A key may be
//!   stored many times (multi-map).
//! - Set<T>: fixed capacity, deduplicated by a caller-supplied equality
//!   predicate; power set, union and intersection.
//! - StringBuffer: append-only text with amortized growth.
//!
//! Constraints
//! - Single-threaded: `Set` holds its predicate in an `Rc`, so it is
//!   `!Send`/`!Sync`. Other containers carry no locking; share them behind
//!   one lock per instance.
//! - Failed growth never mutates: storage is reserved with
//!   `try_reserve_exact` before anything is written.
//! - Lookup misses are `None`, never errors.
//!
//! Hash table layout
//! - Bucket index is `super_fast_hash(key) % bucket_count`; the hash is
//!   stored in each entry. Lookups compare full keys.
//! - Removal leaves a tombstone in the slot array. Tombstones are never
//!   compacted; the next put into the bucket fills the first one. Slot
//!   order, and so `get`/`get_all`/`keys` order, is stable across removals.
//! - A bucket's slot count stays strictly below its capacity.
//!
//! Ownership
//! - The table owns a copy of every key. Values and set elements are
//!   whatever `V`/`T` the caller picks: borrowed references, `Rc`s, or owned
//!   data. `teardown` optionally hands each live element to a disposer.
//!
//! Set semantics
//! - Equality is a property of the set instance; binary operations use the
//!   receiver's predicate.
//! - `intersection` returns only the common elements (in receiver order).
//! - `add_items` refuses a batch that could overflow before deduplication.
//!
//! Logging
//! - Failures are reported through `tracing` at `warn`, growth at `trace`.
//!   No subscriber is installed by the library.

mod dynamic_array;
mod error;
mod hash;
mod hash_table;
mod hash_table_proptest;
mod set;
mod string_buffer;

// Public surface
pub use dynamic_array::DynamicArray;
pub use error::ContainerError;
pub use hash::super_fast_hash;
pub use hash_table::{Entry, HashTable, Iter, DEFAULT_BUCKET_CAPACITY};
pub use set::{Equality, Set};
pub use string_buffer::StringBuffer;
