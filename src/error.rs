//! Failure results shared by every container in the crate.

use core::fmt;

/// Why a container operation refused to proceed.
///
/// A container that returns one of these is left exactly as it was before
/// the call. Lookup misses are not errors; they surface as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerError {
    /// Backing storage could not be reserved, or the requested size does
    /// not fit in `usize`.
    Allocation,
    /// An index argument is outside the bound the operation accepts.
    InvalidPosition { pos: usize, count: usize },
    /// A fixed-capacity set cannot take `requested` more items.
    CapacityExceeded {
        capacity: usize,
        count: usize,
        requested: usize,
    },
    /// A hash table needs at least one bucket.
    ZeroBuckets,
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ContainerError::Allocation => f.write_str("storage allocation failed"),
            ContainerError::InvalidPosition { pos, count } => {
                write!(f, "position {pos} out of bounds for count {count}")
            }
            ContainerError::CapacityExceeded {
                capacity,
                count,
                requested,
            } => write!(
                f,
                "adding {requested} item(s) to {count} of {capacity} would overflow the set"
            ),
            ContainerError::ZeroBuckets => f.write_str("hash table bucket count must be non-zero"),
        }
    }
}

impl std::error::Error for ContainerError {}

impl From<std::collections::TryReserveError> for ContainerError {
    fn from(_: std::collections::TryReserveError) -> Self {
        ContainerError::Allocation
    }
}
