//! StringBuffer: append-only text buffer with amortized growth.

use crate::error::ContainerError;
use core::fmt;

/// Growable text buffer.
///
/// Capacity counts one byte beyond the text, the slot a terminator would
/// occupy, so an append grows the buffer once `len + appended` reaches the
/// capacity. Short appends double the capacity; an append at least as long
/// as the current capacity grows it to `2 * appended + capacity`.
#[derive(Debug, Clone, Default)]
pub struct StringBuffer {
    capacity: usize,
    buf: String,
}

impl StringBuffer {
    pub fn new(initial_capacity: usize) -> Result<Self, ContainerError> {
        let mut buf = String::new();
        if let Err(e) = buf.try_reserve_exact(initial_capacity) {
            tracing::warn!(initial_capacity, "string buffer allocation failed");
            return Err(e.into());
        }
        Ok(Self {
            capacity: initial_capacity,
            buf,
        })
    }

    pub fn append(&mut self, text: &str) -> Result<&mut Self, ContainerError> {
        let n = text.len();
        let needed = self.buf.len().checked_add(n).ok_or(ContainerError::Allocation)?;
        if needed >= self.capacity {
            let grown = if n < self.capacity {
                self.capacity.checked_mul(2)
            } else {
                n.checked_mul(2).and_then(|d| d.checked_add(self.capacity))
            };
            let grown = grown.ok_or(ContainerError::Allocation)?;
            if let Err(e) = self.buf.try_reserve_exact(grown - self.buf.len()) {
                tracing::warn!(capacity = self.capacity, grown, "string buffer growth failed");
                return Err(e.into());
            }
            tracing::trace!(from = self.capacity, to = grown, "string buffer grew");
            self.capacity = grown;
        }
        self.buf.push_str(text);
        Ok(self)
    }

    /// Length in bytes.
    pub fn length(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Drop the text, keeping the capacity.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl fmt::Display for StringBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}

impl fmt::Write for StringBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s).map(|_| ()).map_err(|_| fmt::Error)
    }
}
