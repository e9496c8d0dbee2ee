//! DynamicArray: positionally addressed sequence with doubling growth.

use crate::error::ContainerError;
use core::ops::Index;

/// Growable array whose capacity doubles whenever an append or insert
/// would overflow it.
///
/// The logical capacity is tracked separately from the backing `Vec` so
/// growth follows the doubling schedule exactly; storage is reserved with
/// `try_reserve_exact`, and a failed reservation leaves the array as it was.
#[derive(Debug, Clone)]
pub struct DynamicArray<T> {
    capacity: usize,
    items: Vec<T>,
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self {
            capacity: 0,
            items: Vec::new(),
        }
    }
}

impl<T> DynamicArray<T> {
    pub fn new(initial_capacity: usize) -> Result<Self, ContainerError> {
        let mut items = Vec::new();
        if let Err(e) = items.try_reserve_exact(initial_capacity) {
            tracing::warn!(initial_capacity, "dynamic array allocation failed");
            return Err(e.into());
        }
        Ok(Self {
            capacity: initial_capacity,
            items,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Double the capacity (an empty capacity grows to one slot).
    pub(crate) fn grow(&mut self) -> Result<(), ContainerError> {
        let new_capacity = match self.capacity {
            0 => 1,
            c => c.checked_mul(2).ok_or(ContainerError::Allocation)?,
        };
        if let Err(e) = self
            .items
            .try_reserve_exact(new_capacity - self.items.len())
        {
            tracing::warn!(
                capacity = self.capacity,
                new_capacity,
                "dynamic array growth failed"
            );
            return Err(e.into());
        }
        tracing::trace!(from = self.capacity, to = new_capacity, "dynamic array grew");
        self.capacity = new_capacity;
        Ok(())
    }

    /// Append `value`; same as `put(len(), value)`.
    pub fn add(&mut self, value: T) -> Result<usize, ContainerError> {
        self.put(self.items.len(), value)
    }

    /// Store `value` at `pos`. `pos == len()` appends; a lower `pos`
    /// overwrites and drops the previous element (use `replace` to get it
    /// back). Returns the new length.
    pub fn put(&mut self, pos: usize, value: T) -> Result<usize, ContainerError> {
        let count = self.items.len();
        if pos > count {
            tracing::warn!(pos, count, "dynamic array put past end");
            return Err(ContainerError::InvalidPosition { pos, count });
        }
        if pos == self.capacity {
            self.grow()?;
        }
        if pos == count {
            self.items.push(value);
        } else {
            self.items[pos] = value;
        }
        Ok(self.items.len())
    }

    /// Overwrite the element at `pos` and hand the old one back.
    pub fn replace(&mut self, pos: usize, value: T) -> Option<T> {
        let slot = self.items.get_mut(pos)?;
        Some(core::mem::replace(slot, value))
    }

    pub fn get(&self, pos: usize) -> Option<&T> {
        self.items.get(pos)
    }

    pub fn get_mut(&mut self, pos: usize) -> Option<&mut T> {
        self.items.get_mut(pos)
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Insert before the element at `pos`, shifting the tail up by one.
    /// `pos` must name an existing element; use `add` to append.
    pub fn insert(&mut self, pos: usize, value: T) -> Result<usize, ContainerError> {
        let count = self.items.len();
        if pos >= count {
            tracing::warn!(pos, count, "dynamic array insert out of bounds");
            return Err(ContainerError::InvalidPosition { pos, count });
        }
        if count == self.capacity {
            self.grow()?;
        }
        self.items.insert(pos, value);
        Ok(self.items.len())
    }

    /// Remove the element at `pos`, shifting the tail down by one.
    pub fn remove(&mut self, pos: usize) -> Option<T> {
        if pos >= self.items.len() {
            return None;
        }
        Some(self.items.remove(pos))
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Release the array. With a disposer, every live element is passed to
    /// it once, last element first; without one the elements are dropped.
    pub fn teardown(mut self, dispose: Option<&mut dyn FnMut(T)>) {
        if let Some(dispose) = dispose {
            while let Some(item) = self.items.pop() {
                dispose(item);
            }
        }
    }
}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;
    fn index(&self, pos: usize) -> &T {
        &self.items[pos]
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: Appending past capacity doubles it and keeps every element.
    #[test]
    fn add_doubles_capacity() {
        let mut a = DynamicArray::new(10).unwrap();
        assert_eq!(a.capacity(), 10);
        for i in 0..1000 {
            assert_eq!(a.add(i).unwrap(), i + 1);
        }
        assert_eq!(a.len(), 1000);
        assert_eq!(a.capacity(), 1280);
        for i in 0..1000 {
            assert_eq!(a.get(i), Some(&i));
        }
    }

    /// Invariant: A zero-capacity array still grows on the first append.
    #[test]
    fn zero_capacity_grows() {
        let mut a = DynamicArray::new(0).unwrap();
        a.add("x").unwrap();
        a.add("y").unwrap();
        assert_eq!(a.capacity(), 2);
        assert_eq!(a.as_slice(), &["x", "y"]);
    }

    /// Invariant: `put` overwrites below the end, appends at the end, and
    /// rejects positions past the end without changing the array.
    #[test]
    fn put_bounds() {
        let mut a = DynamicArray::new(2).unwrap();
        a.add(1).unwrap();
        a.add(2).unwrap();
        assert_eq!(a.put(0, 10).unwrap(), 2);
        assert_eq!(a.put(2, 30).unwrap(), 3);
        assert_eq!(
            a.put(5, 99),
            Err(ContainerError::InvalidPosition { pos: 5, count: 3 })
        );
        assert_eq!(a.as_slice(), &[10, 2, 30]);
    }

    /// Invariant: `insert` shifts the tail up and only accepts existing positions.
    #[test]
    fn insert_shifts_tail() {
        let mut a = DynamicArray::new(3).unwrap();
        for v in [1, 2, 3] {
            a.add(v).unwrap();
        }
        assert_eq!(a.insert(1, 9).unwrap(), 4);
        assert_eq!(a.as_slice(), &[1, 9, 2, 3]);
        assert_eq!(a.capacity(), 6);
        assert!(a.insert(4, 0).is_err());
        assert_eq!(a.len(), 4);
    }

    /// Invariant: `remove` returns the element and shifts the tail down;
    /// out-of-range removal is a miss.
    #[test]
    fn remove_shifts_tail() {
        let mut a = DynamicArray::new(4).unwrap();
        for v in [1, 2, 3] {
            a.add(v).unwrap();
        }
        assert_eq!(a.remove(0), Some(1));
        assert_eq!(a.as_slice(), &[2, 3]);
        assert_eq!(a.remove(2), None);
        assert_eq!(a.last(), Some(&3));
    }

    /// Invariant: `replace` returns the previous element and keeps the length.
    #[test]
    fn replace_returns_previous() {
        let mut a = DynamicArray::new(1).unwrap();
        a.add(String::from("old")).unwrap();
        assert_eq!(a.replace(0, String::from("new")).as_deref(), Some("old"));
        assert_eq!(a.replace(1, String::from("none")), None);
        assert_eq!(a[0], "new");
    }

    /// Invariant: Teardown hands each element to the disposer once, in reverse.
    #[test]
    fn teardown_disposes_in_reverse() {
        let mut a = DynamicArray::new(2).unwrap();
        for v in [1, 2, 3] {
            a.add(v).unwrap();
        }
        let mut seen = Vec::new();
        a.teardown(Some(&mut |v| seen.push(v)));
        assert_eq!(seen, vec![3, 2, 1]);
    }

    /// Invariant: An impossible initial reservation reports allocation failure.
    #[test]
    fn oversized_create_fails() {
        assert_eq!(
            DynamicArray::<u64>::new(usize::MAX).unwrap_err(),
            ContainerError::Allocation
        );
    }
}
