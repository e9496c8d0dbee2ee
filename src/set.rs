//! Set: fixed-capacity, deduplicating collection whose notion of equality
//! is a predicate supplied at creation.

use crate::dynamic_array::DynamicArray;
use crate::error::ContainerError;
use core::fmt;
use std::rc::Rc;

/// Equality predicate carried by a set. Shared so that subsets, unions and
/// intersections reuse the receiver's predicate.
pub type Equality<T> = Rc<dyn Fn(&T, &T) -> bool>;

/// A set with a capacity fixed at creation.
///
/// Insertion scans the current elements with the set's predicate and skips
/// items that are already present. Sets never grow; inserting into a full
/// set fails with [`ContainerError::CapacityExceeded`]. There is no removal.
#[derive(Clone)]
pub struct Set<T> {
    capacity: usize,
    items: DynamicArray<T>,
    equals: Equality<T>,
}

impl<T> Set<T> {
    pub fn new<F>(capacity: usize, equals: F) -> Result<Self, ContainerError>
    where
        F: Fn(&T, &T) -> bool + 'static,
    {
        Self::with_equality(capacity, Rc::new(equals))
    }

    pub fn with_equality(capacity: usize, equals: Equality<T>) -> Result<Self, ContainerError> {
        Ok(Self {
            capacity,
            items: DynamicArray::new(capacity)?,
            equals,
        })
    }

    /// A set compared with `PartialEq`.
    pub fn with_eq(capacity: usize) -> Result<Self, ContainerError>
    where
        T: PartialEq,
    {
        Self::new(capacity, |a: &T, b: &T| a == b)
    }

    pub fn equality(&self) -> &Equality<T> {
        &self.equals
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

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn get_item(&self, pos: usize) -> Option<&T> {
        self.items.get(pos)
    }

    /// Index of the first element equal to `item` under this set's predicate.
    pub fn get_item_index(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|e| (self.equals)(e, item))
    }

    pub fn contains(&self, item: &T) -> bool {
        self.get_item_index(item).is_some()
    }

    fn overflow(&self, requested: usize) -> ContainerError {
        tracing::warn!(
            capacity = self.capacity,
            count = self.len(),
            requested,
            "set insertion would exceed capacity"
        );
        ContainerError::CapacityExceeded {
            capacity: self.capacity,
            count: self.len(),
            requested,
        }
    }

    /// Append without the duplicate scan. Capacity is still enforced.
    fn push(&mut self, item: T) -> Result<usize, ContainerError> {
        if self.len() >= self.capacity {
            return Err(self.overflow(1));
        }
        self.items.add(item)
    }

    /// Insert `item` unless an equal element is present. Returns the count
    /// afterwards. The capacity check comes first, so a full set rejects
    /// even an item it already holds.
    pub fn add_item(&mut self, item: T) -> Result<usize, ContainerError> {
        if self.len() >= self.capacity {
            return Err(self.overflow(1));
        }
        if self.contains(&item) {
            return Ok(self.len());
        }
        self.items.add(item)
    }

    /// Insert every item in order, deduplicating each one. The whole batch
    /// is refused up front if it could not fit before deduplication.
    pub fn add_items<I>(&mut self, items: I) -> Result<usize, ContainerError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();
        let n = items.len();
        if n > self.capacity - self.len() {
            return Err(self.overflow(n));
        }
        for item in items {
            self.add_item(item)?;
        }
        Ok(self.len())
    }

    /// Release the set. With a disposer, each element is passed to it once,
    /// in index order.
    pub fn teardown(self, dispose: Option<&mut dyn FnMut(T)>) {
        if let Some(dispose) = dispose {
            for item in self.items {
                dispose(item);
            }
        }
    }
}

impl<T: Clone> Set<T> {
    /// The power set, `2^n` subsets in binary-counting order: element `i`
    /// of this set contributes bit `i` of the subset's position.
    ///
    /// Subsets share this set's predicate. The outer set's predicate never
    /// reports equality, so no subset is ever merged with another.
    pub fn all_subsets(&self) -> Result<Set<Set<T>>, ContainerError> {
        let total = u32::try_from(self.len())
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .ok_or_else(|| {
                tracing::warn!(count = self.len(), "power set size overflows usize");
                ContainerError::Allocation
            })?;

        let mut all = Set::new(total, |_: &Set<T>, _: &Set<T>| false)?;
        all.push(Set::with_equality(0, Rc::clone(&self.equals))?)?;

        for item in self.iter() {
            // Subsets appended for this item are not extended again.
            let snapshot = all.len();
            for j in 0..snapshot {
                let base = &all.items[j];
                let mut subset = Set::with_equality(base.len() + 1, Rc::clone(&self.equals))?;
                subset.add_items(base.iter().cloned())?;
                subset.add_item(item.clone())?;
                all.push(subset)?;
            }
        }
        tracing::debug!(subsets = all.len(), "power set built");
        Ok(all)
    }

    /// This set's elements in order, then `other`'s elements that are not
    /// equal (under this set's predicate) to anything already present.
    pub fn union(&self, other: &Set<T>) -> Result<Set<T>, ContainerError> {
        let capacity = self
            .len()
            .checked_add(other.len())
            .ok_or(ContainerError::Allocation)?;
        let mut out = Set::with_equality(capacity, Rc::clone(&self.equals))?;
        for item in self.iter() {
            out.push(item.clone())?;
        }
        out.add_items(other.iter().cloned())?;
        Ok(out)
    }

    /// Elements of this set that have an equal element in `other`, in this
    /// set's order. Every element is looked up in the whole of `other`, using
    /// this set's predicate. Returns `None` when nothing matches.
    pub fn intersection(&self, other: &Set<T>) -> Result<Option<Set<T>>, ContainerError> {
        let mut matched: DynamicArray<&T> = DynamicArray::new(self.len())?;
        for item in self.iter() {
            if other.iter().any(|o| (self.equals)(o, item)) {
                matched.add(item)?;
            }
        }

        if matched.is_empty() {
            return Ok(None);
        }
        let mut out = Set::with_equality(matched.len(), Rc::clone(&self.equals))?;
        for item in matched.iter() {
            out.push((*item).clone())?;
        }
        Ok(Some(out))
    }
}

impl<T: fmt::Debug> fmt::Debug for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}
