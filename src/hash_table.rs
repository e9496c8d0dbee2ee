//! HashTable: fixed bucket count, per-bucket growable slot arrays, and
//! multi-map semantics (a key may be stored any number of times).

use crate::dynamic_array::DynamicArray;
use crate::error::ContainerError;
use crate::hash::super_fast_hash;

/// Initial slot capacity of every bucket.
pub const DEFAULT_BUCKET_CAPACITY: usize = 10;

/// One stored key/value pair. The key is an owned copy of the caller's.
#[derive(Debug)]
pub struct Entry<V> {
    hash: u32,
    key: Box<str>,
    value: V,
}

impl<V> Entry<V> {
    pub fn hash(&self) -> u32 {
        self.hash
    }
    pub fn key(&self) -> &str {
        &self.key
    }
    pub fn value(&self) -> &V {
        &self.value
    }
}

/// Slot array for one bucket. Removal leaves a `None` tombstone in place;
/// `live` counts the occupied slots.
#[derive(Debug)]
struct Bucket<V> {
    slots: DynamicArray<Option<Entry<V>>>,
    live: usize,
}

impl<V> Bucket<V> {
    fn new(capacity: usize) -> Result<Self, ContainerError> {
        Ok(Self {
            slots: DynamicArray::new(capacity)?,
            live: 0,
        })
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| matches!(slot, Some(e) if &*e.key == key))
    }

    fn first(&self, key: &str) -> Option<&Entry<V>> {
        self.slots.get(self.position(key)?)?.as_ref()
    }

    /// Place `entry` in the first tombstone, or append it. Appending keeps
    /// the slot count strictly below capacity.
    fn insert(&mut self, entry: Entry<V>) -> Result<&Entry<V>, ContainerError> {
        let pos = match self.slots.iter().position(Option::is_none) {
            Some(hole) => hole,
            None => {
                while self.slots.len() + 1 >= self.slots.capacity() {
                    self.slots.grow()?;
                }
                self.slots.add(None)? - 1
            }
        };
        let count = self.slots.len();
        let slot = self
            .slots
            .get_mut(pos)
            .ok_or(ContainerError::InvalidPosition { pos, count })?;
        self.live += 1;
        let stored: &Entry<V> = slot.insert(entry);
        Ok(stored)
    }

    fn remove(&mut self, key: &str) -> Option<Entry<V>> {
        let pos = self.position(key)?;
        let entry = self.slots.get_mut(pos)?.take()?;
        self.live -= 1;
        Some(entry)
    }
}

/// String-keyed multi-map over a fixed number of buckets.
///
/// Each key is hashed with [`super_fast_hash`] and lands in bucket
/// `hash % bucket_count`. Lookups compare full keys, so colliding keys are
/// told apart. Duplicate keys are kept in insertion order.
#[derive(Debug)]
pub struct HashTable<V> {
    buckets: Vec<Bucket<V>>,
    len: usize,
}

impl<V> HashTable<V> {
    pub fn new(bucket_count: usize) -> Result<Self, ContainerError> {
        Self::with_bucket_capacity(bucket_count, DEFAULT_BUCKET_CAPACITY)
    }

    pub fn with_bucket_capacity(
        bucket_count: usize,
        bucket_capacity: usize,
    ) -> Result<Self, ContainerError> {
        if bucket_count == 0 {
            tracing::warn!("hash table requested with zero buckets");
            return Err(ContainerError::ZeroBuckets);
        }
        let mut buckets = Vec::new();
        if let Err(e) = buckets.try_reserve_exact(bucket_count) {
            tracing::warn!(bucket_count, "hash table allocation failed");
            return Err(e.into());
        }
        for _ in 0..bucket_count {
            buckets.push(Bucket::new(bucket_capacity)?);
        }
        Ok(Self { buckets, len: 0 })
    }

    fn bucket_index(&self, hash: u32) -> usize {
        hash as usize % self.buckets.len()
    }

    fn bucket(&self, key: &str) -> &Bucket<V> {
        &self.buckets[self.bucket_index(super_fast_hash(key.as_bytes()))]
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of live entries, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store `value` under a copy of `key`. Existing entries for the same
    /// key are left alone; the new one follows them in slot order unless it
    /// fills an earlier tombstone.
    pub fn put(&mut self, key: &str, value: V) -> Result<&Entry<V>, ContainerError> {
        let hash = super_fast_hash(key.as_bytes());
        let idx = self.bucket_index(hash);
        let entry = Entry {
            hash,
            key: key.into(),
            value,
        };
        let stored = self.buckets[idx].insert(entry)?;
        self.len += 1;
        Ok(stored)
    }

    /// First live value stored under `key`, in slot order.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.bucket(key).first(key).map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let idx = self.bucket_index(super_fast_hash(key.as_bytes()));
        let bucket = &mut self.buckets[idx];
        let pos = bucket.position(key)?;
        bucket
            .slots
            .get_mut(pos)?
            .as_mut()
            .map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.bucket(key).position(key).is_some()
    }

    /// Every live value stored under `key`, in slot order.
    pub fn get_all(&self, key: &str) -> Result<DynamicArray<&V>, ContainerError> {
        let bucket = self.bucket(key);
        let mut out = DynamicArray::new(bucket.live)?;
        for e in bucket.slots.iter().flatten() {
            if &*e.key == key {
                out.add(&e.value)?;
            }
        }
        Ok(out)
    }

    /// Remove the first entry stored under `key` and return its value. The
    /// slot becomes a tombstone.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.bucket_index(super_fast_hash(key.as_bytes()));
        let entry = self.buckets[idx].remove(key)?;
        self.len -= 1;
        Some(entry.value)
    }

    /// Keys of all live entries, bucket by bucket, borrowed from the table.
    pub fn keys(&self) -> Result<DynamicArray<&str>, ContainerError> {
        let mut out = DynamicArray::new(self.len)?;
        for (key, _) in self.iter() {
            out.add(key)?;
        }
        Ok(out)
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            slots: <&[Option<Entry<V>>]>::default().iter(),
        }
    }

    /// Release the table. With a disposer, each live value is passed to it
    /// once (bucket order, then slot order); keys are always dropped.
    pub fn teardown(self, mut dispose: Option<&mut dyn FnMut(V)>) {
        for mut bucket in self.buckets {
            for slot in bucket.slots.iter_mut() {
                if let (Some(entry), Some(dispose)) = (slot.take(), dispose.as_mut()) {
                    dispose(entry.value);
                }
            }
        }
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over live `(key, value)` pairs in bucket order, then slot order.
pub struct Iter<'a, V> {
    buckets: core::slice::Iter<'a, Bucket<V>>,
    slots: core::slice::Iter<'a, Option<Entry<V>>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.slots.next() {
                Some(Some(e)) => return Some((e.key(), &e.value)),
                Some(None) => continue,
                None => self.slots = self.buckets.next()?.slots.iter(),
            }
        }
    }
}
