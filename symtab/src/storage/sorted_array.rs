use super::{write_pairs, SymbolTable};
use crate::{Result, SymtabErrorKind};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

/// physical capacity of a freshly created `SortedArrayStore`
pub const DEFAULT_CAPACITY: usize = 8;

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Symbol table backed by an array kept in ascending key order.
///
/// Appending a key greater than every stored key is O(1); any other insertion
/// shifts the greater entries one slot to the right. Lookups binary-search
/// the occupied region.
///
/// ```
/// use symtab::SortedArrayStore;
///
/// let mut store = SortedArrayStore::new();
/// store.put("a".to_owned(), 1);
/// store.put("c".to_owned(), 3);
/// store.put("b".to_owned(), 2);
///
/// assert_eq!(vec!["a", "b", "c"], store.keys().map(String::as_str).collect::<Vec<_>>());
/// assert_eq!(2, *store.get("b").unwrap());
/// assert!(!store.contains("z"));
/// ```
#[derive(Debug, Clone)]
pub struct SortedArrayStore<K, V> {
    // occupied region, strictly ascending by key
    entries: Vec<Entry<K, V>>,
    capacity: usize,
}

impl<K: Ord, V> SortedArrayStore<K, V> {
    /// create an empty store with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// create an empty store with room for `capacity` entries, at least one
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// insert the pair, or overwrite the value of an equal key
    pub fn put(&mut self, key: K, value: V) {
        // fast path: empty, or at least as large as the last key
        let ordering = self.entries.last().map(|last| key.cmp(&last.key));
        match ordering {
            None | Some(Ordering::Greater) => self.entries.push(Entry { key, value }),
            Some(Ordering::Equal) => {
                let last = self.entries.len() - 1;
                self.entries[last].value = value;
                return;
            }
            Some(Ordering::Less) => match self.search(&key) {
                Ok(index) => {
                    self.entries[index].value = value;
                    return;
                }
                Err(index) => self.entries.insert(index, Entry { key, value }),
            },
        }

        if self.entries.len() > self.capacity / 2 {
            self.grow();
        }
    }

    /// get a view of the value associated with key
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key) {
            Ok(index) => Ok(&self.entries[index].value),
            Err(_) => Err(SymtabErrorKind::KeyNotFound.into()),
        }
    }

    /// whether an entry with the given key exists
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_ok()
    }

    /// Binary search over the closed interval `[left, right]` of occupied slots.
    ///
    /// Returns `Ok(index)` of the matching entry, or `Err(index)` of the slot
    /// the key would have to be inserted at to keep the order.
    fn search<Q>(&self, key: &Q) -> std::result::Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if self.entries.is_empty() {
            return Err(0);
        }

        let mut left = 0;
        let mut right = self.entries.len() - 1;

        while left <= right {
            let middle = left + (right - left) / 2;
            match key.cmp(self.entries[middle].key.borrow()) {
                Ordering::Equal => return Ok(middle),
                Ordering::Less => {
                    // interval would become empty below index 0
                    if middle == 0 {
                        return Err(0);
                    }
                    right = middle - 1;
                }
                Ordering::Greater => left = middle + 1,
            }
        }

        Err(left)
    }
}

impl<K, V> SortedArrayStore<K, V> {
    /// number of stored entries (the logical length)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// physical capacity, doubled whenever the logical length exceeds half of it
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// entries in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|entry| &entry.key)
    }

    fn grow(&mut self) {
        let capacity = self.capacity * 2;
        debug!(from = self.capacity, to = capacity, "growing sorted array");
        self.entries.reserve_exact(capacity - self.entries.len());
        self.capacity = capacity;
    }
}

impl<K: Ord, V> Default for SortedArrayStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> SymbolTable<K, V> for SortedArrayStore<K, V> {
    fn put(&mut self, key: K, value: V) {
        SortedArrayStore::put(self, key, value)
    }

    fn get(&self, key: &K) -> Result<&V> {
        SortedArrayStore::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        SortedArrayStore::contains(self, key)
    }

    fn len(&self) -> usize {
        SortedArrayStore::len(self)
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for SortedArrayStore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pairs(f, self.iter())
    }
}
