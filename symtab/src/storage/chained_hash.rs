use super::{write_pairs, SymbolTable, Xxh3State};
use crate::{Result, SymtabErrorKind};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::iter::FusedIterator;

/// bucket count of a `ChainedHashStore` created with `new`
pub const DEFAULT_BUCKETS: usize = 128;

// handle into `ChainedHashStore::nodes`
type Handle = usize;

#[derive(Debug, Clone)]
struct ChainNode<K, V> {
    hash: u64,
    key: K,
    value: V,
    next: Option<Handle>,
}

/// Hash table with a fixed number of buckets and separate chaining.
///
/// Each bucket heads a singly linked chain; chain nodes live in one arena and
/// link to each other by handle. New keys are appended at the tail of their
/// chain. The bucket array never grows, so chains simply get longer as the
/// load factor rises.
///
/// ```
/// use symtab::ChainedHashStore;
///
/// let mut table = ChainedHashStore::with_buckets(16);
/// table.put("apple".to_owned(), 3);
/// table.put("pear".to_owned(), 5);
/// table.put("apple".to_owned(), 4);
///
/// assert_eq!(2, table.size());
/// assert_eq!(4, *table.get("apple").unwrap());
/// assert!(table.get("plum").is_err());
/// assert_eq!(2, table.keys().count());
/// ```
#[derive(Debug, Clone)]
pub struct ChainedHashStore<K, V, S = Xxh3State> {
    heads: Vec<Option<Handle>>,
    // every live entry exactly once, so its length is the table size
    nodes: Vec<ChainNode<K, V>>,
    hash_builder: S,
}

impl<K: Hash + Eq, V> ChainedHashStore<K, V, Xxh3State> {
    /// create an empty table with `DEFAULT_BUCKETS` buckets
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// create an empty table with the given number of buckets, at least one
    pub fn with_buckets(buckets: usize) -> Self {
        Self::with_buckets_and_hasher(buckets, Xxh3State::new())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ChainedHashStore<K, V, S> {
    /// create an empty table hashing keys with `hash_builder`
    pub fn with_buckets_and_hasher(buckets: usize, hash_builder: S) -> Self {
        Self {
            heads: vec![None; buckets.max(1)],
            nodes: Vec::new(),
            hash_builder,
        }
    }

    /// insert the pair, or overwrite the value of an equal key
    pub fn put(&mut self, key: K, value: V) {
        let hash = self.hash(&key);
        let bucket = self.bucket_index(hash);

        let mut tail = None;
        let mut current = self.heads[bucket];
        while let Some(handle) = current {
            let node = &mut self.nodes[handle];
            if node.hash == hash && node.key == key {
                node.value = value;
                return;
            }
            tail = Some(handle);
            current = node.next;
        }

        let handle = self.nodes.len();
        self.nodes.push(ChainNode {
            hash,
            key,
            value,
            next: None,
        });
        match tail {
            Some(last) => self.nodes[last].next = Some(handle),
            None => self.heads[bucket] = Some(handle),
        }
    }

    /// get a view of the value associated with key
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key)
            .map(|node| &node.value)
            .ok_or_else(|| SymtabErrorKind::KeyNotFound.into())
    }

    /// whether an entry with the given key exists
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    fn find<Q>(&self, key: &Q) -> Option<&ChainNode<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash(key);
        let mut current = self.heads[self.bucket_index(hash)];
        while let Some(handle) = current {
            let node = &self.nodes[handle];
            // cached hash rejects most mismatches before the full comparison
            if node.hash == hash && node.key.borrow() == key {
                return Some(node);
            }
            current = node.next;
        }
        None
    }

    fn hash<Q: Hash + ?Sized>(&self, key: &Q) -> u64 {
        let mut hasher = self.hash_builder.build_hasher();
        key.hash(&mut hasher);
        hasher.finish()
    }
}

impl<K, V, S> ChainedHashStore<K, V, S> {
    /// number of live entries
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// same as `size`
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// number of buckets, fixed at construction
    pub fn bucket_count(&self) -> usize {
        self.heads.len()
    }

    /// live entries per bucket
    pub fn load_factor(&self) -> f64 {
        self.nodes.len() as f64 / self.heads.len() as f64
    }

    /// length of the chain in every bucket, in bucket order
    pub fn chain_lengths(&self) -> Vec<usize> {
        self.heads
            .iter()
            .map(|head| {
                let mut len = 0;
                let mut current = *head;
                while let Some(handle) = current {
                    len += 1;
                    current = self.nodes[handle].next;
                }
                len
            })
            .collect()
    }

    /// keys in bucket order, and in insertion order within a bucket
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.iter(),
        }
    }

    /// entries in the same order as `keys`
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            heads: &self.heads,
            nodes: &self.nodes,
            bucket: 0,
            current: None,
            emitted: 0,
        }
    }

    // hashes are u64, so they are never negative
    fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.heads.len() as u64) as usize
    }
}

impl<K: Hash + Eq, V> Default for ChainedHashStore<K, V, Xxh3State> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> SymbolTable<K, V> for ChainedHashStore<K, V, S> {
    fn put(&mut self, key: K, value: V) {
        ChainedHashStore::put(self, key, value)
    }

    fn get(&self, key: &K) -> Result<&V> {
        ChainedHashStore::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        ChainedHashStore::contains(self, key)
    }

    fn len(&self) -> usize {
        ChainedHashStore::len(self)
    }
}

impl<K: fmt::Display, V: fmt::Display, S> fmt::Display for ChainedHashStore<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pairs(f, self.iter())
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashStore<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// Cursor over the entries of a `ChainedHashStore`.
///
/// Walks the current chain while it has nodes, otherwise moves on to the next
/// bucket, and stops as soon as every entry has been produced, without
/// scanning trailing empty buckets.
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    heads: &'a [Option<Handle>],
    nodes: &'a [ChainNode<K, V>],
    // next bucket to enter
    bucket: usize,
    current: Option<Handle>,
    emitted: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.emitted < self.nodes.len() {
            if let Some(handle) = self.current {
                let node = &self.nodes[handle];
                self.current = node.next;
                self.emitted += 1;
                return Some((&node.key, &node.value));
            }

            // an unlinked node cannot exist, so the buckets never run out first
            let head = self.heads.get(self.bucket)?;
            self.current = *head;
            self.bucket += 1;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.nodes.len() - self.emitted;
        (remaining, Some(remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Keys of a `ChainedHashStore`, see `ChainedHashStore::keys`
#[derive(Debug)]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::BuildHasherDefault;

    // maps keys starting with 'a' or 'b' to 1 and 'c' to 2
    #[derive(Default)]
    struct FirstLetterHasher(u64);

    impl Hasher for FirstLetterHasher {
        fn finish(&self) -> u64 {
            self.0
        }

        fn write(&mut self, bytes: &[u8]) {
            if self.0 != 0 {
                return;
            }
            match bytes.first() {
                Some(b'a') | Some(b'b') => self.0 = 1,
                Some(b'c') => self.0 = 2,
                _ => {}
            }
        }
    }

    type FirstLetter = BuildHasherDefault<FirstLetterHasher>;

    fn abc_table() -> AbcTable {
        let mut table = ChainedHashStore::with_buckets_and_hasher(4, FirstLetter::default());
        table.put("a", 1);
        table.put("c", 3);
        table.put("b", 2);
        table
    }

    type AbcTable = ChainedHashStore<&'static str, i32, FirstLetter>;

    fn chain(table: &AbcTable, bucket: usize) -> Vec<&'static str> {
        let mut keys = vec![];
        let mut current = table.heads[bucket];
        while let Some(handle) = current {
            keys.push(table.nodes[handle].key);
            current = table.nodes[handle].next;
        }
        keys
    }

    #[test]
    fn colliding_keys_share_a_chain() {
        let table = abc_table();
        assert_eq!(Vec::<&str>::new(), chain(&table, 0));
        assert_eq!(vec!["a", "b"], chain(&table, 1));
        assert_eq!(vec!["c"], chain(&table, 2));
        assert_eq!(vec![0, 2, 1, 0], table.chain_lengths());
    }

    #[test]
    fn iteration_is_bucket_then_chain_order() {
        let table = abc_table();
        assert_eq!(vec![&"a", &"b", &"c"], table.keys().collect::<Vec<_>>());
        assert_eq!(3, table.size());
        assert_eq!("[{a, 1}, {b, 2}, {c, 3}]", table.to_string());
    }

    #[test]
    fn update_inside_chain_keeps_size() {
        let mut table = abc_table();
        table.put("b", 20);
        assert_eq!(3, table.size());
        assert_eq!(20, *table.get(&"b").unwrap());
        assert_eq!(vec!["a", "b"], chain(&table, 1));
    }

    #[test]
    fn iterator_is_exact_and_fused() {
        let table = abc_table();
        let mut keys = table.keys();
        assert_eq!(3, keys.len());
        keys.next();
        assert_eq!(2, keys.len());
        assert_eq!(2, keys.by_ref().count());
        assert_eq!(None, keys.next());
        assert_eq!(None, keys.next());
    }

    #[test]
    fn zero_buckets_clamped_to_one() {
        let mut table = ChainedHashStore::with_buckets(0);
        table.put(1, "one");
        table.put(2, "two");
        assert_eq!(1, table.bucket_count());
        assert_eq!(vec![2], table.chain_lengths());
        assert!((table.load_factor() - 2.0).abs() < f64::EPSILON);
    }
}
