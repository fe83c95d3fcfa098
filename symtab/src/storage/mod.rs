use crate::Result;
use std::fmt;
use std::str::FromStr;

mod binary_tree;
mod chained_hash;
mod hasher;
mod sorted_array;

pub use binary_tree::BinaryTreeStore;
pub use chained_hash::{ChainedHashStore, Iter, Keys, DEFAULT_BUCKETS};
pub use hasher::Xxh3State;
pub use sorted_array::{SortedArrayStore, DEFAULT_CAPACITY};

/// SymbolTable defines the contract shared by every store:
/// insert-or-update, point lookup and membership test.
///
/// None of the operations suspend or block, and a failed `get`
/// leaves the store untouched.
pub trait SymbolTable<K, V> {
    /// insert the pair, or overwrite the value if an equal key is stored
    fn put(&mut self, key: K, value: V);

    /// get a view of the value stored under key,
    /// fails with `KeyNotFound` if there is none
    fn get(&self, key: &K) -> Result<&V>;

    /// whether an entry with the given key exists
    fn contains(&self, key: &K) -> bool;

    /// number of live entries
    fn len(&self) -> usize;

    /// whether the table holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Selects one of the three stores by name
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StoreKind {
    /// `SortedArrayStore`
    Sorted,
    /// `BinaryTreeStore`
    Tree,
    /// `ChainedHashStore`
    Hash,
}

impl StoreKind {
    /// all kinds, in the order they are reported
    pub const ALL: [StoreKind; 3] = [StoreKind::Sorted, StoreKind::Tree, StoreKind::Hash];
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "sorted" => Ok(Self::Sorted),
            "tree" => Ok(Self::Tree),
            "hash" => Ok(Self::Hash),
            _ => Err(format!("Unsupported store kind: {}", s)),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Sorted => write!(f, "sorted"),
            Self::Tree => write!(f, "tree"),
            Self::Hash => write!(f, "hash"),
        }
    }
}

// renders `[{k, v}, {k, v}]`
pub(crate) fn write_pairs<'a, K, V, I>(f: &mut fmt::Formatter<'_>, pairs: I) -> fmt::Result
where
    K: fmt::Display + 'a,
    V: fmt::Display + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    write!(f, "[")?;
    for (i, (key, value)) in pairs.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{{{}, {}}}", key, value)?;
    }
    write!(f, "]")
}
