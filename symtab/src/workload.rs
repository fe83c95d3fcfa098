//! The word-count workload the stores are compared on, and a small timing
//! harness around it.

use crate::{
    BinaryTreeStore, ChainedHashStore, Result, SortedArrayStore, StoreKind, SymbolTable,
    DEFAULT_BUCKETS, DEFAULT_CAPACITY,
};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::info;

/// Sizing of freshly created tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// initial capacity of a sorted array store
    pub capacity: usize,
    /// bucket count of a chained hash store
    pub buckets: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            buckets: DEFAULT_BUCKETS,
        }
    }
}

/// create an empty word-count table of the given kind, default sized
pub fn new_table(kind: StoreKind) -> Box<dyn SymbolTable<String, usize>> {
    new_table_with(kind, TableConfig::default())
}

/// create an empty word-count table of the given kind, sized by `config`
pub fn new_table_with(
    kind: StoreKind,
    config: TableConfig,
) -> Box<dyn SymbolTable<String, usize>> {
    match kind {
        StoreKind::Sorted => Box::new(SortedArrayStore::with_capacity(config.capacity)),
        StoreKind::Tree => Box::new(BinaryTreeStore::new()),
        StoreKind::Hash => Box::new(ChainedHashStore::with_buckets(config.buckets)),
    }
}

/// Count the occurrences of every word in `table`: a membership test, then a
/// lookup and increment for known words, then an insert-or-update.
pub fn count_words<T>(table: &mut T, words: &[String]) -> Result<()>
where
    T: SymbolTable<String, usize> + ?Sized,
{
    for word in words {
        let count = if table.contains(word) {
            *table.get(word)? + 1
        } else {
            1
        };
        table.put(word.clone(), count);
    }
    Ok(())
}

/// Mean time of `rounds` word counts over `words`, each on a fresh table of
/// the given kind. Table construction is not timed.
pub fn time_word_count(
    kind: StoreKind,
    config: TableConfig,
    words: &[String],
    rounds: u32,
) -> Result<Duration> {
    let rounds = rounds.max(1);
    let mut total = Duration::default();
    for _ in 0..rounds {
        let mut table = new_table_with(kind, config);
        let start = Instant::now();
        count_words(table.as_mut(), words)?;
        total += start.elapsed();
    }
    Ok(total / rounds)
}

/// Mean word-count time of one store kind
#[derive(Debug, Clone, Serialize)]
pub struct Timing {
    /// store the words were counted in
    pub store: String,
    /// number of words counted per round
    pub words: usize,
    /// number of rounds averaged
    pub rounds: u32,
    /// mean time per round, in nanoseconds
    pub mean_ns: u64,
}

/// time every store kind on the same words
pub fn compare(words: &[String], rounds: u32, config: TableConfig) -> Result<Vec<Timing>> {
    StoreKind::ALL
        .iter()
        .map(|&kind| {
            let mean = time_word_count(kind, config, words, rounds)?;
            info!(store = %kind, mean_ns = mean.as_nanos() as u64, "timed word count");
            Ok(Timing {
                store: kind.to_string(),
                words: words.len(),
                rounds: rounds.max(1),
                mean_ns: mean.as_nanos() as u64,
            })
        })
        .collect()
}
