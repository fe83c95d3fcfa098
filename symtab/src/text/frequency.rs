use super::WordIndex;
use crate::{ChainedHashStore, Result, SymtabErrorKind};
use tracing::debug;

/// bucket count of the frequency table behind `WordFrequencies`
pub const FREQUENCY_BUCKETS: usize = 512;

/// Words of a `WordIndex` grouped by how often they occur, with the distinct
/// frequencies ranked from most to least common.
///
/// ```
/// use symtab::text::{WordFrequencies, WordIndex};
///
/// let index = WordIndex::build("a b a c a b".as_bytes()).unwrap();
/// let ranking = WordFrequencies::from_index(&index);
///
/// let (frequency, words) = ranking.rank(2).unwrap();
/// assert_eq!(2, frequency);
/// assert_eq!(&["b".to_owned()], words);
/// ```
#[derive(Debug)]
pub struct WordFrequencies {
    // frequency -> slot in `groups`
    slots: ChainedHashStore<usize, usize>,
    groups: Vec<Vec<String>>,
    // distinct frequencies, descending
    ranked: Vec<usize>,
}

impl WordFrequencies {
    /// group the words of `index` by frequency
    pub fn from_index(index: &WordIndex) -> Self {
        let mut slots: ChainedHashStore<usize, usize> =
            ChainedHashStore::with_buckets(FREQUENCY_BUCKETS);
        let mut groups: Vec<Vec<String>> = Vec::new();

        for (word, positions) in index.iter() {
            let frequency = positions.len();
            match slots.get(&frequency) {
                Ok(&slot) => groups[slot].push(word.to_owned()),
                Err(_) => {
                    slots.put(frequency, groups.len());
                    groups.push(vec![word.to_owned()]);
                }
            }
        }

        let mut ranked: Vec<usize> = slots.keys().copied().collect();
        ranked.sort_unstable_by(|a, b| b.cmp(a));
        debug!(distinct = ranked.len(), "ranked word frequencies");

        Self {
            slots,
            groups,
            ranked,
        }
    }

    /// number of distinct frequencies, which is the number of ranks
    pub fn distinct_frequencies(&self) -> usize {
        self.ranked.len()
    }

    /// The frequency at 1-based rank `k` and the words occurring that often.
    ///
    /// Fails with `OutOfRange` if there is no such rank.
    pub fn rank(&self, k: usize) -> Result<(usize, &[String])> {
        let frequency = *k
            .checked_sub(1)
            .and_then(|i| self.ranked.get(i))
            .ok_or(SymtabErrorKind::OutOfRange)?;
        let slot = *self.slots.get(&frequency)?;
        Ok((frequency, &self.groups[slot]))
    }

    /// Up to `n` consecutive ranks starting at rank `k`, cut short at the
    /// least common frequency.
    ///
    /// Fails with `OutOfRange` if rank `k` does not exist.
    pub fn range(&self, k: usize, n: usize) -> Result<Vec<(usize, &[String])>> {
        self.rank(k)?;
        (k..=self.ranked.len()).take(n).map(|rank| self.rank(rank)).collect()
    }
}
