use super::word_spans;
use crate::{ChainedHashStore, Result};
use std::io::BufRead;
use tracing::{debug, info};

/// bucket count of the word table behind a `WordIndex`
pub const INDEX_BUCKETS: usize = 1024;

/// Character positions of every word of a text.
///
/// Words are lowercased before they are indexed, so lookups ignore case.
/// Positions are 1-based character offsets of the first character of each
/// occurrence, a line break counting as one character.
///
/// ```
/// use symtab::text::WordIndex;
///
/// let index = WordIndex::build("The cat\nthe hat\n".as_bytes()).unwrap();
/// assert_eq!(&[1, 9], index.positions("THE").unwrap());
/// assert!(!index.contains("dog"));
/// ```
#[derive(Debug)]
pub struct WordIndex {
    // word -> slot in `positions`
    slots: ChainedHashStore<String, usize>,
    positions: Vec<Vec<u64>>,
}

impl WordIndex {
    /// index the text read from `reader`
    pub fn build<R: BufRead>(reader: R) -> Result<Self> {
        Self::build_with_buckets(reader, INDEX_BUCKETS)
    }

    /// index the text read from `reader` into a table of `buckets` buckets
    pub fn build_with_buckets<R: BufRead>(reader: R, buckets: usize) -> Result<Self> {
        let mut index = Self {
            slots: ChainedHashStore::with_buckets(buckets),
            positions: Vec::new(),
        };

        let mut line_start = 0u64;
        for line in reader.lines() {
            let line = line?;
            for (offset, word) in word_spans(&line) {
                index.record(word.to_lowercase(), line_start + offset as u64 + 1)?;
            }
            line_start += line.chars().count() as u64 + 1;
        }

        info!(words = index.len(), "built word index");
        debug!(
            buckets = index.slots.bucket_count(),
            load_factor = index.slots.load_factor(),
            "word index table"
        );
        Ok(index)
    }

    fn record(&mut self, word: String, position: u64) -> Result<()> {
        if self.slots.contains(word.as_str()) {
            let slot = *self.slots.get(word.as_str())?;
            self.positions[slot].push(position);
        } else {
            self.slots.put(word, self.positions.len());
            self.positions.push(vec![position]);
        }
        Ok(())
    }

    /// positions of `word`, in any letter casing,
    /// fails with `KeyNotFound` if the text does not contain it
    pub fn positions(&self, word: &str) -> Result<&[u64]> {
        let slot = *self.slots.get(word.to_lowercase().as_str())?;
        Ok(&self.positions[slot])
    }

    /// whether the text contains `word`, in any letter casing
    pub fn contains(&self, word: &str) -> bool {
        self.slots.contains(word.to_lowercase().as_str())
    }

    /// number of distinct words
    pub fn len(&self) -> usize {
        self.slots.size()
    }

    /// whether the text had no words at all
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// distinct words with their positions, in the word table's iteration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u64])> + '_ {
        self.slots
            .iter()
            .map(move |(word, &slot)| (word.as_str(), self.positions[slot].as_slice()))
    }

    /// distinct words, in the word table's iteration order
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.keys().map(String::as_str)
    }

    /// the table mapping each word to its slot
    pub fn table(&self) -> &ChainedHashStore<String, usize> {
        &self.slots
    }
}
