//! Text utilities that turn plain text into input for the symbol tables:
//! character filtering, tokenizing, a word position index and a ranking of
//! words by how often they occur.

mod filter;
mod frequency;
mod index;

pub use filter::{filter_text, read_words, word_spans, words};
pub use frequency::{WordFrequencies, FREQUENCY_BUCKETS};
pub use index::{WordIndex, INDEX_BUCKETS};
