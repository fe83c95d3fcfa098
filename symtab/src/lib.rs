#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

//! This crate provides three symbol tables that implement the `SymbolTable` trait:
//! `SortedArrayStore`, an ordered array searched with binary search, `BinaryTreeStore`,
//! an unbalanced binary search tree, and `ChainedHashStore`, a fixed-size hash table
//! with separate chaining.
//!
//! Besides, the crate provides the text utilities that feed them (filtering, word
//! position indexing, frequency ranking) and a word-count workload used to time the
//! stores against each other.

mod error;
mod storage;
pub mod text;
pub mod workload;

pub use error::SymtabError;
pub use error::SymtabErrorKind;
pub use storage::{
    BinaryTreeStore, ChainedHashStore, Iter, Keys, SortedArrayStore, StoreKind, SymbolTable,
    Xxh3State, DEFAULT_BUCKETS, DEFAULT_CAPACITY,
};

/// Result type used by this crate
pub type Result<T> = core::result::Result<T, SymtabError>;
