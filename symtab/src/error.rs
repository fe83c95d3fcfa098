use failure::{Backtrace, Context, Fail};
use std::fmt;
use std::io;
use std::num::ParseIntError;

/// Error Type for the symbol tables and the tools built on them
#[derive(Debug)]
pub struct SymtabError {
    inner: Context<SymtabErrorKind>,
}

/// Kinds of possible Errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Fail)]
pub enum SymtabErrorKind {
    /// Lookup of a key that no entry matches
    #[fail(display = "Key not found")]
    KeyNotFound,
    /// Input that does not have the expected shape
    #[fail(display = "Invalid input")]
    InvalidInput,
    /// A rank or position outside of what is available
    #[fail(display = "Index out of range")]
    OutOfRange,
    /// IoError triggered by file or terminal I/Os
    #[fail(display = "Io Error")]
    IoError,
    /// Serialization Error triggered by serde
    #[fail(display = "Json error")]
    JsonError,
}

impl SymtabError {
    /// get the kind of the error
    pub fn kind(&self) -> SymtabErrorKind {
        *self.inner.get_context()
    }
}

impl Fail for SymtabError {
    fn cause(&self) -> Option<&dyn Fail> {
        self.inner.cause()
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        self.inner.backtrace()
    }
}

impl fmt::Display for SymtabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl From<SymtabErrorKind> for SymtabError {
    fn from(kind: SymtabErrorKind) -> SymtabError {
        SymtabError {
            inner: Context::new(kind),
        }
    }
}

impl From<Context<SymtabErrorKind>> for SymtabError {
    fn from(context: Context<SymtabErrorKind>) -> SymtabError {
        SymtabError { inner: context }
    }
}

impl From<io::Error> for SymtabError {
    fn from(error: io::Error) -> SymtabError {
        error.context(SymtabErrorKind::IoError).into()
    }
}

impl From<serde_json::Error> for SymtabError {
    fn from(error: serde_json::Error) -> SymtabError {
        error.context(SymtabErrorKind::JsonError).into()
    }
}

impl From<ParseIntError> for SymtabError {
    fn from(error: ParseIntError) -> SymtabError {
        error.context(SymtabErrorKind::InvalidInput).into()
    }
}
