//! Common error type.

use crate::term;

/// Common error type.
#[derive(Debug)]
pub enum Error {
    Term(term::Error),
}

impl From<term::Error> for Error {
    fn from(err: term::Error) -> Self {
        Self::Term(err)
    }
}
