//! Error kinds surfaced by staging and entry resolution.
//!
//! Callers pattern-match on the Display text as well as the variant, so the
//! classification phrases below are part of the public contract.
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrepareError {
    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("No .tex files found")]
    NoTexFiles,

    #[error("No .tex files with {marker} found")]
    NoDocumentClassFiles { marker: String },

    #[error("Ambiguous LaTeX path (candidates: {})", .candidates.join(", "))]
    AmbiguousEntry { candidates: Vec<String> },
}

pub type PrepareResult<T> = Result<T, PrepareError>;

/// Attach a human-readable context to a raw I/O failure.
pub trait IoContext<T> {
    fn io_context<F>(self, context: F) -> PrepareResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> IoContext<T> for io::Result<T> {
    fn io_context<F>(self, context: F) -> PrepareResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|source| PrepareError::Io {
            context: context(),
            source,
        })
    }
}
