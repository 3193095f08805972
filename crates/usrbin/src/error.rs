//! Result and Error types for ftools-usrbin

/// Type alias for Result<T, usrbin::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `ftools-usrbin` crate
///
/// Every parse failure carries the zero-based index of the block it occurred
/// in. A failure aborts the whole read, there is no partial recovery.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed serde JSON operation")]
    JSONError(#[from] serde_json::Error),

    #[error("malformed axis block in record {block} ({reason})")]
    MalformedAxisBlock { block: usize, reason: String },

    #[error("malformed data block in record {block} ({reason})")]
    MalformedDataBlock { block: usize, reason: String },

    #[error(
        "inconsistent number of values in record {block} (expected {expected:?}, found {found:?})"
    )]
    GridSizeMismatch {
        block: usize,
        expected: usize,
        found: usize,
    },

    #[error("input ended unexpectedly in record {block} while in state {state}")]
    UnexpectedEndOfInput { block: usize, state: String },

    #[error("record {0} not found")]
    RecordNotFound(usize),

    #[error("no bins selected along axis {0}")]
    EmptySelection(usize),

    #[error("failed to initialise progress bar ({0})")]
    ProgressBar(String),
}

impl Error {
    /// Index of the block that failed to parse, if the error came from one
    pub fn block(&self) -> Option<usize> {
        match self {
            Error::MalformedAxisBlock { block, .. }
            | Error::MalformedDataBlock { block, .. }
            | Error::GridSizeMismatch { block, .. }
            | Error::UnexpectedEndOfInput { block, .. } => Some(*block),
            _ => None,
        }
    }
}
