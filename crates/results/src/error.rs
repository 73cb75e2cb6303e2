//! Result and Error types for fetools-results

/// Type alias for Result<T, results::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `fetools-results` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed to load mesh")]
    MeshError(#[from] fetools_mesh::Error),

    #[error("manifest parse error on line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    #[error("field \"{0}\" is not in the result file")]
    FieldNotFound(String),

    #[error("card {card} out of range, expected 1 to {count}")]
    OutOfRangeCard { card: usize, count: usize },

    #[error("element rank {rank} out of range for {count} elements")]
    OutOfRangeElement { rank: usize, count: usize },

    #[error("result file ended early, expected {expected} bytes from offset {offset}")]
    TruncatedRead { offset: u64, expected: usize },

    #[error("field \"{name}\" has {found} values, expected one per element ({expected})")]
    FieldLengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("failed serde JSON operation")]
    JSONError(#[from] serde_json::Error),
}
