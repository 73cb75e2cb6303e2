//! Result and Error types for fetools-mesh

/// Type alias for Result<T, mesh::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `fetools-mesh` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("structural parse error on line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    #[error("element type \"{0}\" is not supported")]
    UnsupportedElementType(String),

    #[error("maximum identifier {max_id} exceeds {ceiling}, consider renumbering the mesh")]
    IdentifierOutOfRange { max_id: u32, ceiling: u32 },

    #[error("element {element} references node {node} which does not exist")]
    UnresolvedNode { element: u32, node: u32 },

    #[error("element {element} of this type needs {expected} nodes, found {found}")]
    WrongNodeCount {
        element: u32,
        expected: usize,
        found: usize,
    },

    #[error("node rank {rank} out of range for {count} nodes")]
    NodeOutOfRange { rank: usize, count: usize },

    #[error("element {0} is not part of the mesh")]
    UnknownElement(u32),

    #[error("element rank {rank} out of range for {count} elements")]
    ElementOutOfRange { rank: usize, count: usize },

    #[error("no integer id can be taken from group name \"{0}\"")]
    InvalidGroupName(String),

    #[error("group id {value} does not fit in a {width}-bit field")]
    GroupIdOverflow { value: u32, width: u8 },

    #[error("failed to initialise progress bar: {0}")]
    ProgressBar(String),
}
