//! Identifier to rank lookups for sparse entity numbering

// crate modules
use crate::error::{Error, Result};

// standard library
use std::collections::HashMap;

/// Largest identifier accepted by default when building an [IdentifierIndex]
///
/// Meshes numbered beyond this are almost always the product of a tool that
/// offsets identifiers per part, and should be renumbered.
pub const DEFAULT_ID_CEILING: u32 = 100_000_000;

/// Anything with an externally assigned identifier and a dense rank
///
/// Implemented for [Node](crate::Node) and [Element](crate::Element) so that
/// either can be indexed.
pub trait Identified {
    /// Identifier as written in the source file
    fn id(&self) -> u32;
    /// Zero-based position assigned at load time
    fn rank(&self) -> usize;
}

/// Maps sparse, non-contiguous identifiers to dense zero-based ranks
///
/// Mesh files number nodes and elements however the meshing tool sees fit, so
/// the identifiers referenced by connectivity and groups have to be resolved
/// to the position of the entity in the mesh.
///
/// ```rust
/// # use fetools_mesh::{IdentifierIndex, Node};
/// let nodes = vec![
///     Node::new(10, 0, [0.0, 0.0, 0.0]),
///     Node::new(3, 1, [1.0, 0.0, 0.0]),
///     Node::new(7, 2, [0.0, 1.0, 0.0]),
/// ];
///
/// let index = IdentifierIndex::new(&nodes).unwrap();
/// assert_eq!(index.get(3), Some(1));
/// assert_eq!(index.get(10), Some(0));
/// assert_eq!(index.get(4), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentifierIndex {
    ranks: HashMap<u32, usize>,
    max_id: u32,
}

impl IdentifierIndex {
    /// Build an index using the [DEFAULT_ID_CEILING]
    pub fn new<T: Identified>(entities: &[T]) -> Result<Self> {
        Self::with_ceiling(entities, DEFAULT_ID_CEILING)
    }

    /// Build an index, failing if any identifier is larger than `ceiling`
    ///
    /// The check is made before anything is inserted.
    ///
    /// ```rust
    /// # use fetools_mesh::{Error, IdentifierIndex, Node};
    /// let nodes = vec![Node::new(500, 0, [0.0; 3])];
    /// let result = IdentifierIndex::with_ceiling(&nodes, 100);
    ///
    /// assert!(matches!(
    ///     result,
    ///     Err(Error::IdentifierOutOfRange { max_id: 500, ceiling: 100 })
    /// ));
    /// ```
    pub fn with_ceiling<T: Identified>(entities: &[T], ceiling: u32) -> Result<Self> {
        let max_id = entities.iter().map(|e| e.id()).max().unwrap_or(0);
        if max_id > ceiling {
            return Err(Error::IdentifierOutOfRange { max_id, ceiling });
        }

        let ranks = entities.iter().map(|e| (e.id(), e.rank())).collect();
        Ok(Self { ranks, max_id })
    }

    /// Rank of the entity with identifier `id`, if it was registered
    #[inline]
    pub fn get(&self, id: u32) -> Option<usize> {
        self.ranks.get(&id).copied()
    }

    /// Check if an identifier was registered
    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        self.ranks.contains_key(&id)
    }

    /// Largest identifier seen
    pub fn max_id(&self) -> u32 {
        self.max_id
    }

    /// Number of registered identifiers
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// True if nothing was registered
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}
