// crate modules
use crate::index::Identified;

// external crates
use serde::Serialize;

/// A single mesh node
///
/// Coordinates are always stored in 3D. Nodes read from a 2D mesh have `z`
/// set to `0.0`, and the dimension is recorded on the [Mesh](crate::Mesh).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// Identifier from the mesh file
    pub id: u32,
    /// Position of the node in the mesh, in file order
    pub rank: usize,
    /// Cartesian coordinates \[x, y, z\]
    pub coordinates: [f64; 3],
}

impl Node {
    /// Create a new node
    pub fn new(id: u32, rank: usize, coordinates: [f64; 3]) -> Self {
        Self {
            id,
            rank,
            coordinates,
        }
    }

    /// x coordinate
    #[inline]
    pub fn x(&self) -> f64 {
        self.coordinates[0]
    }

    /// y coordinate
    #[inline]
    pub fn y(&self) -> f64 {
        self.coordinates[1]
    }

    /// z coordinate, `0.0` for 2D meshes
    #[inline]
    pub fn z(&self) -> f64 {
        self.coordinates[2]
    }
}

impl Identified for Node {
    fn id(&self) -> u32 {
        self.id
    }

    fn rank(&self) -> usize {
        self.rank
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node {} (rank {}) at ({:.3}, {:.3}, {:.3})",
            self.id,
            self.rank,
            self.x(),
            self.y(),
            self.z()
        )
    }
}
