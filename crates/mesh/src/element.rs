//! Element types and their static lookup tables

// crate modules
use crate::error::Error;
use crate::index::Identified;

// external crates
use serde::Serialize;

/// Identity ordering, sliced to the node count of a type
static IDENTITY: [usize; 20] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19,
];

static QUADRATIC_TETRA: [usize; 10] = [0, 2, 1, 9, 5, 4, 3, 6, 8, 7];

static QUADRATIC_WEDGE: [usize; 15] = [0, 2, 4, 9, 11, 13, 1, 3, 5, 10, 12, 14, 6, 7, 8];

static QUADRATIC_HEXAHEDRON: [usize; 20] = [
    0, 6, 4, 2, 12, 18, 16, 14, 7, 5, 3, 1, 19, 17, 15, 13, 8, 11, 10, 9,
];

static QUADRATIC_QUAD: [usize; 8] = [0, 2, 4, 6, 1, 3, 5, 7];

/// Closed set of supported element types
///
/// Everything that depends on the element type is pure data, so each variant
/// maps onto a row of a few static tables: the number of nodes, the number of
/// integration points, the canonical node permutation, and the cell topology.
///
/// Conversion from the tag used in the mesh file is case-sensitive.
///
/// ```rust
/// # use fetools_mesh::ElementType;
/// let kind = ElementType::try_from("c3d20r").unwrap();
/// assert_eq!(kind.node_count(), 20);
/// assert_eq!(kind.integration_points(), 8);
///
/// // anything outside the supported set is rejected
/// assert!(ElementType::try_from("c3d27").is_err());
/// assert!(ElementType::try_from("C3D8").is_err());
/// ```
///
/// | Tag       | Nodes | Integration points | Topology            |
/// | --------- | ----- | ------------------ | ------------------- |
/// | `c2d3`    | 3     | 4                  | Triangle            |
/// | `s3d3`    | 3     | 6                  | Triangle            |
/// | `c2d4`    | 4     | 4                  | Quad                |
/// | `c2d8`    | 8     | 4                  | QuadraticQuad       |
/// | `c2d8r`   | 8     | 1                  | QuadraticQuad       |
/// | `c3d4`    | 4     | 4                  | Tetra               |
/// | `c3d6`    | 6     | 4                  | Wedge               |
/// | `c3d8`    | 8     | 8                  | Hexahedron          |
/// | `c3d10`   | 10    | 5                  | QuadraticTetra      |
/// | `c3d10_4` | 10    | 4                  | QuadraticTetra      |
/// | `c3d13`   | 13    | 27                 | QuadraticPyramid    |
/// | `c3d15`   | 15    | 18                 | QuadraticWedge      |
/// | `c3d20`   | 20    | 27                 | QuadraticHexahedron |
/// | `c3d20r`  | 20    | 8                  | QuadraticHexahedron |
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// 3-node plane triangle
    C2d3,
    /// 3-node shell triangle
    S3d3,
    /// 4-node plane quadrilateral
    C2d4,
    /// 8-node plane quadrilateral
    C2d8,
    /// 8-node plane quadrilateral, reduced integration
    C2d8r,
    /// 4-node tetrahedron
    C3d4,
    /// 6-node wedge
    C3d6,
    /// 8-node hexahedron
    C3d8,
    /// 10-node tetrahedron
    C3d10,
    /// 10-node tetrahedron with 4 integration points
    C3d10_4,
    /// 13-node pyramid
    C3d13,
    /// 15-node wedge
    C3d15,
    /// 20-node hexahedron
    C3d20,
    /// 20-node hexahedron, reduced integration
    C3d20r,
}

impl ElementType {
    /// Every supported type, in no particular order
    pub const ALL: [ElementType; 14] = [
        Self::C2d3,
        Self::S3d3,
        Self::C2d4,
        Self::C2d8,
        Self::C2d8r,
        Self::C3d4,
        Self::C3d6,
        Self::C3d8,
        Self::C3d10,
        Self::C3d10_4,
        Self::C3d13,
        Self::C3d15,
        Self::C3d20,
        Self::C3d20r,
    ];

    /// Tag used for the type in mesh files
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::C2d3 => "c2d3",
            Self::S3d3 => "s3d3",
            Self::C2d4 => "c2d4",
            Self::C2d8 => "c2d8",
            Self::C2d8r => "c2d8r",
            Self::C3d4 => "c3d4",
            Self::C3d6 => "c3d6",
            Self::C3d8 => "c3d8",
            Self::C3d10 => "c3d10",
            Self::C3d10_4 => "c3d10_4",
            Self::C3d13 => "c3d13",
            Self::C3d15 => "c3d15",
            Self::C3d20 => "c3d20",
            Self::C3d20r => "c3d20r",
        }
    }

    /// Number of nodes, which is the numeric part of the tag
    pub const fn node_count(&self) -> usize {
        match self {
            Self::C2d3 | Self::S3d3 => 3,
            Self::C2d4 | Self::C3d4 => 4,
            Self::C3d6 => 6,
            Self::C2d8 | Self::C2d8r | Self::C3d8 => 8,
            Self::C3d10 | Self::C3d10_4 => 10,
            Self::C3d13 => 13,
            Self::C3d15 => 15,
            Self::C3d20 | Self::C3d20r => 20,
        }
    }

    /// Number of integration points stored per element in result files
    ///
    /// Follows the geometry declarations of the Z-set solver, which is why a
    /// few entries look surprising (a `c2d3` triangle carries 4 points).
    pub const fn integration_points(&self) -> usize {
        match self {
            Self::C2d3 | Self::C3d4 | Self::C3d6 | Self::C2d4 | Self::C2d8 | Self::C3d10_4 => 4,
            Self::S3d3 => 6,
            Self::C3d8 | Self::C3d20r => 8,
            Self::C3d20 | Self::C3d13 => 27,
            Self::C3d15 => 18,
            Self::C3d10 => 5,
            Self::C2d8r => 1,
        }
    }

    /// Positions into the native node list, in canonical topology order
    ///
    /// `canonical[i] = native[table[i]]`. First order types use the identity,
    /// so the table only differs from file order for quadratic types where
    /// the mesh file alternates corner and mid-side nodes.
    ///
    /// ```rust
    /// # use fetools_mesh::ElementType;
    /// assert_eq!(ElementType::C2d8.reorder_table(), &[0, 2, 4, 6, 1, 3, 5, 7]);
    /// assert_eq!(ElementType::C3d4.reorder_table(), &[0, 1, 2, 3]);
    /// ```
    pub fn reorder_table(&self) -> &'static [usize] {
        match self {
            Self::C3d10 | Self::C3d10_4 => &QUADRATIC_TETRA,
            Self::C3d15 => &QUADRATIC_WEDGE,
            Self::C3d20 | Self::C3d20r => &QUADRATIC_HEXAHEDRON,
            Self::C2d8 | Self::C2d8r => &QUADRATIC_QUAD,
            _ => &IDENTITY[..self.node_count()],
        }
    }

    /// True if the canonical order is the same as the file order
    pub fn is_identity_order(&self) -> bool {
        self.reorder_table()
            .iter()
            .enumerate()
            .all(|(i, &position)| i == position)
    }

    /// Canonical cell shape of the element
    pub const fn topology(&self) -> Topology {
        match self {
            Self::C2d3 | Self::S3d3 => Topology::Triangle,
            Self::C2d4 => Topology::Quad,
            Self::C2d8 | Self::C2d8r => Topology::QuadraticQuad,
            Self::C3d4 => Topology::Tetra,
            Self::C3d6 => Topology::Wedge,
            Self::C3d8 => Topology::Hexahedron,
            Self::C3d10 | Self::C3d10_4 => Topology::QuadraticTetra,
            Self::C3d13 => Topology::QuadraticPyramid,
            Self::C3d15 => Topology::QuadraticWedge,
            Self::C3d20 | Self::C3d20r => Topology::QuadraticHexahedron,
        }
    }
}

impl TryFrom<&str> for ElementType {
    type Error = Error;

    fn try_from(tag: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| Error::UnsupportedElementType(tag.to_string()))
    }
}

impl std::str::FromStr for ElementType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Canonical cell shapes expected by renderers
///
/// Node order within each shape follows the VTK conventions, and
/// [Topology::cell_type_id()] gives the matching VTK cell type number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Topology {
    /// Linear triangle
    Triangle,
    /// Linear quadrilateral
    Quad,
    /// Linear tetrahedron
    Tetra,
    /// Linear hexahedron
    Hexahedron,
    /// Linear wedge
    Wedge,
    /// 8-node quadrilateral
    QuadraticQuad,
    /// 10-node tetrahedron
    QuadraticTetra,
    /// 20-node hexahedron
    QuadraticHexahedron,
    /// 15-node wedge
    QuadraticWedge,
    /// 13-node pyramid
    QuadraticPyramid,
}

impl Topology {
    /// VTK cell type number for the shape
    pub const fn cell_type_id(&self) -> u8 {
        match self {
            Self::Triangle => 5,
            Self::Quad => 9,
            Self::Tetra => 10,
            Self::Hexahedron => 12,
            Self::Wedge => 13,
            Self::QuadraticQuad => 23,
            Self::QuadraticTetra => 24,
            Self::QuadraticHexahedron => 25,
            Self::QuadraticWedge => 26,
            Self::QuadraticPyramid => 27,
        }
    }
}

/// A single mesh element
///
/// Node references are ranks into the node list of the owning
/// [Mesh](crate::Mesh), kept in the native order of the mesh file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// Identifier from the mesh file
    pub id: u32,
    /// Position of the element in the mesh, in file order
    pub rank: usize,
    /// Element type
    pub kind: ElementType,
    /// Node ranks in native file order
    pub nodes: Vec<usize>,
}

impl Element {
    /// Create a new element
    pub fn new(id: u32, rank: usize, kind: ElementType, nodes: Vec<usize>) -> Self {
        Self {
            id,
            rank,
            kind,
            nodes,
        }
    }

    /// Number of integration points for this element
    #[inline]
    pub fn integration_points(&self) -> usize {
        self.kind.integration_points()
    }

    /// Node ranks permuted into canonical topology order
    ///
    /// `None` if the element has fewer nodes than its type needs.
    pub fn canonical_nodes(&self) -> Option<Vec<usize>> {
        self.kind
            .reorder_table()
            .iter()
            .map(|&position| self.nodes.get(position).copied())
            .collect()
    }
}

impl Identified for Element {
    fn id(&self) -> u32 {
        self.id
    }

    fn rank(&self) -> usize {
        self.rank
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Element {} (rank {}) {} with nodes {:?}",
            self.id, self.rank, self.kind, self.nodes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("c2d3", 3, 4)]
    #[case("s3d3", 3, 6)]
    #[case("c2d4", 4, 4)]
    #[case("c2d8", 8, 4)]
    #[case("c2d8r", 8, 1)]
    #[case("c3d4", 4, 4)]
    #[case("c3d6", 6, 4)]
    #[case("c3d8", 8, 8)]
    #[case("c3d10", 10, 5)]
    #[case("c3d10_4", 10, 4)]
    #[case("c3d13", 13, 27)]
    #[case("c3d15", 15, 18)]
    #[case("c3d20", 20, 27)]
    #[case("c3d20r", 20, 8)]
    fn type_tables(#[case] tag: &str, #[case] nodes: usize, #[case] points: usize) {
        let kind = ElementType::try_from(tag).unwrap();
        assert_eq!(kind.tag(), tag);
        assert_eq!(kind.to_string(), tag);
        assert_eq!(kind.node_count(), nodes);
        assert_eq!(kind.integration_points(), points);
        assert_eq!(kind.reorder_table().len(), nodes);
    }

    #[rstest]
    #[case("")]
    #[case("c3d27")]
    #[case("s3d4")]
    #[case("s3d8")]
    #[case("c3d15r")]
    #[case("C3D4")]
    #[case("c3d4 ")]
    fn unsupported_tags(#[case] tag: &str) {
        assert!(matches!(
            ElementType::try_from(tag),
            Err(Error::UnsupportedElementType(t)) if t == tag
        ));
    }

    #[rstest]
    #[case(ElementType::C2d3, &[0, 1, 2])]
    #[case(ElementType::S3d3, &[0, 1, 2])]
    #[case(ElementType::C2d4, &[0, 1, 2, 3])]
    #[case(ElementType::C3d4, &[0, 1, 2, 3])]
    #[case(ElementType::C3d6, &[0, 1, 2, 3, 4, 5])]
    #[case(ElementType::C3d8, &[0, 1, 2, 3, 4, 5, 6, 7])]
    #[case(ElementType::C3d13, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12])]
    #[case(ElementType::C2d8, &[0, 2, 4, 6, 1, 3, 5, 7])]
    #[case(ElementType::C2d8r, &[0, 2, 4, 6, 1, 3, 5, 7])]
    #[case(ElementType::C3d10, &[0, 2, 1, 9, 5, 4, 3, 6, 8, 7])]
    #[case(ElementType::C3d10_4, &[0, 2, 1, 9, 5, 4, 3, 6, 8, 7])]
    #[case(ElementType::C3d15, &[0, 2, 4, 9, 11, 13, 1, 3, 5, 10, 12, 14, 6, 7, 8])]
    #[case(
        ElementType::C3d20,
        &[0, 6, 4, 2, 12, 18, 16, 14, 7, 5, 3, 1, 19, 17, 15, 13, 8, 11, 10, 9]
    )]
    #[case(
        ElementType::C3d20r,
        &[0, 6, 4, 2, 12, 18, 16, 14, 7, 5, 3, 1, 19, 17, 15, 13, 8, 11, 10, 9]
    )]
    fn reorder_tables(#[case] kind: ElementType, #[case] expected: &[usize]) {
        assert_eq!(kind.reorder_table(), expected);
    }

    #[test]
    fn reorder_tables_are_permutations() {
        for kind in ElementType::ALL {
            let mut table = kind.reorder_table().to_vec();
            table.sort_unstable();
            assert_eq!(table, (0..kind.node_count()).collect::<Vec<usize>>());
        }
    }

    #[test]
    fn identity_types() {
        let identity: Vec<ElementType> = ElementType::ALL
            .into_iter()
            .filter(ElementType::is_identity_order)
            .collect();

        assert_eq!(identity.len(), 7);
        assert!(!identity.contains(&ElementType::C3d10));
        assert!(!identity.contains(&ElementType::C3d20r));
        assert!(!identity.contains(&ElementType::C2d8r));
        assert!(identity.contains(&ElementType::C3d13));
    }

    #[test]
    fn canonical_nodes_use_ranks() {
        // native ranks deliberately not in ascending order
        let element = Element::new(1, 0, ElementType::C2d8, vec![70, 71, 72, 73, 74, 75, 76, 77]);
        assert_eq!(
            element.canonical_nodes(),
            Some(vec![70, 72, 74, 76, 71, 73, 75, 77])
        );
    }

    #[test]
    fn canonical_nodes_short_element() {
        let element = Element::new(1, 0, ElementType::C3d10, vec![0, 1, 2, 3]);
        assert_eq!(element.canonical_nodes(), None);

        let mut element = Element::new(2, 1, ElementType::C3d4, vec![0, 1, 2, 3]);
        assert_eq!(element.canonical_nodes(), Some(vec![0, 1, 2, 3]));
        element.nodes.pop();
        assert_eq!(element.canonical_nodes(), None);
    }

    #[rstest]
    #[case(ElementType::C2d3, 5)]
    #[case(ElementType::C2d4, 9)]
    #[case(ElementType::C3d4, 10)]
    #[case(ElementType::C3d8, 12)]
    #[case(ElementType::C3d6, 13)]
    #[case(ElementType::C2d8r, 23)]
    #[case(ElementType::C3d10_4, 24)]
    #[case(ElementType::C3d20, 25)]
    #[case(ElementType::C3d15, 26)]
    #[case(ElementType::C3d13, 27)]
    fn cell_type_ids(#[case] kind: ElementType, #[case] id: u8) {
        assert_eq!(kind.topology().cell_type_id(), id);
    }
}
