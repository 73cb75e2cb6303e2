//! Module for mesh-related data and implementations

// crate modules
use crate::element::{Element, ElementType};
use crate::error::{Error, Result};
use crate::group::{ElementGroup, GroupIdField, LineGroup, ALL_ELEMENT};
use crate::index::IdentifierIndex;
use crate::node::Node;

// fetools modules
use fetools_format::{elided_list, f};

// external crates
use log::{debug, warn};
use serde::Serialize;

// standard library
use std::collections::HashSet;

/// Topological model of a finite element mesh
///
/// Owns every [Node] and [Element], in the order they were read, along with
/// the element groups (`elsets`) and line groups (`lisets`) of the mesh.
///
/// Nodes and elements are given a dense zero-based `rank` when added, which is
/// their position in `nodes`/`elements`. Element connectivity is stored as
/// node ranks so that no identifier lookups are needed after loading.
///
/// The first element group is always [ALL_ELEMENT], which contains every
/// element of the mesh and is maintained by [Mesh::add_element()].
///
/// ```rust
/// # use fetools_mesh::{ElementType, Mesh};
/// let mut mesh = Mesh::new(3);
/// for (id, xyz) in [(1, [0.0, 0.0, 0.0]), (2, [1.0, 0.0, 0.0]), (4, [0.0, 1.0, 0.0]), (9, [0.0, 0.0, 1.0])] {
///     mesh.add_node(id, xyz);
/// }
/// mesh.add_element(100, ElementType::C3d4, vec![0, 1, 2, 3]).unwrap();
///
/// assert_eq!(mesh.node_count(), 4);
/// assert_eq!(mesh.element_count(), 1);
/// assert_eq!(mesh.integration_point_count(), 4);
/// assert_eq!(mesh.elsets[0].elements, vec![100]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mesh {
    /// Spatial dimension, 2 or 3
    pub dimension: u8,
    /// Every node in the mesh, in rank order
    pub nodes: Vec<Node>,
    /// Every element in the mesh, in rank order
    pub elements: Vec<Element>,
    /// Element groups in registration order, starting with [ALL_ELEMENT]
    pub elsets: Vec<ElementGroup>,
    /// Line groups in registration order
    pub lisets: Vec<LineGroup>,
    /// Total number of integration points across all elements
    integration_points: usize,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Mesh {
    /// Create an empty mesh of the given spatial dimension
    pub fn new(dimension: u8) -> Self {
        Self {
            dimension,
            nodes: Vec::new(),
            elements: Vec::new(),
            elsets: vec![ElementGroup::new(ALL_ELEMENT)],
            lisets: Vec::new(),
            integration_points: 0,
        }
    }

    /// Append a node, returning its rank
    pub fn add_node(&mut self, id: u32, coordinates: [f64; 3]) -> usize {
        let rank = self.nodes.len();
        self.nodes.push(Node::new(id, rank, coordinates));
        rank
    }

    /// Append an element, returning its rank
    ///
    /// `nodes` are node ranks in the native order of the mesh file, and there
    /// must be exactly as many as the element type requires. The element is
    /// also added to [ALL_ELEMENT] and the integration point total updated.
    pub fn add_element(&mut self, id: u32, kind: ElementType, nodes: Vec<usize>) -> Result<usize> {
        if nodes.len() != kind.node_count() {
            return Err(Error::WrongNodeCount {
                element: id,
                expected: kind.node_count(),
                found: nodes.len(),
            });
        }

        if let Some(&rank) = nodes.iter().find(|&&rank| rank >= self.nodes.len()) {
            return Err(Error::NodeOutOfRange {
                rank,
                count: self.nodes.len(),
            });
        }

        let rank = self.elements.len();
        self.elements.push(Element::new(id, rank, kind, nodes));
        self.elsets[0].elements.push(id);
        self.integration_points += kind.integration_points();
        Ok(rank)
    }

    /// Recompute the total number of integration points from scratch
    pub fn update_integration_points(&mut self) {
        self.integration_points = self
            .elements
            .iter()
            .map(Element::integration_points)
            .sum();
    }

    /// Number of nodes in the mesh
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of elements in the mesh
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Total number of integration points in the mesh
    ///
    /// This is the number of values stored per field per card in a result
    /// file.
    pub fn integration_point_count(&self) -> usize {
        self.integration_points
    }

    /// Find an element group by name, creating it if it does not exist
    pub fn get_or_create_group(&mut self, name: &str) -> &mut ElementGroup {
        let index = match self.elsets.iter().position(|g| g.name == name) {
            Some(index) => index,
            None => {
                debug!("Adding new elset {name:?}");
                self.elsets.push(ElementGroup::new(name));
                self.elsets.len() - 1
            }
        };
        &mut self.elsets[index]
    }

    /// Add element identifiers to a group, creating the group if needed
    ///
    /// Groups with the same name are merged, and identifiers already in the
    /// group are not repeated. [ALL_ELEMENT] is maintained by the mesh itself,
    /// so anything appended to it is ignored.
    ///
    /// ```rust
    /// # use fetools_mesh::Mesh;
    /// let mut mesh = Mesh::new(3);
    /// mesh.append_to_group("grain_1", [1, 2, 3]);
    /// mesh.append_to_group("grain_1", [3, 4]);
    ///
    /// assert_eq!(mesh.elsets.len(), 2);
    /// assert_eq!(mesh.elsets[1].elements, vec![1, 2, 3, 4]);
    /// ```
    pub fn append_to_group<I>(&mut self, name: &str, ids: I)
    where
        I: IntoIterator<Item = u32>,
    {
        if name == ALL_ELEMENT {
            debug!("Ignoring explicit {ALL_ELEMENT} members");
            return;
        }

        let group = self.get_or_create_group(name);
        let mut seen: HashSet<u32> = group.elements.iter().copied().collect();
        group
            .elements
            .extend(ids.into_iter().filter(|id| seen.insert(*id)));
    }

    /// Register a line group
    ///
    /// A line group with the same name as an existing one is ignored with a
    /// warning, keeping the first definition. Returns whether it was added.
    pub fn add_line_group(&mut self, group: LineGroup) -> bool {
        if self.liset(&group.name).is_some() {
            warn!("Ignoring duplicate liset {:?}", group.name);
            return false;
        }
        debug!("Adding new liset {:?}", group.name);
        self.lisets.push(group);
        true
    }

    /// Find an element group by name
    pub fn elset(&self, name: &str) -> Option<&ElementGroup> {
        self.elsets.iter().find(|g| g.name == name)
    }

    /// Find a line group by name
    pub fn liset(&self, name: &str) -> Option<&LineGroup> {
        self.lisets.iter().find(|g| g.name == name)
    }

    /// Identifier to rank lookup for the nodes
    pub fn node_index(&self) -> Result<IdentifierIndex> {
        IdentifierIndex::new(&self.nodes)
    }

    /// Identifier to rank lookup for the elements
    pub fn element_index(&self) -> Result<IdentifierIndex> {
        IdentifierIndex::new(&self.elements)
    }

    /// Nodes of an element in native order
    pub fn element_nodes<'a>(&'a self, element: &'a Element) -> impl Iterator<Item = &'a Node> {
        element.nodes.iter().filter_map(|&rank| self.nodes.get(rank))
    }

    /// Node ranks of an element in canonical topology order
    ///
    /// This is the connectivity a renderer expects for the cell shape given by
    /// `element.kind.topology()`.
    pub fn canonical_connectivity(&self, element: &Element) -> Option<Vec<usize>> {
        element.canonical_nodes()
    }

    /// Centre of mass of an element, from the mean of its node coordinates
    pub fn element_centroid(&self, rank: usize) -> Result<[f64; 3]> {
        let element = self.elements.get(rank).ok_or(Error::ElementOutOfRange {
            rank,
            count: self.elements.len(),
        })?;

        let mut centroid = [0.0; 3];
        for node in self.element_nodes(element) {
            for (c, x) in centroid.iter_mut().zip(node.coordinates) {
                *c += x;
            }
        }

        let n = element.nodes.len() as f64;
        Ok(centroid.map(|c| c / n))
    }

    /// One integer per element giving the group it belongs to
    ///
    /// Every element group except [ALL_ELEMENT] is visited in registration
    /// order, optionally only those whose name starts with `prefix`. Each
    /// member element is assigned the registration index of the group
    /// (`ALL_ELEMENT` being 0), or with `use_name_suffix_as_id` the integer
    /// following the prefix in the group name (e.g. `grain_12` => 12).
    ///
    /// Elements in no matching group are 0.
    ///
    /// Groups are assumed to be mutually exclusive. Where they are not, the
    /// group registered last wins for the elements they share.
    ///
    /// The field is `u8` unless there are more than 255 element groups, in
    /// which case it is `u16`.
    ///
    /// ```rust
    /// # use fetools_mesh::{ElementType, Mesh};
    /// let mut mesh = Mesh::new(2);
    /// for id in 1..=4 {
    ///     mesh.add_node(id, [id as f64, 0.0, 0.0]);
    /// }
    /// for id in 1..=3 {
    ///     mesh.add_element(id, ElementType::C2d3, vec![0, 1, 2]).unwrap();
    /// }
    /// mesh.append_to_group("grain_7", [1, 2]);
    /// mesh.append_to_group("grain_9", [2]);
    ///
    /// let by_order = mesh.compute_group_id_field(None, false).unwrap();
    /// assert_eq!(by_order.to_vec(), vec![1, 2, 0]);
    ///
    /// let by_name = mesh.compute_group_id_field(Some("grain_"), true).unwrap();
    /// assert_eq!(by_name.to_vec(), vec![7, 9, 0]);
    /// ```
    pub fn compute_group_id_field(
        &self,
        prefix: Option<&str>,
        use_name_suffix_as_id: bool,
    ) -> Result<GroupIdField> {
        let mut field = GroupIdField::zeros(self.elsets.len(), self.element_count());
        if field.width() > 8 {
            warn!("More than 255 elsets, using a 16-bit group id field");
        }

        let index = self.element_index()?;
        let prefix = prefix.unwrap_or("");

        for (j, group) in self.elsets.iter().enumerate().skip(1) {
            let Some(suffix) = group.name.strip_prefix(prefix) else {
                continue;
            };

            let value = if use_name_suffix_as_id {
                suffix
                    .parse::<u32>()
                    .map_err(|_| Error::InvalidGroupName(group.name.clone()))?
            } else {
                j as u32
            };
            debug!("Group {:?} => {value}", group.name);

            for &id in &group.elements {
                let rank = index.get(id).ok_or(Error::UnknownElement(id))?;
                field.set(rank, value).ok_or(Error::GroupIdOverflow {
                    value,
                    width: field.width(),
                })?;
            }
        }

        Ok(field)
    }

    /// Group id field using the grain number in each group name
    ///
    /// Shorthand for `compute_group_id_field(Some(prefix), true)`, as used for
    /// polycrystal meshes with one `grain_<n>` elset per grain.
    pub fn compute_grain_id_field(&self, prefix: &str) -> Result<GroupIdField> {
        let field = self.compute_group_id_field(Some(prefix), true)?;
        if field.max() < 1 {
            warn!("No grain found with prefix {prefix:?}");
        }
        Ok(field)
    }
}

impl std::fmt::Display for Mesh {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let elsets: Vec<&str> = self.elsets.iter().map(|g| g.name.as_str()).collect();
        let lisets: Vec<&str> = self.lisets.iter().map(|g| g.name.as_str()).collect();

        let mut s = "Mesh {\n".to_string();
        s += &f!("    dimension: {}\n", self.dimension);
        s += &f!("    nodes: {}\n", self.node_count());
        s += &f!("    elements: {}\n", self.element_count());
        s += &f!("    integration points: {}\n", self.integration_points);
        s += &f!("    elsets: {}\n", elided_list(&elsets, 6));
        s += &f!("    lisets: {}\n}}", elided_list(&lisets, 6));

        write!(f, "{}", s)
    }
}
