//! Element and line groups

// external crates
use serde::Serialize;

/// Name of the implicit group holding every element
pub const ALL_ELEMENT: &str = "ALL_ELEMENT";

/// Named set of element identifiers (`**elset`)
///
/// Identifiers stay in the numbering of the mesh file. Use an
/// [IdentifierIndex](crate::IdentifierIndex) over the mesh elements to find
/// their ranks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ElementGroup {
    /// Group name
    pub name: String,
    /// Element identifiers, in the order they were first seen
    pub elements: Vec<u32>,
}

impl ElementGroup {
    /// Create a new empty group
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            elements: Vec::new(),
        }
    }

    /// Number of elements in the group
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True if the group contains no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Named sequence of boundary line segments (`**liset`)
///
/// Segment end points are node identifiers from the mesh file, *not* ranks.
/// The format numbers these from 1, so [LineGroup::segments_as_ranks()] gives
/// the zero-based pairs directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineGroup {
    /// Group name
    pub name: String,
    /// Segment end points as node identifiers
    pub segments: Vec<[u32; 2]>,
}

impl LineGroup {
    /// Create a new empty line group
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            segments: Vec::new(),
        }
    }

    /// Segment end points shifted to zero-based numbering
    ///
    /// ```rust
    /// # use fetools_mesh::LineGroup;
    /// let mut liset = LineGroup::new("edge");
    /// liset.segments = vec![[1, 2], [2, 5]];
    /// assert_eq!(liset.segments_as_ranks(), vec![[0, 1], [1, 4]]);
    /// ```
    pub fn segments_as_ranks(&self) -> Vec<[usize; 2]> {
        self.segments
            .iter()
            .map(|[a, b]| [(*a as usize).saturating_sub(1), (*b as usize).saturating_sub(1)])
            .collect()
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if there are no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Per-element group identifiers, see [Mesh::compute_group_id_field()]
///
/// The integer width is part of the result. Meshes with at most 255 element
/// groups get a `u8` field, anything larger gets `u16`.
///
/// [Mesh::compute_group_id_field()]: crate::Mesh::compute_group_id_field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GroupIdField {
    /// 8-bit group ids
    U8(Vec<u8>),
    /// 16-bit group ids
    U16(Vec<u16>),
}

impl GroupIdField {
    /// Zero-filled field of the appropriate width for `n_groups` groups
    pub(crate) fn zeros(n_groups: usize, n_elements: usize) -> Self {
        if n_groups > u8::MAX as usize {
            Self::U16(vec![0; n_elements])
        } else {
            Self::U8(vec![0; n_elements])
        }
    }

    /// Width of the integer type in bits
    pub fn width(&self) -> u8 {
        match self {
            Self::U8(_) => 8,
            Self::U16(_) => 16,
        }
    }

    /// Number of values in the field
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::U16(v) => v.len(),
        }
    }

    /// True if the field has no values
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at an element rank, widened to `u32`
    pub fn get(&self, rank: usize) -> Option<u32> {
        match self {
            Self::U8(v) => v.get(rank).map(|&x| x as u32),
            Self::U16(v) => v.get(rank).map(|&x| x as u32),
        }
    }

    /// Largest value in the field, zero if empty
    pub fn max(&self) -> u32 {
        match self {
            Self::U8(v) => v.iter().max().copied().unwrap_or(0) as u32,
            Self::U16(v) => v.iter().max().copied().unwrap_or(0) as u32,
        }
    }

    /// All values widened to `u32`
    pub fn to_vec(&self) -> Vec<u32> {
        match self {
            Self::U8(v) => v.iter().map(|&x| x as u32).collect(),
            Self::U16(v) => v.iter().map(|&x| x as u32).collect(),
        }
    }

    /// Set a value, failing if it does not fit the field width
    pub(crate) fn set(&mut self, rank: usize, value: u32) -> Option<()> {
        match self {
            Self::U8(v) => *v.get_mut(rank)? = u8::try_from(value).ok()?,
            Self::U16(v) => *v.get_mut(rank)? = u16::try_from(value).ok()?,
        }
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_selection() {
        assert_eq!(GroupIdField::zeros(1, 3).width(), 8);
        assert_eq!(GroupIdField::zeros(255, 3).width(), 8);
        assert_eq!(GroupIdField::zeros(256, 3).width(), 16);
    }

    #[test]
    fn set_respects_width() {
        let mut field = GroupIdField::zeros(2, 2);
        assert_eq!(field.set(0, 255), Some(()));
        assert_eq!(field.set(1, 256), None);
        assert_eq!(field.set(2, 1), None);
        assert_eq!(field.to_vec(), vec![255, 0]);

        let mut field = GroupIdField::zeros(300, 2);
        assert_eq!(field.set(1, 300), Some(()));
        assert_eq!(field.max(), 300);
    }
}
