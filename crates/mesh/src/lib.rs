//! Z-set geof mesh tools and file parsing
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod element;
mod error;
mod group;
mod index;
mod mesh;
mod node;

pub mod reader;

// inline important the mesh-related modules for a nice public API
#[doc(inline)]
pub use reader::read_geof;

#[doc(inline)]
pub use mesh::Mesh;

#[doc(inline)]
pub use node::Node;

#[doc(inline)]
pub use element::{Element, ElementType, Topology};

#[doc(inline)]
pub use group::{ElementGroup, GroupIdField, LineGroup, ALL_ELEMENT};

#[doc(inline)]
pub use index::{IdentifierIndex, Identified, DEFAULT_ID_CEILING};

#[doc(inline)]
pub use error::{Error, Result};
