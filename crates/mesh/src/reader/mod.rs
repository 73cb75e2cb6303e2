//! Parsers and logic for reading geof mesh files
//!
//! All functions are re-exported to the crate root for easy access.
//!
//! # Quickstart
//!
//! The simplest way to read a mesh is the convenience function:
//!
//! ```rust, no_run
//! # use fetools_mesh::{read_geof, Mesh};
//! let mesh: Mesh = read_geof("/path/to/mesh.geof").unwrap();
//! ```
//!
//! Under the hood this initialises a [GeofReader], which is public for finer
//! control.
//!
//! ```rust, no_run
//! # use fetools_mesh::reader::GeofReader;
//! # use std::path::Path;
//! let mut reader = GeofReader::new();
//! reader.disable_progress(); // disable the progress bar
//! reader.set_id_ceiling(1_000_000); // refuse anything numbered beyond 1e6
//!
//! let mesh = reader.parse(Path::new("/path/to/mesh.geof")).unwrap();
//! ```
//!
//! # Implementation overview
//!
//! The file is read line-by-line through a buffered stream, and each line is
//! handed to [GeofReader::process_line()]. The reader is a state machine, with
//! the current [Phase] deciding what the line means:
//!
//! ```text
//! Header -> SeekNodes -> NodeCount -> Nodes
//!        -> SeekElements -> ElementCount -> Elements
//!        -> SeekGroups -> Groups <-> Elset | Liset
//!        -> Done
//! ```
//!
//! The node section gives the node count and spatial dimension, followed by
//! one `id x y [z]` record per node. Once every node is read, the node
//! identifiers are indexed so that element connectivity can be resolved to
//! node ranks as each element is read.
//!
//! # Formatting notes
//!
//! **Unsupported element types are skipped**
//!
//! > A warning is logged and the element is left out of the mesh entirely. No
//! > rank is reserved for it, so ranks of the following elements stay
//! > contiguous.
//!
//! **Element groups end at the next marker only**
//!
//! > Identifiers of an `**elset` may span any number of lines, including blank
//! > ones, until the next line starting with `*`.
//!
//! **Line groups also end at a blank line**
//!
//! > An `**liset` stops at the next marker *or* an empty line. Only `line` and
//! > `quad` segments are kept, and a `quad` contributes its first and third
//! > node as the end points of a single line.
//!
//! **Missing groups are fine**
//!
//! > A file that ends before any `***group` section gives a mesh with only the
//! > `ALL_ELEMENT` group. A group section that is never closed by `***return`
//! > is accepted with a warning.

// reader modules
mod geof;
mod parsers;

// re-exports for clean API + documentation
#[doc(inline)]
pub use geof::{GeofReader, Phase};

// library imports
use crate::error::Result;
use crate::Mesh;
use std::path::Path;

/// Read a mesh from an ASCII geof file
///
/// Returns a result containing the [Mesh] extracted from the file at `path`.
///
/// - `path` - Path to the geof file, can be [&str], [String], [Path], etc...
///
/// Example
/// ```rust, no_run
/// # use fetools_mesh::{Mesh, read_geof};
/// let mesh: Mesh = read_geof("path/to/mesh.geof").unwrap();
/// println!("{mesh}");
/// ```
pub fn read_geof<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let mut reader = GeofReader::new();
    reader.disable_progress();
    reader.parse(path.as_ref())
}
