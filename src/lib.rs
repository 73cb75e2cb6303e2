//! `fetools` is a small modular toolkit for reading Z-set finite element
//! meshes and their integration point results
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use fetools_format as format;

#[cfg(feature = "mesh")]
#[cfg_attr(docsrs, doc(cfg(feature = "mesh")))]
#[doc(inline)]
pub use fetools_mesh as mesh;

#[cfg(feature = "results")]
#[cfg_attr(docsrs, doc(cfg(feature = "results")))]
#[doc(inline)]
pub use fetools_results as results;
