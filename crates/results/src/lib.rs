//! Z-set run manifests and integration point results
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod calculation;
mod error;
mod manifest;
mod store;

#[doc(inline)]
pub use calculation::{Calculation, ElementField};

#[doc(inline)]
pub use manifest::{read_manifest, Card, ManifestInfo};

#[doc(inline)]
pub use store::ResultStore;

#[doc(inline)]
pub use error::{Error, Result};
