//! Everything to do with a single run, from its prefix and directory

// crate modules
use crate::error::{Error, Result};
use crate::manifest::{read_manifest, ManifestInfo};
use crate::store::ResultStore;

// fetools modules
use fetools_format::{elided_list, f};
use fetools_mesh::{read_geof, Mesh};

// external crates
use log::debug;

// standard library
use std::path::{Path, PathBuf};

/// A named value per element, computed by the caller for output
#[derive(Debug, Clone, PartialEq)]
pub struct ElementField {
    /// Name the field is written under
    pub name: String,
    /// One value per element, in mesh rank order
    pub values: Vec<f64>,
}

/// A completed run, made of `<prefix>.ut`, `<prefix>.integ` and the mesh
///
/// Opening a calculation reads the manifest and loads the mesh file it names
/// from the same working directory. Results are read on demand through
/// [Calculation::store()].
///
/// Fields derived from the results can be kept alongside the mesh with
/// [Calculation::add_element_field()], ready to be attached to cells by
/// whatever writes the mesh out.
///
/// ```rust, no_run
/// # use fetools_results::Calculation;
/// let mut calc = Calculation::open("mesh", "/path/to/run").unwrap();
///
/// let mean = calc.store().read_mean_field(1, "sig11").unwrap();
/// calc.add_element_field("sig11_mean", mean).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Calculation {
    /// Common name of the run files
    pub prefix: String,
    /// Directory holding the run files
    pub working_dir: PathBuf,
    /// Content of `<prefix>.ut`
    pub manifest: ManifestInfo,
    /// Mesh named by the manifest
    pub mesh: Mesh,
    /// Caller computed per-element fields, in the order added
    fields: Vec<ElementField>,
}

impl Calculation {
    /// Read the manifest and mesh of the run `prefix` in `working_dir`
    pub fn open<P: AsRef<Path>>(prefix: &str, working_dir: P) -> Result<Self> {
        let working_dir = working_dir.as_ref().to_path_buf();
        let manifest = read_manifest(working_dir.join(f!("{prefix}.ut")))?;

        debug!("Loading mesh {:?}", manifest.mesh_file);
        let mesh = read_geof(working_dir.join(&manifest.mesh_file))?;

        Ok(Self {
            prefix: prefix.to_string(),
            working_dir,
            manifest,
            mesh,
            fields: Vec::new(),
        })
    }

    /// Path to the `<prefix>.integ` result file
    pub fn integ_path(&self) -> PathBuf {
        self.working_dir.join(f!("{}.integ", self.prefix))
    }

    /// Access to the integration point results
    pub fn store(&self) -> ResultStore<'_> {
        ResultStore::new(&self.mesh, &self.manifest, self.integ_path())
    }

    /// Keep a named per-element field, which must have one value per element
    pub fn add_element_field(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        if values.len() != self.mesh.element_count() {
            return Err(Error::FieldLengthMismatch {
                name: name.to_string(),
                expected: self.mesh.element_count(),
                found: values.len(),
            });
        }

        self.fields.push(ElementField {
            name: name.to_string(),
            values,
        });
        Ok(())
    }

    /// Fields added so far
    pub fn element_fields(&self) -> &[ElementField] {
        &self.fields
    }
}

impl std::fmt::Display for Calculation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let names: Vec<&str> = self.fields.iter().map(|e| e.name.as_str()).collect();

        let mut s = "Calculation {\n".to_string();
        s += &f!("    prefix: {}\n", self.prefix);
        s += &f!("    working dir: {}\n", self.working_dir.display());
        s += &f!("    mesh file: {}\n", self.manifest.mesh_file);
        s += &f!("    elements: {}\n", self.mesh.element_count());
        s += &f!("    cards: {}\n", self.manifest.card_count());
        s += &f!("    element fields: {}\n}}", elided_list(&names, 6));

        write!(f, "{}", s)
    }
}
