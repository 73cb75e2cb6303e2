//! Decoding of binary integration point results

// crate modules
use crate::error::{Error, Result};
use crate::manifest::ManifestInfo;

// fetools modules
use fetools_mesh::Mesh;

// external crates
use log::{debug, trace};

// standard library
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Bytes per stored value
const VALUE_SIZE: usize = std::mem::size_of::<f32>();

/// Random access to the values of an `.integ` result file
///
/// Values are big-endian `f32`, stored card by card. Within a card, elements
/// follow mesh rank order, and each element record holds every integration
/// point field of the manifest in turn, with one value per integration
/// point.
///
/// ```text
/// card 1 | element 0 | field 0: ip 0 .. ip n | field 1: ip 0 .. ip n | ...
///        | element 1 | ...
/// card 2 | ...
/// ```
///
/// The store only borrows the mesh and manifest. Every read opens its own
/// handle on the file, so a store may be shared between threads.
#[derive(Debug, Clone)]
pub struct ResultStore<'a> {
    mesh: &'a Mesh,
    manifest: &'a ManifestInfo,
    path: PathBuf,
}

impl<'a> ResultStore<'a> {
    /// Store over the result file at `path`
    pub fn new<P: AsRef<Path>>(mesh: &'a Mesh, manifest: &'a ManifestInfo, path: P) -> Self {
        Self {
            mesh,
            manifest,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path to the result file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte offset of the first value of a card
    ///
    /// ```rust
    /// # use fetools_mesh::{ElementType, Mesh};
    /// # use fetools_results::{Card, ManifestInfo, ResultStore};
    /// let mut mesh = Mesh::new(3);
    /// for id in 1..=4 {
    ///     mesh.add_node(id, [0.0; 3]);
    /// }
    /// mesh.add_element(1, ElementType::C3d4, vec![0, 1, 2, 3]).unwrap();
    ///
    /// let manifest = ManifestInfo {
    ///     integ_fields: vec!["sig11".into(), "sig22".into()],
    ///     cards: vec![Card { number: 1, time: 0.0 }, Card { number: 2, time: 1.0 }],
    ///     ..Default::default()
    /// };
    ///
    /// // 2 fields at 4 integration points per card
    /// let store = ResultStore::new(&mesh, &manifest, "mesh.integ");
    /// assert_eq!(store.card_offset(2).unwrap(), 2 * 4 * 4);
    /// ```
    pub fn card_offset(&self, card: usize) -> Result<u64> {
        self.check_card(card)?;
        let card_size = self.field_count() * self.mesh.integration_point_count() * VALUE_SIZE;
        Ok(((card - 1) * card_size) as u64)
    }

    /// Byte offset of the record of element `rank` in a card
    pub fn element_offset(&self, card: usize, rank: usize) -> Result<u64> {
        let offset = self.card_offset(card)?;
        self.check_element(rank)?;

        let points: usize = self.mesh.elements[..rank]
            .iter()
            .map(|e| e.integration_points())
            .sum();
        Ok(offset + (points * self.field_count() * VALUE_SIZE) as u64)
    }

    /// Every field of one element, as one row of integration point values
    /// per field in manifest order
    pub fn read_element_record(&self, card: usize, rank: usize) -> Result<Vec<Vec<f32>>> {
        let offset = self.element_offset(card, rank)?;
        let n_points = self.mesh.elements[rank].integration_points();

        let mut file = self.open_at(offset)?;
        let values = read_values(&mut file, offset, n_points * self.field_count())?;
        Ok(values.chunks(n_points).map(|row| row.to_vec()).collect())
    }

    /// Values of a field at every integration point of one element
    pub fn read_element_field(&self, card: usize, field: &str, rank: usize) -> Result<Vec<f32>> {
        let index = self.manifest.integ_field_index(field)?;
        let offset = self.element_offset(card, rank)?;

        // records are field-major, so skip the fields before this one
        let n_points = self.mesh.elements[rank].integration_points();
        let offset = offset + (index * n_points * VALUE_SIZE) as u64;
        trace!("Reading {field} of element {rank} from offset {offset}");

        let mut file = self.open_at(offset)?;
        read_values(&mut file, offset, n_points)
    }

    /// Mean of a field over the integration points of every element
    ///
    /// The whole card is read in one sequential pass.
    pub fn read_mean_field(&self, card: usize, field: &str) -> Result<Vec<f64>> {
        let index = self.manifest.integ_field_index(field)?;
        let mut offset = self.card_offset(card)?;
        debug!("Reading mean {field} at card {card} from offset {offset}");

        let mut file = self.open_at(offset)?;
        let mut means = Vec::with_capacity(self.mesh.element_count());

        for element in &self.mesh.elements {
            let n_points = element.integration_points();
            let n_values = n_points * self.field_count();
            let values = read_values(&mut file, offset, n_values)?;
            offset += (n_values * VALUE_SIZE) as u64;

            let row = &values[index * n_points..(index + 1) * n_points];
            let sum: f64 = row.iter().map(|&v| v as f64).sum();
            means.push(sum / n_points as f64);
        }

        Ok(means)
    }

    /// Number of integration point fields per element record
    fn field_count(&self) -> usize {
        self.manifest.integ_fields.len()
    }

    fn check_card(&self, card: usize) -> Result<()> {
        let count = self.manifest.card_count();
        if card == 0 || card > count {
            return Err(Error::OutOfRangeCard { card, count });
        }
        Ok(())
    }

    fn check_element(&self, rank: usize) -> Result<()> {
        let count = self.mesh.element_count();
        if rank >= count {
            return Err(Error::OutOfRangeElement { rank, count });
        }
        Ok(())
    }

    /// Open the result file positioned at `offset`
    fn open_at(&self, offset: u64) -> Result<BufReader<File>> {
        let mut reader = BufReader::new(File::open(&self.path)?);
        reader.seek(SeekFrom::Start(offset))?;
        Ok(reader)
    }
}

/// Read `n` big-endian f32 values from the current position
fn read_values<R: Read>(reader: &mut R, offset: u64, n: usize) -> Result<Vec<f32>> {
    let expected = n * VALUE_SIZE;
    let mut buffer = vec![0u8; expected];
    reader.read_exact(&mut buffer).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => Error::TruncatedRead { offset, expected },
        _ => Error::IOError(e),
    })?;

    Ok(buffer
        .chunks_exact(VALUE_SIZE)
        .map(|b| f32::from_be_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}
