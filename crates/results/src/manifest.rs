//! Run manifest describing what is stored in the result files

// crate modules
use crate::error::{Error, Result};

// fetools modules
use fetools_format::{elided_list, f, NumFormat};

// external crates
use log::{debug, info, trace};
use serde::Serialize;

// standard library
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

/// A single stored timestep
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Card {
    /// One-based position in the card table
    pub number: usize,
    /// Simulation time of the card
    pub time: f64,
}

/// Everything the `.ut` manifest of a run says about its results
///
/// A manifest names the mesh file, the nodal and integration point fields
/// in the order they are stored, and the table of cards.
///
/// ```text
/// **meshfile mesh.geof
/// **node U1 U2 U3
/// **integ sig11 sig22 sig33 sig12 sig23 sig31
/// **element
///    1   1   1   1   0.000000e+00
///    2   1   1   1   1.000000e+00
/// ```
///
/// Each line after `**element` is a card, with the time as the fifth value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ManifestInfo {
    /// Name of the geof file, relative to the manifest
    pub mesh_file: String,
    /// Names of the nodal fields
    pub node_fields: Vec<String>,
    /// Names of the integration point fields, in storage order
    pub integ_fields: Vec<String>,
    /// Card table in file order
    pub cards: Vec<Card>,
}

impl ManifestInfo {
    /// Parse a manifest from any buffered source
    ///
    /// ```rust
    /// # use fetools_results::ManifestInfo;
    /// let content = "**meshfile plate.geof
    /// **integ sig11 sig22
    /// **element
    /// 1 1 1 1 0.0
    /// 2 1 1 1 0.5
    /// ";
    ///
    /// let manifest = ManifestInfo::from_reader(content.as_bytes()).unwrap();
    /// assert_eq!(manifest.mesh_file, "plate.geof");
    /// assert_eq!(manifest.integ_fields, vec!["sig11", "sig22"]);
    /// assert_eq!(manifest.times(), vec![0.0, 0.5]);
    /// ```
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut manifest = Self::default();
        let mut mesh_file = None;
        let mut reading_cards = false;

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();

            if reading_cards {
                if !line.is_empty() {
                    let number = manifest.cards.len() + 1;
                    let time = parse_card_time(line, i + 1)?;
                    trace!("Card {number} at t={time}");
                    manifest.cards.push(Card { number, time });
                }
            } else if let Some(rest) = line.strip_prefix("**meshfile") {
                mesh_file = rest.split_whitespace().next().map(str::to_string);
            } else if let Some(rest) = line.strip_prefix("**node") {
                manifest.node_fields = split_names(rest);
            } else if let Some(rest) = line.strip_prefix("**integ") {
                manifest.integ_fields = split_names(rest);
            } else if line.starts_with("**element") {
                debug!("Card table starts on line {}", i + 1);
                reading_cards = true;
            }
        }

        manifest.mesh_file = mesh_file.ok_or_else(|| Error::ParseError {
            line: 0,
            reason: "no **meshfile entry found".to_string(),
        })?;

        debug!(
            "Manifest lists {} node fields, {} integ fields, {} cards",
            manifest.node_fields.len(),
            manifest.integ_fields.len(),
            manifest.cards.len()
        );
        Ok(manifest)
    }

    /// Simulation time of every card, in card order
    pub fn times(&self) -> Vec<f64> {
        self.cards.iter().map(|c| c.time).collect()
    }

    /// Number of cards in the table
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Position of an integration point field in the storage order
    pub fn integ_field_index(&self, field: &str) -> Result<usize> {
        self.integ_fields
            .iter()
            .position(|name| name == field)
            .ok_or_else(|| Error::FieldNotFound(field.to_string()))
    }

    /// Write the manifest to a JSON file for inspection
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

impl std::fmt::Display for ManifestInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let times: Vec<String> = self.cards.iter().map(|c| c.time.sci(5, 2)).collect();

        let mut s = "Manifest {\n".to_string();
        s += &f!("    mesh file: {}\n", self.mesh_file);
        s += &f!("    node fields: {}\n", elided_list(&self.node_fields, 6));
        s += &f!("    integ fields: {}\n", elided_list(&self.integ_fields, 6));
        s += &f!("    cards: {}\n", self.cards.len());
        s += &f!("    times: {}\n}}", elided_list(&times, 4));

        write!(f, "{}", s)
    }
}

/// Read the `.ut` manifest of a run
///
/// Example
/// ```rust, no_run
/// # use fetools_results::read_manifest;
/// let manifest = read_manifest("path/to/mesh.ut").unwrap();
/// println!("{manifest}");
/// ```
pub fn read_manifest<P: AsRef<Path>>(path: P) -> Result<ManifestInfo> {
    let path = path.as_ref();
    info!("Reading {:?}", path.file_name().unwrap_or(path.as_os_str()));
    ManifestInfo::from_reader(BufReader::new(File::open(path)?))
}

/// Field names following a marker
fn split_names(i: &str) -> Vec<String> {
    i.split_whitespace().map(str::to_string).collect()
}

/// Time of a card line, which is the fifth value
fn parse_card_time(i: &str, line: usize) -> Result<f64> {
    i.split_whitespace()
        .nth(4)
        .and_then(|t| t.parse::<f64>().ok())
        .ok_or_else(|| Error::ParseError {
            line,
            reason: f!("expected card time as the fifth value of {i:?}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = "**meshfile mesh.geof
**node U1 U2
**integ sig11 sig22 sig12
**element
   1   1   1   1   0.000000e+00

   2   1   1   2   2.500000e-01
   3   2   1   3   1.000000e+00
";

    #[test]
    fn full_manifest() {
        let manifest = ManifestInfo::from_reader(MANIFEST.as_bytes()).unwrap();
        assert_eq!(manifest.mesh_file, "mesh.geof");
        assert_eq!(manifest.node_fields, vec!["U1", "U2"]);
        assert_eq!(manifest.integ_fields, vec!["sig11", "sig22", "sig12"]);
        assert_eq!(manifest.card_count(), 3);
        assert_eq!(manifest.times(), vec![0.0, 0.25, 1.0]);
        assert_eq!(manifest.cards[2], Card { number: 3, time: 1.0 });
    }

    #[test]
    fn field_lookup() {
        let manifest = ManifestInfo::from_reader(MANIFEST.as_bytes()).unwrap();
        assert_eq!(manifest.integ_field_index("sig22").unwrap(), 1);
        assert!(matches!(
            manifest.integ_field_index("U1"),
            Err(Error::FieldNotFound(_))
        ));
    }

    #[test]
    fn missing_meshfile() {
        let result = ManifestInfo::from_reader("**integ a\n**element\n".as_bytes());
        assert!(matches!(result, Err(Error::ParseError { .. })));
    }

    #[test]
    fn bad_card_line() {
        let content = "**meshfile m.geof\n**element\n1 1 1 1 0.0\n2 1 1 x\n";
        let result = ManifestInfo::from_reader(content.as_bytes());
        assert!(matches!(result, Err(Error::ParseError { line: 4, .. })));
    }

    #[test]
    fn no_cards() {
        let manifest = ManifestInfo::from_reader("**meshfile m.geof\n".as_bytes()).unwrap();
        assert!(manifest.integ_fields.is_empty());
        assert!(manifest.times().is_empty());
    }

    #[test]
    fn summary() {
        let manifest = ManifestInfo::from_reader(MANIFEST.as_bytes()).unwrap();
        let s = manifest.to_string();
        assert!(s.contains("integ fields: sig11, sig22, sig12"));
        assert!(s.contains("times: 0.00000e+00, 2.50000e-01, 1.00000e+00"));
    }
}
