//! Integration tests for reading a run from its files

use fetools_results::{read_manifest, Calculation, Error, ManifestInfo};
use rstest::{fixture, rstest};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const GEOF: &str = "***geometry
 **node
 6 3
 1 0.0 0.0 0.0
 2 1.0 0.0 0.0
 3 0.0 1.0 0.0
 4 0.0 0.0 1.0
 5 1.0 1.0 0.0
 6 1.0 1.0 1.0
 **element
 2
 1 c3d4 1 2 3 4
 2 c2d8r 1 2 3 4 5 6 1 2
***group
 **elset grain_1
 1
 **elset grain_2
 2
***return
";

const UT: &str = "**meshfile mesh.geof
**node U1 U2 U3
**integ a b
**element
 1 1 1 1 0.0
 2 1 1 2 1.0
";

/// Value stored for a card, element, field and integration point
fn value(card: usize, element: usize, field: usize, ip: usize) -> f32 {
    (card * 1000 + element * 100 + field * 10 + ip) as f32
}

/// Write the binary results for the mesh above, with `drop` bytes cut off
fn write_integ(path: &Path, drop: usize) {
    let points = [4, 1];
    let mut bytes = Vec::new();
    for card in 1..=2 {
        for (element, &n) in points.iter().enumerate() {
            for field in 0..2 {
                for ip in 0..n {
                    bytes.extend(value(card, element, field, ip).to_be_bytes());
                }
            }
        }
    }
    bytes.truncate(bytes.len() - drop);
    fs::write(path, bytes).unwrap();
}

fn run_dir(drop: usize) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("mesh.geof"), GEOF).unwrap();
    fs::write(dir.path().join("mesh.ut"), UT).unwrap();
    write_integ(&dir.path().join("mesh.integ"), drop);
    dir
}

#[fixture]
fn run() -> TempDir {
    run_dir(0)
}

#[rstest]
fn static_manifest() {
    let manifest = read_manifest("./data/mesh.ut").unwrap();
    assert_eq!(manifest.mesh_file, "mesh.geof");
    assert_eq!(manifest.node_fields.len(), 3);
    assert_eq!(manifest.integ_fields.len(), 12);
    assert_eq!(manifest.integ_fields[6], "eto11");
    assert_eq!(manifest.times(), vec![0.0, 10.0, 20.0, 30.0]);
}

#[rstest]
fn manifest_json(run: TempDir) {
    let manifest = read_manifest(run.path().join("mesh.ut")).unwrap();
    let path = run.path().join("mesh.json");
    manifest.write_json(&path).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(json["mesh_file"], "mesh.geof");
    assert_eq!(json["integ_fields"][1], "b");
    assert_eq!(json["cards"][1]["time"], 1.0);
}

#[rstest]
fn open_run(run: TempDir) {
    let calc = Calculation::open("mesh", run.path()).unwrap();
    assert_eq!(calc.mesh.element_count(), 2);
    assert_eq!(calc.mesh.integration_point_count(), 5);
    assert_eq!(calc.manifest.card_count(), 2);
    assert_eq!(calc.integ_path(), run.path().join("mesh.integ"));
}

#[rstest]
#[case(1, "a", 0)]
#[case(1, "b", 0)]
#[case(2, "a", 1)]
#[case(2, "b", 1)]
fn element_field(run: TempDir, #[case] card: usize, #[case] field: &str, #[case] rank: usize) {
    let calc = Calculation::open("mesh", run.path()).unwrap();
    let index = calc.manifest.integ_field_index(field).unwrap();
    let n = calc.mesh.elements[rank].integration_points();

    let expected: Vec<f32> = (0..n).map(|ip| value(card, rank, index, ip)).collect();
    let values = calc.store().read_element_field(card, field, rank).unwrap();
    assert_eq!(values, expected);
}

#[rstest]
fn element_record(run: TempDir) {
    let calc = Calculation::open("mesh", run.path()).unwrap();
    let record = calc.store().read_element_record(2, 0).unwrap();
    assert_eq!(
        record,
        vec![
            vec![2000.0, 2001.0, 2002.0, 2003.0],
            vec![2010.0, 2011.0, 2012.0, 2013.0]
        ]
    );
}

#[rstest]
fn mean_field(run: TempDir) {
    let calc = Calculation::open("mesh", run.path()).unwrap();
    let means = calc.store().read_mean_field(2, "b").unwrap();
    assert_eq!(means.len(), 2);
    assert!((means[0] - 2011.5).abs() < 1e-9);
    assert!((means[1] - 2110.0).abs() < 1e-9);
}

#[rstest]
fn single_tetra() {
    // one c3d4, one card, one field
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("tet.geof"),
        "***geometry\n**node\n4 3\n1 0 0 0\n2 1 0 0\n3 0 1 0\n4 0 0 1\n**element\n1\n1 c3d4 1 2 3 4\n***return\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("tet.ut"),
        "**meshfile tet.geof\n**integ sig11\n**element\n1 1 1 1 0.0\n",
    )
    .unwrap();

    let values = [1.0f32, 2.0, 3.0, 6.5];
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();
    fs::write(dir.path().join("tet.integ"), bytes).unwrap();

    let calc = Calculation::open("tet", dir.path()).unwrap();
    let store = calc.store();
    assert_eq!(store.read_element_field(1, "sig11", 0).unwrap(), values);

    let mean = store.read_mean_field(1, "sig11").unwrap();
    assert!((mean[0] - 3.125).abs() < 1e-9);
}

#[rstest]
fn truncated_results() {
    let run = run_dir(8);
    let calc = Calculation::open("mesh", run.path()).unwrap();
    let store = calc.store();

    // card 1 is intact
    assert!(store.read_mean_field(1, "a").is_ok());

    // second element of card 2 starts at 40 + 32 and needs 8 bytes
    assert!(matches!(
        store.read_element_record(2, 1),
        Err(Error::TruncatedRead {
            offset: 72,
            expected: 8
        })
    ));
}

#[rstest]
fn element_fields(run: TempDir) {
    let mut calc = Calculation::open("mesh", run.path()).unwrap();
    let mean = calc.store().read_mean_field(1, "a").unwrap();
    calc.add_element_field("a_mean", mean).unwrap();

    let grains = calc.mesh.compute_grain_id_field("grain_").unwrap();
    let grains = grains.to_vec().into_iter().map(f64::from).collect();
    calc.add_element_field("grain", grains).unwrap();

    let names: Vec<&str> = calc.element_fields().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a_mean", "grain"]);
    assert_eq!(calc.element_fields()[1].values, vec![1.0, 2.0]);

    assert!(matches!(
        calc.add_element_field("short", vec![1.0]),
        Err(Error::FieldLengthMismatch {
            expected: 2,
            found: 1,
            ..
        })
    ));
}

#[rstest]
fn missing_mesh() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("mesh.ut"), UT).unwrap();
    assert!(matches!(
        Calculation::open("mesh", dir.path()),
        Err(Error::MeshError(_))
    ));
}

#[rstest]
fn missing_manifest() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Calculation::open("mesh", dir.path()),
        Err(Error::IOError(_))
    ));
}

#[rstest]
fn manifest_from_string() {
    let manifest = ManifestInfo::from_reader(UT.as_bytes()).unwrap();
    assert_eq!(manifest.integ_fields, vec!["a", "b"]);
}
