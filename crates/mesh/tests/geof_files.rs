//! Integration tests for reading geof files

use fetools_mesh::reader::GeofReader;
use fetools_mesh::{read_geof, ElementType, Error, Mesh, Topology, ALL_ELEMENT};
use rstest::{fixture, rstest};

#[fixture]
fn tetra() -> Mesh {
    read_geof("./data/geof/tetra.geof").unwrap()
}

#[fixture]
fn sparse() -> Mesh {
    read_geof("./data/geof/sparse.geof").unwrap()
}

#[fixture]
fn plate() -> Mesh {
    read_geof("./data/geof/plate.geof").unwrap()
}

#[rstest]
fn tetra_summary(tetra: Mesh) {
    assert_eq!(tetra.dimension, 3);
    assert_eq!(tetra.node_count(), 5);
    assert_eq!(tetra.element_count(), 2);
    assert_eq!(tetra.integration_point_count(), 8);
    assert_eq!(tetra.elements[1].nodes, vec![1, 2, 3, 4]);
    assert_eq!(tetra.elements[1].kind.topology(), Topology::Tetra);

    let names: Vec<&str> = tetra.elsets.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec![ALL_ELEMENT, "grain_1", "grain_2"]);
}

#[rstest]
fn tetra_grains(tetra: Mesh) {
    let field = tetra.compute_grain_id_field("grain_").unwrap();
    assert_eq!(field.width(), 8);
    assert_eq!(field.to_vec(), vec![1, 2]);
}

#[rstest]
fn sparse_ranks_are_contiguous(sparse: Mesh) {
    // the unsupported c3d5 element does not take a rank
    let ids: Vec<u32> = sparse.elements.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![10, 30, 25]);
    for (i, element) in sparse.elements.iter().enumerate() {
        assert_eq!(element.rank, i);
    }
    assert_eq!(sparse.elsets[0].elements, vec![10, 30, 25]);
    assert_eq!(sparse.integration_point_count(), 12);
}

#[rstest]
#[case(0, vec![0, 1, 2, 3])]
#[case(1, vec![1, 4, 2, 5])]
#[case(2, vec![3, 5, 4, 0])]
fn sparse_connectivity(sparse: Mesh, #[case] rank: usize, #[case] expected: Vec<usize>) {
    assert_eq!(sparse.elements[rank].nodes, expected);
    assert_eq!(
        sparse.canonical_connectivity(&sparse.elements[rank]),
        Some(expected)
    );
}

#[rstest]
fn sparse_index(sparse: Mesh) {
    let index = sparse.node_index().unwrap();
    assert_eq!(index.max_id(), 9000);
    assert_eq!(index.get(9000), Some(3));
    assert_eq!(index.get(55), Some(5));
    assert_eq!(index.get(1), None);
}

#[rstest]
fn sparse_elsets(sparse: Mesh) {
    let names: Vec<&str> = sparse.elsets.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec![ALL_ELEMENT, "grain_2", "grain_1"]);

    // second grain_2 block merges into the first
    assert_eq!(sparse.elset("grain_2").unwrap().elements, vec![10, 25, 30]);
    // blank lines do not end an elset
    assert_eq!(sparse.elset("grain_1").unwrap().elements, vec![30]);
}

#[rstest]
fn sparse_group_fields(sparse: Mesh) {
    // last registered group wins for element 30
    let by_order = sparse.compute_group_id_field(None, false).unwrap();
    assert_eq!(by_order.to_vec(), vec![1, 2, 1]);

    let by_name = sparse.compute_grain_id_field("grain_").unwrap();
    assert_eq!(by_name.to_vec(), vec![2, 1, 2]);
}

#[rstest]
fn sparse_lisets(sparse: Mesh) {
    assert_eq!(sparse.lisets.len(), 1);
    let boundary = sparse.liset("boundary").unwrap();

    // quad keeps its first and third node, tri is dropped, and the blank line
    // ends the group before the last segment
    assert_eq!(boundary.segments, vec![[100, 7], [7, 42]]);
    assert_eq!(boundary.segments_as_ranks(), vec![[99, 6], [6, 41]]);
}

#[rstest]
fn plate_is_2d(plate: Mesh) {
    assert_eq!(plate.dimension, 2);
    assert_eq!(plate.nodes[4].coordinates, [0.5, 0.5, 0.0]);
    assert_eq!(plate.elements[0].kind, ElementType::C2d4);
    assert_eq!(plate.integration_point_count(), 12);

    let centroid = plate.element_centroid(0).unwrap();
    assert_eq!(centroid, [0.25, 0.25, 0.0]);
}

#[rstest]
fn plate_duplicate_liset(plate: Mesh) {
    assert_eq!(plate.lisets.len(), 1);
    assert_eq!(plate.lisets[0].segments, vec![[1, 2], [2, 3]]);
}

#[rstest]
fn groups_are_optional() {
    let mesh = read_geof("./data/geof/no_groups.geof").unwrap();
    assert_eq!(mesh.elsets.len(), 1);
    assert!(mesh.lisets.is_empty());
    assert_eq!(mesh.element_count(), 1);
}

#[rstest]
fn missing_node_is_fatal() {
    let result = read_geof("./data/geof/missing_node.geof");
    assert!(matches!(
        result,
        Err(Error::UnresolvedNode {
            element: 1,
            node: 4
        })
    ));
}

#[rstest]
fn truncated_file_is_fatal() {
    let result = read_geof("./data/geof/truncated.geof");
    assert!(matches!(result, Err(Error::ParseError { .. })));
}

#[rstest]
fn missing_file() {
    let result = read_geof("./data/geof/not_here.geof");
    assert!(matches!(result, Err(Error::IOError(_))));
}

#[rstest]
fn id_ceiling() {
    let mut reader = GeofReader::new();
    reader.disable_progress();
    reader.set_id_ceiling(1000);

    let result = reader.parse("./data/geof/sparse.geof".as_ref());
    assert!(matches!(
        result,
        Err(Error::IdentifierOutOfRange {
            max_id: 9000,
            ceiling: 1000
        })
    ));
}

#[rstest]
fn reader_is_reusable() {
    let mut reader = GeofReader::new();
    reader.disable_progress();

    let first = reader.parse("./data/geof/plate.geof".as_ref()).unwrap();
    let second = reader.parse("./data/geof/plate.geof".as_ref()).unwrap();
    assert_eq!(first, second);
}
