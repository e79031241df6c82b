use strata_mesh_cpu::{
    FanTessellator, ListTessellator, PrimitiveKind, RecordingBackend, StripTessellator,
    TerrainMesh, Tessellation, Tessellator, Vertex,
};
use strata_terrain::HeightField;

fn mesh(rows: usize, cols: usize) -> TerrainMesh {
    let samples = (0..rows * cols).map(|i| i as f32).collect();
    TerrainMesh::build(&HeightField::from_samples(0.0, 0.0, 1.0, 1.0, rows, cols, samples).unwrap())
}

/// (row, col) of each recorded vertex, recovered from its position.
fn nodes(verts: &[Vertex]) -> Vec<(usize, usize)> {
    verts
        .iter()
        .map(|v| (v.pos.z as usize, v.pos.x as usize))
        .collect()
}

#[test]
fn list_emits_two_triangles_per_cell() {
    let m = mesh(3, 4);
    let mut rec = RecordingBackend::new();
    ListTessellator.emit(&m, &mut rec);
    assert_eq!(rec.primitives.len(), 1);
    assert_eq!(rec.primitives[0].kind, PrimitiveKind::TriangleList);
    assert_eq!(rec.vertex_emissions(), 6 * 3 * 2);
    assert_eq!(rec.triangles().len(), 2 * 3 * 2);
    assert_eq!(
        nodes(&rec.primitives[0].vertices[..6]),
        vec![(0, 0), (1, 0), (1, 1), (0, 0), (1, 1), (0, 1)]
    );
}

#[test]
fn fan_emits_ten_vertices_per_block() {
    let m = mesh(3, 3);
    let mut rec = RecordingBackend::new();
    FanTessellator.emit(&m, &mut rec);
    assert_eq!(rec.primitives.len(), 1);
    let fan = &rec.primitives[0];
    assert_eq!(fan.kind, PrimitiveKind::TriangleFan);
    assert_eq!(
        nodes(&fan.vertices),
        vec![
            (1, 1),
            (0, 0),
            (1, 0),
            (2, 0),
            (2, 1),
            (2, 2),
            (1, 2),
            (0, 2),
            (0, 1),
            (0, 0)
        ]
    );
    assert_eq!(rec.triangles().len(), 8);
}

#[test]
fn fan_drops_cells_outside_whole_blocks() {
    // 4x6 nodes: one row of blocks, two blocks wide; the last row and column of cells is skipped
    let m = mesh(4, 6);
    let mut rec = RecordingBackend::new();
    FanTessellator.emit(&m, &mut rec);
    assert_eq!(rec.primitives.len(), 2);
    assert_eq!(rec.triangles().len(), 16);
    assert!(rec.primitives.iter().all(|p| p.vertices.len() == 10));
}

#[test]
fn strip_three_by_three_is_one_stitched_primitive() {
    let m = mesh(3, 3);
    let mut rec = RecordingBackend::new();
    StripTessellator.emit(&m, &mut rec);
    assert_eq!(rec.primitives.len(), 1);
    let strip = &rec.primitives[0];
    assert_eq!(strip.kind, PrimitiveKind::TriangleStrip);
    // (2 * cols + 1) for the first row pair, 2 * cols for the last, no trailing repeat
    assert_eq!(strip.vertices.len(), 2 * 3 + 1 + 2 * 3);
    assert_eq!(
        nodes(&strip.vertices),
        vec![
            (0, 0),
            (1, 0),
            (0, 1),
            (1, 1),
            (0, 2),
            (1, 2),
            (1, 2),
            (1, 2),
            (2, 2),
            (1, 1),
            (2, 1),
            (1, 0),
            (2, 0)
        ]
    );
    assert_eq!(rec.triangles().len(), 8);
}

#[test]
fn strip_bridges_between_iterations() {
    let m = mesh(5, 3);
    let mut rec = RecordingBackend::new();
    StripTessellator.emit(&m, &mut rec);
    let strip = &rec.primitives[0];
    assert_eq!(strip.vertices.len(), 14 + 13);
    let n = nodes(&strip.vertices);
    assert_eq!(&n[12..16], &[(2, 0), (2, 0), (2, 0), (3, 0)]);
    assert_ne!(n[n.len() - 1], n[n.len() - 2]);
    assert_eq!(rec.triangles().len(), 16);
}

#[test]
fn empty_mesh_emits_nothing() {
    let m = TerrainMesh::default();
    for t in Tessellation::ALL {
        let mut rec = RecordingBackend::new();
        t.render(&m, &mut rec);
        assert!(rec.primitives.is_empty(), "{t}");
    }
}

#[test]
fn strategy_names_and_kinds() {
    assert_eq!("fan".parse::<Tessellation>().unwrap(), Tessellation::Fan);
    assert_eq!("STRIP".parse::<Tessellation>().unwrap(), Tessellation::Strip);
    assert!("quads".parse::<Tessellation>().is_err());
    assert_eq!(Tessellation::List.kind(), PrimitiveKind::TriangleList);
    assert!(Tessellation::Fan.description().contains("triangle fan"));
    let mut t = Tessellation::Strip;
    for _ in 0..3 {
        t = t.next();
    }
    assert_eq!(t, Tessellation::Strip);
    assert_eq!(Tessellation::List.next(), Tessellation::Fan);
}
