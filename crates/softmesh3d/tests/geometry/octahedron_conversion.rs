use softmesh3d::fem::{FemConversionSettings, MeshToFemConverter};
use softmesh3d::math::{Point, Real};
use softmesh3d::na;

fn octahedron() -> (Vec<Point<Real>>, Vec<u32>) {
    let vertices = vec![
        Point::new(1.0, 0.0, 0.0),
        Point::new(-1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
        Point::new(0.0, -1.0, 0.0),
        Point::new(0.0, 0.0, 1.0),
        Point::new(0.0, 0.0, -1.0),
    ];
    let indices = vec![
        0, 2, 4, 2, 1, 4, 1, 3, 4, 3, 0, 4, //
        2, 0, 5, 1, 2, 5, 3, 1, 5, 0, 3, 5,
    ];
    (vertices, indices)
}

#[test]
fn octahedron_volume_is_bounded() {
    let (vertices, indices) = octahedron();
    let settings = FemConversionSettings {
        voxel_resolution: 10,
        interior_point_density: 0.3,
        seed: 7,
        ..FemConversionSettings::default()
    };

    let geom = MeshToFemConverter::new(settings)
        .convert_flat(&vertices, &indices)
        .unwrap();
    let stats = geom.statistics();
    let exact_volume = 4.0 / 3.0;

    // The original vertices are part of the nodes, and every voxel node is at most half a
    // voxel diagonal away from the octahedron.
    assert!(stats.total_volume > exact_volume * 0.95, "{}", stats.total_volume);
    assert!(stats.total_volume < exact_volume * 2.0, "{}", stats.total_volume);

    for vid in 0..vertices.len() {
        let node = &geom.nodes()[geom.surface_vertex_map()[vid] as usize];
        assert!(node.is_surface);
        assert!(na::distance_squared(&node.position, &vertices[vid]) < 1.0e-3);
    }
}
