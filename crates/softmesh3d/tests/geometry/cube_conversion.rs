use super::{convert_unit_cube, cube_settings};
use softmesh3d::fem::FemConversionSettings;
use softmesh3d::shape::{Tetrahedron, MIN_TETRAHEDRON_VOLUME};
use softmesh3d::transformation::TetrahedralizationMethod;

#[test]
fn unit_cube_volume_and_mass() {
    let geom = convert_unit_cube(cube_settings());
    let stats = geom.statistics();

    assert!(stats.tetrahedron_count > 0);
    assert!(stats.surface_triangle_count > 0);
    assert!((stats.total_volume - 1.0).abs() < 0.2, "{}", stats.total_volume);
    assert!((stats.total_mass - 1000.0).abs() < 200.0, "{}", stats.total_mass);

    for node in geom.nodes() {
        assert!(node.position.iter().all(|e| e.is_finite()));
        assert!(node.mass.is_finite() && node.mass > 0.0);
    }
}

#[test]
fn unit_cube_elements_are_valid() {
    for method in [
        TetrahedralizationMethod::Delaunay,
        TetrahedralizationMethod::FanInsertion,
    ] {
        let geom = convert_unit_cube(FemConversionSettings {
            tetrahedralization: method,
            ..cube_settings()
        });

        for (i, tet) in geom.tetrahedra().iter().enumerate() {
            let pts = geom.tetrahedron_positions(i).unwrap();
            let shape = Tetrahedron::from(pts);

            assert!(tet.volume > MIN_TETRAHEDRON_VOLUME);
            assert_relative_eq!(tet.volume, shape.volume(), epsilon = 1.0e-6);
            assert!(tet.inv_rest_matrix.iter().all(|e| e.is_finite()));
        }

        for tri in geom.surface_triangles() {
            assert!(tri.area > 0.0);
            assert_relative_eq!(tri.normal.norm(), 1.0, epsilon = 1.0e-5);
        }
    }
}

#[test]
fn unit_cube_nodes() {
    let geom = convert_unit_cube(cube_settings());
    let stats = geom.statistics();

    // All voxels are occupied and sampled, plus the 8 corners of the cube.
    assert_eq!(stats.node_count, 8 * 8 * 8 + 8);
    assert_eq!(stats.surface_node_count + stats.interior_node_count, stats.node_count);
    assert!(stats.interior_node_count > 0);
    assert!(stats.aabb.maxs.iter().all(|e| *e > 0.5 && *e < 0.6));
    assert!(stats.aabb.mins.iter().all(|e| *e < -0.5 && *e > -0.6));
}
