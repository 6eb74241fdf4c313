use super::{convert_unit_cube, cube_settings};
use softmesh3d::fem::FemConversionSettings;
use softmesh3d::transformation::TetrahedralizationMethod;

fn sparse_settings(seed: u64) -> FemConversionSettings {
    FemConversionSettings {
        interior_point_density: 0.5,
        seed,
        ..cube_settings()
    }
}

#[test]
fn same_seed_same_geometry() {
    for method in [
        TetrahedralizationMethod::Delaunay,
        TetrahedralizationMethod::FanInsertion,
    ] {
        let settings = FemConversionSettings {
            tetrahedralization: method,
            ..sparse_settings(42)
        };
        assert_eq!(convert_unit_cube(settings), convert_unit_cube(settings));
    }
}

#[test]
fn seed_drives_interior_sampling() {
    let geom1 = convert_unit_cube(sparse_settings(1));
    let geom2 = convert_unit_cube(sparse_settings(2));
    let positions = |geom: &softmesh3d::fem::FemGeometry| {
        geom.nodes().iter().map(|n| n.position).collect::<Vec<_>>()
    };

    assert_ne!(positions(&geom1), positions(&geom2));
    // Surface voxels are always sampled.
    assert_eq!(
        geom1.statistics().surface_node_count,
        geom2.statistics().surface_node_count
    );
}
