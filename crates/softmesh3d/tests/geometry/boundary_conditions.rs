use super::{convert_unit_cube, cube_settings};
use softmesh3d::fem::FemConversionSettings;

#[test]
fn bottom_nodes_are_fixed() {
    let threshold = 0.1;
    let geom = convert_unit_cube(FemConversionSettings {
        fix_boundary_nodes: true,
        boundary_fix_threshold: threshold,
        ..cube_settings()
    });
    let stats = geom.statistics();
    let limit = stats.aabb.mins.y + threshold;

    for node in geom.nodes() {
        assert_eq!(node.is_fixed, node.position.y < limit);
    }

    // The bottom voxel layer and the bottom corners of the cube.
    assert_eq!(stats.fixed_node_count, 8 * 8 + 4);
}

#[test]
fn nothing_is_fixed_by_default() {
    let geom = convert_unit_cube(cube_settings());
    assert_eq!(geom.statistics().fixed_node_count, 0);
    assert!(geom.nodes().iter().all(|n| !n.is_fixed));
}
