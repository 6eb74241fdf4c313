use super::assert_valid_mesh;
use softmesh3d::fem::{FemConversionSettings, MassDistribution, MeshToFemConverter};
use softmesh3d::math::{Real, Vector};
use softmesh3d::na::UnitQuaternion;
use softmesh3d::transformation::to_trimesh::cuboid;

#[test]
fn rotated_and_translated_cube_conversion_is_valid() {
    let rotation = UnitQuaternion::from_euler_angles(0.3, 0.5, 0.7);
    let shift = Vector::new(1.5, -2.0, 0.75);
    let (cube, indices) = cuboid(Vector::repeat(0.5));
    let vertices: Vec<_> = cube.iter().map(|pt| rotation * pt + shift).collect();

    let settings = FemConversionSettings {
        voxel_resolution: 32,
        interior_point_density: 1.0,
        mass_distribution: MassDistribution::VolumeWeighted,
        density: 1000.0,
        ..FemConversionSettings::default()
    };
    let geom = MeshToFemConverter::new(settings)
        .convert(&vertices, &indices)
        .unwrap();

    assert_valid_mesh(&geom);

    // The convex hull of the nodes lies in the cube, aligned with the input one, that
    // reaches the farthest node.
    let half_extent = geom
        .nodes()
        .iter()
        .map(|node| (rotation.inverse() * (node.position.coords - shift)).amax())
        .fold(0.0, Real::max);
    let stats = geom.statistics();
    assert!(stats.total_volume <= (2.0 * half_extent).powi(3) * 1.0001);

    assert!(
        stats.total_volume > 0.8 && stats.total_volume < 1.2,
        "{}",
        stats.total_volume
    );
}
