use super::assert_valid_mesh;
use softmesh3d::fem::{FemConversionSettings, MassDistribution, MeshToFemConverter};
use softmesh3d::math::Real;
use softmesh3d::na::RealField;
use softmesh3d::transformation::to_trimesh::ball;

#[test]
fn sphere_conversion_is_valid() {
    let (vertices, indices) = ball(1.0, 24, 12);
    let settings = FemConversionSettings {
        voxel_resolution: 20,
        interior_point_density: 1.0,
        mass_distribution: MassDistribution::VolumeWeighted,
        density: 1000.0,
        ..FemConversionSettings::default()
    };
    let geom = MeshToFemConverter::new(settings)
        .convert(&vertices, &indices)
        .unwrap();

    assert_valid_mesh(&geom);

    let ball_volume = |r: Real| 4.0 / 3.0 * Real::pi() * r * r * r;
    let stats = geom.statistics();

    // The convex hull of the nodes lies in the ball reaching the farthest node.
    let max_radius = geom
        .nodes()
        .iter()
        .map(|node| node.position.coords.norm())
        .fold(0.0, Real::max);
    assert!(stats.total_volume <= ball_volume(max_radius) * 1.0001);

    let exact = ball_volume(1.0);
    assert!(
        stats.total_volume > exact * 0.8 && stats.total_volume < exact * 1.2,
        "{}",
        stats.total_volume
    );
    assert_relative_eq!(stats.total_mass, stats.total_volume * 1000.0, max_relative = 1.0e-2);
}
