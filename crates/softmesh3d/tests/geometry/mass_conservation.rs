use super::{convert_unit_cube, cube_settings};
use softmesh3d::fem::{FemConversionSettings, MassDistribution, MIN_NODE_MASS};
use softmesh3d::math::Real;

#[test]
fn volume_weighted_mass_is_conserved() {
    let geom = convert_unit_cube(cube_settings());
    let elements_mass: Real = geom.tetrahedra().iter().map(|t| t.volume * t.density).sum();

    let mut used = vec![false; geom.nodes().len()];
    for tet in geom.tetrahedra() {
        for id in tet.nodes {
            used[id as usize] = true;
        }
    }

    // Nodes outside of all the elements only get the minimal mass.
    let num_unused = used.iter().filter(|u| !**u).count();
    let expected = elements_mass + num_unused as Real * MIN_NODE_MASS;
    assert_relative_eq!(geom.statistics().total_mass, expected, max_relative = 1.0e-3);

    for (node, used) in geom.nodes().iter().zip(used.iter()) {
        assert!(node.mass >= MIN_NODE_MASS);
        if !used {
            assert_eq!(node.mass, MIN_NODE_MASS);
        }
    }
}

#[test]
fn surface_weighted_mass_is_conserved() {
    let geom = convert_unit_cube(FemConversionSettings {
        mass_distribution: MassDistribution::SurfaceWeighted,
        ..cube_settings()
    });
    let stats = geom.statistics();
    let elements_mass = stats.total_volume * 1000.0;

    // Interior nodes only get the minimal mass.
    let extra = stats.interior_node_count as Real * MIN_NODE_MASS;
    assert!(stats.total_mass >= elements_mass);
    assert!(stats.total_mass <= elements_mass * 1.001 + extra);

    for node in geom.nodes().iter().filter(|n| !n.is_surface) {
        assert_eq!(node.mass, MIN_NODE_MASS);
    }
}

#[test]
fn uniform_mass() {
    let geom = convert_unit_cube(FemConversionSettings {
        mass_distribution: MassDistribution::Uniform,
        ..cube_settings()
    });
    let stats = geom.statistics();

    assert_relative_eq!(stats.total_mass, stats.node_count as Real);
    assert_relative_eq!(stats.average_node_mass, 1.0);
}
