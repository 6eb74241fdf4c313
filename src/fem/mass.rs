use super::{FemNode, FemSurfaceTriangle, FemTetrahedron, MassDistribution};
use crate::math::Real;

/// The smallest mass a node can have after volume- or surface-weighted mass distribution.
pub const MIN_NODE_MASS: Real = 0.001;

/// Assigns a mass to every node.
///
/// Returns the total mass distributed to the nodes before the node masses are clamped to
/// [`MIN_NODE_MASS`]. For [`MassDistribution::VolumeWeighted`] and
/// [`MassDistribution::SurfaceWeighted`] this is the sum of the tetrahedra masses.
pub fn distribute_mass(
    nodes: &mut [FemNode],
    tetrahedra: &[FemTetrahedron],
    surface: &[FemSurfaceTriangle],
    mode: MassDistribution,
) -> Real {
    match mode {
        MassDistribution::Uniform => {
            for node in nodes.iter_mut() {
                node.mass = 1.0;
            }

            nodes.len() as Real
        }
        MassDistribution::VolumeWeighted => volume_weighted(nodes, tetrahedra),
        MassDistribution::SurfaceWeighted => {
            let total_area: Real = surface.iter().map(|tri| tri.area).sum();

            if total_area > 0.0 {
                surface_weighted(nodes, tetrahedra, surface, total_area)
            } else {
                log::debug!("No surface to distribute the mass on, using the element volumes.");
                volume_weighted(nodes, tetrahedra)
            }
        }
    }
}

fn volume_weighted(nodes: &mut [FemNode], tetrahedra: &[FemTetrahedron]) -> Real {
    let mut masses = vec![0.0; nodes.len()];

    for tet in tetrahedra {
        let node_mass = tet.mass() / 4.0;

        for id in tet.nodes {
            masses[id as usize] += node_mass;
        }
    }

    assign_clamped(nodes, &masses)
}

fn surface_weighted(
    nodes: &mut [FemNode],
    tetrahedra: &[FemTetrahedron],
    surface: &[FemSurfaceTriangle],
    total_area: Real,
) -> Real {
    let total_mass: Real = tetrahedra.iter().map(|tet| tet.mass()).sum();
    let mut masses = vec![0.0; nodes.len()];

    for tri in surface {
        let node_mass = total_mass * tri.area / (3.0 * total_area);

        for id in tri.nodes {
            masses[id as usize] += node_mass;
        }
    }

    assign_clamped(nodes, &masses)
}

fn assign_clamped(nodes: &mut [FemNode], masses: &[Real]) -> Real {
    let mut total = 0.0;

    for (node, mass) in nodes.iter_mut().zip(masses.iter()) {
        total += *mass;
        node.mass = mass.max(MIN_NODE_MASS);
    }

    total
}
