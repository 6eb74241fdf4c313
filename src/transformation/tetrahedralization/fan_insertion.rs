use super::{tetrahedron, Tetrahedralizer};
use crate::fem::FemNode;
use arrayvec::ArrayVec;

/// The maximum number of nodes used to build the initial fan.
const MAX_HULL_SEEDS: usize = 12;

/// A fast, approximate tetrahedralizer.
///
/// A handful of hull seeds (the six axis-extremal nodes completed with surface nodes) is
/// fan-triangulated around the first seed. Every other node is then inserted, in index order,
/// by splitting the first tetrahedron containing it into four. Nodes not contained by any
/// tetrahedron are dropped.
///
/// The output covers at most the hull of the seeds so it usually underestimates the volume of
/// the node cloud. See [`DelaunayTetrahedralizer`](super::DelaunayTetrahedralizer) for a
/// tetrahedralization of the whole convex hull.
#[derive(Copy, Clone, Debug, Default)]
pub struct FanInsertionTetrahedralizer;

impl Tetrahedralizer for FanInsertionTetrahedralizer {
    fn tetrahedralize(&self, nodes: &[FemNode]) -> Vec<[u32; 4]> {
        if nodes.len() < 4 {
            log::warn!(
                "Cannot tetrahedralize {} nodes: at least 4 are needed.",
                nodes.len()
            );
            return Vec::new();
        }

        let seeds = hull_seeds(nodes);
        let mut tetrahedra = fan(nodes, &seeds);
        let mut num_dropped = 0;

        for id in 0..nodes.len() as u32 {
            if seeds.contains(&id) {
                continue;
            }

            if !insert(nodes, id, &mut tetrahedra) {
                num_dropped += 1;
            }
        }

        if num_dropped > 0 {
            log::debug!(
                "{} nodes were outside of the seed hull and have been dropped.",
                num_dropped
            );
        }

        tetrahedra
    }
}

fn hull_seeds(nodes: &[FemNode]) -> ArrayVec<u32, MAX_HULL_SEEDS> {
    // min x, max x, min y, max y, min z, max z
    let mut extremal = [0usize; 6];

    for (i, node) in nodes.iter().enumerate().skip(1) {
        for dim in 0..3 {
            let coord = node.position[dim];

            if coord < nodes[extremal[dim * 2]].position[dim] {
                extremal[dim * 2] = i;
            }

            if coord > nodes[extremal[dim * 2 + 1]].position[dim] {
                extremal[dim * 2 + 1] = i;
            }
        }
    }

    let mut seeds = ArrayVec::new();

    for id in extremal {
        let id = id as u32;
        if !seeds.contains(&id) {
            seeds.push(id);
        }
    }

    for (id, node) in nodes.iter().enumerate() {
        if seeds.is_full() {
            break;
        }

        let id = id as u32;
        if node.is_surface && !seeds.contains(&id) {
            seeds.push(id);
        }
    }

    seeds
}

fn fan(nodes: &[FemNode], seeds: &[u32]) -> Vec<[u32; 4]> {
    let mut tetrahedra = Vec::new();

    if seeds.len() < 4 {
        return tetrahedra;
    }

    let apex = seeds[0];

    for i in 1..seeds.len() - 2 {
        for j in i + 1..seeds.len() - 1 {
            for k in j + 1..seeds.len() {
                let tet = [apex, seeds[i], seeds[j], seeds[k]];

                if tetrahedron(nodes, tet).is_non_degenerate() {
                    tetrahedra.push(tet);
                }
            }
        }
    }

    tetrahedra
}

/// Splits the first tetrahedron containing the node `id`.
///
/// Returns `false` if no tetrahedron contains the node.
fn insert(nodes: &[FemNode], id: u32, tetrahedra: &mut Vec<[u32; 4]>) -> bool {
    let pt = nodes[id as usize].position;
    let Some(i) = tetrahedra
        .iter()
        .position(|tet| tetrahedron(nodes, *tet).contains_local_point(&pt))
    else {
        return false;
    };

    let [a, b, c, d] = tetrahedra.remove(i);

    for tet in [[id, a, b, c], [id, a, b, d], [id, a, c, d], [id, b, c, d]] {
        if tetrahedron(nodes, tet).is_non_degenerate() {
            tetrahedra.push(tet);
        }
    }

    true
}
