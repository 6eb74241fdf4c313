use crate::fem::{FemNode, FemSurfaceTriangle};
use crate::shape::{Tetrahedron, Triangle};
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::SortedTriple;

/// A face belonging to exactly one tetrahedron.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoundaryFace {
    /// The face vertices, in the order they appear in the owning tetrahedron.
    pub nodes: [u32; 3],
    /// The index of the tetrahedron owning this face.
    pub tetrahedron: u32,
    /// The vertex of the owning tetrahedron that is not part of this face.
    pub opposite_node: u32,
}

/// The boundary of a set of tetrahedra.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SurfaceExtraction {
    /// The boundary faces, sorted by first appearance in the tetrahedra list.
    pub faces: Vec<BoundaryFace>,
    /// The number of faces shared by more than two tetrahedra.
    ///
    /// This is always zero for a valid tetrahedralization. These faces are not part of
    /// [`Self::faces`].
    pub num_non_manifold_faces: usize,
}

struct FaceSlot {
    face: BoundaryFace,
    count: u32,
}

/// Extracts the faces belonging to exactly one of the given tetrahedra.
///
/// The face `i` of a tetrahedron `[a, b, c, d]` follows [`Tetrahedron::face_ids`]:
/// `(a, b, c)`, `(a, b, d)`, `(a, c, d)` then `(b, c, d)`. Faces are identified regardless
/// of their vertex order, and each boundary face keeps the vertex order it had the first time
/// it was seen.
pub fn extract_surface(tetrahedra: &[[u32; 4]]) -> SurfaceExtraction {
    let mut slots: Vec<FaceSlot> = Vec::new();
    let mut slot_ids: HashMap<SortedTriple<u32>, usize> = HashMap::default();

    for (tet_id, tet) in tetrahedra.iter().enumerate() {
        for i in 0..4 {
            let (i0, i1, i2) = Tetrahedron::face_ids(i);
            let nodes = [tet[i0 as usize], tet[i1 as usize], tet[i2 as usize]];

            match slot_ids.entry(SortedTriple::new(nodes[0], nodes[1], nodes[2])) {
                Entry::Occupied(e) => slots[*e.get()].count += 1,
                Entry::Vacant(e) => {
                    let _ = e.insert(slots.len());
                    slots.push(FaceSlot {
                        face: BoundaryFace {
                            nodes,
                            tetrahedron: tet_id as u32,
                            opposite_node: tet[3 - i as usize],
                        },
                        count: 1,
                    });
                }
            }
        }
    }

    let num_non_manifold_faces = slots.iter().filter(|slot| slot.count > 2).count();

    if num_non_manifold_faces > 0 {
        log::warn!(
            "{} faces are shared by more than two tetrahedra and were excluded from the surface.",
            num_non_manifold_faces
        );
    }

    SurfaceExtraction {
        faces: slots
            .into_iter()
            .filter(|slot| slot.count == 1)
            .map(|slot| slot.face)
            .collect(),
        num_non_manifold_faces,
    }
}

impl SurfaceExtraction {
    /// Computes the normal and area of each boundary face from the node positions.
    ///
    /// Faces are re-oriented so their normal points away from the owning tetrahedron.
    /// Zero-area faces have no normal and are skipped.
    pub fn to_surface_triangles(&self, nodes: &[FemNode]) -> Vec<FemSurfaceTriangle> {
        self.faces
            .iter()
            .filter_map(|face| {
                let mut ids = face.nodes;
                let mut tri = Triangle::from(ids.map(|id| nodes[id as usize].position));
                let opposite = nodes[face.opposite_node as usize].position;

                if tri.scaled_normal().dot(&(opposite - tri.a)) > 0.0 {
                    ids.swap(1, 2);
                    core::mem::swap(&mut tri.b, &mut tri.c);
                }

                let normal = tri.normal()?;

                Some(FemSurfaceTriangle {
                    nodes: ids,
                    normal,
                    area: tri.area(),
                    neighbor_tetrahedra: [Some(face.tetrahedron), None],
                })
            })
            .collect()
    }
}
