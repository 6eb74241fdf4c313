use super::FemNode;
use crate::math::{Point, Real};
use crate::utils::hashmap::HashMap;

/// Input vertices closer than this squared distance to an existing node are not duplicated.
pub const MERGE_DISTANCE_SQUARED: Real = 1.0e-3;

/// A uniform spatial hash of node indices with cells of edge `sqrt(MERGE_DISTANCE_SQUARED)`.
///
/// Any node closer than the merge distance to a point lies in one of the 27 cells around
/// the cell of the point.
struct NodeHash {
    inv_cell_size: Real,
    cells: HashMap<[i64; 3], Vec<u32>>,
}

impl NodeHash {
    fn new() -> Self {
        Self {
            inv_cell_size: 1.0 / MERGE_DISTANCE_SQUARED.sqrt(),
            cells: HashMap::default(),
        }
    }

    fn key(&self, pt: &Point<Real>) -> [i64; 3] {
        let scaled = pt.coords * self.inv_cell_size;
        [
            scaled.x.floor() as i64,
            scaled.y.floor() as i64,
            scaled.z.floor() as i64,
        ]
    }

    fn insert(&mut self, pt: &Point<Real>, id: u32) {
        let key = self.key(pt);
        self.cells.entry(key).or_default().push(id);
    }

    /// The smallest index of the nodes closer than the merge distance to `pt`.
    fn find(&self, nodes: &[FemNode], pt: &Point<Real>) -> Option<u32> {
        let [i, j, k] = self.key(pt);
        let mut best: Option<u32> = None;

        for di in -1..=1 {
            for dj in -1..=1 {
                for dk in -1..=1 {
                    let key = [
                        i.saturating_add(di),
                        j.saturating_add(dj),
                        k.saturating_add(dk),
                    ];

                    for id in self.cells.get(&key).into_iter().flatten() {
                        let dist = na::distance_squared(&nodes[*id as usize].position, pt);

                        if dist < MERGE_DISTANCE_SQUARED && best.map_or(true, |b| *id < b) {
                            best = Some(*id);
                        }
                    }
                }
            }
        }

        best
    }
}

/// Makes sure every input vertex is represented by a node.
///
/// Each vertex farther than the merge distance from all nodes (including the vertices
/// appended before it) is appended as a surface node. Nodes matched by a vertex get that
/// vertex as back-reference unless they already have one.
///
/// Returns, for each vertex, the index of the node representing it.
pub fn merge_original_vertices(nodes: &mut Vec<FemNode>, vertices: &[Point<Real>]) -> Vec<u32> {
    let mut hash = NodeHash::new();

    for (id, node) in nodes.iter().enumerate() {
        hash.insert(&node.position, id as u32);
    }

    let mut vertex_map = Vec::with_capacity(vertices.len());
    let num_voxel_nodes = nodes.len();

    for (vid, vertex) in vertices.iter().enumerate() {
        let node_id = match hash.find(nodes, vertex) {
            Some(id) => {
                let node = &mut nodes[id as usize];
                if node.original_vertex.is_none() {
                    node.original_vertex = Some(vid as u32);
                }
                id
            }
            None => {
                let id = nodes.len() as u32;
                nodes.push(FemNode::from_original_vertex(*vertex, vid as u32));
                hash.insert(vertex, id);
                id
            }
        };

        vertex_map.push(node_id);
    }

    log::debug!(
        "{} input vertices appended to the {} voxel nodes.",
        nodes.len() - num_voxel_nodes,
        num_voxel_nodes
    );

    vertex_map
}
