use super::{tetrahedron, Tetrahedralizer};
use crate::fem::FemNode;
use crate::math::{Point, Real};
use crate::utils::hashmap::{Entry, HashMap};
use na::{Point3, Vector3};

/// Number of bits of the integer grid the nodes are snapped to.
const COORDINATE_BITS: f64 = 16.0;
/// Distance of the super-tetrahedron vertices to the center of the nodes, relative to
/// their largest extent.
const SUPER_TETRAHEDRON_SCALE: i64 = 20;
/// Missing neighbor.
const NONE: u32 = u32::MAX;

/// A Bowyer-Watson Delaunay tetrahedralizer.
///
/// Nodes are inserted one at a time, in index order, inside of a super-tetrahedron
/// enclosing all of them. The cell containing the inserted node is found by walking
/// through face neighbors. The cavity is then grown from that cell through the neighbors
/// whose circumsphere contains the node, and re-tetrahedralized by connecting its boundary
/// faces to the node. Tetrahedra touching the super-tetrahedron and degenerate tetrahedra
/// are removed at the end so the output covers the convex hull of the nodes.
///
/// All the predicates are evaluated exactly, on integer coordinates. The nodes are snapped to
/// a power-of-two subdivision of a lattice (see [`Self::with_lattice`]) so nodes lying on
/// that lattice keep their exact coplanarities. Co-spherical ties are broken by giving each
/// node an infinitesimal weight, making the output a regular triangulation without flat
/// cells. Node positions are not altered.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DelaunayTetrahedralizer {
    lattice: Option<(Point<Real>, Real)>,
}

impl DelaunayTetrahedralizer {
    /// A tetrahedralizer snapping the nodes relative to the world unit length.
    pub fn new() -> Self {
        Self::default()
    }

    /// A tetrahedralizer snapping the nodes relative to the lattice `origin + spacing * (i, j, k)`.
    ///
    /// Nodes sampled on that lattice (e.g. voxel centers) are represented exactly.
    pub fn with_lattice(origin: Point<Real>, spacing: Real) -> Self {
        Self {
            lattice: Some((origin, spacing)),
        }
    }

    /// Snaps the nodes to integer coordinates in `[0, 2^16]`.
    fn snap(&self, nodes: &[FemNode]) -> Vec<[i64; 3]> {
        let (origin, spacing) = match self.lattice {
            Some((origin, spacing)) if spacing > 0.0 && spacing.is_finite() => {
                (origin.cast::<f64>(), spacing as f64)
            }
            _ => (Point3::origin(), 1.0),
        };

        let local: Vec<Vector3<f64>> = nodes
            .iter()
            .map(|n| (n.position.cast::<f64>() - origin) / spacing)
            .collect();

        let mut mins = local[0];
        let mut maxs = local[0];

        for pt in &local[1..] {
            mins = mins.inf(pt);
            maxs = maxs.sup(pt);
        }

        // Integer shifts and power-of-two steps keep lattice points on the grid.
        let shift = mins.map(f64::floor);
        let extent = (maxs - shift).max();
        let step = if extent > 0.0 && extent.is_finite() {
            (extent.log2().ceil() - COORDINATE_BITS).exp2()
        } else {
            1.0
        };

        local
            .iter()
            .map(|pt| {
                let q = (pt - shift) / step;
                [q.x.round() as i64, q.y.round() as i64, q.z.round() as i64]
            })
            .collect()
    }
}

impl Tetrahedralizer for DelaunayTetrahedralizer {
    fn tetrahedralize(&self, nodes: &[FemNode]) -> Vec<[u32; 4]> {
        if nodes.len() < 4 {
            log::warn!(
                "Cannot tetrahedralize {} nodes: at least 4 are needed.",
                nodes.len()
            );
            return Vec::new();
        }

        let num_nodes = nodes.len() as u32;
        let mut triangulation = Triangulation::new(self.snap(nodes));
        let mut num_redundant = 0;
        let mut num_rejected = 0;

        for id in 0..num_nodes {
            match triangulation.insert(id) {
                Insertion::Inserted => {}
                Insertion::Redundant => num_redundant += 1,
                Insertion::Rejected => num_rejected += 1,
            }
        }

        if num_redundant > 0 {
            log::debug!(
                "{} duplicate nodes were not inserted in the Delaunay tetrahedralization.",
                num_redundant
            );
        }

        if num_rejected > 0 {
            log::warn!(
                "{} nodes with a non star-shaped cavity were not inserted in the Delaunay tetrahedralization.",
                num_rejected
            );
        }

        let num_cells = triangulation.cells.len();
        let result: Vec<_> = triangulation
            .cells
            .into_iter()
            .filter(|cell| cell.alive)
            .map(|cell| cell.vertices)
            .filter(|tet| tet.iter().all(|id| *id < num_nodes))
            .filter(|tet| tetrahedron(nodes, *tet).is_non_degenerate())
            .collect();

        log::debug!(
            "Delaunay tetrahedralization: {} cells created, {} kept.",
            num_cells,
            result.len()
        );

        result
    }
}

enum Insertion {
    Inserted,
    Redundant,
    Rejected,
}

/// A positively oriented tetrahedron with its face neighbors.
///
/// `neighbors[i]` is the cell sharing the face opposite to `vertices[i]`.
struct Cell {
    vertices: [u32; 4],
    neighbors: [u32; 4],
    alive: bool,
}

/// A triangulation of integer points, the four last ones being the super-tetrahedron.
struct Triangulation {
    points: Vec<[i64; 3]>,
    weights: Vec<i64>,
    cells: Vec<Cell>,
    last_cell: u32,
    // Per-cell scratch: the last insertion that tested the cell, and the outcome.
    stamps: Vec<u32>,
    in_cavity: Vec<bool>,
    cavity: Vec<u32>,
    boundary: Vec<(u32, usize, u32)>,
    open_edges: HashMap<(u32, u32), (u32, usize)>,
}

impl Triangulation {
    fn new(mut points: Vec<[i64; 3]>) -> Self {
        let num_nodes = points.len() as u32;
        let mut mins = points[0];
        let mut maxs = points[0];

        for pt in &points {
            for k in 0..3 {
                mins[k] = mins[k].min(pt[k]);
                maxs[k] = maxs[k].max(pt[k]);
            }
        }

        let center = [0, 1, 2].map(|k| (mins[k] + maxs[k]) / 2);
        let extent = (0..3).map(|k| maxs[k] - mins[k]).max().unwrap_or(0).max(1);
        let scale = extent * SUPER_TETRAHEDRON_SCALE;

        for dir in [[1, 1, 1], [1, -1, -1], [-1, 1, -1], [-1, -1, 1]] {
            points.push([0, 1, 2].map(|k| center[k] + dir[k] * scale));
        }

        let weights = (0..points.len() as u64).map(tie_breaking_weight).collect();

        let mut triangulation = Self {
            points,
            weights,
            cells: Vec::new(),
            last_cell: 0,
            stamps: Vec::new(),
            in_cavity: Vec::new(),
            cavity: Vec::new(),
            boundary: Vec::new(),
            open_edges: HashMap::default(),
        };

        let mut root = [num_nodes, num_nodes + 1, num_nodes + 2, num_nodes + 3];
        if triangulation.orientation(root) < 0 {
            root.swap(2, 3);
        }
        let _ = triangulation.push_cell(root, [NONE; 4]);
        triangulation
    }

    fn push_cell(&mut self, vertices: [u32; 4], neighbors: [u32; 4]) -> u32 {
        self.cells.push(Cell {
            vertices,
            neighbors,
            alive: true,
        });
        self.stamps.push(NONE);
        self.in_cavity.push(false);
        self.cells.len() as u32 - 1
    }

    fn diff(&self, a: u32, b: u32) -> [i128; 3] {
        let (a, b) = (self.points[a as usize], self.points[b as usize]);
        [0, 1, 2].map(|k| (a[k] - b[k]) as i128)
    }

    /// Six times the signed volume of the tetrahedron.
    fn orientation(&self, tet: [u32; 4]) -> i128 {
        det3(
            self.diff(tet[1], tet[0]),
            self.diff(tet[2], tet[0]),
            self.diff(tet[3], tet[0]),
        )
    }

    /// The orientation of `tet` after replacing its `i`-th vertex by `p`.
    fn orientation_with(&self, mut tet: [u32; 4], i: usize, p: u32) -> i128 {
        tet[i] = p;
        self.orientation(tet)
    }

    /// Is `p` strictly inside of the orthosphere of the positively oriented `tet`?
    ///
    /// This is the sign of the lifted 4x4 determinant, expanded along the lifted column.
    /// Exact ties are decided by the infinitesimal weights of the points.
    fn conflicts(&self, tet: [u32; 4], p: u32) -> bool {
        let rows = tet.map(|v| self.diff(v, p));
        let minors = [
            det3(rows[1], rows[2], rows[3]),
            det3(rows[0], rows[2], rows[3]),
            det3(rows[0], rows[1], rows[3]),
            det3(rows[0], rows[1], rows[2]),
        ];
        let signs = [-1, 1, -1, 1];

        let lifted: i128 = (0..4)
            .map(|i| {
                let r = rows[i];
                signs[i] * (r[0] * r[0] + r[1] * r[1] + r[2] * r[2]) * minors[i]
            })
            .sum();

        if lifted != 0 {
            return lifted < 0;
        }

        let wp = self.weights[p as usize] as i128;
        let weighted: i128 = (0..4)
            .map(|i| signs[i] * (wp - self.weights[tet[i] as usize] as i128) * minors[i])
            .sum();

        weighted < 0
    }

    /// Finds a live cell containing `p` (boundary included), walking from the last created cell.
    fn locate(&self, p: u32) -> Option<u32> {
        let mut curr = self.last_cell;

        for _ in 0..self.cells.len() {
            let cell = &self.cells[curr as usize];

            match (0..4).find(|i| self.orientation_with(cell.vertices, *i, p) < 0) {
                None => return Some(curr),
                Some(i) if cell.neighbors[i] != NONE => curr = cell.neighbors[i],
                Some(_) => return None,
            }
        }

        self.cells
            .iter()
            .position(|cell| {
                cell.alive && (0..4).all(|i| self.orientation_with(cell.vertices, i, p) >= 0)
            })
            .map(|id| id as u32)
    }

    fn insert(&mut self, p: u32) -> Insertion {
        let Some(start) = self.locate(p) else {
            return Insertion::Rejected;
        };

        if !self.conflicts(self.cells[start as usize].vertices, p) {
            return Insertion::Redundant;
        }

        self.collect_cavity(start, p);

        let star_shaped = self.boundary.iter().all(|(cell, i, _)| {
            self.orientation_with(self.cells[*cell as usize].vertices, *i, p) > 0
        });

        if !star_shaped {
            return Insertion::Rejected;
        }

        self.fill_cavity(p);
        Insertion::Inserted
    }

    /// Grows the cavity of `p` through face adjacency from the conflicting cell `start`.
    fn collect_cavity(&mut self, start: u32, p: u32) {
        self.cavity.clear();
        self.boundary.clear();
        self.stamps[start as usize] = p;
        self.in_cavity[start as usize] = true;
        self.cavity.push(start);

        let mut curr = 0;

        while curr < self.cavity.len() {
            let cell = self.cavity[curr];
            curr += 1;

            for i in 0..4 {
                let neighbor = self.cells[cell as usize].neighbors[i];

                if neighbor == NONE {
                    self.boundary.push((cell, i, neighbor));
                    continue;
                }

                let nid = neighbor as usize;

                if self.stamps[nid] != p {
                    self.stamps[nid] = p;
                    self.in_cavity[nid] = self.conflicts(self.cells[nid].vertices, p);

                    if self.in_cavity[nid] {
                        self.cavity.push(neighbor);
                    }
                }

                if !self.in_cavity[nid] {
                    self.boundary.push((cell, i, neighbor));
                }
            }
        }
    }

    /// Replaces the cavity by the cells joining its boundary faces to `p`.
    fn fill_cavity(&mut self, p: u32) {
        self.open_edges.clear();

        for face in 0..self.boundary.len() {
            let (old, i, outside) = self.boundary[face];
            let mut vertices = self.cells[old as usize].vertices;
            vertices[i] = p;

            let mut neighbors = [NONE; 4];
            neighbors[i] = outside;
            let id = self.push_cell(vertices, neighbors);

            if outside != NONE {
                if let Some(back) = self.cells[outside as usize]
                    .neighbors
                    .iter_mut()
                    .find(|n| **n == old)
                {
                    *back = id;
                }
            }

            // The other faces contain `p` and are shared with another new cell.
            for k in (0..4).filter(|k| *k != i) {
                let [a, b] = remaining_pair(i, k).map(|m| vertices[m]);
                let key = (a.min(b), a.max(b));

                match self.open_edges.entry(key) {
                    Entry::Occupied(e) => {
                        let (other, other_k) = e.remove();
                        self.cells[id as usize].neighbors[k] = other;
                        self.cells[other as usize].neighbors[other_k] = id;
                    }
                    Entry::Vacant(e) => {
                        let _ = e.insert((id, k));
                    }
                }
            }
        }

        for cell in &self.cavity {
            self.cells[*cell as usize].alive = false;
        }

        self.last_cell = self.cells.len() as u32 - 1;
    }
}

#[inline]
fn det3(a: [i128; 3], b: [i128; 3], c: [i128; 3]) -> i128 {
    a[0] * (b[1] * c[2] - b[2] * c[1]) - a[1] * (b[0] * c[2] - b[2] * c[0])
        + a[2] * (b[0] * c[1] - b[1] * c[0])
}

/// The two vertex slots of a tetrahedron other than `i` and `k`.
fn remaining_pair(i: usize, k: usize) -> [usize; 2] {
    let mut pair = [0; 2];
    let mut len = 0;

    for m in 0..4 {
        if m != i && m != k && len < 2 {
            pair[len] = m;
            len += 1;
        }
    }

    pair
}

/// A deterministic pseudo-random weight in `[0, 2^31)` (splitmix64 finalizer).
fn tie_breaking_weight(i: u64) -> i64 {
    let mut z = i.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    ((z ^ (z >> 31)) >> 33) as i64
}
