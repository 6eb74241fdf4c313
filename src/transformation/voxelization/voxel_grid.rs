use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::shape::Triangle;
use rand::Rng;
use std::collections::VecDeque;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The six face-neighbors of a voxel.
const FACE_NEIGHBORS: [[i64; 3]; 6] = [
    [1, 0, 0],
    [-1, 0, 0],
    [0, 1, 0],
    [0, -1, 0],
    [0, 0, 1],
    [0, 0, -1],
];

/// Error returned when a [`VoxelGrid`] cannot be built.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum VoxelGridError {
    /// The grid resolution must be at least 1.
    #[error("the voxel grid resolution must be at least 1.")]
    ZeroResolution,
    /// The bounding box is invalid (NaN, infinite or inverted) or has a zero size.
    #[error("the voxel grid bounding box must be finite and have a non-zero size.")]
    DegenerateBounds,
}

/// The state of a single cell of a [`VoxelGrid`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VoxelValue {
    /// The voxel is empty.
    Empty,
    /// The voxel center is close to at least one rasterized triangle.
    OnSurface,
    /// The voxel is not reachable from outside of the rasterized surface.
    InsideSurface,
}

impl VoxelValue {
    /// Is this voxel part of the solid (on its surface or inside of it)?
    #[inline]
    pub fn is_occupied(self) -> bool {
        self != VoxelValue::Empty
    }
}

/// A candidate FEM node emitted by [`VoxelGrid::generate_nodes`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VoxelNode {
    /// The voxel center.
    pub position: Point<Real>,
    /// Is the voxel on the boundary of the occupied region?
    pub is_surface: bool,
}

/// A dense, cubic, `resolution³` occupancy grid.
///
/// The grid covers the cube of edge `max(aabb.extents())` anchored at `aabb.mins`.
/// Voxels are indexed by `(i, j, k)` along `(x, y, z)`.
pub struct VoxelGrid {
    aabb: Aabb,
    voxel_size: Real,
    resolution: u32,
    num_voxels_rasterized: u32,
    num_voxels_filled: u32,
    data: Vec<VoxelValue>,
}

impl VoxelGrid {
    /// Creates a new empty voxel grid covering `aabb` with `resolution` voxels along its largest side.
    pub fn new(aabb: Aabb, resolution: u32) -> Result<Self, VoxelGridError> {
        if resolution == 0 {
            return Err(VoxelGridError::ZeroResolution);
        }

        if !aabb.is_valid() {
            return Err(VoxelGridError::DegenerateBounds);
        }

        let voxel_size = aabb.max_extent() / resolution as Real;

        if !(voxel_size > 0.0) || !voxel_size.is_finite() {
            return Err(VoxelGridError::DegenerateBounds);
        }

        let len = resolution as usize * resolution as usize * resolution as usize;

        Ok(Self {
            aabb,
            voxel_size,
            resolution,
            num_voxels_rasterized: 0,
            num_voxels_filled: 0,
            data: vec![VoxelValue::Empty; len],
        })
    }

    /// The bounding box this grid was built from.
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// The number of voxels along each axis.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// The edge length of a single voxel.
    pub fn voxel_size(&self) -> Real {
        self.voxel_size
    }

    /// The number of voxels marked by triangle rasterization.
    pub fn num_voxels_rasterized(&self) -> u32 {
        self.num_voxels_rasterized
    }

    /// The number of voxels marked by the interior flood-fill.
    pub fn num_voxels_filled(&self) -> u32 {
        self.num_voxels_filled
    }

    /// The total number of occupied voxels.
    pub fn num_voxels_occupied(&self) -> u32 {
        self.num_voxels_rasterized + self.num_voxels_filled
    }

    fn voxel_index(&self, i: u32, j: u32, k: u32) -> usize {
        let res = self.resolution as usize;
        i as usize + j as usize * res + k as usize * res * res
    }

    /// The state of the voxel `(i, j, k)`.
    ///
    /// Panics if the voxel is out of range.
    pub fn voxel(&self, i: u32, j: u32, k: u32) -> VoxelValue {
        self.data[self.voxel_index(i, j, k)]
    }

    /// Is the voxel `(i, j, k)` occupied? Voxels out of range are never occupied.
    pub fn is_occupied(&self, i: i64, j: i64, k: i64) -> bool {
        self.checked_index(i, j, k)
            .is_some_and(|id| self.data[id].is_occupied())
    }

    fn checked_index(&self, i: i64, j: i64, k: i64) -> Option<usize> {
        let res = self.resolution as i64;

        if i < 0 || i >= res || j < 0 || j >= res || k < 0 || k >= res {
            None
        } else {
            Some(self.voxel_index(i as u32, j as u32, k as u32))
        }
    }

    /// The voxel containing the given point, clamped to the grid.
    pub fn world_to_voxel(&self, pt: &Point<Real>) -> Point<u32> {
        let local = (pt - self.aabb.mins) / self.voxel_size;
        let max = (self.resolution - 1) as Real;
        // NOTE: float to int casts saturate, and NaN becomes 0.
        local.map(|e| e.floor().clamp(0.0, max) as u32).into()
    }

    /// The world-space center of the voxel `(i, j, k)`.
    pub fn voxel_center(&self, i: u32, j: u32, k: u32) -> Point<Real> {
        let ijk = Vector::new(i as Real, j as Real, k as Real);
        self.aabb.mins + (ijk + Vector::repeat(0.5)) * self.voxel_size
    }

    /// Calls `f` with the linear index of every voxel whose center lies within half a
    /// voxel edge of `triangle`.
    fn for_each_voxel_near(&self, triangle: &Triangle, mut f: impl FnMut(usize)) {
        let aabb = triangle.local_aabb();
        let ijk0 = self.world_to_voxel(&aabb.mins);
        let ijk1 = self.world_to_voxel(&aabb.maxs);
        let threshold = self.voxel_size * 0.5;

        for i in ijk0.x..=ijk1.x {
            for j in ijk0.y..=ijk1.y {
                for k in ijk0.z..=ijk1.z {
                    let center = self.voxel_center(i, j, k);

                    if triangle.distance_to_local_point(&center) <= threshold {
                        f(self.voxel_index(i, j, k));
                    }
                }
            }
        }
    }

    fn mark_on_surface(&mut self, id: usize) {
        if self.data[id] == VoxelValue::Empty {
            self.data[id] = VoxelValue::OnSurface;
            self.num_voxels_rasterized += 1;
        }
    }

    /// Marks as occupied every voxel whose center is within half a voxel edge of `triangle`.
    pub fn voxelize_triangle(&mut self, triangle: &Triangle) {
        let mut hits = Vec::new();
        self.for_each_voxel_near(triangle, |id| hits.push(id));

        for id in hits {
            self.mark_on_surface(id);
        }
    }

    /// Rasterizes every triangle of the given index buffer.
    ///
    /// Panics if an index is out of bounds of `points`.
    pub fn voxelize_triangles(&mut self, points: &[Point<Real>], indices: &[[u32; 3]]) {
        let triangle = |idx: &[u32; 3]| {
            Triangle::new(
                points[idx[0] as usize],
                points[idx[1] as usize],
                points[idx[2] as usize],
            )
        };

        #[cfg(feature = "parallel")]
        {
            let hits: Vec<Vec<usize>> = indices
                .par_iter()
                .map(|idx| {
                    let mut hits = Vec::new();
                    self.for_each_voxel_near(&triangle(idx), |id| hits.push(id));
                    hits
                })
                .collect();

            for id in hits.into_iter().flatten() {
                self.mark_on_surface(id);
            }
        }

        #[cfg(not(feature = "parallel"))]
        for idx in indices {
            self.voxelize_triangle(&triangle(idx));
        }
    }

    /// Marks as occupied every empty voxel that cannot be reached from the faces of the grid.
    ///
    /// Occupied voxels act as walls for a 6-connected breadth-first traversal
    /// seeded with every empty voxel lying on one of the six faces of the grid.
    /// Voxels left unvisited are enclosed by the surface and are filled.
    pub fn flood_fill_interior(&mut self) {
        let res = self.resolution;
        let mut visited = vec![false; self.data.len()];
        let mut queue = VecDeque::new();

        for i in 0..res {
            for j in 0..res {
                for k in 0..res {
                    let on_boundary = i == 0
                        || i == res - 1
                        || j == 0
                        || j == res - 1
                        || k == 0
                        || k == res - 1;

                    if on_boundary {
                        let id = self.voxel_index(i, j, k);
                        if self.data[id] == VoxelValue::Empty {
                            visited[id] = true;
                            queue.push_back([i as i64, j as i64, k as i64]);
                        }
                    }
                }
            }
        }

        while let Some(curr) = queue.pop_front() {
            for shift in &FACE_NEIGHBORS {
                let next = [curr[0] + shift[0], curr[1] + shift[1], curr[2] + shift[2]];

                if let Some(id) = self.checked_index(next[0], next[1], next[2]) {
                    if !visited[id] && self.data[id] == VoxelValue::Empty {
                        visited[id] = true;
                        queue.push_back(next);
                    }
                }
            }
        }

        let mut num_filled = 0;

        for (value, visited) in self.data.iter_mut().zip(visited.iter()) {
            if !*visited && *value == VoxelValue::Empty {
                *value = VoxelValue::InsideSurface;
                num_filled += 1;
            }
        }

        self.num_voxels_filled += num_filled;
        log::debug!("Flood-fill marked {} interior voxels.", num_filled);
    }

    /// Is the voxel `(i, j, k)` occupied with at least one empty or out-of-range face-neighbor?
    pub fn is_surface_voxel(&self, i: u32, j: u32, k: u32) -> bool {
        let (i, j, k) = (i as i64, j as i64, k as i64);

        if !self.is_occupied(i, j, k) {
            return false;
        }

        FACE_NEIGHBORS
            .iter()
            .any(|shift| !self.is_occupied(i + shift[0], j + shift[1], k + shift[2]))
    }

    /// Is `pt` in an empty voxel whose six face-neighbors are empty too?
    ///
    /// Points outside of the grid are exterior. After [`Self::flood_fill_interior`], empty
    /// voxels are exactly the voxels reachable from outside of the surface.
    pub fn is_exterior(&self, pt: &Point<Real>) -> bool {
        let local = (pt - self.aabb.mins) / self.voxel_size;
        let [i, j, k] = [local.x, local.y, local.z].map(|e| e.floor() as i64);

        !self.is_occupied(i, j, k)
            && FACE_NEIGHBORS
                .iter()
                .all(|shift| !self.is_occupied(i + shift[0], j + shift[1], k + shift[2]))
    }

    /// Emits one candidate node per occupied voxel center.
    ///
    /// Surface voxels (see [`Self::is_surface_voxel`]) always emit a node. Interior voxels emit
    /// a node with probability `interior_density`, sampled from `rng`. Nodes are emitted in
    /// `x`-major order, then `y`, then `z`.
    pub fn generate_nodes<R: Rng + ?Sized>(
        &self,
        interior_density: Real,
        rng: &mut R,
    ) -> Vec<VoxelNode> {
        let res = self.resolution;
        let mut nodes = Vec::new();

        for i in 0..res {
            for j in 0..res {
                for k in 0..res {
                    if !self.voxel(i, j, k).is_occupied() {
                        continue;
                    }

                    let is_surface = self.is_surface_voxel(i, j, k);

                    if is_surface || rng.gen::<Real>() < interior_density {
                        nodes.push(VoxelNode {
                            position: self.voxel_center(i, j, k),
                            is_surface,
                        });
                    }
                }
            }
        }

        nodes
    }
}

#[cfg(test)]
mod test {
    use super::{VoxelGrid, VoxelGridError, VoxelValue};
    use crate::bounding_volume::Aabb;
    use crate::math::{Point, Real, Vector};
    use crate::shape::Triangle;
    use crate::transformation::to_trimesh::cuboid;
    use rand::SeedableRng;
    use rand_isaac::Isaac64Rng;

    fn grid(half: Real, resolution: u32) -> VoxelGrid {
        let aabb = Aabb::from_half_extents(Point::origin(), Vector::repeat(half));
        VoxelGrid::new(aabb, resolution).unwrap()
    }

    #[test]
    fn invalid_grids_are_rejected() {
        let aabb = Aabb::from_half_extents(Point::origin(), Vector::repeat(1.0));
        assert_eq!(
            VoxelGrid::new(aabb, 0).err(),
            Some(VoxelGridError::ZeroResolution)
        );

        let flat = Aabb::new(Point::origin(), Point::origin());
        assert_eq!(
            VoxelGrid::new(flat, 8).err(),
            Some(VoxelGridError::DegenerateBounds)
        );
        assert_eq!(
            VoxelGrid::new(Aabb::new_invalid(), 8).err(),
            Some(VoxelGridError::DegenerateBounds)
        );
    }

    #[test]
    fn grid_dimensions() {
        let aabb = Aabb::new(Point::new(0.0, 0.0, 0.0), Point::new(2.0, 1.0, 0.5));
        let grid = VoxelGrid::new(aabb, 4).unwrap();
        assert_relative_eq!(grid.voxel_size(), 0.5);
        assert_relative_eq!(grid.voxel_center(0, 0, 0), Point::new(0.25, 0.25, 0.25));
        assert_eq!(grid.world_to_voxel(&Point::new(1.9, 0.1, 0.6)), Point::new(3, 0, 1));
        // Out-of-range points are clamped.
        assert_eq!(grid.world_to_voxel(&Point::new(-5.0, 9.0, 0.0)), Point::new(0, 3, 0));
    }

    #[test]
    fn voxelization_is_deterministic() {
        let tri = Triangle::new(
            Point::new(-0.7, -0.3, 0.1),
            Point::new(0.8, -0.2, -0.4),
            Point::new(0.1, 0.9, 0.6),
        );

        let mut grid1 = grid(1.0, 16);
        let mut grid2 = grid(1.0, 16);
        grid1.voxelize_triangle(&tri);
        grid2.voxelize_triangle(&tri);

        assert!(grid1.num_voxels_rasterized() > 0);
        assert_eq!(grid1.num_voxels_rasterized(), grid2.num_voxels_rasterized());
        assert_eq!(grid1.data, grid2.data);

        // Rasterizing the same triangle again does not change anything.
        grid1.voxelize_triangle(&tri);
        assert_eq!(grid1.data, grid2.data);
    }

    #[test]
    fn degenerate_triangles_do_not_break_rasterization() {
        let mut grid = grid(1.0, 8);
        let p = Point::new(0.1, 0.1, 0.1);
        grid.voxelize_triangle(&Triangle::new(p, p, p));
        grid.voxelize_triangle(&Triangle::new(
            Point::new(-0.9, 0.0, 0.0),
            Point::new(0.0, 0.0, 0.0),
            Point::new(0.9, 0.0, 0.0),
        ));
        assert!(grid.num_voxels_rasterized() > 0);
    }

    #[test]
    fn flood_fill_closed_cube() {
        // Grid centers are at -0.9, -0.7, ..., 0.9: the faces of the cube go exactly
        // through a layer of voxel centers and no center is at a tie distance.
        let (vtx, idx) = cuboid(Vector::repeat(0.5));
        let mut grid = grid(1.0, 10);
        grid.voxelize_triangles(&vtx, &idx);
        grid.flood_fill_interior();

        assert!(grid.num_voxels_filled() > 0);

        for i in 0..10 {
            for j in 0..10 {
                for k in 0..10 {
                    let center = grid.voxel_center(i, j, k);
                    let max_coord = center.coords.abs().max();

                    if max_coord < 0.5 - 1.0e-3 {
                        assert!(grid.voxel(i, j, k).is_occupied(), "{:?}", center);
                    } else if max_coord > 0.5 + 1.0e-3 {
                        assert_eq!(grid.voxel(i, j, k), VoxelValue::Empty, "{:?}", center);
                    }
                }
            }
        }
    }

    #[test]
    fn exterior_points() {
        let (vtx, idx) = cuboid(Vector::repeat(0.5));
        let mut grid = grid(1.0, 10);
        grid.voxelize_triangles(&vtx, &idx);
        grid.flood_fill_interior();

        assert!(!grid.is_exterior(&Point::origin()));
        assert!(!grid.is_exterior(&Point::new(0.45, -0.45, 0.3)));
        // Empty, but next to the surface layer at x = 0.5.
        assert!(!grid.is_exterior(&Point::new(0.65, 0.0, 0.0)));
        assert!(grid.is_exterior(&Point::new(0.85, 0.0, 0.0)));
        assert!(grid.is_exterior(&Point::new(5.0, 5.0, 5.0)));
    }

    #[test]
    fn flood_fill_open_surface_stays_hollow() {
        // A single triangle does not enclose anything.
        let mut grid = grid(1.0, 8);
        grid.voxelize_triangle(&Triangle::new(
            Point::new(-0.5, 0.0, -0.5),
            Point::new(0.5, 0.0, -0.5),
            Point::new(0.0, 0.0, 0.5),
        ));
        let before = grid.num_voxels_occupied();
        grid.flood_fill_interior();
        assert_eq!(grid.num_voxels_filled(), 0);
        assert_eq!(grid.num_voxels_occupied(), before);
    }

    #[test]
    fn generated_nodes_respect_interior_density() {
        let (vtx, idx) = cuboid(Vector::repeat(0.5));
        let mut grid = grid(1.0, 10);
        grid.voxelize_triangles(&vtx, &idx);
        grid.flood_fill_interior();

        let mut rng = Isaac64Rng::seed_from_u64(0);
        let all = grid.generate_nodes(1.0, &mut rng);
        let surface_only = grid.generate_nodes(0.0, &mut rng);

        assert_eq!(all.len() as u32, grid.num_voxels_occupied());
        assert!(surface_only.iter().all(|n| n.is_surface));
        assert_eq!(
            surface_only.len(),
            all.iter().filter(|n| n.is_surface).count()
        );
        assert!(surface_only.len() < all.len());

        // Interior nodes are those whose 6 neighbors are all occupied.
        for node in all.iter().filter(|n| !n.is_surface) {
            assert!(node.position.coords.abs().max() < 0.5);
        }

        // The same seed yields the same sampling.
        let half1 = grid.generate_nodes(0.5, &mut Isaac64Rng::seed_from_u64(42));
        let half2 = grid.generate_nodes(0.5, &mut Isaac64Rng::seed_from_u64(42));
        assert_eq!(half1, half2);
        assert!(half1.len() >= surface_only.len() && half1.len() <= all.len());
    }
}
