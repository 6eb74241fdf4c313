use super::tetrahedron::current_positions;
use super::{FemConversionSettings, FemNode, FemSurfaceTriangle, FemTetrahedron};
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};

/// Aggregate values computed from the arrays of a [`FemGeometry`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FemStatistics {
    /// The number of nodes.
    pub node_count: usize,
    /// The number of tetrahedra.
    pub tetrahedron_count: usize,
    /// The number of surface triangles.
    pub surface_triangle_count: usize,
    /// The number of nodes flagged as surface nodes.
    pub surface_node_count: usize,
    /// The number of nodes not flagged as surface nodes.
    pub interior_node_count: usize,
    /// The number of fixed nodes.
    pub fixed_node_count: usize,
    /// The sum of the tetrahedra rest volumes.
    pub total_volume: Real,
    /// The sum of the node masses.
    pub total_mass: Real,
    /// The mean node mass, zero if there is no node.
    pub average_node_mass: Real,
    /// The bounding box of the node positions, invalid if there is no node.
    pub aabb: Aabb,
}

impl FemStatistics {
    fn compute(
        nodes: &[FemNode],
        tetrahedra: &[FemTetrahedron],
        surface_triangles: &[FemSurfaceTriangle],
    ) -> Self {
        let surface_node_count = nodes.iter().filter(|n| n.is_surface).count();
        let total_mass: Real = nodes.iter().map(|n| n.mass).sum();
        let average_node_mass = if nodes.is_empty() {
            0.0
        } else {
            total_mass / nodes.len() as Real
        };

        Self {
            node_count: nodes.len(),
            tetrahedron_count: tetrahedra.len(),
            surface_triangle_count: surface_triangles.len(),
            surface_node_count,
            interior_node_count: nodes.len() - surface_node_count,
            fixed_node_count: nodes.iter().filter(|n| n.is_fixed).count(),
            total_volume: tetrahedra.iter().map(|t| t.volume).sum(),
            total_mass,
            average_node_mass,
            aabb: Aabb::from_points_ref(nodes.iter().map(|n| &n.position)),
        }
    }
}

/// A volumetric FEM mesh: nodes, tetrahedral elements and the boundary shell.
///
/// Tetrahedra and surface triangles refer to nodes by their index in [`Self::nodes`].
/// The arrays are only reachable through methods that keep [`Self::statistics`] up to date.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct FemGeometry {
    nodes: Vec<FemNode>,
    tetrahedra: Vec<FemTetrahedron>,
    surface_triangles: Vec<FemSurfaceTriangle>,
    surface_vertex_map: Vec<u32>,
    /// Young's modulus the tetrahedra were created with.
    pub default_young_modulus: Real,
    /// Poisson's ratio the tetrahedra were created with.
    pub default_poisson_ratio: Real,
    /// Mass density the tetrahedra were created with.
    pub default_density: Real,
    statistics: FemStatistics,
}

impl FemGeometry {
    /// Assembles a FEM mesh and computes its statistics.
    pub fn new(
        nodes: Vec<FemNode>,
        tetrahedra: Vec<FemTetrahedron>,
        surface_triangles: Vec<FemSurfaceTriangle>,
        surface_vertex_map: Vec<u32>,
        settings: &FemConversionSettings,
    ) -> Self {
        let statistics = FemStatistics::compute(&nodes, &tetrahedra, &surface_triangles);

        Self {
            nodes,
            tetrahedra,
            surface_triangles,
            surface_vertex_map,
            default_young_modulus: settings.young_modulus,
            default_poisson_ratio: settings.poisson_ratio,
            default_density: settings.density,
            statistics,
        }
    }

    /// The simulation nodes.
    #[inline]
    pub fn nodes(&self) -> &[FemNode] {
        &self.nodes
    }

    /// The tetrahedral elements.
    #[inline]
    pub fn tetrahedra(&self) -> &[FemTetrahedron] {
        &self.tetrahedra
    }

    /// The triangles of the boundary of the tetrahedra, with outward normals.
    #[inline]
    pub fn surface_triangles(&self) -> &[FemSurfaceTriangle] {
        &self.surface_triangles
    }

    /// For each vertex of the input mesh, the index of the node representing it.
    #[inline]
    pub fn surface_vertex_map(&self) -> &[u32] {
        &self.surface_vertex_map
    }

    /// The statistics of the current arrays.
    pub fn statistics(&self) -> &FemStatistics {
        &self.statistics
    }

    /// Modifies the nodes in place, then recomputes the statistics.
    ///
    /// Nodes can be moved or re-weighted but not added or removed.
    pub fn modify_nodes(&mut self, f: impl FnOnce(&mut [FemNode])) {
        f(&mut self.nodes);
        self.update_statistics();
    }

    fn update_statistics(&mut self) {
        self.statistics =
            FemStatistics::compute(&self.nodes, &self.tetrahedra, &self.surface_triangles);
    }

    /// The current positions of the four nodes of the `i`-th tetrahedron.
    pub fn tetrahedron_positions(&self, i: usize) -> Option<[Point<Real>; 4]> {
        self.tetrahedra
            .get(i)
            .map(|tet| current_positions(&self.nodes, tet.nodes))
    }

    /// The boundary shell as an indexed triangle mesh.
    ///
    /// Vertices are the positions of all the nodes, so they can be indexed with
    /// the node indices directly.
    pub fn surface_trimesh(&self) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
        (
            self.nodes.iter().map(|n| n.position).collect(),
            self.surface_triangles.iter().map(|t| t.nodes).collect(),
        )
    }
}
