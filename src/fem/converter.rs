use super::tetrahedron::rest_shape;
use super::{
    distribute_mass, fix_boundary_nodes, merge_original_vertices, ConversionError,
    FemConversionSettings, FemGeometry, FemNode, FemTetrahedron,
};
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::transformation::voxelization::VoxelGrid;
use crate::transformation::{
    extract_surface, DelaunayTetrahedralizer, TetrahedralizationMethod, Tetrahedralizer,
};
use rand::SeedableRng;
use rand_isaac::Isaac64Rng;

/// Converts closed triangle meshes into volumetric FEM meshes.
///
/// The conversion is a pure function of the input mesh and the settings (including the
/// random seed): converting the same mesh twice yields identical geometries.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use softmesh3d::fem::{FemConversionSettings, MeshToFemConverter};
/// use softmesh3d::math::Vector;
/// use softmesh3d::transformation::to_trimesh::cuboid;
///
/// let (vertices, indices) = cuboid(Vector::repeat(0.5));
/// let settings = FemConversionSettings {
///     voxel_resolution: 4,
///     ..FemConversionSettings::default()
/// };
///
/// let geometry = MeshToFemConverter::new(settings)
///     .convert(&vertices, &indices)
///     .unwrap();
/// assert!(geometry.statistics().tetrahedron_count > 0);
/// # }
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MeshToFemConverter {
    settings: FemConversionSettings,
}

impl MeshToFemConverter {
    /// Creates a converter with the given settings.
    pub fn new(settings: FemConversionSettings) -> Self {
        Self { settings }
    }

    /// The settings of this converter.
    pub fn settings(&self) -> &FemConversionSettings {
        &self.settings
    }

    /// Converts a mesh whose triangles are given by three consecutive indices in `indices`.
    pub fn convert_flat(
        &self,
        vertices: &[Point<Real>],
        indices: &[u32],
    ) -> Result<FemGeometry, ConversionError> {
        if indices.len() % 3 != 0 {
            return Err(ConversionError::IndexBufferLength(indices.len()));
        }

        let triangles: Vec<[u32; 3]> = indices
            .chunks_exact(3)
            .map(|idx| [idx[0], idx[1], idx[2]])
            .collect();

        self.convert(vertices, &triangles)
    }

    /// Converts the triangle mesh `(vertices, indices)` into a FEM mesh.
    ///
    /// The mesh is expected to be closed. Open meshes are converted too but only the voxels
    /// touching their triangles generate nodes.
    pub fn convert(
        &self,
        vertices: &[Point<Real>],
        indices: &[[u32; 3]],
    ) -> Result<FemGeometry, ConversionError> {
        validate_mesh(vertices, indices)?;

        let settings = &self.settings;

        if !(settings.voxel_padding >= 0.0) || !settings.voxel_padding.is_finite() {
            return Err(ConversionError::InvalidPadding);
        }

        log::info!(
            "Converting a mesh with {} vertices and {} triangles.",
            vertices.len(),
            indices.len()
        );

        let (grid, mut nodes) = self.voxel_nodes(vertices, indices)?;
        let surface_vertex_map = merge_original_vertices(&mut nodes, vertices);
        let tetrahedra = self.tetrahedralize(&grid, &nodes);

        let tetrahedra_ids: Vec<_> = tetrahedra.iter().map(|tet| tet.nodes).collect();
        let surface_triangles = extract_surface(&tetrahedra_ids).to_surface_triangles(&nodes);
        log::debug!("Extracted {} surface triangles.", surface_triangles.len());

        let distributed_mass = distribute_mass(
            &mut nodes,
            &tetrahedra,
            &surface_triangles,
            settings.mass_distribution,
        );
        log::debug!("Distributed a mass of {}.", distributed_mass);

        if settings.fix_boundary_nodes {
            let num_fixed = fix_boundary_nodes(&mut nodes, settings.boundary_fix_threshold);
            log::debug!("Fixed {} boundary nodes.", num_fixed);
        }

        let geometry = FemGeometry::new(
            nodes,
            tetrahedra,
            surface_triangles,
            surface_vertex_map,
            settings,
        );
        let stats = geometry.statistics();

        log::info!(
            "Conversion done: {} nodes, {} tetrahedra, {} surface triangles, volume: {}, mass: {}.",
            stats.node_count,
            stats.tetrahedron_count,
            stats.surface_triangle_count,
            stats.total_volume,
            stats.total_mass
        );

        Ok(geometry)
    }

    /// Voxelizes the mesh and samples nodes from the occupied voxels.
    fn voxel_nodes(
        &self,
        vertices: &[Point<Real>],
        indices: &[[u32; 3]],
    ) -> Result<(VoxelGrid, Vec<FemNode>), ConversionError> {
        let settings = &self.settings;
        let aabb = Aabb::from_points_ref(vertices).loosened(settings.voxel_padding);
        let mut grid = VoxelGrid::new(aabb, settings.voxel_resolution)?;

        grid.voxelize_triangles(vertices, indices);
        grid.flood_fill_interior();
        log::debug!(
            "Voxelized {} triangles: {} surface voxels, {} interior voxels.",
            indices.len(),
            grid.num_voxels_rasterized(),
            grid.num_voxels_filled()
        );

        let mut rng = Isaac64Rng::seed_from_u64(settings.seed);
        let nodes = grid
            .generate_nodes(settings.interior_point_density, &mut rng)
            .into_iter()
            .map(|node| FemNode::new(node.position, node.is_surface))
            .collect();

        Ok((grid, nodes))
    }

    /// Builds the elements connecting `nodes`.
    ///
    /// Degenerate elements are discarded, as well as the elements whose center lies in the
    /// exterior of the voxelized solid (see [`VoxelGrid::is_exterior`]).
    fn tetrahedralize(&self, grid: &VoxelGrid, nodes: &[FemNode]) -> Vec<FemTetrahedron> {
        let settings = &self.settings;
        let candidates = match settings.tetrahedralization {
            TetrahedralizationMethod::Delaunay => {
                DelaunayTetrahedralizer::with_lattice(grid.voxel_center(0, 0, 0), grid.voxel_size())
                    .tetrahedralize(nodes)
            }
            method => method.tetrahedralize(nodes),
        };
        let num_candidates = candidates.len();

        let tetrahedra: Vec<_> = candidates
            .into_iter()
            .filter(|ids| !grid.is_exterior(&rest_shape(nodes, *ids).center()))
            .filter_map(|ids| {
                FemTetrahedron::at_rest(
                    nodes,
                    ids,
                    settings.young_modulus,
                    settings.poisson_ratio,
                    settings.density,
                )
            })
            .collect();

        log::debug!(
            "Generated {} tetrahedra ({} degenerate or exterior ones discarded).",
            tetrahedra.len(),
            num_candidates - tetrahedra.len()
        );

        tetrahedra
    }
}

fn validate_mesh(vertices: &[Point<Real>], indices: &[[u32; 3]]) -> Result<(), ConversionError> {
    if vertices.is_empty() {
        return Err(ConversionError::EmptyVertexBuffer);
    }

    if indices.is_empty() {
        return Err(ConversionError::EmptyIndexBuffer);
    }

    if let Some(id) = vertices
        .iter()
        .position(|pt| !pt.iter().all(|e| e.is_finite()))
    {
        return Err(ConversionError::NonFiniteVertex(id));
    }

    for (triangle, idx) in indices.iter().enumerate() {
        if let Some(index) = idx.iter().find(|i| **i as usize >= vertices.len()) {
            return Err(ConversionError::IndexOutOfBounds {
                triangle,
                index: *index,
                num_vertices: vertices.len(),
            });
        }
    }

    Ok(())
}
