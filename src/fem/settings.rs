use crate::math::Real;
use crate::transformation::TetrahedralizationMethod;

/// How the mass of the material is assigned to the FEM nodes.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MassDistribution {
    /// Every node gets a unit mass.
    #[default]
    Uniform,
    /// Each tetrahedron spreads its mass evenly over its four nodes.
    VolumeWeighted,
    /// The total mass of the tetrahedra is spread over the surface nodes, proportionally to
    /// the area of their incident surface triangles.
    SurfaceWeighted,
}

/// Parameters of the conversion from a surface mesh to a FEM mesh.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FemConversionSettings {
    /// The number of voxels along the largest side of the padded mesh bounding box.
    ///
    /// Default: `16`
    pub voxel_resolution: u32,
    /// The margin added to each side of the mesh bounding box before voxelization.
    ///
    /// Default: `0.1`
    pub voxel_padding: Real,
    /// Reserved. Surface nodes are always generated for every surface voxel.
    ///
    /// Default: `1.0`
    pub surface_sampling_density: Real,
    /// The probability, in `[0, 1]`, that an interior voxel generates a node.
    ///
    /// Default: `0.5`
    pub interior_point_density: Real,
    /// Young's modulus assigned to every tetrahedron.
    ///
    /// Default: `1.0e6`
    pub young_modulus: Real,
    /// Poisson's ratio assigned to every tetrahedron.
    ///
    /// Default: `0.3`
    pub poisson_ratio: Real,
    /// Mass density assigned to every tetrahedron.
    ///
    /// Default: `1000.0`
    pub density: Real,
    /// How mass is assigned to nodes.
    ///
    /// Default: `MassDistribution::Uniform`
    pub mass_distribution: MassDistribution,
    /// Whether the nodes near the bottom (along `y`) of the mesh are fixed.
    ///
    /// Default: `false`
    pub fix_boundary_nodes: bool,
    /// Nodes with `y < min_y + boundary_fix_threshold` are fixed if `fix_boundary_nodes` is set.
    ///
    /// Default: `0.1`
    pub boundary_fix_threshold: Real,
    /// The algorithm generating the tetrahedra.
    ///
    /// Default: `TetrahedralizationMethod::Delaunay`
    pub tetrahedralization: TetrahedralizationMethod,
    /// Seed of the random generator sampling the interior nodes.
    ///
    /// Default: `0`
    pub seed: u64,
}

impl Default for FemConversionSettings {
    fn default() -> Self {
        Self {
            voxel_resolution: 16,
            voxel_padding: 0.1,
            surface_sampling_density: 1.0,
            interior_point_density: 0.5,
            young_modulus: 1.0e6,
            poisson_ratio: 0.3,
            density: 1000.0,
            mass_distribution: MassDistribution::Uniform,
            fix_boundary_nodes: false,
            boundary_fix_threshold: 0.1,
            tetrahedralization: TetrahedralizationMethod::Delaunay,
            seed: 0,
        }
    }
}
