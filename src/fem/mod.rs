//! Volumetric FEM meshes and their generation from triangle meshes.

pub use self::boundary::fix_boundary_nodes;
pub use self::converter::MeshToFemConverter;
pub use self::error::ConversionError;
pub use self::geometry::{FemGeometry, FemStatistics};
pub use self::mass::{distribute_mass, MIN_NODE_MASS};
pub use self::node::FemNode;
pub use self::node_merge::{merge_original_vertices, MERGE_DISTANCE_SQUARED};
pub use self::settings::{FemConversionSettings, MassDistribution};
pub use self::surface_triangle::FemSurfaceTriangle;
pub use self::tetrahedron::FemTetrahedron;

mod boundary;
mod converter;
mod error;
mod geometry;
mod mass;
mod node;
mod node_merge;
mod settings;
mod surface_triangle;
mod tetrahedron;
