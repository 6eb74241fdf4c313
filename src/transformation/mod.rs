//! Transformation of surface meshes into volumetric meshes.

pub use self::surface_extraction::{extract_surface, BoundaryFace, SurfaceExtraction};
pub use self::tetrahedralization::{
    DelaunayTetrahedralizer, FanInsertionTetrahedralizer, TetrahedralizationMethod,
    Tetrahedralizer,
};

/// Extraction of the boundary shell of a tetrahedral mesh.
pub mod surface_extraction;
/// Tetrahedralization of unordered point clouds.
pub mod tetrahedralization;
/// Generation of triangle meshes for simple shapes.
pub mod to_trimesh;
/// Voxelization of a 3D triangle mesh.
pub mod voxelization;

#[cfg(feature = "wavefront")]
pub mod wavefront;
