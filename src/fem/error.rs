use crate::transformation::voxelization::VoxelGridError;

/// Error returned by [`MeshToFemConverter`](super::MeshToFemConverter) for invalid inputs.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConversionError {
    /// The input mesh has no vertex.
    #[error("the input mesh has no vertex.")]
    EmptyVertexBuffer,
    /// The input mesh has no triangle.
    #[error("the input mesh has no triangle.")]
    EmptyIndexBuffer,
    /// The flat index buffer length is not a multiple of 3.
    #[error("the index buffer length ({0}) is not a multiple of 3.")]
    IndexBufferLength(usize),
    /// A triangle refers to a vertex that does not exist.
    #[error("triangle {triangle} refers to the vertex {index} but the mesh only has {num_vertices} vertices.")]
    IndexOutOfBounds {
        /// The faulty triangle.
        triangle: usize,
        /// The out-of-bounds vertex index.
        index: u32,
        /// The number of vertices of the mesh.
        num_vertices: usize,
    },
    /// A vertex has a NaN or infinite coordinate.
    #[error("the vertex {0} is not finite.")]
    NonFiniteVertex(usize),
    /// The padding added to the mesh bounding box is negative or not finite.
    #[error("the voxel padding must be a finite non-negative number.")]
    InvalidPadding,
    /// The voxel grid could not be created.
    #[error(transparent)]
    VoxelGrid(#[from] VoxelGridError),
}
