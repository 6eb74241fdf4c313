//! Rasterization of closed triangle meshes into a regular occupancy grid.

pub use self::voxel_grid::{VoxelGrid, VoxelGridError, VoxelNode, VoxelValue};

mod voxel_grid;
