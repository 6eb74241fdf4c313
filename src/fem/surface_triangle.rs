use crate::math::{Real, UnitVector};

/// A triangle of the boundary shell of a FEM mesh.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FemSurfaceTriangle {
    /// Indices of the three nodes of this triangle.
    pub nodes: [u32; 3],
    /// The unit normal of this triangle.
    pub normal: UnitVector<Real>,
    /// The area of this triangle.
    pub area: Real,
    /// The tetrahedra sharing this face.
    ///
    /// The first entry is the tetrahedron owning the face. The second one is
    /// always `None` for faces of the boundary shell.
    pub neighbor_tetrahedra: [Option<u32>; 2],
}
