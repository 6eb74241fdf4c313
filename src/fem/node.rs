use crate::math::{Point, Real, Vector};

/// A simulation particle of a FEM mesh.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FemNode {
    /// The current position of this node.
    pub position: Point<Real>,
    /// The position of this node in the rest configuration.
    pub rest_position: Point<Real>,
    /// The node velocity.
    pub velocity: Vector<Real>,
    /// The force accumulated on this node.
    pub force: Vector<Real>,
    /// The mass of this node.
    pub mass: Real,
    /// Is this node held in place by a boundary condition?
    pub is_fixed: bool,
    /// Does this node lie on the boundary of the volume?
    pub is_surface: bool,
    /// The index of the input mesh vertex this node stands for, if any.
    pub original_vertex: Option<u32>,
}

impl FemNode {
    /// Creates a node at rest at `position`, with a unit mass.
    pub fn new(position: Point<Real>, is_surface: bool) -> Self {
        Self {
            position,
            rest_position: position,
            velocity: Vector::zeros(),
            force: Vector::zeros(),
            mass: 1.0,
            is_fixed: false,
            is_surface,
            original_vertex: None,
        }
    }

    /// Creates a surface node standing for the `vertex`-th vertex of the input mesh.
    pub fn from_original_vertex(position: Point<Real>, vertex: u32) -> Self {
        Self {
            original_vertex: Some(vertex),
            ..Self::new(position, true)
        }
    }
}
