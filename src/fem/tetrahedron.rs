use super::FemNode;
use crate::math::{Matrix, Point, Real};
use crate::shape::Tetrahedron;

/// A linear tetrahedral element.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FemTetrahedron {
    /// Indices of the four nodes of this element.
    pub nodes: [u32; 4],
    /// The volume of this element in its rest configuration.
    pub volume: Real,
    /// The inverse of the rest edge matrix, see [`Tetrahedron::inverse_rest_matrix`].
    pub inv_rest_matrix: Matrix<Real>,
    /// Young's modulus of the material.
    pub young_modulus: Real,
    /// Poisson's ratio of the material.
    pub poisson_ratio: Real,
    /// Mass density of the material.
    pub density: Real,
}

impl FemTetrahedron {
    /// Builds the element connecting the given nodes, at the rest positions of `nodes`.
    ///
    /// Returns `None` if the element is degenerate (see [`Tetrahedron::is_non_degenerate`]) or
    /// if its rest matrix cannot be inverted.
    pub fn at_rest(
        nodes: &[FemNode],
        ids: [u32; 4],
        young_modulus: Real,
        poisson_ratio: Real,
        density: Real,
    ) -> Option<Self> {
        let tet = rest_shape(nodes, ids);

        if !tet.is_non_degenerate() {
            return None;
        }

        Some(Self {
            nodes: ids,
            volume: tet.volume(),
            inv_rest_matrix: tet.inverse_rest_matrix()?,
            young_modulus,
            poisson_ratio,
            density,
        })
    }

    /// The mass of this element.
    #[inline]
    pub fn mass(&self) -> Real {
        self.volume * self.density
    }
}

pub(crate) fn rest_shape(nodes: &[FemNode], ids: [u32; 4]) -> Tetrahedron {
    Tetrahedron::from(ids.map(|id| nodes[id as usize].rest_position))
}

pub(crate) fn current_positions(nodes: &[FemNode], ids: [u32; 4]) -> [Point<Real>; 4] {
    ids.map(|id| nodes[id as usize].position)
}
