//! Tetrahedralization of FEM node clouds.
//!
//! Every [`Tetrahedralizer`] returns index quadruples into the node slice it was given.
//! Each output tetrahedron has a volume greater than
//! [`MIN_TETRAHEDRON_VOLUME`](crate::shape::MIN_TETRAHEDRON_VOLUME). Node sets with less
//! than 4 nodes produce no tetrahedron at all.

pub use self::delaunay::DelaunayTetrahedralizer;
pub use self::fan_insertion::FanInsertionTetrahedralizer;

use crate::fem::FemNode;
use crate::shape::Tetrahedron;

mod delaunay;
mod fan_insertion;

/// An algorithm generating tetrahedra from a set of nodes.
pub trait Tetrahedralizer {
    /// Computes the tetrahedra connecting `nodes`.
    fn tetrahedralize(&self, nodes: &[FemNode]) -> Vec<[u32; 4]>;
}

/// The tetrahedralization algorithm used by the mesh converter.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TetrahedralizationMethod {
    /// Bowyer-Watson Delaunay tetrahedralization of the convex hull of the nodes.
    #[default]
    Delaunay,
    /// Fan triangulation of a small set of hull seeds followed by naive point insertion.
    FanInsertion,
}

impl Tetrahedralizer for TetrahedralizationMethod {
    fn tetrahedralize(&self, nodes: &[FemNode]) -> Vec<[u32; 4]> {
        match self {
            Self::Delaunay => DelaunayTetrahedralizer::new().tetrahedralize(nodes),
            Self::FanInsertion => FanInsertionTetrahedralizer.tetrahedralize(nodes),
        }
    }
}

fn tetrahedron(nodes: &[FemNode], ids: [u32; 4]) -> Tetrahedron {
    Tetrahedron::from(ids.map(|id| nodes[id as usize].position))
}
