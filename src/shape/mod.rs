//! Shapes supported by softmesh.

pub use self::tetrahedron::{Tetrahedron, MIN_TETRAHEDRON_VOLUME, SINGULAR_DETERMINANT_EPSILON};
pub use self::triangle::Triangle;

mod tetrahedron;
mod triangle;
