//! Triangle mesh generation from simple geometric shapes.
//!
//! A triangle mesh is represented as a pair of vectors:
//! `(Vec<Point<Real>>, Vec<[u32; 3]>)` containing vertices and triangle indices.
//! Triangles follow a counter-clockwise winding order when viewed from outside
//! the shape.
//!
//! ```
//! # #[cfg(feature = "f32")]
//! # {
//! use softmesh3d::math::Vector;
//! use softmesh3d::transformation::to_trimesh::cuboid;
//!
//! let (vertices, indices) = cuboid(Vector::new(1.0, 2.0, 3.0));
//!
//! // A cuboid has 8 vertices and 12 triangles (2 per face × 6 faces)
//! assert_eq!(vertices.len(), 8);
//! assert_eq!(indices.len(), 12);
//! # }
//! ```

pub use self::aabb_to_trimesh::cuboid;
pub use self::ball_to_trimesh::ball;

mod aabb_to_trimesh;
mod ball_to_trimesh;
