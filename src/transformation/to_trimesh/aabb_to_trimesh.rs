use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};

impl Aabb {
    /// Discretize the boundary of this AABB as a closed, outward-oriented triangle-mesh.
    ///
    /// The mesh has 8 vertices and 12 triangles.
    pub fn to_trimesh(&self) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
        let (vtx, idx) = unit_cuboid();
        let center = self.center();
        let extents = self.extents();
        let vtx = vtx
            .into_iter()
            .map(|pt| center + pt.coords.component_mul(&extents))
            .collect();
        (vtx, idx)
    }
}

/// Generates a closed triangle mesh of the cube with the given half-extents, centered at the origin.
pub fn cuboid(half_extents: Vector<Real>) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
    Aabb::from_half_extents(Point::origin(), half_extents).to_trimesh()
}

/**
 * Generates a cuboid shape with a split index buffer.
 *
 * The cuboid is centered at the origin, and has its half extents set to 0.5.
 */
fn unit_cuboid() -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
    let mut coords = Vec::with_capacity(8);
    let mut faces = Vec::with_capacity(12);

    coords.push(Point::new(-0.5, -0.5, 0.5));
    coords.push(Point::new(-0.5, -0.5, -0.5));
    coords.push(Point::new(0.5, -0.5, -0.5));
    coords.push(Point::new(0.5, -0.5, 0.5));
    coords.push(Point::new(-0.5, 0.5, 0.5));
    coords.push(Point::new(-0.5, 0.5, -0.5));
    coords.push(Point::new(0.5, 0.5, -0.5));
    coords.push(Point::new(0.5, 0.5, 0.5));

    faces.push([4, 5, 0]);
    faces.push([5, 1, 0]);

    faces.push([5, 6, 1]);
    faces.push([6, 2, 1]);

    faces.push([6, 7, 3]);
    faces.push([2, 6, 3]);

    faces.push([7, 4, 0]);
    faces.push([3, 7, 0]);

    faces.push([0, 1, 2]);
    faces.push([3, 0, 2]);

    faces.push([7, 6, 5]);
    faces.push([4, 7, 5]);

    (coords, faces)
}
