//! Definition of the tetrahedron shape.

use crate::math::{Matrix, Point, Real};
use crate::shape::Triangle;
use crate::utils;

/// Tetrahedra with a volume smaller or equal to this value are considered degenerate.
pub const MIN_TETRAHEDRON_VOLUME: Real = 1.0e-6;

/// Determinants with a magnitude below this value are treated as singular.
pub const SINGULAR_DETERMINANT_EPSILON: Real = 1.0e-10;

/// A tetrahedron with 4 vertices.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tetrahedron {
    /// The tetrahedron first point.
    pub a: Point<Real>,
    /// The tetrahedron second point.
    pub b: Point<Real>,
    /// The tetrahedron third point.
    pub c: Point<Real>,
    /// The tetrahedron fourth point.
    pub d: Point<Real>,
}

impl From<[Point<Real>; 4]> for Tetrahedron {
    fn from(arr: [Point<Real>; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }
}

impl Tetrahedron {
    /// Creates a tetrahedron from four points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>, d: Point<Real>) -> Tetrahedron {
        Tetrahedron { a, b, c, d }
    }

    /// The four vertices of this tetrahedron.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Returns the i-th face of this tetrahedron.
    ///
    /// The 0-th face is the triangle ABC.
    /// The 1-st face is the triangle ABD.
    /// The 2-nd face is the triangle ACD.
    /// The 3-rd face is the triangle BCD.
    pub fn face(&self, i: usize) -> Triangle {
        let (i0, i1, i2) = Self::face_ids(i as u32);
        let vtx = self.vertices();
        Triangle::new(vtx[i0 as usize], vtx[i1 as usize], vtx[i2 as usize])
    }

    /// Returns the vertex indices of the i-th face of this tetrahedron.
    ///
    /// The 0-th face is the triangle ABC.
    /// The 1-st face is the triangle ABD.
    /// The 2-nd face is the triangle ACD.
    /// The 3-rd face is the triangle BCD.
    pub fn face_ids(i: u32) -> (u32, u32, u32) {
        match i {
            0 => (0, 1, 2),
            1 => (0, 1, 3),
            2 => (0, 2, 3),
            3 => (1, 2, 3),
            _ => panic!("Tetrahedron face index out of bounds (must be < 4."),
        }
    }

    /// The matrix whose columns are the edges `AB`, `AC` and `AD`.
    ///
    /// This is the rest shape matrix used for deformation-gradient computations.
    #[inline]
    pub fn edge_matrix(&self) -> Matrix<Real> {
        Matrix::from_columns(&[self.b - self.a, self.c - self.a, self.d - self.a])
    }

    /// The inverse of [`Self::edge_matrix`].
    ///
    /// Returns `None` if this tetrahedron is degenerate.
    #[inline]
    pub fn inverse_rest_matrix(&self) -> Option<Matrix<Real>> {
        self.edge_matrix().try_inverse()
    }

    /// Computes the barycentric coordinates of the given point in the coordinate system of this tetrahedron.
    ///
    /// Returns `None` if this tetrahedron is degenerate.
    pub fn barycentric_coordinates(&self, p: &Point<Real>) -> Option<[Real; 4]> {
        let m = self.edge_matrix();

        if m.determinant().abs() < SINGULAR_DETERMINANT_EPSILON {
            return None;
        }

        m.try_inverse().map(|im| {
            let bcoords = im * (p - self.a);
            [
                1.0 - bcoords.x - bcoords.y - bcoords.z,
                bcoords.x,
                bcoords.y,
                bcoords.z,
            ]
        })
    }

    /// Tests if `p` is inside of this tetrahedron (boundary included).
    ///
    /// The edge-space coordinates of `p` must all be non-negative with a sum
    /// not exceeding one. Near-singular tetrahedra never contain any point.
    pub fn contains_local_point(&self, p: &Point<Real>) -> bool {
        match self.barycentric_coordinates(p) {
            Some(bcoords) => {
                bcoords[1] >= 0.0
                    && bcoords[2] >= 0.0
                    && bcoords[3] >= 0.0
                    && bcoords[1] + bcoords[2] + bcoords[3] <= 1.0
            }
            None => false,
        }
    }

    /// Computes the volume of this tetrahedron.
    #[inline]
    pub fn volume(&self) -> Real {
        self.signed_volume().abs()
    }

    /// Computes the signed volume of this tetrahedron.
    ///
    /// If it is positive, `d` is on the half-space pointed by the normal of the oriented triangle
    /// `(a, b, c)`.
    #[inline]
    pub fn signed_volume(&self) -> Real {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        let ad = self.d - self.a;

        ab.dot(&ac.cross(&ad)) / 6.0
    }

    /// Is the volume of this tetrahedron strictly greater than `min_volume`?
    #[inline]
    pub fn is_valid(&self, min_volume: Real) -> bool {
        self.volume() > min_volume
    }

    /// Is the volume of this tetrahedron strictly greater than [`MIN_TETRAHEDRON_VOLUME`]?
    #[inline]
    pub fn is_non_degenerate(&self) -> bool {
        self.is_valid(MIN_TETRAHEDRON_VOLUME)
    }

    /// Computes the center of this tetrahedron.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        utils::center(&self.vertices())
    }

    /// Computes the radius of the sphere passing through the four vertices of this tetrahedron.
    ///
    /// Returns `Real::MAX` if the tetrahedron is degenerate (its vertices are coplanar).
    pub fn circumradius(&self) -> Real {
        let u = self.b - self.a;
        let v = self.c - self.a;
        let w = self.d - self.a;

        let det = u.dot(&v.cross(&w));

        if det.abs() < SINGULAR_DETERMINANT_EPSILON {
            return Real::MAX;
        }

        let offset = (v.cross(&w) * u.norm_squared()
            + w.cross(&u) * v.norm_squared()
            + u.cross(&v) * w.norm_squared())
            / (2.0 * det);

        offset.norm()
    }
}
