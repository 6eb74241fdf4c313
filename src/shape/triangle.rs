//! Definition of the triangle shape.

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, UnitVector, Vector, DEFAULT_EPSILON};
use na::Unit;

/// A triangle shape.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
}

impl From<[Point<Real>; 3]> for Triangle {
    fn from(arr: [Point<Real>; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl Triangle {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// The three vertices of this triangle.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 3] {
        [self.a, self.b, self.c]
    }

    /// A vector normal of this triangle.
    ///
    /// The vector points such that it is collinear to `AB × AC` (where `×` denotes the cross
    /// product). Its length is twice the area of the triangle.
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        ab.cross(&ac)
    }

    /// The normal of this triangle assuming it is oriented ccw.
    ///
    /// Returns `None` if the triangle is degenerate.
    #[inline]
    pub fn normal(&self) -> Option<UnitVector<Real>> {
        Unit::try_new(self.scaled_normal(), DEFAULT_EPSILON)
    }

    /// The area of this triangle: half the norm of `AB × AC`.
    #[inline]
    pub fn area(&self) -> Real {
        self.scaled_normal().norm() * 0.5
    }

    /// The geometric center of this triangle.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        crate::utils::center(&self.vertices())
    }

    /// The axis-aligned bounding box of this triangle.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_points(self.vertices())
    }

    /// Computes the point of this triangle closest to `pt`.
    ///
    /// The Voronoï regions of the vertices, edges and face are tested in turn. A
    /// degenerate triangle (with a zero normal) is handled as the union of its
    /// three edges so this never produces NaN coordinates for finite inputs.
    pub fn project_local_point(&self, pt: &Point<Real>) -> Point<Real> {
        let a = self.a;
        let b = self.b;
        let c = self.c;

        let ab = b - a;
        let ac = c - a;
        let n = ab.cross(&ac);

        if n.norm_squared() == 0.0 {
            return self.project_on_closest_edge(pt);
        }

        let ap = pt - a;
        let ab_ap = ab.dot(&ap);
        let ac_ap = ac.dot(&ap);

        if ab_ap <= 0.0 && ac_ap <= 0.0 {
            // Voronoï region of `a`.
            return a;
        }

        let bp = pt - b;
        let ab_bp = ab.dot(&bp);
        let ac_bp = ac.dot(&bp);

        if ab_bp >= 0.0 && ac_bp <= ab_bp {
            // Voronoï region of `b`.
            return b;
        }

        let cp = pt - c;
        let ab_cp = ab.dot(&cp);
        let ac_cp = ac.dot(&cp);

        if ac_cp >= 0.0 && ab_cp <= ac_cp {
            // Voronoï region of `c`.
            return c;
        }

        // Explicit cross products are more numerically stable than the
        // classic determinant-based edge tests.
        let vc = n.dot(&ab.cross(&ap));
        if vc < 0.0 && ab_ap >= 0.0 && ab_bp <= 0.0 {
            // Voronoï region of `ab`.
            let v = ab_ap / ab.norm_squared();
            return a + ab * v.clamp(0.0, 1.0);
        }

        let vb = -n.dot(&ac.cross(&cp));
        if vb < 0.0 && ac_ap >= 0.0 && ac_cp <= 0.0 {
            // Voronoï region of `ac`.
            let w = ac_ap / ac.norm_squared();
            return a + ac * w.clamp(0.0, 1.0);
        }

        let bc = c - b;
        let va = n.dot(&bc.cross(&bp));
        if va < 0.0 && ac_bp - ab_bp >= 0.0 && ab_cp - ac_cp >= 0.0 {
            // Voronoï region of `bc`.
            let w = bc.dot(&bp) / bc.norm_squared();
            return b + bc * w.clamp(0.0, 1.0);
        }

        // Voronoï region of the face.
        // NOTE: in some cases, numerical instability may result in the
        // denominator being zero when the triangle is nearly degenerate.
        let denom = va + vb + vc;
        if denom != 0.0 {
            let v = vb / denom;
            let w = vc / denom;
            return a + ab * v + ac * w;
        }

        self.project_on_closest_edge(pt)
    }

    /// The distance between `pt` and the point of this triangle closest to it.
    #[inline]
    pub fn distance_to_local_point(&self, pt: &Point<Real>) -> Real {
        na::distance(pt, &self.project_local_point(pt))
    }

    fn project_on_closest_edge(&self, pt: &Point<Real>) -> Point<Real> {
        let candidates = [
            project_on_segment(&self.a, &self.b, pt),
            project_on_segment(&self.b, &self.c, pt),
            project_on_segment(&self.c, &self.a, pt),
        ];

        let mut best = candidates[0];
        let mut best_dist = na::distance_squared(pt, &best);

        for candidate in &candidates[1..] {
            let dist = na::distance_squared(pt, candidate);
            if dist < best_dist {
                best_dist = dist;
                best = *candidate;
            }
        }

        best
    }
}

fn project_on_segment(a: &Point<Real>, b: &Point<Real>, pt: &Point<Real>) -> Point<Real> {
    let ab = b - a;
    let sqnorm = ab.norm_squared();

    if sqnorm == 0.0 {
        return *a;
    }

    let t = (ab.dot(&(pt - a)) / sqnorm).clamp(0.0, 1.0);
    a + ab * t
}
