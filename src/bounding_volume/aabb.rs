//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector};

/// An Axis-Aligned Bounding Box (AABB).
///
/// - **mins**: The point with the smallest coordinates on each axis.
/// - **maxs**: The point with the largest coordinates on each axis.
/// - **Invariant**: `mins.x ≤ maxs.x`, `mins.y ≤ maxs.y` and `mins.z ≤ maxs.z`,
///   except for the "invalid" AABB returned by [`Aabb::new_invalid`] which is the
///   neutral element for [`Aabb::take_point`].
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use softmesh3d::bounding_volume::Aabb;
/// use nalgebra::Point3;
///
/// let points = vec![
///     Point3::new(1.0, 2.0, 3.0),
///     Point3::new(-1.0, 4.0, 2.0),
///     Point3::new(0.0, 0.0, 5.0),
/// ];
/// let aabb = Aabb::from_points(points);
///
/// assert_eq!(aabb.mins, Point3::new(-1.0, 0.0, 2.0));
/// assert_eq!(aabb.maxs, Point3::new(1.0, 4.0, 5.0));
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB.
    ///
    /// # Arguments:
    ///   * `mins` - position of the point with the smallest coordinates.
    ///   * `maxs` - position of the point with the highest coordinates. Each component of `mins`
    ///     must be smaller than the related components of `maxs`.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid `Aabb` with `mins` components set to `Real::MAX` and `maxs`components
    /// set to `-Real::MAX`.
    ///
    /// This is often used as the initial values of some `Aabb` merging algorithms.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::MAX).into(),
            Vector::repeat(-Real::MAX).into(),
        )
    }

    /// Creates a new `Aabb` from its center and its half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Computes the `Aabb` bounding the given set of points.
    ///
    /// Returns the invalid AABB if `pts` is empty.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point<Real>>,
    {
        let mut result = Self::new_invalid();

        for pt in pts {
            result.take_point(pt);
        }

        result
    }

    /// Computes the `Aabb` bounding the given set of points, taken by reference.
    pub fn from_points_ref<'a, I>(pts: I) -> Self
    where
        I: IntoIterator<Item = &'a Point<Real>>,
    {
        Self::from_points(pts.into_iter().copied())
    }

    /// The center of this `Aabb`.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The extents of this `Aabb`.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The length of the longest side of this `Aabb`.
    #[inline]
    pub fn max_extent(&self) -> Real {
        self.extents().max()
    }

    /// Is this `Aabb` well-formed, i.e., finite with `mins <= maxs` on every axis?
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.mins.iter().chain(self.maxs.iter()).all(|e| e.is_finite())
            && na::partial_le(&self.mins, &self.maxs)
    }

    /// Enlarges this `Aabb` so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// Checks if this `Aabb` contains a point.
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        for i in 0..3 {
            if point[i] < self.mins[i] || point[i] > self.maxs[i] {
                return false;
            }
        }

        true
    }

    /// Returns a copy of this `Aabb` enlarged by `amount` on each side.
    #[inline]
    pub fn loosened(&self, amount: Real) -> Aabb {
        assert!(amount >= 0.0, "The loosening margin must be positive.");
        Aabb {
            mins: self.mins + Vector::repeat(-amount),
            maxs: self.maxs + Vector::repeat(amount),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Aabb;
    use crate::math::Point;

    #[test]
    fn empty_point_set_gives_invalid_aabb() {
        let aabb = Aabb::from_points(core::iter::empty());
        assert!(!aabb.is_valid());
    }

    #[test]
    fn loosened_aabb() {
        let aabb = Aabb::new(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 2.0, 3.0)).loosened(0.5);
        assert_relative_eq!(aabb.mins, Point::new(-0.5, -0.5, -0.5));
        assert_relative_eq!(aabb.maxs, Point::new(1.5, 2.5, 3.5));
        assert_relative_eq!(aabb.max_extent(), 4.0);
        assert!(aabb.contains_local_point(&Point::new(1.5, 0.0, 0.0)));
        assert!(!aabb.contains_local_point(&Point::new(1.6, 0.0, 0.0)));
    }
}
