use crate::math::{Point, Real};

/// Computes the geometric center (centroid) of a set of points.
///
/// All points are weighted equally.
///
/// # Panics
///
/// Panics if the input slice is empty.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use softmesh3d::utils::center;
/// use softmesh3d::math::Point;
///
/// let points = vec![
///     Point::new(0.0, 0.0, 0.0),
///     Point::new(4.0, 0.0, 0.0),
///     Point::new(0.0, 4.0, 0.0),
/// ];
///
/// let c = center(&points);
///
/// assert!((c.x - 4.0 / 3.0).abs() < 1e-6);
/// assert!((c.y - 4.0 / 3.0).abs() < 1e-6);
/// assert!(c.z.abs() < 1e-6);
/// # }
/// ```
#[inline]
pub fn center(pts: &[Point<Real>]) -> Point<Real> {
    assert!(
        !pts.is_empty(),
        "Cannot compute the center of less than 1 point."
    );

    let denom: Real = na::convert::<f64, Real>(1.0 / (pts.len() as f64));

    let mut res = pts[0] * denom;

    for pt in &pts[1..] {
        res += pt.coords * denom;
    }

    res
}
