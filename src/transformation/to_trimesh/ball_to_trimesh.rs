use crate::math::{Point, Real};
use na::RealField;

/// Generates a closed UV-sphere triangle mesh centered at the origin.
///
/// The sphere has `ntheta_subdiv` meridians and `nphi_subdiv` bands from pole to pole, with a
/// single vertex at each pole. Subdivisions are clamped to at least 3 meridians and 2 bands.
pub fn ball(radius: Real, ntheta_subdiv: u32, nphi_subdiv: u32) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
    let ntheta = ntheta_subdiv.max(3);
    let nphi = nphi_subdiv.max(2);
    let dtheta = Real::two_pi() / ntheta as Real;
    let dphi = Real::pi() / nphi as Real;

    let mut coords = vec![Point::new(0.0, -radius, 0.0)];

    for i in 1..nphi {
        let phi = dphi * i as Real - Real::frac_pi_2();
        let (y, r) = (phi.sin() * radius, phi.cos() * radius);

        for j in 0..ntheta {
            let theta = dtheta * j as Real;
            coords.push(Point::new(r * theta.cos(), y, r * theta.sin()));
        }
    }

    coords.push(Point::new(0.0, radius, 0.0));

    let top = coords.len() as u32 - 1;
    let last_ring = nphi - 2;
    let ring = |i: u32, j: u32| 1 + i * ntheta + j % ntheta;
    let mut idx = Vec::new();

    for j in 0..ntheta {
        idx.push([0, ring(0, j), ring(0, j + 1)]);
    }

    for i in 0..last_ring {
        for j in 0..ntheta {
            let (a, b) = (ring(i, j), ring(i, j + 1));
            let (c, d) = (ring(i + 1, j + 1), ring(i + 1, j));
            idx.push([a, c, b]);
            idx.push([a, d, c]);
        }
    }

    for j in 0..ntheta {
        idx.push([top, ring(last_ring, j + 1), ring(last_ring, j)]);
    }

    (coords, idx)
}
