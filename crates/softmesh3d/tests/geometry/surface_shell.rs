use super::{assert_valid_mesh, convert_unit_cube, cube_settings};
use softmesh3d::math::{Real, Vector};
use softmesh3d::shape::Triangle;

#[test]
fn cube_shell_is_closed_and_outward() {
    let geom = convert_unit_cube(cube_settings());
    let mut total_area = 0.0;
    let mut weighted_normals = Vector::zeros();

    for tri in geom.surface_triangles() {
        let [a, b, c] = tri.nodes.map(|i| geom.nodes()[i as usize].position);
        let shape = Triangle::new(a, b, c);

        assert_relative_eq!(tri.area, shape.area(), epsilon = 1.0e-6);
        assert!(tri.normal.dot(&shape.center().coords) > 0.0);

        total_area += tri.area;
        weighted_normals += tri.normal.into_inner() * tri.area;
    }

    // The nodes hull is a cube of side 1.05.
    assert_relative_eq!(total_area, 6.0 * 1.05 * 1.05 as Real, epsilon = 1.0e-3);
    assert!(weighted_normals.norm() < 1.0e-3);
    assert_valid_mesh(&geom);
}

#[test]
fn shell_triangles_belong_to_their_tetrahedron() {
    let geom = convert_unit_cube(cube_settings());

    for tri in geom.surface_triangles() {
        let owner = tri.neighbor_tetrahedra[0].unwrap() as usize;
        let tet = &geom.tetrahedra()[owner];

        assert!(tri.nodes.iter().all(|id| tet.nodes.contains(id)));
        assert_eq!(tri.neighbor_tetrahedra[1], None);
    }
}
