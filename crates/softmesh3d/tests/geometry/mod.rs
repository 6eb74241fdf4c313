mod boundary_conditions;
mod cube_conversion;
mod mass_conservation;
mod octahedron_conversion;
mod reproducibility;
mod rotated_cube_conversion;
mod sphere_conversion;
mod surface_shell;

use softmesh3d::fem::{FemConversionSettings, FemGeometry, MassDistribution, MeshToFemConverter};
use softmesh3d::math::{Real, Vector};
use softmesh3d::transformation::extract_surface;
use softmesh3d::transformation::to_trimesh::cuboid;
use softmesh3d::utils::hashmap::HashMap;

/// The settings of the reference unit cube conversion.
pub fn cube_settings() -> FemConversionSettings {
    FemConversionSettings {
        voxel_resolution: 8,
        interior_point_density: 1.0,
        mass_distribution: MassDistribution::VolumeWeighted,
        density: 1000.0,
        ..FemConversionSettings::default()
    }
}

/// Converts the unit cube centered at the origin.
pub fn convert_unit_cube(settings: FemConversionSettings) -> FemGeometry {
    let (vertices, indices) = cuboid(Vector::repeat(0.5));
    MeshToFemConverter::new(settings)
        .convert(&vertices, &indices)
        .unwrap()
}

/// Checks that no two tetrahedra overlap and that the shell is a closed 2-manifold.
///
/// Overlapping elements either share a face more than twice or count some volume twice, which
/// makes the total volume exceed the volume enclosed by the shell.
pub fn assert_valid_mesh(geom: &FemGeometry) {
    let ids: Vec<_> = geom.tetrahedra().iter().map(|tet| tet.nodes).collect();
    assert_eq!(extract_surface(&ids).num_non_manifold_faces, 0);

    let mut edges = HashMap::default();
    let mut enclosed: Real = 0.0;

    for tri in geom.surface_triangles() {
        let a = geom.nodes()[tri.nodes[0] as usize].position;
        enclosed += tri.area * tri.normal.dot(&a.coords) / 3.0;

        for (i, j) in [(0, 1), (1, 2), (2, 0)] {
            let key = (tri.nodes[i].min(tri.nodes[j]), tri.nodes[i].max(tri.nodes[j]));
            *edges.entry(key).or_insert(0) += 1;
        }
    }

    assert!(edges.values().all(|count| *count == 2));
    assert_relative_eq!(
        geom.statistics().total_volume,
        enclosed,
        max_relative = 1.0e-3
    );
}
