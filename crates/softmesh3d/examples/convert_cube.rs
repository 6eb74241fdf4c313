use softmesh3d::fem::{FemConversionSettings, MassDistribution, MeshToFemConverter};
use softmesh3d::math::Vector;
use softmesh3d::transformation::to_trimesh::cuboid;

fn main() {
    let (vertices, indices) = cuboid(Vector::repeat(0.5));
    let settings = FemConversionSettings {
        voxel_resolution: 8,
        interior_point_density: 1.0,
        mass_distribution: MassDistribution::VolumeWeighted,
        fix_boundary_nodes: true,
        ..FemConversionSettings::default()
    };

    let geometry = MeshToFemConverter::new(settings)
        .convert(&vertices, &indices)
        .expect("the cube mesh is valid");
    let stats = geometry.statistics();

    println!("Nodes: {}", stats.node_count);
    println!(
        "  surface: {}, interior: {}, fixed: {}",
        stats.surface_node_count, stats.interior_node_count, stats.fixed_node_count
    );
    println!("Tetrahedra: {}", stats.tetrahedron_count);
    println!("Surface triangles: {}", stats.surface_triangle_count);
    println!("Total volume: {:.3}", stats.total_volume);
    println!(
        "Total mass: {:.3} (average node mass: {:.4})",
        stats.total_mass, stats.average_node_mass
    );
}
