use crate::fem::FemGeometry;
use obj::{Group, IndexTuple, ObjData, ObjError, Object, SimplePolygon};
use std::path::Path;

impl FemGeometry {
    /// Outputs the surface shell as a Wavefront (`.obj`) file at the given path.
    ///
    /// Every node is written as a vertex so the face indices are the node indices.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn surface_to_obj_file(&self, path: impl AsRef<Path>) -> Result<(), ObjError> {
        let mut file = std::fs::File::create(path)?;
        let (vertices, indices) = self.surface_trimesh();

        ObjData {
            #[allow(clippy::unnecessary_cast)]
            position: vertices
                .iter()
                .map(|v| [v.x as f32, v.y as f32, v.z as f32])
                .collect(),
            objects: vec![Object {
                groups: vec![Group {
                    polys: indices
                        .iter()
                        .map(|tri| {
                            SimplePolygon(
                                tri.iter()
                                    .map(|i| IndexTuple(*i as usize, None, None))
                                    .collect(),
                            )
                        })
                        .collect(),
                    name: "surface".to_string(),
                    index: 0,
                    material: None,
                }],
                name: "fem".to_string(),
            }],
            ..Default::default()
        }
        .write_to_buf(&mut file)
    }
}

#[cfg(test)]
mod test {
    use crate::fem::{FemConversionSettings, MeshToFemConverter};
    use crate::math::Vector;
    use crate::transformation::to_trimesh::cuboid;

    #[test]
    fn surface_obj_roundtrip() {
        let (vertices, indices) = cuboid(Vector::repeat(0.5));
        let settings = FemConversionSettings {
            voxel_resolution: 4,
            ..FemConversionSettings::default()
        };
        let geom = MeshToFemConverter::new(settings)
            .convert(&vertices, &indices)
            .unwrap();

        let path = std::env::temp_dir().join("softmesh3d_surface_obj_roundtrip.obj");
        geom.surface_to_obj_file(&path).unwrap();

        let obj = obj::Obj::load(&path).unwrap();
        assert_eq!(obj.data.position.len(), geom.nodes().len());
        assert_eq!(
            obj.data.objects[0].groups[0].polys.len(),
            geom.surface_triangles().len()
        );
        let _ = std::fs::remove_file(&path);
    }
}
