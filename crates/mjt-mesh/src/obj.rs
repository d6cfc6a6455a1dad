//! Wavefront OBJ loading via `tobj`.

use std::collections::HashMap;
use std::path::Path;

use crate::error::MeshError;
use crate::mesh::TriangleMesh;

/// Load every object in an OBJ file into one [`TriangleMesh`].
///
/// Polygons are fan-triangulated; point and line elements are dropped.
/// `tobj` gives each object its own vertex list, so positions that are
/// bit-identical are welded while merging, otherwise objects that share
/// corners would look like they had open borders. A missing or broken
/// material library is not an error.
///
/// # Errors
///
/// [`MeshError::Load`] when the file cannot be read or parsed, and
/// [`MeshError::IndexOutOfRange`] when a face references a missing vertex.
pub fn load_obj(path: &Path) -> Result<TriangleMesh, MeshError> {
    let options = tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    };
    let (models, materials) = tobj::load_obj(path, &options)?;
    if let Err(error) = materials {
        tracing::debug!(path = %path.display(), %error, "ignoring material library");
    }

    let mut positions: Vec<[f64; 3]> = Vec::new();
    let mut welded: HashMap<[u64; 3], u32> = HashMap::new();
    let mut triangles: Vec<[u32; 3]> = Vec::new();

    for model in &models {
        let remap = model
            .mesh
            .positions
            .chunks_exact(3)
            .map(|p| {
                let point = [f64::from(p[0]), f64::from(p[1]), f64::from(p[2])];
                let key = point.map(f64::to_bits);
                *welded.entry(key).or_insert_with(|| {
                    positions.push(point);
                    u32::try_from(positions.len() - 1).unwrap_or(u32::MAX)
                })
            })
            .collect::<Vec<u32>>();

        for corners in model.mesh.indices.chunks_exact(3) {
            let mut triangle = [0u32; 3];
            for (slot, &local) in triangle.iter_mut().zip(corners) {
                *slot = remap.get(local as usize).copied().unwrap_or(u32::MAX);
            }
            triangles.push(triangle);
        }
    }

    tracing::debug!(
        path = %path.display(),
        objects = models.len(),
        vertices = positions.len(),
        triangles = triangles.len(),
        "loaded obj"
    );

    TriangleMesh::new(positions, triangles)
}
