use crate::error::MeshError;
use crate::topology::{self, EdgeStats};

/// Indexed triangle soup: shared vertex positions plus index triples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    positions: Vec<[f64; 3]>,
    triangles: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Build a mesh, rejecting triangles that index past `positions`.
    ///
    /// # Errors
    ///
    /// [`MeshError::IndexOutOfRange`] for the first triangle corner that has
    /// no matching position.
    pub fn new(positions: Vec<[f64; 3]>, triangles: Vec<[u32; 3]>) -> Result<Self, MeshError> {
        let vertex_count = positions.len();
        for (triangle, corners) in triangles.iter().enumerate() {
            if let Some(&index) = corners
                .iter()
                .find(|&&index| index as usize >= vertex_count)
            {
                return Err(MeshError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(Self {
            positions,
            triangles,
        })
    }

    #[must_use]
    pub fn positions(&self) -> &[[f64; 3]] {
        &self.positions
    }

    #[must_use]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// No geometry to validate: no vertices, or no face with three
    /// distinct corners.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
            || self
                .triangles
                .iter()
                .all(|&triangle| topology::is_degenerate(triangle))
    }

    #[must_use]
    pub fn edge_stats(&self) -> EdgeStats {
        topology::edge_stats(&self.triangles)
    }

    /// At least one real face, and every edge is shared by exactly two
    /// triangles.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        !self.is_empty() && self.edge_stats().is_closed()
    }

    /// Number of directed edges used by more than one triangle. Zero on a
    /// consistently wound surface.
    #[must_use]
    pub fn misoriented_edges(&self) -> usize {
        topology::misoriented_edges(&self.triangles)
    }

    #[must_use]
    pub fn is_consistently_oriented(&self) -> bool {
        self.misoriented_edges() == 0
    }

    /// Enclosed volume via the divergence theorem.
    ///
    /// Sums the signed volumes of the tetrahedra formed by each triangle and
    /// the origin. Only meaningful for watertight meshes that are
    /// [consistently oriented](Self::is_consistently_oriented); the absolute
    /// value is returned so inward winding gives the same result.
    #[must_use]
    pub fn volume(&self) -> f64 {
        let signed: f64 = self
            .triangles
            .iter()
            .map(|&[a, b, c]| {
                let p0 = self.positions[a as usize];
                let p1 = self.positions[b as usize];
                let p2 = self.positions[c as usize];
                dot(p0, cross(p1, p2)) / 6.0
            })
            .sum();
        signed.abs()
    }
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tetrahedron(scale: f64) -> TriangleMesh {
        TriangleMesh::new(
            vec![
                [0.0, 0.0, 0.0],
                [scale, 0.0, 0.0],
                [0.0, scale, 0.0],
                [0.0, 0.0, scale],
            ],
            vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
        )
        .expect("valid tetrahedron")
    }

    #[test]
    fn tetrahedron_is_watertight_with_expected_volume() {
        let mesh = tetrahedron(1.0);
        assert!(!mesh.is_empty());
        assert!(mesh.is_watertight());
        assert!((mesh.volume() - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn flipped_winding_keeps_positive_volume() {
        let mesh = tetrahedron(2.0);
        let flipped = TriangleMesh::new(
            mesh.positions().to_vec(),
            mesh.triangles().iter().map(|&[a, b, c]| [a, c, b]).collect(),
        )
        .expect("valid mesh");
        assert!((flipped.volume() - mesh.volume()).abs() < 1e-12);
    }

    #[test]
    fn one_flipped_face_breaks_orientation() {
        let mut mesh = tetrahedron(1.0);
        mesh.triangles[3] = [1, 3, 2];
        assert!(mesh.is_watertight());
        assert!(!mesh.is_consistently_oriented());
        assert_eq!(mesh.misoriented_edges(), 3);
        assert!(tetrahedron(1.0).is_consistently_oriented());
    }

    #[test]
    fn degenerate_faces_only_is_empty() {
        let mesh = TriangleMesh::new(
            vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[0, 0, 1], [1, 2, 2]],
        )
        .expect("valid");
        assert!(mesh.is_empty());
        assert!(!mesh.is_watertight());
    }

    #[test]
    fn open_mesh_is_not_watertight() {
        let mut mesh = tetrahedron(1.0);
        mesh.triangles.pop();
        assert!(!mesh.is_watertight());
        assert_eq!(mesh.edge_stats().boundary, 3);
    }

    #[test]
    fn points_only_mesh_is_empty() {
        let mesh = TriangleMesh::new(vec![[0.0; 3], [1.0, 0.0, 0.0]], Vec::new()).expect("valid");
        assert!(mesh.is_empty());
        assert!(!mesh.is_watertight());
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let err = TriangleMesh::new(vec![[0.0; 3]; 3], vec![[0, 1, 3]]).unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange {
                triangle: 0,
                index: 3,
                vertex_count: 3
            }
        ));
    }
}
