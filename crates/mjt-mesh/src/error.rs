//! Mesh error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeshError {
    /// The OBJ reader rejected the file.
    #[error("failed to load mesh: {0}")]
    Load(String),

    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
}

impl From<tobj::LoadError> for MeshError {
    fn from(error: tobj::LoadError) -> Self {
        Self::Load(error.to_string())
    }
}
