//! # mjt-mesh
//!
//! Minimal triangle-mesh model for asset validation.
//!
//! A [`TriangleMesh`] answers exactly the questions the asset checker asks:
//! is it empty, is it watertight, and how much volume does it enclose.
//! OBJ files are read with `tobj`; everything else is plain index math.

mod error;
mod mesh;
mod obj;
mod topology;

pub use error::MeshError;
pub use mesh::TriangleMesh;
pub use obj::load_obj;
pub use topology::EdgeStats;
