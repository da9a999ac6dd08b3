//! Mesh construction.
//!
//! Meshes are built on the CPU against a caller-supplied vertex descriptor,
//! so the interleaved layout always matches the shader that consumes it.

mod descriptor;
mod plane;

pub use descriptor::{VertexAttributeDesc, VertexDescriptor, VertexSemantic};
pub use plane::{PlaneBuffers, PlaneMesh};

/// Errors that can occur while building a mesh.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("Bad vertex descriptor: {0}")]
    BadVertexDescriptor(String),
    #[error("Plane needs at least one segment per axis, got {0}x{1}")]
    NoSegments(u32, u32),
}
