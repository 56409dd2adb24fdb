//! CPU reference of the two-influence linear blend skinning stage.
//!
//! Mirrors what the vertex shader does with the exported uniform arrays:
//! each vertex is transformed by two bones and the results are mixed by the
//! vertex's fixed-point weights. Bone ids past the written poses read the
//! identity pose, like the padded uniform slots.

use glam::Vec3;
use rig_format::{MeshFile, Vertex};

use crate::pose::Pose;

fn bone_pose(poses: &[Pose], id: u8) -> Pose {
    poses.get(usize::from(id)).copied().unwrap_or_default()
}

/// Skinned position of `vertex` under world `poses`
pub fn skin_position(vertex: &Vertex, poses: &[Pose]) -> Vec3 {
    let [w0, w1] = vertex.weights();
    let [b0, b1] = vertex.bone_ids;
    w0 * bone_pose(poses, b0).transform_point(vertex.position)
        + w1 * bone_pose(poses, b1).transform_point(vertex.position)
}

/// Skinned normal of `vertex`, not renormalized
pub fn skin_normal(vertex: &Vertex, poses: &[Pose]) -> Vec3 {
    let [w0, w1] = vertex.weights();
    let [b0, b1] = vertex.bone_ids;
    w0 * bone_pose(poses, b0).transform_vector(vertex.normal)
        + w1 * bone_pose(poses, b1).transform_vector(vertex.normal)
}

/// One skinned vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkinnedVertex {
    /// Deformed position
    pub position: Vec3,
    /// Deformed normal
    pub normal: Vec3,
}

/// Skin every vertex of `mesh`
pub fn skin_mesh(mesh: &MeshFile, poses: &[Pose]) -> Vec<SkinnedVertex> {
    mesh.vertices
        .iter()
        .map(|vertex| SkinnedVertex {
            position: skin_position(vertex, poses),
            normal: skin_normal(vertex, poses),
        })
        .collect()
}
