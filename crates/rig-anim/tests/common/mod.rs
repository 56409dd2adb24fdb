//! Shared rigs and keyframes for integration tests

#![allow(dead_code)]

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use rig_anim::{Bone, Pose, PoseSet, PoseTrack, Rig, Skeleton};
use rig_format::{MeshFile, Vertex};

/// Three-bone chain: root -> child -> grandchild
pub fn chain_skeleton() -> Skeleton {
    Skeleton::from_bones(vec![
        Bone {
            parent: None,
            bind_offset: Vec3::ZERO,
            bind_rotation: Quat::IDENTITY,
        },
        Bone {
            parent: Some(0),
            bind_offset: Vec3::Y,
            bind_rotation: Quat::IDENTITY,
        },
        Bone {
            parent: Some(1),
            bind_offset: Vec3::Y,
            bind_rotation: Quat::IDENTITY,
        },
    ])
    .expect("valid chain")
}

/// Two keyframes for [`chain_skeleton`].
///
/// Frame 0 stacks the bones one unit apart along +Y. Frame 1 turns, scales
/// and moves the root, turns the child a further quarter and stretches the
/// grandchild to two units.
pub fn chain_track() -> PoseTrack {
    let rest = PoseSet::from_poses(vec![
        Pose::IDENTITY,
        Pose::from_translation(Vec3::Y),
        Pose::from_translation(Vec3::Y),
    ]);
    let turned = PoseSet::from_poses(vec![
        Pose::new(Quat::from_rotation_z(FRAC_PI_2), 2.0, Vec3::X),
        Pose::new(Quat::from_rotation_z(FRAC_PI_2), 1.0, Vec3::Y),
        Pose::from_translation(Vec3::new(0.0, 2.0, 0.0)),
    ]);
    PoseTrack::new(vec![rest, turned], 3).expect("valid track")
}

pub fn chain_rig() -> Rig {
    Rig::new(chain_skeleton(), chain_track()).expect("matching rig")
}

/// A triangle per bone, each vertex fully bound to its bone
pub fn chain_mesh() -> MeshFile {
    let mut vertices = Vec::new();
    for bone in 0u8..3 {
        for corner in 0..3 {
            vertices.push(Vertex {
                position: Vec3::new(corner as f32 * 0.1, f32::from(bone), 0.0),
                normal: Vec3::Z,
                bone_ids: [bone, 0],
                bone_weights: [255, 0],
            });
        }
    }
    MeshFile {
        vertices,
        indices: (0..9).collect(),
    }
}
