//! Integration tests for encoding and decoding rig asset files

use glam::{Quat, Vec3};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use rig_format::{
    BoneRecord, MeshFile, PoseFile, PoseRecord, RigRecord, SkeletonFile, Vertex,
    validation::validate_mesh,
};

fn finite() -> impl Strategy<Value = f32> {
    -1.0e6f32..1.0e6f32
}

fn vec3() -> impl Strategy<Value = Vec3> {
    (finite(), finite(), finite()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn quat() -> impl Strategy<Value = Quat> {
    (finite(), finite(), finite(), finite()).prop_map(|(x, y, z, w)| Quat::from_xyzw(x, y, z, w))
}

/// Skeleton decoding rejects non-unit bind rotations
fn unit_quat() -> impl Strategy<Value = Quat> {
    let angle = -std::f32::consts::PI..std::f32::consts::PI;
    (angle.clone(), angle.clone(), angle)
        .prop_map(|(a, b, c)| Quat::from_euler(glam::EulerRot::XYZ, a, b, c))
}

/// Skeletons in hierarchy order: each parent is a root or an earlier bone
fn skeleton() -> impl Strategy<Value = SkeletonFile> {
    prop::collection::vec((any::<prop::sample::Index>(), any::<bool>(), vec3(), unit_quat()), 1..40)
        .prop_map(|raw| {
            let bones = raw
                .into_iter()
                .enumerate()
                .map(|(i, (pick, is_root, offset, rotation))| {
                    if i == 0 || is_root {
                        BoneRecord::root(offset, rotation)
                    } else {
                        BoneRecord::child(pick.index(i), offset, rotation)
                    }
                })
                .collect();
            SkeletonFile { bones }
        })
}

fn pose_record() -> impl Strategy<Value = PoseRecord> {
    (quat(), 0.0f32..100.0, vec3()).prop_map(|(rotation, scale, translation)| PoseRecord {
        rotation,
        scale,
        translation,
    })
}

fn bits_of_bone(bone: &BoneRecord) -> Vec<u32> {
    let mut bits = vec![bone.parent_id as u32];
    bits.extend(bone.bind_offset.to_array().map(f32::to_bits));
    bits.extend(bone.bind_rotation.to_array().map(f32::to_bits));
    bits
}

proptest! {
    #[test]
    fn skeleton_roundtrip_is_bit_exact(skeleton in skeleton()) {
        let bytes = skeleton.to_bytes().unwrap();
        prop_assert_eq!(bytes.len(), 4 + skeleton.bones.len() * BoneRecord::SIZE);

        let decoded = SkeletonFile::from_bytes(&bytes).unwrap();
        prop_assert_eq!(decoded.bones.len(), skeleton.bones.len());
        for (a, b) in decoded.bones.iter().zip(&skeleton.bones) {
            prop_assert_eq!(bits_of_bone(a), bits_of_bone(b));
        }
        prop_assert_eq!(decoded.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn pose_roundtrip_is_bit_exact(poses in prop::collection::vec(pose_record(), 1..64)) {
        let file = PoseFile { poses };
        let bytes = file.to_bytes().unwrap();
        let decoded = PoseFile::from_bytes(&bytes, file.poses.len()).unwrap();
        prop_assert_eq!(decoded.to_bytes().unwrap(), bytes);
        prop_assert_eq!(decoded, file);
    }
}

#[test]
fn mesh_roundtrip() {
    let mesh = MeshFile {
        vertices: vec![
            Vertex {
                position: Vec3::new(0.0, 1.0, 0.0),
                normal: Vec3::Y,
                bone_ids: [0, 1],
                bone_weights: [200, 55],
            },
            Vertex {
                position: Vec3::new(1.0, 0.0, 0.0),
                normal: Vec3::X,
                bone_ids: [1, 1],
                bone_weights: [255, 0],
            },
            Vertex {
                position: Vec3::new(0.0, 0.0, 1.0),
                normal: Vec3::Z,
                bone_ids: [0, 0],
                bone_weights: [255, 0],
            },
        ],
        indices: vec![0, 1, 2, 2, 1, 0],
    };

    let bytes = mesh.to_bytes().unwrap();
    assert_eq!(bytes.len(), mesh.encoded_size());
    assert_eq!(bytes.len(), 8 + 3 * 28 + 6 * 4);

    let decoded = MeshFile::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, mesh);
    assert!(validate_mesh(&decoded, 2).is_ok());

    let streamed = MeshFile::read(&mut bytes.as_slice()).unwrap();
    assert_eq!(streamed, mesh);
}

#[test]
fn skeleton_with_forward_parent_is_rejected() {
    let skeleton = SkeletonFile {
        bones: vec![
            BoneRecord::root(Vec3::ZERO, Quat::IDENTITY),
            BoneRecord::child(1, Vec3::X, Quat::IDENTITY),
        ],
    };
    let bytes = skeleton.to_bytes().unwrap();

    let err = SkeletonFile::from_bytes(&bytes).unwrap_err();
    assert!(err.is_malformed(), "unexpected error: {err}");

    let err = SkeletonFile::read(&mut bytes.as_slice()).unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn skeleton_with_non_unit_bind_rotation_is_rejected() {
    let skeleton = SkeletonFile {
        bones: vec![
            BoneRecord::root(Vec3::ZERO, Quat::IDENTITY),
            BoneRecord::child(0, Vec3::X, Quat::from_xyzw(0.0, 0.0, 0.0, 3.0)),
        ],
    };
    let bytes = skeleton.to_bytes().unwrap();
    assert!(SkeletonFile::from_bytes(&bytes).unwrap_err().is_malformed());
}

#[test]
fn truncated_skeleton_is_malformed() {
    let skeleton = SkeletonFile {
        bones: vec![
            BoneRecord::root(Vec3::ZERO, Quat::IDENTITY),
            BoneRecord::child(0, Vec3::X, Quat::IDENTITY),
        ],
    };
    let bytes = skeleton.to_bytes().unwrap();

    for cut in [1, 4, 20, bytes.len() - 1] {
        let err = SkeletonFile::from_bytes(&bytes[..cut]).unwrap_err();
        assert!(err.is_malformed(), "cut at {cut}: {err}");
    }
}
