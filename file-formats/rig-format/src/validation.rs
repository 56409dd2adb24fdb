//! Structural validation for decoded rig assets

use crate::error::{FormatError, Result};
use crate::mesh::MeshFile;
use crate::pose::PoseRecord;
use crate::skeleton::{BoneRecord, ROOT_PARENT};
use glam::Quat;

/// Largest accepted distance of a stored quaternion's length from 1.0
pub const UNIT_TOLERANCE: f32 = 1.0e-3;

fn is_unit(rotation: Quat) -> bool {
    (rotation.length() - 1.0).abs() <= UNIT_TOLERANCE
}

/// Validates bone ordering: non-empty, and every parent precedes its child.
///
/// This is what allows a single forward pass over the bones to see each
/// parent's world pose before any of its children.
pub fn validate_hierarchy(bones: &[BoneRecord]) -> Result<()> {
    if bones.is_empty() {
        return Err(FormatError::malformed("skeleton has no bones"));
    }

    for (index, bone) in bones.iter().enumerate() {
        if bone.parent_id == ROOT_PARENT {
            continue;
        }
        if bone.parent_id < 0 {
            return Err(FormatError::malformed(format!(
                "bone {index} has invalid parent id {}",
                bone.parent_id
            )));
        }
        if bone.parent_id as usize >= index {
            return Err(FormatError::malformed(format!(
                "bone {index} has parent {} which does not precede it",
                bone.parent_id
            )));
        }
    }

    for (index, bone) in bones.iter().enumerate() {
        if !bone.bind_offset.is_finite() || !bone.bind_rotation.is_finite() {
            return Err(FormatError::malformed(format!(
                "bone {index} has a non-finite bind transform"
            )));
        }
        if !is_unit(bone.bind_rotation) {
            return Err(FormatError::malformed(format!(
                "bone {index} bind rotation has length {}, expected a unit quaternion",
                bone.bind_rotation.length()
            )));
        }
    }

    Ok(())
}

/// Validates pose values: finite components, unit rotation and
/// non-negative scale
pub fn validate_poses(poses: &[PoseRecord]) -> Result<()> {
    for (index, pose) in poses.iter().enumerate() {
        if !pose.rotation.is_finite() || !pose.translation.is_finite() || !pose.scale.is_finite()
        {
            return Err(FormatError::malformed(format!(
                "pose for bone {index} has non-finite components"
            )));
        }
        if !is_unit(pose.rotation) {
            return Err(FormatError::malformed(format!(
                "pose for bone {index} has rotation length {}, expected a unit quaternion",
                pose.rotation.length()
            )));
        }
        if pose.scale < 0.0 {
            return Err(FormatError::malformed(format!(
                "pose for bone {index} has negative scale {}",
                pose.scale
            )));
        }
    }
    Ok(())
}

/// Validates a mesh against itself and the skeleton it is skinned to.
///
/// Indices must address existing vertices and bone ids must address
/// existing bones. Weight sums above 255 are tolerated with a warning.
pub fn validate_mesh(mesh: &MeshFile, bone_count: usize) -> Result<()> {
    let vertex_count = mesh.vertices.len();

    if let Some((position, index)) = mesh
        .indices
        .iter()
        .enumerate()
        .find(|&(_, &index)| index as usize >= vertex_count)
    {
        return Err(FormatError::malformed(format!(
            "index {position} refers to vertex {index}, mesh has {vertex_count} vertices"
        )));
    }

    let mut overweight = 0usize;
    for (index, vertex) in mesh.vertices.iter().enumerate() {
        if let Some(&bone) = vertex
            .bone_ids
            .iter()
            .find(|&&bone| bone as usize >= bone_count)
        {
            return Err(FormatError::malformed(format!(
                "vertex {index} refers to bone {bone}, skeleton has {bone_count} bones"
            )));
        }
        if vertex.weight_sum() > 255 {
            overweight += 1;
        }
    }

    if overweight > 0 {
        log::warn!("{overweight} vertices have bone weights summing above 1.0");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Vertex;
    use glam::Vec3;
    use test_case::test_case;

    fn bones(parents: &[i32]) -> Vec<BoneRecord> {
        parents
            .iter()
            .map(|&parent_id| BoneRecord {
                parent_id,
                bind_offset: Vec3::ZERO,
                bind_rotation: Quat::IDENTITY,
            })
            .collect()
    }

    #[test_case(&[-1] ; "single root")]
    #[test_case(&[-1, 0, 1] ; "chain")]
    #[test_case(&[-1, -1, 0, 1] ; "two roots")]
    #[test_case(&[-1, 0, 0, 2, 2] ; "branching")]
    fn test_valid_hierarchy(parents: &[i32]) {
        assert!(validate_hierarchy(&bones(parents)).is_ok());
    }

    #[test_case(&[] ; "empty")]
    #[test_case(&[0] ; "self parent")]
    #[test_case(&[-1, 2, 0] ; "forward reference")]
    #[test_case(&[-1, -2] ; "negative parent")]
    #[test_case(&[-1, 7] ; "out of range")]
    fn test_invalid_hierarchy(parents: &[i32]) {
        let result = validate_hierarchy(&bones(parents));
        assert!(result.unwrap_err().is_malformed());
    }

    #[test]
    fn test_non_finite_bind_rejected() {
        let mut bones = bones(&[-1]);
        bones[0].bind_offset.x = f32::NAN;
        assert!(validate_hierarchy(&bones).is_err());
    }

    #[test]
    fn test_non_unit_bind_rotation_rejected() {
        let mut bones = bones(&[-1, 0]);
        bones[1].bind_rotation = Quat::from_xyzw(0.0, 0.0, 0.0, 2.0);
        assert!(validate_hierarchy(&bones).unwrap_err().is_malformed());
    }

    #[test_case(Quat::from_xyzw(0.0, 0.0, 0.0, 3.0) ; "stretched")]
    #[test_case(Quat::from_xyzw(0.0, 0.0, 0.0, 0.0) ; "zero")]
    #[test_case(Quat::from_xyzw(0.5, 0.5, 0.5, 0.4) ; "slightly short")]
    fn test_non_unit_pose_rotation_rejected(rotation: Quat) {
        let poses = [PoseRecord {
            rotation,
            ..PoseRecord::default()
        }];
        assert!(validate_poses(&poses).unwrap_err().is_malformed());
    }

    #[test]
    fn test_near_unit_rotation_accepted() {
        let poses = [PoseRecord {
            rotation: Quat::from_xyzw(0.0, 0.0, 0.0, 1.0 + UNIT_TOLERANCE / 2.0),
            ..PoseRecord::default()
        }];
        assert!(validate_poses(&poses).is_ok());
    }

    #[test]
    fn test_negative_scale_rejected() {
        let poses = [PoseRecord {
            scale: -1.0,
            ..PoseRecord::default()
        }];
        assert!(validate_poses(&poses).unwrap_err().is_malformed());
        assert!(validate_poses(&[PoseRecord::default()]).is_ok());
    }

    #[test]
    fn test_mesh_bone_id_out_of_range() {
        let mesh = MeshFile {
            vertices: vec![Vertex {
                position: Vec3::ZERO,
                normal: Vec3::Y,
                bone_ids: [0, 4],
                bone_weights: [128, 127],
            }],
            indices: vec![0, 0, 0],
        };
        assert!(validate_mesh(&mesh, 5).is_ok());
        assert!(validate_mesh(&mesh, 4).unwrap_err().is_malformed());
    }

    #[test]
    fn test_mesh_index_out_of_range() {
        let mesh = MeshFile {
            vertices: Vec::new(),
            indices: vec![0],
        };
        assert!(validate_mesh(&mesh, 1).unwrap_err().is_malformed());
    }
}
