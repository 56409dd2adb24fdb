//! Keyframe pose sets and the cyclic track that holds them

use std::ops::Index;

use rig_format::{PoseFile, PoseRecord, validation::validate_poses};

use crate::error::{AnimError, Result};
use crate::pose::Pose;

/// Keyframe count used by the bundled character assets
pub const DEFAULT_KEYFRAME_COUNT: usize = 6;

/// One local pose per bone for a single keyframe
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct PoseSet {
    poses: Vec<Pose>,
}

impl PoseSet {
    /// Decode a keyframe file that must hold exactly `bone_count` poses
    pub fn load(bytes: &[u8], bone_count: usize) -> Result<Self> {
        let file = PoseFile::from_bytes(bytes, bone_count)?;
        validate_poses(&file.poses)?;
        Ok(Self::from_records(&file.poses))
    }

    /// Build from already decoded records
    pub fn from_records(records: &[PoseRecord]) -> Self {
        Self {
            poses: records.iter().copied().map(Pose::from).collect(),
        }
    }

    /// Build from poses
    pub fn from_poses(poses: Vec<Pose>) -> Self {
        Self { poses }
    }

    /// A keyframe with every bone at the identity pose
    pub fn identity(bone_count: usize) -> Self {
        Self {
            poses: vec![Pose::IDENTITY; bone_count],
        }
    }

    /// Encode back to the file representation
    pub fn to_file(&self) -> PoseFile {
        PoseFile {
            poses: self.poses.iter().copied().map(PoseRecord::from).collect(),
        }
    }

    /// Number of bones covered
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Whether the set has no poses
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Pose of bone `index`
    pub fn get(&self, index: usize) -> Option<&Pose> {
        self.poses.get(index)
    }

    /// All poses in bone order
    pub fn as_slice(&self) -> &[Pose] {
        &self.poses
    }
}

impl Index<usize> for PoseSet {
    type Output = Pose;

    fn index(&self, index: usize) -> &Self::Output {
        &self.poses[index]
    }
}

/// Ordered, cyclic sequence of keyframe pose sets.
///
/// Frame `N - 1` is followed by frame `0`. Every pose set covers the same
/// number of bones, and there is at least one keyframe.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(try_from = "RawPoseTrack"))]
pub struct PoseTrack {
    frames: Vec<PoseSet>,
    bone_count: usize,
}

/// Unchecked serialized form, validated through [`PoseTrack::new`]
#[cfg(feature = "serde-support")]
#[derive(serde::Deserialize)]
struct RawPoseTrack {
    frames: Vec<PoseSet>,
    bone_count: usize,
}

#[cfg(feature = "serde-support")]
impl TryFrom<RawPoseTrack> for PoseTrack {
    type Error = AnimError;

    fn try_from(raw: RawPoseTrack) -> Result<Self> {
        Self::new(raw.frames, raw.bone_count)
    }
}

impl PoseTrack {
    /// Build a track, checking that all keyframes cover `bone_count` bones
    pub fn new(frames: Vec<PoseSet>, bone_count: usize) -> Result<Self> {
        if frames.is_empty() {
            return Err(AnimError::MalformedAsset(
                "pose track has no keyframes".to_string(),
            ));
        }

        if let Some((index, frame)) = frames
            .iter()
            .enumerate()
            .find(|(_, frame)| frame.len() != bone_count)
        {
            return Err(AnimError::MalformedAsset(format!(
                "keyframe {index} covers {} bones, skeleton has {bone_count}",
                frame.len()
            )));
        }

        Ok(Self { frames, bone_count })
    }

    /// Decode one keyframe file per entry of `files`
    pub fn load<'a, I>(files: I, bone_count: usize) -> Result<Self>
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let frames = files
            .into_iter()
            .map(|bytes| PoseSet::load(bytes, bone_count))
            .collect::<Result<Vec<_>>>()?;
        Self::new(frames, bone_count)
    }

    /// Number of keyframes, `N`
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Bones covered by every keyframe
    pub fn bone_count(&self) -> usize {
        self.bone_count
    }

    /// Keyframe by index, wrapped modulo `N`
    pub fn get(&self, frame: usize) -> &PoseSet {
        &self.frames[frame % self.frames.len()]
    }

    /// Keyframe by index without wrapping
    pub fn try_get(&self, frame: usize) -> Result<&PoseSet> {
        self.frames.get(frame).ok_or(AnimError::OutOfRangeFrame {
            frame,
            frame_count: self.frames.len(),
        })
    }

    /// Iterate over keyframes in order
    pub fn frames(&self) -> impl Iterator<Item = &PoseSet> {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn frame(bone_count: usize, x: f32) -> PoseSet {
        PoseSet::from_poses(vec![Pose::from_translation(Vec3::new(x, 0.0, 0.0)); bone_count])
    }

    #[test]
    fn test_get_wraps() {
        let track = PoseTrack::new(vec![frame(2, 0.0), frame(2, 1.0), frame(2, 2.0)], 2).unwrap();
        assert_eq!(track.frame_count(), 3);
        assert_eq!(track.get(1)[0].translation.x, 1.0);
        assert_eq!(track.get(3)[0].translation.x, 0.0);
        assert_eq!(track.get(8)[1].translation.x, 2.0);
    }

    #[test]
    fn test_try_get_is_bounds_checked() {
        let track = PoseTrack::new(vec![frame(1, 0.0)], 1).unwrap();
        assert!(track.try_get(0).is_ok());
        assert!(matches!(
            track.try_get(1),
            Err(AnimError::OutOfRangeFrame {
                frame: 1,
                frame_count: 1
            })
        ));
    }

    #[test]
    fn test_empty_track_rejected() {
        assert!(PoseTrack::new(Vec::new(), 3).unwrap_err().is_malformed());
    }

    #[test]
    fn test_bone_count_mismatch_rejected() {
        let result = PoseTrack::new(vec![frame(3, 0.0), frame(2, 0.0)], 3);
        assert!(result.unwrap_err().is_malformed());
    }

    #[test]
    fn test_load_from_bytes() {
        let a = frame(4, 1.0).to_file().to_bytes().unwrap();
        let b = frame(4, 2.0).to_file().to_bytes().unwrap();

        let track = PoseTrack::load([a.as_slice(), b.as_slice()], 4).unwrap();
        assert_eq!(track.frame_count(), 2);
        assert_eq!(track.bone_count(), 4);
        assert_eq!(track.get(1)[3].translation.x, 2.0);

        let err = PoseTrack::load([a.as_slice()], 5).unwrap_err();
        assert!(err.is_malformed());
    }

    #[cfg(feature = "serde-support")]
    #[test]
    fn test_deserialize_checks_track() {
        let empty = serde_json::from_str::<PoseTrack>(r#"{"frames":[],"bone_count":1}"#);
        assert!(empty.is_err());

        let track = PoseTrack::new(vec![frame(2, 1.0), frame(2, 2.0)], 2).unwrap();
        let json = serde_json::to_string(&track).unwrap();
        assert_eq!(serde_json::from_str::<PoseTrack>(&json).unwrap(), track);

        let mismatched = json.replace(r#""bone_count":2"#, r#""bone_count":3"#);
        assert!(serde_json::from_str::<PoseTrack>(&mismatched).is_err());
    }

    #[test]
    fn test_identity_set() {
        let set = PoseSet::identity(3);
        assert_eq!(set.len(), 3);
        assert!(set.as_slice().iter().all(|pose| *pose == Pose::IDENTITY));
    }
}
