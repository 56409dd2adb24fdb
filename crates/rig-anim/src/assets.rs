//! Loading a character's mesh, skeleton and keyframes from a directory

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use rig_format::{FormatError, MeshFile, validation::validate_mesh};

use crate::composer::Rig;
use crate::error::{AnimError, Result};
use crate::skeleton::Skeleton;
use crate::track::{DEFAULT_KEYFRAME_COUNT, PoseSet, PoseTrack};

/// File names of an asset directory
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetLayout {
    /// Mesh file name
    pub mesh_file: String,
    /// Skeleton file name
    pub skeleton_file: String,
    /// Keyframe file name before the keyframe index
    pub pose_prefix: String,
    /// Keyframe file name after the keyframe index
    pub pose_suffix: String,
    /// Number of keyframe files, `N`
    pub keyframe_count: usize,
}

impl Default for AssetLayout {
    fn default() -> Self {
        Self {
            mesh_file: "human.bin".to_string(),
            skeleton_file: "bones.bin".to_string(),
            pose_prefix: "pose_".to_string(),
            pose_suffix: ".bin".to_string(),
            keyframe_count: DEFAULT_KEYFRAME_COUNT,
        }
    }
}

impl AssetLayout {
    /// Set the mesh file name
    pub fn with_mesh_file(mut self, name: impl Into<String>) -> Self {
        self.mesh_file = name.into();
        self
    }

    /// Set the skeleton file name
    pub fn with_skeleton_file(mut self, name: impl Into<String>) -> Self {
        self.skeleton_file = name.into();
        self
    }

    /// Set the keyframe file name pattern, `{prefix}{index}{suffix}`
    pub fn with_pose_pattern(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.pose_prefix = prefix.into();
        self.pose_suffix = suffix.into();
        self
    }

    /// Set the number of keyframes
    pub fn with_keyframe_count(mut self, count: usize) -> Self {
        self.keyframe_count = count;
        self
    }

    /// File name of keyframe `index`
    pub fn pose_file_name(&self, index: usize) -> String {
        format!("{}{index}{}", self.pose_prefix, self.pose_suffix)
    }

    /// Path of the mesh file under `dir`
    pub fn mesh_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.mesh_file)
    }

    /// Path of the skeleton file under `dir`
    pub fn skeleton_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.skeleton_file)
    }

    /// Paths of all keyframe files under `dir`, in keyframe order
    pub fn pose_paths(&self, dir: &Path) -> Vec<PathBuf> {
        (0..self.keyframe_count)
            .map(|index| dir.join(self.pose_file_name(index)))
            .collect()
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|err| AnimError::File {
        path: path.to_path_buf(),
        source: FormatError::from(err),
    })
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).map_err(|err| AnimError::File {
        path: path.to_path_buf(),
        source: FormatError::from(err),
    })
}

/// Attach `path` to codec errors
fn at_path(path: &Path) -> impl Fn(AnimError) -> AnimError + '_ {
    move |err| match err {
        AnimError::Format(source) => AnimError::File {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    }
}

/// Everything needed to animate and draw one character
#[derive(Debug, Clone, PartialEq)]
pub struct RigAssets {
    /// Skinned mesh
    pub mesh: MeshFile,
    /// Skeleton and keyframe track
    pub rig: Rig,
}

impl RigAssets {
    /// Load and validate every file named by `layout` under `dir`.
    ///
    /// Any missing, truncated or inconsistent file fails the whole load.
    pub fn load(dir: impl AsRef<Path>, layout: &AssetLayout) -> Result<Self> {
        let dir = dir.as_ref();
        debug!("Loading assets from {}", dir.display());

        let skeleton_path = layout.skeleton_path(dir);
        let skeleton =
            Skeleton::load(&read_file(&skeleton_path)?).map_err(at_path(&skeleton_path))?;
        let bone_count = skeleton.bone_count();

        let mesh_path = layout.mesh_path(dir);
        let mesh = MeshFile::from_bytes(&read_file(&mesh_path)?)
            .and_then(|mesh| validate_mesh(&mesh, bone_count).map(|()| mesh))
            .map_err(|source| AnimError::File {
                path: mesh_path.clone(),
                source,
            })?;

        let frames = layout
            .pose_paths(dir)
            .iter()
            .map(|path| PoseSet::load(&read_file(path)?, bone_count).map_err(at_path(path)))
            .collect::<Result<Vec<_>>>()?;
        let track = PoseTrack::new(frames, bone_count)?;
        let rig = Rig::new(skeleton, track)?;

        info!(
            "Loaded {} vertices, {} indices, {} bones, {} keyframes",
            mesh.vertices.len(),
            mesh.indices.len(),
            bone_count,
            rig.track().frame_count()
        );

        Ok(Self { mesh, rig })
    }

    /// Write every file named by `layout` into `dir`, which must exist.
    ///
    /// Writes `track.frame_count()` keyframe files regardless of
    /// `layout.keyframe_count`.
    pub fn save(&self, dir: impl AsRef<Path>, layout: &AssetLayout) -> Result<()> {
        let dir = dir.as_ref();

        write_file(&layout.mesh_path(dir), &self.mesh.to_bytes()?)?;
        write_file(
            &layout.skeleton_path(dir),
            &self.rig.skeleton().to_file().to_bytes()?,
        )?;
        for (index, frame) in self.rig.track().frames().enumerate() {
            write_file(
                &dir.join(layout.pose_file_name(index)),
                &frame.to_file().to_bytes()?,
            )?;
        }

        debug!("Saved assets to {}", dir.display());
        Ok(())
    }

    /// The bone hierarchy
    pub fn skeleton(&self) -> &Skeleton {
        self.rig.skeleton()
    }

    /// The keyframe track
    pub fn track(&self) -> &PoseTrack {
        self.rig.track()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = AssetLayout::default();
        assert_eq!(layout.mesh_file, "human.bin");
        assert_eq!(layout.skeleton_file, "bones.bin");
        assert_eq!(layout.pose_file_name(3), "pose_3.bin");
        assert_eq!(layout.pose_paths(Path::new("assets")).len(), 6);
    }

    #[test]
    fn test_layout_builders() {
        let layout = AssetLayout::default()
            .with_mesh_file("body.mesh")
            .with_skeleton_file("rig.skel")
            .with_pose_pattern("key", ".pose")
            .with_keyframe_count(2);

        assert_eq!(layout.mesh_path(Path::new("a")), Path::new("a/body.mesh"));
        assert_eq!(layout.skeleton_path(Path::new("a")), Path::new("a/rig.skel"));
        assert_eq!(
            layout.pose_paths(Path::new("a")),
            vec![PathBuf::from("a/key0.pose"), PathBuf::from("a/key1.pose")]
        );
    }

    #[test]
    fn test_missing_directory_reports_path() {
        let err = RigAssets::load("/nonexistent/rig-assets", &AssetLayout::default()).unwrap_err();
        match err {
            AnimError::File { path, source } => {
                assert!(path.ends_with("bones.bin"));
                assert!(matches!(source, FormatError::Io(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
