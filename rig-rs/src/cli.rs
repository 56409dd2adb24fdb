//! Root CLI structure for rig-rs

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rig_anim::{AssetLayout, DEFAULT_KEYFRAME_COUNT};

#[derive(Parser)]
#[command(name = "rig-rs")]
#[command(about = "Inspect and evaluate skinned character rigs", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Asset directory and the names of the files inside it
#[derive(Args, Debug, Clone)]
pub struct AssetArgs {
    /// Directory holding the mesh, skeleton and keyframe files
    #[arg(short, long, env = "RIG_ASSETS", value_name = "DIR")]
    pub dir: PathBuf,

    /// Number of keyframe files (pose_0.bin, pose_1.bin, ...)
    #[arg(long, default_value_t = DEFAULT_KEYFRAME_COUNT, value_name = "N")]
    pub keyframes: usize,

    /// Mesh file name
    #[arg(long, default_value = "human.bin", value_name = "NAME")]
    pub mesh: String,

    /// Skeleton file name
    #[arg(long, default_value = "bones.bin", value_name = "NAME")]
    pub skeleton: String,
}

impl AssetArgs {
    /// File layout described by these arguments
    pub fn layout(&self) -> AssetLayout {
        AssetLayout::default()
            .with_mesh_file(&self.mesh)
            .with_skeleton_file(&self.skeleton)
            .with_keyframe_count(self.keyframes)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display counts, hierarchy and mesh bounds of an asset directory
    Info {
        #[command(flatten)]
        assets: AssetArgs,
    },

    /// Load and validate every file of an asset directory
    Validate {
        #[command(flatten)]
        assets: AssetArgs,
    },

    /// Evaluate world poses at an animation time
    Eval {
        #[command(flatten)]
        assets: AssetArgs,

        /// Animation time in seconds, one keyframe per second
        #[arg(allow_negative_numbers = true)]
        time: f32,

        /// Blend root bones between keyframes instead of snapping
        #[arg(long)]
        blend_roots: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Evaluate and flatten world poses into shader uniform arrays
    Export {
        #[command(flatten)]
        assets: AssetArgs,

        /// Animation time in seconds, one keyframe per second
        #[arg(allow_negative_numbers = true)]
        time: f32,

        /// Drop bones past the uniform capacity instead of failing
        #[arg(long)]
        truncate: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Display rest-pose world transforms
    Bind {
        #[command(flatten)]
        assets: AssetArgs,
    },
}
