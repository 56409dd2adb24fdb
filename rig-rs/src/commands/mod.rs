//! Command implementations

pub mod bind;
pub mod eval;
pub mod export;
pub mod info;
pub mod validate;

use anyhow::{Context, Result};
use rig_anim::RigAssets;

use crate::cli::AssetArgs;

/// Load every file of the asset directory, failing on the first problem
pub fn load_assets(args: &AssetArgs) -> Result<RigAssets> {
    RigAssets::load(&args.dir, &args.layout())
        .with_context(|| format!("Failed to load assets from {}", args.dir.display()))
}
