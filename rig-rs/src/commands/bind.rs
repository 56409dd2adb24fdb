//! Rest-pose world transforms

use anyhow::Result;
use console::style;

use crate::cli::AssetArgs;
use crate::commands::load_assets;
use crate::utils::{add_table_row, create_table, format_parent, format_quat, format_vec3};

pub fn execute(args: &AssetArgs) -> Result<()> {
    let assets = load_assets(args)?;
    let skeleton = assets.skeleton();
    let bind = skeleton.bind_pose();

    println!("{}", style("Bind Pose").bold().cyan());
    println!("{}", style("=========").cyan());

    let mut table = create_table(&["Bone", "Parent", "Rotation (w, x, y, z)", "Position"]);
    for (index, (bone, pose)) in skeleton.bones().iter().zip(bind.iter()).enumerate() {
        add_table_row(
            &mut table,
            vec![
                index.to_string(),
                format_parent(bone.parent),
                format_quat(pose.rotation),
                format_vec3(pose.translation),
            ],
        );
    }
    table.printstd();

    Ok(())
}
