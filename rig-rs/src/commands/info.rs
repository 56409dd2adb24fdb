//! Asset directory summary

use anyhow::Result;
use console::style;

use crate::cli::AssetArgs;
use crate::commands::load_assets;
use crate::utils::{add_table_row, create_table, format_parent, format_quat, format_vec3};

pub fn execute(args: &AssetArgs) -> Result<()> {
    let assets = load_assets(args)?;
    let skeleton = assets.skeleton();
    let mesh = &assets.mesh;

    println!("{}", style("Rig Information").bold().cyan());
    println!("{}", style("===============").cyan());
    println!();
    println!("{}: {}", style("Directory").bold(), args.dir.display());
    println!("{}: {}", style("Vertices").bold(), mesh.vertices.len());
    println!(
        "{}: {} ({} triangles)",
        style("Indices").bold(),
        mesh.indices.len(),
        mesh.triangle_count()
    );
    println!("{}: {}", style("Bones").bold(), skeleton.bone_count());
    println!(
        "{}: {}",
        style("Roots").bold(),
        skeleton
            .roots()
            .map(|root| root.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("{}: {}", style("Max depth").bold(), skeleton.max_depth());
    println!("{}: {}", style("Keyframes").bold(), assets.track().frame_count());

    if let Some(bounds) = mesh.bounds() {
        println!(
            "{}: {} to {}",
            style("Bounds").bold(),
            format_vec3(bounds.min),
            format_vec3(bounds.max)
        );
        println!("{}: {}", style("Size").bold(), format_vec3(bounds.size()));
    }

    println!();
    println!("{}", style("Bones:").bold());

    let depths = skeleton.depths();
    let mut table = create_table(&["Bone", "Parent", "Depth", "Children", "Bind offset", "Bind rotation"]);
    for (index, bone) in skeleton.bones().iter().enumerate() {
        add_table_row(
            &mut table,
            vec![
                index.to_string(),
                format_parent(bone.parent),
                depths[index].to_string(),
                skeleton.children(index).count().to_string(),
                format_vec3(bone.bind_offset),
                format_quat(bone.bind_rotation),
            ],
        );
    }
    table.printstd();

    Ok(())
}
