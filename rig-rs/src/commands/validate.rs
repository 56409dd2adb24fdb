//! Asset directory validation

use anyhow::Result;
use console::style;
use log::warn;
use rig_anim::MAX_BONES;

use crate::cli::AssetArgs;
use crate::commands::load_assets;

pub fn execute(args: &AssetArgs) -> Result<()> {
    println!("{}", style("Validating Rig Assets").bold().cyan());
    println!("{}", style("=====================").cyan());

    // Loading runs every structural check and fails on the first error
    let assets = load_assets(args)?;
    let bone_count = assets.skeleton().bone_count();

    let mut warnings = Vec::new();
    if bone_count > MAX_BONES {
        warnings.push(format!(
            "{bone_count} bones exceed the {MAX_BONES} uniform slots; export needs --truncate"
        ));
    }

    let overweight = assets
        .mesh
        .vertices
        .iter()
        .filter(|vertex| vertex.weight_sum() > 255)
        .count();
    if overweight > 0 {
        warnings.push(format!("{overweight} vertices have weights summing above 1.0"));
    }

    let unweighted = assets
        .mesh
        .vertices
        .iter()
        .filter(|vertex| vertex.weight_sum() == 0)
        .count();
    if unweighted > 0 {
        warnings.push(format!("{unweighted} vertices have no bone weight and collapse to the origin"));
    }

    for message in &warnings {
        warn!("{message}");
        println!("{} {}", style("!").yellow(), message);
    }

    println!(
        "{} Assets in '{}' are valid ({} vertices, {} bones, {} keyframes)",
        style("✓").green(),
        style(args.dir.display()).cyan(),
        assets.mesh.vertices.len(),
        bone_count,
        assets.track().frame_count()
    );

    Ok(())
}
