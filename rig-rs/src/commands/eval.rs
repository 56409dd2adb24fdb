//! World pose evaluation at a point in time

use anyhow::Result;
use console::style;
use serde::Serialize;

use rig_anim::{KeyframeSample, Pose, PoseComposer, RootBlend, WorldPoses};

use crate::cli::AssetArgs;
use crate::commands::load_assets;
use crate::utils::{add_table_row, create_table, format_parent, format_quat, format_vec3};

#[derive(Serialize)]
struct EvalReport {
    time: f32,
    sample: KeyframeSample,
    root_blend: RootBlend,
    bones: Vec<BoneReport>,
}

#[derive(Serialize)]
struct BoneReport {
    index: usize,
    parent: Option<usize>,
    pose: Pose,
}

pub fn execute(args: &AssetArgs, time: f32, blend_roots: bool, json: bool) -> Result<()> {
    let assets = load_assets(args)?;

    let root_blend = if blend_roots {
        RootBlend::Blend
    } else {
        RootBlend::Snap
    };
    let composer = PoseComposer::new().with_root_blend(root_blend);

    let mut world = WorldPoses::with_capacity(assets.rig.bone_count());
    assets.rig.evaluate_with(&composer, time, &mut world);
    let sample = KeyframeSample::at(time, assets.track().frame_count());

    if json {
        let report = EvalReport {
            time,
            sample,
            root_blend,
            bones: assets
                .skeleton()
                .bones()
                .iter()
                .zip(world.iter())
                .enumerate()
                .map(|(index, (bone, pose))| BoneReport {
                    index,
                    parent: bone.parent,
                    pose: *pose,
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", style("World Poses").bold().cyan());
    println!("{}", style("===========").cyan());
    println!(
        "{}: {} (keyframe {} -> {}, t = {:.4}, blend = {:.4})",
        style("Time").bold(),
        time,
        sample.frame,
        sample.next_frame,
        sample.t,
        sample.blend
    );

    let mut table = create_table(&["Bone", "Parent", "Rotation (w, x, y, z)", "Scale", "Translation"]);
    for (index, (bone, pose)) in assets.skeleton().bones().iter().zip(world.iter()).enumerate() {
        add_table_row(
            &mut table,
            vec![
                index.to_string(),
                format_parent(bone.parent),
                format_quat(pose.rotation),
                format!("{:.4}", pose.scale),
                format_vec3(pose.translation),
            ],
        );
    }
    table.printstd();

    Ok(())
}
