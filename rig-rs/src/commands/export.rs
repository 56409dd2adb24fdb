//! Uniform array export at a point in time

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use rig_anim::{CapacityPolicy, MAX_BONES, TransformExporter, UniformArrays};

use crate::cli::AssetArgs;
use crate::commands::load_assets;
use crate::utils::{add_table_row, create_table};

#[derive(Serialize)]
struct UniformReport {
    time: f32,
    bone_count: usize,
    capacity: usize,
    rotations: Vec<[f32; 4]>,
    translations: Vec<[f32; 3]>,
    scales: Vec<f32>,
}

impl UniformReport {
    fn new(time: f32, arrays: &UniformArrays) -> Self {
        Self {
            time,
            bone_count: arrays.bone_count(),
            capacity: UniformArrays::<MAX_BONES>::CAPACITY,
            rotations: arrays.rotations().to_vec(),
            translations: arrays.translations().to_vec(),
            scales: arrays.scales().to_vec(),
        }
    }
}

pub fn execute(args: &AssetArgs, time: f32, truncate: bool, json: bool) -> Result<()> {
    let assets = load_assets(args)?;
    let world = assets.rig.evaluate(time);

    let policy = if truncate {
        CapacityPolicy::Truncate
    } else {
        CapacityPolicy::Reject
    };
    let exporter = TransformExporter::<MAX_BONES>::with_policy(policy);
    let arrays = exporter
        .export(&world)
        .context("Failed to export uniform arrays")?;

    if json {
        let report = UniformReport::new(time, &arrays);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", style("Uniform Arrays").bold().cyan());
    println!("{}", style("==============").cyan());
    println!(
        "{}: {} of {} slots written",
        style("Bones").bold(),
        arrays.bone_count(),
        exporter.capacity()
    );

    let mut table = create_table(&["Slot", "Rotation (w, x, y, z)", "Translation", "Scale"]);
    for slot in 0..arrays.bone_count() {
        let [w, x, y, z] = arrays.rotations()[slot];
        let [tx, ty, tz] = arrays.translations()[slot];
        add_table_row(
            &mut table,
            vec![
                slot.to_string(),
                format!("[{w:.4}, {x:.4}, {y:.4}, {z:.4}]"),
                format!("({tx:.4}, {ty:.4}, {tz:.4})"),
                format!("{:.4}", arrays.scales()[slot]),
            ],
        );
    }
    table.printstd();

    let padding = exporter.capacity() - arrays.bone_count();
    if padding > 0 {
        println!("{padding} remaining slots hold the identity pose");
    }

    Ok(())
}
