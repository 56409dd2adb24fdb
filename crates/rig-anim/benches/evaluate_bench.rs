use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::{Quat, Vec3};
use rig_anim::{
    Bone, MAX_BONES, Pose, PoseComposer, PoseSet, PoseTrack, Skeleton, TransformExporter,
    WorldPoses, evaluate,
};
use std::hint::black_box;

/// A humanoid-sized tree: every bone hangs off the one two places before it
fn create_rig(bone_count: usize, frame_count: usize) -> (Skeleton, PoseTrack) {
    let bones = (0..bone_count)
        .map(|i| Bone {
            parent: i.checked_sub(2).or(if i == 1 { Some(0) } else { None }),
            bind_offset: Vec3::Y,
            bind_rotation: Quat::IDENTITY,
        })
        .collect();
    let skeleton = Skeleton::from_bones(bones).unwrap();

    let frames = (0..frame_count)
        .map(|f| {
            PoseSet::from_poses(
                (0..bone_count)
                    .map(|i| {
                        Pose::new(
                            Quat::from_rotation_z((f * 7 + i) as f32 * 0.1),
                            1.0,
                            Vec3::new(0.0, 0.5 + f as f32 * 0.1, 0.0),
                        )
                    })
                    .collect(),
            )
        })
        .collect();
    let track = PoseTrack::new(frames, bone_count).unwrap();

    (skeleton, track)
}

fn evaluate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for bone_count in [8, 32, MAX_BONES] {
        let (skeleton, track) = create_rig(bone_count, 6);

        group.bench_with_input(
            BenchmarkId::new("allocating", bone_count),
            &bone_count,
            |b, _| b.iter(|| evaluate(&skeleton, &track, black_box(2.37))),
        );

        let composer = PoseComposer::new();
        let mut world = WorldPoses::with_capacity(bone_count);
        group.bench_with_input(
            BenchmarkId::new("reused_buffer", bone_count),
            &bone_count,
            |b, _| {
                b.iter(|| {
                    composer.evaluate_into(&skeleton, &track, black_box(2.37), &mut world);
                    black_box(world.len())
                })
            },
        );
    }

    group.finish();
}

fn export_benchmark(c: &mut Criterion) {
    let (skeleton, track) = create_rig(MAX_BONES, 6);
    let world = evaluate(&skeleton, &track, 1.5);
    let exporter = TransformExporter::<MAX_BONES>::new();

    c.bench_function("export_uniforms", |b| {
        b.iter(|| exporter.export(black_box(&world)).unwrap())
    });
}

criterion_group!(benches, evaluate_benchmark, export_benchmark);
criterion_main!(benches);
