//! Benchmarks for positional lookup and grouping.
//!
//! Run with: cargo bench -p montage-timeline

use std::collections::HashSet;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use montage_core::TimeRange;
use montage_timeline::{Clip, ClipType, Project, Track};
use uuid::Uuid;

fn long_track(clips: usize) -> Track {
    let mut track = Track::new_video("Bench");
    for i in 0..clips {
        let duration = 1.0 + (i % 7) as f64;
        track.add_clip(Clip::new(ClipType::Video, TimeRange::new(0.0, duration)));
    }
    track
}

fn bench_clip_at(c: &mut Criterion) {
    let track = long_track(1_000);
    let end = track.total_duration();

    c.bench_function("clip_at_1000_start", |bencher| {
        bencher.iter(|| track.clip_at(black_box(0.5)));
    });

    c.bench_function("clip_at_1000_end", |bencher| {
        bencher.iter(|| track.clip_at(black_box(end - 0.5)));
    });
}

fn bench_group_ungroup(c: &mut Criterion) {
    let track = long_track(1_000);
    let ids: HashSet<Uuid> = track.clips[100..200].iter().map(|clip| clip.id).collect();

    c.bench_function("group_ungroup_100_of_1000", |bencher| {
        bencher.iter_batched(
            || track.clone(),
            |mut track| {
                let compound = track.group_clips(black_box(&ids)).map(|clip| clip.id);
                if let Some(id) = compound {
                    track.ungroup_compound_clip(id);
                }
                track
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_serialize(c: &mut Criterion) {
    let mut project = Project::new("Bench");
    for _ in 0..4 {
        project.add_track(long_track(250));
    }

    c.bench_function("project_to_json_1000_clips", |bencher| {
        bencher.iter(|| black_box(&project).to_json());
    });
}

criterion_group!(benches, bench_clip_at, bench_group_ungroup, bench_serialize);
criterion_main!(benches);
