use collabrx_scene::config::SceneConfig;
use collabrx_scene::core::{Frame, FrameLoop, Viewport};
use collabrx_scene::render::{Camera, Projector};
use collabrx_scene::scene::{Group, SceneComposer};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn composer() -> SceneComposer {
    SceneComposer::new(&SceneConfig::default().with_seed(42))
}

/// Benchmark: full scene update at a single time value
fn bench_composer_update(c: &mut Criterion) {
    let mut composer = composer();
    let mut t = 0.0f32;

    c.bench_function("composer_update", |b| {
        b.iter(|| {
            t += 1.0 / 60.0;
            black_box(composer.update(black_box(t)))
        })
    });
}

/// Benchmark: per-group updates, the unit the frame loop schedules
fn bench_group_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_update");
    let mut composer = composer();

    for target in [Group::Spheres, Group::Particles, Group::Helix, Group::Network] {
        group.bench_with_input(BenchmarkId::from_parameter(target.name()), &target, |b, &target| {
            b.iter(|| black_box(composer.update_group(target, black_box(2.5))))
        });
    }
    group.finish();
}

/// Benchmark: dispatch through the frame loop with the scene mounted
fn bench_frame_dispatch(c: &mut Criterion) {
    let mut frame_loop = FrameLoop::new();
    let mounted = composer().mount(&mut frame_loop);
    let mut number = 0u64;

    c.bench_function("frame_dispatch", |b| {
        b.iter(|| {
            number += 1;
            frame_loop.dispatch(black_box(&Frame::fixed_step(number, 60.0)));
        })
    });

    mounted.unmount(&mut frame_loop);
}

/// Benchmark: software projection and rasterization at common sizes
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(20);

    let mut composer = composer();
    composer.update(1.0);
    let projector = Projector::default();

    for (width, height) in [(320, 240), (800, 600)] {
        let camera = Camera::for_viewport(
            composer.environment().camera,
            &Viewport::new(width, height, 1.0),
        );
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &camera,
            |b, camera| b.iter(|| black_box(projector.render(&composer, camera))),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_composer_update,
    bench_group_update,
    bench_frame_dispatch,
    bench_render
);
criterion_main!(benches);
