//! Benchmark for a full-capacity frame.
//!
//! TARGET: update + batch preparation well under 1 ms at 200 particles
//!
//! Run with: cargo bench --package fluxfx_effects --bench tick_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fluxfx_core::{EffectMode, EngineConfig, Vec2};
use fluxfx_effects::{EffectEngine, LightningPath, ManualClock, PointerEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn loaded_engine(mode: EffectMode) -> (EffectEngine<ChaCha8Rng>, ManualClock) {
    let clock = ManualClock::starting_at(0);
    let mut engine = EffectEngine::with_parts(
        EngineConfig::default(),
        ChaCha8Rng::seed_from_u64(0xF1F1),
        clock.clone(),
    );
    engine.set_dimensions(1080.0, 1920.0);
    engine.set_effect_mode(mode);
    for i in 0..4 {
        clock.advance(60);
        engine.handle_input(PointerEvent::down(200.0 + i as f32 * 150.0, 900.0));
    }
    (engine, clock)
}

fn benchmark_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");
    group.throughput(Throughput::Elements(200));

    for mode in [
        EffectMode::Firework,
        EffectMode::Vortex,
        EffectMode::GridWave,
        EffectMode::Fire,
        EffectMode::Lightning,
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(mode), &mode, |b, &mode| {
            let (mut engine, clock) = loaded_engine(mode);
            b.iter(|| {
                clock.advance(16);
                engine.update();
                black_box(engine.prepare_draw_batches());
                // Keep the pool full so every iteration measures the same load.
                if engine.store().len() < 150 {
                    clock.advance(60);
                    engine.handle_input(PointerEvent::down(540.0, 960.0));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_lightning_path(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    c.bench_function("lightning_path_depth_8", |b| {
        b.iter(|| {
            let path = LightningPath::generate(
                black_box(Vec2::new(10.0, 10.0)),
                black_box(Vec2::new(900.0, 1500.0)),
                8,
                &mut rng,
            );
            black_box(path.resample(20))
        });
    });
}

criterion_group!(benches, benchmark_frame, benchmark_lightning_path);
criterion_main!(benches);
