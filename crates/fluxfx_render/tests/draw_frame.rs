//! Drawing engine frames into the recording and instance backends.

use fluxfx_core::{Color, EffectMode, EngineConfig, Particle};
use fluxfx_effects::{EffectEngine, ManualClock, PointerEvent};
use fluxfx_render::{
    draw_frame, CommandRecorder, Compositor, DrawCommand, InstanceBuilder, PaintStyle,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn engine(mode: EffectMode, seed: u64) -> (EffectEngine<ChaCha8Rng>, ManualClock) {
    let clock = ManualClock::starting_at(1_000);
    let mut engine = EffectEngine::with_parts(
        EngineConfig::default(),
        ChaCha8Rng::seed_from_u64(seed),
        clock.clone(),
    );
    engine.set_dimensions(400.0, 800.0);
    engine.set_effect_mode(mode);
    (engine, clock)
}

fn send(engine: &mut EffectEngine<ChaCha8Rng>, clock: &ManualClock, event: PointerEvent) {
    clock.advance(60);
    engine.handle_input(event);
}

fn record(engine: &mut EffectEngine<ChaCha8Rng>) -> CommandRecorder {
    let mut recorder = CommandRecorder::new();
    recorder.begin_frame();
    draw_frame(engine, &mut recorder);
    recorder
}

#[test]
fn frame_starts_with_black_clear() {
    let (mut engine, _) = engine(EffectMode::Firework, 1);
    let recorder = record(&mut engine);
    assert_eq!(
        recorder.commands().first(),
        Some(&DrawCommand::Clear {
            color: Color::BLACK
        })
    );
}

#[test]
fn lone_lightning_seed_draws_nothing() {
    let (mut engine, _) = engine(EffectMode::Lightning, 2);
    assert_eq!(engine.store().len(), 1);

    let recorder = record(&mut engine);
    assert_eq!(recorder.command_count(), 1);
    assert_eq!(recorder.bolts().count(), 0);
}

#[test]
fn firework_discs_draw_glow_then_solid() {
    let (mut engine, clock) = engine(EffectMode::Firework, 3);
    send(&mut engine, &clock, PointerEvent::down(200.0, 400.0));
    let live = engine.store().len();

    let recorder = record(&mut engine);
    let circles: Vec<_> = recorder.circles().collect();
    assert_eq!(circles.len(), live * 2);

    for pair in circles.chunks(2) {
        let (glow_center, glow_radius, glow) = pair[0];
        let (center, radius, solid) = pair[1];
        assert_eq!(glow_center, center);
        assert!((glow_radius - radius * 3.0).abs() < 1e-4);
        assert_eq!(glow.blur, 8.0);
        assert_eq!(solid.blur, 0.0);
        assert_eq!(glow.color.a, (f32::from(solid.color.a) * 0.5) as u8);
        assert_eq!(solid.style, PaintStyle::Fill);
    }
}

#[test]
fn ripple_halo_is_padded() {
    let (mut engine, clock) = engine(EffectMode::Ripple, 4);
    send(&mut engine, &clock, PointerEvent::down(100.0, 100.0));

    let recorder = record(&mut engine);
    let circles: Vec<_> = recorder.circles().collect();
    assert!(!circles.is_empty());
    for pair in circles.chunks(2) {
        assert!((pair[0].1 - (pair[1].1 + 8.0)).abs() < 1e-4);
    }
}

#[test]
fn lightning_bolt_strokes_glow_then_solid() {
    let (mut engine, clock) = engine(EffectMode::Lightning, 5);
    send(&mut engine, &clock, PointerEvent::down(50.0, 50.0));
    send(&mut engine, &clock, PointerEvent::moved(250.0, 300.0));

    let recorder = record(&mut engine);
    let bolts: Vec<_> = recorder.bolts().collect();
    assert!(!bolts.is_empty());
    assert_eq!(bolts.len() % 2, 0);

    for pair in bolts.chunks(2) {
        let (glow_path, glow) = pair[0];
        let (solid_path, solid) = pair[1];
        assert_eq!(glow_path, solid_path);
        assert_eq!(glow.color.a, 100);
        assert_eq!(glow.blur, 8.0);
        assert_eq!(glow.stroke_width(), 10.0);
        assert_eq!(solid.blur, 0.0);
        assert_eq!(solid.stroke_width(), 10.0);
        assert!(glow.footprint() > solid.footprint());
        assert_eq!(solid.color.with_alpha(100), glow.color);
    }
}

#[test]
fn drawing_leaves_particles_untouched() {
    let (mut engine, clock) = engine(EffectMode::Lightning, 6);
    send(&mut engine, &clock, PointerEvent::down(50.0, 50.0));
    send(&mut engine, &clock, PointerEvent::moved(300.0, 500.0));

    let before: Vec<Particle> = engine.store().iter().copied().collect();
    let _ = record(&mut engine);
    let _ = record(&mut engine);
    let after: Vec<Particle> = engine.store().iter().copied().collect();
    assert_eq!(before, after);
}

#[test]
fn instance_builder_matches_recorder() {
    let (mut engine, clock) = engine(EffectMode::Comet, 7);
    send(&mut engine, &clock, PointerEvent::down(200.0, 200.0));
    send(&mut engine, &clock, PointerEvent::moved(260.0, 240.0));

    let mut builder = InstanceBuilder::new();
    let stats = draw_frame(&mut engine, &mut builder);
    assert_eq!(builder.circles().len(), stats.circles);
    assert_eq!(builder.circle_bytes().len(), stats.circles * 32);

    let recorder = record(&mut engine);
    assert_eq!(recorder.circles().count(), stats.circles);
}

#[test]
fn compositor_is_object_safe() {
    let (mut engine, clock) = engine(EffectMode::Sparkle, 8);
    send(&mut engine, &clock, PointerEvent::down(200.0, 200.0));

    let mut recorder = CommandRecorder::new();
    let target: &mut dyn Compositor = &mut recorder;
    let stats = draw_frame(&mut engine, target);
    assert_eq!(stats.primitives() + 1, recorder.command_count());
}
