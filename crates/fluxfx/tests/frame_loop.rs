//! Frame loop behavior against a recording surface.

use std::time::Duration;

use fluxfx::{FrameDriver, HostError, PreferenceStore, TickOutcome};
use fluxfx_core::{EffectMode, EngineConfig, Vec2};
use fluxfx_effects::{EffectEngine, ManualClock, PointerEvent};
use fluxfx_render::{DrawCommand, RecordingSurface, SurfaceError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const WIDTH: f32 = 400.0;
const HEIGHT: f32 = 800.0;

struct Rig {
    driver: FrameDriver<ChaCha8Rng>,
    clock: ManualClock,
    surface: RecordingSurface,
    preferences: PreferenceStore,
}

impl Rig {
    fn new(mode: &str) -> Self {
        let clock = ManualClock::starting_at(5_000);
        let engine = EffectEngine::with_parts(
            EngineConfig::default(),
            ChaCha8Rng::seed_from_u64(11),
            clock.clone(),
        );
        let preferences = PreferenceStore::new(Some(mode.to_owned()));
        let mut driver = FrameDriver::with_engine(engine, preferences.clone(), Duration::from_millis(16));
        driver.on_surface_changed(WIDTH, HEIGHT);
        Self {
            driver,
            clock,
            surface: RecordingSurface::new(WIDTH, HEIGHT),
            preferences,
        }
    }

    fn tick(&mut self) -> TickOutcome {
        self.clock.advance(16);
        self.driver.tick(&mut self.surface)
    }
}

#[test]
fn unknown_preference_starts_in_lightning() {
    let rig = Rig::new("PLASMA");
    assert_eq!(rig.driver.engine().mode(), EffectMode::Lightning);
}

#[test]
fn drawn_frame_updates_then_presents() {
    let mut rig = Rig::new("FIREWORK");
    rig.driver.pointer_sender().send(PointerEvent::down(200.0, 400.0));

    let outcome = rig.tick();
    let TickOutcome::Drawn(composited) = outcome else {
        panic!("expected a drawn frame, got {outcome:?}");
    };
    assert_eq!(composited.circles, 51 * 2);
    assert_eq!(rig.surface.presented(), 1);
    assert_eq!(rig.driver.engine().stats().ticks, 1);
    assert_eq!(
        rig.surface.recorder().commands().first(),
        Some(&DrawCommand::Clear {
            color: fluxfx_core::Color::BLACK
        })
    );
}

#[test]
fn unavailable_surface_skips_update_and_draw() {
    let mut rig = Rig::new("RIPPLE");
    rig.surface.set_available(false);

    assert_eq!(rig.tick(), TickOutcome::Skipped(SurfaceError::Unavailable));
    assert_eq!(rig.driver.engine().stats().ticks, 0);
    assert_eq!(rig.surface.presented(), 0);

    rig.surface.set_available(true);
    assert!(matches!(rig.tick(), TickOutcome::Drawn(_)));
    assert_eq!(rig.driver.engine().stats().ticks, 1);
    assert_eq!(rig.driver.stats().skipped_frames, 1);
    assert_eq!(rig.driver.stats().drawn_frames, 1);
}

#[test]
fn refused_lock_is_retried_next_tick() {
    let mut rig = Rig::new("RIPPLE");
    rig.surface.refuse_next_lock();
    assert_eq!(rig.tick(), TickOutcome::Skipped(SurfaceError::Lost));
    assert!(matches!(rig.tick(), TickOutcome::Drawn(_)));
}

#[test]
fn invisible_driver_pauses_simulation() {
    let mut rig = Rig::new("SCATTER_CONVERGE");
    let before = rig.driver.engine().store().len();
    rig.driver.set_visible(false);
    for _ in 0..10 {
        assert_eq!(rig.tick(), TickOutcome::Paused);
    }
    assert_eq!(rig.driver.engine().store().len(), before);
    assert_eq!(rig.driver.engine().stats().ticks, 0);

    rig.driver.set_visible(true);
    assert!(matches!(rig.tick(), TickOutcome::Drawn(_)));
}

#[test]
fn preference_change_switches_mode_on_next_tick() {
    let mut rig = Rig::new("FIREWORK");
    rig.tick();

    let settings_thread = rig.preferences.clone();
    std::thread::spawn(move || settings_thread.set_mode("GRID_WAVE"))
        .join()
        .unwrap();
    assert_eq!(rig.driver.engine().mode(), EffectMode::Firework);

    rig.tick();
    assert_eq!(rig.driver.engine().mode(), EffectMode::GridWave);
    assert_eq!(rig.driver.engine().store().len(), 200);
    assert_eq!(rig.driver.stats().mode_switches, 1);

    // Rewriting the same mode does not reset the field.
    rig.preferences.set_mode("GRID_WAVE");
    rig.tick();
    assert_eq!(rig.driver.stats().mode_switches, 1);
}

#[test]
fn events_reach_the_engine_in_order() {
    let mut rig = Rig::new("LIGHTNING");
    let input = rig.driver.pointer_sender();
    input.send(PointerEvent::down(50.0, 50.0));
    rig.tick();
    rig.clock.advance(60);
    input.send(PointerEvent::moved(250.0, 300.0));
    input.send(PointerEvent::up(250.0, 300.0));
    rig.tick();

    assert_eq!(rig.driver.stats().events, 3);
    // Seed, then one bolt for the press and one for the drag.
    assert_eq!(rig.driver.engine().stats().spawned, 41);
    assert!(rig.surface.recorder().bolts().count() >= 2);
}

#[test]
fn redraw_reports_missing_surface() {
    let mut rig = Rig::new("COMET");
    rig.surface.set_available(false);
    let err = rig.driver.redraw(&mut rig.surface).unwrap_err();
    assert!(matches!(err, HostError::Surface(SurfaceError::Unavailable)));

    rig.surface.set_available(true);
    assert!(rig.driver.redraw(&mut rig.surface).is_ok());
    assert_eq!(rig.driver.engine().stats().ticks, 0);
}

#[test]
fn ambient_field_spreads_once_the_surface_exists() {
    // The driver applies the mode before the first surface callback.
    let rig = Rig::new("VORTEX");
    let store = rig.driver.engine().store();
    assert_eq!(store.len(), 50);
    assert_eq!(store.iter().filter(|p| p.pos == Vec2::ZERO).count(), 0);
}

#[test]
fn press_after_preference_write_lands_in_new_mode() {
    let mut rig = Rig::new("LIGHTNING");
    rig.tick();

    rig.preferences.set_mode("RIPPLE");
    rig.driver.pointer_sender().send(PointerEvent::down(100.0, 100.0));
    rig.tick();

    assert_eq!(rig.driver.engine().mode(), EffectMode::Ripple);
    // Seed ring plus the tapped ring.
    assert_eq!(rig.driver.engine().store().len(), 2);
    assert!(rig
        .driver
        .engine()
        .store()
        .iter()
        .any(|p| p.pos == Vec2::new(100.0, 100.0)));
}
