//! # Effect Engine
//!
//! Owns the particle store and applies one effect mode's rules to it.
//!
//! ## Call Protocol
//!
//! The host serializes every call. Per frame it delivers pointer events via
//! [`EffectEngine::handle_input`], then calls [`EffectEngine::update`] once,
//! then asks for [`EffectEngine::prepare_draw_batches`]. Mode switches and
//! resizes may arrive between frames.
//!
//! ## Rate Limits
//!
//! - Down and move events closer than `input_debounce_ms` to the last
//!   accepted one are dropped. Up events are never debounced.
//! - Ambient modes replenish at most once per `ambient_interval_ms`.

use fluxfx_core::{Color, EffectMode, EngineConfig, Particle, ParticleStore, Vec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace, warn};

use crate::clock::{Clock, Gate, SystemClock};
use crate::input::{PointerEvent, PointerPhase};
use crate::physics::{self, Bounds};
use crate::tables::{self, Population, Replenish};

/// Engine counters, refreshed every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Live particles.
    pub live: usize,
    /// Particles inserted since creation.
    pub spawned: u64,
    /// Particles evicted for capacity since creation.
    pub evicted: u64,
    /// Particles removed by the last tick.
    pub removed_last_tick: usize,
    /// Id the next burst will carry.
    pub next_batch: u32,
    /// Ticks run.
    pub ticks: u64,
    /// Pointer events dropped by the debounce.
    pub debounced: u64,
}

/// The particle effects engine.
///
/// Generic over its random source so tests can seed it; production code
/// uses the [`ChaCha8Rng`] default.
pub struct EffectEngine<R: Rng = ChaCha8Rng> {
    pub(crate) config: EngineConfig,
    pub(crate) store: ParticleStore,
    pub(crate) rng: R,
    clock: Box<dyn Clock>,
    pub(crate) width: f32,
    pub(crate) height: f32,
    last_pointer: Vec2,
    input_gate: Gate,
    ambient_gate: Gate,
    next_batch: u32,
    ticks: u64,
    removed_last_tick: usize,
    debounced: u64,
}

impl EffectEngine<ChaCha8Rng> {
    /// Creates an engine seeded from OS entropy, on the system clock.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_parts(config, ChaCha8Rng::from_entropy(), SystemClock::new())
    }

    /// Creates a deterministic engine on the system clock.
    #[must_use]
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self::with_parts(config, ChaCha8Rng::seed_from_u64(seed), SystemClock::new())
    }
}

impl<R: Rng> EffectEngine<R> {
    /// Creates an engine from explicit parts.
    ///
    /// The store starts empty in [`EffectMode::DEFAULT`] with unset
    /// dimensions; call [`Self::set_dimensions`] and [`Self::set_effect_mode`]
    /// before the first frame.
    pub fn with_parts(config: EngineConfig, rng: R, clock: impl Clock + 'static) -> Self {
        let capacity = config.max_particles.max(1);
        Self {
            input_gate: Gate::new(config.input_debounce_ms),
            ambient_gate: Gate::new(config.ambient_interval_ms),
            store: ParticleStore::new(capacity, EffectMode::DEFAULT),
            config,
            rng,
            clock: Box::new(clock),
            width: 0.0,
            height: 0.0,
            last_pointer: Vec2::ZERO,
            next_batch: 0,
            ticks: 0,
            removed_last_tick: 0,
            debounced: 0,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Active mode.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> EffectMode {
        self.store.mode()
    }

    /// Read-only view of the particles.
    #[inline]
    #[must_use]
    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    /// Engine tuning.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Canvas size, `(0, 0)` until set.
    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> EngineStats {
        let store = self.store.stats();
        EngineStats {
            live: self.store.len(),
            spawned: store.spawned,
            evicted: store.evicted,
            removed_last_tick: self.removed_last_tick,
            next_batch: self.next_batch,
            ticks: self.ticks,
            debounced: self.debounced,
        }
    }

    // ------------------------------------------------------------------
    // Host entry points
    // ------------------------------------------------------------------

    /// Sets the canvas size.
    ///
    /// Ambient fields (scatter, vortex, wave, grid, fire) are rebuilt for the
    /// new size; other modes keep their particles.
    pub fn set_dimensions(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        info!(width, height, mode = %self.mode(), "Canvas dimensions set");

        if self.bounds().is_none() {
            warn!(width, height, "Non-positive canvas dimensions; boundary rule disabled");
        }

        if tables::traits(self.mode()).population.needs_dimensions() {
            self.store.clear();
            self.populate();
        }
    }

    /// Switches mode, discarding every particle and populating the new mode.
    pub fn set_effect_mode(&mut self, mode: EffectMode) {
        let previous = self.store.mode();
        self.store.set_mode(mode);
        self.populate();
        info!(from = %previous, to = %mode, live = self.store.len(), "Effect mode switched");
    }

    /// Applies one pointer event.
    pub fn handle_input(&mut self, event: PointerEvent) {
        let pos = event.pos;
        match event.phase {
            PointerPhase::Down => {
                self.last_pointer = pos;
                if !self.accept_input() {
                    return;
                }
                self.on_pointer_down(pos);
            }
            PointerPhase::Move => {
                if !self.accept_input() {
                    return;
                }
                let from = self.last_pointer;
                self.on_pointer_move(from, pos);
                self.last_pointer = pos;
            }
            PointerPhase::Up => self.on_pointer_up(),
        }
    }

    /// Advances the simulation one tick.
    pub fn update(&mut self) {
        if let Some(replenish) = tables::traits(self.mode()).replenish {
            let now = self.clock.now_ms();
            if self.ambient_gate.try_pass(now) {
                let count = self.config.ambient_batch;
                match replenish {
                    Replenish::Scattered => self.spawn_scattered(count),
                    Replenish::Flames => self.spawn_flames(count),
                }
            }
        }

        let bounds = self.bounds();
        let particles = self.store.as_mut_slice();
        for index in 0..particles.len() {
            physics::advance(&mut particles[index], &mut self.rng);
            physics::propagate_tint(particles, index);
            if let Some(bounds) = bounds {
                physics::reflect(&mut particles[index], bounds);
            }
        }

        let height = self.height;
        self.removed_last_tick = self.store.remove_if(|p| physics::is_spent(p, height));
        self.ticks += 1;
        trace!(
            tick = self.ticks,
            live = self.store.len(),
            removed = self.removed_last_tick,
            "Tick"
        );
    }

    // ------------------------------------------------------------------
    // Internals shared by the behavior modules
    // ------------------------------------------------------------------

    /// Canvas bounds, or `None` while either extent is non-positive.
    pub(crate) fn bounds(&self) -> Option<Bounds> {
        (self.width > 0.0 && self.height > 0.0).then_some(Bounds {
            width: self.width,
            height: self.height,
        })
    }

    /// Canvas center.
    pub(crate) fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Uniform sample in `[lo, hi)`.
    pub(crate) fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.rng.gen::<f32>() * (hi - lo)
    }

    /// Random angle in `[0, 2π)`.
    pub(crate) fn random_angle(&mut self) -> f32 {
        self.uniform(0.0, std::f32::consts::TAU)
    }

    /// Random neon color.
    pub(crate) fn neon(&mut self) -> Color {
        fluxfx_core::color::pick(&fluxfx_core::NEON_PALETTE, &mut self.rng)
    }

    /// Random fire color.
    pub(crate) fn flame_color(&mut self) -> Color {
        fluxfx_core::color::pick(&fluxfx_core::FIRE_PALETTE, &mut self.rng)
    }

    /// Claims the next burst id.
    pub(crate) fn claim_batch(&mut self) -> u32 {
        let id = self.next_batch;
        self.next_batch = self.next_batch.wrapping_add(1);
        id
    }

    /// Inserts a burst, tagging it with a fresh batch id.
    pub(crate) fn emit(&mut self, burst: Vec<Particle>) {
        if burst.is_empty() {
            return;
        }
        let batch = self.claim_batch();
        let count = burst.len();
        let evicted = self
            .store
            .spawn_batch(burst.into_iter().map(|p| p.with_batch(batch)).collect::<Vec<_>>());
        debug!(mode = %self.mode(), count, batch, evicted, "Burst spawned");
    }

    fn accept_input(&mut self) -> bool {
        let now = self.clock.now_ms();
        let accepted = self.input_gate.try_pass(now);
        if !accepted {
            self.debounced += 1;
        }
        accepted
    }

    fn populate(&mut self) {
        match tables::traits(self.mode()).population {
            Population::Seed(profile) => self.spawn_seed(profile),
            Population::Scattered => self.spawn_scattered(self.config.ambient_population),
            Population::Grid => self.spawn_grid(),
            Population::FireBed => self.spawn_fire_bed(),
        }
    }

    fn on_pointer_down(&mut self, pos: Vec2) {
        match self.mode() {
            EffectMode::Ripple => self.spawn_ripple(pos),
            EffectMode::Sparkle => self.sparkle_burst(pos),
            EffectMode::Lightning => self.spawn_bolt(pos, pos),
            EffectMode::Comet => self.spawn_comet(pos, pos, Vec2::ZERO),
            EffectMode::Firework => self.firework_burst(pos),
            EffectMode::SpinningCircle => self.spawn_rings(pos),
            EffectMode::ScatterConverge => self.converge(pos),
            EffectMode::Vortex => self.vortex_burst(pos),
            EffectMode::Wave => self.spawn_wavefront(pos, Vec2::ZERO),
            EffectMode::GridWave => self.trigger_grid(pos),
            EffectMode::Fire => self.attract_flames(pos),
        }
    }

    fn on_pointer_move(&mut self, from: Vec2, to: Vec2) {
        let delta = to - from;
        let swipe = delta * 0.1;
        match self.mode() {
            EffectMode::Ripple | EffectMode::SpinningCircle => {}
            EffectMode::Sparkle => self.sparkle_trail(from, to, swipe),
            EffectMode::Lightning => self.spawn_bolt(from, to),
            EffectMode::Comet => self.spawn_comet(from, to, swipe),
            EffectMode::Firework => self.firework_burst(to),
            EffectMode::ScatterConverge => self.drag_field(to, delta),
            EffectMode::Vortex => self.steer_vortex(to, delta),
            EffectMode::Wave => self.spawn_wavefront(to, delta),
            EffectMode::GridWave => self.trigger_grid(to),
            EffectMode::Fire => self.drag_flames(to),
        }
    }

    fn on_pointer_up(&mut self) {
        match self.mode() {
            EffectMode::ScatterConverge | EffectMode::Vortex => self.disperse(),
            EffectMode::Fire => self.release_flames(),
            EffectMode::Ripple
            | EffectMode::Sparkle
            | EffectMode::Lightning
            | EffectMode::Comet
            | EffectMode::Firework
            | EffectMode::SpinningCircle
            | EffectMode::Wave
            | EffectMode::GridWave => {}
        }
    }
}

impl<R: Rng> std::fmt::Debug for EffectEngine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectEngine")
            .field("mode", &self.mode())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("live", &self.store.len())
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn setup(mode: EffectMode) -> (EffectEngine<ChaCha8Rng>, ManualClock) {
        let clock = ManualClock::starting_at(1_000);
        let mut engine = EffectEngine::with_parts(
            EngineConfig::default(),
            ChaCha8Rng::seed_from_u64(42),
            clock.clone(),
        );
        engine.set_dimensions(400.0, 800.0);
        engine.set_effect_mode(mode);
        (engine, clock)
    }

    #[test]
    fn test_seed_particle_is_centered() {
        let (engine, _) = setup(EffectMode::Ripple);
        assert_eq!(engine.store().len(), 1);
        let seed = engine.store().get(0).unwrap();
        assert_eq!(seed.pos, Vec2::new(200.0, 400.0));
        assert_eq!(seed.radius, 10.0);
        assert_eq!(seed.mode(), EffectMode::Ripple);
    }

    #[test]
    fn test_scattered_population() {
        let (engine, _) = setup(EffectMode::Vortex);
        assert_eq!(engine.store().len(), 50);
        assert!(engine.store().iter().all(|p| p.mode() == EffectMode::Vortex));
        assert!(engine.store().iter().all(|p| !p.is_converging()));
    }

    #[test]
    fn test_debounce_drops_rapid_events() {
        let (mut engine, clock) = setup(EffectMode::Ripple);
        engine.handle_input(PointerEvent::down(10.0, 10.0));
        assert_eq!(engine.store().len(), 2);

        clock.advance(20);
        engine.handle_input(PointerEvent::down(20.0, 20.0));
        assert_eq!(engine.store().len(), 2);
        assert_eq!(engine.stats().debounced, 1);

        clock.advance(40);
        engine.handle_input(PointerEvent::down(30.0, 30.0));
        assert_eq!(engine.store().len(), 3);
    }

    #[test]
    fn test_ambient_replenish_is_gated() {
        let (mut engine, clock) = setup(EffectMode::ScatterConverge);
        engine.update();
        assert_eq!(engine.stats().spawned, 55);

        clock.advance(16);
        engine.update();
        assert_eq!(engine.stats().spawned, 55);

        clock.advance(100);
        engine.update();
        assert_eq!(engine.stats().spawned, 60);
    }

    #[test]
    fn test_mode_before_dimensions_scatters_on_resize() {
        let mut engine = EffectEngine::with_parts(
            EngineConfig::default(),
            ChaCha8Rng::seed_from_u64(42),
            ManualClock::starting_at(1_000),
        );
        engine.set_effect_mode(EffectMode::Vortex);
        assert!(engine.store().is_empty());

        engine.set_dimensions(400.0, 800.0);
        assert_eq!(engine.store().len(), 50);
        assert!(engine.store().iter().all(|p| p.pos != Vec2::ZERO));
        assert!(engine
            .store()
            .iter()
            .all(|p| (0.0..=400.0).contains(&p.pos.x) && (0.0..=800.0).contains(&p.pos.y)));
    }

    #[test]
    fn test_resize_rebuilds_scattered_field() {
        let (mut engine, _) = setup(EffectMode::Wave);
        engine.set_dimensions(100.0, 100.0);
        assert_eq!(engine.store().len(), 50);
        assert!(engine.store().iter().all(|p| p.pos.x <= 100.0 && p.pos.y <= 100.0));
    }

    #[test]
    fn test_resize_rebuilds_ambient_fields_only() {
        let (mut engine, _) = setup(EffectMode::GridWave);
        assert_eq!(engine.store().len(), 200);
        engine.set_dimensions(1000.0, 500.0);
        assert_eq!(engine.store().len(), 200);
        let max_x = engine.store().iter().map(|p| p.pos.x).fold(0.0, f32::max);
        assert!((max_x - 1000.0).abs() < 1e-3);

        let (mut engine, _) = setup(EffectMode::Sparkle);
        let before = engine.store().len();
        engine.set_dimensions(100.0, 100.0);
        assert_eq!(engine.store().len(), before);
    }

    #[test]
    fn test_batch_ids_increase() {
        let (mut engine, clock) = setup(EffectMode::Firework);
        let first = engine.stats().next_batch;
        engine.handle_input(PointerEvent::down(50.0, 50.0));
        clock.advance(60);
        engine.handle_input(PointerEvent::down(60.0, 60.0));
        assert_eq!(engine.stats().next_batch, first + 2);
    }
}
