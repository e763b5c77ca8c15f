//! # Frame Driver
//!
//! Fixed-cadence host loop around an [`EffectEngine`].
//!
//! ## Tick Order
//!
//! 1. Switch modes if the preference generation moved
//! 2. Drain the pointer inbox into the engine, oldest first
//! 3. Stop here while invisible
//! 4. Lock the surface; on failure skip the frame (no update, no draw)
//! 5. `update()`, draw, present

use std::time::{Duration, Instant};

use fluxfx_effects::EffectEngine;
use fluxfx_render::{draw_frame, CompositeStats, Surface, SurfaceError};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::error::HostResult;
use crate::inbox::{PointerInbox, PointerSender};
use crate::preference::PreferenceStore;
use crate::settings::Settings;

/// Frame counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Ticks run.
    pub ticks: u64,
    /// Frames updated and drawn.
    pub drawn_frames: u64,
    /// Frames skipped because the surface could not be locked.
    pub skipped_frames: u64,
    /// Ticks spent paused.
    pub paused_ticks: u64,
    /// Pointer events forwarded to the engine.
    pub events: u64,
    /// Mode switches picked up from the preference store.
    pub mode_switches: u64,
    /// Ticks that took longer than the frame interval.
    pub late_ticks: u64,
}

/// What one tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Updated and drawn.
    Drawn(CompositeStats),
    /// Not visible; nothing advanced.
    Paused,
    /// Surface could not be locked; nothing advanced.
    Skipped(SurfaceError),
}

/// Drives an engine at a fixed frame interval.
pub struct FrameDriver<R: Rng = ChaCha8Rng> {
    engine: EffectEngine<R>,
    inbox: PointerInbox,
    preferences: PreferenceStore,
    seen_generation: u64,
    frame_interval: Duration,
    visible: bool,
    stats: FrameStats,
}

impl FrameDriver<ChaCha8Rng> {
    /// Builds an engine from settings and starts it in the preferred mode.
    #[must_use]
    pub fn from_settings(settings: &Settings, preferences: PreferenceStore) -> Self {
        let engine = match settings.seed {
            Some(seed) => EffectEngine::with_seed(settings.engine.clone(), seed),
            None => EffectEngine::new(settings.engine.clone()),
        };
        Self::with_engine(engine, preferences, settings.frame_interval())
    }
}

impl<R: Rng> FrameDriver<R> {
    /// Wraps an existing engine and applies the current preference.
    #[must_use]
    pub fn with_engine(
        mut engine: EffectEngine<R>,
        preferences: PreferenceStore,
        frame_interval: Duration,
    ) -> Self {
        let seen_generation = preferences.generation();
        engine.set_effect_mode(preferences.effect_mode());
        info!(
            mode = %engine.mode(),
            interval_ms = frame_interval.as_millis() as u64,
            "Frame driver ready"
        );
        Self {
            engine,
            inbox: PointerInbox::new(),
            preferences,
            seen_generation,
            frame_interval,
            visible: true,
            stats: FrameStats::default(),
        }
    }

    /// Sender for the input thread.
    #[must_use]
    pub fn pointer_sender(&self) -> PointerSender {
        self.inbox.sender()
    }

    /// The shared preference store.
    #[must_use]
    pub const fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    /// The driven engine.
    #[must_use]
    pub const fn engine(&self) -> &EffectEngine<R> {
        &self.engine
    }

    /// Frame counters.
    #[must_use]
    pub const fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Whether ticks currently advance the engine.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Surface created or resized.
    pub fn on_surface_changed(&mut self, width: f32, height: f32) {
        self.engine.set_dimensions(width, height);
    }

    /// Pauses (`false`) or resumes (`true`) the simulation.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            info!(visible, "Frame driver visibility changed");
        }
        self.visible = visible;
    }

    /// Runs one tick against `surface`.
    pub fn tick<S: Surface>(&mut self, surface: &mut S) -> TickOutcome {
        self.stats.ticks += 1;

        if let Some((generation, mode)) = self.preferences.changed_since(self.seen_generation) {
            self.seen_generation = generation;
            if mode != self.engine.mode() {
                self.engine.set_effect_mode(mode);
                self.stats.mode_switches += 1;
            }
        }

        for event in self.inbox.drain() {
            self.engine.handle_input(event);
            self.stats.events += 1;
        }

        if !self.visible {
            self.stats.paused_ticks += 1;
            return TickOutcome::Paused;
        }

        let target = match surface.lock() {
            Ok(target) => target,
            Err(err) => {
                self.stats.skipped_frames += 1;
                debug!(%err, "Frame skipped");
                return TickOutcome::Skipped(err);
            }
        };

        self.engine.update();
        let composited = draw_frame(&mut self.engine, target);
        surface.present();
        self.stats.drawn_frames += 1;
        TickOutcome::Drawn(composited)
    }

    /// Redraws the current state without advancing it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HostError::Surface`] when the surface cannot be locked.
    pub fn redraw<S: Surface>(&mut self, surface: &mut S) -> HostResult<CompositeStats> {
        let target = surface.lock()?;
        let composited = draw_frame(&mut self.engine, target);
        surface.present();
        Ok(composited)
    }

    /// Ticks `frames` times, sleeping out the rest of each frame interval.
    pub fn run_for<S: Surface>(&mut self, surface: &mut S, frames: u64) -> FrameStats {
        for _ in 0..frames {
            let start = Instant::now();
            self.tick(surface);
            let elapsed = start.elapsed();
            if elapsed < self.frame_interval {
                std::thread::sleep(self.frame_interval - elapsed);
            } else {
                self.stats.late_ticks += 1;
            }
        }
        self.stats
    }
}

impl<R: Rng> std::fmt::Debug for FrameDriver<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameDriver")
            .field("mode", &self.engine.mode())
            .field("visible", &self.visible)
            .field("frame_interval", &self.frame_interval)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
