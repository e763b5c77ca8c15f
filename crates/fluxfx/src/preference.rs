//! Shared effect-mode preference.
//!
//! A settings screen on any thread writes the mode name; the frame loop
//! compares generations once per tick and switches modes when it moved.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use fluxfx_core::EffectMode;
use parking_lot::RwLock;
use tracing::debug;

use crate::settings::resolve_mode;

#[derive(Debug, Default)]
struct Shared {
    mode: RwLock<Option<String>>,
    generation: AtomicU64,
}

/// Clonable handle to the persisted mode name.
#[derive(Debug, Clone, Default)]
pub struct PreferenceStore {
    shared: Arc<Shared>,
}

impl PreferenceStore {
    /// Creates a store holding `mode`, at generation 0.
    #[must_use]
    pub fn new(mode: Option<String>) -> Self {
        Self {
            shared: Arc::new(Shared {
                mode: RwLock::new(mode),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Stores a new mode name and bumps the generation.
    pub fn set_mode(&self, name: impl Into<String>) {
        let name = name.into();
        debug!(mode = %name, "Effect mode preference written");
        *self.shared.mode.write() = Some(name);
        self.shared.generation.fetch_add(1, Ordering::Release);
    }

    /// Removes the stored name and bumps the generation.
    pub fn clear(&self) {
        *self.shared.mode.write() = None;
        self.shared.generation.fetch_add(1, Ordering::Release);
    }

    /// The stored name, verbatim.
    #[must_use]
    pub fn mode_name(&self) -> Option<String> {
        self.shared.mode.read().clone()
    }

    /// Number of writes so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.shared.generation.load(Ordering::Acquire)
    }

    /// The stored mode, resolved with the LIGHTNING fallback.
    #[must_use]
    pub fn effect_mode(&self) -> EffectMode {
        resolve_mode(self.shared.mode.read().as_deref())
    }

    /// The current generation and mode, if the generation moved past `seen`.
    #[must_use]
    pub fn changed_since(&self, seen: u64) -> Option<(u64, EffectMode)> {
        let generation = self.generation();
        (generation != seen).then(|| (generation, self.effect_mode()))
    }
}
