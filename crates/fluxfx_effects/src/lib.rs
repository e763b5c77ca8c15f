//! # FLUXFX Effects
//!
//! The effect engine: eleven particle behaviors driven by pointer input and a
//! fixed-rate tick.
//!
//! ## Modules
//!
//! - `engine`: [`EffectEngine`], the single owner of the particle store
//! - `spawn` / `interact`: what pointer events do in each mode
//! - `physics`: the per-tick rule for each effect type
//! - `lightning`: fractal bolt paths
//! - `batch`: grouping particles into [`DrawBatch`]es for a compositor
//! - `tables`: per-mode data (population, replenishment, draw style)
//! - `clock`: injectable time and rate gates
//!
//! ## Example
//!
//! ```
//! use fluxfx_core::{EffectMode, EngineConfig};
//! use fluxfx_effects::{EffectEngine, PointerEvent};
//!
//! let mut engine = EffectEngine::with_seed(EngineConfig::default(), 7);
//! engine.set_dimensions(1080.0, 1920.0);
//! engine.set_effect_mode(EffectMode::Firework);
//! engine.handle_input(PointerEvent::down(540.0, 960.0));
//! engine.update();
//! let batches = engine.prepare_draw_batches();
//! assert!(!batches.is_empty());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod batch;
pub mod clock;
pub mod engine;
pub mod input;
pub mod interact;
pub mod lightning;
pub mod physics;
pub mod spawn;
pub mod tables;

pub use batch::{BoltPath, Disc, DrawBatch, Glow, QuadSegment, Shape};
pub use clock::{Clock, Gate, ManualClock, SystemClock};
pub use engine::{EffectEngine, EngineStats};
pub use input::{PointerEvent, PointerPhase};
pub use lightning::LightningPath;
pub use tables::{ModeTraits, Population, RenderStyle, Replenish};
