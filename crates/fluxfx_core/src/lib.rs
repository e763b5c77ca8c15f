//! # FLUXFX Core
//!
//! Leaf crate of the particle effects engine:
//! - `Particle` values whose payload variant is their effect type
//! - The closed `EffectMode` enumeration
//! - `ParticleStore`, the bounded particle pool with FIFO eviction
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  pointer ──► EffectEngine ──► ParticleStore (this crate)  │
//! │  tick    ──► EffectEngine ──► per-particle physics        │
//! │  draw    ──► EffectEngine ──► DrawBatch ──► Compositor    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here knows about time, randomness sources, or surfaces.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod color;
pub mod config;
pub mod math;
pub mod mode;
pub mod particle;
pub mod store;

pub use color::{Color, FIRE_PALETTE, NEON_PALETTE};
pub use config::{EngineConfig, MAX_PARTICLES};
pub use math::Vec2;
pub use mode::{EffectMode, ParseModeError};
pub use particle::{
    Flame, GridNode, Homing, Kind, Orbit, OrbitPhase, Particle, Swell, Swirl, Tint, ALPHA_MAX,
};
pub use store::{GroupKey, ParticleGroup, ParticleStore, StoreStats};
