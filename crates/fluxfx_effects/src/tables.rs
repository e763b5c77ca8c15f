//! Per-mode data tables.
//!
//! Everything about a mode that is plain data (how it is populated on reset,
//! whether it replenishes in the background, how it is drawn) lives here so
//! the engine's behavior modules stay exhaustive `match`es over rules only.

use fluxfx_core::{EffectMode, Vec2};

/// Seed particle inserted when a single-seed mode is switched on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedProfile {
    /// Initial radius.
    pub radius: f32,
    /// Initial alpha.
    pub alpha: f32,
    /// Initial velocity.
    pub velocity: Vec2,
}

/// How the store is filled on mode switch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Population {
    /// One particle at the canvas center.
    Seed(SeedProfile),
    /// `ambient_population` random particles anywhere on the canvas.
    Scattered,
    /// A spring grid covering the canvas.
    Grid,
    /// A full layer of flames along the bottom edge.
    FireBed,
}

impl Population {
    /// Does this population depend on the canvas size?
    #[must_use]
    pub const fn needs_dimensions(&self) -> bool {
        matches!(self, Self::Scattered | Self::Grid | Self::FireBed)
    }
}

/// Background spawning between pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replenish {
    /// Random particles anywhere on the canvas.
    Scattered,
    /// Flames along the bottom edge.
    Flames,
}

/// Draw rule for a (mode, color) group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
    /// Members joined into one smoothed stroke, glow pass then solid pass.
    Bolt,
    /// Wide halo at 3x radius, freshest particles drawn last.
    Layered,
    /// Halo at radius + 8, insertion order.
    Halo,
}

/// Everything the engine needs to know about a mode up front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeTraits {
    /// Reset population.
    pub population: Population,
    /// Background spawning, if any.
    pub replenish: Option<Replenish>,
    /// Draw rule.
    pub render: RenderStyle,
}

const fn seed(radius: f32, alpha: f32, vx: f32, vy: f32) -> Population {
    Population::Seed(SeedProfile {
        radius,
        alpha,
        velocity: Vec2::new(vx, vy),
    })
}

/// Looks up the traits of `mode`.
#[must_use]
pub const fn traits(mode: EffectMode) -> ModeTraits {
    let (population, replenish, render) = match mode {
        EffectMode::Ripple => (seed(10.0, 255.0, 0.0, 0.0), None, RenderStyle::Halo),
        EffectMode::Sparkle => (seed(3.0, 200.0, 3.0, -3.0), None, RenderStyle::Halo),
        EffectMode::Lightning => (seed(5.0, 255.0, 0.0, 0.0), None, RenderStyle::Bolt),
        EffectMode::Comet => (seed(3.0, 200.0, 3.0, -3.0), None, RenderStyle::Layered),
        EffectMode::Firework => (seed(3.0, 200.0, 3.0, -3.0), None, RenderStyle::Layered),
        EffectMode::SpinningCircle => (seed(3.0, 200.0, 0.0, 0.0), None, RenderStyle::Layered),
        EffectMode::ScatterConverge | EffectMode::Vortex | EffectMode::Wave => (
            Population::Scattered,
            Some(Replenish::Scattered),
            RenderStyle::Layered,
        ),
        EffectMode::GridWave => (Population::Grid, None, RenderStyle::Layered),
        EffectMode::Fire => (
            Population::FireBed,
            Some(Replenish::Flames),
            RenderStyle::Layered,
        ),
    };
    ModeTraits {
        population,
        replenish,
        render,
    }
}

/// Ring radii for spinning-circle bursts, innermost first.
pub const RING_RADII: [f32; 5] = [50.0, 65.0, 80.0, 95.0, 110.0];

/// Extra spawn radius each ring member settles in from.
pub const RING_SETTLE_OFFSET: f32 = 10.0;

/// Rotation direction per ring.
pub const RING_DIRECTIONS: [f32; 5] = [1.0, -1.0, 1.0, -1.0, 1.0];

/// Members per spinning-circle ring.
pub const RING_MEMBERS: usize = 20;

/// Columns in the fire base layer.
pub const FIRE_COLUMNS: usize = 50;
