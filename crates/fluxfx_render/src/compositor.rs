//! # Compositor Contract
//!
//! A [`Compositor`] is anything that can clear a frame, fill a circle, and
//! stroke a bolt outline. [`composite`] walks the engine's draw batches and
//! issues those three primitives in order.
//!
//! ## Frame Layout
//!
//! ```text
//! clear(BLACK)
//! for batch in batches (first-appearance order):
//!     Bolt  -> stroke glow (alpha 100, blurred) -> stroke solid
//!     Discs -> for disc: fill glow (blurred) -> fill solid
//! ```
//!
//! Both bolt passes share [`BOLT_STROKE_WIDTH`]. The glow is wider only
//! through its blur: its [`Paint::footprint`] is the width plus the blur
//! radius on each side, so the solid pass sits inside a soft band
//! `2 * GLOW_BLUR` wider than itself.

use fluxfx_core::{Color, Vec2};
use fluxfx_effects::batch::{BOLT_GLOW_ALPHA, BOLT_STROKE_WIDTH, GLOW_BLUR};
use fluxfx_effects::{BoltPath, DrawBatch, EffectEngine, Shape};
use rand::Rng;
use tracing::trace;

use crate::paint::Paint;

/// Drawing backend.
pub trait Compositor {
    /// Fills the whole target.
    fn clear(&mut self, color: Color);

    /// Draws a circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);

    /// Strokes a bolt outline.
    fn stroke_bolt(&mut self, path: &BoltPath, paint: &Paint);
}

/// Primitive counts for one composited frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompositeStats {
    /// Batches walked.
    pub batches: usize,
    /// `fill_circle` calls.
    pub circles: usize,
    /// `stroke_bolt` calls.
    pub bolts: usize,
}

impl CompositeStats {
    /// All primitives issued, excluding the clear.
    #[must_use]
    pub const fn primitives(&self) -> usize {
        self.circles + self.bolts
    }
}

/// Clears `target` to black and draws every batch in order.
pub fn composite<C: Compositor + ?Sized>(batches: &[DrawBatch], target: &mut C) -> CompositeStats {
    let mut stats = CompositeStats {
        batches: batches.len(),
        ..CompositeStats::default()
    };

    target.clear(Color::BLACK);

    for batch in batches {
        match &batch.shape {
            Shape::Bolt(path) => {
                let glow = Paint::stroke(batch.color.with_alpha(BOLT_GLOW_ALPHA), BOLT_STROKE_WIDTH)
                    .with_blur(GLOW_BLUR);
                let solid = Paint::stroke(batch.color, BOLT_STROKE_WIDTH);
                target.stroke_bolt(path, &glow);
                target.stroke_bolt(path, &solid);
                stats.bolts += 2;
            }
            Shape::Discs { glow, discs } => {
                for disc in discs {
                    let halo = Paint::fill(batch.color.with_alpha(glow.alpha(disc.alpha))).with_blur(GLOW_BLUR);
                    target.fill_circle(disc.center, glow.radius(disc.radius), &halo);
                    target.fill_circle(disc.center, disc.radius, &Paint::fill(batch.color.with_alpha(disc.solid_alpha())));
                    stats.circles += 2;
                }
            }
        }
    }

    trace!(
        batches = stats.batches,
        circles = stats.circles,
        bolts = stats.bolts,
        "Frame composited"
    );
    stats
}

/// Prepares the engine's batches and composites them into `target`.
///
/// Particle state is not touched; only the engine's random source advances.
pub fn draw_frame<R, C>(engine: &mut EffectEngine<R>, target: &mut C) -> CompositeStats
where
    R: Rng,
    C: Compositor + ?Sized,
{
    let batches = engine.prepare_draw_batches();
    composite(&batches, target)
}
