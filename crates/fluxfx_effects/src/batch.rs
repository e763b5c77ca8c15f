//! # Draw Batching
//!
//! Turns the store into a backend-neutral list of [`DrawBatch`]es, one per
//! (effect type, color) group in order of first appearance. A compositor only
//! has to translate these into its own primitives.
//!
//! ## Group Rules
//!
//! | Style | Shape | Order |
//! |-------|-------|-------|
//! | Bolt | members joined by quadratic curves through jittered midpoints | insertion |
//! | Layered | glow disc at 3x radius, half alpha, then solid disc | descending life |
//! | Halo | glow disc at radius + 8, 0.7 alpha, then solid disc | insertion |

use fluxfx_core::{Color, EffectMode, Particle, Vec2, ALPHA_MAX};
use rand::Rng;

use crate::engine::EffectEngine;
use crate::tables::{self, RenderStyle};

/// Width of both bolt passes.
pub const BOLT_STROKE_WIDTH: f32 = 10.0;
/// Alpha of the bolt glow pass.
pub const BOLT_GLOW_ALPHA: u8 = 100;
/// Blur radius of every glow pass.
pub const GLOW_BLUR: f32 = 8.0;
/// Maximum offset of a bolt control point from its segment midpoint.
const BOLT_JITTER: f32 = 10.0;

/// How the glow disc behind each particle is sized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Glow {
    /// `radius * radius_scale`, `alpha * alpha_scale`.
    Scaled {
        /// Radius multiplier.
        radius_scale: f32,
        /// Alpha multiplier.
        alpha_scale: f32,
    },
    /// `radius + pad`, `alpha * alpha_scale`.
    Padded {
        /// Radius increment.
        pad: f32,
        /// Alpha multiplier.
        alpha_scale: f32,
    },
}

impl Glow {
    /// Glow of the layered style.
    pub const LAYERED: Self = Self::Scaled {
        radius_scale: 3.0,
        alpha_scale: 0.5,
    };

    /// Glow of the halo style.
    pub const HALO: Self = Self::Padded {
        pad: 8.0,
        alpha_scale: 0.7,
    };

    /// Glow radius for a disc of `radius`.
    #[must_use]
    pub fn radius(&self, radius: f32) -> f32 {
        match *self {
            Self::Scaled { radius_scale, .. } => radius * radius_scale,
            Self::Padded { pad, .. } => radius + pad,
        }
    }

    /// Glow alpha for a disc of `alpha`, scaled before truncation.
    #[must_use]
    pub fn alpha(&self, alpha: f32) -> u8 {
        let scale = match *self {
            Self::Scaled { alpha_scale, .. } | Self::Padded { alpha_scale, .. } => alpha_scale,
        };
        (alpha.clamp(0.0, ALPHA_MAX) * scale) as u8
    }
}

/// One filled particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    /// Center.
    pub center: Vec2,
    /// Solid radius.
    pub radius: f32,
    /// Particle alpha in `[0, 255]`, not yet truncated.
    pub alpha: f32,
}

impl Disc {
    /// Alpha of the solid pass.
    #[must_use]
    pub fn solid_alpha(&self) -> u8 {
        self.alpha as u8
    }
}

impl From<&Particle> for Disc {
    fn from(p: &Particle) -> Self {
        Self {
            center: p.pos,
            radius: p.radius,
            alpha: p.alpha.clamp(0.0, ALPHA_MAX),
        }
    }
}

/// Quadratic curve segment of a bolt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadSegment {
    /// Control point.
    pub control: Vec2,
    /// End point. The start is the previous segment's end.
    pub end: Vec2,
}

/// Smoothed bolt outline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoltPath {
    /// First point.
    pub start: Vec2,
    /// Curve segments in order.
    pub segments: Vec<QuadSegment>,
}

impl BoltPath {
    /// Evaluates segment `index` at `t` in `[0, 1]`.
    #[must_use]
    pub fn eval(&self, index: usize, t: f32) -> Option<Vec2> {
        let seg = self.segments.get(index)?;
        let from = if index == 0 {
            self.start
        } else {
            self.segments[index - 1].end
        };
        let u = 1.0 - t;
        Some(from * (u * u) + seg.control * (2.0 * u * t) + seg.end * (t * t))
    }
}

/// What a batch draws.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// One bolt stroked twice: glow at [`BOLT_GLOW_ALPHA`], then solid.
    Bolt(BoltPath),
    /// Discs drawn glow-then-solid, each in the given order.
    Discs {
        /// Glow sizing.
        glow: Glow,
        /// Discs in draw order.
        discs: Vec<Disc>,
    },
}

/// Everything needed to draw one (effect type, color) group.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawBatch {
    /// Effect type of the group.
    pub mode: EffectMode,
    /// Shared color (alpha comes per disc or per pass).
    pub color: Color,
    /// Geometry.
    pub shape: Shape,
}

impl DrawBatch {
    /// Number of primitives the batch expands to.
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        match &self.shape {
            Shape::Bolt(_) => 2,
            Shape::Discs { discs, .. } => discs.len() * 2,
        }
    }
}

impl<R: Rng> EffectEngine<R> {
    /// Groups live particles into draw batches.
    ///
    /// Mutates only the random source (bolt control-point jitter); particle
    /// state is untouched. Bolt groups with fewer than two members are
    /// skipped.
    pub fn prepare_draw_batches(&mut self) -> Vec<DrawBatch> {
        let groups = self.store.groups();
        let mut batches = Vec::with_capacity(groups.len());

        for group in groups {
            let shape = match tables::traits(group.key.mode).render {
                RenderStyle::Bolt => {
                    if group.members.len() < 2 {
                        continue;
                    }
                    Shape::Bolt(smooth_bolt(&group.members, &mut self.rng))
                }
                RenderStyle::Layered => {
                    let mut members = group.members;
                    members.sort_by(|a, b| b.life.total_cmp(&a.life));
                    Shape::Discs {
                        glow: Glow::LAYERED,
                        discs: members.into_iter().map(Disc::from).collect(),
                    }
                }
                RenderStyle::Halo => Shape::Discs {
                    glow: Glow::HALO,
                    discs: group.members.into_iter().map(Disc::from).collect(),
                },
            };
            batches.push(DrawBatch {
                mode: group.key.mode,
                color: group.key.color,
                shape,
            });
        }

        batches
    }
}

fn smooth_bolt<R: Rng + ?Sized>(members: &[&Particle], rng: &mut R) -> BoltPath {
    let mut segments = Vec::with_capacity(members.len().saturating_sub(1));
    for pair in members.windows(2) {
        let (a, b) = (pair[0].pos, pair[1].pos);
        let jitter = Vec2::new(
            (rng.gen::<f32>() - 0.5) * 2.0 * BOLT_JITTER,
            (rng.gen::<f32>() - 0.5) * 2.0 * BOLT_JITTER,
        );
        segments.push(QuadSegment {
            control: a.midpoint(b) + jitter,
            end: b,
        });
    }
    BoltPath {
        start: members.first().map_or(Vec2::ZERO, |p| p.pos),
        segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glow_rules() {
        assert_eq!(Glow::LAYERED.radius(4.0), 12.0);
        assert_eq!(Glow::LAYERED.alpha(200.0), 100);
        assert_eq!(Glow::HALO.radius(4.0), 12.0);
        assert_eq!(Glow::HALO.alpha(100.0), 70);
    }

    #[test]
    fn test_glow_alpha_truncates_once() {
        // 12.9 * 0.7 = 9.03; truncating to 12 first would give 8.
        assert_eq!(Glow::HALO.alpha(12.9), 9);
        assert_eq!(Glow::LAYERED.alpha(-4.0), 0);
        assert_eq!(Glow::LAYERED.alpha(300.0), 127);

        let p = Particle::new(fluxfx_core::Kind::Sparkle, Vec2::ZERO).with_alpha(12.9);
        let disc = Disc::from(&p);
        assert_eq!(disc.solid_alpha(), 12);
        assert_eq!(Glow::HALO.alpha(disc.alpha), 9);
    }

    #[test]
    fn test_bolt_eval_endpoints() {
        let path = BoltPath {
            start: Vec2::new(0.0, 0.0),
            segments: vec![
                QuadSegment {
                    control: Vec2::new(5.0, 5.0),
                    end: Vec2::new(10.0, 0.0),
                },
                QuadSegment {
                    control: Vec2::new(15.0, -5.0),
                    end: Vec2::new(20.0, 0.0),
                },
            ],
        };
        assert_eq!(path.eval(0, 0.0), Some(Vec2::new(0.0, 0.0)));
        assert_eq!(path.eval(0, 1.0), Some(Vec2::new(10.0, 0.0)));
        assert_eq!(path.eval(1, 0.0), Some(Vec2::new(10.0, 0.0)));
        assert_eq!(path.eval(1, 0.5), Some(Vec2::new(15.0, -2.5)));
        assert_eq!(path.eval(2, 0.0), None);
    }
}
