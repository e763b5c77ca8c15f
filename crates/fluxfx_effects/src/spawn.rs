//! Spawn rules: mode populations and pointer-driven bursts.
//!
//! Every burst goes through [`EffectEngine::emit`], which tags it with a
//! fresh batch id and lets the store evict the oldest particles to fit.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use fluxfx_core::{Flame, GridNode, Homing, Kind, Orbit, OrbitPhase, Particle, Swell, Swirl, Tint, Vec2};
use rand::Rng;
use tracing::warn;

use crate::engine::EffectEngine;
use crate::lightning::LightningPath;
use crate::tables::{
    SeedProfile, FIRE_COLUMNS, RING_DIRECTIONS, RING_MEMBERS, RING_RADII, RING_SETTLE_OFFSET,
};

/// Pointer displacement per tick converted to a speed.
pub(crate) fn drag_speed(delta: Vec2) -> f32 {
    delta.length() / 0.016
}

impl<R: Rng> EffectEngine<R> {
    // ------------------------------------------------------------------
    // Populations
    // ------------------------------------------------------------------

    pub(crate) fn spawn_seed(&mut self, profile: SeedProfile) {
        let mode = self.mode();
        let center = self.center();
        let color = self.neon();
        let phase = self.random_angle();
        let seed = Particle::new(Kind::free(mode, center, color), center)
            .with_radius(profile.radius)
            .with_alpha(profile.alpha)
            .with_velocity(profile.velocity)
            .with_color(color)
            .with_phase(phase);
        self.emit(vec![seed]);
    }

    /// Random free particles of the active mode anywhere on the canvas.
    pub(crate) fn spawn_scattered(&mut self, count: usize) {
        // Rebuilt by `set_dimensions` once the canvas is known.
        let Some(bounds) = self.bounds() else {
            return;
        };
        let mode = self.mode();
        let mut burst = Vec::with_capacity(count);
        for _ in 0..count {
            let pos = Vec2::new(self.uniform(0.0, bounds.width), self.uniform(0.0, bounds.height));
            let color = self.neon();
            let particle = Particle::new(Kind::free(mode, pos, color), pos)
                .with_radius(self.uniform(2.0, 5.0))
                .with_alpha(200.0)
                .with_velocity(Vec2::new(self.uniform(-2.0, 2.0), self.uniform(-2.0, 2.0)))
                .with_life(self.uniform(1.0, 3.0))
                .with_color(color)
                .with_phase(self.random_angle());
            burst.push(particle);
        }
        self.emit(burst);
    }

    /// The spring grid, laid out to the canvas aspect ratio.
    pub(crate) fn spawn_grid(&mut self) {
        let Some(bounds) = self.bounds() else {
            warn!("Grid requested before canvas dimensions are known");
            return;
        };
        let (width, height) = (bounds.width, bounds.height);
        let max = self.config.max_particles;

        let cols = ((max as f32 * width / height).sqrt().ceil() as usize).max(1);
        let rows = max.div_ceil(cols);
        let spacing_x = width / cols.saturating_sub(1).max(1) as f32;
        let spacing_y = height / rows.saturating_sub(1).max(1) as f32;
        let slack = 1e-3;

        let mut nodes = Vec::with_capacity(max);
        'rows: for row in 0..rows {
            for col in 0..cols {
                if nodes.len() >= max {
                    break 'rows;
                }
                let x = col as f32 * spacing_x;
                let y = row as f32 * spacing_y;
                if x > width + slack || y > height + slack {
                    continue;
                }
                let anchor = Vec2::new(x.min(width), y.min(height));
                let color = self.neon();
                nodes.push(
                    Particle::new(
                        Kind::GridWave(GridNode {
                            anchor,
                            tint: Tint::at_rest(color),
                        }),
                        anchor,
                    )
                    .with_radius(3.0)
                    .with_alpha(200.0)
                    .with_color(color),
                );
            }
        }
        self.emit(nodes);
    }

    /// A full layer of flames spread evenly along the bottom edge.
    pub(crate) fn spawn_fire_bed(&mut self) {
        let Some(bounds) = self.bounds() else {
            warn!("Fire bed requested before canvas dimensions are known");
            return;
        };
        let count = self.config.max_particles;
        let spacing = bounds.width / FIRE_COLUMNS as f32;

        let mut bed = Vec::with_capacity(count);
        for i in 0..count {
            let column = (i % FIRE_COLUMNS) as f32;
            let x = column * spacing + self.uniform(0.0, 0.5) * spacing;
            let y = bounds.height - self.uniform(0.0, 30.0);
            let radius = self.uniform(3.0, 7.0);
            bed.push(self.flame(Vec2::new(x, y), radius));
        }
        self.emit(bed);
    }

    /// Ambient flames at random spots on the bottom edge.
    pub(crate) fn spawn_flames(&mut self, count: usize) {
        let mut burst = Vec::with_capacity(count);
        for _ in 0..count {
            let x = self.uniform(0.0, self.width);
            let y = self.height - self.uniform(0.0, 30.0);
            let radius = self.uniform(4.0, 9.0);
            burst.push(self.flame(Vec2::new(x, y), radius));
        }
        self.emit(burst);
    }

    fn flame(&mut self, pos: Vec2, radius: f32) -> Particle {
        let color = self.flame_color();
        Particle::new(
            Kind::Fire(Flame {
                homing: Homing::FREE,
                tint: Tint::at_rest(color),
            }),
            pos,
        )
        .with_radius(radius)
        .with_alpha(255.0)
        .with_velocity(Vec2::new(self.uniform(-1.5, 1.5), -self.uniform(6.0, 14.0)))
        .with_life(self.uniform(3.0, 6.0))
        .with_color(color)
        .with_phase(self.random_angle())
    }

    // ------------------------------------------------------------------
    // Pointer bursts
    // ------------------------------------------------------------------

    pub(crate) fn spawn_ripple(&mut self, pos: Vec2) {
        let color = self.neon();
        let ring = Particle::new(Kind::Ripple, pos)
            .with_radius(0.0)
            .with_alpha(255.0)
            .with_color(color);
        self.emit(vec![ring]);
    }

    pub(crate) fn sparkle_burst(&mut self, pos: Vec2) {
        let color = self.neon();
        let mut burst = Vec::with_capacity(50);
        for _ in 0..50 {
            let jitter = Vec2::new(self.uniform(-7.5, 7.5), self.uniform(-7.5, 7.5));
            burst.push(
                Particle::new(Kind::Sparkle, pos + jitter)
                    .with_radius(self.uniform(2.0, 5.0))
                    .with_alpha(self.uniform(160.0, 240.0))
                    .with_velocity(Vec2::new(self.uniform(-1.5, 1.5), self.uniform(-1.5, 1.5)))
                    .with_life(1.5)
                    .with_color(color)
                    .with_phase(self.random_angle()),
            );
        }
        self.emit(burst);
    }

    /// Up to three segments of five particles along the swipe.
    pub(crate) fn sparkle_trail(&mut self, from: Vec2, to: Vec2, swipe: Vec2) {
        let stroke = to - from;
        let segments = ((from.distance(to) / 20.0) as usize).min(3);
        if segments == 0 {
            return;
        }
        let color = self.neon();
        let along = Vec2::from_angle(stroke.angle());

        let mut burst = Vec::with_capacity(segments * 5);
        for i in 1..=segments {
            let t = i as f32 / segments as f32;
            let anchor = from.lerp(to, t);
            for j in 0..5 {
                let offset = (j as f32 - 2.0) * 0.2;
                let line = anchor + stroke * (offset * 0.1);
                let wobble = (t * TAU + j as f32 * 0.3).sin() * 5.0;
                let velocity = swipe * 0.8 + Vec2::new(self.uniform(-0.5, 0.5), self.uniform(-0.5, 0.5));
                burst.push(
                    Particle::new(Kind::Sparkle, line + along * wobble)
                        .with_radius(self.uniform(2.0, 4.0))
                        .with_alpha(self.uniform(140.0, 220.0))
                        .with_velocity(velocity)
                        .with_life(1.5)
                        .with_color(color)
                        .with_phase(self.random_angle()),
                );
            }
        }
        self.emit(burst);
    }

    /// A fractal bolt from `from` to `to`, sampled by arc length.
    pub(crate) fn spawn_bolt(&mut self, from: Vec2, to: Vec2) {
        let color = self.neon();
        let path = LightningPath::generate(from, to, self.config.lightning_depth, &mut self.rng);
        let samples = path.resample(self.config.lightning_samples);

        let mut bolt = Vec::with_capacity(samples.len());
        for point in samples {
            bolt.push(
                Particle::new(Kind::Lightning, point)
                    .with_radius(self.uniform(2.0, 5.0))
                    .with_alpha(255.0)
                    .with_life(self.uniform(0.5, 1.0))
                    .with_color(color),
            );
        }
        self.emit(bolt);
    }

    /// Thirty fragments fanned across a cone around the motion direction,
    /// staggered backward to read as a tail.
    pub(crate) fn spawn_comet(&mut self, from: Vec2, to: Vec2, swipe: Vec2) {
        const COUNT: usize = 30;
        const CONE: f32 = PI / 2.2;
        const SPREAD: f32 = 3.5;

        let heading = (to - from).angle();
        let backward = Vec2::from_angle(heading);

        let mut burst = Vec::with_capacity(COUNT);
        for i in 0..COUNT {
            let color = self.neon();
            let fan = (i as f32 / (COUNT - 1) as f32 - 0.5) * CONE;
            let flip = if self.rng.gen::<bool>() { 1.0 } else { -1.0 };
            let speed = self.uniform(3.0, 5.0) * SPREAD * flip;
            let velocity = Vec2::from_angle(heading + fan) * speed + swipe * 0.3;
            let jitter = Vec2::new(self.uniform(-5.0, 5.0), self.uniform(-5.0, 5.0));
            let pos = from - backward * (i as f32 * 3.0) + jitter;
            burst.push(
                Particle::new(Kind::Comet, pos)
                    .with_radius(self.uniform(2.0, 5.0))
                    .with_alpha(self.uniform(170.0, 250.0))
                    .with_velocity(velocity)
                    .with_life(self.uniform(1.8, 2.5))
                    .with_color(color)
                    .with_phase(self.random_angle()),
            );
        }
        self.emit(burst);
    }

    /// Fifty fragments at even angles with random speeds.
    pub(crate) fn firework_burst(&mut self, pos: Vec2) {
        const COUNT: usize = 50;

        let mut burst = Vec::with_capacity(COUNT);
        for i in 0..COUNT {
            let color = self.neon();
            let angle = i as f32 / COUNT as f32 * TAU;
            let speed = self.uniform(2.0, 10.0);
            let jitter = Vec2::new(self.uniform(-2.5, 2.5), self.uniform(-2.5, 2.5));
            burst.push(
                Particle::new(Kind::Firework, pos + jitter)
                    .with_radius(self.uniform(2.0, 5.0))
                    .with_alpha(self.uniform(170.0, 250.0))
                    .with_velocity(Vec2::from_angle(angle) * speed)
                    .with_life(self.uniform(2.0, 2.5))
                    .with_color(color)
                    .with_phase(self.random_angle()),
            );
        }
        self.emit(burst);
    }

    /// Two to four concentric rings that settle inward, then rotate.
    pub(crate) fn spawn_rings(&mut self, center: Vec2) {
        let eject_ring = self.rng.gen_range(0..RING_RADII.len());
        let eject_slot = self.rng.gen_range(0..RING_MEMBERS);
        let ring_count = self.rng.gen_range(2..5);

        let mut burst = Vec::with_capacity(ring_count * RING_MEMBERS);
        let rings = RING_RADII.into_iter().zip(RING_DIRECTIONS).take(ring_count);
        for (ring, (target_radius, direction)) in rings.enumerate() {
            let initial_radius = target_radius + RING_SETTLE_OFFSET;
            for slot in 0..RING_MEMBERS {
                let angle = slot as f32 / RING_MEMBERS as f32 * TAU;
                let outward = Vec2::from_angle(angle);
                let ejectable = ring == eject_ring && slot == eject_slot && self.rng.gen::<f32>() < 0.5;
                let orbit = Orbit {
                    angle,
                    initial_radius,
                    target_radius,
                    direction,
                    ejectable,
                    phase: OrbitPhase::Settling,
                };
                let color = self.neon();
                burst.push(
                    Particle::new(Kind::SpinningCircle(orbit), center + outward * initial_radius)
                        .with_radius(3.0)
                        .with_alpha(200.0)
                        .with_velocity(-outward * ((initial_radius - target_radius) / 0.2))
                        .with_life(1.2)
                        .with_color(color)
                        .with_phase(self.random_angle()),
                );
            }
        }
        self.emit(burst);
    }

    /// Fifty particles orbiting `center`, homing on it.
    pub(crate) fn vortex_burst(&mut self, center: Vec2) {
        const COUNT: usize = 50;

        let mut burst = Vec::with_capacity(COUNT);
        for i in 0..COUNT {
            let orbit_radius = self.uniform(100.0, 150.0);
            let color = self.neon();
            let angle = i as f32 / COUNT as f32 * TAU;
            let speed = self.uniform(3.0, 6.0);
            let pos = center + Vec2::from_angle(angle) * orbit_radius;
            let swirl = Swirl {
                homing: Homing::toward(center),
                orbit_radius,
            };
            burst.push(
                Particle::new(Kind::Vortex(swirl), pos)
                    .with_radius(self.uniform(2.0, 5.0))
                    .with_alpha(self.uniform(170.0, 250.0))
                    .with_velocity(Vec2::from_angle(angle + FRAC_PI_2) * speed)
                    .with_life(self.uniform(1.5, 2.5))
                    .with_color(color)
                    .with_phase(self.random_angle()),
            );
        }
        self.emit(burst);
    }

    /// Thirty particles spread across the swipe, travelling with it.
    pub(crate) fn spawn_wavefront(&mut self, pos: Vec2, delta: Vec2) {
        const COUNT: usize = 30;

        let width = self.uniform(50.0, 100.0);
        let base_speed = self.uniform(3.0, 6.0);
        let drag = drag_speed(delta);
        let heading = if delta == Vec2::ZERO {
            self.random_angle()
        } else {
            delta.angle()
        };
        let across = Vec2::from_angle(heading + FRAC_PI_2);
        let speed = base_speed + drag * 0.05;
        let frequency = (0.05 + drag * 0.001).clamp(0.05, 0.2);

        let mut burst = Vec::with_capacity(COUNT);
        for i in 0..COUNT {
            let color = self.neon();
            let t = i as f32 / (COUNT - 1) as f32 - 0.5;
            let swell = Swell {
                homing: Homing::toward(pos),
                frequency,
            };
            burst.push(
                Particle::new(Kind::Wave(swell), pos + across * (t * width))
                    .with_radius(self.uniform(2.0, 5.0))
                    .with_alpha(self.uniform(170.0, 250.0))
                    .with_velocity(Vec2::from_angle(heading) * speed)
                    .with_life(self.uniform(1.5, 2.5))
                    .with_color(color)
                    .with_phase(self.random_angle()),
            );
        }
        self.emit(burst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_speed_scales_by_tick() {
        assert!((drag_speed(Vec2::new(3.0, 4.0)) - 312.5).abs() < 1e-3);
        assert_eq!(drag_speed(Vec2::ZERO), 0.0);
    }
}
