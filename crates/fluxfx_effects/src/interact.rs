//! Pointer interactions that steer existing particles instead of spawning.

use fluxfx_core::{Homing, Kind, Particle, Vec2};
use rand::Rng;
use tracing::debug;

use crate::engine::EffectEngine;
use crate::physics::TINT_DURATION;
use crate::spawn::drag_speed;

/// Scatter/converge pull radius on pointer down.
pub const CONVERGE_RADIUS: f32 = 200.0;
/// Scatter/converge and vortex drag radius.
pub const DRAG_RADIUS: f32 = 150.0;
/// Grid-wave trigger radius.
pub const GRID_TRIGGER_RADIUS: f32 = 200.0;
/// Fire attract and drag radius.
pub const FLAME_RADIUS: f32 = 300.0;

/// `1` at the pointer, `0` at `radius`.
fn falloff(distance: f32, radius: f32) -> f32 {
    (1.0 - distance / radius).clamp(0.0, 1.0)
}

/// Velocity that reaches `target` from `pos` in `seconds`.
fn aim(pos: Vec2, target: Vec2, seconds: f32) -> Vec2 {
    Vec2::from_angle(pos.angle_to(target)) * (pos.distance(target) / seconds)
}

impl<R: Rng> EffectEngine<R> {
    /// Pulls nearby field particles into the pointer.
    pub(crate) fn converge(&mut self, target: Vec2) {
        let mut pulled = 0_usize;
        for p in self.store.iter_mut() {
            let Kind::ScatterConverge(ref mut homing) = p.kind else {
                continue;
            };
            if p.pos.distance(target) >= CONVERGE_RADIUS {
                continue;
            }
            *homing = Homing::toward(target);
            p.vel = aim(p.pos, target, 0.5);
            pulled += 1;
        }
        debug!(pulled, x = target.x, y = target.y, "Converge");
    }

    /// Captures nearby field particles and biases them along the swipe.
    pub(crate) fn drag_field(&mut self, pointer: Vec2, delta: Vec2) {
        let push = Vec2::from_angle(delta.angle()) * (drag_speed(delta) * 0.5);
        for p in self.store.iter_mut() {
            let Kind::ScatterConverge(ref mut homing) = p.kind else {
                continue;
            };
            let distance = p.pos.distance(pointer);
            if distance >= DRAG_RADIUS {
                continue;
            }
            *homing = Homing::toward(pointer);
            let influence = falloff(distance, DRAG_RADIUS);
            p.vel = p.vel * 0.7 + push * (0.3 * influence);
        }
    }

    /// Re-centers converging vortex particles on the pointer and spins them
    /// faster the quicker the swipe.
    pub(crate) fn steer_vortex(&mut self, pointer: Vec2, delta: Vec2) {
        let drag = drag_speed(delta);
        let orbit_speed = (drag * 0.01).clamp(2.0, 6.0);
        for p in self.store.iter_mut() {
            let Kind::Vortex(ref mut swirl) = p.kind else {
                continue;
            };
            if !swirl.homing.is_converging() {
                continue;
            }
            let distance = p.pos.distance(pointer);
            if distance >= DRAG_RADIUS {
                continue;
            }
            swirl.homing = Homing::toward(pointer);
            let outward = pointer.angle_to(p.pos);
            let influence = falloff(distance, DRAG_RADIUS);
            let radial = (distance - swirl.orbit_radius) * 0.1 * influence;
            p.vel = Vec2::from_angle(outward + std::f32::consts::FRAC_PI_2) * orbit_speed
                + Vec2::from_angle(outward) * radial;
            swirl.orbit_radius = (swirl.orbit_radius + drag * 0.005 * influence).clamp(50.0, 150.0);
        }
    }

    /// Releases every converging scatter, vortex, and wave particle with a
    /// random outward nudge. Particles already drifting are left alone.
    pub(crate) fn disperse(&mut self) {
        let mut released = 0_usize;
        for p in self.store.iter_mut() {
            let homing = match p.kind {
                Kind::ScatterConverge(ref mut homing) => homing,
                Kind::Vortex(ref mut swirl) => &mut swirl.homing,
                Kind::Wave(ref mut swell) => &mut swell.homing,
                _ => continue,
            };
            if !homing.is_converging() {
                continue;
            }
            *homing = Homing::FREE;
            let angle = self.rng.gen::<f32>() * std::f32::consts::TAU;
            let speed = self.rng.gen::<f32>() * 2.0 + 1.0;
            p.vel = p.vel * 0.6 + Vec2::from_angle(angle) * (speed * 0.4);
            released += 1;
        }
        debug!(released, "Disperse");
    }

    /// Recolors nearby grid nodes and kicks them away from the pointer.
    pub(crate) fn trigger_grid(&mut self, pointer: Vec2) {
        for p in self.store.iter_mut() {
            let Kind::GridWave(ref mut node) = p.kind else {
                continue;
            };
            let color = fluxfx_core::color::pick(&fluxfx_core::NEON_PALETTE, &mut self.rng);
            let distance = p.pos.distance(pointer);
            if distance >= GRID_TRIGGER_RADIUS {
                continue;
            }
            let influence = falloff(distance, GRID_TRIGGER_RADIUS);
            p.color = color;
            node.tint.timer = TINT_DURATION;
            p.vel += Vec2::from_angle(pointer.angle_to(p.pos)) * (20.0 * influence);
        }
    }

    /// Pulls nearby flames to the pointer and flares their color.
    pub(crate) fn attract_flames(&mut self, pointer: Vec2) {
        let mut caught = 0_usize;
        for p in self.store.iter_mut() {
            let Kind::Fire(ref mut flame) = p.kind else {
                continue;
            };
            if p.pos.distance(pointer) >= FLAME_RADIUS {
                continue;
            }
            flame.homing = Homing::toward(pointer);
            p.vel = aim(p.pos, pointer, 0.3);
            p.color = fluxfx_core::color::pick(&fluxfx_core::FIRE_PALETTE, &mut self.rng);
            flame.tint.timer = TINT_DURATION;
            caught += 1;
        }
        debug!(caught, x = pointer.x, y = pointer.y, "Flames attracted");
    }

    /// Moves the target of captured flames along with the pointer.
    pub(crate) fn drag_flames(&mut self, pointer: Vec2) {
        for p in self.store.iter_mut() {
            let Kind::Fire(ref mut flame) = p.kind else {
                continue;
            };
            if !flame.homing.is_converging() || p.pos.distance(pointer) >= FLAME_RADIUS {
                continue;
            }
            flame.homing = Homing::toward(pointer);
            p.vel = aim(p.pos, pointer, 0.3);
        }
    }

    /// Lets captured flames rise again with fresh life.
    pub(crate) fn release_flames(&mut self) {
        let mut released = 0_usize;
        for p in self.store.iter_mut() {
            let Kind::Fire(ref mut flame) = p.kind else {
                continue;
            };
            if !flame.homing.is_converging() {
                continue;
            }
            flame.homing = Homing::FREE;
            release(p, &mut self.rng);
            released += 1;
        }
        debug!(released, "Flames released");
    }
}

fn release<R: Rng + ?Sized>(p: &mut Particle, rng: &mut R) {
    p.vel = Vec2::new(rng.gen::<f32>() * 2.0 - 1.0, -(rng.gen::<f32>() * 5.0 + 5.0));
    p.life = rng.gen::<f32>() * 2.0 + 2.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falloff_bounds() {
        assert_eq!(falloff(0.0, 150.0), 1.0);
        assert_eq!(falloff(150.0, 150.0), 0.0);
        assert_eq!(falloff(300.0, 150.0), 0.0);
        assert!((falloff(75.0, 150.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_aim_arrives_in_time() {
        let v = aim(Vec2::ZERO, Vec2::new(30.0, 40.0), 0.5);
        assert!((v.length() - 100.0).abs() < 1e-3);
        assert!(v.x > 0.0 && v.y > 0.0);
    }
}
