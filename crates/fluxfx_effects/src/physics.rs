//! # Per-Tick Physics
//!
//! One rule per effect type, dispatched by an exhaustive `match` on the
//! particle's payload. Discrete modes integrate with a unit step; homing
//! sub-states scale velocity by [`HOMING_STEP`] to approximate seconds per
//! tick.
//!
//! Order within a tick, per particle:
//! 1. [`advance`] (mode rule)
//! 2. [`propagate_tint`] (grid nodes only)
//! 3. [`reflect`] (when the canvas size is known)
//!
//! Removal happens once all particles have moved, via [`is_spent`].

use std::f32::consts::FRAC_PI_2;

use fluxfx_core::{Flame, GridNode, Homing, Kind, Orbit, OrbitPhase, Particle, Swell, Vec2};
use rand::Rng;

/// Velocity scale for homing particles.
pub const HOMING_STEP: f32 = 0.016;

/// Homing particles stop within this distance of their target.
pub const CAPTURE_RADIUS: f32 = 10.0;

/// Particles smaller than this are removed.
pub const MIN_RADIUS: f32 = 0.5;

/// How long a borrowed color lasts, in seconds.
pub const TINT_DURATION: f32 = 1.5;

/// Tint timer decrement per tick.
const TINT_STEP: f32 = 0.016;

/// Reach of the grid color ripple from one node to the next.
pub const GRID_PROPAGATION_RADIUS: f32 = 100.0;

const GRID_SPRING: f32 = 0.05;
const GRID_DAMPING: f32 = 0.9;
const GRID_ALPHA: f32 = 200.0;
const GRID_PROPAGATION_IMPULSE: f32 = 10.0;

/// Fire particles above this fraction of the canvas height burn out.
const FIRE_CEILING: f32 = 0.2;

/// Canvas extents used by the boundary rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Canvas width.
    pub width: f32,
    /// Canvas height.
    pub height: f32,
}

/// Advances one particle by its mode rule.
pub fn advance<R: Rng + ?Sized>(p: &mut Particle, rng: &mut R) {
    let mut kind = p.kind;
    match &mut kind {
        Kind::Ripple => ripple(p),
        Kind::Sparkle => sparkle(p),
        Kind::Lightning => lightning(p),
        Kind::Comet => comet(p),
        Kind::Firework => firework(p),
        Kind::SpinningCircle(orbit) => spin(p, orbit, rng),
        Kind::ScatterConverge(homing) => drift(p, homing),
        Kind::Vortex(swirl) => drift(p, &swirl.homing),
        Kind::Wave(swell) => undulate(p, swell),
        Kind::GridWave(node) => spring(p, node),
        Kind::Fire(flame) => burn(p, flame),
    }
    p.kind = kind;
}

fn ripple(p: &mut Particle) {
    p.radius += 20.0;
    p.set_alpha(p.alpha - 10.0);
}

fn sparkle(p: &mut Particle) {
    p.pos += p.vel;
    p.phase += 0.15;
    p.pos += Vec2::new(p.phase.sin(), p.phase.cos()) * 1.5;
    p.life -= 0.06;
    p.set_alpha(200.0 * p.life);
    p.vel *= 0.94;
}

fn lightning(p: &mut Particle) {
    p.set_alpha(p.alpha - 10.0);
    p.radius *= 0.95;
}

fn comet(p: &mut Particle) {
    p.pos += p.vel;
    p.phase += 0.08;
    p.pos += Vec2::new((p.phase * 3.0).sin(), (p.phase * 2.0).cos()) * 0.8;
    p.radius *= 0.97;
    p.life -= 0.015;
    p.set_alpha(220.0 * p.life);
    p.vel *= 0.985;
}

fn firework(p: &mut Particle) {
    p.pos += p.vel;
    p.vel.y += 0.2;
    p.phase += 0.1;
    p.radius *= 0.98;
    p.life -= 0.02;
    p.set_alpha(200.0 * p.life);
    p.vel *= 0.95;
}

/// Settle onto the ring, orbit, and (once, if ejectable) fly off.
fn spin<R: Rng + ?Sized>(p: &mut Particle, orbit: &mut Orbit, rng: &mut R) {
    match orbit.phase {
        OrbitPhase::Ballistic => {
            p.pos += p.vel;
            p.vel.y += 0.1;
            p.radius *= 0.98;
            p.vel *= 0.95;
        }
        OrbitPhase::Settling | OrbitPhase::Orbiting => {
            let center = p.pos - Vec2::from_angle(orbit.angle) * orbit.target_radius;
            if p.life > 0.8 {
                orbit.phase = OrbitPhase::Settling;
                p.pos += p.vel * HOMING_STEP;
                p.vel *= 0.9;
            } else {
                orbit.phase = OrbitPhase::Orbiting;
                orbit.angle += 0.3 * orbit.direction;
                p.pos = center + Vec2::from_angle(orbit.angle) * orbit.target_radius;
                p.vel = Vec2::ZERO;

                if orbit.ejectable && p.life <= 0.5 {
                    let heading = orbit.angle + rng.gen::<f32>() * 0.5 - 0.25;
                    p.vel = Vec2::from_angle(heading) * 8.0;
                    orbit.phase = OrbitPhase::Ballistic;
                }
            }
        }
    }
    p.life -= 0.02;
    p.set_alpha(200.0 * p.life);
}

/// Home on the target if there is one, otherwise wander.
fn drift(p: &mut Particle, homing: &Homing) {
    match homing.target {
        Some(target) => home(p, target),
        None => wander(p),
    }
    p.life -= 0.02;
    p.set_alpha(200.0 * p.life);
}

fn undulate(p: &mut Particle, swell: &Swell) {
    if swell.homing.is_converging() {
        p.pos += p.vel * HOMING_STEP;
        p.vel *= 0.99;
        p.phase += swell.frequency;
        let across = p.vel.angle() + FRAC_PI_2;
        let sway = p.phase.sin() * 10.0;
        p.pos += Vec2::new(across.sin(), across.cos()) * sway;
    } else {
        wander(p);
    }
    p.life -= 0.02;
    p.set_alpha(200.0 * p.life);
}

fn home(p: &mut Particle, target: Vec2) {
    p.pos += p.vel * HOMING_STEP;
    p.vel *= 0.99;
    if p.pos.distance(target) < CAPTURE_RADIUS {
        p.vel = Vec2::ZERO;
    }
}

fn wander(p: &mut Particle) {
    p.pos += p.vel;
    p.phase += 0.05;
    p.pos += Vec2::new(p.phase.sin(), p.phase.cos());
    p.vel *= 0.99;
}

fn spring(p: &mut Particle, node: &mut GridNode) {
    p.vel += (node.anchor - p.pos) * GRID_SPRING;
    p.vel *= GRID_DAMPING;
    p.pos += p.vel;
    if fade_tint(&mut node.tint.timer) {
        p.color = node.tint.home;
    }
    p.set_alpha(GRID_ALPHA);
}

fn burn(p: &mut Particle, flame: &mut Flame) {
    match flame.homing.target {
        Some(target) => home(p, target),
        None => {
            p.pos += p.vel;
            p.phase += 0.1;
            p.pos.x += p.phase.sin() * 2.0;
            p.life -= 0.02;
            p.set_alpha(255.0 * p.life / 4.0);
            p.radius *= 0.98;
        }
    }
    if fade_tint(&mut flame.tint.timer) {
        p.color = flame.tint.home;
    }
}

/// Counts a tint timer down. Returns true on the tick it expires.
fn fade_tint(timer: &mut f32) -> bool {
    if *timer > 0.0 {
        *timer -= TINT_STEP;
        return *timer <= 0.0;
    }
    false
}

/// Spreads the color of a freshly tinted grid node to idle neighbors.
///
/// A node whose tint is active and differs from its home color recolors
/// every grid node within [`GRID_PROPAGATION_RADIUS`] whose own timer has
/// run out, and pushes it outward in proportion to proximity. No-op for
/// every other particle type.
pub fn propagate_tint(particles: &mut [Particle], source: usize) {
    let Some(&origin) = particles.get(source) else {
        return;
    };
    let Kind::GridWave(node) = origin.kind else {
        return;
    };
    if !node.tint.is_active() || origin.color == node.tint.home {
        return;
    }

    for (index, neighbor) in particles.iter_mut().enumerate() {
        if index == source {
            continue;
        }
        let Kind::GridWave(ref mut other) = neighbor.kind else {
            continue;
        };
        if other.tint.is_active() {
            continue;
        }
        let distance = neighbor.pos.distance(origin.pos);
        if distance >= GRID_PROPAGATION_RADIUS {
            continue;
        }

        other.tint.timer = TINT_DURATION;
        neighbor.color = origin.color;
        let influence = (1.0 - distance / GRID_PROPAGATION_RADIUS).clamp(0.0, 1.0);
        let push = origin.pos.angle_to(neighbor.pos);
        neighbor.vel += Vec2::from_angle(push) * (GRID_PROPAGATION_IMPULSE * influence);
    }
}

/// Reflects a particle that left the canvas and clamps it back inside.
pub fn reflect(p: &mut Particle, bounds: Bounds) {
    if p.pos.x < 0.0 || p.pos.x > bounds.width {
        p.vel.x = -p.vel.x;
        p.pos.x = p.pos.x.clamp(0.0, bounds.width);
    }
    if p.pos.y < 0.0 || p.pos.y > bounds.height {
        p.vel.y = -p.vel.y;
        p.pos.y = p.pos.y.clamp(0.0, bounds.height);
    }
}

/// Should this particle be removed after the current tick?
#[must_use]
pub fn is_spent(p: &Particle, canvas_height: f32) -> bool {
    match p.kind {
        Kind::Ripple | Kind::Lightning => p.alpha <= 0.0,
        Kind::Sparkle => p.life <= 0.0,
        Kind::Comet
        | Kind::Firework
        | Kind::SpinningCircle(_)
        | Kind::ScatterConverge(_)
        | Kind::Vortex(_)
        | Kind::Wave(_) => p.life <= 0.0 || p.radius < MIN_RADIUS,
        Kind::GridWave(_) => false,
        Kind::Fire(flame) => {
            !flame.homing.is_converging()
                && (p.pos.y < canvas_height * FIRE_CEILING || p.life <= 0.0 || p.radius < MIN_RADIUS)
        }
    }
}
