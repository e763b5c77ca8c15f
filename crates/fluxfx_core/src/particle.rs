//! # Particle Values
//!
//! A particle is a plain value: shared kinematic state plus a per-mode
//! payload. The payload variant *is* the particle's effect type, so a field
//! that only makes sense for one mode cannot exist on a particle of another.
//!
//! ```text
//! Particle
//! ├── pos, vel, radius, alpha, life, color, phase, batch_id   (all modes)
//! └── kind: Kind
//!     ├── Ripple | Sparkle | Lightning | Comet | Firework     (no payload)
//!     ├── SpinningCircle(Orbit)
//!     ├── ScatterConverge(Homing)
//!     ├── Vortex(Swirl)
//!     ├── Wave(Swell)
//!     ├── GridWave(GridNode)
//!     └── Fire(Flame)
//! ```

use crate::color::Color;
use crate::math::Vec2;
use crate::mode::EffectMode;

/// Largest alpha value.
pub const ALPHA_MAX: f32 = 255.0;

/// Pointer-homing state shared by the ambient modes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Homing {
    /// Point the particle is homing toward; `None` while in free flight.
    pub target: Option<Vec2>,
}

impl Homing {
    /// Free-flight (not converging) state.
    pub const FREE: Self = Self { target: None };

    /// Homing toward `target`.
    #[must_use]
    pub const fn toward(target: Vec2) -> Self {
        Self { target: Some(target) }
    }

    /// Is the particle converging on a target?
    #[inline]
    #[must_use]
    pub const fn is_converging(&self) -> bool {
        self.target.is_some()
    }
}

/// Temporary recolor with a countdown back to the home color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    /// Color assigned at spawn. Never reassigned.
    pub home: Color,
    /// Seconds left before reverting to `home`; `<= 0` means expired.
    pub timer: f32,
}

impl Tint {
    /// A tint resting at its home color.
    #[must_use]
    pub const fn at_rest(home: Color) -> Self {
        Self { home, timer: 0.0 }
    }

    /// Is a temporary color currently active?
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }
}

/// Motion phase of a spinning-circle particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitPhase {
    /// Moving inward from the spawn radius toward the ring.
    Settling,
    /// Uniform circular motion on the ring.
    Orbiting,
    /// Kicked off the ring, falling freely.
    Ballistic,
}

/// Spinning-circle payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    /// Current angle on the ring (radians).
    pub angle: f32,
    /// Radius the particle was spawned at.
    pub initial_radius: f32,
    /// Radius of the ring it settles onto.
    pub target_radius: f32,
    /// +1 for clockwise in screen space, -1 for counter-clockwise.
    pub direction: f32,
    /// Whether this particle escapes the ring late in life.
    pub ejectable: bool,
    /// Current motion phase.
    pub phase: OrbitPhase,
}

/// Vortex payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swirl {
    /// Pointer homing.
    pub homing: Homing,
    /// Radius of the orbit around the homing target.
    pub orbit_radius: f32,
}

/// Wave payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swell {
    /// Pointer homing.
    pub homing: Homing,
    /// Phase advance per tick of the perpendicular oscillation.
    pub frequency: f32,
}

/// Grid-wave payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridNode {
    /// Rest position the spring pulls toward. Never reassigned.
    pub anchor: Vec2,
    /// Ripple recolor state.
    pub tint: Tint,
}

/// Fire payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flame {
    /// Pointer attraction.
    pub homing: Homing,
    /// Attraction recolor state.
    pub tint: Tint,
}

/// Per-mode payload. The variant determines the particle's effect type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kind {
    /// Expanding ring.
    Ripple,
    /// Glitter.
    Sparkle,
    /// Bolt sample point.
    Lightning,
    /// Comet fragment.
    Comet,
    /// Firework fragment.
    Firework,
    /// Ring member.
    SpinningCircle(Orbit),
    /// Ambient field particle.
    ScatterConverge(Homing),
    /// Orbiting particle.
    Vortex(Swirl),
    /// Wavefront particle.
    Wave(Swell),
    /// Spring grid node.
    GridWave(GridNode),
    /// Flame.
    Fire(Flame),
}

impl Kind {
    /// The effect mode this payload belongs to.
    #[must_use]
    pub const fn mode(&self) -> EffectMode {
        match self {
            Self::Ripple => EffectMode::Ripple,
            Self::Sparkle => EffectMode::Sparkle,
            Self::Lightning => EffectMode::Lightning,
            Self::Comet => EffectMode::Comet,
            Self::Firework => EffectMode::Firework,
            Self::SpinningCircle(_) => EffectMode::SpinningCircle,
            Self::ScatterConverge(_) => EffectMode::ScatterConverge,
            Self::Vortex(_) => EffectMode::Vortex,
            Self::Wave(_) => EffectMode::Wave,
            Self::GridWave(_) => EffectMode::GridWave,
            Self::Fire(_) => EffectMode::Fire,
        }
    }

    /// Homing state, for the modes that have one.
    #[must_use]
    pub fn homing(&self) -> Option<&Homing> {
        match self {
            Self::ScatterConverge(homing)
            | Self::Vortex(Swirl { homing, .. })
            | Self::Wave(Swell { homing, .. })
            | Self::Fire(Flame { homing, .. }) => Some(homing),
            _ => None,
        }
    }

    /// Mutable homing state, for the modes that have one.
    pub fn homing_mut(&mut self) -> Option<&mut Homing> {
        match self {
            Self::ScatterConverge(homing)
            | Self::Vortex(Swirl { homing, .. })
            | Self::Wave(Swell { homing, .. })
            | Self::Fire(Flame { homing, .. }) => Some(homing),
            _ => None,
        }
    }

    /// Default payload for a freshly spawned, unconverged particle of `mode`.
    ///
    /// Grid nodes and flames take their home color from `color`; grid nodes
    /// anchor at `pos`.
    #[must_use]
    pub fn free(mode: EffectMode, pos: Vec2, color: Color) -> Self {
        match mode {
            EffectMode::Ripple => Self::Ripple,
            EffectMode::Sparkle => Self::Sparkle,
            EffectMode::Lightning => Self::Lightning,
            EffectMode::Comet => Self::Comet,
            EffectMode::Firework => Self::Firework,
            EffectMode::SpinningCircle => Self::SpinningCircle(Orbit {
                angle: 0.0,
                initial_radius: 0.0,
                target_radius: 0.0,
                direction: 1.0,
                ejectable: false,
                phase: OrbitPhase::Settling,
            }),
            EffectMode::ScatterConverge => Self::ScatterConverge(Homing::FREE),
            EffectMode::Vortex => Self::Vortex(Swirl {
                homing: Homing::FREE,
                orbit_radius: 0.0,
            }),
            EffectMode::Wave => Self::Wave(Swell {
                homing: Homing::FREE,
                frequency: 0.0,
            }),
            EffectMode::GridWave => Self::GridWave(GridNode {
                anchor: pos,
                tint: Tint::at_rest(color),
            }),
            EffectMode::Fire => Self::Fire(Flame {
                homing: Homing::FREE,
                tint: Tint::at_rest(color),
            }),
        }
    }
}

/// A single particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in surface pixels.
    pub pos: Vec2,
    /// Velocity in pixels per tick (or per second for converging sub-states).
    pub vel: Vec2,
    /// Draw radius.
    pub radius: f32,
    /// Opacity in `[0, 255]`.
    pub alpha: f32,
    /// Remaining life; counts down to the removal threshold.
    pub life: f32,
    /// Current color.
    pub color: Color,
    /// Free-running oscillation angle.
    pub phase: f32,
    /// Spawn burst this particle came from. Attribution only.
    pub batch_id: u32,
    /// Per-mode payload. The variant never changes after spawn.
    pub kind: Kind,
}

impl Particle {
    /// Creates a particle at `pos` with neutral defaults.
    #[must_use]
    pub const fn new(kind: Kind, pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: 3.0,
            alpha: 200.0,
            life: 1.0,
            color: Color::WHITE,
            phase: 0.0,
            batch_id: 0,
            kind,
        }
    }

    /// Sets the velocity.
    #[must_use]
    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Sets the radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the alpha, clamped to `[0, 255]`.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.set_alpha(alpha);
        self
    }

    /// Sets the remaining life.
    #[must_use]
    pub fn with_life(mut self, life: f32) -> Self {
        self.life = life;
        self
    }

    /// Sets the color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the oscillation phase.
    #[must_use]
    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    /// Tags the spawn burst.
    #[must_use]
    pub fn with_batch(mut self, batch_id: u32) -> Self {
        self.batch_id = batch_id;
        self
    }

    /// Effect type of this particle.
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> EffectMode {
        self.kind.mode()
    }

    /// Is this particle homing toward a pointer target?
    #[inline]
    #[must_use]
    pub fn is_converging(&self) -> bool {
        self.kind.homing().is_some_and(Homing::is_converging)
    }

    /// Sets alpha, clamped to `[0, 255]`.
    #[inline]
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, ALPHA_MAX);
    }

    /// Alpha as a byte, for drawing.
    #[inline]
    #[must_use]
    pub fn alpha_u8(&self) -> u8 {
        self.alpha.clamp(0.0, ALPHA_MAX) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_maps_to_mode() {
        for mode in EffectMode::ALL {
            let kind = Kind::free(mode, Vec2::ZERO, Color::CYAN);
            assert_eq!(kind.mode(), mode);
        }
    }

    #[test]
    fn test_alpha_is_clamped() {
        let mut p = Particle::new(Kind::Sparkle, Vec2::ZERO).with_alpha(300.0);
        assert_eq!(p.alpha, 255.0);
        p.set_alpha(-10.0);
        assert_eq!(p.alpha, 0.0);
        assert_eq!(p.alpha_u8(), 0);
    }

    #[test]
    fn test_homing_only_on_ambient_modes() {
        let mut comet = Particle::new(Kind::Comet, Vec2::ZERO);
        assert!(comet.kind.homing_mut().is_none());
        assert!(!comet.is_converging());

        let mut vortex = Particle::new(Kind::free(EffectMode::Vortex, Vec2::ZERO, Color::CYAN), Vec2::ZERO);
        if let Some(homing) = vortex.kind.homing_mut() {
            *homing = Homing::toward(Vec2::new(5.0, 5.0));
        }
        assert!(vortex.is_converging());
    }

    #[test]
    fn test_grid_node_anchors_at_spawn() {
        let pos = Vec2::new(12.0, 34.0);
        match Kind::free(EffectMode::GridWave, pos, Color::PURPLE) {
            Kind::GridWave(node) => {
                assert_eq!(node.anchor, pos);
                assert_eq!(node.tint.home, Color::PURPLE);
                assert!(!node.tint.is_active());
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }
}
