//! Pointer input delivered by the host.

use fluxfx_core::Vec2;

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Pointer pressed.
    Down,
    /// Pointer dragged while pressed.
    Move,
    /// Pointer released.
    Up,
}

/// A single pointer event in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Event phase.
    pub phase: PointerPhase,
    /// Pointer position.
    pub pos: Vec2,
}

impl PointerEvent {
    /// Pointer pressed at `(x, y)`.
    #[must_use]
    pub const fn down(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Down,
            pos: Vec2::new(x, y),
        }
    }

    /// Pointer dragged to `(x, y)`.
    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Move,
            pos: Vec2::new(x, y),
        }
    }

    /// Pointer released at `(x, y)`.
    #[must_use]
    pub const fn up(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Up,
            pos: Vec2::new(x, y),
        }
    }
}
