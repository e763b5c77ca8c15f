//! Recorded draw commands.
//!
//! [`CommandRecorder`] is a [`Compositor`] that keeps what it is asked to
//! draw. Headless hosts and tests inspect the recording instead of pixels.

use fluxfx_core::{Color, Vec2};
use fluxfx_effects::BoltPath;

use crate::compositor::Compositor;
use crate::paint::Paint;

/// A single recorded primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Whole-frame fill.
    Clear {
        /// Fill color.
        color: Color,
    },
    /// Circle.
    Circle {
        /// Center.
        center: Vec2,
        /// Radius.
        radius: f32,
        /// Paint.
        paint: Paint,
    },
    /// Bolt outline.
    Bolt {
        /// Outline.
        path: BoltPath,
        /// Paint.
        paint: Paint,
    },
}

/// Compositor that records commands for later inspection.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl CommandRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(512),
            frames: 0,
        }
    }

    /// Drops the previous frame's commands.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.frames += 1;
    }

    /// Commands recorded since the last `begin_frame`.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Frames begun so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Recorded circles, in draw order.
    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, &Paint)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle { center, radius, paint } => Some((*center, *radius, paint)),
            _ => None,
        })
    }

    /// Recorded bolts, in draw order.
    pub fn bolts(&self) -> impl Iterator<Item = (&BoltPath, &Paint)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Bolt { path, paint } => Some((path, paint)),
            _ => None,
        })
    }
}

impl Compositor for CommandRecorder {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear { color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn stroke_bolt(&mut self, path: &BoltPath, paint: &Paint) {
        self.commands.push(DrawCommand::Bolt {
            path: path.clone(),
            paint: *paint,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_frame() {
        let mut recorder = CommandRecorder::new();
        recorder.begin_frame();
        recorder.clear(Color::BLACK);
        recorder.fill_circle(Vec2::new(1.0, 2.0), 3.0, &Paint::fill(Color::CYAN));
        assert_eq!(recorder.command_count(), 2);
        assert_eq!(recorder.circles().count(), 1);

        recorder.begin_frame();
        assert_eq!(recorder.command_count(), 0);
        assert_eq!(recorder.frames(), 2);
    }
}
