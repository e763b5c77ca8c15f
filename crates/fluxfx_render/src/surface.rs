//! Drawing surfaces.
//!
//! A [`Surface`] hands out its [`Compositor`] for one frame at a time. Locking
//! can fail while the platform has no surface (not yet created, or destroyed
//! behind our back); the frame is then skipped, never retried.

use thiserror::Error;
use tracing::debug;

use crate::command::CommandRecorder;
use crate::compositor::Compositor;

/// Why a surface could not be locked.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceError {
    /// No surface exists yet, or it was destroyed.
    #[error("surface is not available")]
    Unavailable,
    /// The surface exists but the lock was refused.
    #[error("surface lock was refused")]
    Lost,
}

/// A platform surface that can be drawn on one frame at a time.
pub trait Surface {
    /// Compositor handed out while locked.
    type Target: Compositor;

    /// Current size in pixels.
    fn size(&self) -> (f32, f32);

    /// Locks the surface for drawing.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] when there is nothing to draw on.
    fn lock(&mut self) -> Result<&mut Self::Target, SurfaceError>;

    /// Unlocks and shows the frame drawn since `lock`.
    fn present(&mut self);
}

/// Headless surface backed by a [`CommandRecorder`].
#[derive(Debug)]
pub struct RecordingSurface {
    recorder: CommandRecorder,
    size: (f32, f32),
    available: bool,
    refuse_next: bool,
    presented: u64,
}

impl RecordingSurface {
    /// Creates an available surface of the given size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            recorder: CommandRecorder::new(),
            size: (width, height),
            available: true,
            refuse_next: false,
            presented: 0,
        }
    }

    /// Changes the reported size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = (width, height);
    }

    /// Creates or destroys the underlying surface.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Makes the next `lock` fail with [`SurfaceError::Lost`].
    pub fn refuse_next_lock(&mut self) {
        self.refuse_next = true;
    }

    /// Frames presented so far.
    #[must_use]
    pub const fn presented(&self) -> u64 {
        self.presented
    }

    /// The last frame's recording.
    #[must_use]
    pub const fn recorder(&self) -> &CommandRecorder {
        &self.recorder
    }
}

impl Surface for RecordingSurface {
    type Target = CommandRecorder;

    fn size(&self) -> (f32, f32) {
        self.size
    }

    fn lock(&mut self) -> Result<&mut CommandRecorder, SurfaceError> {
        if !self.available {
            return Err(SurfaceError::Unavailable);
        }
        if std::mem::take(&mut self.refuse_next) {
            debug!("Surface lock refused");
            return Err(SurfaceError::Lost);
        }
        self.recorder.begin_frame();
        Ok(&mut self.recorder)
    }

    fn present(&mut self) {
        self.presented += 1;
    }
}
