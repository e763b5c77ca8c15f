//! # FLUXFX Render
//!
//! Translates the engine's draw batches into drawing primitives.
//!
//! ## Backends
//!
//! - [`CommandRecorder`]: keeps a list of [`DrawCommand`]s (headless, tests)
//! - [`InstanceBuilder`]: fills `Pod` instance buffers for a GPU backend
//!
//! Both implement [`Compositor`]; [`draw_frame`] feeds either from an
//! [`fluxfx_effects::EffectEngine`].

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod command;
pub mod compositor;
pub mod instance;
pub mod paint;
pub mod surface;

pub use command::{CommandRecorder, DrawCommand};
pub use compositor::{composite, draw_frame, CompositeStats, Compositor};
pub use instance::{CircleInstance, InstanceBuilder, LineVertex};
pub use paint::{Paint, PaintStyle};
pub use surface::{RecordingSurface, Surface, SurfaceError};
