//! # FLUXFX
//!
//! Host glue for the particle effects engine.
//!
//! ```text
//! input thread ──PointerSender──► PointerInbox ─┐
//! settings UI ──PreferenceStore (generation) ───┼─► FrameDriver::tick ─► EffectEngine
//! platform ─────Surface::lock ──────────────────┘          │
//!                                                           └─► draw_frame ─► Compositor
//! ```
//!
//! - [`Settings`]: TOML settings file (mode, frame interval, seed, engine tuning)
//! - [`PreferenceStore`]: the persisted mode, shared across threads
//! - [`PointerInbox`]: bounded queue of pointer events
//! - [`FrameDriver`]: one update + draw per tick, skipping frames without a surface

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod frame;
pub mod inbox;
pub mod preference;
pub mod settings;

pub use error::{HostError, HostResult};
pub use frame::{FrameDriver, FrameStats, TickOutcome};
pub use inbox::{PointerInbox, PointerSender, INBOX_CAPACITY};
pub use preference::PreferenceStore;
pub use settings::{resolve_mode, Settings, DEFAULT_FRAME_INTERVAL_MS};
