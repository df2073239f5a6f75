//! Desy Core - player screen lifecycle binding
//!
//! This crate provides the glue that hosts a video player screen:
//! - Engine lifecycle binding to host visibility transitions
//! - Saved playback state (position, window index, play intent) across
//!   teardown and rebind
//! - Audio/subtitle language derivation and selection
//! - Buffering-driven control affordances
//!
//! The hard playback problems (adaptive streaming, buffering, decoding,
//! track-selection internals) belong to the external engine behind
//! [`PlaybackEngine`]; this crate only wires one to a screen.
//!
//! # Architecture
//!
//! ```text
//!  host lifecycle ──► PlayerScreen ◄── ControlAction (user input)
//!                       │      │
//!            affordances│      │binds/releases, seeks, selects
//!                       ▼      ▼
//!               ControlSurface  PlaybackEngine (external library)
//! ```

pub mod config;
pub mod controls;
pub mod engine;
pub mod error;
pub mod screen;
pub mod state;
pub mod tracks;
pub mod types;

pub use config::{ScreenConfig, SeekBehavior, DEFAULT_MEDIA_URL};
pub use controls::{ControlAction, ControlSurface, NoopControls, TransportIcons};
pub use engine::{EngineFactory, PlaybackEngine, StateListener};
pub use error::{Error, Result};
pub use screen::{LifecycleEvent, PlayerScreen};
pub use state::SavedPlayback;
pub use tracks::{derive_languages, TrackLists};
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library with default configuration
pub fn init() {
    tracing::info!(version = VERSION, "Desy Core initialized");
}
