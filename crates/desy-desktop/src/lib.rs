//! Desy Desktop - GStreamer playback engine
//!
//! Native engine binding for the Desy player screen:
//! - playbin-based adaptive playback (HLS via hlsdemux)
//! - playback-state signal wiring into the screen's listener
//! - audio/subtitle stream enumeration and preferred-language selection
//! - adaptive bitrate capping through the pipeline's connection-speed
//!
//! # Example
//!
//! ```rust,no_run
//! use desy_core::{LifecycleEvent, NoopControls, PlayerScreen, ScreenConfig};
//! use desy_desktop::GstEngineFactory;
//!
//! let mut screen = PlayerScreen::new(ScreenConfig::default(), GstEngineFactory, NoopControls);
//! screen.on_lifecycle(LifecycleEvent::Started).unwrap();
//! ```

pub mod engine;

pub use engine::{GstEngine, GstEngineFactory};
