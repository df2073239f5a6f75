//! External playback engine abstraction
//!
//! Everything hard about playback (adaptive streaming, buffering, decoding,
//! track-selection internals) lives behind [`PlaybackEngine`]. The screen
//! only drives this surface; backends adapt a real media library to it.

use std::time::Duration;

use url::Url;

use crate::{
    config::ScreenConfig,
    types::{PlaybackState, TrackGroup, TrackSelection},
    Result,
};

/// Listener invoked whenever the engine's playback state changes
///
/// Backends may call it from internal threads; the screen marshals
/// notifications back onto the host's main context.
pub type StateListener = Box<dyn FnMut(PlaybackState) + Send>;

/// Surface of the external media-playback library
pub trait PlaybackEngine {
    /// Queue the media resource to play.
    fn set_media(&mut self, uri: &Url) -> Result<()>;

    /// Begin buffering; playback starts once ready when play-when-ready is
    /// set.
    fn prepare(&mut self) -> Result<()>;

    /// Tear down the instance and free its resources.
    fn release(&mut self);

    /// Declarative playback intent.
    fn set_play_when_ready(&mut self, play: bool);
    fn play_when_ready(&self) -> bool;

    /// Absolute seek within the timeline.
    fn seek_to(&mut self, window_index: u32, position: Duration);

    /// Engine-native relative step seeks. Bounds handling is the engine's.
    fn step_forward(&mut self);
    fn step_back(&mut self);

    fn position(&self) -> Duration;
    fn window_index(&self) -> u32;

    /// Content duration, once the engine has determined it.
    fn duration(&self) -> Option<Duration>;

    /// Track groups currently reported for the loaded media.
    fn track_groups(&self) -> Vec<TrackGroup>;

    /// Update the active track-selection constraints.
    fn apply_selection(&mut self, selection: &TrackSelection);

    /// Register the playback-state listener, replacing any previous one.
    fn set_state_listener(&mut self, listener: StateListener);
}

/// Constructs one engine per screen binding
pub trait EngineFactory {
    type Engine: PlaybackEngine;

    fn create_engine(&mut self, config: &ScreenConfig) -> Result<Self::Engine>;
}
