//! GStreamer playback engine
//!
//! Wraps `gstreamer_player::Player` behind the core [`PlaybackEngine`]
//! surface so the screen never touches GStreamer types. Player signals
//! arrive on internal threads and land in a shared inner state; the
//! registered state listener forwards mapped playback states to the screen's
//! inbox.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use desy_core::{
    Error, PlaybackEngine, PlaybackState, Resolution, Result, ScreenConfig, StateListener,
    TrackFormat, TrackGroup, TrackKind, TrackSelection,
};
use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_player as gst_player;
use gstreamer_player::prelude::*;
use tracing::{debug, error, info, warn};
use url::Url;

/// Step applied by the engine's built-in relative seek
const NATIVE_SEEK_STEP: Duration = Duration::from_secs(5);

#[derive(Debug, Default)]
struct EngineShared {
    state: PlaybackState,
    position: Duration,
    duration: Option<Duration>,
}

/// GStreamer-backed playback engine
pub struct GstEngine {
    player: gst_player::Player,
    shared: Arc<Mutex<EngineShared>>,
    listener: Arc<Mutex<Option<StateListener>>>,
    play_when_ready: bool,
    window_index: u32,
}

impl GstEngine {
    /// Create a new engine instance
    pub fn new() -> Result<Self> {
        gst::init().map_err(|e| Error::engine(e.to_string()))?;

        let player = gst_player::Player::new(
            None::<gst_player::PlayerVideoRenderer>,
            None::<gst_player::PlayerSignalDispatcher>,
        );

        let shared = Arc::new(Mutex::new(EngineShared::default()));
        let listener: Arc<Mutex<Option<StateListener>>> = Arc::new(Mutex::new(None));

        let shared_cb = shared.clone();
        let listener_cb = listener.clone();
        player.connect_state_changed(move |_player, gst_state| {
            let state = match gst_state {
                gst_player::PlayerState::Stopped => PlaybackState::Idle,
                gst_player::PlayerState::Buffering => PlaybackState::Buffering,
                gst_player::PlayerState::Paused | gst_player::PlayerState::Playing => {
                    PlaybackState::Ready
                }
                _ => PlaybackState::Idle,
            };
            let changed = match shared_cb.lock() {
                Ok(mut s) => {
                    let changed = s.state != state;
                    s.state = state;
                    changed
                }
                Err(_) => return,
            };
            if changed {
                debug!(state = %state, "engine state changed");
                notify(&listener_cb, state);
            }
        });

        let shared_cb = shared.clone();
        let listener_cb = listener.clone();
        player.connect_end_of_stream(move |_player| {
            if let Ok(mut s) = shared_cb.lock() {
                s.state = PlaybackState::Ended;
            }
            debug!("end of stream");
            notify(&listener_cb, PlaybackState::Ended);
        });

        let shared_cb = shared.clone();
        player.connect_position_updated(move |_player, position| {
            if let Some(pos) = position {
                if let Ok(mut s) = shared_cb.lock() {
                    s.position = Duration::from_nanos(pos.nseconds());
                }
            }
        });

        let shared_cb = shared.clone();
        player.connect_duration_changed(move |_player, duration| {
            if let Ok(mut s) = shared_cb.lock() {
                s.duration = duration.map(|d| Duration::from_nanos(d.nseconds()));
            }
        });

        player.connect_error(|_player, error| {
            error!(%error, "engine error");
        });

        player.connect_warning(|_player, warning| {
            warn!(%warning, "engine warning");
        });

        Ok(Self {
            player,
            shared,
            listener,
            play_when_ready: true,
            window_index: 0,
        })
    }

    fn seek_duration(&self, position: Duration) {
        self.player
            .seek(gst::ClockTime::from_nseconds(position.as_nanos() as u64));
    }

    fn select_stream(&self, kind: TrackKind, language: &str) {
        let Some(info) = self.player.media_info() else {
            debug!(%kind, language, "no media info yet, selection skipped");
            return;
        };

        match kind {
            TrackKind::Audio => {
                let index = info
                    .audio_streams()
                    .iter()
                    .position(|s| s.language().as_deref() == Some(language));
                match index {
                    Some(i) => {
                        self.player.set_audio_track(i as i32).ok();
                        info!(language, index = i, "audio track selected");
                    }
                    None => debug!(language, "no audio stream with requested language"),
                }
            }
            TrackKind::Text => {
                let index = info
                    .subtitle_streams()
                    .iter()
                    .position(|s| s.language().as_deref() == Some(language));
                match index {
                    Some(i) => {
                        self.player.set_subtitle_track(i as i32).ok();
                        self.player.set_subtitle_track_enabled(true);
                        info!(language, index = i, "subtitle track selected");
                    }
                    None => debug!(language, "no subtitle stream with requested language"),
                }
            }
        }
    }

    /// Last playback state mapped from the player's signals
    pub fn playback_state(&self) -> PlaybackState {
        self.shared
            .lock()
            .map(|s| s.state)
            .unwrap_or(PlaybackState::Idle)
    }

    /// Steer playbin's adaptive rendition choice through connection-speed.
    fn cap_adaptive_bitrate(&self, max_size: Resolution) {
        let kbps: u64 = match max_size.height {
            0..=480 => 2_000,
            481..=720 => 5_000,
            _ => 0, // uncapped
        };
        self.player
            .pipeline()
            .set_property("connection-speed", kbps);
        debug!(max_size = %max_size, kbps, "adaptive bitrate capped");
    }
}

impl PlaybackEngine for GstEngine {
    fn set_media(&mut self, uri: &Url) -> Result<()> {
        info!(%uri, "loading media");
        self.player.set_uri(Some(uri.as_str()));
        Ok(())
    }

    fn prepare(&mut self) -> Result<()> {
        if self.play_when_ready {
            self.player.play();
        } else {
            self.player.pause();
        }
        Ok(())
    }

    fn release(&mut self) {
        self.player.stop();
        if let Ok(mut s) = self.shared.lock() {
            *s = EngineShared::default();
        }
    }

    fn set_play_when_ready(&mut self, play: bool) {
        self.play_when_ready = play;
        if play {
            self.player.play();
        } else {
            self.player.pause();
        }
    }

    fn play_when_ready(&self) -> bool {
        self.play_when_ready
    }

    fn seek_to(&mut self, window_index: u32, position: Duration) {
        if window_index != 0 {
            warn!(window_index, "single-item timeline, window index ignored");
        }
        self.window_index = window_index;
        self.seek_duration(position);
    }

    fn step_forward(&mut self) {
        // playbin clamps seeks past the media duration itself
        self.seek_duration(self.position() + NATIVE_SEEK_STEP);
    }

    fn step_back(&mut self) {
        self.seek_duration(self.position().saturating_sub(NATIVE_SEEK_STEP));
    }

    fn position(&self) -> Duration {
        // Direct query first; the signal-updated value covers transient
        // states where the pipeline cannot answer.
        self.player
            .position()
            .map(|p| Duration::from_nanos(p.nseconds()))
            .or_else(|| self.shared.lock().ok().map(|s| s.position))
            .unwrap_or_default()
    }

    fn window_index(&self) -> u32 {
        self.window_index
    }

    fn duration(&self) -> Option<Duration> {
        self.player
            .duration()
            .map(|d| Duration::from_nanos(d.nseconds()))
            .or_else(|| self.shared.lock().ok().and_then(|s| s.duration))
    }

    fn track_groups(&self) -> Vec<TrackGroup> {
        let Some(info) = self.player.media_info() else {
            return Vec::new();
        };

        let mut groups = Vec::new();
        for stream in info.audio_streams() {
            groups.push(TrackGroup::new(vec![TrackFormat {
                id: Some(stream.index().to_string()),
                language: stream.language().map(|l| l.to_string()),
                mime_type: stream_mime(&stream),
                bitrate: positive_bitrate(stream.bitrate()),
            }]));
        }
        for stream in info.subtitle_streams() {
            groups.push(TrackGroup::new(vec![TrackFormat {
                id: Some(stream.index().to_string()),
                language: stream.language().map(|l| l.to_string()),
                mime_type: stream_mime(&stream),
                bitrate: None,
            }]));
        }
        groups
    }

    fn apply_selection(&mut self, selection: &TrackSelection) {
        if let Some(language) = &selection.preferred_audio_language {
            self.select_stream(TrackKind::Audio, language);
        }
        if let Some(language) = &selection.preferred_text_language {
            self.select_stream(TrackKind::Text, language);
        }
        if let Some(max_size) = selection.max_video_size {
            self.cap_adaptive_bitrate(max_size);
        }
        if selection.force_highest_bitrate {
            // playbin picks the rendition under the cap; no per-language pin
            debug!("highest-bitrate preference delegated to playbin");
        }
    }

    fn set_state_listener(&mut self, listener: StateListener) {
        if let Ok(mut slot) = self.listener.lock() {
            *slot = Some(listener);
        }
    }
}

impl Drop for GstEngine {
    fn drop(&mut self) {
        self.player.stop();
    }
}

fn notify(listener: &Arc<Mutex<Option<StateListener>>>, state: PlaybackState) {
    if let Ok(mut slot) = listener.lock() {
        if let Some(callback) = slot.as_mut() {
            callback(state);
        }
    }
}

fn stream_mime(stream: &impl IsA<gst_player::PlayerStreamInfo>) -> Option<String> {
    stream
        .caps()
        .and_then(|caps| caps.structure(0).map(|s| s.name().to_string()))
}

fn positive_bitrate(bitrate: i32) -> Option<u64> {
    (bitrate > 0).then_some(bitrate as u64)
}

/// Factory handed to the screen; constructs one engine per bind
#[derive(Debug, Clone, Copy, Default)]
pub struct GstEngineFactory;

impl desy_core::EngineFactory for GstEngineFactory {
    type Engine = GstEngine;

    fn create_engine(&mut self, _config: &ScreenConfig) -> Result<GstEngine> {
        GstEngine::new()
    }
}
