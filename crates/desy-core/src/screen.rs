//! Player screen - lifecycle binding between the host and the engine
//!
//! Coordinates:
//! - Engine construction and teardown on host visibility transitions
//! - Saved playback state across rebinds
//! - Buffering-driven control affordances
//! - Audio/subtitle language lists and selection
//!
//! The screen is single-threaded: every method runs on the host's main
//! context. Engines may notify from internal threads; notifications queue in
//! a shared inbox and the host drains them with [`PlayerScreen::process_events`].

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    config::{ScreenConfig, SeekBehavior},
    controls::{ControlAction, ControlSurface, TransportIcons},
    engine::{EngineFactory, PlaybackEngine},
    state::SavedPlayback,
    tracks::TrackLists,
    types::{BindingId, PlaybackState, SeekDirection, TrackKind, TrackSelection},
    Result,
};

/// Host lifecycle callbacks forwarded to the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Screen became visible
    Started,
    /// Screen gained foreground focus
    Resumed,
    /// Screen lost foreground focus
    Paused,
    /// Screen became hidden
    Stopped,
}

/// Video player screen bound to an external playback engine
///
/// `Unbound` and `Bound` are represented by the engine slot itself, so at
/// most one live instance can exist by construction.
pub struct PlayerScreen<F: EngineFactory, C: ControlSurface> {
    config: ScreenConfig,
    factory: F,
    controls: C,
    engine: Option<F::Engine>,
    binding: Option<BindingId>,
    saved: SavedPlayback,
    tracks: TrackLists,
    inbox: Arc<Mutex<Vec<PlaybackState>>>,
    state_tx: watch::Sender<PlaybackState>,
}

impl<F, C> PlayerScreen<F, C>
where
    F: EngineFactory,
    C: ControlSurface,
{
    pub fn new(config: ScreenConfig, factory: F, controls: C) -> Self {
        let saved = SavedPlayback {
            play_when_ready: config.auto_play,
            ..SavedPlayback::default()
        };
        let (state_tx, _) = watch::channel(PlaybackState::Idle);

        Self {
            config,
            factory,
            controls,
            engine: None,
            binding: None,
            saved,
            tracks: TrackLists::default(),
            inbox: Arc::new(Mutex::new(Vec::new())),
            state_tx,
        }
    }

    /// True while an engine instance is bound to the screen
    pub fn is_bound(&self) -> bool {
        self.engine.is_some()
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn controls(&self) -> &C {
        &self.controls
    }

    /// Snapshot of the persisted scalars
    pub fn saved_playback(&self) -> SavedPlayback {
        self.saved
    }

    /// Observe playback states as the screen sees them
    pub fn subscribe_state(&self) -> watch::Receiver<PlaybackState> {
        self.state_tx.subscribe()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Forward a host lifecycle callback
    pub fn on_lifecycle(&mut self, event: LifecycleEvent) -> Result<()> {
        match event {
            LifecycleEvent::Started => self.on_started(),
            LifecycleEvent::Resumed => self.on_resumed(),
            LifecycleEvent::Paused => {
                self.on_paused();
                Ok(())
            }
            LifecycleEvent::Stopped => {
                self.on_stopped();
                Ok(())
            }
        }
    }

    /// Screen became visible
    pub fn on_started(&mut self) -> Result<()> {
        if self.config.multi_window {
            self.bind()?;
        }
        Ok(())
    }

    /// Screen gained foreground focus
    ///
    /// Legacy hosts bind here; multi-window hosts only rebind when the
    /// engine went missing (late-surface fallback).
    pub fn on_resumed(&mut self) -> Result<()> {
        if !self.config.multi_window || self.engine.is_none() {
            self.bind()?;
        }
        Ok(())
    }

    /// Screen lost foreground focus
    pub fn on_paused(&mut self) {
        if !self.config.multi_window {
            self.unbind();
        }
    }

    /// Screen became hidden
    pub fn on_stopped(&mut self) {
        if self.config.multi_window {
            self.unbind();
        }
    }

    fn bind(&mut self) -> Result<()> {
        if self.engine.is_some() {
            debug!("engine already bound, skipping init");
            return Ok(());
        }

        let binding = BindingId::new();
        let mut engine = self.factory.create_engine(&self.config)?;
        if let Err(error) = self.attach(&mut engine) {
            engine.release();
            return Err(error);
        }

        info!(
            %binding,
            uri = %self.config.media_uri,
            position_ms = self.saved.position_ms,
            window = self.saved.window_index,
            play_when_ready = self.saved.play_when_ready,
            "playback engine bound"
        );
        self.engine = Some(engine);
        self.binding = Some(binding);
        Ok(())
    }

    /// Wire a fresh engine: listener, media, and the three saved scalars.
    fn attach(&mut self, engine: &mut F::Engine) -> Result<()> {
        let inbox = Arc::clone(&self.inbox);
        engine.set_state_listener(Box::new(move |state| {
            if let Ok(mut queue) = inbox.lock() {
                queue.push(state);
            }
        }));

        engine.set_media(&self.config.media_uri)?;
        engine.set_play_when_ready(self.saved.play_when_ready);
        engine.seek_to(self.saved.window_index, self.saved.position());
        engine.prepare()
    }

    fn unbind(&mut self) {
        let Some(mut engine) = self.engine.take() else {
            return;
        };

        // Read back the scalars before the instance goes away; they seed the
        // next bind.
        self.saved.window_index = engine.window_index();
        self.saved.set_position(engine.position());
        self.saved.play_when_ready = engine.play_when_ready();
        engine.release();

        if let Some(binding) = self.binding.take() {
            info!(
                %binding,
                position_ms = self.saved.position_ms,
                window = self.saved.window_index,
                play_when_ready = self.saved.play_when_ready,
                "playback engine released"
            );
        }

        // Drop stale notifications from the released instance.
        if let Ok(mut queue) = self.inbox.lock() {
            queue.clear();
        }
        let _ = self.state_tx.send(PlaybackState::Idle);
    }

    // -------------------------------------------------------------------------
    // Saved-state bundle
    // -------------------------------------------------------------------------

    /// Serialize the persisted scalars into the host's bundle
    pub fn save_state(&self) -> Value {
        self.saved.to_bundle()
    }

    /// Restore the persisted scalars from the host's bundle
    pub fn restore_state(&mut self, bundle: &Value) {
        self.saved = SavedPlayback::from_bundle(bundle);
        debug!(
            position_ms = self.saved.position_ms,
            window = self.saved.window_index,
            play_when_ready = self.saved.play_when_ready,
            "playback state restored"
        );
    }

    // -------------------------------------------------------------------------
    // Engine notifications
    // -------------------------------------------------------------------------

    /// Drain queued engine notifications on the host's main context
    pub fn process_events(&mut self) {
        let drained: Vec<PlaybackState> = match self.inbox.lock() {
            Ok(mut queue) => queue.drain(..).collect(),
            Err(_) => return,
        };
        for state in drained {
            self.on_playback_state(state);
        }
    }

    /// Handle one engine playback-state notification
    pub fn on_playback_state(&mut self, state: PlaybackState) {
        match state {
            PlaybackState::Idle => debug!("state idle"),
            PlaybackState::Buffering => {
                self.controls.set_buffering_indicator(true);
                self.controls.set_transport_icons(TransportIcons::Cleared);
            }
            PlaybackState::Ready => {
                self.controls.set_buffering_indicator(false);
                self.controls.set_transport_icons(TransportIcons::Visible);
                self.populate_track_lists();
            }
            PlaybackState::Ended => debug!("state ended"),
        }
        let _ = self.state_tx.send(state);
    }

    fn populate_track_lists(&mut self) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        if !self.tracks.is_populated() {
            self.tracks.populate_missing(&engine.track_groups());
        }
    }

    // -------------------------------------------------------------------------
    // User input
    // -------------------------------------------------------------------------

    /// Route a control action
    pub fn handle_action(&mut self, action: ControlAction) {
        match action {
            ControlAction::PlayPause => self.toggle_play_when_ready(),
            ControlAction::SeekForward => self.seek_relative(SeekDirection::Forward),
            ControlAction::SeekBackward => self.seek_relative(SeekDirection::Backward),
            ControlAction::SelectAudioTrack(index) => {
                let _ = self.select_track(TrackKind::Audio, index);
            }
            ControlAction::SelectSubtitleTrack(index) => {
                let _ = self.select_track(TrackKind::Text, index);
            }
        }
    }

    /// Toggle the declarative playback intent
    pub fn toggle_play_when_ready(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let play = !engine.play_when_ready();
        engine.set_play_when_ready(play);
        debug!(play_when_ready = play, "playback intent toggled");
    }

    /// Relative seek per the configured behavior
    pub fn seek_relative(&mut self, direction: SeekDirection) {
        match self.config.seek {
            SeekBehavior::Stepped { step } => self.seek_stepped(direction, step),
            SeekBehavior::Native => self.seek_native(direction),
        }
    }

    fn seek_stepped(&mut self, direction: SeekDirection, step: Duration) {
        if let Some(engine) = self.engine.as_mut() {
            let position = engine.position();
            // Targets outside [0, duration) are rejected. A forward step with
            // no known duration cannot be validated and is rejected too.
            let target = match direction {
                SeekDirection::Forward => engine
                    .duration()
                    .and_then(|duration| position.checked_add(step).filter(|t| *t < duration)),
                SeekDirection::Backward => position.checked_sub(step),
            };
            match target {
                Some(target) => {
                    let window = engine.window_index();
                    engine.seek_to(window, target);
                }
                None => debug!(?direction, "stepped seek outside content window, ignored"),
            }
        }
        // The slide affordance confirms the button press even when the seek
        // itself was rejected.
        self.controls.animate_seek(direction);
    }

    fn seek_native(&mut self, direction: SeekDirection) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        match direction {
            SeekDirection::Forward => engine.step_forward(),
            SeekDirection::Backward => engine.step_back(),
        }
    }

    // -------------------------------------------------------------------------
    // Track selection
    // -------------------------------------------------------------------------

    /// Audio languages derived from the engine's reported track groups
    pub fn audio_languages(&self) -> &[String] {
        self.tracks.audio_languages()
    }

    /// Subtitle languages derived from the engine's reported track groups
    pub fn subtitle_languages(&self) -> &[String] {
        self.tracks.subtitle_languages()
    }

    /// Prefer the `index`-th derived language for `kind`
    ///
    /// Returns the chosen language so hosts can confirm the change, or
    /// `None` when the screen is unbound or the index is out of range.
    pub fn select_track(&mut self, kind: TrackKind, index: usize) -> Option<String> {
        let Some(engine) = self.engine.as_mut() else {
            warn!(%kind, index, "track selection while unbound, ignored");
            return None;
        };
        let language = self.tracks.language(kind, index)?.to_owned();

        engine.apply_selection(&TrackSelection::preferring(kind, language.clone()));
        info!(%kind, language = %language, "track selection updated");
        Some(language)
    }
}
