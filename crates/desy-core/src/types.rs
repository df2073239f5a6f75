//! Core types for the player screen

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one engine binding
///
/// A fresh id is minted every time the screen constructs an engine, so log
/// lines from init and release of the same instance can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BindingId(pub Uuid);

impl BindingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BindingId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BindingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Playback states reported by the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No content loaded
    #[default]
    Idle,
    /// Engine is filling its buffer
    Buffering,
    /// Enough is buffered to play
    Ready,
    /// Playback reached the end of the content
    Ended,
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackState::Idle => write!(f, "idle"),
            PlaybackState::Buffering => write!(f, "buffering"),
            PlaybackState::Ready => write!(f, "ready"),
            PlaybackState::Ended => write!(f, "ended"),
        }
    }
}

/// Track kinds selectable from the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackKind {
    /// Audio renditions
    Audio,
    /// Subtitle/caption renditions
    Text,
}

impl TrackKind {
    /// Top-level MIME category matched during list derivation
    pub fn mime_category(&self) -> &'static str {
        match self {
            TrackKind::Audio => "audio",
            TrackKind::Text => "text",
        }
    }
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackKind::Audio => write!(f, "audio"),
            TrackKind::Text => write!(f, "text"),
        }
    }
}

/// Direction for relative seeks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeekDirection {
    Forward,
    Backward,
}

/// Video resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Standard-definition cap applied by track selection
    pub const SD_480P: Resolution = Resolution { width: 854, height: 480 };
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A single rendition format as reported by the engine
///
/// Any field may be absent; formats missing a language or identifier are
/// skipped when building selectable lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackFormat {
    /// Engine-assigned identifier
    pub id: Option<String>,
    /// BCP-47 language tag
    pub language: Option<String>,
    /// Sample MIME type (e.g. "audio/mp4a-latm", "text/vtt")
    pub mime_type: Option<String>,
    /// Bitrate in bps, when the engine reports one
    pub bitrate: Option<u64>,
}

impl TrackFormat {
    /// Top-level MIME category ("audio", "text", "video", ...)
    pub fn category(&self) -> Option<&str> {
        let mime = self.mime_type.as_deref()?;
        Some(mime.split('/').next().unwrap_or(mime))
    }
}

/// The engine's grouping of interchangeable renditions for one logical track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackGroup {
    pub formats: Vec<TrackFormat>,
}

impl TrackGroup {
    pub fn new(formats: Vec<TrackFormat>) -> Self {
        Self { formats }
    }

    /// First format of the group, the one consulted for list derivation
    pub fn primary(&self) -> Option<&TrackFormat> {
        self.formats.first()
    }
}

/// Constraints handed to the engine's track selector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackSelection {
    /// Preferred audio language tag
    pub preferred_audio_language: Option<String>,
    /// Preferred subtitle language tag
    pub preferred_text_language: Option<String>,
    /// Cap on the video rendition size
    pub max_video_size: Option<Resolution>,
    /// Pin the highest supported bitrate for the chosen rendition
    pub force_highest_bitrate: bool,
}

impl TrackSelection {
    /// Selection preferring `language` for `kind`, capped to SD video and
    /// pinned to the highest supported bitrate.
    pub fn preferring(kind: TrackKind, language: impl Into<String>) -> Self {
        let language = Some(language.into());
        let mut selection = Self {
            max_video_size: Some(Resolution::SD_480P),
            force_highest_bitrate: true,
            ..Self::default()
        };
        match kind {
            TrackKind::Audio => selection.preferred_audio_language = language,
            TrackKind::Text => selection.preferred_text_language = language,
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_format_category() {
        let format = TrackFormat {
            mime_type: Some("audio/mp4a-latm".to_string()),
            ..Default::default()
        };
        assert_eq!(format.category(), Some("audio"));

        let format = TrackFormat {
            mime_type: Some("text/vtt".to_string()),
            ..Default::default()
        };
        assert_eq!(format.category(), Some("text"));

        assert_eq!(TrackFormat::default().category(), None);
    }

    #[test]
    fn test_selection_preferring_audio() {
        let selection = TrackSelection::preferring(TrackKind::Audio, "es");
        assert_eq!(selection.preferred_audio_language.as_deref(), Some("es"));
        assert_eq!(selection.preferred_text_language, None);
        assert_eq!(selection.max_video_size, Some(Resolution::SD_480P));
        assert!(selection.force_highest_bitrate);
    }

    #[test]
    fn test_selection_preferring_text() {
        let selection = TrackSelection::preferring(TrackKind::Text, "de");
        assert_eq!(selection.preferred_text_language.as_deref(), Some("de"));
        assert_eq!(selection.preferred_audio_language, None);
    }

    #[test]
    fn test_playback_state_display() {
        assert_eq!(PlaybackState::Buffering.to_string(), "buffering");
        assert_eq!(PlaybackState::Ready.to_string(), "ready");
    }
}
