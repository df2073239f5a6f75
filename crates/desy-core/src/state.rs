//! Saved playback state carried across screen teardown
//!
//! The three scalars are synchronized from the live engine immediately
//! before release and are the sole seed applied to a new instance. They
//! round-trip through the host's saved-state bundle under fixed keys.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Bundle key for the timeline window index
pub const KEY_WINDOW_INDEX: &str = "windowIndex";
/// Bundle key for the playback position in milliseconds
pub const KEY_PLAYBACK_POSITION: &str = "CurrentIndex";
/// Bundle key for the play-when-ready flag
pub const KEY_PLAY_WHEN_READY: &str = "playWhenReady";

/// Playback state persisted across engine teardown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPlayback {
    /// Index into the media timeline (single item here, normally 0)
    #[serde(rename = "windowIndex")]
    pub window_index: u32,
    /// Last known playback offset in milliseconds
    #[serde(rename = "CurrentIndex")]
    pub position_ms: u64,
    /// Whether playback resumes automatically once buffered
    #[serde(rename = "playWhenReady")]
    pub play_when_ready: bool,
}

impl Default for SavedPlayback {
    fn default() -> Self {
        Self {
            window_index: 0,
            position_ms: 0,
            play_when_ready: true,
        }
    }
}

impl SavedPlayback {
    /// Playback offset as a [`Duration`]
    pub fn position(&self) -> Duration {
        Duration::from_millis(self.position_ms)
    }

    /// Store a playback offset, truncated to millisecond precision
    pub fn set_position(&mut self, position: Duration) {
        self.position_ms = position.as_millis() as u64;
    }

    /// Serialize into the host's saved-state bundle
    pub fn to_bundle(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Restore from a saved-state bundle
    ///
    /// Missing or mistyped entries fall back to the field's default rather
    /// than failing the restore.
    pub fn from_bundle(bundle: &Value) -> Self {
        let defaults = Self::default();
        Self {
            window_index: bundle
                .get(KEY_WINDOW_INDEX)
                .and_then(Value::as_u64)
                .map(|v| v as u32)
                .unwrap_or(defaults.window_index),
            position_ms: bundle
                .get(KEY_PLAYBACK_POSITION)
                .and_then(Value::as_u64)
                .unwrap_or(defaults.position_ms),
            play_when_ready: bundle
                .get(KEY_PLAY_WHEN_READY)
                .and_then(Value::as_bool)
                .unwrap_or(defaults.play_when_ready),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_uses_fixed_keys() {
        let saved = SavedPlayback {
            window_index: 1,
            position_ms: 42_000,
            play_when_ready: false,
        };
        let bundle = saved.to_bundle();

        assert_eq!(bundle[KEY_WINDOW_INDEX], 1);
        assert_eq!(bundle[KEY_PLAYBACK_POSITION], 42_000);
        assert_eq!(bundle[KEY_PLAY_WHEN_READY], false);
        assert_eq!(bundle.as_object().map(|o| o.len()), Some(3));
    }

    #[test]
    fn test_restore_round_trip() {
        let saved = SavedPlayback {
            window_index: 0,
            position_ms: 5_500,
            play_when_ready: true,
        };
        assert_eq!(SavedPlayback::from_bundle(&saved.to_bundle()), saved);
    }

    #[test]
    fn test_restore_tolerates_missing_entries() {
        let bundle = serde_json::json!({ KEY_PLAYBACK_POSITION: 9_000 });
        let saved = SavedPlayback::from_bundle(&bundle);

        assert_eq!(saved.position_ms, 9_000);
        assert_eq!(saved.window_index, 0);
        assert!(saved.play_when_ready);
    }

    #[test]
    fn test_restore_tolerates_mistyped_entries() {
        let bundle = serde_json::json!({
            KEY_WINDOW_INDEX: "zero",
            KEY_PLAY_WHEN_READY: 1,
        });
        let saved = SavedPlayback::from_bundle(&bundle);
        assert_eq!(saved, SavedPlayback::default());
    }

    #[test]
    fn test_position_truncates_to_millis() {
        let mut saved = SavedPlayback::default();
        saved.set_position(Duration::from_micros(1_500_900));
        assert_eq!(saved.position_ms, 1_500);
        assert_eq!(saved.position(), Duration::from_millis(1_500));
    }
}
