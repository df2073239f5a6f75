//! Screen configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::Result;

/// Adaptive playlist played by the screen, constant across revisions
pub const DEFAULT_MEDIA_URL: &str =
    "https://bitmovin-a.akamaihd.net/content/sintel/hls/playlist.m3u8";

/// Relative seek behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SeekBehavior {
    /// Screen-computed step seek, rejected outside the content window
    Stepped { step: Duration },
    /// Delegate to the engine's built-in step seek
    Native,
}

impl SeekBehavior {
    /// Step used by [`SeekBehavior::stepped`]
    pub const DEFAULT_STEP: Duration = Duration::from_secs(5);

    /// Stepped behavior with the standard 5-second step
    pub fn stepped() -> Self {
        SeekBehavior::Stepped {
            step: Self::DEFAULT_STEP,
        }
    }
}

impl Default for SeekBehavior {
    fn default() -> Self {
        SeekBehavior::Native
    }
}

/// Player screen configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Media resource loaded at bind time
    pub media_uri: Url,
    /// Hosts that keep the surface alive through focus loss bind on
    /// started/stopped; legacy hosts bind on resumed/paused
    pub multi_window: bool,
    /// Relative seek behavior
    pub seek: SeekBehavior,
    /// Initial play-when-ready intent for a fresh screen
    pub auto_play: bool,
}

impl ScreenConfig {
    /// Configuration pointing at `media_url` instead of the default playlist
    pub fn with_media_url(media_url: &str) -> Result<Self> {
        Ok(Self {
            media_uri: Url::parse(media_url)?,
            ..Self::default()
        })
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            media_uri: Url::parse(DEFAULT_MEDIA_URL).expect("default media URL is valid"),
            multi_window: true,
            seek: SeekBehavior::default(),
            auto_play: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ScreenConfig::default();
        assert_eq!(config.media_uri.as_str(), DEFAULT_MEDIA_URL);
        assert!(config.multi_window);
        assert_eq!(config.seek, SeekBehavior::Native);
        assert!(config.auto_play);
    }

    #[test]
    fn test_stepped_default_step() {
        assert_eq!(
            SeekBehavior::stepped(),
            SeekBehavior::Stepped {
                step: Duration::from_secs(5)
            }
        );
    }

    #[test]
    fn test_with_media_url() {
        let config = ScreenConfig::with_media_url("https://example.com/master.m3u8").unwrap();
        assert_eq!(config.media_uri.host_str(), Some("example.com"));

        assert!(ScreenConfig::with_media_url("not a uri").is_err());
    }
}
