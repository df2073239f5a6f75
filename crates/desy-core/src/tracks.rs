//! Selectable track list derivation
//!
//! Builds the audio and subtitle language pickers from whatever the engine
//! reports. Formats missing a language tag or identifier are skipped rather
//! than surfaced as errors.

use tracing::debug;

use crate::types::{TrackGroup, TrackKind};

/// Derive the selectable language list for `kind`
///
/// Keeps exactly the first-format entries whose MIME category matches the
/// kind and which carry both a language tag and an identifier, in reported
/// order.
pub fn derive_languages(groups: &[TrackGroup], kind: TrackKind) -> Vec<String> {
    groups
        .iter()
        .filter_map(TrackGroup::primary)
        .filter_map(|format| {
            if format.category()? != kind.mime_category() {
                return None;
            }
            format.id.as_ref()?;
            format.language.clone()
        })
        .collect()
}

/// Languages selectable on screen
///
/// Populated lazily the first time the engine reports Ready, and kept across
/// rebinds like the rest of the screen's transient UI state.
#[derive(Debug, Clone, Default)]
pub struct TrackLists {
    audio: Vec<String>,
    text: Vec<String>,
}

impl TrackLists {
    /// Audio languages in the engine's reported order
    pub fn audio_languages(&self) -> &[String] {
        &self.audio
    }

    /// Subtitle languages in the engine's reported order
    pub fn subtitle_languages(&self) -> &[String] {
        &self.text
    }

    /// Language at `index` in the list for `kind`
    pub fn language(&self, kind: TrackKind, index: usize) -> Option<&str> {
        let list = match kind {
            TrackKind::Audio => &self.audio,
            TrackKind::Text => &self.text,
        };
        list.get(index).map(String::as_str)
    }

    /// True once both lists hold at least one entry
    pub fn is_populated(&self) -> bool {
        !self.audio.is_empty() && !self.text.is_empty()
    }

    /// Fill whichever lists are still empty from `groups`
    pub(crate) fn populate_missing(&mut self, groups: &[TrackGroup]) {
        if self.audio.is_empty() {
            self.audio = derive_languages(groups, TrackKind::Audio);
        }
        if self.text.is_empty() {
            self.text = derive_languages(groups, TrackKind::Text);
        }
        debug!(
            audio = self.audio.len(),
            subtitles = self.text.len(),
            "selectable track lists updated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TrackFormat;

    fn group(mime: &str, language: Option<&str>, id: Option<&str>) -> TrackGroup {
        TrackGroup::new(vec![TrackFormat {
            id: id.map(str::to_string),
            language: language.map(str::to_string),
            mime_type: Some(mime.to_string()),
            bitrate: None,
        }])
    }

    #[test]
    fn test_derivation_filters_by_category_language_and_id() {
        let groups = vec![
            group("audio/mp4a-latm", Some("en"), Some("a0")),
            group("audio/mp4a-latm", Some("es"), None), // no id
            group("audio/mp4a-latm", None, Some("a2")), // no language
            group("video/avc", Some("en"), Some("v0")), // wrong category
            group("text/vtt", Some("de"), Some("t0")),
            group("audio/ec-3", Some("fr"), Some("a3")),
        ];

        assert_eq!(derive_languages(&groups, TrackKind::Audio), ["en", "fr"]);
        assert_eq!(derive_languages(&groups, TrackKind::Text), ["de"]);
    }

    #[test]
    fn test_derivation_preserves_reported_order() {
        let groups = vec![
            group("text/vtt", Some("nl"), Some("t0")),
            group("text/vtt", Some("de"), Some("t1")),
            group("text/vtt", Some("en"), Some("t2")),
        ];
        assert_eq!(
            derive_languages(&groups, TrackKind::Text),
            ["nl", "de", "en"]
        );
    }

    #[test]
    fn test_derivation_skips_empty_groups_and_missing_mime() {
        let groups = vec![
            TrackGroup::default(),
            TrackGroup::new(vec![TrackFormat {
                id: Some("a0".to_string()),
                language: Some("en".to_string()),
                mime_type: None,
                bitrate: None,
            }]),
        ];
        assert!(derive_languages(&groups, TrackKind::Audio).is_empty());
    }

    #[test]
    fn test_derivation_consults_only_the_primary_format() {
        let groups = vec![TrackGroup::new(vec![
            TrackFormat {
                id: Some("a0".to_string()),
                language: Some("en".to_string()),
                mime_type: Some("audio/mp4a-latm".to_string()),
                bitrate: None,
            },
            TrackFormat {
                id: Some("a1".to_string()),
                language: Some("es".to_string()),
                mime_type: Some("audio/mp4a-latm".to_string()),
                bitrate: None,
            },
        ])];
        assert_eq!(derive_languages(&groups, TrackKind::Audio), ["en"]);
    }

    #[test]
    fn test_populate_missing_fills_only_empty_lists() {
        let mut lists = TrackLists::default();
        lists.populate_missing(&[group("audio/mp4a-latm", Some("en"), Some("a0"))]);
        assert_eq!(lists.audio_languages(), ["en"]);
        assert!(lists.subtitle_languages().is_empty());

        // Audio stays as derived; subtitles fill in once reported.
        lists.populate_missing(&[
            group("audio/mp4a-latm", Some("es"), Some("a1")),
            group("text/vtt", Some("de"), Some("t0")),
        ]);
        assert_eq!(lists.audio_languages(), ["en"]);
        assert_eq!(lists.subtitle_languages(), ["de"]);
        assert!(lists.is_populated());
    }

    #[test]
    fn test_language_lookup() {
        let mut lists = TrackLists::default();
        lists.populate_missing(&[
            group("audio/mp4a-latm", Some("en"), Some("a0")),
            group("audio/mp4a-latm", Some("es"), Some("a1")),
        ]);

        assert_eq!(lists.language(TrackKind::Audio, 1), Some("es"));
        assert_eq!(lists.language(TrackKind::Audio, 2), None);
        assert_eq!(lists.language(TrackKind::Text, 0), None);
    }
}
