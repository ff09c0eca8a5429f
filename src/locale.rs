//! Localized message catalog.
//!
//! Messages live in a JSON file keyed by language code, then by message key.
//! The catalog is loaded once at startup and shared read-only; lookups fall
//! back to the default language, and a missing key is a typed result that is
//! only turned into a diagnostic placeholder at the rendering boundary.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::info;

/// Every message the bot can emit, as a locale-independent key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    SendAudio,
    AudioNotFound,
    InvalidAction,
    AudioProcessing,
    AudioSummary,
    AudioSaved,
    AudioCutSuccess,
    NotSet,
    WasSet,
    WaitingForImage,
    WaitingForName,
    WaitingForCut,
    WaitingForGenre,
    WaitingForAlbum,
    WaitingForArtist,
    WaitingForTitle,
    WaitingForDate,
    ErrorEmptyCut,
    ErrorInvalidCutRange,
    ErrorUnsupportedTime,
    ErrorNegativeTime,
    ErrorInvalidOrder,
    ErrorStartBeyondLength,
    ErrorCutFailed,
    ErrorEmptyFilename,
    ErrorFilenameTooLong,
    ErrorInvalidCharacter,
    ErrorPathTraversal,
    ErrorDirectoryTraversal,
    ErrorInvalidAudioFormat,
    ErrorInvalidFilename,
    ErrorImageTooLarge,
    ErrorGenreTooLong,
    ErrorArtistTooLong,
    ErrorAlbumTooLong,
    ErrorTitleTooLong,
    ErrorDateInvalid,
    ErrorAudioTooLarge,
    ErrorProcessingAudio,
}

impl MessageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKey::SendAudio => "send_audio",
            MessageKey::AudioNotFound => "audio_not_found",
            MessageKey::InvalidAction => "invalid_action",
            MessageKey::AudioProcessing => "audio_processing",
            MessageKey::AudioSummary => "audio_summary",
            MessageKey::AudioSaved => "audio_saved",
            MessageKey::AudioCutSuccess => "audio_cut_success",
            MessageKey::NotSet => "not_set",
            MessageKey::WasSet => "was_set",
            MessageKey::WaitingForImage => "waiting_for_image",
            MessageKey::WaitingForName => "waiting_for_name",
            MessageKey::WaitingForCut => "waiting_for_cut",
            MessageKey::WaitingForGenre => "waiting_for_genre",
            MessageKey::WaitingForAlbum => "waiting_for_album",
            MessageKey::WaitingForArtist => "waiting_for_artist",
            MessageKey::WaitingForTitle => "waiting_for_title",
            MessageKey::WaitingForDate => "waiting_for_date",
            MessageKey::ErrorEmptyCut => "error_empty_cut",
            MessageKey::ErrorInvalidCutRange => "error_invalid_cut_range",
            MessageKey::ErrorUnsupportedTime => "error_unsupported_time",
            MessageKey::ErrorNegativeTime => "error_negative_time",
            MessageKey::ErrorInvalidOrder => "error_invalid_order",
            MessageKey::ErrorStartBeyondLength => "error_start_beyond_length",
            MessageKey::ErrorCutFailed => "error_cut_failed",
            MessageKey::ErrorEmptyFilename => "error_empty_filename",
            MessageKey::ErrorFilenameTooLong => "error_filename_too_long",
            MessageKey::ErrorInvalidCharacter => "error_invalid_character",
            MessageKey::ErrorPathTraversal => "error_path_traversal",
            MessageKey::ErrorDirectoryTraversal => "error_directory_traversal",
            MessageKey::ErrorInvalidAudioFormat => "error_invalid_audio_format",
            MessageKey::ErrorInvalidFilename => "error_invalid_filename",
            MessageKey::ErrorImageTooLarge => "error_image_too_large",
            MessageKey::ErrorGenreTooLong => "error_genre_too_long",
            MessageKey::ErrorArtistTooLong => "error_artist_too_long",
            MessageKey::ErrorAlbumTooLong => "error_album_too_long",
            MessageKey::ErrorTitleTooLong => "error_title_too_long",
            MessageKey::ErrorDateInvalid => "error_date_invalid",
            MessageKey::ErrorAudioTooLarge => "error_audio_too_large",
            MessageKey::ErrorProcessingAudio => "error_processing_audio",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed result for a key absent from every language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingKey(pub MessageKey);

/// Immutable message catalog shared read-only across handlers.
#[derive(Debug, Clone)]
pub struct Catalog {
    languages: HashMap<String, HashMap<String, String>>,
    default_language: String,
}

impl Catalog {
    /// Load the catalog from a JSON file shaped `{lang: {key: template}}`.
    pub fn load(path: impl AsRef<Path>, default_language: &str) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read message catalog: {}", path.display()))?;
        let languages: HashMap<String, HashMap<String, String>> =
            serde_json::from_str(&raw).context("Failed to parse message catalog JSON")?;

        info!(
            "Loaded message catalog: {} languages from {}",
            languages.len(),
            path.display()
        );

        Ok(Self {
            languages,
            default_language: default_language.to_string(),
        })
    }

    pub fn from_map(
        languages: HashMap<String, HashMap<String, String>>,
        default_language: &str,
    ) -> Self {
        Self {
            languages,
            default_language: default_language.to_string(),
        }
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// All available language codes.
    pub fn languages(&self) -> Vec<&str> {
        self.languages.keys().map(String::as_str).collect()
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    /// Look up a template, falling back to the default language.
    pub fn message(&self, language: &str, key: MessageKey) -> Result<&str, MissingKey> {
        self.languages
            .get(language)
            .and_then(|m| m.get(key.as_str()))
            .or_else(|| {
                self.languages
                    .get(&self.default_language)
                    .and_then(|m| m.get(key.as_str()))
            })
            .map(String::as_str)
            .ok_or(MissingKey(key))
    }

    /// Render a message, degrading a missing key to a diagnostic placeholder.
    pub fn render(&self, language: &str, key: MessageKey) -> String {
        match self.message(language, key) {
            Ok(template) => template.to_string(),
            Err(MissingKey(key)) => format!("message '{}' not found", key),
        }
    }

    /// Render a message and substitute `{name}` placeholders.
    pub fn render_with(&self, language: &str, key: MessageKey, args: &[(&str, &str)]) -> String {
        let mut text = self.render(language, key);
        for (name, value) in args {
            text = text.replace(&format!("{{{}}}", name), value);
        }
        text
    }
}
