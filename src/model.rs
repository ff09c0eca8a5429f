//! Audio record model and summary rendering.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::locale::{Catalog, MessageKey};

pub type UserId = i64;
pub type AudioId = u64;

/// One uploaded audio file being edited.
///
/// `file_id`, `file_size` and `mime_type` are fixed at ingestion; everything
/// else is mutated field-by-field through an edit session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioRecord {
    pub audio_id: AudioId,
    /// Opaque transport handle for the source stream.
    pub file_id: String,
    pub file_name: String,
    pub file_size: u64,
    pub mime_type: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub file_date: Option<NaiveDateTime>,
    pub cut_start: Option<f64>,
    pub cut_end: Option<f64>,
    /// Opaque transport handle for the thumbnail source blob.
    pub image_id: Option<String>,
}

/// Fields captured at ingestion when creating a record.
#[derive(Debug, Clone)]
pub struct NewAudio {
    pub file_id: String,
    pub file_name: String,
    pub file_size: u64,
    pub mime_type: String,
    pub title: Option<String>,
    pub file_date: Option<NaiveDateTime>,
}

/// Partial update applied to a record; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct AudioPatch {
    pub file_name: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub file_date: Option<NaiveDateTime>,
    pub cut: Option<(f64, f64)>,
    pub image_id: Option<String>,
}

impl AudioPatch {
    pub fn apply(&self, record: &mut AudioRecord) {
        if let Some(name) = &self.file_name {
            record.file_name = name.clone();
        }
        if let Some(title) = &self.title {
            record.title = Some(title.clone());
        }
        if let Some(artist) = &self.artist {
            record.artist = Some(artist.clone());
        }
        if let Some(album) = &self.album {
            record.album = Some(album.clone());
        }
        if let Some(genre) = &self.genre {
            record.genre = Some(genre.clone());
        }
        if let Some(date) = self.file_date {
            record.file_date = Some(date);
        }
        if let Some((start, end)) = self.cut {
            record.cut_start = Some(start);
            record.cut_end = Some(end);
        }
        if let Some(image_id) = &self.image_id {
            record.image_id = Some(image_id.clone());
        }
    }
}

/// Format seconds as `hh:mm:ss`, or `mm:ss` below an hour. `None` renders
/// as `-`.
pub fn format_timestamp(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds else {
        return "-".to_string();
    };
    if !seconds.is_finite() || seconds < 0.0 {
        return "-".to_string();
    }

    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Human-readable file size, e.g. `1.5 MB`.
pub fn format_file_size(size_bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if size_bytes == 0 {
        return "0 B".to_string();
    }

    let magnitude = ((size_bytes as f64).log2() / 10.0).floor() as usize;
    let magnitude = magnitude.min(UNITS.len() - 1);
    let value = size_bytes as f64 / 1024f64.powi(magnitude as i32);
    format!("{:.1} {}", value, UNITS[magnitude])
}

/// Render the anchor-message summary of a record through the catalog.
pub fn render_summary(record: &AudioRecord, catalog: &Catalog, language: &str) -> String {
    let not_set = catalog.render(language, MessageKey::NotSet);

    let mut file_name: String = record.file_name.chars().take(35).collect();
    if file_name.is_empty() {
        file_name = not_set.clone();
    }
    let file_date = record
        .file_date
        .map(|d| d.format("%d/%m/%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| not_set.clone());
    let image = if record.image_id.is_some() {
        catalog.render(language, MessageKey::WasSet)
    } else {
        not_set.clone()
    };

    catalog.render_with(
        language,
        MessageKey::AudioSummary,
        &[
            ("file_name", &file_name),
            ("title", record.title.as_deref().unwrap_or(&not_set)),
            ("mime_type", &record.mime_type),
            ("file_date", &file_date),
            ("file_size", &format_file_size(record.file_size)),
            ("genre", record.genre.as_deref().unwrap_or(&not_set)),
            ("album", record.album.as_deref().unwrap_or(&not_set)),
            ("artist", record.artist.as_deref().unwrap_or(&not_set)),
            ("cut_start", &format_timestamp(record.cut_start)),
            ("cut_end", &format_timestamp(record.cut_end)),
            ("image", &image),
        ],
    )
}
