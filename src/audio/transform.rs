//! The audio transform engine: optional trim plus tagged re-export.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use super::encode::{self, OutputFormat, TagSet};
use super::file::AudioFile;
use crate::error::TransformError;
use crate::locale::Catalog;

/// How the export relates to the source material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformOutcome {
    /// Effectively untrimmed: the range starts at 0 and covers at least 99%
    /// of the source.
    Saved,
    /// A real cut was made.
    Cut,
}

/// Boundary result: the engine never lets a failure escape, it always
/// reports a flag and a rendered message.
#[derive(Debug)]
pub struct TransformReport {
    pub success: bool,
    pub message: String,
    pub output: Option<PathBuf>,
}

/// Trim `input` to `[start, end]` (either bound optional) and re-export it
/// to `output` with `tags` embedded. Returns the outcome and the actual
/// output path, which gains a `.mp3` extension when `output` has none.
pub fn process(
    input: &Path,
    output: &Path,
    start: Option<f64>,
    end: Option<f64>,
    tags: &TagSet,
) -> Result<(TransformOutcome, PathBuf), TransformError> {
    let audio = AudioFile::open(input)?;
    let duration = audio.duration_seconds;

    // Default to the full range when a bound is absent.
    let start = start.unwrap_or(0.0);
    let end = end.unwrap_or(duration);

    if start < 0.0 || end < 0.0 {
        return Err(TransformError::NegativeTime);
    }
    if start >= end {
        return Err(TransformError::InvalidOrder);
    }
    if start > duration {
        return Err(TransformError::StartBeyondLength);
    }
    // An end past the source is clamped, not an error.
    let end = end.min(duration);

    let (format, output) = resolve_output(output)?;

    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let samples = if start == 0.0 && end >= duration {
        audio.samples.clone()
    } else {
        audio.trimmed(start, end)
    };

    encode::write_samples(&output, format, &samples, audio.sample_rate, audio.channels)?;
    encode::write_tags(&output, format, tags)?;

    let outcome = if start == 0.0 && end >= duration * 0.99 {
        TransformOutcome::Saved
    } else {
        TransformOutcome::Cut
    };

    info!(
        "Exported {} ({:.1}s-{:.1}s of {:.1}s) to {}",
        if outcome == TransformOutcome::Cut { "cut" } else { "full audio" },
        start,
        end,
        duration,
        output.display()
    );

    Ok((outcome, output))
}

/// Determine the output container from the path extension; no extension
/// defaults to MP3 and the path gains `.mp3`.
fn resolve_output(output: &Path) -> Result<(OutputFormat, PathBuf), TransformError> {
    match output.extension().and_then(|e| e.to_str()) {
        Some(ext) => {
            let format = OutputFormat::from_extension(ext)
                .ok_or_else(|| TransformError::UnsupportedContainer(ext.to_ascii_lowercase()))?;
            Ok((format, output.to_path_buf()))
        }
        None => {
            let mut path = output.as_os_str().to_owned();
            path.push(".mp3");
            Ok((OutputFormat::Mp3, PathBuf::from(path)))
        }
    }
}

/// Run [`process`] and convert every failure into a `(success, message)`
/// report rendered through the catalog; nothing propagates past here.
pub fn process_checked(
    input: &Path,
    output: &Path,
    start: Option<f64>,
    end: Option<f64>,
    tags: &TagSet,
    catalog: &Catalog,
    language: &str,
) -> TransformReport {
    match process(input, output, start, end, tags) {
        Ok((outcome, path)) => {
            let key = match outcome {
                TransformOutcome::Saved => crate::locale::MessageKey::AudioSaved,
                TransformOutcome::Cut => crate::locale::MessageKey::AudioCutSuccess,
            };
            TransformReport {
                success: true,
                message: catalog.render(language, key),
                output: Some(path),
            }
        }
        Err(e) => {
            error!("Error processing audio {}: {}", input.display(), e);
            let rendered = catalog.render(language, e.message_key());
            let message = if e.is_processing_failure() {
                format!("{}: {}", rendered, e)
            } else {
                rendered
            };
            TransformReport {
                success: false,
                message,
                output: None,
            }
        }
    }
}
