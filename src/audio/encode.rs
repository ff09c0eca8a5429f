//! Export encoders and tag embedding.
//!
//! Two output containers are supported natively: WAV via hound and MP3 via
//! LAME. Tags are written after encoding with lofty (ID3v2 for MP3, RIFF
//! INFO for WAV); empty fields are omitted rather than written blank.

use std::path::Path;

use lofty::config::WriteOptions;
use lofty::prelude::*;
use lofty::tag::{Tag, TagType};
use mp3lame_encoder::{Bitrate, Builder, FlushNoGap, InterleavedPcm, MonoPcm, Quality};

use crate::error::TransformError;

/// Output container, determined by the output path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Mp3,
    Wav,
}

impl OutputFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => Some(OutputFormat::Mp3),
            "wav" => Some(OutputFormat::Wav),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Mp3 => "mp3",
            OutputFormat::Wav => "wav",
        }
    }

    fn tag_type(&self) -> TagType {
        match self {
            OutputFormat::Mp3 => TagType::Id3v2,
            OutputFormat::Wav => TagType::RiffInfo,
        }
    }
}

/// Metadata tags to embed on export. Absent fields are not written.
#[derive(Debug, Clone, Default)]
pub struct TagSet {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub date: Option<String>,
}

impl TagSet {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.album.is_none()
            && self.genre.is_none()
            && self.date.is_none()
    }
}

/// Write interleaved 16-bit PCM to `path` in the requested container.
pub fn write_samples(
    path: &Path,
    format: OutputFormat,
    samples: &[i16],
    sample_rate: u32,
    channels: u16,
) -> Result<(), TransformError> {
    match format {
        OutputFormat::Wav => write_wav(path, samples, sample_rate, channels),
        OutputFormat::Mp3 => write_mp3(path, samples, sample_rate, channels),
    }
}

fn write_wav(
    path: &Path,
    samples: &[i16],
    sample_rate: u32,
    channels: u16,
) -> Result<(), TransformError> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| TransformError::Encode(format!("failed to create WAV file: {}", e)))?;
    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| TransformError::Encode(format!("failed to write sample: {}", e)))?;
    }
    writer
        .finalize()
        .map_err(|e| TransformError::Encode(format!("failed to finalize WAV file: {}", e)))?;

    Ok(())
}

fn write_mp3(
    path: &Path,
    samples: &[i16],
    sample_rate: u32,
    channels: u16,
) -> Result<(), TransformError> {
    let lame = |e: mp3lame_encoder::BuildError| {
        TransformError::Encode(format!("LAME encoder setup failed: {:?}", e))
    };

    let mut builder = Builder::new()
        .ok_or_else(|| TransformError::Encode("failed to initialize LAME encoder".to_string()))?;
    builder
        .set_num_channels(u8::try_from(channels).map_err(|_| {
            TransformError::Encode(format!("unsupported channel count: {}", channels))
        })?)
        .map_err(lame)?;
    builder.set_sample_rate(sample_rate).map_err(lame)?;
    builder.set_brate(Bitrate::Kbps192).map_err(lame)?;
    builder.set_quality(Quality::Good).map_err(lame)?;
    let mut encoder = builder.build().map_err(lame)?;

    let mut output: Vec<u8> = Vec::new();
    output.reserve(mp3lame_encoder::max_required_buffer_size(samples.len()));

    let encoded = if channels == 1 {
        encoder.encode(MonoPcm(samples), output.spare_capacity_mut())
    } else {
        encoder.encode(InterleavedPcm(samples), output.spare_capacity_mut())
    }
    .map_err(|e| TransformError::Encode(format!("MP3 encode failed: {:?}", e)))?;
    // SAFETY: the encoder initialized `encoded` bytes of the spare capacity.
    unsafe {
        output.set_len(output.len() + encoded);
    }

    let flushed = encoder
        .flush::<FlushNoGap>(output.spare_capacity_mut())
        .map_err(|e| TransformError::Encode(format!("MP3 flush failed: {:?}", e)))?;
    // SAFETY: same as above for the flushed trailer.
    unsafe {
        output.set_len(output.len() + flushed);
    }

    std::fs::write(path, &output)?;
    Ok(())
}

/// Embed the non-empty tag fields into the exported file.
pub fn write_tags(path: &Path, format: OutputFormat, tags: &TagSet) -> Result<(), TransformError> {
    if tags.is_empty() {
        return Ok(());
    }

    let mut tag = Tag::new(format.tag_type());
    if let Some(title) = &tags.title {
        tag.set_title(title.clone());
    }
    if let Some(artist) = &tags.artist {
        tag.set_artist(artist.clone());
    }
    if let Some(album) = &tags.album {
        tag.set_album(album.clone());
    }
    if let Some(genre) = &tags.genre {
        tag.set_genre(genre.clone());
    }
    if let Some(date) = &tags.date {
        tag.insert_text(ItemKey::RecordingDate, date.clone());
    }

    tag.save_to_path(path, WriteOptions::default())?;
    Ok(())
}
