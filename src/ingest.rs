//! Ingestion of inbound audio uploads into records.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::model::NewAudio;

/// What kind of attachment carried the audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// A proper audio attachment, may carry a title.
    Audio,
    /// A document with an audio MIME type; no title.
    Document,
    /// A voice note; gets a synthetic file name.
    Voice,
}

/// An inbound audio upload as delivered by the transport.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub kind: UploadKind,
    pub file_id: String,
    pub file_name: Option<String>,
    pub file_size: u64,
    pub mime_type: String,
    pub title: Option<String>,
    pub date: Option<NaiveDateTime>,
}

#[derive(Debug, Error, PartialEq)]
pub enum IngestError {
    #[error("audio exceeds {limit_mib} MiB")]
    TooLarge { limit_mib: u64 },
}

/// Validate an upload against the size limit and shape it into record
/// fields. Voice notes get a synthetic `voice_<file_id>.mp3` name; titles
/// are only taken from proper audio attachments.
pub fn ingest(upload: AudioUpload, max_audio_mib: u64) -> Result<NewAudio, IngestError> {
    if upload.file_size > max_audio_mib * 1024 * 1024 {
        return Err(IngestError::TooLarge {
            limit_mib: max_audio_mib,
        });
    }

    let file_name = match upload.kind {
        UploadKind::Voice => format!("voice_{}.mp3", upload.file_id),
        _ => upload
            .file_name
            .unwrap_or_else(|| format!("audio_{}.mp3", upload.file_id)),
    };
    let title = match upload.kind {
        UploadKind::Audio => upload.title,
        _ => None,
    };

    Ok(NewAudio {
        file_id: upload.file_id,
        file_name,
        file_size: upload.file_size,
        mime_type: upload.mime_type,
        title,
        file_date: upload.date,
    })
}
