use thiserror::Error;

use crate::locale::MessageKey;

/// Failures while parsing a timestamp or cut range from user text.
///
/// These are locale-independent kinds; rendering into user-facing text is
/// deferred to the message catalog at the handler boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("empty time string")]
    EmptyTime,

    #[error("unsupported time format: {0}")]
    UnsupportedFormat(String),

    #[error("empty cut range")]
    EmptyRange,

    #[error("invalid cut range: {0}")]
    InvalidRangeFormat(String),

    #[error("time values must not be negative")]
    NegativeTime,

    #[error("cut start must be before cut end")]
    InvalidOrder,
}

impl ParseError {
    pub fn message_key(&self) -> MessageKey {
        match self {
            ParseError::EmptyTime => MessageKey::ErrorUnsupportedTime,
            ParseError::UnsupportedFormat(_) => MessageKey::ErrorUnsupportedTime,
            ParseError::EmptyRange => MessageKey::ErrorEmptyCut,
            ParseError::InvalidRangeFormat(_) => MessageKey::ErrorInvalidCutRange,
            ParseError::NegativeTime => MessageKey::ErrorNegativeTime,
            ParseError::InvalidOrder => MessageKey::ErrorInvalidOrder,
        }
    }
}

/// Failures while validating a user-supplied file name.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilenameError {
    #[error("empty filename")]
    Empty,

    #[error("filename exceeds {0} characters")]
    TooLong(usize),

    #[error("filename contains a null character")]
    InvalidCharacter,

    #[error("filename contains a relative path component")]
    PathTraversal,

    #[error("filename contains a directory component")]
    DirectoryTraversal,

    #[error("extension not accepted, expected one of: {allowed}")]
    InvalidExtension { allowed: String },

    #[error("filename is invalid after sanitization")]
    Invalid,
}

impl FilenameError {
    pub fn message_key(&self) -> MessageKey {
        match self {
            FilenameError::Empty => MessageKey::ErrorEmptyFilename,
            FilenameError::TooLong(_) => MessageKey::ErrorFilenameTooLong,
            FilenameError::InvalidCharacter => MessageKey::ErrorInvalidCharacter,
            FilenameError::PathTraversal => MessageKey::ErrorPathTraversal,
            FilenameError::DirectoryTraversal => MessageKey::ErrorDirectoryTraversal,
            FilenameError::InvalidExtension { .. } => MessageKey::ErrorInvalidAudioFormat,
            FilenameError::Invalid => MessageKey::ErrorInvalidFilename,
        }
    }
}

/// Failures inside the audio transform engine.
///
/// The first four are validation kinds the user can correct; the rest are
/// decode/encode/IO faults that surface as a generic processing failure with
/// the cause appended for diagnostics.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("time values must not be negative")]
    NegativeTime,

    #[error("cut start must be before cut end")]
    InvalidOrder,

    #[error("cut start is beyond the end of the audio")]
    StartBeyondLength,

    #[error("unsupported output container: {0}")]
    UnsupportedContainer(String),

    #[error("no audio track found")]
    NoAudioTrack,

    #[error("decode failed: {0}")]
    Decode(#[from] symphonia::core::errors::Error),

    #[error("encode failed: {0}")]
    Encode(String),

    #[error("tag write failed: {0}")]
    Tag(#[from] lofty::error::LoftyError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TransformError {
    pub fn message_key(&self) -> MessageKey {
        match self {
            TransformError::NegativeTime => MessageKey::ErrorNegativeTime,
            TransformError::InvalidOrder => MessageKey::ErrorInvalidOrder,
            TransformError::StartBeyondLength => MessageKey::ErrorStartBeyondLength,
            TransformError::UnsupportedContainer(_)
            | TransformError::NoAudioTrack
            | TransformError::Decode(_)
            | TransformError::Encode(_)
            | TransformError::Tag(_)
            | TransformError::Io(_) => MessageKey::ErrorCutFailed,
        }
    }

    /// Whether the underlying cause should be appended to the rendered
    /// message. Validation kinds stand on their own.
    pub fn is_processing_failure(&self) -> bool {
        matches!(self.message_key(), MessageKey::ErrorCutFailed)
    }
}
