use serde::{Deserialize, Serialize};

use crate::locale::MessageKey;
use crate::model::AudioId;
use crate::transport::MessageId;

/// The audio field an open session is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditField {
    Image,
    Name,
    Cut,
    Genre,
    Album,
    Artist,
    Title,
    Date,
}

impl EditField {
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "image" => Some(EditField::Image),
            "name" => Some(EditField::Name),
            "cut" => Some(EditField::Cut),
            "genre" => Some(EditField::Genre),
            "album" => Some(EditField::Album),
            "artist" => Some(EditField::Artist),
            "title" => Some(EditField::Title),
            "date" => Some(EditField::Date),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EditField::Image => "image",
            EditField::Name => "name",
            EditField::Cut => "cut",
            EditField::Genre => "genre",
            EditField::Album => "album",
            EditField::Artist => "artist",
            EditField::Title => "title",
            EditField::Date => "date",
        }
    }

    /// The "waiting for X" prompt shown both on field selection and on
    /// wrong-type input.
    pub fn prompt_key(&self) -> MessageKey {
        match self {
            EditField::Image => MessageKey::WaitingForImage,
            EditField::Name => MessageKey::WaitingForName,
            EditField::Cut => MessageKey::WaitingForCut,
            EditField::Genre => MessageKey::WaitingForGenre,
            EditField::Album => MessageKey::WaitingForAlbum,
            EditField::Artist => MessageKey::WaitingForArtist,
            EditField::Title => MessageKey::WaitingForTitle,
            EditField::Date => MessageKey::WaitingForDate,
        }
    }

    /// "Too long" error for the plain text tag fields.
    pub fn too_long_key(&self) -> Option<MessageKey> {
        match self {
            EditField::Genre => Some(MessageKey::ErrorGenreTooLong),
            EditField::Album => Some(MessageKey::ErrorAlbumTooLong),
            EditField::Artist => Some(MessageKey::ErrorArtistTooLong),
            EditField::Title => Some(MessageKey::ErrorTitleTooLong),
            _ => None,
        }
    }
}

/// An open edit session: which field the next input belongs to, on which
/// record, and which message shows the record summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditSession {
    pub field: EditField,
    pub audio_id: AudioId,
    pub anchor_message_id: MessageId,
}
