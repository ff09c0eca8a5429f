//! Chat transport collaborator.
//!
//! The actual messaging platform lives behind this trait; the session
//! machine only needs reply/edit/delete/send-audio/download. Edit races are
//! typed so handlers can degrade gracefully instead of failing the update.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::model::UserId;

pub type MessageId = i64;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The target message was deleted or never existed.
    #[error("target message is gone")]
    MessageMissing,

    /// An edit produced identical content.
    #[error("message not modified")]
    NotModified,

    /// The message could not be deleted (permissions).
    #[error("message delete forbidden")]
    DeleteForbidden,

    #[error("transport failure: {0}")]
    Other(String),
}

/// Inbound message, already narrowed to what the edit flow consumes.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub message_id: MessageId,
    pub text: Option<String>,
    /// The largest available resolution variant, when a photo is attached.
    pub photo: Option<PhotoAttachment>,
}

#[derive(Debug, Clone)]
pub struct PhotoAttachment {
    pub file_id: String,
    pub file_size: u64,
}

/// Outbound audio delivery parameters.
#[derive(Debug, Clone)]
pub struct OutgoingAudio<'a> {
    pub path: &'a Path,
    pub file_name: &'a str,
    pub title: Option<&'a str>,
    pub performer: Option<&'a str>,
    pub duration_secs: u32,
    pub thumbnail: Option<&'a Path>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a new text message, returning its id.
    async fn reply(&self, user_id: UserId, text: &str) -> Result<MessageId, TransportError>;

    /// Edit an existing message in place.
    async fn edit_message(
        &self,
        user_id: UserId,
        message_id: MessageId,
        text: &str,
    ) -> Result<(), TransportError>;

    async fn delete_message(
        &self,
        user_id: UserId,
        message_id: MessageId,
    ) -> Result<(), TransportError>;

    async fn send_audio(
        &self,
        user_id: UserId,
        audio: OutgoingAudio<'_>,
    ) -> Result<(), TransportError>;

    /// Download the binary stream behind `file_id` into `dest_dir`,
    /// returning the downloaded path.
    async fn download(&self, file_id: &str, dest_dir: &Path) -> Result<PathBuf, TransportError>;
}
