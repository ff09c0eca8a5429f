use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use super::state::{EditField, EditSession};
use crate::error::{FilenameError, ParseError};
use crate::ingest::{self, AudioUpload};
use crate::locale::{Catalog, MessageKey};
use crate::model::{render_summary, AudioPatch, UserId};
use crate::parse::{parse_cut_range, parse_date, validate_filename, FilenamePolicy};
use crate::store::{AudioStore, SessionStore};
use crate::transport::{IncomingMessage, MessageId, Transport, TransportError};

/// Limits and policies the machine enforces, derived from [`crate::Config`].
#[derive(Debug, Clone)]
pub struct MachineConfig {
    pub max_tag_length: usize,
    pub max_image_mib: u64,
    pub max_audio_mib: u64,
    pub filename: FilenamePolicy,
    pub thumbnail: crate::thumbnail::ThumbnailSpec,
    pub default_language: String,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            max_tag_length: 64,
            max_image_mib: 5,
            max_audio_mib: 40,
            filename: FilenamePolicy::default(),
            thumbnail: crate::thumbnail::ThumbnailSpec::default(),
            default_language: "en".to_string(),
        }
    }
}

/// The edit-session state machine.
///
/// Routes each inbound update to the parser/validator for the field the
/// user's open session is waiting on, applies the resulting record update,
/// and keeps the anchor summary message current. Commit ("done") hands the
/// record to the transform engine.
pub struct EditMachine {
    pub(crate) audio: Arc<dyn AudioStore>,
    pub(crate) sessions: Arc<dyn SessionStore>,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) config: MachineConfig,
}

/// Result of validating one input against the active field.
enum FieldOutcome {
    Patch(AudioPatch),
    Invalid {
        message: String,
        delete_input: bool,
    },
}

impl EditMachine {
    pub fn new(
        audio: Arc<dyn AudioStore>,
        sessions: Arc<dyn SessionStore>,
        transport: Arc<dyn Transport>,
        catalog: Arc<Catalog>,
        config: MachineConfig,
    ) -> Self {
        Self {
            audio,
            sessions,
            transport,
            catalog,
            config,
        }
    }

    pub(crate) async fn language(&self, user_id: UserId) -> String {
        match self.sessions.language(user_id).await {
            Ok(Some(language)) => language,
            _ => self.config.default_language.clone(),
        }
    }

    /// Handle an inbound audio/document/voice upload: create the record and
    /// show its summary.
    pub async fn handle_audio_upload(&self, user_id: UserId, upload: AudioUpload) -> Result<()> {
        let language = self.language(user_id).await;

        let new = match ingest::ingest(upload, self.config.max_audio_mib) {
            Ok(new) => new,
            Err(ingest::IngestError::TooLarge { limit_mib }) => {
                let message = self.catalog.render_with(
                    &language,
                    MessageKey::ErrorAudioTooLarge,
                    &[("limit", &limit_mib.to_string())],
                );
                self.transport
                    .reply(user_id, &message)
                    .await
                    .map_err(anyhow::Error::new)?;
                return Ok(());
            }
        };

        let record = self.audio.create(user_id, new).await?;
        info!(
            "Ingested audio {} for user {}: {}",
            record.audio_id, user_id, record.file_name
        );

        let summary = render_summary(&record, &self.catalog, &language);
        self.transport
            .reply(user_id, &summary)
            .await
            .map_err(anyhow::Error::new)?;
        Ok(())
    }

    /// Handle a text/photo message while a session may be open.
    pub async fn handle_message(&self, user_id: UserId, message: IncomingMessage) -> Result<()> {
        let language = self.language(user_id).await;

        let Some(session) = self.sessions.get_waiting_for(user_id).await? else {
            // Nothing pending; prompt for an upload instead.
            self.transport
                .reply(user_id, &self.catalog.render(&language, MessageKey::SendAudio))
                .await
                .map_err(anyhow::Error::new)?;
            return Ok(());
        };

        match self.validate_field_input(session.field, &message, &language) {
            FieldOutcome::Invalid {
                message: error_text,
                delete_input,
            } => {
                self.transport
                    .reply(user_id, &error_text)
                    .await
                    .map_err(anyhow::Error::new)?;
                if delete_input {
                    let _ = self
                        .transport
                        .delete_message(user_id, message.message_id)
                        .await;
                }
                Ok(())
            }
            FieldOutcome::Patch(patch) => {
                let updated = self.audio.update(user_id, session.audio_id, patch).await?;
                let Some(record) = updated else {
                    // Record vanished under the session.
                    self.sessions.clear_waiting_for(user_id).await?;
                    self.transport
                        .reply(
                            user_id,
                            &self.catalog.render(&language, MessageKey::AudioNotFound),
                        )
                        .await
                        .map_err(anyhow::Error::new)?;
                    return Ok(());
                };

                // The session stays open; the next input is still routed to
                // the same field until the user cancels or picks another
                // action.
                let summary = render_summary(&record, &self.catalog, &language);
                self.refresh_anchor(user_id, &session, &summary).await?;
                let _ = self
                    .transport
                    .delete_message(user_id, message.message_id)
                    .await;
                Ok(())
            }
        }
    }

    /// Handle an action callback with `"<action>:<audio_id>"` payload.
    pub async fn handle_callback(
        &self,
        user_id: UserId,
        message_id: MessageId,
        data: &str,
    ) -> Result<()> {
        let language = self.language(user_id).await;

        let parsed = data
            .split_once(':')
            .and_then(|(action, id)| id.parse::<u64>().ok().map(|id| (action, id)));
        let Some((action, audio_id)) = parsed else {
            self.transport
                .reply(
                    user_id,
                    &self.catalog.render(&language, MessageKey::InvalidAction),
                )
                .await
                .map_err(anyhow::Error::new)?;
            return Ok(());
        };

        let Some(record) = self.audio.get(user_id, audio_id).await? else {
            let _ = self.transport.delete_message(user_id, message_id).await;
            self.transport
                .reply(
                    user_id,
                    &self.catalog.render(&language, MessageKey::AudioNotFound),
                )
                .await
                .map_err(anyhow::Error::new)?;
            return Ok(());
        };

        if let Some(field) = EditField::parse(action) {
            self.sessions
                .set_waiting_for(
                    user_id,
                    EditSession {
                        field,
                        audio_id,
                        anchor_message_id: message_id,
                    },
                )
                .await?;
            let prompt = self.catalog.render(&language, field.prompt_key());
            self.edit_or_reply(user_id, message_id, &prompt).await?;
        } else if action == "cancel" {
            self.sessions.clear_waiting_for(user_id).await?;
            let summary = render_summary(&record, &self.catalog, &language);
            self.edit_or_reply(user_id, message_id, &summary).await?;
        } else if action == "done" {
            self.sessions.clear_waiting_for(user_id).await?;
            let _ = self
                .transport
                .reply(
                    user_id,
                    &self.catalog.render(&language, MessageKey::AudioProcessing),
                )
                .await;
            self.commit(user_id, record, message_id, &language)
                .await
                .context("commit failed")?;
        } else {
            self.transport
                .reply(
                    user_id,
                    &self.catalog.render(&language, MessageKey::InvalidAction),
                )
                .await
                .map_err(anyhow::Error::new)?;
        }

        Ok(())
    }

    /// Edit the anchor message, degrading to a fresh reply when the target
    /// is gone and swallowing no-op edits.
    pub(crate) async fn refresh_anchor(
        &self,
        user_id: UserId,
        session: &EditSession,
        text: &str,
    ) -> Result<()> {
        self.edit_or_reply(user_id, session.anchor_message_id, text)
            .await
    }

    async fn edit_or_reply(
        &self,
        user_id: UserId,
        message_id: MessageId,
        text: &str,
    ) -> Result<()> {
        match self.transport.edit_message(user_id, message_id, text).await {
            Ok(()) => Ok(()),
            Err(TransportError::NotModified) => Ok(()),
            Err(TransportError::MessageMissing) => {
                self.transport
                    .reply(user_id, text)
                    .await
                    .map(|_| ())
                    .map_err(anyhow::Error::new)
            }
            Err(e) => Err(anyhow::Error::new(e)),
        }
    }

    fn validate_field_input(
        &self,
        field: EditField,
        message: &IncomingMessage,
        language: &str,
    ) -> FieldOutcome {
        let prompt = |delete_input: bool| FieldOutcome::Invalid {
            message: self.catalog.render(language, field.prompt_key()),
            delete_input,
        };

        match field {
            EditField::Cut => {
                let Some(text) = non_empty_text(message) else {
                    return prompt(true);
                };
                match parse_cut_range(text) {
                    Ok((start, end)) => FieldOutcome::Patch(AudioPatch {
                        cut: Some((start, end)),
                        ..Default::default()
                    }),
                    Err(e) => FieldOutcome::Invalid {
                        message: self.render_parse_error(language, &e),
                        delete_input: true,
                    },
                }
            }
            EditField::Name => {
                let Some(text) = non_empty_text(message) else {
                    return prompt(true);
                };
                match validate_filename(text, &self.config.filename) {
                    Ok(sanitized) => FieldOutcome::Patch(AudioPatch {
                        file_name: Some(sanitized),
                        ..Default::default()
                    }),
                    Err(e) => FieldOutcome::Invalid {
                        message: self.render_filename_error(language, &e),
                        delete_input: true,
                    },
                }
            }
            EditField::Image => {
                let Some(photo) = &message.photo else {
                    return prompt(true);
                };
                if photo.file_size > self.config.max_image_mib * 1024 * 1024 {
                    return FieldOutcome::Invalid {
                        message: self
                            .catalog
                            .render(language, MessageKey::ErrorImageTooLarge),
                        delete_input: true,
                    };
                }
                FieldOutcome::Patch(AudioPatch {
                    image_id: Some(photo.file_id.clone()),
                    ..Default::default()
                })
            }
            EditField::Date => {
                let Some(text) = non_empty_text(message) else {
                    return prompt(true);
                };
                match parse_date(text) {
                    Some(date) => FieldOutcome::Patch(AudioPatch {
                        file_date: Some(date),
                        ..Default::default()
                    }),
                    None => FieldOutcome::Invalid {
                        message: self.catalog.render(language, MessageKey::ErrorDateInvalid),
                        delete_input: true,
                    },
                }
            }
            EditField::Genre | EditField::Album | EditField::Artist | EditField::Title => {
                // Genre and artist replies historically left the offending
                // message in place.
                let delete_input = matches!(field, EditField::Album | EditField::Title);
                let Some(text) = non_empty_text(message) else {
                    return prompt(delete_input);
                };
                if text.chars().count() > self.config.max_tag_length {
                    let key = field
                        .too_long_key()
                        .unwrap_or(MessageKey::InvalidAction);
                    return FieldOutcome::Invalid {
                        message: self.catalog.render(language, key),
                        delete_input,
                    };
                }
                let value = Some(text.to_string());
                let patch = match field {
                    EditField::Genre => AudioPatch {
                        genre: value,
                        ..Default::default()
                    },
                    EditField::Album => AudioPatch {
                        album: value,
                        ..Default::default()
                    },
                    EditField::Artist => AudioPatch {
                        artist: value,
                        ..Default::default()
                    },
                    _ => AudioPatch {
                        title: value,
                        ..Default::default()
                    },
                };
                FieldOutcome::Patch(patch)
            }
        }
    }

    fn render_parse_error(&self, language: &str, error: &ParseError) -> String {
        match error {
            ParseError::InvalidRangeFormat(range) => self.catalog.render_with(
                language,
                error.message_key(),
                &[("range", range)],
            ),
            _ => self.catalog.render(language, error.message_key()),
        }
    }

    fn render_filename_error(&self, language: &str, error: &FilenameError) -> String {
        match error {
            FilenameError::InvalidExtension { allowed } => self.catalog.render_with(
                language,
                error.message_key(),
                &[("extensions", allowed)],
            ),
            _ => self.catalog.render(language, error.message_key()),
        }
    }
}

fn non_empty_text(message: &IncomingMessage) -> Option<&str> {
    message
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
