//! The "done" flow: download, transform off the event loop, deliver,
//! delete the source record. Every temp resource is scoped to one commit
//! and removed on all exit paths.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use super::machine::EditMachine;
use crate::audio::{transform, TagSet, TransformReport};
use crate::locale::MessageKey;
use crate::model::{AudioRecord, UserId};
use crate::thumbnail;
use crate::transport::{MessageId, OutgoingAudio};

impl EditMachine {
    /// Commit the edits on `record`: produce the trimmed/tagged output and
    /// deliver it. The record is only deleted after successful delivery;
    /// on any failure it stays untouched and the user is informed.
    pub(crate) async fn commit(
        &self,
        user_id: UserId,
        record: AudioRecord,
        anchor_message_id: MessageId,
        language: &str,
    ) -> Result<()> {
        // Working directory scoped to this commit; dropped (and removed)
        // on every exit path below.
        let workdir = tempfile::Builder::new()
            .prefix(&format!("tagtrim-{}-", record.audio_id))
            .tempdir()
            .context("Failed to create commit working directory")?;

        let source = match self
            .transport
            .download(&record.file_id, workdir.path())
            .await
        {
            Ok(path) => path,
            Err(e) => {
                error!("Failed to download source {}: {}", record.file_id, e);
                let _ = self
                    .transport
                    .reply(
                        user_id,
                        &self
                            .catalog
                            .render(language, MessageKey::ErrorProcessingAudio),
                    )
                    .await;
                return Ok(());
            }
        };

        let thumbnail = self.prepare_thumbnail(&record, workdir.path()).await;

        let extension = Path::new(&record.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_ascii_lowercase()))
            .unwrap_or_else(|| ".mp3".to_string());
        let output = workdir
            .path()
            .join(format!("edited_{}{}", record.audio_id, extension));

        let report = self
            .run_transform(&record, source, output, language.to_string())
            .await?;

        if !report.success {
            let _ = self.transport.reply(user_id, &report.message).await;
            return Ok(());
        }
        let Some(output) = report.output else {
            // A successful report always carries the output path.
            let _ = self
                .transport
                .reply(
                    user_id,
                    &self
                        .catalog
                        .render(language, MessageKey::ErrorProcessingAudio),
                )
                .await;
            return Ok(());
        };

        let duration_secs =
            (record.cut_end.unwrap_or(0.0) - record.cut_start.unwrap_or(0.0)).max(0.0) as u32;
        let delivery = OutgoingAudio {
            path: &output,
            file_name: &record.file_name,
            title: record.title.as_deref(),
            performer: record.artist.as_deref(),
            duration_secs,
            thumbnail: thumbnail.as_deref(),
        };

        match self.transport.send_audio(user_id, delivery).await {
            Ok(()) => {
                self.audio.delete(user_id, record.audio_id).await?;
                let _ = self
                    .transport
                    .delete_message(user_id, anchor_message_id)
                    .await;
                info!(
                    "Committed audio {} for user {}: {}",
                    record.audio_id, user_id, report.message
                );
            }
            Err(e) => {
                error!("Failed to deliver audio {}: {}", record.audio_id, e);
                let _ = self
                    .transport
                    .reply(
                        user_id,
                        &self
                            .catalog
                            .render(language, MessageKey::ErrorProcessingAudio),
                    )
                    .await;
            }
        }

        Ok(())
    }

    /// Download and process the thumbnail, if one was set. Failures are
    /// logged and the commit continues without a thumbnail.
    async fn prepare_thumbnail(&self, record: &AudioRecord, workdir: &Path) -> Option<PathBuf> {
        let image_id = record.image_id.as_deref()?;

        let raw = match self.transport.download(image_id, workdir).await {
            Ok(path) => path,
            Err(e) => {
                warn!(
                    "Failed to download image {}, continuing without thumbnail: {}",
                    image_id, e
                );
                return None;
            }
        };

        let dest = workdir.join("thumbnail.jpg");
        match thumbnail::process_image(&raw, &dest, &self.config.thumbnail) {
            Ok(()) => Some(dest),
            Err(e) => {
                warn!(
                    "Failed to process image {}, continuing without thumbnail: {}",
                    image_id, e
                );
                None
            }
        }
    }

    /// Run the blocking decode/encode work on the blocking thread pool so a
    /// large trim does not stall message handling for other users.
    async fn run_transform(
        &self,
        record: &AudioRecord,
        source: PathBuf,
        output: PathBuf,
        language: String,
    ) -> Result<TransformReport> {
        let tags = TagSet {
            title: record.title.clone(),
            artist: record.artist.clone(),
            album: record.album.clone(),
            genre: record.genre.clone(),
            date: record.file_date.map(|d| d.format("%Y-%m-%d").to_string()),
        };
        let (start, end) = (record.cut_start, record.cut_end);
        let catalog = Arc::clone(&self.catalog);

        tokio::task::spawn_blocking(move || {
            transform::process_checked(&source, &output, start, end, &tags, &catalog, &language)
        })
        .await
        .context("Transform task panicked")
    }
}
