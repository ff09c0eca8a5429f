//! Storage collaborator traits plus an in-memory implementation.
//!
//! Records are read-modify-write with last-write-wins semantics; there is no
//! cross-record transaction. The in-memory store backs tests and single
//! process deployments.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::model::{AudioId, AudioPatch, AudioRecord, NewAudio, UserId};
use crate::session::EditSession;

/// Persistent audio records, keyed by `(user_id, audio_id)`.
#[async_trait]
pub trait AudioStore: Send + Sync {
    async fn get(&self, user_id: UserId, audio_id: AudioId) -> Result<Option<AudioRecord>>;

    async fn create(&self, user_id: UserId, new: NewAudio) -> Result<AudioRecord>;

    /// Apply a partial update, returning the updated record; `None` when the
    /// record does not exist.
    async fn update(
        &self,
        user_id: UserId,
        audio_id: AudioId,
        patch: AudioPatch,
    ) -> Result<Option<AudioRecord>>;

    async fn delete(&self, user_id: UserId, audio_id: AudioId) -> Result<()>;
}

/// Per-user edit session and language, at most one open session per user.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get_waiting_for(&self, user_id: UserId) -> Result<Option<EditSession>>;

    async fn set_waiting_for(&self, user_id: UserId, session: EditSession) -> Result<()>;

    async fn clear_waiting_for(&self, user_id: UserId) -> Result<()>;

    async fn language(&self, user_id: UserId) -> Result<Option<String>>;

    async fn set_language(&self, user_id: UserId, language: &str) -> Result<()>;
}

/// In-memory store: HashMaps behind an async RwLock.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryStoreInner>>,
    next_audio_id: Arc<AtomicU64>,
}

#[derive(Default)]
struct MemoryStoreInner {
    audio: HashMap<UserId, HashMap<AudioId, AudioRecord>>,
    sessions: HashMap<UserId, EditSession>,
    languages: HashMap<UserId, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryStoreInner::default())),
            next_audio_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

#[async_trait]
impl AudioStore for MemoryStore {
    async fn get(&self, user_id: UserId, audio_id: AudioId) -> Result<Option<AudioRecord>> {
        let inner = self.inner.read().await;
        Ok(inner
            .audio
            .get(&user_id)
            .and_then(|m| m.get(&audio_id))
            .cloned())
    }

    async fn create(&self, user_id: UserId, new: NewAudio) -> Result<AudioRecord> {
        let audio_id = self.next_audio_id.fetch_add(1, Ordering::SeqCst);
        let record = AudioRecord {
            audio_id,
            file_id: new.file_id,
            file_name: new.file_name,
            file_size: new.file_size,
            mime_type: new.mime_type,
            title: new.title,
            artist: None,
            album: None,
            genre: None,
            file_date: new.file_date,
            cut_start: None,
            cut_end: None,
            image_id: None,
        };

        let mut inner = self.inner.write().await;
        inner
            .audio
            .entry(user_id)
            .or_default()
            .insert(audio_id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        user_id: UserId,
        audio_id: AudioId,
        patch: AudioPatch,
    ) -> Result<Option<AudioRecord>> {
        let mut inner = self.inner.write().await;
        let Some(record) = inner.audio.get_mut(&user_id).and_then(|m| m.get_mut(&audio_id))
        else {
            return Ok(None);
        };
        patch.apply(record);
        Ok(Some(record.clone()))
    }

    async fn delete(&self, user_id: UserId, audio_id: AudioId) -> Result<()> {
        let mut inner = self.inner.write().await;
        if let Some(records) = inner.audio.get_mut(&user_id) {
            records.remove(&audio_id);
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get_waiting_for(&self, user_id: UserId) -> Result<Option<EditSession>> {
        let inner = self.inner.read().await;
        Ok(inner.sessions.get(&user_id).cloned())
    }

    async fn set_waiting_for(&self, user_id: UserId, session: EditSession) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.sessions.insert(user_id, session);
        Ok(())
    }

    async fn clear_waiting_for(&self, user_id: UserId) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.sessions.remove(&user_id);
        Ok(())
    }

    async fn language(&self, user_id: UserId) -> Result<Option<String>> {
        let inner = self.inner.read().await;
        Ok(inner.languages.get(&user_id).cloned())
    }

    async fn set_language(&self, user_id: UserId, language: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.languages.insert(user_id, language.to_string());
        Ok(())
    }
}
