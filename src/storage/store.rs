use super::blob::BlobStore;
use crate::photo::PhotoSession;
use crate::sensation::SensationSession;
use crate::types::FootSide;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Key holding the photo-session collection.
pub const PHOTO_SESSIONS_KEY: &str = "sugarless_photo_sessions";

/// Key holding the sensation-session collection.
pub const SENSATION_SESSIONS_KEY: &str = "sugarless_sensation_sessions";

/// Session persistence over an opaque blob store.
///
/// Each collection is one JSON-array blob, so an append round-trips the
/// whole collection: O(existing size) in time and space. Fine for
/// personal-use session logs; a known scaling limit otherwise.
///
/// The read-modify-write append holds no lock: two concurrent appends to
/// the same collection can lose one write (last writer wins). Callers are
/// assumed to be a single logical thread of control.
///
/// Failure policy is asymmetric on purpose: writes propagate errors to the
/// caller, reads fail open to an empty collection so the user sees "no
/// data" rather than a storage error.
#[derive(Clone)]
pub struct SessionStore {
    blobs: Arc<dyn BlobStore>,
}

impl SessionStore {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// Append a photo session to the stored collection.
    ///
    /// Propagates read and write failures, including an undecodable
    /// existing blob — appending over data we could not decode would
    /// silently discard the user's history.
    pub async fn append_photo_session(&self, session: &PhotoSession) -> Result<()> {
        self.append(PHOTO_SESSIONS_KEY, session).await
    }

    /// All stored photo sessions, in insertion order. Fails open: storage
    /// errors and undecodable blobs yield an empty list.
    pub async fn list_photo_sessions(&self) -> Vec<PhotoSession> {
        self.read_collection_or_empty(PHOTO_SESSIONS_KEY).await
    }

    /// Most recently captured photo session, `None` if none are stored.
    pub async fn latest_photo_session(&self) -> Option<PhotoSession> {
        let mut sessions = self.list_photo_sessions().await;
        sort_by_millis_desc(&mut sessions, |s| s.timestamp);
        sessions.into_iter().next()
    }

    /// Photo sessions for one foot, most recent first.
    pub async fn photo_sessions_by_foot_side(&self, side: FootSide) -> Vec<PhotoSession> {
        let mut sessions: Vec<PhotoSession> = self
            .list_photo_sessions()
            .await
            .into_iter()
            .filter(|s| s.foot_side == side)
            .collect();
        sort_by_millis_desc(&mut sessions, |s| s.timestamp);
        sessions
    }

    /// Append a sensation session. Same contract as
    /// [`append_photo_session`](Self::append_photo_session).
    pub async fn append_sensation_session(&self, session: &SensationSession) -> Result<()> {
        self.append(SENSATION_SESSIONS_KEY, session).await
    }

    /// All stored sensation sessions, in insertion order. Fails open like
    /// [`list_photo_sessions`](Self::list_photo_sessions).
    pub async fn list_sensation_sessions(&self) -> Vec<SensationSession> {
        self.read_collection_or_empty(SENSATION_SESSIONS_KEY).await
    }

    /// Most recently completed sensation session.
    pub async fn latest_sensation_session(&self) -> Option<SensationSession> {
        let mut sessions = self.list_sensation_sessions().await;
        sort_by_millis_desc(&mut sessions, |s| s.date);
        sessions.into_iter().next()
    }

    /// Remove both collections. Maintenance/debugging only.
    pub async fn clear_all(&self) -> Result<()> {
        self.blobs
            .remove_many(&[PHOTO_SESSIONS_KEY, SENSATION_SESSIONS_KEY])
            .await
            .context("Failed to clear session collections")
    }

    async fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let raw = self
            .blobs
            .get(key)
            .await
            .with_context(|| format!("Failed to read collection '{}'", key))?;

        match raw {
            Some(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Failed to decode collection '{}'", key)),
            None => Ok(Vec::new()),
        }
    }

    async fn read_collection_or_empty<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        match self.read_collection(key).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(key, error = %e, "reading session collection failed, returning empty");
                Vec::new()
            }
        }
    }

    async fn append<T>(&self, key: &str, item: &T) -> Result<()>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let mut items: Vec<T> = self.read_collection(key).await?;
        items.push(item.clone());

        let raw = serde_json::to_string(&items)
            .with_context(|| format!("Failed to serialize collection '{}'", key))?;
        self.blobs
            .set(key, &raw)
            .await
            .with_context(|| format!("Failed to write collection '{}'", key))
    }
}

/// Stable descending sort on an epoch-millisecond field. Equal timestamps
/// keep insertion order, so ties resolve to the earliest-appended record.
fn sort_by_millis_desc<T>(items: &mut [T], millis: impl Fn(&T) -> i64) {
    items.sort_by(|a, b| millis(b).cmp(&millis(a)));
}
