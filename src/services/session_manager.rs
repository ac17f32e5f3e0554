// src/services/session_manager.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;
use uuid::Uuid;

use super::cart::Cart;
use super::chatbot::Transcript;
use super::recommender::RecommendationSlot;

/// Everything one shopper's page session holds.
#[derive(Clone, Debug)]
pub struct ShopSession {
    pub id: String,
    pub cart: Cart,
    pub transcript: Transcript,
    /// Raw chat submissions, fed to the recommender as interests.
    pub chat_messages: Vec<String>,
    pub recommendations: RecommendationSlot,
    pub last_active: Instant,
}

impl ShopSession {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cart: Cart::new(),
            transcript: Transcript::new(),
            chat_messages: Vec::new(),
            recommendations: RecommendationSlot::default(),
            last_active: Instant::now(),
        }
    }
}

#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<RwLock<HashMap<String, ShopSession>>>,
    ttl: Duration,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionManager {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // Create a fresh session and return its id.
    pub async fn create_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let session = ShopSession::new(id.clone());

        let mut guard = self.inner.write().await;
        guard.insert(id.clone(), session);
        id
    }

    // Ensure there's a session with this id.
    pub async fn ensure_session(&self, id: &str) -> String {
        {
            let guard = self.inner.read().await;
            if guard.contains_key(id) {
                return id.to_string();
            }
        }
        let mut guard = self.inner.write().await;
        guard
            .entry(id.to_string())
            .or_insert_with(|| ShopSession::new(id));
        id.to_string()
    }

    /// Use the caller's session id when given, otherwise start a new session.
    pub async fn resolve_session(&self, id: Option<&str>) -> String {
        match id {
            Some(s) if !s.trim().is_empty() => self.ensure_session(s).await,
            _ => self.create_session().await,
        }
    }

    pub async fn contains(&self, session_id: &str) -> bool {
        self.inner.read().await.contains_key(session_id)
    }

    /// Run `f` against a session under the read lock.
    pub async fn read<R>(&self, session_id: &str, f: impl FnOnce(&ShopSession) -> R) -> Option<R> {
        let guard = self.inner.read().await;
        guard.get(session_id).map(f)
    }

    /// Run `f` against a session under the write lock and touch `last_active`.
    pub async fn update<R>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut ShopSession) -> R,
    ) -> Option<R> {
        let mut guard = self.inner.write().await;
        let session = guard.get_mut(session_id)?;
        session.last_active = Instant::now();
        Some(f(session))
    }

    /// Remove a session by id
    pub async fn remove_session(&self, session_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        guard.remove(session_id).is_some()
    }

    /// Remove sessions idle longer than ttl. Returns number removed.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let now = Instant::now();
        let before = guard.len();
        guard.retain(|_, s| now.duration_since(s.last_active) < self.ttl);
        before - guard.len()
    }

    /// Number of sessions
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    /// List session ids
    pub async fn list_session_ids(&self) -> Vec<String> {
        let guard = self.inner.read().await;
        guard.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog;

    #[tokio::test]
    async fn basic_session_flow() {
        let mgr = SessionManager::new(Duration::from_secs(60));
        let sid = mgr.create_session().await;
        assert!(!sid.is_empty());

        let lines = mgr
            .update(&sid, |s| {
                s.cart.add(catalog::find(2).unwrap());
                s.cart.line_count()
            })
            .await;
        assert_eq!(lines, Some(1));

        let items = mgr.read(&sid, |s| s.cart.item_count()).await;
        assert_eq!(items, Some(1));
        assert!(mgr.remove_session(&sid).await);
    }

    #[tokio::test]
    async fn update_on_unknown_session_is_none() {
        let mgr = SessionManager::new(Duration::from_secs(60));
        assert!(mgr.update("missing", |s| s.cart.line_count()).await.is_none());
    }
}
