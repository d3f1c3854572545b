//! Per-session transient state
//!
//! A flat key-value store scoped to a session id, held purely in memory:
//! values are JSON strings with an expiry stamp, expired entries read as
//! misses and are dropped. Everything is lost on process end; durable
//! storage is explicitly out of scope.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::RwLock;

use crate::{MezegError, Result};

/// Comparison dashboard bounds, matching the original UI rules
pub const MAX_COMPARISON_CITIES: usize = 5;
pub const MIN_COMPARISON_CITIES: usize = 2;

/// Default comparison list for a fresh session
const DEFAULT_COMPARISON: [&str; 3] = ["Jerusalem", "Tel Aviv", "Haifa"];

#[derive(Debug, Clone)]
struct StoredEntry {
    /// JSON-serialized value
    value: String,
    /// Unix timestamp (seconds)
    expires_at: u64,
}

/// In-memory session-scoped key-value store
#[derive(Clone)]
pub struct SessionStore {
    entries: Arc<RwLock<HashMap<String, StoredEntry>>>,
    ttl: Duration,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

impl SessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Create a new session and return its id
    pub async fn create_session(&self) -> Result<String> {
        let id = format!("{:016x}", rand::rng().random::<u64>());
        self.put_raw(&marker_key(&id), "{}".to_string()).await;
        Ok(id)
    }

    /// Fail with a session error unless the session exists and is fresh
    pub async fn require_session(&self, session_id: &str) -> Result<()> {
        if self.get_raw(&marker_key(session_id)).await.is_some() {
            Ok(())
        } else {
            Err(MezegError::session(format!(
                "session {session_id} not found or expired"
            )))
        }
    }

    /// Store a serializable value under a session-scoped key
    #[tracing::instrument(name = "session_put", level = "debug", skip(self, value))]
    pub async fn put<T: Serialize>(&self, session_id: &str, key: &str, value: &T) -> Result<()> {
        self.require_session(session_id).await?;
        let json = serde_json::to_string(value)
            .map_err(|e| MezegError::session(format!("failed to serialize {key}: {e}")))?;
        self.put_raw(&scoped_key(session_id, key), json).await;
        Ok(())
    }

    /// Retrieve a value if it exists and has not expired
    #[tracing::instrument(name = "session_get", level = "debug", skip(self))]
    pub async fn get<T: DeserializeOwned>(
        &self,
        session_id: &str,
        key: &str,
    ) -> Result<Option<T>> {
        self.require_session(session_id).await?;
        let Some(json) = self.get_raw(&scoped_key(session_id, key)).await else {
            return Ok(None);
        };
        let value = serde_json::from_str(&json)
            .map_err(|e| MezegError::session(format!("failed to deserialize {key}: {e}")))?;
        Ok(Some(value))
    }

    async fn put_raw(&self, key: &str, value: String) {
        let expires_at = now_secs().saturating_add(self.ttl.as_secs());
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), StoredEntry { value, expires_at });
    }

    async fn get_raw(&self, key: &str) -> Option<String> {
        {
            let entries = self.entries.read().await;
            let entry = entries.get(key)?;
            if now_secs() < entry.expires_at {
                return Some(entry.value.clone());
            }
        }
        // Expired entries are dropped on read.
        self.entries.write().await.remove(key);
        None
    }

    // --- favorites -------------------------------------------------------

    /// Favorite city names for a session
    pub async fn favorites(&self, session_id: &str) -> Result<BTreeSet<String>> {
        Ok(self
            .get::<BTreeSet<String>>(session_id, "favorites")
            .await?
            .unwrap_or_default())
    }

    /// Add a favorite; returns the updated set
    pub async fn add_favorite(&self, session_id: &str, city: &str) -> Result<BTreeSet<String>> {
        let mut favorites = self.favorites(session_id).await?;
        favorites.insert(city.to_string());
        self.put(session_id, "favorites", &favorites).await?;
        Ok(favorites)
    }

    /// Remove a favorite; returns the updated set
    pub async fn remove_favorite(&self, session_id: &str, city: &str) -> Result<BTreeSet<String>> {
        let mut favorites = self.favorites(session_id).await?;
        favorites.remove(city);
        self.put(session_id, "favorites", &favorites).await?;
        Ok(favorites)
    }

    // --- comparison list -------------------------------------------------

    /// Comparison city list for a session, seeded with the default trio
    pub async fn comparison(&self, session_id: &str) -> Result<Vec<String>> {
        Ok(self
            .get::<Vec<String>>(session_id, "comparison")
            .await?
            .unwrap_or_else(|| DEFAULT_COMPARISON.map(String::from).to_vec()))
    }

    /// Add a city to the comparison list (bounded above, no duplicates)
    pub async fn add_comparison_city(&self, session_id: &str, city: &str) -> Result<Vec<String>> {
        let mut list = self.comparison(session_id).await?;
        if list.iter().any(|c| c == city) {
            return Ok(list);
        }
        if list.len() >= MAX_COMPARISON_CITIES {
            return Err(MezegError::validation(format!(
                "comparison list is limited to {MAX_COMPARISON_CITIES} cities"
            )));
        }
        list.push(city.to_string());
        self.put(session_id, "comparison", &list).await?;
        Ok(list)
    }

    /// Remove a city from the comparison list (bounded below)
    pub async fn remove_comparison_city(
        &self,
        session_id: &str,
        city: &str,
    ) -> Result<Vec<String>> {
        let mut list = self.comparison(session_id).await?;
        if !list.iter().any(|c| c == city) {
            return Ok(list);
        }
        if list.len() <= MIN_COMPARISON_CITIES {
            return Err(MezegError::validation(format!(
                "comparison needs at least {MIN_COMPARISON_CITIES} cities"
            )));
        }
        list.retain(|c| c != city);
        self.put(session_id, "comparison", &list).await?;
        Ok(list)
    }
}

fn marker_key(session_id: &str) -> String {
    format!("{session_id}:session")
}

fn scoped_key(session_id: &str, key: &str) -> String {
    format!("{session_id}:{key}")
}
