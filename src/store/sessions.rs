use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, NaiveDateTime};

use crate::models::Session;

struct Entry {
    session: Arc<Mutex<Session>>,
    last_seen: NaiveDateTime,
}

/// Live conversations keyed by sender address. The map lives for the
/// process lifetime; unless an idle TTL is configured, an abandoned
/// conversation is retained forever.
pub struct SessionStore {
    inner: Mutex<HashMap<String, Entry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch the session for `id`, creating it at `Start` on first
    /// contact. Two concurrent first contacts get the same record. Also
    /// stamps the entry's last-seen time for idle eviction.
    pub fn get_or_create(&self, id: &str, now: NaiveDateTime) -> Arc<Mutex<Session>> {
        let mut inner = self.inner.lock().unwrap();
        let entry = inner.entry(id.to_string()).or_insert_with(|| Entry {
            session: Arc::new(Mutex::new(Session::new())),
            last_seen: now,
        });
        entry.last_seen = now;
        Arc::clone(&entry.session)
    }

    pub fn get(&self, id: &str) -> Option<Arc<Mutex<Session>>> {
        self.inner
            .lock()
            .unwrap()
            .get(id)
            .map(|entry| Arc::clone(&entry.session))
    }

    pub fn remove(&self, id: &str) {
        self.inner.lock().unwrap().remove(id);
    }

    /// Drop sessions idle for `ttl` or longer. Last-seen lives outside
    /// the per-session mutex, so eviction only takes the map lock and
    /// never contends with a turn in progress.
    pub fn evict_idle(&self, ttl: Duration, now: NaiveDateTime) {
        self.inner
            .lock()
            .unwrap()
            .retain(|_, entry| now - entry.last_seen < ttl);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
