//! Shared handler state: one store per collection.

use std::path::PathBuf;

use serde_json::Value;
use tokio::sync::{Mutex, MutexGuard};

use super::config::ServerConfig;
use crate::storage::{self, CollectionKind, StorageResult};

/// A collection file plus the lock serializing access to it.
///
/// Every request holds the lock across its whole load-mutate-save cycle.
#[derive(Debug)]
pub struct CollectionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CollectionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Enter the collection's critical section
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }

    pub fn load(&self) -> Value {
        storage::load(&self.path)
    }

    pub fn save(&self, document: &Value) -> StorageResult<()> {
        storage::save(&self.path, document)
    }
}

/// State shared by all handlers
#[derive(Debug)]
pub struct AppState {
    users: CollectionStore,
    posts: CollectionStore,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            users: CollectionStore::new(config.users_path()),
            posts: CollectionStore::new(config.posts_path()),
        }
    }

    pub fn collection(&self, kind: CollectionKind) -> &CollectionStore {
        match kind {
            CollectionKind::Users => &self.users,
            CollectionKind::Posts => &self.posts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_stores_write_configured_files() {
        let temp = TempDir::new().unwrap();
        let config = ServerConfig::with_data_dir(temp.path());
        let state = AppState::new(&config);

        let users = json!({"users": [{"id": 1, "name": "Ada"}]});
        state.collection(CollectionKind::Users).save(&users).unwrap();

        assert_eq!(storage::load(&config.users_path()), users);
        assert!(!config.posts_path().exists());
        assert_eq!(state.collection(CollectionKind::Posts).load(), json!({}));
    }
}
