use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use common::User;
use tokio::sync::RwLock;

use crate::{
    Result, StoreError,
    store::{DataStore, Dataset},
};

/// In-memory data store for testing.
///
/// Provides the same interface as the flat-file store. Saves can be made to
/// fail on demand to exercise error paths.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    data: Arc<RwLock<Dataset>>,
    saves: Arc<AtomicUsize>,
    fail_saves: Arc<AtomicBool>,
}

impl InMemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `dataset`.
    pub fn with_dataset(dataset: Dataset) -> Self {
        Self {
            data: Arc::new(RwLock::new(dataset)),
            ..Self::default()
        }
    }

    /// Returns the user collection as last saved.
    pub async fn users(&self) -> Vec<User> {
        self.data.read().await.users.clone()
    }

    /// Returns how many times the user collection has been saved.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Makes subsequent saves fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl DataStore for InMemoryStore {
    async fn load(&self) -> Result<Dataset> {
        Ok(self.data.read().await.clone())
    }

    async fn save_users(&self, users: &[User]) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Io {
                path: PathBuf::from("memory://users"),
                source: std::io::Error::other("save rejected"),
            });
        }

        self.data.write().await.users = users.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
