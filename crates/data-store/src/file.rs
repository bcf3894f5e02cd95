//! Flat-file JSON storage.

use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use common::User;
use serde::de::DeserializeOwned;

use crate::{
    Result, StoreError,
    store::{DataStore, Dataset},
};

pub const GOALS_FILE: &str = "goals.json";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const USERS_FILE: &str = "users.json";

/// Data store backed by three JSON array files in one directory.
///
/// Saving rewrites `users.json` in place. There is no temp-file rename, so a
/// crash mid-write can leave a truncated file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store reading from and writing to `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path of the user file.
    pub fn users_path(&self) -> PathBuf {
        self.dir.join(USERS_FILE)
    }

    async fn read_array<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.dir.join(file);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Serialization { path, source })
    }
}

#[async_trait]
impl DataStore for JsonFileStore {
    #[tracing::instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn load(&self) -> Result<Dataset> {
        let categories = self.read_array(CATEGORIES_FILE).await?;
        let goals = self.read_array(GOALS_FILE).await?;
        let users = self.read_array(USERS_FILE).await?;
        let dataset = Dataset::new(goals, categories, users);

        tracing::info!(
            goals = dataset.goals.len(),
            categories = dataset.categories.len(),
            users = dataset.users.len(),
            "loaded data files"
        );
        Ok(dataset)
    }

    #[tracing::instrument(skip(self, users), fields(users = users.len()))]
    async fn save_users(&self, users: &[User]) -> Result<()> {
        let start = Instant::now();
        let path = self.users_path();
        let bytes = serde_json::to_vec(users).map_err(|source| StoreError::Serialization {
            path: path.clone(),
            source,
        })?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StoreError::Io { path, source })?;

        metrics::counter!("user_saves_total").increment(1);
        metrics::histogram!("user_save_duration_seconds").record(start.elapsed().as_secs_f64());
        tracing::debug!("user file rewritten");
        Ok(())
    }
}
