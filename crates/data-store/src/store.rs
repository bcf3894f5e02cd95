use async_trait::async_trait;
use common::{Category, Goal, User};

use crate::Result;

/// The full working data set of the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub goals: Vec<Goal>,
    pub categories: Vec<Category>,
    pub users: Vec<User>,
}

impl Dataset {
    /// Creates a data set from its three collections.
    pub fn new(goals: Vec<Goal>, categories: Vec<Category>, users: Vec<User>) -> Self {
        Self {
            goals,
            categories,
            users,
        }
    }
}

/// Core trait for storage backends.
///
/// Goals and categories are read once and never written back. The user
/// collection is the only mutable data and is always saved in full.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Loads goals, categories and users.
    async fn load(&self) -> Result<Dataset>;

    /// Replaces the stored user collection with `users`.
    ///
    /// This is a whole-collection overwrite, not an incremental update.
    async fn save_users(&self, users: &[User]) -> Result<()>;
}
