//! Goal service providing the operations behind the HTTP routes.

use common::{EntityId, User};
use data_store::{DataStore, Dataset};
use tokio::sync::RwLock;

use crate::action::GoalAction;
use crate::catalog::{Catalog, position_by_id};
use crate::error::DomainError;
use crate::identity::Identity;

/// Service owning the working data set.
///
/// The catalog is read-only. The user collection sits behind a lock; a goal
/// action holds the write lock while it applies the change to a copy,
/// saves the copy, and commits it. A failed save leaves the in-memory
/// users untouched.
pub struct GoalService<S: DataStore> {
    store: S,
    catalog: Catalog,
    users: RwLock<Vec<User>>,
    identity: Identity,
}

impl<S: DataStore> GoalService<S> {
    /// Creates a service over an already loaded data set.
    pub fn new(store: S, dataset: Dataset, identity: Identity) -> Self {
        metrics::gauge!("catalog_goals").set(dataset.goals.len() as f64);
        metrics::gauge!("catalog_categories").set(dataset.categories.len() as f64);

        Self {
            store,
            catalog: Catalog::new(dataset.goals, dataset.categories),
            users: RwLock::new(dataset.users),
            identity,
        }
    }

    /// Loads the data set from `store` and creates the service.
    #[tracing::instrument(skip(store))]
    pub async fn load(store: S, identity: Identity) -> Result<Self, DomainError> {
        let dataset = store.load().await?;
        Ok(Self::new(store, dataset, identity))
    }

    /// Returns the goal and category catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the identity used for the current user.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Returns a snapshot of all users.
    pub async fn users(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    /// Returns the number of users.
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns the current user.
    pub async fn current_user(&self) -> Result<User, DomainError> {
        let users = self.users.read().await;
        self.identity
            .resolve(&users)
            .map(|index| users[index].clone())
            .ok_or(DomainError::CurrentUserNotFound)
    }

    /// Appends a goal to the current user's accepted goals.
    pub async fn accept(&self, goal_id: &str) -> Result<(), DomainError> {
        self.apply(goal_id, GoalAction::Accept).await
    }

    /// Appends a goal to the current user's achieved goals.
    pub async fn achieve(&self, goal_id: &str) -> Result<(), DomainError> {
        self.apply(goal_id, GoalAction::Achieve).await
    }

    /// Appends a goal to another user's challenged goals.
    pub async fn challenge(&self, goal_id: &str, user_id: &str) -> Result<(), DomainError> {
        let action = GoalAction::Challenge {
            user_id: user_id.to_string(),
        };
        self.apply(goal_id, action).await
    }

    /// Appends a goal to another user's gifted goals.
    pub async fn gift(&self, goal_id: &str, user_id: &str) -> Result<(), DomainError> {
        let action = GoalAction::Gift {
            user_id: user_id.to_string(),
        };
        self.apply(goal_id, action).await
    }

    /// Applies a goal action and persists the full user collection.
    ///
    /// The goal appended is a copy of the catalog entry. Lookups happen
    /// before anything is changed, so a miss leaves state untouched.
    #[tracing::instrument(skip(self, action), fields(action = action.name()))]
    pub async fn apply(&self, goal_id: &str, action: GoalAction) -> Result<(), DomainError> {
        metrics::counter!("goal_actions_total", "action" => action.name()).increment(1);

        let result = self.try_apply(goal_id, &action).await;
        if let Err(ref e) = result {
            metrics::counter!("goal_actions_failed_total", "action" => action.name()).increment(1);
            tracing::warn!(error = %e, "goal action rejected");
        }
        result
    }

    async fn try_apply(&self, goal_id: &str, action: &GoalAction) -> Result<(), DomainError> {
        let goal = self
            .catalog
            .find_goal(goal_id)
            .cloned()
            .ok_or_else(|| DomainError::GoalNotFound(EntityId::from(goal_id)))?;

        let mut users = self.users.write().await;
        let index = match action.target_user() {
            None => self
                .identity
                .resolve(&users)
                .ok_or(DomainError::CurrentUserNotFound)?,
            Some(user_id) => position_by_id(users.as_slice(), user_id)
                .ok_or_else(|| DomainError::UserNotFound(EntityId::from(user_id)))?,
        };

        let mut updated = users.clone();
        updated[index].goals_mut(action.list()).push(goal);
        self.store.save_users(&updated).await?;
        *users = updated;

        tracing::info!(%goal_id, user_id = %users[index].id, %action, "goal action applied");
        Ok(())
    }
}
