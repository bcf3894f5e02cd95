//! Shared application state.

use data_store::DataStore;
use domain::{DomainError, GoalService, Identity};

/// Shared application state accessible from all handlers.
///
/// Built once at startup and handed to the router; handlers never reach
/// for global data.
pub struct AppState<S: DataStore> {
    pub goals: GoalService<S>,
}

impl<S: DataStore> AppState<S> {
    /// Loads the data set from `store` and builds the state.
    pub async fn load(store: S, identity: Identity) -> Result<Self, DomainError> {
        Ok(Self {
            goals: GoalService::load(store, identity).await?,
        })
    }
}
