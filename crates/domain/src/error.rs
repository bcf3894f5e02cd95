//! Domain error types.

use common::EntityId;
use data_store::StoreError;
use thiserror::Error;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No goal has the requested id.
    #[error("That goal does not exist")]
    GoalNotFound(EntityId),

    /// No user has the requested id.
    #[error("That user does not exist")]
    UserNotFound(EntityId),

    /// The identity step did not resolve to any user.
    #[error("That user does not exist")]
    CurrentUserNotFound,

    /// No category has the requested id.
    #[error("That category does not exist")]
    CategoryNotFound(EntityId),

    /// An error occurred in the data store.
    #[error("Data store error: {0}")]
    Store(#[from] StoreError),
}
