//! Resolution of the current user for `/me` routes.

use common::{EntityId, User};

/// How the current user is determined.
///
/// There is no authentication; the identity is either a configured user id
/// or the first user in the collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Identity {
    /// The first user in the stored collection.
    #[default]
    FirstUser,
    /// The user with this id.
    Fixed(EntityId),
}

impl Identity {
    /// Builds an identity from an optional configured user id.
    pub fn from_config(user_id: Option<&str>) -> Self {
        match user_id {
            Some(id) => Identity::Fixed(EntityId::from(id)),
            None => Identity::FirstUser,
        }
    }

    /// Returns the index of the current user in `users`.
    pub fn resolve(&self, users: &[User]) -> Option<usize> {
        match self {
            Identity::FirstUser => (!users.is_empty()).then_some(0),
            Identity::Fixed(id) => users.iter().position(|user| &user.id == id),
        }
    }
}
