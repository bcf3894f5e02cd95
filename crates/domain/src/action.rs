//! The goal actions a user can take.

use common::GoalList;

/// An action that appends a goal to a user's list.
///
/// Accept and achieve act on the current user. Challenge and gift act on
/// another user, identified by the raw id from the request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalAction {
    Accept,
    Achieve,
    Challenge { user_id: String },
    Gift { user_id: String },
}

impl GoalAction {
    /// Returns the list the goal is appended to.
    pub fn list(&self) -> GoalList {
        match self {
            GoalAction::Accept => GoalList::Accepted,
            GoalAction::Achieve => GoalList::Achieved,
            GoalAction::Challenge { .. } => GoalList::Challenged,
            GoalAction::Gift { .. } => GoalList::Gifted,
        }
    }

    /// Returns the target user id, or `None` for the current user.
    pub fn target_user(&self) -> Option<&str> {
        match self {
            GoalAction::Accept | GoalAction::Achieve => None,
            GoalAction::Challenge { user_id } | GoalAction::Gift { user_id } => {
                Some(user_id.as_str())
            }
        }
    }

    /// Returns the action name used in logs and metric labels.
    pub fn name(&self) -> &'static str {
        match self {
            GoalAction::Accept => "accept",
            GoalAction::Achieve => "achieve",
            GoalAction::Challenge { .. } => "challenge",
            GoalAction::Gift { .. } => "gift",
        }
    }
}

impl std::fmt::Display for GoalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.target_user() {
            Some(user_id) => write!(f, "{} to user {}", self.name(), user_id),
            None => write!(f, "{}", self.name()),
        }
    }
}
