//! The read-only goal and category catalog.

use common::{Category, EntityId, Goal, Record};

use crate::error::DomainError;
use crate::query::ListQuery;

/// Finds the first record whose id matches a raw path parameter.
///
/// Ids are not checked for uniqueness on load, so later duplicates are
/// unreachable.
pub fn find_by_id<'a, T: Record>(items: &'a [T], id: &str) -> Option<&'a T> {
    position_by_id(items, id).map(|index| &items[index])
}

/// Returns the index of the first record whose id matches `id`.
pub fn position_by_id<T: Record>(items: &[T], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id().matches(id))
}

/// Goals and categories loaded at startup.
///
/// The catalog is never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    goals: Vec<Goal>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Creates a catalog from the loaded collections.
    pub fn new(goals: Vec<Goal>, categories: Vec<Category>) -> Self {
        Self { goals, categories }
    }

    /// Returns all goals in stored order.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Returns all categories in stored order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Lists goals whose description matches `query`.
    pub fn search_goals(&self, query: &ListQuery) -> Vec<Goal> {
        query.apply(&self.goals, |goal| goal.description())
    }

    /// Lists categories whose name matches `query`.
    pub fn search_categories(&self, query: &ListQuery) -> Vec<Category> {
        query.apply(&self.categories, |category| category.name())
    }

    /// Finds the first goal with the given id.
    pub fn find_goal(&self, goal_id: &str) -> Option<&Goal> {
        find_by_id(&self.goals, goal_id)
    }

    /// Finds the first category with the given id.
    pub fn find_category(&self, category_id: &str) -> Option<&Category> {
        find_by_id(&self.categories, category_id)
    }

    /// Lists the goals belonging to a category.
    ///
    /// Fails with `CategoryNotFound` when no category has the id. Goals are
    /// matched with the same id comparison as every other lookup, so a
    /// numeric `categoryId` matches its string path form.
    pub fn goals_in_category(&self, category_id: &str) -> Result<Vec<Goal>, DomainError> {
        let category = self
            .find_category(category_id)
            .ok_or_else(|| DomainError::CategoryNotFound(EntityId::from(category_id)))?;

        Ok(self
            .goals
            .iter()
            .filter(|goal| goal.in_category(&category.id))
            .cloned()
            .collect())
    }
}
