//! Records loaded from the goal, category and user data files.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::EntityId;

/// Common access to a record loaded from a data file.
pub trait Record {
    /// Returns the record's identifier.
    fn id(&self) -> &EntityId;

    /// Returns the value of a top-level field by its JSON name.
    fn field(&self, name: &str) -> Option<Value>;
}

/// A trackable objective.
///
/// Only `id` is typed. Every other field, `description` and `categoryId`
/// included, stays in `fields` exactly as read, so a goal copied into a
/// user's list is written back the way it appeared in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: EntityId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Goal {
    /// Creates a goal with a description and category.
    pub fn new(
        id: impl Into<EntityId>,
        description: impl Into<String>,
        category_id: impl Into<EntityId>,
    ) -> Self {
        let mut fields = Map::new();
        fields.insert("description".to_string(), Value::String(description.into()));
        fields.insert("categoryId".to_string(), category_id.into().to_value());
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Returns the description, or an empty string when it is missing or
    /// not a string.
    pub fn description(&self) -> &str {
        text_field(&self.fields, "description")
    }

    /// Returns the category id, if the goal has a string or numeric one.
    pub fn category_id(&self) -> Option<EntityId> {
        self.fields.get("categoryId").and_then(entity_id)
    }

    /// Returns true if the goal belongs to the category with the given id.
    pub fn in_category(&self, category_id: &EntityId) -> bool {
        self.category_id().as_ref() == Some(category_id)
    }
}

impl Record for Goal {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(self.id.to_value()),
            other => self.fields.get(other).cloned(),
        }
    }
}

/// A named grouping of goals.
///
/// Like [`Goal`], everything besides `id` is kept verbatim in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Category {
    /// Creates a category with a name.
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(name.into()));
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Returns the name, or an empty string when it is missing or not a
    /// string.
    pub fn name(&self) -> &str {
        text_field(&self.fields, "name")
    }
}

impl Record for Category {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(self.id.to_value()),
            other => self.fields.get(other).cloned(),
        }
    }
}

fn text_field<'a>(fields: &'a Map<String, Value>, name: &str) -> &'a str {
    fields.get(name).and_then(Value::as_str).unwrap_or("")
}

fn entity_id(value: &Value) -> Option<EntityId> {
    match value {
        Value::Number(n) => Some(EntityId::Number(n.clone())),
        Value::String(s) => Some(EntityId::Text(s.clone())),
        _ => None,
    }
}

/// Reads a goal list where `null` counts as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Goal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Goal>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The per-user goal lists a goal action can append to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoalList {
    Accepted,
    Achieved,
    Challenged,
    Gifted,
}

impl GoalList {
    /// Returns the JSON field name of the list.
    pub fn field_name(&self) -> &'static str {
        match self {
            GoalList::Accepted => "acceptedGoals",
            GoalList::Achieved => "achievedGoals",
            GoalList::Challenged => "challengedGoals",
            GoalList::Gifted => "giftedGoals",
        }
    }
}

/// A user profile with the goals they have interacted with.
///
/// Goals in the lists are copies taken at the time of the action, not
/// references into the goal catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub accepted_goals: Vec<Goal>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub achieved_goals: Vec<Goal>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub challenged_goals: Vec<Goal>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub gifted_goals: Vec<Goal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Creates a user with empty goal lists.
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            accepted_goals: Vec::new(),
            achieved_goals: Vec::new(),
            challenged_goals: Vec::new(),
            gifted_goals: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Returns one of the user's goal lists.
    pub fn goals(&self, list: GoalList) -> &[Goal] {
        match list {
            GoalList::Accepted => &self.accepted_goals,
            GoalList::Achieved => &self.achieved_goals,
            GoalList::Challenged => &self.challenged_goals,
            GoalList::Gifted => &self.gifted_goals,
        }
    }

    /// Returns one of the user's goal lists for mutation.
    pub fn goals_mut(&mut self, list: GoalList) -> &mut Vec<Goal> {
        match list {
            GoalList::Accepted => &mut self.accepted_goals,
            GoalList::Achieved => &mut self.achieved_goals,
            GoalList::Challenged => &mut self.challenged_goals,
            GoalList::Gifted => &mut self.gifted_goals,
        }
    }
}

impl Record for User {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Value> {
        let list = match name {
            "id" => return Some(self.id.to_value()),
            "acceptedGoals" => GoalList::Accepted,
            "achievedGoals" => GoalList::Achieved,
            "challengedGoals" => GoalList::Challenged,
            "giftedGoals" => GoalList::Gifted,
            other => return self.extra.get(other).cloned(),
        };
        serde_json::to_value(self.goals(list)).ok()
    }
}
