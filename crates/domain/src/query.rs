//! Filtering and sorting for collection listings.

use std::cmp::Ordering;

use common::Record;
use serde::Deserialize;
use serde_json::Value;

/// Query-string parameters accepted by the listing endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListQuery {
    /// Case-sensitive substring the searched text must contain.
    pub query: Option<String>,

    /// Field name to sort ascending by.
    pub sort: Option<String>,
}

impl ListQuery {
    /// Creates an empty query that returns everything in stored order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query filtering on `text`.
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            query: Some(text.into()),
            ..Default::default()
        }
    }

    /// Sets the sort field.
    pub fn sorted_by(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(field.into());
        self
    }

    /// Applies the query to `items`.
    ///
    /// `text` selects the searched text of each item. Filtering keeps the
    /// original relative order.
    pub fn apply<T, F>(&self, items: &[T], text: F) -> Vec<T>
    where
        T: Record + Clone,
        F: Fn(&T) -> &str,
    {
        let selected: Vec<T> = match &self.query {
            Some(needle) => items
                .iter()
                .filter(|item| text(item).contains(needle.as_str()))
                .cloned()
                .collect(),
            None => items.to_vec(),
        };

        match &self.sort {
            Some(field) => sort_by_field(selected, field),
            None => selected,
        }
    }
}

/// Sorts records ascending by the numeric value of `field`.
///
/// The sort is stable. Records whose field is missing or has no numeric
/// value keep their relative order and go after all numeric ones.
pub fn sort_by_field<T: Record>(items: Vec<T>, field: &str) -> Vec<T> {
    let mut keyed: Vec<(Option<f64>, T)> = items
        .into_iter()
        .map(|item| (item.field(field).as_ref().and_then(numeric_value), item))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Numbers, numeric strings and booleans have a numeric value.
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}
