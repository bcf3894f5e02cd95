use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Largest integer an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Identifier of a goal, category or user.
///
/// The data files are hand-written, so an id may be a JSON number in one
/// record and a string in another. `EntityId` keeps whichever form was read
/// so the user file is written back unchanged, and compares ids by value:
/// `2`, `2.0` and `"2"` are all the same id. Path parameters and stored ids
/// go through this one comparison everywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(Number),
    Text(String),
}

impl EntityId {
    /// Returns the canonical text form of the id.
    ///
    /// Integral numbers render without a fractional part.
    pub fn canonical(&self) -> Cow<'_, str> {
        match self {
            EntityId::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    return Cow::Owned(n.to_string());
                }
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER => {
                        Cow::Owned(format!("{}", f as i64))
                    }
                    _ => Cow::Owned(n.to_string()),
                }
            }
            EntityId::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    /// Returns the numeric value of the id, if it has one.
    pub fn numeric(&self) -> Option<f64> {
        match self {
            EntityId::Number(n) => n.as_f64(),
            EntityId::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
                }
            }
        }
    }

    /// Returns true if this id identifies the same entity as a raw
    /// path parameter.
    pub fn matches(&self, raw: &str) -> bool {
        *self == EntityId::from(raw)
    }

    /// Converts the id into a JSON value in its original representation.
    pub fn to_value(&self) -> Value {
        match self {
            EntityId::Number(n) => Value::Number(n.clone()),
            EntityId::Text(s) => Value::String(s.clone()),
        }
    }
}

impl PartialEq for EntityId {
    fn eq(&self, other: &Self) -> bool {
        if self.canonical() == other.canonical() {
            return true;
        }
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Text(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId::Text(s)
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        EntityId::Number(Number::from(n))
    }
}
