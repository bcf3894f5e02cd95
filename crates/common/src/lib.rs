//! Shared types for the goal tracker.
//!
//! Records mirror the JSON documents the service loads at startup. Fields
//! other than ids and user goal lists are kept as raw JSON, so a rewrite of
//! the user file never drops or alters data.

pub mod records;
pub mod types;

pub use records::{Category, Goal, GoalList, Record, User};
pub use types::EntityId;
