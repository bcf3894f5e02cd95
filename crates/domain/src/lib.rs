//! Domain layer for the goal tracker.
//!
//! This crate provides:
//! - Filtering and sorting of goal and category listings
//! - The read-only goal catalog and its lookups
//! - Resolution of the current user
//! - The accept, achieve, challenge and gift goal actions

pub mod action;
pub mod catalog;
pub mod error;
pub mod identity;
pub mod query;
pub mod service;

pub use action::GoalAction;
pub use catalog::{Catalog, find_by_id, position_by_id};
pub use error::DomainError;
pub use identity::Identity;
pub use query::{ListQuery, sort_by_field};
pub use service::GoalService;
