pub mod categories;
pub mod goals;
pub mod health;
pub mod me;
pub mod metrics;
