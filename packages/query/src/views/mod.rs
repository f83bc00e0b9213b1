//! Reusable views that callers register as score or filter views.

pub mod admin;

pub use admin::{AdminView, admin, admin_level, admin_level_named};
