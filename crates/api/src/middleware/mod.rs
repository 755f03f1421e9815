//! Middleware for the HTTP surface.

pub mod actor;
pub mod logging;

pub use actor::require_actor;
