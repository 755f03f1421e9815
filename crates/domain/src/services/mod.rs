//! Domain services for HiveSense.
//!
//! Services contain pure business logic that operates on domain models.

pub mod evaluation;

pub use evaluation::{axes_in_bounds, violations};
