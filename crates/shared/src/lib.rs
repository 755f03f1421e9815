//! Shared utilities for the HiveSense backend.
//!
//! This crate provides small helpers used across the other crates:
//! - Local-day time range computation for audit queries
//! - Sensor serial number validation

pub mod time;
pub mod validation;
