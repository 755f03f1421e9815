//! Domain layer for the HiveSense backend.
//!
//! This crate contains:
//! - Domain models (Warehouse, Sensor, Threshold, Measurement, Alert, audit types)
//! - The actor/role scope resolver
//! - Pure threshold-evaluation logic

pub mod models;
pub mod services;
