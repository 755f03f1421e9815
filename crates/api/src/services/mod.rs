//! Application services.
//!
//! Services contain logic shared across entry points: the threshold
//! evaluator used by both the HTTP and telemetry ingestion paths, and the
//! MQTT telemetry listener itself.

pub mod evaluator;
pub mod telemetry;
