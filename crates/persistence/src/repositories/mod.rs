//! Repository implementations.

mod alert;
mod audit_log;
mod measurement;
mod sensor;
mod threshold;
mod warehouse;

pub use alert::AlertRepository;
pub use audit_log::{AuditLogFilter, AuditLogRepository};
pub use measurement::MeasurementRepository;
pub use sensor::SensorRepository;
pub use threshold::ThresholdRepository;
pub use warehouse::WarehouseRepository;
