//! Database entities (row mappings).

mod alert;
mod audit_log;
mod measurement;
mod sensor;
mod threshold;
mod warehouse;

pub use alert::AlertEntity;
pub use audit_log::AuditLogEntity;
pub use measurement::{MeasurementEntity, MeasurementWithWarehouseEntity};
pub use sensor::SensorEntity;
pub use threshold::ThresholdEntity;
pub use warehouse::{WarehouseEntity, WarehouseSummaryEntity};
