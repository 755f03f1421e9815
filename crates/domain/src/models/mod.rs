//! Domain models for HiveSense.

pub mod actor;
pub mod alert;
pub mod audit_log;
pub mod measurement;
pub mod sensor;
pub mod threshold;
pub mod warehouse;

pub use actor::{Actor, Role, ScopeError};
pub use alert::{Alert, AlertStatus, AlertType, Axis, CreateAlertRequest, UpdateAlertRequest};
pub use audit_log::{
    AuditAction, AuditEntity, AuditLogEntry, AuditLogQuery, NewAuditEntry, ParseAuditFilterError,
    UnattributedAudit,
};
pub use measurement::{CreateMeasurementRequest, Measurement, UpdateMeasurementRequest};
pub use sensor::Sensor;
pub use threshold::{
    BoundsError, CreateThresholdRequest, Threshold, ThresholdBounds, UpdateThresholdRequest,
};
pub use warehouse::{Warehouse, WarehouseSummary};
