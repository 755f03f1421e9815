//! Sensor domain model.
//!
//! Sensors are managed outside this core; the engine only resolves them by
//! id or serial to find the owning warehouse. The warehouse assignment is
//! immutable.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    pub id: i64,
    pub warehouse_id: i64,
    pub serial_number: String,
    pub is_active: bool,
}
