//! Measurement ingestion and threshold evaluation.
//!
//! This is the single evaluator behind both ingestion paths: the HTTP
//! create-measurement endpoint and the MQTT telemetry listener call into
//! [`ingest_measurement`], so violation and resolution semantics are
//! identical regardless of trigger source.
//!
//! The whole sequence (measurement insert, alert reconciliation, audit
//! rows) runs in one transaction: a failure mid-sequence leaves no partial
//! alert or audit state.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;

use domain::models::{
    Actor, Alert, AlertType, AuditAction, AuditEntity, Measurement, NewAuditEntry, Sensor,
    Threshold,
};
use domain::services::evaluation;
use persistence::repositories::{
    AlertRepository, AuditLogRepository, MeasurementRepository, ThresholdRepository,
};

use crate::error::ApiError;

/// Result of ingesting one measurement.
#[derive(Debug)]
pub struct IngestOutcome {
    pub measurement: Measurement,
    /// Alerts opened by this reading. Empty when the violations were
    /// already covered by open alerts (idempotence) or the warehouse has
    /// no thresholds configured.
    pub created_alerts: Vec<Alert>,
    /// Alerts auto-resolved because their axis returned to range.
    pub resolved_alerts: Vec<Alert>,
}

/// Persists a reading and reconciles alert state against the warehouse
/// thresholds.
///
/// `recorded_by` attributes the audit entries; `None` records them under
/// the reserved system actor (telemetry path). Alerts opened by the
/// evaluator are always unattributed on the alert row itself.
pub async fn ingest_measurement(
    pool: &PgPool,
    sensor: &Sensor,
    temperature_c: f64,
    humidity_percent: f64,
    measured_at: Option<DateTime<Utc>>,
    recorded_by: Option<&Actor>,
) -> Result<IngestOutcome, ApiError> {
    let mut tx = pool.begin().await?;
    let now = Utc::now();

    let measurement: Measurement = MeasurementRepository::insert(
        &mut tx,
        sensor.id,
        measured_at.unwrap_or(now),
        temperature_c,
        humidity_percent,
    )
    .await?
    .into();

    append_audit(
        &mut tx,
        recorded_by,
        AuditAction::Create,
        AuditEntity::Measurements,
        Some(measurement.id),
        format!(
            "Measurement created for sensor_id={} (t={}, h={})",
            sensor.id, temperature_c, humidity_percent
        ),
    )
    .await?;

    // Unconfigured warehouse: persist the reading, skip alert logic.
    let Some(threshold) =
        ThresholdRepository::find_by_warehouse_in(&mut tx, sensor.warehouse_id).await?
    else {
        tx.commit().await?;
        return Ok(IngestOutcome {
            measurement,
            created_alerts: Vec::new(),
            resolved_alerts: Vec::new(),
        });
    };
    let threshold: Threshold = threshold.into();

    let violation_set = evaluation::violations(&threshold, temperature_c, humidity_percent);

    let mut created_alerts: Vec<Alert> = Vec::new();
    for alert_type in &violation_set {
        // The partial unique index makes this race-safe: of two concurrent
        // inserts for the same triple, exactly one returns a row.
        let inserted = AlertRepository::insert_open_if_absent(
            &mut tx,
            *alert_type,
            sensor.warehouse_id,
            sensor.id,
        )
        .await?;

        if let Some(entity) = inserted {
            let alert: Alert = entity.into();
            append_audit(
                &mut tx,
                recorded_by,
                AuditAction::Create,
                AuditEntity::Alerts,
                Some(alert.id),
                format!(
                    "Auto-created alert type={} from measurement_id={}",
                    alert.alert_type.as_str(),
                    measurement.id
                ),
            )
            .await?;
            created_alerts.push(alert);
        }
    }

    let mut resolved_alerts: Vec<Alert> = Vec::new();
    for axis in evaluation::axes_in_bounds(&violation_set) {
        let rows = AlertRepository::resolve_open_of_types(
            &mut tx,
            sensor.warehouse_id,
            sensor.id,
            axis.alert_types(),
            now,
        )
        .await?;

        for entity in rows {
            let alert: Alert = entity.into();
            append_audit(
                &mut tx,
                recorded_by,
                AuditAction::Update,
                AuditEntity::Alerts,
                Some(alert.id),
                format!(
                    "Auto-resolved alert type={} by measurement normalization",
                    alert.alert_type.as_str()
                ),
            )
            .await?;
            resolved_alerts.push(alert);
        }
    }

    tx.commit().await?;

    if !created_alerts.is_empty() || !resolved_alerts.is_empty() {
        let types: Vec<&str> = violation_set.iter().map(AlertType::as_str).collect();
        info!(
            sensor_id = sensor.id,
            warehouse_id = sensor.warehouse_id,
            violations = ?types,
            created = created_alerts.len(),
            resolved = resolved_alerts.len(),
            "Alert state reconciled"
        );
    }

    Ok(IngestOutcome {
        measurement,
        created_alerts,
        resolved_alerts,
    })
}

/// Writes one audit row on the ingestion transaction, attributed to the
/// acting user or to the reserved system actor.
async fn append_audit(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    recorded_by: Option<&Actor>,
    action: AuditAction,
    entity: AuditEntity,
    entity_id: Option<i64>,
    details: String,
) -> Result<(), ApiError> {
    let entry = match recorded_by {
        Some(actor) => {
            NewAuditEntry::by_actor(actor.user_id, actor.role, action, entity, entity_id, details)?
        }
        None => NewAuditEntry::by_system(action, entity, entity_id, details),
    };
    AuditLogRepository::append(tx, &entry).await?;
    Ok(())
}
