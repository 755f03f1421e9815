//! MQTT telemetry listener.
//!
//! Sensors publish readings to `hivesense/sensors/{serial}/telemetry`. The
//! listener resolves the serial to a sensor and feeds the shared evaluator.
//! There is no acknowledgment contract on this path: a malformed payload or
//! an unknown serial is dropped and logged, never an error that halts
//! further delivery.

use rumqttc::{AsyncClient, Event, Incoming, MqttOptions, QoS};
use serde::Deserialize;
use sqlx::PgPool;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use domain::models::Sensor;
use persistence::repositories::SensorRepository;

use crate::config::MqttConfig;
use crate::services::evaluator;

/// Seconds to wait before polling again after a connection error.
const RECONNECT_DELAY_SECS: u64 = 5;

/// Starts the telemetry listener when enabled. Returns the task handle so
/// the caller can keep it alive for the process lifetime.
pub fn spawn(config: MqttConfig, pool: PgPool) -> Option<JoinHandle<()>> {
    if !config.enabled {
        info!("Telemetry listener disabled");
        return None;
    }
    Some(tokio::spawn(run(config, pool)))
}

async fn run(config: MqttConfig, pool: PgPool) {
    let mut options = MqttOptions::new(&config.client_id, &config.host, config.port);
    options.set_keep_alive(Duration::from_secs(config.keep_alive_secs));
    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        options.set_credentials(username, password);
    }

    let (client, mut eventloop) = AsyncClient::new(options, 64);

    if let Err(e) = client.subscribe(&config.topic, QoS::AtLeastOnce).await {
        error!("MQTT subscribe to {} failed: {}", config.topic, e);
        return;
    }
    info!(topic = %config.topic, host = %config.host, "Telemetry listener started");

    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Incoming::Publish(publish))) => {
                handle_publish(&pool, &publish.topic, &publish.payload).await;
            }
            Ok(_) => {}
            Err(e) => {
                warn!("MQTT connection error: {}; reconnecting", e);
                tokio::time::sleep(Duration::from_secs(RECONNECT_DELAY_SECS)).await;
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct TelemetryPayload {
    temperature: f64,
    humidity: f64,
}

/// Extracts the sensor serial from `hivesense/sensors/{serial}/telemetry`.
fn serial_from_topic(topic: &str) -> Option<&str> {
    let mut parts = topic.split('/');
    match (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) {
        (Some("hivesense"), Some("sensors"), Some(serial), Some("telemetry"), None)
            if shared::validation::is_valid_serial_number(serial) =>
        {
            Some(serial)
        }
        _ => None,
    }
}

/// Parses the JSON payload, rejecting non-finite readings.
fn parse_payload(payload: &[u8]) -> Option<(f64, f64)> {
    let parsed: TelemetryPayload = serde_json::from_slice(payload).ok()?;
    (parsed.temperature.is_finite() && parsed.humidity.is_finite())
        .then_some((parsed.temperature, parsed.humidity))
}

async fn handle_publish(pool: &PgPool, topic: &str, payload: &[u8]) {
    let Some(serial) = serial_from_topic(topic) else {
        warn!(%topic, "Dropping telemetry with unrecognized topic");
        return;
    };
    let Some((temperature, humidity)) = parse_payload(payload) else {
        warn!(%topic, "Dropping telemetry with malformed payload");
        return;
    };

    let sensor: Sensor = match SensorRepository::new(pool.clone()).find_by_serial(serial).await {
        Ok(Some(entity)) => entity.into(),
        Ok(None) => {
            warn!(serial, "Dropping telemetry for unknown sensor serial");
            return;
        }
        Err(e) => {
            error!(serial, "Sensor lookup failed: {}", e);
            return;
        }
    };

    match evaluator::ingest_measurement(pool, &sensor, temperature, humidity, None, None).await {
        Ok(outcome) => {
            info!(
                sensor_id = sensor.id,
                measurement_id = outcome.measurement.id,
                created = outcome.created_alerts.len(),
                resolved = outcome.resolved_alerts.len(),
                "Telemetry measurement ingested"
            );
        }
        Err(e) => {
            error!(sensor_id = sensor.id, "Telemetry ingestion failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_is_extracted_from_well_formed_topics() {
        assert_eq!(
            serial_from_topic("hivesense/sensors/sensor-1/telemetry"),
            Some("sensor-1")
        );
        assert_eq!(
            serial_from_topic("hivesense/sensors/WH2_TH_004/telemetry"),
            Some("WH2_TH_004")
        );
    }

    #[test]
    fn malformed_topics_are_rejected() {
        assert_eq!(serial_from_topic("hivesense/sensors/telemetry"), None);
        assert_eq!(serial_from_topic("other/sensors/s1/telemetry"), None);
        assert_eq!(
            serial_from_topic("hivesense/sensors/s1/telemetry/extra"),
            None
        );
        assert_eq!(serial_from_topic("hivesense/sensors//telemetry"), None);
        assert_eq!(
            serial_from_topic("hivesense/sensors/has space/telemetry"),
            None
        );
    }

    #[test]
    fn payload_parses_numeric_readings() {
        assert_eq!(
            parse_payload(br#"{"temperature": 21.5, "humidity": 48.25}"#),
            Some((21.5, 48.25))
        );
    }

    #[test]
    fn malformed_payloads_are_dropped() {
        assert_eq!(parse_payload(b"not json"), None);
        assert_eq!(parse_payload(br#"{"temperature": "warm"}"#), None);
        assert_eq!(parse_payload(br#"{"temperature": 21.5}"#), None);
        assert_eq!(
            parse_payload(br#"{"temperature": 1e999, "humidity": 50}"#),
            None
        );
    }
}
