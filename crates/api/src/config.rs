use persistence::db::DatabaseConfig;
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub mqtt: MqttConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Telemetry broker configuration. Disabled by default so the HTTP surface
/// can run without a broker.
#[derive(Debug, Clone, Deserialize)]
pub struct MqttConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_mqtt_host")]
    pub host: String,

    #[serde(default = "default_mqtt_port")]
    pub port: u16,

    #[serde(default = "default_mqtt_client_id")]
    pub client_id: String,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default = "default_mqtt_topic")]
    pub topic: String,

    #[serde(default = "default_mqtt_keep_alive")]
    pub keep_alive_secs: u64,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "compact".to_string()
}
fn default_mqtt_host() -> String {
    "localhost".to_string()
}
fn default_mqtt_port() -> u16 {
    8883
}
fn default_mqtt_client_id() -> String {
    "hivesense-core".to_string()
}
fn default_mqtt_topic() -> String {
    "hivesense/sensors/+/telemetry".to_string()
}
fn default_mqtt_keep_alive() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_mqtt_host(),
            port: default_mqtt_port(),
            client_id: default_mqtt_client_id(),
            username: None,
            password: None,
            topic: default_mqtt_topic(),
            keep_alive_secs: default_mqtt_keep_alive(),
        }
    }
}

impl Config {
    /// Loads configuration from files and `HIVESENSE_`-prefixed environment
    /// variables. `DATABASE_URL` is honored as the conventional override for
    /// the database connection string.
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("HIVESENSE")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", url)?;
        }

        builder.build()?.try_deserialize()
    }

    /// The socket address the HTTP server binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], self.server.port)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let server = ServerConfig::default();
        assert_eq!(server.port, 8080);

        let mqtt = MqttConfig::default();
        assert!(!mqtt.enabled);
        assert_eq!(mqtt.topic, "hivesense/sensors/+/telemetry");
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 9000,
                request_timeout_secs: 30,
            },
            database: persistence::db::DatabaseConfig {
                url: "postgres://localhost/hivesense".into(),
                max_connections: 5,
                min_connections: 1,
                connect_timeout_secs: 5,
                idle_timeout_secs: 60,
            },
            logging: LoggingConfig::default(),
            mqtt: MqttConfig::default(),
        };
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9000");
    }
}
