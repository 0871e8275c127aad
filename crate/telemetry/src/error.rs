use telemetry_config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("{0}")]
    Default(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid source token: {0}")]
    SourceToken(String),

    #[error("Remote handler error: {0}")]
    Handler(String),
}

impl From<ConfigError> for TelemetryError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
