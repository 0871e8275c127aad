pub use config::{
    get_default_conf_path, get_home_folder, location, publish_default_conf, ExceptionClass,
    TelemetryConfig, TELEMETRY_CONF_ENV, TELEMETRY_ENABLED_ENV, TELEMETRY_SOURCE_TOKEN_ENV,
};
pub use error::ConfigError;

mod config;
mod error;

#[cfg(test)]
pub mod tests;
