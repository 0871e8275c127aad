use serde_json::Value;
use telemetry_config::TelemetryConfig;
use tracing::{debug, error, info, warn};

use crate::{error::TelemetryError, Level, LogRecord};

/// Logger name tagged onto every remotely shipped record, and the `tracing`
/// target used by the local sink.
pub const CHANNEL: &str = "telemetry";

/// Destination that records or forwards a log record.
///
/// Bound once per logger instance at construction and never swapped.
pub trait Sink: Send + Sync {
    fn write(&self, record: LogRecord);
}

/// The external log-shipping collaborator behind [`RemoteSink`].
///
/// Transport, encoding and delivery failures are the handler's own concern;
/// the facade neither catches nor translates them.
pub trait RemoteHandler: Send + Sync {
    fn ship(&self, channel: &str, record: LogRecord);
}

/// Forwards records to the remote log-ingestion service.
pub struct RemoteSink {
    handler: Box<dyn RemoteHandler>,
}

impl RemoteSink {
    #[must_use]
    pub fn new(handler: Box<dyn RemoteHandler>) -> Self {
        Self { handler }
    }
}

impl Sink for RemoteSink {
    fn write(&self, record: LogRecord) {
        self.handler.ship(CHANNEL, record);
    }
}

/// Delegates records to the host's `tracing` subscriber.
///
/// `tracing` has five severities, so the upper levels collapse onto the
/// nearest event macro; the exact level name is carried as a field so no
/// severity information is lost.
pub struct LocalSink;

impl Sink for LocalSink {
    fn write(&self, record: LogRecord) {
        let level = record.level.as_str();
        let context = Value::Object(record.context);
        let message = record.message;
        match record.level {
            Level::Debug => debug!(target: CHANNEL, level, context = %context, "{message}"),
            Level::Info | Level::Notice => {
                info!(target: CHANNEL, level, context = %context, "{message}");
            }
            Level::Warning => warn!(target: CHANNEL, level, context = %context, "{message}"),
            Level::Error | Level::Critical | Level::Alert | Level::Emergency => {
                error!(target: CHANNEL, level, context = %context, "{message}");
            }
        }
    }
}

/// Chooses the sink, once, from `TelemetryConfig::enabled`.
///
/// `connect` builds the remote handler from the configured source token (or
/// the empty string when none is set). A `connect` failure is fatal to
/// construction: there is no local fallback and no retry.
pub fn select_sink<C>(config: &TelemetryConfig, connect: C) -> Result<Box<dyn Sink>, TelemetryError>
where
    C: FnOnce(&str) -> Result<Box<dyn RemoteHandler>, TelemetryError>,
{
    if config.enabled {
        let token = config.source_token.as_deref().unwrap_or_default();
        let handler = connect(token)?;
        Ok(Box::new(RemoteSink::new(handler)))
    } else {
        Ok(Box::new(LocalSink))
    }
}
