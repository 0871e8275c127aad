//! # Telemetry Logger
//!
//! A logging facade that forwards structured records either to a remote
//! log-ingestion service or to the host's own `tracing` subscriber, selected
//! once from configuration.
//!
//! Every record is enriched with ambient default context (environment name,
//! authenticated user) before dispatch, and `debug` entries additionally
//! carry the identity of the calling function. The facade also answers
//! whether a given error should be suppressed or force-reported, based on
//! the configured exception-class lists.
//!
//! ```ignore
//! use telemetry_config::TelemetryConfig;
//! use telemetry_logger::{caller_identity, context, StaticContext, TelemetryLogger};
//!
//! let config = TelemetryConfig::from_env()?;
//! let telemetry = TelemetryLogger::new(
//!     &config,
//!     Box::new(StaticContext::new("production")),
//!     |token| Ok(Box::new(MyShippingHandler::connect(token)?)),
//! )?;
//!
//! telemetry.info("service started", context! {"port" => 9998});
//! telemetry.debug_with_caller(&caller_identity!(), "step reached", context! {});
//! ```

mod caller;
mod context;
mod error;
mod filter;
mod level;
mod logger;
mod macros;
mod record;
mod sink;

pub use caller::CallerIdentity;
pub use context::{ContextProvider, StaticContext};
pub use error::TelemetryError;
pub use filter::ExceptionFilter;
pub use level::Level;
pub use logger::{TelemetryLogger, CALLER_KEY, SYSTEM_USER};
pub use record::{merge, Context, LogRecord};
pub use sink::{select_sink, LocalSink, RemoteHandler, RemoteSink, Sink, CHANNEL};

/// Re-exported dependencies for use with the macros
///
/// The `context!` macro builds its values through the re-exported
/// `serde_json`, so external crates don't need to add it as a direct
/// dependency.
pub mod reexport {
    pub use serde_json;
}
