use serde_json::Value;
use telemetry_config::TelemetryConfig;

use crate::{
    error::TelemetryError,
    filter::ExceptionFilter,
    record::{merge, Context, LogRecord},
    sink::{select_sink, RemoteHandler, Sink},
    CallerIdentity, ContextProvider, Level,
};

/// Context key injected by `debug` with the caller's identity.
pub const CALLER_KEY: &str = "class::function";

/// Value of the `user` default-context key when nobody is authenticated.
pub const SYSTEM_USER: &str = "system";

/// The public logging facade.
///
/// Eight severity methods, each fire-and-forget: the caller-supplied context
/// is merged over the ambient default context and the record is handed to
/// the sink bound at construction. The facade also exposes the
/// ignore/report exception checks used by the host's error reporting.
pub struct TelemetryLogger {
    sink: Box<dyn Sink>,
    context: Box<dyn ContextProvider>,
    filter: ExceptionFilter,
}

impl TelemetryLogger {
    /// Selects and binds the sink once for the lifetime of the instance:
    /// remote when `config.enabled`, otherwise the host's `tracing`
    /// subscriber. `connect` builds the remote handler from the source
    /// token; its failure propagates, unhandled, to the constructor caller.
    pub fn new<C>(
        config: &TelemetryConfig,
        context: Box<dyn ContextProvider>,
        connect: C,
    ) -> Result<Self, TelemetryError>
    where
        C: FnOnce(&str) -> Result<Box<dyn RemoteHandler>, TelemetryError>,
    {
        Ok(Self {
            sink: select_sink(config, connect)?,
            context,
            filter: ExceptionFilter::from_config(config),
        })
    }

    /// Assembles a logger from already-built parts; useful when the host
    /// wires its own sink, and for substitution in tests.
    #[must_use]
    pub fn from_parts(
        sink: Box<dyn Sink>,
        context: Box<dyn ContextProvider>,
        filter: ExceptionFilter,
    ) -> Self {
        Self {
            sink,
            context,
            filter,
        }
    }

    /// Usage: Use for debugging, tracing, or step-by-step logging that
    /// helps developers understand what the code is doing.
    ///
    /// The record carries a `"class::function"` key with the caller's
    /// identity; this plain method cannot see its caller, so both halves
    /// are empty. Use [`Self::debug_with_caller`] with the
    /// [`caller_identity!`](crate::caller_identity) macro to fill them in.
    pub fn debug(&self, message: &str, context: Context) {
        self.debug_with_caller(&CallerIdentity::default(), message, context);
    }

    /// Same as [`Self::debug`], with an explicit caller identity captured at
    /// the call site.
    pub fn debug_with_caller(&self, caller: &CallerIdentity, message: &str, mut context: Context) {
        // Injected before the default merge, so it counts as caller context
        // for precedence purposes
        context.insert(CALLER_KEY.to_owned(), Value::String(caller.to_string()));
        self.log(Level::Debug, message, context);
    }

    /// Usage: Use for general application flow messages that aren't critical
    /// but give insight into the app's normal operation. Often used for
    /// routine events such as service starts, database connections, or
    /// status updates.
    pub fn info(&self, message: &str, context: Context) {
        self.log(Level::Info, message, context);
    }

    /// Usage: Use for events that aren't errors but might be important to
    /// monitor, like a system event or a situation that could require
    /// investigation later.
    pub fn notice(&self, message: &str, context: Context) {
        self.log(Level::Notice, message, context);
    }

    /// Usage: Use for situations that are not errors but may lead to problems
    /// if not addressed, such as a deprecated function being used or minor
    /// issues that don't affect the app's operation immediately.
    pub fn warning(&self, message: &str, context: Context) {
        self.log(Level::Warning, message, context);
    }

    /// Usage: Use when something goes wrong, such as a failed operation, but
    /// the application can still continue functioning.
    pub fn error(&self, message: &str, context: Context) {
        self.log(Level::Error, message, context);
    }

    /// Usage: Use for critical issues that need immediate attention, such as
    /// a service being unavailable or a critical component failing.
    pub fn critical(&self, message: &str, context: Context) {
        self.log(Level::Critical, message, context);
    }

    /// Usage: Use for highly critical situations that need immediate
    /// intervention, such as system failure, resource exhaustion, or
    /// security breaches.
    pub fn alert(&self, message: &str, context: Context) {
        self.log(Level::Alert, message, context);
    }

    /// Usage: This level is reserved for situations where the application or
    /// system is completely compromised or failing in a way that requires
    /// immediate intervention from system administrators.
    pub fn emergency(&self, message: &str, context: Context) {
        self.log(Level::Emergency, message, context);
    }

    /// Determine if the error is one we should ignore.
    #[must_use]
    pub fn should_ignore(&self, error: &(dyn std::error::Error + 'static)) -> bool {
        self.filter.should_ignore(error)
    }

    /// Determine if the error is one we should report.
    #[must_use]
    pub fn should_report(&self, error: &(dyn std::error::Error + 'static)) -> bool {
        self.filter.should_report(error)
    }

    /// Send the record to the bound sink.
    fn log(&self, level: Level, message: &str, context: Context) {
        self.sink
            .write(LogRecord::new(level, message, self.complete_context(context)));
    }

    /// The default context included in all telemetry records, recomputed on
    /// every call so a mid-request login shows up in the next record.
    fn default_context(&self) -> Context {
        let mut context = Context::new();
        context.insert(
            "environment".to_owned(),
            Value::String(self.context.environment()),
        );
        context.insert(
            "user".to_owned(),
            self.context
                .authenticated_user()
                .unwrap_or_else(|| Value::String(SYSTEM_USER.to_owned())),
        );
        context
    }

    /// Get the full context for logging, including the default context.
    /// Caller-supplied keys win over default keys on collision.
    fn complete_context(&self, context: Context) -> Context {
        merge(self.default_context(), context)
    }
}
