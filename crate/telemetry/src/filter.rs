use std::error::Error;

use telemetry_config::{ExceptionClass, TelemetryConfig};

/// Membership checks against the configured exception-class lists.
///
/// A class matches when the error itself, or any error in its `source()`
/// chain, is an instance of it; the source chain plays the role of the
/// subclass relationship for wrapped errors. Checks short-circuit on the
/// first match and never mutate the lists.
#[derive(Debug, Clone, Default)]
pub struct ExceptionFilter {
    ignored: Vec<ExceptionClass>,
    reported: Vec<ExceptionClass>,
}

impl ExceptionFilter {
    #[must_use]
    pub fn new(ignored: Vec<ExceptionClass>, reported: Vec<ExceptionClass>) -> Self {
        Self { ignored, reported }
    }

    #[must_use]
    pub fn from_config(config: &TelemetryConfig) -> Self {
        Self::new(
            config.ignore_exceptions.clone(),
            config.report_exceptions.clone(),
        )
    }

    /// Determine if the error is one we should ignore.
    /// An empty ignore list never matches.
    #[must_use]
    pub fn should_ignore(&self, error: &(dyn Error + 'static)) -> bool {
        Self::matches_any(&self.ignored, error)
    }

    /// Determine if the error is one we should report.
    /// An empty report list never matches.
    #[must_use]
    pub fn should_report(&self, error: &(dyn Error + 'static)) -> bool {
        Self::matches_any(&self.reported, error)
    }

    fn matches_any(classes: &[ExceptionClass], error: &(dyn Error + 'static)) -> bool {
        classes.iter().any(|class| {
            let mut current = Some(error);
            while let Some(e) = current {
                if class.matches(e) {
                    return true;
                }
                current = e.source();
            }
            false
        })
    }
}
