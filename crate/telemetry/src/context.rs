use serde_json::Value;

/// Ambient request state consulted on every logging call.
///
/// Implementations are supplied by the host; values are read fresh per call
/// and never cached, so an authentication change mid-request shows up in the
/// next record.
pub trait ContextProvider: Send + Sync {
    /// Name of the environment the application runs in, e.g. "production".
    fn environment(&self) -> String;

    /// Identifier of the currently authenticated principal, if any.
    fn authenticated_user(&self) -> Option<Value>;
}

/// Fixed-value provider for hosts without ambient request state.
#[derive(Debug, Clone, Default)]
pub struct StaticContext {
    pub environment: String,
    pub user: Option<Value>,
}

impl StaticContext {
    #[must_use]
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            user: None,
        }
    }

    #[must_use]
    pub fn with_user(mut self, user: impl Into<Value>) -> Self {
        self.user = Some(user.into());
        self
    }
}

impl ContextProvider for StaticContext {
    fn environment(&self) -> String {
        self.environment.clone()
    }

    fn authenticated_user(&self) -> Option<Value> {
        self.user.clone()
    }
}
