use std::fmt;

/// Identity of the function that invoked a logging call.
///
/// Either half may be empty when it cannot be resolved; `Display` always
/// renders both halves around `::`, matching the key injected into debug
/// records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerIdentity {
    pub class: String,
    pub function: String,
}

impl CallerIdentity {
    #[must_use]
    pub fn new(class: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            function: function.into(),
        }
    }

    /// Splits a fully qualified path, as produced by
    /// `std::any::type_name_of_val` on a call-site closure, into the owning
    /// type and the function name.
    ///
    /// The last path segment that is not a closure marker is the function;
    /// the segment before it is kept as the owning type only when it looks
    /// like one (leading uppercase), since for free functions that segment
    /// is the module.
    #[must_use]
    pub fn from_type_path(path: &str) -> Self {
        let mut parts = path.rsplit("::").filter(|part| *part != "{{closure}}");
        let function = parts.next().unwrap_or("").to_owned();
        let class = parts
            .next()
            .filter(|part| part.chars().next().is_some_and(char::is_uppercase))
            .unwrap_or("")
            .to_owned();
        Self { class, function }
    }
}

impl fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.class, self.function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_path() {
        let caller = CallerIdentity::from_type_path("app::billing::Invoice::settle::{{closure}}");
        assert_eq!(caller.class, "Invoice");
        assert_eq!(caller.function, "settle");
        assert_eq!(caller.to_string(), "Invoice::settle");
    }

    #[test]
    fn test_free_function_path() {
        let caller = CallerIdentity::from_type_path("app::billing::settle::{{closure}}");
        assert_eq!(caller.class, "");
        assert_eq!(caller.function, "settle");
        assert_eq!(caller.to_string(), "::settle");
    }

    #[test]
    fn test_unresolvable_path() {
        let caller = CallerIdentity::from_type_path("");
        assert_eq!(caller.to_string(), "::");
        assert_eq!(caller, CallerIdentity::default());
    }

    #[test]
    fn test_nested_closures_are_skipped() {
        let caller =
            CallerIdentity::from_type_path("app::Worker::run::{{closure}}::{{closure}}");
        assert_eq!(caller.class, "Worker");
        assert_eq!(caller.function, "run");
    }
}
