use serde::Serialize;
use serde_json::Value;

use crate::Level;

/// Ordered string-to-value mapping attached to a record.
///
/// `serde_json` is built with `preserve_order`, so iteration follows
/// insertion order and the on-wire field order is stable.
pub type Context = serde_json::Map<String, Value>;

/// One log entry, built per call and consumed by the sink.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
    pub context: Context,
}

impl LogRecord {
    #[must_use]
    pub fn new(level: Level, message: impl Into<String>, context: Context) -> Self {
        Self {
            level,
            message: message.into(),
            context,
        }
    }
}

/// Overlays `overrides` onto `defaults`.
///
/// For a key present in both, the override value is kept at the key's
/// original position; keys only in `overrides` are appended in their own
/// order.
#[must_use]
pub fn merge(defaults: Context, overrides: Context) -> Context {
    let mut merged = defaults;
    for (key, value) in overrides {
        merged.insert(key, value);
    }
    merged
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn ctx(pairs: &[(&str, Value)]) -> Context {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[test]
    fn test_merge_overrides_win() {
        let defaults = ctx(&[("environment", json!("production")), ("user", json!("system"))]);
        let overrides = ctx(&[("user", json!(42))]);

        let merged = merge(defaults, overrides);
        assert_eq!(merged.get("environment"), Some(&json!("production")));
        assert_eq!(merged.get("user"), Some(&json!(42)));
    }

    #[test]
    fn test_merge_key_order() {
        let defaults = ctx(&[("environment", json!("staging")), ("user", json!("system"))]);
        let overrides = ctx(&[("user", json!(7)), ("request_id", json!("r-1"))]);

        let merged = merge(defaults, overrides);
        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        // defaults first in their order, then new override keys appended
        assert_eq!(keys, vec!["environment", "user", "request_id"]);
    }

    #[test]
    fn test_merge_empty_sides() {
        let defaults = ctx(&[("environment", json!("local"))]);
        assert_eq!(merge(defaults.clone(), Context::new()), defaults);
        assert_eq!(merge(Context::new(), defaults.clone()), defaults);
    }
}
