/// Builds a [`Context`](crate::Context) from `key => value` pairs.
///
/// Values go through `serde_json::json!`, so anything serializable works;
/// keys keep their written order.
#[macro_export]
macro_rules! context {
    () => {
        $crate::Context::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Context::new();
        $(
            map.insert(($key).to_string(), $crate::reexport::serde_json::json!($value));
        )+
        map
    }};
}

/// Captures the identity of the enclosing function as a
/// [`CallerIdentity`](crate::CallerIdentity).
///
/// Expands to the type name of a call-site closure, which carries the full
/// path of the function it was written in; the owning type half is empty for
/// free functions.
#[macro_export]
macro_rules! caller_identity {
    () => {{
        let type_name = std::any::type_name_of_val(&|| {});
        $crate::CallerIdentity::from_type_path(type_name)
    }};
}
