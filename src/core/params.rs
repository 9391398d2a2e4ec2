//! The untyped request parameter bag.
//!
//! Parameters come from the host transport and are never persisted. They
//! are exposed to guards, hooks and actions as a JSON object.

use serde_json::Value;

/// Request parameters, keyed by name.
pub type Params = serde_json::Map<String, Value>;

/// Whether a parameter value counts as "set".
///
/// Null, `false`, the empty string, `"0"` and `"false"` are falsy; every
/// other value, including empty arrays and objects, is truthy.
///
/// # Example
///
/// ```rust
/// use flowstate::core::param_is_truthy;
/// use serde_json::json;
///
/// assert!(param_is_truthy(&json!("1")));
/// assert!(param_is_truthy(&json!(true)));
/// assert!(!param_is_truthy(&json!("false")));
/// assert!(!param_is_truthy(&json!(null)));
/// ```
pub fn param_is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !matches!(s.as_str(), "" | "0" | "false"),
        _ => true,
    }
}

/// Read a parameter as a string, when it is one.
pub fn param_str<'a>(params: &'a Params, name: &str) -> Option<&'a str> {
    params.get(name).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn falsy_values() {
        for value in [json!(null), json!(false), json!(""), json!("0"), json!("false")] {
            assert!(!param_is_truthy(&value), "{value} should be falsy");
        }
    }

    #[test]
    fn truthy_values() {
        for value in [json!(true), json!("yes"), json!(0), json!([]), json!({})] {
            assert!(param_is_truthy(&value), "{value} should be truthy");
        }
    }

    #[test]
    fn param_str_only_reads_strings() {
        let mut params = Params::new();
        params.insert("initial".into(), json!("running"));
        params.insert("count".into(), json!(3));
        assert_eq!(param_str(&params, "initial"), Some("running"));
        assert_eq!(param_str(&params, "count"), None);
        assert_eq!(param_str(&params, "missing"), None);
    }
}
