use serde_json::Value;

pub mod save_job;
pub mod search_jobs;

pub use save_job::SaveJobTool;
pub use search_jobs::SearchJobsTool;

pub fn extract_string_arg(args: &Value, key: &str) -> anyhow::Result<String> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow::anyhow!("Missing '{}' parameter", key))
        .map(|s| s.to_string())
}

pub fn extract_optional_string_arg(args: &Value, key: &str) -> Option<String> {
    args.get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// `default` when `key` is absent or null. Any other value must be a
/// non-negative JSON integer.
pub fn extract_usize_arg_opt(args: &Value, key: &str, default: usize) -> anyhow::Result<usize> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => value
            .as_u64()
            .and_then(|v| usize::try_from(v).ok())
            .ok_or_else(|| anyhow::anyhow!("'{}' must be a non-negative integer, got {}", key, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn usize_arg_defaults_only_when_absent() {
        assert_eq!(extract_usize_arg_opt(&json!({}), "n", 5).unwrap(), 5);
        assert_eq!(extract_usize_arg_opt(&json!({"n": null}), "n", 5).unwrap(), 5);
        assert_eq!(extract_usize_arg_opt(&json!({"n": 2}), "n", 5).unwrap(), 2);
    }

    #[test]
    fn usize_arg_rejects_other_shapes() {
        for bad in [json!(-1), json!(2.0), json!(2.5), json!("2"), json!(true)] {
            let err = extract_usize_arg_opt(&json!({ "n": bad }), "n", 5).unwrap_err();
            assert!(err.to_string().contains("'n' must be a non-negative integer"));
        }
    }
}
