//! Extraction of a container's host process identifier from a runtime
//! inspection document.
//!
//! The inspect document is the JSON payload produced by a container-runtime
//! inspection tool (e.g., `crictl inspect`). Its schema is owned by that tool
//! and shifts across versions, so no fixed path into the document is assumed.
//! Instead the decoded value tree is searched depth-first for any key
//! literally named `pid` with a numeric value. When a document contains
//! several `pid` keys at different depths, the first one encountered wins;
//! the traversal order over object keys is not part of the contract.

mod error;

pub use error::{Error, Result};

use serde_json::Value;

/// A host process identifier.
pub type Pid = u32;

const PID_KEY: &str = "pid";

/// Extracts the container's process identifier from an inspect document.
///
/// # Arguments
///
/// * `data` - The raw bytes of the inspect JSON payload.
///
/// # Errors
///
/// - [`Error::Decode`] if the payload is not well-formed JSON.
/// - [`Error::MissingPid`] if no `pid` key with a numeric value exists
///   anywhere in the document.
///
/// # Example
///
/// ```
/// use container_stats::inspect::pid_from_inspect;
///
/// let doc = br#"{"info":{"pid":4242,"config":{}}}"#;
/// assert_eq!(pid_from_inspect(doc).unwrap(), 4242);
/// ```
pub fn pid_from_inspect(data: &[u8]) -> Result<Pid> {
    let doc: Value = serde_json::from_slice(data)?;
    find_pid(&doc).ok_or(Error::MissingPid)
}

/// Depth-first search for a numeric `pid` key in a decoded JSON tree.
///
/// A `pid` key with a non-numeric value does not end the search; the search
/// descends into that value and continues with the remaining siblings.
fn find_pid(value: &Value) -> Option<Pid> {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                if key == PID_KEY {
                    if let Some(pid) = as_pid(val) {
                        return Some(pid);
                    }
                }
                if let Some(pid) = find_pid(val) {
                    return Some(pid);
                }
            }
            None
        }
        Value::Array(items) => items.iter().find_map(find_pid),
        _ => None,
    }
}

/// Coerces a JSON number into a [`Pid`].
///
/// Integer representations are taken as-is; floating-point representations
/// are truncated toward zero. Non-numbers yield `None`.
fn as_pid(value: &Value) -> Option<Pid> {
    let num = value.as_number()?;
    num.as_u64()
        .map(|v| v as Pid)
        .or_else(|| num.as_f64().map(|v| v as Pid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_top_level_pid() {
        let doc = br#"{"pid": 1234}"#;
        assert_eq!(pid_from_inspect(doc).unwrap(), 1234);
    }

    #[test]
    fn extracts_nested_pid() {
        let doc = br#"{"info":{"runtimeSpec":{},"pid":987,"config":{"image":"x"}}}"#;
        assert_eq!(pid_from_inspect(doc).unwrap(), 987);
    }

    #[test]
    fn extracts_pid_inside_array() {
        let doc = br#"{"containers":[{"name":"a"},{"status":{"pid":55}}]}"#;
        assert_eq!(pid_from_inspect(doc).unwrap(), 55);
    }

    #[test]
    fn truncates_floating_point_pid() {
        let doc = br#"{"status":{"pid": 4242.9}}"#;
        assert_eq!(pid_from_inspect(doc).unwrap(), 4242);
    }

    #[test]
    fn skips_non_numeric_pid_and_keeps_searching() {
        let doc = br#"{"pid":"not-a-number","inner":{"pid":77}}"#;
        assert_eq!(pid_from_inspect(doc).unwrap(), 77);
    }

    #[test]
    fn descends_into_value_under_non_numeric_pid_key() {
        let doc = br#"{"pid":{"pid":42}}"#;
        assert_eq!(pid_from_inspect(doc).unwrap(), 42);
    }

    #[test]
    fn missing_pid_errors() {
        let doc = br#"{"name":"x","status":{"state":"running"}}"#;
        let err = pid_from_inspect(doc).unwrap_err();
        assert!(matches!(err, Error::MissingPid));
    }

    #[test]
    fn malformed_json_errors() {
        let doc = b"{not json";
        let err = pid_from_inspect(doc).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn scalar_document_has_no_pid() {
        let err = pid_from_inspect(b"42").unwrap_err();
        assert!(matches!(err, Error::MissingPid));
    }
}
