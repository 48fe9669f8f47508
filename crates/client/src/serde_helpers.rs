//! Serde helpers for the Nexus wire formats.
//!
//! Responsibilities:
//! - Accept ids that arrive as JSON numbers or numeric strings.
//! - Carry typed lists that the server stores as JSON-encoded strings.
//!
//! Explicitly does NOT handle:
//! - Validating business rules on the decoded values.
//!
//! Invariants / assumptions:
//! - Errors are generic parse errors and never echo payload contents.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum I64OrString {
    I64(i64),
    String(String),
}

/// Read an id that may be a number or a numeric string.
pub fn id_from_value(value: &serde_json::Value) -> Option<i64> {
    match I64OrString::deserialize(value).ok()? {
        I64OrString::I64(v) => Some(v),
        I64OrString::String(s) => s.trim().parse().ok(),
    }
}

pub fn opt_i64_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<I64OrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(I64OrString::I64(v)) => Ok(Some(v)),
        Some(I64OrString::String(s)) if s.is_empty() => Ok(None),
        Some(I64OrString::String(s)) => s.parse::<i64>().map(Some).map_err(D::Error::custom),
    }
}

/// A list encoded as a JSON string inside the JSON document.
///
/// Missing, null and empty strings decode to an empty list.
pub mod json_string_list {
    use super::*;

    pub fn serialize<T, S>(items: &[T], serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        let encoded = serde_json::to_string(items).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        T: serde::de::DeserializeOwned,
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Vec::new()),
            Some(s) if s.trim().is_empty() => Ok(Vec::new()),
            Some(s) => serde_json::from_str(&s).map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_from_value_accepts_number_and_string() {
        assert_eq!(id_from_value(&json!(42)), Some(42));
        assert_eq!(id_from_value(&json!("42")), Some(42));
        assert_eq!(id_from_value(&json!("abc")), None);
        assert_eq!(id_from_value(&json!(null)), None);
    }

    #[test]
    fn test_opt_i64_from_string_or_number() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default, deserialize_with = "opt_i64_from_string_or_number")]
            value: Option<i64>,
        }

        let parsed: Wrapper = serde_json::from_str(r#"{ "value": "7" }"#).unwrap();
        assert_eq!(parsed.value, Some(7));
        let parsed: Wrapper = serde_json::from_str(r#"{ "value": 7 }"#).unwrap();
        assert_eq!(parsed.value, Some(7));
        let parsed: Wrapper = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(parsed.value, None);
    }

    #[test]
    fn test_json_string_list_round_trip_shape() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            #[serde(default, with = "json_string_list")]
            value: Vec<u8>,
        }

        let parsed: Wrapper = serde_json::from_str(r#"{ "value": "[1,2]" }"#).unwrap();
        assert_eq!(parsed.value, vec![1, 2]);

        let encoded = serde_json::to_value(&parsed).unwrap();
        assert_eq!(encoded, json!({"value": "[1,2]"}));

        let parsed: Wrapper = serde_json::from_str(r#"{ "value": "" }"#).unwrap();
        assert!(parsed.value.is_empty());
    }
}
