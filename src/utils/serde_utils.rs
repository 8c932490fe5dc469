use serde::{Deserialize, Deserializer};
use serde_json::Value;


pub fn option_is_empty<T>(value: &Option<T>) -> bool {
    value.is_none()
}

pub fn vec_is_empty<T>(v: &Vec<T>) -> bool {
    v.is_empty()
}

/// Paging cursors come back as strings on most endpoints and as numbers on
/// batch changes; both are kept as strings.
pub fn page_key<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number paging key, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Cursor {
        #[serde(default, rename = "nextId", deserialize_with = "page_key")]
        next_id: Option<String>,
    }

    #[test]
    fn page_key_accepts_strings_and_numbers() {
        let s: Cursor = serde_json::from_str(r#"{"nextId":"abc"}"#).unwrap();
        assert_eq!(s.next_id.as_deref(), Some("abc"));

        let n: Cursor = serde_json::from_str(r#"{"nextId":100}"#).unwrap();
        assert_eq!(n.next_id.as_deref(), Some("100"));

        let missing: Cursor = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.next_id, None);

        let null: Cursor = serde_json::from_str(r#"{"nextId":null}"#).unwrap();
        assert_eq!(null.next_id, None);
    }

    #[test]
    fn page_key_rejects_objects() {
        assert!(serde_json::from_str::<Cursor>(r#"{"nextId":{}}"#).is_err());
    }
}
