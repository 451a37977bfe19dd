//! Serde helpers for the node's JSON conventions.
//!
//! Byte arrays travel as base64 text, absent fields are often `null`
//! rather than missing, and big integers are rendered as decimal strings.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use num_bigint::BigUint;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serializer};

/// Deserialize `null` as the type's default value.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serialize a big integer as a decimal string.
pub(crate) fn decimal<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Serialize byte buffers holding text as a list of strings.
pub(crate) fn text_values<S: Serializer>(
    values: &[Vec<u8>],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(values.len()))?;
    for value in values {
        seq.serialize_element(&String::from_utf8_lossy(value))?;
    }
    seq.end()
}

/// A single base64 byte array; `null` is empty.
pub(crate) mod base64_bytes {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        BASE64.decode(text).map_err(serde::de::Error::custom)
    }
}

/// A list of base64 byte arrays; `null` entries are empty.
pub(crate) mod base64_list {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<u8>>, D::Error> {
        let items = Option::<Vec<Option<String>>>::deserialize(deserializer)?.unwrap_or_default();
        items
            .into_iter()
            .map(|item| BASE64.decode(item.unwrap_or_default()))
            .collect::<Result<_, _>>()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Deserialize)]
    struct Record {
        #[serde(default, with = "super::base64_bytes")]
        data: Vec<u8>,
        #[serde(default, with = "super::base64_list")]
        topics: Vec<Vec<u8>>,
        #[serde(default, deserialize_with = "super::nullable")]
        name: String,
    }

    #[derive(Serialize)]
    struct Values {
        #[serde(serialize_with = "super::text_values")]
        values: Vec<Vec<u8>>,
    }

    #[test]
    fn test_base64_fields() {
        let record: Record =
            serde_json::from_str(r#"{"data":"QDZmNmI=","topics":["b2s=",null]}"#).unwrap();
        assert_eq!(record.data, b"@6f6b");
        assert_eq!(record.topics, vec![b"ok".to_vec(), Vec::new()]);
        assert!(record.name.is_empty());
    }

    #[test]
    fn test_null_fields() {
        let record: Record =
            serde_json::from_str(r#"{"data":null,"topics":null,"name":null}"#).unwrap();
        assert!(record.data.is_empty());
        assert!(record.topics.is_empty());
        assert!(record.name.is_empty());
    }

    #[test]
    fn test_invalid_base64_rejected() {
        assert!(serde_json::from_str::<Record>(r#"{"data":"%%%"}"#).is_err());
    }

    #[test]
    fn test_text_values() {
        let json = serde_json::to_string(&Values {
            values: vec![b"03".to_vec(), Vec::new()],
        })
        .unwrap();
        assert_eq!(json, r#"{"values":["03",""]}"#);
    }
}
