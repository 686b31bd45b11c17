//! Base64 serialization utilities for serde
//!
//! The backend ships images as base64 strings inside JSON; these modules
//! let the wire types hold raw bytes instead.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Deserializer, Serializer};

/// Serialize/deserialize an `Option<Vec<u8>>` as an optional base64 string.
///
/// A missing or null field maps to `None`; failed backend responses carry
/// no image.
///
/// Usage:
/// ```ignore
/// #[serde(default, with = "crate::protocol::serde_utils::base64_opt")]
/// pub field: Option<Vec<u8>>,
/// ```
pub mod base64_opt {
    use super::*;

    pub fn serialize<S>(data: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match data {
            Some(bytes) => serializer.serialize_str(&BASE64.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Deserialize::deserialize(deserializer)?;
        s.map(|s| BASE64.decode(s.trim()).map_err(serde::de::Error::custom))
            .transpose()
    }
}
