//! Serde helpers for quirks in the upstream wire format.

use serde::de::{self, Deserialize, DeserializeOwned, Deserializer};

/// Deserializes `{}`, `null`, or an absent key as `None`.
///
/// The backend emits an empty object rather than omitting the key when a
/// section has no data (e.g. `best_day` over an empty period), so a plain
/// `Option<T>` would fail on the missing inner fields.
pub(crate) fn empty_object_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(serde_json::Value::Object(map)) if map.is_empty() => Ok(None),
        Some(other) => T::deserialize(other).map(Some).map_err(de::Error::custom),
    }
}

/// Deserializes `null` as `T::default()`.
///
/// Grouped VAT-rate rows pass database NULLs straight through to JSON; the
/// views render those as zero.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
