//! Lenient readers for attributes the service does not type consistently.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// Custom field map; entries whose value is `null` are dropped.
pub(crate) fn custom_fields<'de, D>(deserializer: D) -> Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<String>>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|fields| {
        fields
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect()
    }))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Id {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

/// Record id sent either as a string or as a bare number; `null` reads as empty.
pub(crate) fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Id>::deserialize(deserializer)? {
        Some(Id::Text(text)) => text,
        Some(Id::Signed(n)) => n.to_string(),
        Some(Id::Unsigned(n)) => n.to_string(),
        None => String::new(),
    })
}
