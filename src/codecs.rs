// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Serde helpers for document fields with a custom BSON representation.

/// Store a [`uuid::Uuid`] as its hyphenated string.
///
/// The BSON serializer is not human-readable, so a bare `Uuid` field is
/// written as binary. Use this when other tools need to read the value:
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct Player {
///     #[serde(with = "magic_mongo::codecs::uuid_as_string")]
///     id: Uuid,
/// }
/// ```
pub mod uuid_as_string {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use uuid::Uuid;

    pub fn serialize<S>(value: &Uuid, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.hyphenated())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Uuid::parse_str(&raw).map_err(D::Error::custom)
    }

    /// Same, for `Option<Uuid>`; `None` is stored as null.
    pub mod option {
        use super::*;

        pub fn serialize<S>(value: &Option<Uuid>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(uuid) => serializer.collect_str(&uuid.hyphenated()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| Uuid::parse_str(&raw).map_err(D::Error::custom))
                .transpose()
        }
    }
}
