use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Marketplace identifiers arrive as strings (`MLC1055`) from the live API and
/// as bare numbers from fixtures, so both are accepted and kept as text.
macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                #[derive(Deserialize)]
                #[serde(untagged)]
                enum RawId {
                    Text(String),
                    Number(serde_json::Number),
                }

                Ok(match Option::<RawId>::deserialize(deserializer)? {
                    Some(RawId::Text(text)) => Self(text),
                    Some(RawId::Number(number)) => Self(number.to_string()),
                    None => Self::default(),
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(ProductId);
id_newtype!(CategoryId);

/// Deserializes `null` the same way as a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductResult {
    #[serde(default)]
    pub id: ProductId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thumbnail: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency_id: String,
    #[serde(default)]
    pub category_id: CategoryId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permalink: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: CategoryId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Identity text reported by the backend for an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionInfo(pub String);

impl SessionInfo {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
