//! Forgiving deserializers for hand-written and generated CAML
//!
//! Authors write `"hp": "59 (7d10+21)"`, `"dialogue": "Hail!"` or
//! `"attitude": "Friendly"`. None of that should sink a whole document, so
//! the entity structs read such fields through the helpers here. Values
//! that cannot be used at all become absent instead of failing the parse.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// A list, or a single value standing in for a one-element list
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<OneOrMany<T>>::deserialize(deserializer)?
        .map(Vec::from)
        .unwrap_or_default())
}

/// A list of records where a bare string is shorthand for a record
///
/// Members that are neither a string nor a well-formed record are dropped.
pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + From<String>,
{
    let items: Vec<Value> = one_or_many(deserializer)?;
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(T::from(text)),
            other => serde_json::from_value(other.clone())
                .map_err(|error| warn!(%error, value = %other, "Dropping malformed list member"))
                .ok(),
        })
        .collect())
}

/// Map values that are lists or single values, e.g. outcome branches
pub fn map_of_lists<'de, D, T>(deserializer: D) -> Result<Option<IndexMap<String, Vec<T>>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let map = Option::<IndexMap<String, Option<OneOrMany<T>>>>::deserialize(deserializer)?;
    Ok(map.map(|entries| {
        entries
            .into_iter()
            .map(|(key, items)| (key, items.map(Vec::from).unwrap_or_default()))
            .collect()
    }))
}

/// A list of strings; scalars are stringified and other members dropped
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => vec![other],
    };
    Ok(items.into_iter().filter_map(scalar_text).collect())
}

/// An integer written as a number or as text with a leading number
pub fn integer<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(to_integer::<T>))
}

/// A map of integers, dropping entries that hold no usable number
pub fn integer_map<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let map = Option::<IndexMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(map
        .into_iter()
        .filter_map(|(key, value)| to_integer::<T>(&value).map(|n| (key, n)))
        .collect())
}

/// A float written as a number or as text with a leading number
pub fn float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(to_number))
}

/// A boolean, also accepting `"yes"`/`"no"`, `"true"`/`"false"` and 0/1
pub fn boolean<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        _ => false,
    })
}

/// The number a piece of text starts with: `"59 (7d10+21)"`, `"+5"`,
/// `"30 ft."` or a fraction such as `"1/4"`
pub fn leading_number(text: &str) -> Option<f64> {
    let token = text.split_whitespace().next()?;
    if let Some((numerator, denominator)) = token.split_once('/') {
        if let (Ok(n), Ok(d)) = (numerator.parse::<f64>(), denominator.parse::<f64>()) {
            return (d != 0.0).then(|| n / d);
        }
    }

    let end = token
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && matches!(c, '+' | '-'))))
        .map_or(token.len(), |(i, _)| i);
    token[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Lowercased alphanumerics only, so `Very Rare`, `very_rare` and
/// `veryRare` compare equal
pub fn normalize_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(s),
        _ => None,
    }
}

fn to_integer<T: TryFrom<i64>>(value: &Value) -> Option<T> {
    to_number(value).and_then(|n| T::try_from(n.round() as i64).ok())
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => {
            debug!(value = %other, "Dropping non-text list member");
            None
        }
    }
}

/// Defines a string enum with a known set of values and an `Other` fallback.
///
/// Known values match ignoring case and punctuation; anything else is kept
/// verbatim in `Other` and serialized back unchanged.
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Other(raw) => raw,
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                let key = $crate::domain::value_objects::lenient::normalize_key(raw);
                $(
                    if key == $crate::domain::value_objects::lenient::normalize_key($text) {
                        return Self::$variant;
                    }
                )+
                Self::Other(raw.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                Ok(match <serde_json::Value as serde::Deserialize>::deserialize(deserializer)? {
                    serde_json::Value::String(raw) => Self::from(raw.as_str()),
                    other => Self::Other(other.to_string()),
                })
            }
        }
    };
}

pub(crate) use open_enum;
