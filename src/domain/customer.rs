use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::types::{CustomerAge, CustomerEmail, CustomerId, CustomerName};

/// Customer record as returned by the directory.
///
/// The desk only displays these values and copies them into the draft, so
/// they are kept as the directory sent them. Missing or `null` text reads as
/// empty, and an age that is not a whole number reads as absent.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    #[serde(default, deserialize_with = "loose_text")]
    pub name: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub email: String,
    #[serde(default, deserialize_with = "loose_age")]
    pub age: Option<i64>,
}

/// Whatever JSON a directory row carries in a text or age slot.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseValue {
    Text(String),
    Whole(i64),
    Fraction(f64),
    Other(IgnoredAny),
}

fn loose_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LooseValue::deserialize(deserializer)? {
        LooseValue::Text(text) => text,
        LooseValue::Whole(number) => number.to_string(),
        LooseValue::Fraction(number) => number.to_string(),
        LooseValue::Other(_) => String::new(),
    })
}

fn loose_age<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LooseValue::deserialize(deserializer)? {
        LooseValue::Whole(number) => Some(number),
        LooseValue::Fraction(number) if number.is_finite() && number.fract() == 0.0 => {
            Some(number as i64)
        }
        LooseValue::Text(text) => text.trim().parse().ok(),
        LooseValue::Fraction(_) | LooseValue::Other(_) => None,
    })
}

/// Validated body of create and update requests.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CustomerPayload {
    pub name: CustomerName,
    pub email: CustomerEmail,
    pub age: CustomerAge,
}

impl CustomerPayload {
    #[must_use]
    pub fn new(name: CustomerName, email: CustomerEmail, age: CustomerAge) -> Self {
        Self { name, email, age }
    }
}
