//! Tolerant field decoders.
//!
//! The backend is not strict about JSON types: ids come back as numbers or
//! strings, numeric columns sometimes arrive quoted or not numeric at all.
//! These helpers accept any of it so one odd field does not fail the whole
//! table.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Any scalar as text. `null` and missing fields become `None`.
pub mod text {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        })
    }
}

/// A numeric column as received: parsed when it reads as a number, otherwise
/// kept as the text the backend sent so the row still renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Numeric<T> {
    Number(T),
    Text(String),
}

impl<T: Copy> Numeric<T> {
    pub fn number(&self) -> Option<T> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Numeric<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

fn display_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn numeric<T>(value: Option<Value>, parse: impl Fn(&Value) -> Option<T>) -> Option<Numeric<T>> {
    match value {
        None | Some(Value::Null) => None,
        Some(value) => Some(match parse(&value) {
            Some(n) => Numeric::Number(n),
            None => Numeric::Text(display_text(value)),
        }),
    }
}

/// Whole numbers given as JSON numbers or numeric strings.
pub mod integer {
    use super::*;
    use serde::Serializer;

    fn parse(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Numeric<i64>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(numeric(Option::<Value>::deserialize(deserializer)?, parse))
    }

    pub fn serialize<S>(value: &Option<Numeric<i64>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(Numeric::Number(n)) => serializer.serialize_i64(*n),
            Some(Numeric::Text(s)) => serializer.serialize_str(s),
            None => serializer.serialize_none(),
        }
    }
}

/// Decimals given as JSON numbers or numeric strings; written back as JSON
/// numbers.
pub mod decimal {
    use super::*;
    use rust_decimal::prelude::ToPrimitive;
    use serde::Serializer;

    pub fn parse(raw: &str) -> Option<Decimal> {
        let raw = raw.trim();
        Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .ok()
    }

    fn parse_value(value: &Value) -> Option<Decimal> {
        match value {
            Value::Number(n) => parse(&n.to_string()),
            Value::String(s) => parse(s),
            _ => None,
        }
        .map(|d| d.normalize())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Numeric<Decimal>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(numeric(Option::<Value>::deserialize(deserializer)?, parse_value))
    }

    pub fn serialize<S>(value: &Option<Numeric<Decimal>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(Numeric::Number(d)) => match d.to_f64() {
                Some(f) => serializer.serialize_f64(f),
                None => serializer.serialize_str(&d.to_string()),
            },
            Some(Numeric::Text(s)) => serializer.serialize_str(s),
            None => serializer.serialize_none(),
        }
    }
}
