// This file is part of the azurerm-frontdoor project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! [`Value`] and [`AttributeValue`] module

use std::{
    collections::BTreeMap,
    fmt::{Debug, Display},
};

use serde::{de::Visitor, ser::SerializeMap, ser::SerializeSeq, Deserialize, Serialize};

/// Encode either a known value, a null value, or an unknown value as specified by the Terraform protocol.
///
/// [`Value`] is closely modeled after [`Option`] where:
/// - [`Value::Value`] is equivalent to [`Option::Some`],
/// - [`Value::Null`] is equivalent to [`Option::None`],
/// - [`Value::Unknown`] has no option counterpart and represent a value that is currently unknown, but will be known later on.
///
/// Reading an attribute that is absent from a block yields [`Value::Null`],
/// which is how "absent" is told apart from "present as zero".
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash, Default)]
pub enum Value<T> {
    /// Value is present
    Value(T),
    /// No value is present
    #[default]
    Null,
    /// Value is unknown
    Unknown,
}

impl<T> Value<T> {
    /// Check if the value is known and present
    #[inline]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Check if the value is null
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if the value is unknown
    #[inline]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Converts from `&Value<T>` to `Value<&T>`
    #[inline]
    pub const fn as_ref(&self) -> Value<&T> {
        match *self {
            Self::Value(ref x) => Value::Value(x),
            Self::Null => Value::Null,
            Self::Unknown => Value::Unknown,
        }
    }

    /// Returns the contained [`Value::Value`] value or a provided default.
    ///
    /// # Examples
    ///
    /// ```
    /// # use azurerm_frontdoor::value::Value;
    /// assert_eq!(Value::Value("car").unwrap_or("bike"), "car");
    /// assert_eq!(Value::Null.unwrap_or("bike"), "bike");
    /// assert_eq!(Value::Unknown.unwrap_or("bike"), "bike");
    /// ```
    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Value(x) => x,
            _ => default,
        }
    }

    /// Returns the contained [`Value::Value`] value or a default.
    ///
    /// # Examples
    ///
    /// ```
    /// # use azurerm_frontdoor::value::Value;
    /// let x: Value<u32> = Value::Value(12);
    /// let y: Value<u32> = Value::Null;
    /// assert_eq!(x.unwrap_or_default(), 12);
    /// assert_eq!(y.unwrap_or_default(), 0);
    /// ```
    #[inline]
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        match self {
            Self::Value(x) => x,
            _ => Default::default(),
        }
    }

    /// Maps a `Value<T>` to `Value<U>` by applying a function to a contained value
    ///
    /// # Examples
    ///
    /// ```
    /// # use azurerm_frontdoor::value::Value;
    /// assert_eq!(Value::Value("Hello").map(|s| s.len()), Value::Value(5));
    /// assert_eq!(Value::<&str>::Null.map(|s| s.len()), Value::Null);
    /// assert_eq!(Value::<&str>::Unknown.map(|s| s.len()), Value::Unknown);
    /// ```
    #[inline]
    pub fn map<U, F>(self, f: F) -> Value<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Value(x) => Value::Value(f(x)),
            Self::Null => Value::Null,
            Self::Unknown => Value::Unknown,
        }
    }

    /// Returns [`Value::Null`] if the value is [`Value::Value`] and the predicate returns `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use azurerm_frontdoor::value::Value;
    /// let non_empty = |s: &&str| !s.is_empty();
    /// assert_eq!(Value::Value("").filter(non_empty), Value::Null);
    /// assert_eq!(Value::Value("host").filter(non_empty), Value::Value("host"));
    /// ```
    #[inline]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Self::Value(x) => {
                if predicate(&x) {
                    Self::Value(x)
                } else {
                    Self::Null
                }
            }
            other => other,
        }
    }

    /// Returns the value if it is [`Value::Value`], otherwise returns `rhs`.
    #[inline]
    pub fn or(self, rhs: Self) -> Self {
        match self {
            Self::Value(x) => Self::Value(x),
            _ => rhs,
        }
    }

    /// Transforms the `Value<T>` into a [`Option<T>`], mapping both [`Value::Null`] and [`Value::Unknown`] to [`None`].
    #[inline]
    pub fn as_option(self) -> Option<T> {
        match self {
            Self::Value(x) => Some(x),
            _ => None,
        }
    }

    /// Transforms the `&Value<T>` into a [`Option<&T>`]
    #[inline]
    pub fn as_ref_option(&self) -> Option<&T> {
        match self {
            Self::Value(x) => Some(x),
            _ => None,
        }
    }
}

impl<T: Clone> Value<&T> {
    /// Maps a `Value<&T>` to a `Value<T>` by cloning the contents
    pub fn cloned(self) -> Value<T> {
        self.map(Clone::clone)
    }
}

impl<T: Debug> Debug for Value<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => Debug::fmt(value, f),
            Self::Null => f.write_str("Null"),
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

impl<T> From<T> for Value<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T> From<Option<T>> for Value<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Value(value),
            None => Self::Null,
        }
    }
}

/// Attributes of a configuration block, keyed by attribute name
pub type AttributeTree = BTreeMap<String, AttributeValue>;

/// Dynamically typed node of the configuration handed over by the host.
///
/// Nested blocks are lists of maps, even for blocks that can appear at most once.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum AttributeValue {
    String(String),
    Number(i64),
    Bool(bool),
    List(Vec<AttributeValue>),
    Map(AttributeTree),
    #[default]
    Null,
    Unknown,
}

impl AttributeValue {
    /// Name of the kind of the value, as used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeValue::String(_) => "string",
            AttributeValue::Number(_) => "number",
            AttributeValue::Bool(_) => "bool",
            AttributeValue::List(_) => "list",
            AttributeValue::Map(_) => "map",
            AttributeValue::Null => "null",
            AttributeValue::Unknown => "unknown",
        }
    }

    /// Build a nested block list holding a single block
    ///
    /// # Examples
    ///
    /// ```
    /// # use azurerm_frontdoor::{map, value::AttributeValue};
    /// let block = AttributeValue::single(map! { "name" => "default" });
    /// assert_eq!(block.json(), r#"[{"name":"default"}]"#);
    /// ```
    pub fn single(tree: AttributeTree) -> Self {
        AttributeValue::List(vec![AttributeValue::Map(tree)])
    }

    /// Get the string if the value is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the attributes if the value is a map
    pub fn as_map(&self) -> Option<&AttributeTree> {
        match self {
            AttributeValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Get the attributes if the value is a map
    pub fn as_map_mut(&mut self) -> Option<&mut AttributeTree> {
        match self {
            AttributeValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Get the elements if the value is a list
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(list) => Some(list),
            _ => None,
        }
    }

    /// Get the elements if the value is a list
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<AttributeValue>> {
        match self {
            AttributeValue::List(list) => Some(list),
            _ => None,
        }
    }

    /// Dump the json representation of the value
    pub fn json(&self) -> String {
        serde_json::to_string(self).unwrap_or("<invalid>".into())
    }
    /// Dump the indented json representation of the value
    pub fn json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or("<invalid>".into())
    }
}

impl Debug for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(x) => Debug::fmt(x, f),
            Self::Number(x) => Debug::fmt(x, f),
            Self::Bool(x) => Debug::fmt(x, f),
            Self::List(x) => Debug::fmt(x, f),
            Self::Map(x) => Debug::fmt(x, f),
            Self::Null => f.write_str("Null"),
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

impl Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.json())
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_owned())
    }
}
impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}
impl From<&String> for AttributeValue {
    fn from(value: &String) -> Self {
        AttributeValue::String(value.clone())
    }
}
impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}
impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Number(value)
    }
}
impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Number(value.into())
    }
}
impl From<AttributeTree> for AttributeValue {
    fn from(value: AttributeTree) -> Self {
        AttributeValue::Map(value)
    }
}
impl<T: Into<AttributeValue>> From<Vec<T>> for AttributeValue {
    fn from(value: Vec<T>) -> Self {
        AttributeValue::List(value.into_iter().map(Into::into).collect())
    }
}
impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttributeValue::Null, Into::into)
    }
}
impl<T: Into<AttributeValue>> From<Value<T>> for AttributeValue {
    fn from(value: Value<T>) -> Self {
        match value {
            Value::Value(value) => value.into(),
            Value::Null => AttributeValue::Null,
            Value::Unknown => AttributeValue::Unknown,
        }
    }
}

/// Unknown values have no JSON counterpart and are stored as null
impl Serialize for AttributeValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            AttributeValue::String(s) => serializer.serialize_str(s),
            AttributeValue::Number(n) => serializer.serialize_i64(*n),
            AttributeValue::Bool(b) => serializer.serialize_bool(*b),
            AttributeValue::List(list) => {
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for element in list {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            AttributeValue::Map(map) => {
                let mut ser = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    ser.serialize_entry(key, value)?;
                }
                ser.end()
            }
            AttributeValue::Null | AttributeValue::Unknown => serializer.serialize_unit(),
        }
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct AttributeValueVisitor;

        impl<'de> Visitor<'de> for AttributeValueVisitor {
            type Value = AttributeValue;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(formatter, "any value")
            }
            fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(AttributeValue::Bool(v))
            }
            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(AttributeValue::Number(v))
            }
            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                v.try_into()
                    .map_err(serde::de::Error::custom)
                    .map(AttributeValue::Number)
            }
            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64 {
                    Ok(AttributeValue::Number(v as i64))
                } else {
                    Err(serde::de::Error::custom(format!(
                        "{} is not an integer",
                        v
                    )))
                }
            }
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(AttributeValue::String(v.to_owned()))
            }
            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(AttributeValue::String(v))
            }
            fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                Vec::<AttributeValue>::deserialize(serde::de::value::SeqAccessDeserializer::new(
                    seq,
                ))
                .map(AttributeValue::List)
            }
            fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                AttributeTree::deserialize(serde::de::value::MapAccessDeserializer::new(map))
                    .map(AttributeValue::Map)
            }
            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                AttributeValue::deserialize(deserializer)
            }
            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(AttributeValue::Null)
            }
            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(AttributeValue::Null)
            }
        }

        deserializer.deserialize_any(AttributeValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map;

    #[test]
    fn json_round_trip_keeps_block_shape() {
        let block: AttributeTree = map! {
            "name" => "rule1",
            "enabled" => true,
            "weight" => 50,
            "patterns_to_match" => vec!["/*"],
            "forwarding_configuration" => AttributeValue::single(map! {
                "backend_pool_name" => "pool",
            }),
        };
        let tree = AttributeValue::Map(block);
        let json = tree.json();
        let parsed: AttributeValue = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn debug_shows_scalars_like_rust_literals() {
        let value = AttributeValue::List(vec![
            AttributeValue::from("pool"),
            AttributeValue::from(50i64),
            AttributeValue::from(true),
            AttributeValue::Unknown,
        ]);
        assert_eq!(format!("{value:?}"), r#"["pool", 50, true, Unknown]"#);
        assert_eq!(format!("{:?}", Value::Value("x")), r#""x""#);
    }

    #[test]
    fn null_and_unknown_serialize_as_null() {
        assert_eq!(AttributeValue::Null.json(), "null");
        assert_eq!(AttributeValue::Unknown.json(), "null");
        let parsed: AttributeValue = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, AttributeValue::Null);
    }

    #[test]
    fn fractional_numbers_are_rejected() {
        assert!(serde_json::from_str::<AttributeValue>("1.5").is_err());
        assert_eq!(
            serde_json::from_str::<AttributeValue>("120.0").unwrap(),
            AttributeValue::Number(120)
        );
    }

    #[test]
    fn option_conversion_maps_none_to_null() {
        assert_eq!(AttributeValue::from(None::<String>), AttributeValue::Null);
        assert_eq!(
            AttributeValue::from(Some("x")),
            AttributeValue::String("x".into())
        );
        assert_eq!(
            AttributeValue::from(Value::<bool>::Unknown),
            AttributeValue::Unknown
        );
    }
}
