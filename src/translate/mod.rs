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

//! Expand and flatten
//!
//! Expanding turns the [`AttributeTree`] of a resource into the API model,
//! flattening turns an API model back into an [`AttributeTree`].
//! Both directions are pure functions: they never mutate their inputs.

use std::{collections::BTreeMap, str::FromStr};

use crate::{
    ids::{ChildKind, FrontDoorChildId, FrontDoorId, IdError},
    models::UnknownVariant,
    value::{AttributeTree, AttributeValue, Value},
    AttributePath,
};

mod backend_pool;
mod firewall_policy;
mod front_door;
mod frontend_endpoint;
mod ordering;
mod routing_rule;

pub use backend_pool::{
    expand_backend_pool, expand_backend_pools, expand_health_probe, expand_health_probes,
    expand_load_balancing, expand_load_balancings, flatten_backend_pools, flatten_health_probes,
    flatten_load_balancings,
};
pub use firewall_policy::{expand_firewall_policy, flatten_firewall_policy};
pub use front_door::{expand_front_door, flatten_front_door};
pub use frontend_endpoint::{
    expand_custom_https_configuration, expand_frontend_endpoint, expand_frontend_endpoints,
    flatten_custom_https_configuration, flatten_frontend_endpoints,
};
pub use ordering::{order_by_witness, OrderingWitness, EXPLICIT_RESOURCE_ORDER};
pub use routing_rule::{expand_routing_rule, expand_routing_rules, flatten_routing_rules};

/// Errors raised while translating between a configuration and an API model
///
/// None of them are transient: they all point at bad configuration or at an
/// API response the translator cannot make sense of.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TranslateError {
    #[error("`{field}` requires exactly one of {}, but {found} are set", variants.join(" or "))]
    AmbiguousVariant {
        field: AttributePath,
        variants: &'static [&'static str],
        found: usize,
    },
    #[error("`{field}` holds the id {id:?} that does not resolve to a known child resource")]
    ChildIdUnresolvable {
        field: AttributePath,
        id: String,
        #[source]
        source: IdError,
    },
    #[error("`{path}` should be a {expected}, but is a {found}")]
    TypeMismatch {
        path: AttributePath,
        expected: &'static str,
        found: &'static str,
    },
    #[error("`{path}` is {value:?}, expected one of {}", expected.join(", "))]
    InvalidEnumValue {
        path: AttributePath,
        value: String,
        expected: &'static [&'static str],
    },
    #[error(transparent)]
    Id(#[from] IdError),
}

impl TranslateError {
    /// Attribute the error is about, if any
    pub fn path(&self) -> Option<&AttributePath> {
        match self {
            TranslateError::AmbiguousVariant { field, .. }
            | TranslateError::ChildIdUnresolvable { field, .. } => Some(field),
            TranslateError::TypeMismatch { path, .. }
            | TranslateError::InvalidEnumValue { path, .. } => Some(path),
            TranslateError::Id(_) => None,
        }
    }

    /// Short title of the error kind
    pub fn title(&self) -> &'static str {
        match self {
            TranslateError::AmbiguousVariant { .. } => "Ambiguous block",
            TranslateError::ChildIdUnresolvable { .. } => "Unresolvable child resource id",
            TranslateError::TypeMismatch { .. } => "Unexpected attribute type",
            TranslateError::InvalidEnumValue { .. } => "Invalid value",
            TranslateError::Id(_) => "Invalid resource id",
        }
    }
}

/// Read only view over a block of the configuration, aware of its path
///
/// ```
/// # use azurerm_frontdoor::{map, translate::BlockRef, value::{AttributeTree, Value}};
/// let tree: AttributeTree = map! { "name" => "web", "weight" => 50i64 };
/// let block = BlockRef::root(&tree);
/// assert_eq!(block.get_str("name").unwrap(), Value::Value("web"));
/// assert_eq!(block.get_str("missing").unwrap(), Value::Null);
/// assert!(block.get_str("weight").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct BlockRef<'a> {
    tree: &'a AttributeTree,
    path: AttributePath,
}

impl<'a> BlockRef<'a> {
    pub fn new(tree: &'a AttributeTree, path: AttributePath) -> Self {
        Self { tree, path }
    }

    /// View over the top level block of a resource
    pub fn root(tree: &'a AttributeTree) -> Self {
        Self::new(tree, AttributePath::default())
    }

    pub fn tree(&self) -> &'a AttributeTree {
        self.tree
    }

    pub fn path(&self) -> &AttributePath {
        &self.path
    }

    /// Path of the attribute `name` of this block
    pub fn path_of(&self, name: &'static str) -> AttributePath {
        if self.path.is_root() {
            AttributePath::new(name)
        } else {
            self.path.clone().attribute(name)
        }
    }

    fn typed<T>(
        &self,
        name: &'static str,
        expected: &'static str,
        cast: impl FnOnce(&'a AttributeValue) -> Option<T>,
    ) -> Result<Value<T>, TranslateError> {
        match self.tree.get(name) {
            None | Some(AttributeValue::Null) => Ok(Value::Null),
            Some(AttributeValue::Unknown) => Ok(Value::Unknown),
            Some(value) => match cast(value) {
                Some(value) => Ok(Value::Value(value)),
                None => Err(TranslateError::TypeMismatch {
                    path: self.path_of(name),
                    expected,
                    found: value.kind(),
                }),
            },
        }
    }

    pub fn get_str(&self, name: &'static str) -> Result<Value<&'a str>, TranslateError> {
        self.typed(name, "string", AttributeValue::as_str)
    }

    pub fn get_bool(&self, name: &'static str) -> Result<Value<bool>, TranslateError> {
        self.typed(name, "bool", |value| match value {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        })
    }

    pub fn get_int(&self, name: &'static str) -> Result<Value<i64>, TranslateError> {
        self.typed(name, "number", |value| match value {
            AttributeValue::Number(n) => Some(*n),
            _ => None,
        })
    }

    pub fn get_list(
        &self,
        name: &'static str,
    ) -> Result<Value<&'a [AttributeValue]>, TranslateError> {
        self.typed(name, "list", AttributeValue::as_list)
    }

    /// List of strings, every element must be a string
    pub fn get_strings(&self, name: &'static str) -> Result<Value<Vec<&'a str>>, TranslateError> {
        let list = match self.get_list(name)? {
            Value::Value(list) => list,
            Value::Null => return Ok(Value::Null),
            Value::Unknown => return Ok(Value::Unknown),
        };
        list.iter()
            .enumerate()
            .map(|(i, element)| {
                element.as_str().ok_or_else(|| TranslateError::TypeMismatch {
                    path: self.path_of(name).index(i),
                    expected: "string",
                    found: element.kind(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Value)
    }

    /// Map of strings, like `tags`
    pub fn get_string_map(
        &self,
        name: &'static str,
    ) -> Result<Value<BTreeMap<String, String>>, TranslateError> {
        let map = match self.typed(name, "map", AttributeValue::as_map)? {
            Value::Value(map) => map,
            Value::Null => return Ok(Value::Null),
            Value::Unknown => return Ok(Value::Unknown),
        };
        map.iter()
            .map(|(key, value)| match value.as_str() {
                Some(value) => Ok((key.clone(), value.to_owned())),
                None => Err(TranslateError::TypeMismatch {
                    path: self.path_of(name).key(key.clone()),
                    expected: "string",
                    found: value.kind(),
                }),
            })
            .collect::<Result<_, _>>()
            .map(Value::Value)
    }

    /// Every block of a nested block list
    pub fn get_blocks(&self, name: &'static str) -> Result<Value<Vec<BlockRef<'a>>>, TranslateError> {
        let list = match self.get_list(name)? {
            Value::Value(list) => list,
            Value::Null => return Ok(Value::Null),
            Value::Unknown => return Ok(Value::Unknown),
        };
        list.iter()
            .enumerate()
            .map(|(i, element)| {
                let path = self.path_of(name).index(i);
                match element.as_map() {
                    Some(tree) => Ok(BlockRef::new(tree, path)),
                    None => Err(TranslateError::TypeMismatch {
                        path,
                        expected: "block",
                        found: element.kind(),
                    }),
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Value)
    }

    /// First block of a nested block list, `Null` when the list is empty
    pub fn get_block(&self, name: &'static str) -> Result<Value<BlockRef<'a>>, TranslateError> {
        Ok(match self.get_blocks(name)? {
            Value::Value(blocks) => blocks.into_iter().next().into(),
            Value::Null => Value::Null,
            Value::Unknown => Value::Unknown,
        })
    }

    /// String attribute holding the wire spelling of an enum, empty is absent
    pub fn get_enum<E>(&self, name: &'static str) -> Result<Value<E>, TranslateError>
    where
        E: FromStr<Err = UnknownVariant>,
    {
        match self.get_str(name)?.filter(|s| !s.is_empty()) {
            Value::Value(s) => s
                .parse()
                .map(Value::Value)
                .map_err(|err: UnknownVariant| TranslateError::InvalidEnumValue {
                    path: self.path_of(name),
                    value: err.value,
                    expected: err.expected,
                }),
            Value::Null => Ok(Value::Null),
            Value::Unknown => Ok(Value::Unknown),
        }
    }

    /// List of strings holding the wire spelling of an enum
    pub(crate) fn enums<E>(&self, name: &'static str) -> Result<Vec<E>, TranslateError>
    where
        E: FromStr<Err = UnknownVariant>,
    {
        self.get_strings(name)?
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, s)| {
                s.parse()
                    .map_err(|err: UnknownVariant| TranslateError::InvalidEnumValue {
                        path: self.path_of(name).index(i),
                        value: err.value,
                        expected: err.expected,
                    })
            })
            .collect()
    }

    /// Owned string, empty when absent
    pub(crate) fn string(&self, name: &'static str) -> Result<String, TranslateError> {
        Ok(self.get_str(name)?.unwrap_or_default().to_owned())
    }

    /// Owned string, `None` when absent or empty
    ///
    /// An omitted field leaves the remote value untouched, so empty strings
    /// cannot be used to clear a remote value.
    pub(crate) fn non_empty(&self, name: &'static str) -> Result<Option<String>, TranslateError> {
        Ok(self
            .get_str(name)?
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .as_option())
    }

    pub(crate) fn bool_or(&self, name: &'static str, default: bool) -> Result<bool, TranslateError> {
        Ok(self.get_bool(name)?.unwrap_or(default))
    }

    pub(crate) fn int_or(&self, name: &'static str, default: i64) -> Result<i64, TranslateError> {
        Ok(self.get_int(name)?.unwrap_or(default))
    }

    pub(crate) fn blocks(&self, name: &'static str) -> Result<Vec<BlockRef<'a>>, TranslateError> {
        Ok(self.get_blocks(name)?.unwrap_or_default())
    }

    pub(crate) fn strings(&self, name: &'static str) -> Result<Vec<String>, TranslateError> {
        Ok(self
            .get_strings(name)?
            .unwrap_or_default()
            .into_iter()
            .map(str::to_owned)
            .collect())
    }
}

/// `id` attribute of a flattened block
pub(crate) fn id_of(tree: &AttributeTree) -> Option<&str> {
    tree.get("id").and_then(AttributeValue::as_str)
}

/// Canonical form of a child id returned by the API
pub(crate) fn resolve_child(
    kind: ChildKind,
    raw: &str,
    field: AttributePath,
) -> Result<FrontDoorChildId, TranslateError> {
    FrontDoorChildId::parse_insensitive(kind, raw).map_err(|source| {
        TranslateError::ChildIdUnresolvable {
            field,
            id: raw.to_owned(),
            source,
        }
    })
}

/// Canonical id of a child, derived from its name when the API omitted it
pub(crate) fn child_id(
    front_door: &FrontDoorId,
    kind: ChildKind,
    raw: Option<&str>,
    name: &str,
    field: AttributePath,
) -> Result<String, TranslateError> {
    match raw {
        Some(raw) if !raw.is_empty() => Ok(resolve_child(kind, raw, field)?.to_string()),
        _ => Ok(front_door.derive_child(kind, name).to_string()),
    }
}

/// Name of the child a link points to
pub(crate) fn linked_name(
    kind: ChildKind,
    link: Option<&crate::models::SubResource>,
    field: AttributePath,
) -> Result<Option<String>, TranslateError> {
    match link.and_then(|link| link.id.as_deref()) {
        Some(raw) if !raw.is_empty() => Ok(Some(resolve_child(kind, raw, field)?.name().to_owned())),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map;

    #[test]
    fn nested_paths_are_reported() {
        let tree: AttributeTree = map! {
            "routing_rule" => vec![AttributeValue::Map(map! { "name" => 12i64 })],
        };
        let root = BlockRef::root(&tree);
        let rules = root.blocks("routing_rule").unwrap();
        let err = rules[0].get_str("name").unwrap_err();
        assert_eq!(
            err,
            TranslateError::TypeMismatch {
                path: AttributePath::new("routing_rule").index(0).attribute("name"),
                expected: "string",
                found: "number",
            }
        );
        assert_eq!(err.to_string(), "`routing_rule[0].name` should be a string, but is a number");
    }

    #[test]
    fn unknown_propagates() {
        let tree: AttributeTree = map! { "name" => AttributeValue::Unknown };
        let root = BlockRef::root(&tree);
        assert_eq!(root.get_str("name").unwrap(), Value::Unknown);
        assert!(root.get_block("name").unwrap().is_unknown());
    }

    #[test]
    fn empty_block_list_is_null() {
        let tree: AttributeTree = map! { "cache" => Vec::<AttributeValue>::new() };
        assert!(BlockRef::root(&tree).get_block("cache").unwrap().is_null());
    }

    #[test]
    fn enums_are_checked() {
        let tree: AttributeTree = map! { "mode" => "Prevent", "other" => "" };
        let root = BlockRef::root(&tree);
        let err = root
            .get_enum::<crate::models::firewall_policy::PolicyMode>("mode")
            .unwrap_err();
        assert!(matches!(err, TranslateError::InvalidEnumValue { ref value, .. } if value == "Prevent"));
        assert!(root
            .get_enum::<crate::models::firewall_policy::PolicyMode>("other")
            .unwrap()
            .is_null());
    }

    #[test]
    fn empty_strings_are_omitted() {
        let tree: AttributeTree = map! { "custom_host" => "", "custom_path" => "/x" };
        let root = BlockRef::root(&tree);
        assert_eq!(root.non_empty("custom_host").unwrap(), None);
        assert_eq!(root.non_empty("custom_fragment").unwrap(), None);
        assert_eq!(root.non_empty("custom_path").unwrap(), Some("/x".to_owned()));
    }

    #[test]
    fn unresolvable_child_names_the_field() {
        let err = resolve_child(
            ChildKind::BackendPool,
            "/subscriptions/S/resourceGroups/G/providers/Microsoft.Network/frontDoors/F/BACKENDPOOLS/p",
            AttributePath::new("backend_pool").index(0).attribute("id"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TranslateError::ChildIdUnresolvable {
                source: IdError::UnrecognizedCasingVariant { .. },
                ..
            }
        ));
        assert_eq!(err.path().unwrap().to_string(), "backend_pool[0].id");
    }
}
