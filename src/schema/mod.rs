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

//! Configuration surface of the resources
//!
//! A [`Schema`] describes the shape of the [`AttributeTree`] of a resource.
//! [`Block::normalize`] fills in the defaults and reports the configuration
//! errors that do not need to look across attributes.

use std::{collections::BTreeMap, fmt::Display};

use serde::Serialize;

use crate::{
    value::{AttributeTree, AttributeValue},
    AttributePath, Diagnostics,
};

mod firewall_policy;
mod frontdoor;

pub use firewall_policy::{firewall_policy_schema, FIREWALL_POLICY_SCHEMA_VERSION};
pub use frontdoor::{
    custom_https_configuration_schema, front_door_schema, CUSTOM_HTTPS_SCHEMA_VERSION,
    FRONT_DOOR_SCHEMA_VERSION,
};

/// NestedBlock
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NestedBlock {
    /// The nested block must appear exactly once
    Single(Block),
    /// The nested block can appear at most once
    Optional(Block),
    /// The nested block can appear between `min_items` and `max_items` times
    List {
        block: Block,
        min_items: usize,
        max_items: usize,
    },
}

impl NestedBlock {
    /// Schema of the nested block
    pub fn block(&self) -> &Block {
        match self {
            NestedBlock::Single(block)
            | NestedBlock::Optional(block)
            | NestedBlock::List { block, .. } => block,
        }
    }

    pub fn min_items(&self) -> usize {
        match self {
            NestedBlock::Single(_) => 1,
            NestedBlock::Optional(_) => 0,
            NestedBlock::List { min_items, .. } => *min_items,
        }
    }

    pub fn max_items(&self) -> usize {
        match self {
            NestedBlock::Single(_) | NestedBlock::Optional(_) => 1,
            NestedBlock::List { max_items, .. } => *max_items,
        }
    }
}

/// Block
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Block {
    /// Version of the block
    pub version: i64,
    /// Attributes of the block
    pub attributes: BTreeMap<String, Attribute>,
    /// Nested blocks of the block
    pub blocks: BTreeMap<String, NestedBlock>,
    /// Description for the block
    pub description: String,
}

impl Default for Block {
    /// Create an empty block (with a version of 1, and a description "empty")
    fn default() -> Block {
        Block {
            version: 1,
            attributes: Default::default(),
            blocks: Default::default(),
            description: "empty".into(),
        }
    }
}

impl Block {
    /// Normalize the configuration `tree` of this block
    ///
    /// Absent attributes get their default, nested blocks are normalized
    /// recursively. Problems are reported into `diags` with the path of the
    /// offending attribute, and the normalization goes on.
    ///
    /// ```
    /// # use azurerm_frontdoor::{map, schema::{Attribute, AttributeType, Block}, AttributePath, Diagnostics};
    /// let block = Block {
    ///     attributes: [
    ///         ("name".to_owned(), Attribute::required(AttributeType::String)),
    ///         ("weight".to_owned(), Attribute::optional(AttributeType::Number).with_default(50i64)),
    ///     ]
    ///     .into(),
    ///     ..Default::default()
    /// };
    /// let mut diags = Diagnostics::default();
    /// let normalized = block.normalize(&map! { "name" => "web" }, &AttributePath::default(), &mut diags);
    /// assert!(!diags.has_errors());
    /// assert_eq!(normalized, map! { "name" => "web", "weight" => 50i64 });
    /// ```
    pub fn normalize(
        &self,
        tree: &AttributeTree,
        path: &AttributePath,
        diags: &mut Diagnostics,
    ) -> AttributeTree {
        let mut normalized = AttributeTree::new();

        for name in tree.keys() {
            if !self.attributes.contains_key(name) && !self.blocks.contains_key(name) {
                diags.error(
                    "Unsupported argument",
                    format!("An argument named {name:?} is not expected here"),
                    path.clone().attribute(name.clone()),
                );
            }
        }

        for (name, attribute) in &self.attributes {
            let attribute_path = path.clone().attribute(name.clone());
            let value = match tree.get(name) {
                None | Some(AttributeValue::Null) => match &attribute.default {
                    Some(default) => default.clone(),
                    None => {
                        if attribute.constraint == AttributeConstraint::Required {
                            diags.error(
                                "Missing required argument",
                                format!(
                                    "The argument {name:?} is required, but no definition was found"
                                ),
                                attribute_path,
                            );
                        }
                        AttributeValue::Null
                    }
                },
                Some(value) => {
                    if !attribute.attr_type.accepts(value) {
                        diags.error(
                            "Incorrect attribute value type",
                            format!(
                                "Expected a value of type {}, found a {}",
                                attribute.attr_type,
                                value.kind()
                            ),
                            attribute_path,
                        );
                    }
                    value.clone()
                }
            };
            normalized.insert(name.clone(), value);
        }

        for (name, nested) in &self.blocks {
            let block_path = path.clone().attribute(name.clone());
            let items = match tree.get(name) {
                None | Some(AttributeValue::Null) => &[][..],
                Some(AttributeValue::List(items)) => items.as_slice(),
                Some(AttributeValue::Unknown) => {
                    normalized.insert(name.clone(), AttributeValue::Unknown);
                    continue;
                }
                Some(value) => {
                    diags.error(
                        "Incorrect block type",
                        format!("Expected a list of {name} blocks, found a {}", value.kind()),
                        block_path,
                    );
                    continue;
                }
            };

            if items.len() > nested.max_items() {
                diags.error(
                    format!("Too many {name} blocks"),
                    format!(
                        "No more than {} \"{name}\" blocks are allowed, found {}",
                        nested.max_items(),
                        items.len()
                    ),
                    block_path.clone(),
                );
            } else if items.len() < nested.min_items() {
                diags.error(
                    format!("Insufficient {name} blocks"),
                    format!(
                        "At least {} \"{name}\" blocks are required, found {}",
                        nested.min_items(),
                        items.len()
                    ),
                    block_path.clone(),
                );
            }

            let items = items
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    AttributeValue::Map(child) => AttributeValue::Map(nested.block().normalize(
                        child,
                        &block_path.clone().index(i),
                        diags,
                    )),
                    AttributeValue::Unknown => AttributeValue::Unknown,
                    other => {
                        diags.error(
                            "Incorrect block type",
                            format!("Expected a {name} block, found a {}", other.kind()),
                            block_path.clone().index(i),
                        );
                        other.clone()
                    }
                })
                .collect::<Vec<_>>();
            normalized.insert(name.clone(), AttributeValue::List(items));
        }

        normalized
    }
}

/// Specify the Attribute type
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AttributeType {
    /// String
    String,
    /// Number (integer)
    Number,
    /// Boolean
    Bool,
    /// List
    List(Box<AttributeType>),
    /// Map
    Map(Box<AttributeType>),
}

impl AttributeType {
    /// Check whether `value` has the shape of this type
    ///
    /// `Null` and `Unknown` are accepted at any depth.
    pub fn accepts(&self, value: &AttributeValue) -> bool {
        match (self, value) {
            (_, AttributeValue::Null | AttributeValue::Unknown) => true,
            (AttributeType::String, AttributeValue::String(_))
            | (AttributeType::Number, AttributeValue::Number(_))
            | (AttributeType::Bool, AttributeValue::Bool(_)) => true,
            (AttributeType::List(inner), AttributeValue::List(items)) => {
                items.iter().all(|item| inner.accepts(item))
            }
            (AttributeType::Map(inner), AttributeValue::Map(items)) => {
                items.values().all(|item| inner.accepts(item))
            }
            _ => false,
        }
    }
}

impl Serialize for AttributeType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            AttributeType::String => serializer.serialize_str("string"),
            AttributeType::Number => serializer.serialize_str("number"),
            AttributeType::Bool => serializer.serialize_str("bool"),
            AttributeType::List(attr) => ("list", attr).serialize(serializer),
            AttributeType::Map(attr) => ("map", attr).serialize(serializer),
        }
    }
}

impl Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(
            serde_json::to_string(self)
                .or(Err(std::fmt::Error))?
                .as_str(),
        )
    }
}

/// Specify the Attribute type
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum AttributeConstraint {
    /// The attribute is computed, but cannot be specified by the practitioner (output only)
    Computed,
    /// The attribute is optional, and the provider cannot generate a value for it
    Optional,
    /// The attribute is both optional and computed:
    /// the practitioner can omit the value, and the provider can generate a value for it
    OptionalComputed,
    /// The attribute is required
    Required,
}

/// Attribute
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Attribute {
    /// Type of the Attribute
    pub attr_type: AttributeType,
    /// Description of the Attribute
    pub description: String,
    /// Is the attribute required
    pub constraint: AttributeConstraint,
    /// Value used when the attribute is absent from the configuration
    pub default: Option<AttributeValue>,
}

impl Attribute {
    fn new(attr_type: AttributeType, constraint: AttributeConstraint) -> Self {
        Self {
            attr_type,
            description: "empty".into(),
            constraint,
            default: None,
        }
    }

    pub fn required(attr_type: AttributeType) -> Self {
        Self::new(attr_type, AttributeConstraint::Required)
    }

    pub fn optional(attr_type: AttributeType) -> Self {
        Self::new(attr_type, AttributeConstraint::Optional)
    }

    pub fn optional_computed(attr_type: AttributeType) -> Self {
        Self::new(attr_type, AttributeConstraint::OptionalComputed)
    }

    pub fn computed(attr_type: AttributeType) -> Self {
        Self::new(attr_type, AttributeConstraint::Computed)
    }

    pub fn with_default(mut self, default: impl Into<AttributeValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Schema
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Schema {
    /// Version of the schema
    pub version: i64,
    /// Root block of the schema
    pub block: Block,
}

impl Schema {
    /// Normalize the configuration of a whole resource
    pub fn normalize(&self, config: &AttributeTree, diags: &mut Diagnostics) -> AttributeTree {
        self.block
            .normalize(config, &AttributePath::default(), diags)
    }
}

/// Build the attribute map of a block
pub(crate) fn attributes<const N: usize>(
    attributes: [(&str, Attribute); N],
) -> BTreeMap<String, Attribute> {
    attributes
        .into_iter()
        .map(|(name, attribute)| (name.to_owned(), attribute))
        .collect()
}

/// Build the nested block map of a block
pub(crate) fn blocks<const N: usize>(
    blocks: [(&str, NestedBlock); N],
) -> BTreeMap<String, NestedBlock> {
    blocks
        .into_iter()
        .map(|(name, block)| (name.to_owned(), block))
        .collect()
}

pub(crate) fn list_of(inner: AttributeType) -> AttributeType {
    AttributeType::List(Box::new(inner))
}

pub(crate) fn map_of(inner: AttributeType) -> AttributeType {
    AttributeType::Map(Box::new(inner))
}
