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

use crate::models::firewall_policy::{PolicyMode, RuleType};

use super::{
    attributes, blocks, list_of, map_of, Attribute, AttributeType, Block, NestedBlock, Schema,
};

/// Version of the `azurerm_frontdoor_firewall_policy` state
pub const FIREWALL_POLICY_SCHEMA_VERSION: i64 = 1;

fn list(block: Block, max_items: usize) -> NestedBlock {
    NestedBlock::List {
        block,
        min_items: 0,
        max_items,
    }
}

fn exclusion() -> Block {
    Block {
        attributes: attributes([
            ("match_variable", Attribute::required(AttributeType::String)),
            ("operator", Attribute::required(AttributeType::String)),
            ("selector", Attribute::required(AttributeType::String)),
        ]),
        ..Default::default()
    }
}

fn match_condition() -> Block {
    Block {
        attributes: attributes([
            ("match_variable", Attribute::required(AttributeType::String)),
            (
                "match_values",
                Attribute::required(list_of(AttributeType::String)),
            ),
            ("operator", Attribute::required(AttributeType::String)),
            ("selector", Attribute::optional(AttributeType::String)),
            (
                "negation_condition",
                Attribute::optional(AttributeType::Bool).with_default(false),
            ),
            ("transforms", Attribute::optional(list_of(AttributeType::String))),
        ]),
        ..Default::default()
    }
}

fn custom_rule() -> Block {
    Block {
        attributes: attributes([
            ("name", Attribute::required(AttributeType::String)),
            ("action", Attribute::required(AttributeType::String)),
            (
                "enabled",
                Attribute::optional(AttributeType::Bool).with_default(true),
            ),
            (
                "priority",
                Attribute::optional(AttributeType::Number).with_default(1i64),
            ),
            (
                "type",
                Attribute::required(AttributeType::String)
                    .with_description(format!("One of {}", RuleType::VARIANTS.join(", "))),
            ),
            (
                "rate_limit_duration_in_minutes",
                Attribute::optional(AttributeType::Number).with_default(1i64),
            ),
            (
                "rate_limit_threshold",
                Attribute::optional(AttributeType::Number).with_default(10i64),
            ),
        ]),
        blocks: blocks([("match_condition", list(match_condition(), 10))]),
        ..Default::default()
    }
}

fn managed_rule() -> Block {
    let rule = Block {
        attributes: attributes([
            ("rule_id", Attribute::required(AttributeType::String)),
            (
                "enabled",
                Attribute::optional(AttributeType::Bool).with_default(false),
            ),
            ("action", Attribute::required(AttributeType::String)),
        ]),
        blocks: blocks([("exclusion", list(exclusion(), 100))]),
        ..Default::default()
    };
    let group_override = Block {
        attributes: attributes([(
            "rule_group_name",
            Attribute::required(AttributeType::String),
        )]),
        blocks: blocks([
            ("exclusion", list(exclusion(), 100)),
            ("rule", list(rule, 1000)),
        ]),
        ..Default::default()
    };
    Block {
        attributes: attributes([
            ("type", Attribute::required(AttributeType::String)),
            ("version", Attribute::required(AttributeType::String)),
        ]),
        blocks: blocks([
            ("exclusion", list(exclusion(), 100)),
            ("override", list(group_override, 100)),
        ]),
        ..Default::default()
    }
}

/// Schema of `azurerm_frontdoor_firewall_policy`
pub fn firewall_policy_schema() -> Schema {
    Schema {
        version: FIREWALL_POLICY_SCHEMA_VERSION,
        block: Block {
            version: FIREWALL_POLICY_SCHEMA_VERSION,
            attributes: attributes([
                ("id", Attribute::computed(AttributeType::String)),
                ("name", Attribute::required(AttributeType::String)),
                ("resource_group_name", Attribute::required(AttributeType::String)),
                ("location", Attribute::computed(AttributeType::String)),
                (
                    "enabled",
                    Attribute::optional(AttributeType::Bool).with_default(true),
                ),
                (
                    "mode",
                    Attribute::optional(AttributeType::String)
                        .with_default(PolicyMode::Prevention.as_str()),
                ),
                ("redirect_url", Attribute::optional(AttributeType::String)),
                (
                    "custom_block_response_status_code",
                    Attribute::optional(AttributeType::Number),
                ),
                (
                    "custom_block_response_body",
                    Attribute::optional(AttributeType::String)
                        .with_description("Base64 encoded body of the block response"),
                ),
                (
                    "frontend_endpoint_ids",
                    Attribute::computed(list_of(AttributeType::String)),
                ),
                ("tags", Attribute::optional(map_of(AttributeType::String))),
            ]),
            blocks: blocks([
                ("custom_rule", list(custom_rule(), 100)),
                ("managed_rule", list(managed_rule(), 100)),
            ]),
            description: "Web Application Firewall policy of a Front Door".into(),
            ..Default::default()
        },
    }
}
