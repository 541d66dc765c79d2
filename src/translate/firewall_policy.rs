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

use crate::{
    ids::{FrontendEndpointId, ResourceId, WebApplicationFirewallPolicyId},
    map,
    models::{
        firewall_policy::{
            CustomRule, CustomRuleList, ManagedRuleExclusion, ManagedRuleGroupOverride,
            ManagedRuleOverride, ManagedRuleSet, ManagedRuleSetList, MatchCondition, PolicyMode,
            PolicySettings, RuleType, WebApplicationFirewallPolicy,
            WebApplicationFirewallPolicyProperties,
        },
        EnabledState,
    },
    value::{AttributeTree, AttributeValue},
    AttributePath,
};

use super::{front_door::FRONT_DOOR_LOCATION, BlockRef, TranslateError};

/// Expand the configuration of `azurerm_frontdoor_firewall_policy`
///
/// The body of the block response is expected to be base64 already.
pub fn expand_firewall_policy(
    config: &AttributeTree,
) -> Result<WebApplicationFirewallPolicy, TranslateError> {
    let root = BlockRef::root(config);

    let policy_settings = PolicySettings {
        enabled_state: Some(root.bool_or("enabled", true)?.into()),
        mode: Some(root.get_enum("mode")?.unwrap_or(PolicyMode::Prevention)),
        redirect_url: root.non_empty("redirect_url")?,
        custom_block_response_status_code: root
            .get_int("custom_block_response_status_code")?
            .as_option(),
        custom_block_response_body: root.non_empty("custom_block_response_body")?,
    };

    let rules = root
        .blocks("custom_rule")?
        .iter()
        .map(expand_custom_rule)
        .collect::<Result<Vec<_>, _>>()?;
    let managed_rule_sets = root
        .blocks("managed_rule")?
        .iter()
        .map(expand_managed_rule)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WebApplicationFirewallPolicy {
        name: root.non_empty("name")?,
        location: Some(FRONT_DOOR_LOCATION.to_owned()),
        tags: root.get_string_map("tags")?.as_option(),
        properties: Some(WebApplicationFirewallPolicyProperties {
            policy_settings: Some(policy_settings),
            custom_rules: Some(CustomRuleList { rules: Some(rules) }),
            managed_rules: Some(ManagedRuleSetList {
                managed_rule_sets: Some(managed_rule_sets),
            }),
            ..Default::default()
        }),
        ..Default::default()
    })
}

fn expand_custom_rule(rule: &BlockRef<'_>) -> Result<CustomRule, TranslateError> {
    let match_conditions = rule
        .blocks("match_condition")?
        .iter()
        .map(|condition| {
            Ok(MatchCondition {
                match_variable: condition.get_enum("match_variable")?.as_option(),
                selector: condition.non_empty("selector")?,
                operator: condition.get_enum("operator")?.as_option(),
                negate_condition: Some(condition.bool_or("negation_condition", false)?),
                match_value: Some(condition.strings("match_values")?),
                transforms: Some(condition.enums("transforms")?),
            })
        })
        .collect::<Result<Vec<_>, TranslateError>>()?;

    Ok(CustomRule {
        name: rule.non_empty("name")?,
        priority: Some(rule.int_or("priority", 1)?),
        enabled_state: Some(rule.bool_or("enabled", true)?.into()),
        rule_type: rule.get_enum("type")?.as_option(),
        rate_limit_duration_in_minutes: Some(rule.int_or("rate_limit_duration_in_minutes", 1)?),
        rate_limit_threshold: Some(rule.int_or("rate_limit_threshold", 10)?),
        match_conditions: Some(match_conditions),
        action: rule.get_enum("action")?.as_option(),
    })
}

fn expand_exclusions(block: &BlockRef<'_>) -> Result<Vec<ManagedRuleExclusion>, TranslateError> {
    block
        .blocks("exclusion")?
        .iter()
        .map(|exclusion| {
            Ok(ManagedRuleExclusion {
                match_variable: exclusion.get_enum("match_variable")?.as_option(),
                selector_match_operator: exclusion.get_enum("operator")?.as_option(),
                selector: exclusion.non_empty("selector")?,
            })
        })
        .collect()
}

fn expand_managed_rule(managed: &BlockRef<'_>) -> Result<ManagedRuleSet, TranslateError> {
    let rule_group_overrides = managed
        .blocks("override")?
        .iter()
        .map(|group| {
            let rules = group
                .blocks("rule")?
                .iter()
                .map(|rule| {
                    Ok(ManagedRuleOverride {
                        rule_id: rule.non_empty("rule_id")?,
                        enabled_state: Some(rule.bool_or("enabled", false)?.into()),
                        action: rule.get_enum("action")?.as_option(),
                        exclusions: Some(expand_exclusions(rule)?),
                    })
                })
                .collect::<Result<Vec<_>, TranslateError>>()?;
            Ok(ManagedRuleGroupOverride {
                rule_group_name: group.non_empty("rule_group_name")?,
                exclusions: Some(expand_exclusions(group)?),
                rules: Some(rules),
            })
        })
        .collect::<Result<Vec<_>, TranslateError>>()?;

    Ok(ManagedRuleSet {
        rule_set_type: managed.non_empty("type")?,
        rule_set_version: managed.non_empty("version")?,
        exclusions: Some(expand_exclusions(managed)?),
        rule_group_overrides: Some(rule_group_overrides),
    })
}

/// Flatten a firewall policy into the state of `azurerm_frontdoor_firewall_policy`
///
/// `frontend_endpoint_ids` lists the endpoints linked to the policy, in
/// canonical casing.
pub fn flatten_firewall_policy(
    id: &WebApplicationFirewallPolicyId,
    model: &WebApplicationFirewallPolicy,
) -> Result<AttributeTree, TranslateError> {
    let empty = WebApplicationFirewallPolicyProperties::default();
    let properties = model.properties.as_ref().unwrap_or(&empty);
    let settings = properties.policy_settings.clone().unwrap_or_default();

    let frontend_endpoint_ids = properties
        .frontend_endpoint_links
        .iter()
        .flatten()
        .filter_map(|link| link.id.as_deref())
        .enumerate()
        .map(|(i, raw)| {
            FrontendEndpointId::parse_insensitive(raw)
                .map(|endpoint| AttributeValue::from(endpoint.to_string()))
                .map_err(|source| TranslateError::ChildIdUnresolvable {
                    field: AttributePath::new("frontend_endpoint_ids").index(i),
                    id: raw.to_owned(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let custom_rules: Vec<AttributeValue> = properties
        .custom_rules
        .iter()
        .flat_map(|list| list.rules.iter().flatten())
        .map(|rule| AttributeValue::Map(flatten_custom_rule(rule)))
        .collect();
    let managed_rules: Vec<AttributeValue> = properties
        .managed_rules
        .iter()
        .flat_map(|list| list.managed_rule_sets.iter().flatten())
        .map(|set| AttributeValue::Map(flatten_managed_rule(set)))
        .collect();
    let tags: AttributeTree = model
        .tags
        .iter()
        .flatten()
        .map(|(key, value)| (key.clone(), AttributeValue::from(value)))
        .collect();

    Ok(map! {
        "id" => id.to_string(),
        "name" => id.name.as_str(),
        "resource_group_name" => id.resource_group.as_str(),
        "location" => model.location.clone().unwrap_or_else(|| FRONT_DOOR_LOCATION.to_owned()),
        "enabled" => settings.enabled_state.is_some_and(EnabledState::is_enabled),
        "mode" => settings.mode.unwrap_or(PolicyMode::Prevention).as_str(),
        "redirect_url" => settings.redirect_url.unwrap_or_default(),
        "custom_block_response_status_code" => settings.custom_block_response_status_code,
        "custom_block_response_body" => settings.custom_block_response_body.unwrap_or_default(),
        "custom_rule" => custom_rules,
        "managed_rule" => managed_rules,
        "frontend_endpoint_ids" => frontend_endpoint_ids,
        "tags" => tags,
    })
}

fn flatten_custom_rule(rule: &CustomRule) -> AttributeTree {
    let match_conditions: Vec<AttributeValue> = rule
        .match_conditions
        .iter()
        .flatten()
        .map(|condition| {
            AttributeValue::Map(map! {
                "match_variable" => condition.match_variable.map(|v| v.as_str()),
                "operator" => condition.operator.map(|v| v.as_str()),
                "selector" => condition.selector.clone().unwrap_or_default(),
                "negation_condition" => condition.negate_condition.unwrap_or_default(),
                "match_values" => condition.match_value.clone().unwrap_or_default(),
                "transforms" => condition
                    .transforms
                    .iter()
                    .flatten()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    map! {
        "name" => rule.name.clone().unwrap_or_default(),
        "action" => rule.action.map(|v| v.as_str()),
        "enabled" => rule.enabled_state.is_some_and(EnabledState::is_enabled),
        "priority" => rule.priority.unwrap_or(1),
        "type" => rule.rule_type.unwrap_or(RuleType::MatchRule).as_str(),
        "rate_limit_duration_in_minutes" => rule.rate_limit_duration_in_minutes.unwrap_or(1),
        "rate_limit_threshold" => rule.rate_limit_threshold.unwrap_or(10),
        "match_condition" => match_conditions,
    }
}

fn flatten_exclusions(exclusions: Option<&Vec<ManagedRuleExclusion>>) -> Vec<AttributeValue> {
    exclusions
        .into_iter()
        .flatten()
        .map(|exclusion| {
            AttributeValue::Map(map! {
                "match_variable" => exclusion.match_variable.map(|v| v.as_str()),
                "operator" => exclusion.selector_match_operator.map(|v| v.as_str()),
                "selector" => exclusion.selector.clone().unwrap_or_default(),
            })
        })
        .collect()
}

fn flatten_managed_rule(set: &ManagedRuleSet) -> AttributeTree {
    let overrides: Vec<AttributeValue> = set
        .rule_group_overrides
        .iter()
        .flatten()
        .map(|group| {
            let rules: Vec<AttributeValue> = group
                .rules
                .iter()
                .flatten()
                .map(|rule| {
                    AttributeValue::Map(map! {
                        "rule_id" => rule.rule_id.clone().unwrap_or_default(),
                        "enabled" => rule.enabled_state.is_some_and(EnabledState::is_enabled),
                        "action" => rule.action.map(|v| v.as_str()),
                        "exclusion" => flatten_exclusions(rule.exclusions.as_ref()),
                    })
                })
                .collect();
            AttributeValue::Map(map! {
                "rule_group_name" => group.rule_group_name.clone().unwrap_or_default(),
                "exclusion" => flatten_exclusions(group.exclusions.as_ref()),
                "rule" => rules,
            })
        })
        .collect();

    map! {
        "type" => set.rule_set_type.clone().unwrap_or_default(),
        "version" => set.rule_set_version.clone().unwrap_or_default(),
        "exclusion" => flatten_exclusions(set.exclusions.as_ref()),
        "override" => overrides,
    }
}
