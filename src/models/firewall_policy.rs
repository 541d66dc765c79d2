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

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{EnabledState, SubResource};

wire_enum! {
    pub enum PolicyMode {
        Prevention => "Prevention",
        Detection => "Detection",
    }
}

wire_enum! {
    pub enum ActionType {
        Allow => "Allow",
        Block => "Block",
        Log => "Log",
        Redirect => "Redirect",
        AnomalyScoring => "AnomalyScoring",
    }
}

wire_enum! {
    pub enum RuleType {
        MatchRule => "MatchRule",
        RateLimitRule => "RateLimitRule",
    }
}

wire_enum! {
    pub enum MatchVariable {
        RemoteAddr => "RemoteAddr",
        RequestMethod => "RequestMethod",
        QueryString => "QueryString",
        PostArgs => "PostArgs",
        RequestUri => "RequestUri",
        RequestHeader => "RequestHeader",
        RequestBody => "RequestBody",
        Cookies => "Cookies",
        SocketAddr => "SocketAddr",
    }
}

wire_enum! {
    pub enum Operator {
        Any => "Any",
        IpMatch => "IPMatch",
        GeoMatch => "GeoMatch",
        Equal => "Equal",
        Contains => "Contains",
        LessThan => "LessThan",
        GreaterThan => "GreaterThan",
        LessThanOrEqual => "LessThanOrEqual",
        GreaterThanOrEqual => "GreaterThanOrEqual",
        BeginsWith => "BeginsWith",
        EndsWith => "EndsWith",
        RegEx => "RegEx",
    }
}

wire_enum! {
    pub enum TransformType {
        Lowercase => "Lowercase",
        Uppercase => "Uppercase",
        Trim => "Trim",
        UrlDecode => "UrlDecode",
        UrlEncode => "UrlEncode",
        RemoveNulls => "RemoveNulls",
    }
}

wire_enum! {
    pub enum ManagedRuleExclusionMatchVariable {
        RequestHeaderNames => "RequestHeaderNames",
        RequestCookieNames => "RequestCookieNames",
        QueryStringArgNames => "QueryStringArgNames",
        RequestBodyPostArgNames => "RequestBodyPostArgNames",
        RequestBodyJsonArgNames => "RequestBodyJsonArgNames",
    }
}

wire_enum! {
    pub enum ManagedRuleExclusionSelectorMatchOperator {
        Equals => "Equals",
        Contains => "Contains",
        StartsWith => "StartsWith",
        EndsWith => "EndsWith",
        EqualsAny => "EqualsAny",
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebApplicationFirewallPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<WebApplicationFirewallPolicyProperties>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebApplicationFirewallPolicyProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_settings: Option<PolicySettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_rules: Option<CustomRuleList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_rules: Option<ManagedRuleSetList>,
    /// Frontend endpoints using the policy, read only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend_endpoint_links: Option<Vec<SubResource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_state: Option<EnabledState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<PolicyMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_block_response_status_code: Option<i64>,
    /// Base64 encoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_block_response_body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomRuleList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<CustomRule>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_state: Option<EnabledState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<RuleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_duration_in_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_threshold: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_conditions: Option<Vec<MatchCondition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionType>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_variable: Option<MatchVariable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negate_condition: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_value: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transforms: Option<Vec<TransformType>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedRuleSetList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_rule_sets: Option<Vec<ManagedRuleSet>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedRuleSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_set_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_set_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusions: Option<Vec<ManagedRuleExclusion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_group_overrides: Option<Vec<ManagedRuleGroupOverride>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedRuleGroupOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusions: Option<Vec<ManagedRuleExclusion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<ManagedRuleOverride>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedRuleOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_state: Option<EnabledState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusions: Option<Vec<ManagedRuleExclusion>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedRuleExclusion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_variable: Option<ManagedRuleExclusionMatchVariable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector_match_operator: Option<ManagedRuleExclusionSelectorMatchOperator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_match_keeps_api_spelling() {
        assert_eq!(Operator::IpMatch.as_str(), "IPMatch");
        assert_eq!("IPMatch".parse(), Ok(Operator::IpMatch));
        assert!("IpMatch".parse::<Operator>().is_err());
    }

    #[test]
    fn policy_deserializes_nested_overrides() {
        let policy: WebApplicationFirewallPolicy = serde_json::from_value(serde_json::json!({
            "location": "Global",
            "properties": {
                "policySettings": { "enabledState": "Enabled", "mode": "Detection" },
                "managedRules": {
                    "managedRuleSets": [{
                        "ruleSetType": "DefaultRuleSet",
                        "ruleSetVersion": "1.0",
                        "ruleGroupOverrides": [{
                            "ruleGroupName": "PHP",
                            "rules": [{ "ruleId": "933111", "enabledState": "Disabled", "action": "Block" }]
                        }]
                    }]
                },
                "frontendEndpointLinks": [{ "id": "/fe" }]
            }
        }))
        .unwrap();
        let properties = policy.properties.unwrap();
        assert_eq!(
            properties.policy_settings.unwrap().mode,
            Some(PolicyMode::Detection)
        );
        let sets = properties.managed_rules.unwrap().managed_rule_sets.unwrap();
        let rules = sets[0].rule_group_overrides.as_ref().unwrap()[0]
            .rules
            .as_ref()
            .unwrap();
        assert_eq!(rules[0].rule_id.as_deref(), Some("933111"));
        assert_eq!(rules[0].enabled_state, Some(EnabledState::Disabled));
        assert_eq!(
            properties.frontend_endpoint_links,
            Some(vec![SubResource::new("/fe")])
        );
    }
}
