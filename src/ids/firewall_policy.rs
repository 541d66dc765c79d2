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

use std::fmt::Display;

use super::{format_scope, Casing, IdError, Label, ResourceId, Segments};

pub(crate) const FIREWALL_POLICIES: Label = Label::new(
    "frontDoorWebApplicationFirewallPolicies",
    &[
        "frontdoorwebapplicationfirewallpolicies",
        "FrontDoorWebApplicationFirewallPolicies",
    ],
);

/// Identifier of a Front Door Web Application Firewall policy
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WebApplicationFirewallPolicyId {
    pub subscription_id: String,
    pub resource_group: String,
    pub name: String,
}

impl WebApplicationFirewallPolicyId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group: resource_group.into(),
            name: name.into(),
        }
    }
}

impl ResourceId for WebApplicationFirewallPolicyId {
    fn parse_with(input: &str, casing: Casing) -> Result<Self, IdError> {
        let mut segments = Segments::new(input, casing)?;
        let (subscription_id, resource_group) = segments.pop_scope()?;
        let name = segments.pop(&FIREWALL_POLICIES)?;
        segments.finish()?;
        Ok(Self {
            subscription_id,
            resource_group,
            name,
        })
    }
}

impl Display for WebApplicationFirewallPolicyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format_scope(f, &self.subscription_id, &self.resource_group)?;
        write!(f, "/{}/{}", FIREWALL_POLICIES.canonical, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let input = "/subscriptions/S/resourceGroups/G/providers/Microsoft.Network/frontDoorWebApplicationFirewallPolicies/waf1";
        let id = WebApplicationFirewallPolicyId::parse(input).unwrap();
        assert_eq!(id, WebApplicationFirewallPolicyId::new("S", "G", "waf1"));
        assert_eq!(id.id(), input);
    }

    #[test]
    fn lower_cased_policy_is_recovered() {
        let input = "/subscriptions/S/resourcegroups/G/providers/microsoft.network/frontdoorwebapplicationfirewallpolicies/waf1";
        assert!(WebApplicationFirewallPolicyId::parse(input).is_err());
        let id = WebApplicationFirewallPolicyId::parse_insensitive(input).unwrap();
        assert_eq!(id, WebApplicationFirewallPolicyId::new("S", "G", "waf1"));
    }

    #[test]
    fn other_providers_are_rejected() {
        let input = "/subscriptions/S/resourceGroups/G/providers/Microsoft.Cdn/frontDoorWebApplicationFirewallPolicies/waf1";
        assert_eq!(
            WebApplicationFirewallPolicyId::parse_insensitive(input),
            Err(IdError::ProviderMismatch {
                expected: "Microsoft.Network",
                found: "Microsoft.Cdn".into(),
                input: input.into(),
            })
        );
    }
}
