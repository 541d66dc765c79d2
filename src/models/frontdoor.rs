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

pub const FORWARDING_CONFIGURATION_ODATA_TYPE: &str =
    "#Microsoft.Azure.FrontDoor.Models.FrontdoorForwardingConfiguration";
pub const REDIRECT_CONFIGURATION_ODATA_TYPE: &str =
    "#Microsoft.Azure.FrontDoor.Models.FrontdoorRedirectConfiguration";

wire_enum! {
    pub enum FrontDoorProtocol {
        Http => "Http",
        Https => "Https",
    }
}

wire_enum! {
    pub enum ForwardingProtocol {
        HttpOnly => "HttpOnly",
        HttpsOnly => "HttpsOnly",
        MatchRequest => "MatchRequest",
    }
}

wire_enum! {
    pub enum RedirectProtocol {
        HttpOnly => "HttpOnly",
        HttpsOnly => "HttpsOnly",
        MatchRequest => "MatchRequest",
    }
}

wire_enum! {
    pub enum RedirectType {
        Moved => "Moved",
        Found => "Found",
        TemporaryRedirect => "TemporaryRedirect",
        PermanentRedirect => "PermanentRedirect",
    }
}

wire_enum! {
    pub enum QueryStripDirective {
        StripNone => "StripNone",
        StripAll => "StripAll",
        StripOnly => "StripOnly",
        StripAllExcept => "StripAllExcept",
    }
}

impl QueryStripDirective {
    /// Whether the directive operates on an explicit list of query parameters
    pub fn takes_parameters(self) -> bool {
        matches!(
            self,
            QueryStripDirective::StripOnly | QueryStripDirective::StripAllExcept
        )
    }
}

wire_enum! {
    pub enum HealthProbeMethod {
        Get => "GET",
        Head => "HEAD",
    }
}

wire_enum! {
    pub enum CertificateSource {
        AzureKeyVault => "AzureKeyVault",
        FrontDoor => "FrontDoor",
    }
}

wire_enum! {
    pub enum TlsProtocolType {
        ServerNameIndication => "ServerNameIndication",
    }
}

wire_enum! {
    pub enum MinimumTlsVersion {
        Tls10 => "1.0",
        Tls12 => "1.2",
    }
}

wire_enum! {
    pub enum FrontDoorCertificateType {
        Dedicated => "Dedicated",
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontDoor {
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
    pub properties: Option<FrontDoorProperties>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontDoorProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_rules: Option<Vec<RoutingRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_balancing_settings: Option<Vec<LoadBalancingSettingsModel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_probe_settings: Option<Vec<HealthProbeSettingsModel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_pools: Option<Vec<BackendPool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend_endpoints: Option<Vec<FrontendEndpoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_pools_settings: Option<BackendPoolsSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_state: Option<EnabledState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontdoor_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendPoolsSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce_certificate_name_check: Option<EnabledState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_recv_timeout_seconds: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<RoutingRuleProperties>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingRuleProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend_endpoints: Option<Vec<SubResource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_protocols: Option<Vec<FrontDoorProtocol>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patterns_to_match: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_state: Option<EnabledState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_configuration: Option<RouteConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_state: Option<String>,
}

/// Either forwards the request to a backend pool or redirects it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@odata.type")]
pub enum RouteConfiguration {
    #[serde(rename = "#Microsoft.Azure.FrontDoor.Models.FrontdoorForwardingConfiguration")]
    Forwarding(ForwardingConfiguration),
    #[serde(rename = "#Microsoft.Azure.FrontDoor.Models.FrontdoorRedirectConfiguration")]
    Redirect(RedirectConfiguration),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardingConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_forwarding_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forwarding_protocol: Option<ForwardingProtocol>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_configuration: Option<CacheConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_pool: Option<SubResource>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_parameter_strip_directive: Option<QueryStripDirective>,
    /// Comma separated list of query parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_parameters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_compression: Option<EnabledState>,
    /// ISO 8601 duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_type: Option<RedirectType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_protocol: Option<RedirectProtocol>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fragment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_query_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendPool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BackendPoolProperties>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendPoolProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backends: Option<Vec<Backend>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_balancing_settings: Option<SubResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_probe_settings: Option<SubResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_port: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https_port: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_state: Option<EnabledState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_host_header: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancingSettingsModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<LoadBalancingSettingsProperties>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancingSettingsProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successful_samples_required: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_latency_milliseconds: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthProbeSettingsModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<HealthProbeSettingsProperties>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthProbeSettingsProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<FrontDoorProtocol>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_in_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_probe_method: Option<HealthProbeMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_state: Option<EnabledState>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendEndpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<FrontendEndpointProperties>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendEndpointProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_affinity_enabled_state: Option<EnabledState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_affinity_ttl_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_application_firewall_policy_link: Option<SubResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_https_provisioning_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_https_provisioning_substate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_https_configuration: Option<CustomHttpsConfiguration>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomHttpsConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_source: Option<CertificateSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol_type: Option<TlsProtocolType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_tls_version: Option<MinimumTlsVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_vault_certificate_source_parameters: Option<KeyVaultCertificateSourceParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_door_certificate_source_parameters: Option<FrontDoorCertificateSourceParameters>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyVaultCertificateSourceParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault: Option<SubResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontDoorCertificateSourceParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_type: Option<FrontDoorCertificateType>,
}
