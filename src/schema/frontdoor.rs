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
    models::frontdoor::{
        CertificateSource, ForwardingProtocol, FrontDoorProtocol, HealthProbeMethod,
        QueryStripDirective,
    },
    translate::EXPLICIT_RESOURCE_ORDER,
    value::AttributeValue,
};

use super::{
    attributes, blocks, list_of, map_of, Attribute, AttributeType, Block, NestedBlock, Schema,
};

/// Version of the `azurerm_frontdoor` state
pub const FRONT_DOOR_SCHEMA_VERSION: i64 = 1;

/// Version of the `azurerm_frontdoor_custom_https_configuration` state
pub const CUSTOM_HTTPS_SCHEMA_VERSION: i64 = 1;

fn list(block: Block, min_items: usize, max_items: usize) -> NestedBlock {
    NestedBlock::List {
        block,
        min_items,
        max_items,
    }
}

fn string() -> AttributeType {
    AttributeType::String
}

fn number() -> AttributeType {
    AttributeType::Number
}

fn boolean() -> AttributeType {
    AttributeType::Bool
}

fn forwarding_configuration() -> Block {
    Block {
        attributes: attributes([
            ("backend_pool_name", Attribute::required(string())),
            (
                "cache_enabled",
                Attribute::optional(boolean()).with_default(false),
            ),
            (
                "cache_use_dynamic_compression",
                Attribute::optional(boolean()).with_default(false),
            ),
            (
                "cache_query_parameter_strip_directive",
                Attribute::optional(string())
                    .with_default(QueryStripDirective::StripAll.as_str()),
            ),
            ("cache_query_parameters", Attribute::optional(list_of(string()))),
            ("cache_duration", Attribute::optional(string())),
            ("custom_forwarding_path", Attribute::optional(string())),
            (
                "forwarding_protocol",
                Attribute::optional(string()).with_default(ForwardingProtocol::HttpsOnly.as_str()),
            ),
        ]),
        ..Default::default()
    }
}

fn redirect_configuration() -> Block {
    Block {
        attributes: attributes([
            ("custom_fragment", Attribute::optional(string())),
            ("custom_host", Attribute::optional(string())),
            ("custom_path", Attribute::optional(string())),
            ("custom_query_string", Attribute::optional(string())),
            ("redirect_protocol", Attribute::required(string())),
            ("redirect_type", Attribute::required(string())),
        ]),
        ..Default::default()
    }
}

fn routing_rule() -> Block {
    Block {
        attributes: attributes([
            ("id", Attribute::computed(string())),
            ("name", Attribute::required(string())),
            ("frontend_endpoints", Attribute::required(list_of(string()))),
            ("accepted_protocols", Attribute::required(list_of(string()))),
            (
                "patterns_to_match",
                Attribute::optional(list_of(string())).with_default(default_patterns()),
            ),
            ("enabled", Attribute::optional(boolean()).with_default(true)),
        ]),
        blocks: blocks([
            (
                "forwarding_configuration",
                NestedBlock::Optional(forwarding_configuration()),
            ),
            (
                "redirect_configuration",
                NestedBlock::Optional(redirect_configuration()),
            ),
        ]),
        ..Default::default()
    }
}

fn load_balancing() -> Block {
    Block {
        attributes: attributes([
            ("id", Attribute::computed(string())),
            ("name", Attribute::required(string())),
            ("sample_size", Attribute::optional(number()).with_default(4i64)),
            (
                "successful_samples_required",
                Attribute::optional(number()).with_default(2i64),
            ),
            (
                "additional_latency_milliseconds",
                Attribute::optional(number()).with_default(0i64),
            ),
        ]),
        ..Default::default()
    }
}

fn health_probe() -> Block {
    Block {
        attributes: attributes([
            ("id", Attribute::computed(string())),
            ("name", Attribute::required(string())),
            ("enabled", Attribute::optional(boolean()).with_default(true)),
            ("path", Attribute::optional(string()).with_default("/")),
            (
                "protocol",
                Attribute::optional(string()).with_default(FrontDoorProtocol::Http.as_str()),
            ),
            (
                "probe_method",
                Attribute::optional(string()).with_default(HealthProbeMethod::Get.as_str()),
            ),
            (
                "interval_in_seconds",
                Attribute::optional(number()).with_default(120i64),
            ),
        ]),
        ..Default::default()
    }
}

fn backend() -> Block {
    Block {
        attributes: attributes([
            ("enabled", Attribute::optional(boolean()).with_default(true)),
            ("address", Attribute::required(string())),
            ("http_port", Attribute::required(number())),
            ("https_port", Attribute::required(number())),
            ("weight", Attribute::optional(number()).with_default(50i64)),
            ("priority", Attribute::optional(number()).with_default(1i64)),
            ("host_header", Attribute::optional_computed(string())),
        ]),
        ..Default::default()
    }
}

fn backend_pool() -> Block {
    Block {
        attributes: attributes([
            ("id", Attribute::computed(string())),
            ("name", Attribute::required(string())),
            ("health_probe_name", Attribute::required(string())),
            ("load_balancing_name", Attribute::required(string())),
        ]),
        blocks: blocks([("backend", list(backend(), 1, 500))]),
        ..Default::default()
    }
}

fn frontend_endpoint() -> Block {
    Block {
        attributes: attributes([
            ("id", Attribute::computed(string())),
            ("name", Attribute::required(string())),
            ("host_name", Attribute::required(string())),
            (
                "session_affinity_enabled",
                Attribute::optional(boolean()).with_default(false),
            ),
            (
                "session_affinity_ttl_seconds",
                Attribute::optional(number()).with_default(0i64),
            ),
            (
                "web_application_firewall_policy_link_id",
                Attribute::optional(string()),
            ),
        ]),
        ..Default::default()
    }
}

fn backend_pool_settings() -> Block {
    Block {
        attributes: attributes([
            (
                "enforce_backend_pools_certificate_name_check",
                Attribute::required(boolean()),
            ),
            (
                "backend_pools_send_receive_timeout_seconds",
                Attribute::optional(number()).with_default(60i64),
            ),
        ]),
        ..Default::default()
    }
}

fn explicit_resource_order() -> Block {
    Block {
        attributes: attributes([
            ("backend_pool_ids", Attribute::computed(list_of(string()))),
            ("frontend_endpoint_ids", Attribute::computed(list_of(string()))),
            ("routing_rule_ids", Attribute::computed(list_of(string()))),
            (
                "backend_pool_health_probe_ids",
                Attribute::computed(list_of(string())),
            ),
            (
                "backend_pool_load_balancing_ids",
                Attribute::computed(list_of(string())),
            ),
        ]),
        ..Default::default()
    }
}

/// Schema of `azurerm_frontdoor`
///
/// ```
/// # use azurerm_frontdoor::schema::front_door_schema;
/// let schema = front_door_schema();
/// assert_eq!(schema.block.blocks["backend_pool"].max_items(), 50);
/// ```
pub fn front_door_schema() -> Schema {
    let computed_ids = || Attribute::computed(map_of(string()));
    Schema {
        version: FRONT_DOOR_SCHEMA_VERSION,
        block: Block {
            version: FRONT_DOOR_SCHEMA_VERSION,
            attributes: attributes([
                ("id", Attribute::computed(string())),
                ("name", Attribute::required(string())),
                ("resource_group_name", Attribute::required(string())),
                ("friendly_name", Attribute::optional(string())),
                (
                    "load_balancer_enabled",
                    Attribute::optional(boolean()).with_default(true),
                ),
                ("cname", Attribute::computed(string())),
                ("header_frontdoor_id", Attribute::computed(string())),
                ("tags", Attribute::optional(map_of(string()))),
                ("backend_pools", computed_ids()),
                ("frontend_endpoints", computed_ids()),
                ("routing_rules", computed_ids()),
                ("backend_pool_health_probes", computed_ids()),
                ("backend_pool_load_balancing_settings", computed_ids()),
            ]),
            blocks: blocks([
                (
                    "backend_pool_settings",
                    NestedBlock::Optional(backend_pool_settings()),
                ),
                ("routing_rule", list(routing_rule(), 1, 500)),
                (
                    "backend_pool_load_balancing",
                    list(load_balancing(), 1, 5000),
                ),
                ("backend_pool_health_probe", list(health_probe(), 1, 5000)),
                ("backend_pool", list(backend_pool(), 1, 50)),
                ("frontend_endpoint", list(frontend_endpoint(), 1, 500)),
                (
                    EXPLICIT_RESOURCE_ORDER,
                    NestedBlock::Optional(explicit_resource_order()),
                ),
            ]),
            description: "Azure Front Door (classic)".into(),
            ..Default::default()
        },
    }
}

/// Schema of `azurerm_frontdoor_custom_https_configuration`
pub fn custom_https_configuration_schema() -> Schema {
    Schema {
        version: CUSTOM_HTTPS_SCHEMA_VERSION,
        block: Block {
            version: CUSTOM_HTTPS_SCHEMA_VERSION,
            attributes: attributes([
                ("id", Attribute::computed(string())),
                ("frontend_endpoint_id", Attribute::required(string())),
                (
                    "custom_https_provisioning_enabled",
                    Attribute::required(boolean()),
                ),
            ]),
            blocks: blocks([(
                "custom_https_configuration",
                NestedBlock::Optional(Block {
                    attributes: attributes([
                        (
                            "certificate_source",
                            Attribute::optional(string())
                                .with_default(CertificateSource::FrontDoor.as_str()),
                        ),
                        ("minimum_tls_version", Attribute::computed(string())),
                        ("provisioning_state", Attribute::computed(string())),
                        ("provisioning_substate", Attribute::computed(string())),
                        (
                            "azure_key_vault_certificate_secret_name",
                            Attribute::optional(string()),
                        ),
                        (
                            "azure_key_vault_certificate_secret_version",
                            Attribute::optional(string()),
                        ),
                        (
                            "azure_key_vault_certificate_vault_id",
                            Attribute::optional(string()),
                        ),
                    ]),
                    ..Default::default()
                }),
            )]),
            description: "Custom HTTPS configuration of a Front Door frontend endpoint".into(),
            ..Default::default()
        },
    }
}

/// Default list of routing patterns
pub(crate) fn default_patterns() -> AttributeValue {
    AttributeValue::from(vec!["/*"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{map, value::AttributeTree, Diagnostics};

    fn minimal() -> AttributeTree {
        map! {
            "name" => "fd1",
            "resource_group_name" => "rg",
            "routing_rule" => vec![AttributeValue::Map(map! {
                "name" => "rule",
                "frontend_endpoints" => vec!["fe"],
                "accepted_protocols" => vec!["Https"],
                "forwarding_configuration" => AttributeValue::single(map! {
                    "backend_pool_name" => "pool",
                }),
            })],
            "backend_pool_load_balancing" => vec![AttributeValue::Map(map! { "name" => "lb" })],
            "backend_pool_health_probe" => vec![AttributeValue::Map(map! { "name" => "probe" })],
            "backend_pool" => vec![AttributeValue::Map(map! {
                "name" => "pool",
                "health_probe_name" => "probe",
                "load_balancing_name" => "lb",
                "backend" => vec![AttributeValue::Map(map! {
                    "address" => "a.example.com",
                    "http_port" => 80i64,
                    "https_port" => 443i64,
                })],
            })],
            "frontend_endpoint" => vec![AttributeValue::Map(map! {
                "name" => "fe",
                "host_name" => "fd1.azurefd.net",
            })],
        }
    }

    fn first<'a>(tree: &'a AttributeTree, block: &str) -> &'a AttributeTree {
        tree[block].as_list().unwrap()[0].as_map().unwrap()
    }

    #[test]
    fn minimal_front_door_gets_defaults() {
        let mut diags = Diagnostics::default();
        let normalized = front_door_schema().normalize(&minimal(), &mut diags);
        assert!(!diags.has_errors(), "{diags}");

        assert_eq!(normalized["load_balancer_enabled"], AttributeValue::Bool(true));
        let rule = first(&normalized, "routing_rule");
        assert_eq!(rule["patterns_to_match"], default_patterns());
        assert_eq!(rule["enabled"], AttributeValue::Bool(true));
        let forwarding = first(rule, "forwarding_configuration");
        assert_eq!(forwarding["forwarding_protocol"], AttributeValue::from("HttpsOnly"));
        assert_eq!(
            forwarding["cache_query_parameter_strip_directive"],
            AttributeValue::from("StripAll")
        );
        assert_eq!(rule["redirect_configuration"], AttributeValue::List(vec![]));

        let backend = first(first(&normalized, "backend_pool"), "backend");
        assert_eq!(backend["weight"], AttributeValue::Number(50));
        assert_eq!(backend["priority"], AttributeValue::Number(1));

        let probe = first(&normalized, "backend_pool_health_probe");
        assert_eq!(probe["interval_in_seconds"], AttributeValue::Number(120));
        assert_eq!(probe["probe_method"], AttributeValue::from("GET"));

        let lb = first(&normalized, "backend_pool_load_balancing");
        assert_eq!(lb["sample_size"], AttributeValue::Number(4));
        assert_eq!(lb["successful_samples_required"], AttributeValue::Number(2));
    }

    #[test]
    fn too_many_backend_pools_are_reported() {
        let mut config = minimal();
        let pool = config["backend_pool"].as_list().unwrap()[0].clone();
        config.insert("backend_pool".to_owned(), vec![pool; 51].into());
        let mut diags = Diagnostics::default();
        front_door_schema().normalize(&config, &mut diags);
        assert_eq!(diags.errors.len(), 1);
        assert_eq!(diags.errors[0].attribute.to_string(), "backend_pool");
    }

    #[test]
    fn custom_https_defaults_to_front_door_certificate() {
        let config: AttributeTree = map! {
            "frontend_endpoint_id" => "/fe",
            "custom_https_provisioning_enabled" => true,
            "custom_https_configuration" => AttributeValue::single(map! {}),
        };
        let mut diags = Diagnostics::default();
        let normalized = custom_https_configuration_schema().normalize(&config, &mut diags);
        assert!(!diags.has_errors(), "{diags}");
        assert_eq!(
            first(&normalized, "custom_https_configuration")["certificate_source"],
            AttributeValue::from("FrontDoor")
        );
    }
}
