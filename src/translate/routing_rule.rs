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
    ids::{ChildKind, FrontDoorId},
    map,
    models::{
        frontdoor::{
            CacheConfiguration, ForwardingConfiguration, ForwardingProtocol, QueryStripDirective,
            RedirectConfiguration, RouteConfiguration, RoutingRule, RoutingRuleProperties,
        },
        EnabledState, SubResource,
    },
    value::{AttributeTree, AttributeValue},
    AttributePath,
};

use super::{child_id, id_of, linked_name, order_by_witness, resolve_child, BlockRef, TranslateError};

const ROUTE_VARIANTS: &[&str] = &["redirect_configuration", "forwarding_configuration"];
const DEFAULT_PATTERN: &str = "/*";

pub fn expand_routing_rules(
    front_door: &FrontDoorId,
    config: &BlockRef<'_>,
) -> Result<Vec<RoutingRule>, TranslateError> {
    config
        .blocks("routing_rule")?
        .iter()
        .map(|rule| expand_routing_rule(front_door, rule))
        .collect()
}

/// Expand a `routing_rule` block
///
/// Exactly one of `redirect_configuration` and `forwarding_configuration`
/// must be set, otherwise nothing is expanded.
pub fn expand_routing_rule(
    front_door: &FrontDoorId,
    rule: &BlockRef<'_>,
) -> Result<RoutingRule, TranslateError> {
    let route_configuration = expand_route_configuration(front_door, rule)?;
    let name = rule.string("name")?;

    let frontend_endpoints = rule
        .strings("frontend_endpoints")?
        .into_iter()
        .map(|endpoint| SubResource::new(front_door.frontend_endpoint(endpoint)))
        .collect();
    let mut patterns_to_match = rule.strings("patterns_to_match")?;
    if patterns_to_match.is_empty() {
        patterns_to_match.push(DEFAULT_PATTERN.to_owned());
    }

    Ok(RoutingRule {
        id: Some(front_door.routing_rule(name.as_str()).to_string()),
        name: Some(name),
        properties: Some(RoutingRuleProperties {
            frontend_endpoints: Some(frontend_endpoints),
            accepted_protocols: Some(rule.enums("accepted_protocols")?),
            patterns_to_match: Some(patterns_to_match),
            enabled_state: Some(rule.bool_or("enabled", true)?.into()),
            route_configuration: Some(route_configuration),
            resource_state: None,
        }),
    })
}

fn expand_route_configuration(
    front_door: &FrontDoorId,
    rule: &BlockRef<'_>,
) -> Result<RouteConfiguration, TranslateError> {
    let redirect = rule.get_block("redirect_configuration")?.as_option();
    let forwarding = rule.get_block("forwarding_configuration")?.as_option();
    match (redirect, forwarding) {
        (Some(redirect), None) => Ok(RouteConfiguration::Redirect(expand_redirect(&redirect)?)),
        (None, Some(forwarding)) => Ok(RouteConfiguration::Forwarding(expand_forwarding(
            front_door,
            &forwarding,
        )?)),
        (redirect, forwarding) => Err(TranslateError::AmbiguousVariant {
            field: rule.path().clone(),
            variants: ROUTE_VARIANTS,
            found: usize::from(redirect.is_some()) + usize::from(forwarding.is_some()),
        }),
    }
}

fn expand_redirect(block: &BlockRef<'_>) -> Result<RedirectConfiguration, TranslateError> {
    Ok(RedirectConfiguration {
        redirect_type: block.get_enum("redirect_type")?.as_option(),
        redirect_protocol: block.get_enum("redirect_protocol")?.as_option(),
        custom_host: block.non_empty("custom_host")?,
        custom_path: block.non_empty("custom_path")?,
        custom_fragment: block.non_empty("custom_fragment")?,
        custom_query_string: block.non_empty("custom_query_string")?,
    })
}

fn expand_forwarding(
    front_door: &FrontDoorId,
    block: &BlockRef<'_>,
) -> Result<ForwardingConfiguration, TranslateError> {
    let backend_pool = block
        .non_empty("backend_pool_name")?
        .map(|name| SubResource::new(front_door.backend_pool(name)));
    let cache_configuration = if block.bool_or("cache_enabled", false)? {
        Some(expand_cache(block)?)
    } else {
        None
    };
    Ok(ForwardingConfiguration {
        custom_forwarding_path: block.non_empty("custom_forwarding_path")?,
        forwarding_protocol: Some(
            block
                .get_enum("forwarding_protocol")?
                .unwrap_or(ForwardingProtocol::HttpsOnly),
        ),
        cache_configuration,
        backend_pool,
    })
}

fn expand_cache(block: &BlockRef<'_>) -> Result<CacheConfiguration, TranslateError> {
    let parameters = block.strings("cache_query_parameters")?;
    Ok(CacheConfiguration {
        query_parameter_strip_directive: Some(
            block
                .get_enum("cache_query_parameter_strip_directive")?
                .unwrap_or(QueryStripDirective::StripAll),
        ),
        query_parameters: (!parameters.is_empty()).then(|| parameters.join(",")),
        dynamic_compression: Some(block.bool_or("cache_use_dynamic_compression", false)?.into()),
        cache_duration: block.non_empty("cache_duration")?,
    })
}

/// Flatten the routing rules of a Front Door, in the order of `witness`
///
/// `prior` is the previous state of the Front Door, used to carry cache
/// settings forward while caching is disabled.
pub fn flatten_routing_rules(
    front_door: &FrontDoorId,
    rules: &[RoutingRule],
    witness: &[String],
    prior: Option<&AttributeTree>,
) -> Result<Vec<AttributeTree>, TranslateError> {
    let flattened = rules
        .iter()
        .enumerate()
        .map(|(i, rule)| {
            flatten_routing_rule(
                front_door,
                rule,
                AttributePath::new("routing_rule").index(i),
                prior,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(order_by_witness(flattened, witness, id_of))
}

fn flatten_routing_rule(
    front_door: &FrontDoorId,
    rule: &RoutingRule,
    path: AttributePath,
    prior: Option<&AttributeTree>,
) -> Result<AttributeTree, TranslateError> {
    let name = rule.name.clone().unwrap_or_default();
    let id = child_id(
        front_door,
        ChildKind::RoutingRule,
        rule.id.as_deref(),
        &name,
        path.clone().attribute("id"),
    )?;
    let empty = RoutingRuleProperties::default();
    let properties = rule.properties.as_ref().unwrap_or(&empty);

    let frontend_endpoints = properties
        .frontend_endpoints
        .iter()
        .flatten()
        .enumerate()
        .filter_map(|(i, link)| link.id.as_deref().map(|raw| (i, raw)))
        .map(|(i, raw)| {
            let field = path.clone().attribute("frontend_endpoints").index(i);
            Ok(resolve_child(ChildKind::FrontendEndpoint, raw, field)?
                .name()
                .to_owned())
        })
        .collect::<Result<Vec<_>, TranslateError>>()?;
    let accepted_protocols = properties
        .accepted_protocols
        .iter()
        .flatten()
        .map(|protocol| protocol.as_str())
        .collect::<Vec<_>>();

    let (redirect, forwarding) = match &properties.route_configuration {
        Some(RouteConfiguration::Redirect(redirect)) => {
            (vec![AttributeValue::Map(flatten_redirect(redirect))], vec![])
        }
        Some(RouteConfiguration::Forwarding(forwarding)) => {
            let prior = prior_forwarding(prior, &name);
            let path = path.clone().attribute("forwarding_configuration").index(0);
            let forwarding = flatten_forwarding(forwarding, path, prior)?;
            (vec![], vec![AttributeValue::Map(forwarding)])
        }
        None => (vec![], vec![]),
    };

    Ok(map! {
        "id" => id,
        "name" => name,
        "enabled" => properties.enabled_state.is_some_and(EnabledState::is_enabled),
        "frontend_endpoints" => frontend_endpoints,
        "accepted_protocols" => accepted_protocols,
        "patterns_to_match" => properties.patterns_to_match.clone().unwrap_or_default(),
        "redirect_configuration" => redirect,
        "forwarding_configuration" => forwarding,
    })
}

fn flatten_redirect(redirect: &RedirectConfiguration) -> AttributeTree {
    map! {
        "redirect_type" => redirect.redirect_type.map(|t| t.as_str()).unwrap_or_default(),
        "redirect_protocol" => redirect.redirect_protocol.map(|p| p.as_str()).unwrap_or_default(),
        "custom_host" => redirect.custom_host.clone().unwrap_or_default(),
        "custom_path" => redirect.custom_path.clone().unwrap_or_default(),
        "custom_fragment" => redirect.custom_fragment.clone().unwrap_or_default(),
        "custom_query_string" => redirect.custom_query_string.clone().unwrap_or_default(),
    }
}

fn flatten_forwarding(
    forwarding: &ForwardingConfiguration,
    path: AttributePath,
    prior: Option<&AttributeTree>,
) -> Result<AttributeTree, TranslateError> {
    let backend_pool_name = linked_name(
        ChildKind::BackendPool,
        forwarding.backend_pool.as_ref(),
        path.attribute("backend_pool_name"),
    )?;
    let mut tree: AttributeTree = map! {
        "backend_pool_name" => backend_pool_name.unwrap_or_default(),
        "custom_forwarding_path" => forwarding.custom_forwarding_path.clone().unwrap_or_default(),
        "forwarding_protocol" => forwarding.forwarding_protocol.map(|p| p.as_str()).unwrap_or_default(),
    };
    tree.extend(match &forwarding.cache_configuration {
        Some(cache) => flatten_cache(cache),
        None => carry_cache_forward(prior),
    });
    Ok(tree)
}

fn flatten_cache(cache: &CacheConfiguration) -> AttributeTree {
    let directive = cache
        .query_parameter_strip_directive
        .unwrap_or(QueryStripDirective::StripAll);
    let parameters = cache
        .query_parameters
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|parameter| !parameter.is_empty())
        .collect::<Vec<_>>();
    map! {
        "cache_enabled" => true,
        "cache_query_parameter_strip_directive" => directive.as_str(),
        "cache_query_parameters" => parameters,
        "cache_use_dynamic_compression" => cache.dynamic_compression.is_some_and(EnabledState::is_enabled),
        "cache_duration" => cache.cache_duration.clone().unwrap_or_default(),
    }
}

/// Cache settings of a rule whose cache is disabled
///
/// The API drops them along with the cache configuration, so the previous
/// values are kept when known.
fn carry_cache_forward(prior: Option<&AttributeTree>) -> AttributeTree {
    let defaults: AttributeTree = map! {
        "cache_query_parameter_strip_directive" => QueryStripDirective::StripAll.as_str(),
        "cache_query_parameters" => Vec::<AttributeValue>::new(),
        "cache_use_dynamic_compression" => false,
        "cache_duration" => "",
    };
    let mut tree: AttributeTree = defaults
        .into_iter()
        .map(|(key, default)| {
            let value = prior
                .and_then(|prior| prior.get(&key))
                .filter(|value| !matches!(value, AttributeValue::Null | AttributeValue::Unknown))
                .cloned()
                .unwrap_or(default);
            (key, value)
        })
        .collect();
    tree.insert("cache_enabled".to_owned(), AttributeValue::Bool(false));
    tree
}

/// `forwarding_configuration` of the rule `name` in the previous state
fn prior_forwarding<'a>(prior: Option<&'a AttributeTree>, name: &str) -> Option<&'a AttributeTree> {
    prior?
        .get("routing_rule")?
        .as_list()?
        .iter()
        .filter_map(AttributeValue::as_map)
        .find(|rule| rule.get("name").and_then(AttributeValue::as_str) == Some(name))?
        .get("forwarding_configuration")?
        .as_list()?
        .first()?
        .as_map()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::frontdoor::{FrontDoorProtocol, RedirectProtocol, RedirectType};

    fn fd() -> FrontDoorId {
        FrontDoorId::new("S", "G", "FD1")
    }

    fn redirect_block(extra: AttributeTree) -> AttributeTree {
        let mut block: AttributeTree = map! {
            "redirect_type" => "Found",
            "redirect_protocol" => "HttpsOnly",
        };
        block.extend(extra);
        block
    }

    fn rule(extra: AttributeTree) -> AttributeTree {
        let mut rule: AttributeTree = map! {
            "name" => "rule",
            "frontend_endpoints" => vec!["fe"],
            "accepted_protocols" => vec!["Http", "Https"],
        };
        rule.extend(extra);
        rule
    }

    fn expand(tree: &AttributeTree) -> Result<RoutingRule, TranslateError> {
        expand_routing_rule(&fd(), &BlockRef::root(tree))
    }

    fn redirect_of(rule: &RoutingRule) -> &RedirectConfiguration {
        match rule.properties.as_ref().unwrap().route_configuration.as_ref() {
            Some(RouteConfiguration::Redirect(redirect)) => redirect,
            other => panic!("expected a redirect, got {other:?}"),
        }
    }

    fn forwarding_of(rule: &RoutingRule) -> &ForwardingConfiguration {
        match rule.properties.as_ref().unwrap().route_configuration.as_ref() {
            Some(RouteConfiguration::Forwarding(forwarding)) => forwarding,
            other => panic!("expected a forwarding, got {other:?}"),
        }
    }

    #[test]
    fn both_route_configurations_are_ambiguous() {
        let tree = rule(map! {
            "redirect_configuration" => AttributeValue::single(redirect_block(AttributeTree::new())),
            "forwarding_configuration" => AttributeValue::single(map! { "backend_pool_name" => "pool" }),
        });
        assert_eq!(
            expand(&tree).unwrap_err(),
            TranslateError::AmbiguousVariant {
                field: AttributePath::default(),
                variants: ROUTE_VARIANTS,
                found: 2,
            }
        );
    }

    #[test]
    fn missing_route_configuration_is_ambiguous() {
        let config: AttributeTree = map! {
            "routing_rule" => vec![AttributeValue::Map(rule(AttributeTree::new()))],
        };
        let err = expand_routing_rules(&fd(), &BlockRef::root(&config)).unwrap_err();
        assert!(matches!(err, TranslateError::AmbiguousVariant { found: 0, .. }));
        assert_eq!(err.path().unwrap().to_string(), "routing_rule[0]");
    }

    #[test]
    fn absent_and_empty_custom_host_are_both_omitted() {
        let absent = rule(map! {
            "redirect_configuration" => AttributeValue::single(redirect_block(AttributeTree::new())),
        });
        let empty = rule(map! {
            "redirect_configuration" => AttributeValue::single(redirect_block(map! { "custom_host" => "" })),
        });
        let absent = expand(&absent).unwrap();
        let empty = expand(&empty).unwrap();
        assert_eq!(redirect_of(&absent).custom_host, None);
        assert_eq!(redirect_of(&empty).custom_host, None);
        assert_eq!(
            redirect_of(&absent).redirect_type,
            Some(RedirectType::Found)
        );
        assert_eq!(
            redirect_of(&absent).redirect_protocol,
            Some(RedirectProtocol::HttpsOnly)
        );

        let json = serde_json::to_value(redirect_of(&empty)).unwrap();
        assert!(json.get("customHost").is_none());
    }

    #[test]
    fn links_are_derived_from_the_front_door() {
        let tree = rule(map! {
            "forwarding_configuration" => AttributeValue::single(map! { "backend_pool_name" => "pool" }),
        });
        let expanded = expand(&tree).unwrap();
        let properties = expanded.properties.as_ref().unwrap();
        assert_eq!(
            expanded.id.as_deref(),
            Some("/subscriptions/S/resourceGroups/G/providers/Microsoft.Network/frontDoors/FD1/routingRules/rule")
        );
        assert_eq!(
            properties.frontend_endpoints,
            Some(vec![SubResource::new(fd().frontend_endpoint("fe"))])
        );
        assert_eq!(
            properties.accepted_protocols,
            Some(vec![FrontDoorProtocol::Http, FrontDoorProtocol::Https])
        );
        assert_eq!(properties.patterns_to_match, Some(vec!["/*".to_owned()]));
        assert_eq!(properties.enabled_state, Some(EnabledState::Enabled));

        let forwarding = forwarding_of(&expanded);
        assert_eq!(
            forwarding.backend_pool,
            Some(SubResource::new(fd().backend_pool("pool")))
        );
        assert_eq!(
            forwarding.forwarding_protocol,
            Some(ForwardingProtocol::HttpsOnly)
        );
        assert_eq!(forwarding.cache_configuration, None);
    }

    #[test]
    fn cache_defaults_to_strip_all() {
        let tree = rule(map! {
            "forwarding_configuration" => AttributeValue::single(map! {
                "backend_pool_name" => "pool",
                "cache_enabled" => true,
                "cache_query_parameter_strip_directive" => "",
                "cache_duration" => "",
            }),
        });
        let expanded = expand(&tree).unwrap();
        assert_eq!(
            forwarding_of(&expanded).cache_configuration,
            Some(CacheConfiguration {
                query_parameter_strip_directive: Some(QueryStripDirective::StripAll),
                query_parameters: None,
                dynamic_compression: Some(EnabledState::Disabled),
                cache_duration: None,
            })
        );
    }

    #[test]
    fn cache_query_parameters_are_joined() {
        let tree = rule(map! {
            "forwarding_configuration" => AttributeValue::single(map! {
                "backend_pool_name" => "pool",
                "cache_enabled" => true,
                "cache_query_parameter_strip_directive" => "StripOnly",
                "cache_query_parameters" => vec!["a", "b"],
                "cache_use_dynamic_compression" => true,
                "cache_duration" => "P1D",
            }),
        });
        let expanded = expand(&tree).unwrap();
        let cache = forwarding_of(&expanded).cache_configuration.clone().unwrap();
        assert_eq!(cache.query_parameters.as_deref(), Some("a,b"));
        assert_eq!(cache.query_parameter_strip_directive, Some(QueryStripDirective::StripOnly));
        assert_eq!(cache.dynamic_compression, Some(EnabledState::Enabled));
        assert_eq!(cache.cache_duration.as_deref(), Some("P1D"));
    }

    fn response_rule(name: &str, cache: Option<CacheConfiguration>) -> RoutingRule {
        RoutingRule {
            id: Some(format!(
                "/subscriptions/S/resourcegroups/G/providers/Microsoft.Network/Frontdoors/FD1/RoutingRules/{name}"
            )),
            name: Some(name.to_owned()),
            properties: Some(RoutingRuleProperties {
                frontend_endpoints: Some(vec![SubResource::new(
                    "/subscriptions/S/resourceGroups/G/providers/Microsoft.Network/frontdoors/FD1/FrontendEndpoints/fe",
                )]),
                accepted_protocols: Some(vec![FrontDoorProtocol::Https]),
                patterns_to_match: Some(vec!["/*".to_owned()]),
                enabled_state: Some(EnabledState::Enabled),
                route_configuration: Some(RouteConfiguration::Forwarding(ForwardingConfiguration {
                    custom_forwarding_path: None,
                    forwarding_protocol: Some(ForwardingProtocol::MatchRequest),
                    cache_configuration: cache,
                    backend_pool: Some(SubResource::new(
                        "/subscriptions/S/resourceGroups/G/providers/Microsoft.Network/frontDoors/FD1/backendPools/pool",
                    )),
                })),
                resource_state: None,
            }),
        }
    }

    fn forwarding_tree(tree: &AttributeTree) -> &AttributeTree {
        tree["forwarding_configuration"].as_list().unwrap()[0]
            .as_map()
            .unwrap()
    }

    #[test]
    fn flatten_rewrites_ids_into_canonical_casing() {
        let flattened =
            flatten_routing_rules(&fd(), &[response_rule("rule", None)], &[], None).unwrap();
        let rule = &flattened[0];
        assert_eq!(
            rule["id"],
            AttributeValue::from(fd().routing_rule("rule").to_string())
        );
        assert_eq!(rule["frontend_endpoints"], AttributeValue::from(vec!["fe"]));
        assert_eq!(rule["enabled"], AttributeValue::Bool(true));
        assert_eq!(rule["redirect_configuration"], AttributeValue::List(vec![]));
        let forwarding = forwarding_tree(rule);
        assert_eq!(forwarding["backend_pool_name"], AttributeValue::from("pool"));
        assert_eq!(forwarding["forwarding_protocol"], AttributeValue::from("MatchRequest"));
        assert_eq!(forwarding["cache_enabled"], AttributeValue::Bool(false));
    }

    #[test]
    fn disabled_cache_carries_prior_settings_forward() {
        let prior: AttributeTree = map! {
            "routing_rule" => vec![AttributeValue::Map(map! {
                "name" => "rule",
                "forwarding_configuration" => AttributeValue::single(map! {
                    "cache_enabled" => true,
                    "cache_query_parameter_strip_directive" => "StripAllExcept",
                    "cache_query_parameters" => vec!["keep"],
                    "cache_use_dynamic_compression" => true,
                    "cache_duration" => "PT1H",
                }),
            })],
        };
        let flattened =
            flatten_routing_rules(&fd(), &[response_rule("rule", None)], &[], Some(&prior))
                .unwrap();
        let forwarding = forwarding_tree(&flattened[0]);
        assert_eq!(forwarding["cache_enabled"], AttributeValue::Bool(false));
        assert_eq!(
            forwarding["cache_query_parameter_strip_directive"],
            AttributeValue::from("StripAllExcept")
        );
        assert_eq!(forwarding["cache_query_parameters"], AttributeValue::from(vec!["keep"]));
        assert_eq!(forwarding["cache_use_dynamic_compression"], AttributeValue::Bool(true));
        assert_eq!(forwarding["cache_duration"], AttributeValue::from("PT1H"));
    }

    #[test]
    fn disabled_cache_without_prior_uses_defaults() {
        let flattened =
            flatten_routing_rules(&fd(), &[response_rule("other", None)], &[], None).unwrap();
        let forwarding = forwarding_tree(&flattened[0]);
        assert_eq!(
            forwarding["cache_query_parameter_strip_directive"],
            AttributeValue::from("StripAll")
        );
        assert_eq!(forwarding["cache_query_parameters"], AttributeValue::List(vec![]));
        assert_eq!(forwarding["cache_use_dynamic_compression"], AttributeValue::Bool(false));
        assert_eq!(forwarding["cache_duration"], AttributeValue::from(""));
    }

    #[test]
    fn enabled_cache_is_split() {
        let cache = CacheConfiguration {
            query_parameter_strip_directive: None,
            query_parameters: Some("a, b,".to_owned()),
            dynamic_compression: Some(EnabledState::Enabled),
            cache_duration: Some("P1D".to_owned()),
        };
        let flattened =
            flatten_routing_rules(&fd(), &[response_rule("rule", Some(cache))], &[], None)
                .unwrap();
        let forwarding = forwarding_tree(&flattened[0]);
        assert_eq!(forwarding["cache_enabled"], AttributeValue::Bool(true));
        assert_eq!(
            forwarding["cache_query_parameter_strip_directive"],
            AttributeValue::from("StripAll")
        );
        assert_eq!(forwarding["cache_query_parameters"], AttributeValue::from(vec!["a", "b"]));
    }

    #[test]
    fn unresolvable_backend_pool_link_names_the_field() {
        let mut rule = response_rule("rule", None);
        if let Some(RouteConfiguration::Forwarding(forwarding)) = rule
            .properties
            .as_mut()
            .and_then(|properties| properties.route_configuration.as_mut())
        {
            forwarding.backend_pool = Some(SubResource::new("/subscriptions/S/resourceGroups/G"));
        }
        let err = flatten_routing_rules(&fd(), &[rule], &[], None).unwrap_err();
        assert_eq!(
            err.path().unwrap().to_string(),
            "routing_rule[0].forwarding_configuration[0].backend_pool_name"
        );
    }

    #[test]
    fn flatten_follows_the_witness() {
        let witness = vec![
            fd().routing_rule("b").to_string(),
            fd().routing_rule("a").to_string(),
        ];
        let rules = [
            response_rule("a", None),
            response_rule("new", None),
            response_rule("b", None),
        ];
        let flattened = flatten_routing_rules(&fd(), &rules, &witness, None).unwrap();
        let names: Vec<_> = flattened
            .iter()
            .map(|rule| rule["name"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(names, vec!["b", "a", "new"]);
    }
}
