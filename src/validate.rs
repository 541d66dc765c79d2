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

//! Cross-field validation of the configuration
//!
//! The checks run on the configuration as written, before defaults are
//! filled in. Problems are reported as [`Diagnostics`]; attributes whose
//! value is not known yet are skipped.

use std::{collections::BTreeSet, sync::OnceLock};

use base64::Engine;
use regex::Regex;

use crate::{
    ids::{FrontendEndpointId, ResourceId, WebApplicationFirewallPolicyId},
    models::{
        firewall_policy::{
            ActionType, ManagedRuleExclusionMatchVariable,
            ManagedRuleExclusionSelectorMatchOperator, MatchVariable, Operator, PolicyMode,
            RuleType, TransformType,
        },
        frontdoor::{
            CertificateSource, ForwardingProtocol, FrontDoorProtocol, HealthProbeMethod,
            QueryStripDirective, RedirectProtocol, RedirectType,
        },
    },
    translate::{BlockRef, TranslateError},
    value::{AttributeTree, Value},
    AttributePath, Diagnostic, Diagnostics,
};

/// Naming rule of a resource, checked with a regular expression
struct NamePattern {
    pattern: &'static str,
    rule: &'static str,
    regex: OnceLock<Result<Regex, regex::Error>>,
}

impl NamePattern {
    const fn new(pattern: &'static str, rule: &'static str) -> Self {
        Self {
            pattern,
            rule,
            regex: OnceLock::new(),
        }
    }

    fn check(&self, name: &str, path: AttributePath, diags: &mut Diagnostics) {
        match self.regex.get_or_init(|| Regex::new(self.pattern)) {
            Ok(regex) if regex.is_match(name) => (),
            Ok(_) => diags.error(
                "Invalid name",
                format!("{name:?} is invalid: {}", self.rule),
                path,
            ),
            Err(err) => diags.error("Invalid name pattern", err.to_string(), path),
        }
    }
}

static FRONT_DOOR_NAME: NamePattern = NamePattern::new(
    r"^[\da-zA-Z][-\da-zA-Z]{3,61}[\da-zA-Z]$",
    "the name must be between 5 and 63 characters long, start and end with a letter or a number, and contain only letters, numbers and hyphens",
);

static CHILD_NAME: NamePattern = NamePattern::new(
    r"^[\da-zA-Z][-\da-zA-Z]{1,88}[\da-zA-Z]$",
    "the name must be between 3 and 90 characters long, start and end with a letter or a number, and contain only letters, numbers and hyphens",
);

static FIREWALL_NAME: NamePattern = NamePattern::new(
    r"^[a-zA-Z][a-zA-Z0-9]{0,127}$",
    "the name must start with a letter, be at most 128 characters long, and contain only letters and numbers",
);

const CHILD_BLOCKS: [&str; 5] = [
    "frontend_endpoint",
    "backend_pool",
    "backend_pool_health_probe",
    "backend_pool_load_balancing",
    "routing_rule",
];

const BLOCK_RESPONSE_STATUS_CODES: [i64; 5] = [200, 403, 405, 406, 429];

/// Keep the value of a successful read, report the error otherwise
fn check<T>(diags: &mut Diagnostics, result: Result<T, TranslateError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            diags.add_error(err.into());
            None
        }
    }
}

/// Known string value of an attribute
fn known_str<'a>(
    block: &BlockRef<'a>,
    name: &'static str,
    diags: &mut Diagnostics,
) -> Option<&'a str> {
    match check(diags, block.get_str(name))? {
        Value::Value(value) => Some(value),
        _ => None,
    }
}

/// Check that an enumerated attribute holds one of its variants
fn check_enum<E>(block: &BlockRef<'_>, name: &'static str, diags: &mut Diagnostics) -> Option<E>
where
    E: std::str::FromStr<Err = crate::models::UnknownVariant>,
{
    check(diags, block.get_enum::<E>(name))?.as_option()
}

fn blocks<'a>(block: &BlockRef<'a>, name: &'static str, diags: &mut Diagnostics) -> Vec<BlockRef<'a>> {
    check(diags, block.get_blocks(name))
        .and_then(Value::as_option)
        .unwrap_or_default()
}

/// Check the names of a child list and collect them
///
/// Names are compared without case, as the API does.
fn declared_names(
    children: &[BlockRef<'_>],
    pattern: &NamePattern,
    diags: &mut Diagnostics,
) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for child in children {
        let Some(name) = known_str(child, "name", diags) else {
            continue;
        };
        pattern.check(name, child.path_of("name"), diags);
        if !names.insert(name.to_ascii_lowercase()) {
            diags.error(
                "Duplicate name",
                format!("{name:?} is declared more than once"),
                child.path_of("name"),
            );
        }
    }
    names
}

fn check_reference(
    block: &BlockRef<'_>,
    name: &'static str,
    target: &'static str,
    declared: &BTreeSet<String>,
    diags: &mut Diagnostics,
) {
    if let Some(reference) = known_str(block, name, diags) {
        if !declared.contains(&reference.to_ascii_lowercase()) {
            diags.error(
                "Undeclared reference",
                format!("{reference:?} does not match any declared {target}"),
                block.path_of(name),
            );
        }
    }
}

/// Validate the configuration of `azurerm_frontdoor`
///
/// ```
/// # use azurerm_frontdoor::{map, validate::validate_front_door, value::{AttributeTree, AttributeValue}};
/// let config: AttributeTree = map! {
///     "name" => "fd",
///     "routing_rule" => vec![AttributeValue::Map(map! { "name" => "rule" })],
/// };
/// let diags = validate_front_door(&config);
/// assert_eq!(diags.errors.len(), 2);
/// ```
pub fn validate_front_door(config: &AttributeTree) -> Diagnostics {
    let mut diags = Diagnostics::default();
    let root = BlockRef::root(config);

    if let Some(name) = known_str(&root, "name", &mut diags) {
        FRONT_DOOR_NAME.check(name, root.path_of("name"), &mut diags);
    }

    let [endpoints, pools, probes, load_balancings, rules] =
        CHILD_BLOCKS.map(|name| blocks(&root, name, &mut diags));
    let endpoint_names = declared_names(&endpoints, &CHILD_NAME, &mut diags);
    let pool_names = declared_names(&pools, &CHILD_NAME, &mut diags);
    let probe_names = declared_names(&probes, &CHILD_NAME, &mut diags);
    let load_balancing_names = declared_names(&load_balancings, &CHILD_NAME, &mut diags);
    declared_names(&rules, &CHILD_NAME, &mut diags);

    for endpoint in &endpoints {
        if let Some(link) = known_str(endpoint, "web_application_firewall_policy_link_id", &mut diags)
            .filter(|link| !link.is_empty())
        {
            if let Err(err) = WebApplicationFirewallPolicyId::parse(link) {
                diags.add_error(Diagnostic::new(
                    "Invalid resource id",
                    err.to_string(),
                    endpoint.path_of("web_application_firewall_policy_link_id"),
                ));
            }
        }
    }

    for pool in &pools {
        check_reference(pool, "health_probe_name", "backend_pool_health_probe", &probe_names, &mut diags);
        check_reference(
            pool,
            "load_balancing_name",
            "backend_pool_load_balancing",
            &load_balancing_names,
            &mut diags,
        );
    }

    for probe in &probes {
        check_enum::<FrontDoorProtocol>(probe, "protocol", &mut diags);
        check_enum::<HealthProbeMethod>(probe, "probe_method", &mut diags);
    }

    for rule in &rules {
        validate_routing_rule(rule, &endpoint_names, &pool_names, &mut diags);
    }

    diags
}

fn validate_routing_rule(
    rule: &BlockRef<'_>,
    endpoint_names: &BTreeSet<String>,
    pool_names: &BTreeSet<String>,
    diags: &mut Diagnostics,
) {
    if let Some(Value::Value(endpoints)) = check(diags, rule.get_strings("frontend_endpoints")) {
        for (i, endpoint) in endpoints.into_iter().enumerate() {
            if !endpoint_names.contains(&endpoint.to_ascii_lowercase()) {
                diags.error(
                    "Undeclared reference",
                    format!("{endpoint:?} does not match any declared frontend_endpoint"),
                    rule.path_of("frontend_endpoints").index(i),
                );
            }
        }
    }
    check(diags, rule.enums::<FrontDoorProtocol>("accepted_protocols"));

    let redirect = check(diags, rule.get_blocks("redirect_configuration")).unwrap_or(Value::Unknown);
    let forwarding =
        check(diags, rule.get_blocks("forwarding_configuration")).unwrap_or(Value::Unknown);
    if !redirect.is_unknown() && !forwarding.is_unknown() {
        let count = |list: &Value<Vec<BlockRef<'_>>>| list.as_ref().map(Vec::len).unwrap_or(0);
        if count(&redirect) + count(&forwarding) != 1 {
            diags.error(
                "Invalid routing rule",
                "exactly one of `redirect_configuration` or `forwarding_configuration` must be set",
                rule.path().clone(),
            );
        }
    }
    let redirect = redirect.unwrap_or_default();
    let forwarding = forwarding.unwrap_or_default();

    for redirect in &redirect {
        check_enum::<RedirectType>(redirect, "redirect_type", diags);
        check_enum::<RedirectProtocol>(redirect, "redirect_protocol", diags);
    }

    for forwarding in &forwarding {
        check_reference(forwarding, "backend_pool_name", "backend_pool", pool_names, diags);
        check_enum::<ForwardingProtocol>(forwarding, "forwarding_protocol", diags);
        let directive = check_enum::<QueryStripDirective>(
            forwarding,
            "cache_query_parameter_strip_directive",
            diags,
        )
        .unwrap_or(QueryStripDirective::StripAll);
        let parameters = match check(diags, forwarding.get_strings("cache_query_parameters")) {
            Some(Value::Value(parameters)) => parameters.len(),
            Some(Value::Unknown) | None => continue,
            Some(Value::Null) => 0,
        };
        match (directive.takes_parameters(), parameters) {
            (true, 0) => diags.error(
                "Missing cache query parameters",
                format!("`cache_query_parameters` must be set when the strip directive is {directive}"),
                forwarding.path_of("cache_query_parameters"),
            ),
            (false, n) if n > 0 => diags.error(
                "Unexpected cache query parameters",
                format!("`cache_query_parameters` cannot be set when the strip directive is {directive}"),
                forwarding.path_of("cache_query_parameters"),
            ),
            _ => (),
        }
    }
}

/// Validate the configuration of `azurerm_frontdoor_custom_https_configuration`
pub fn validate_custom_https_configuration(config: &AttributeTree) -> Diagnostics {
    let mut diags = Diagnostics::default();
    let root = BlockRef::root(config);

    if let Some(id) = known_str(&root, "frontend_endpoint_id", &mut diags) {
        if let Err(err) = FrontendEndpointId::parse(id) {
            diags.add_error(Diagnostic::new(
                "Invalid resource id",
                err.to_string(),
                root.path_of("frontend_endpoint_id"),
            ));
        }
    }

    let configurations = check(&mut diags, root.get_blocks("custom_https_configuration"))
        .unwrap_or(Value::Unknown);
    if let Some(Value::Value(true)) = check(&mut diags, root.get_bool("custom_https_provisioning_enabled")) {
        let missing = match &configurations {
            Value::Value(configurations) => configurations.is_empty(),
            Value::Null => true,
            Value::Unknown => false,
        };
        if missing {
            diags.error(
                "Missing custom HTTPS configuration",
                "`custom_https_configuration` must be set when `custom_https_provisioning_enabled` is true",
                root.path_of("custom_https_configuration"),
            );
        }
    }

    for configuration in &configurations.unwrap_or_default() {
        let source = match check(
            &mut diags,
            configuration.get_enum::<CertificateSource>("certificate_source"),
        ) {
            Some(Value::Value(source)) => source,
            Some(Value::Null) => CertificateSource::FrontDoor,
            Some(Value::Unknown) | None => continue,
        };
        let key_vault_fields = [
            "azure_key_vault_certificate_vault_id",
            "azure_key_vault_certificate_secret_name",
            "azure_key_vault_certificate_secret_version",
        ];
        for field in key_vault_fields {
            let value = check(&mut diags, configuration.get_str(field)).unwrap_or(Value::Unknown);
            let is_set = matches!(value, Value::Value(value) if !value.is_empty());
            let is_missing = matches!(value, Value::Null) || matches!(value, Value::Value(""));
            match source {
                CertificateSource::AzureKeyVault
                    if is_missing && field != "azure_key_vault_certificate_secret_version" =>
                {
                    diags.error(
                        "Missing key vault parameter",
                        format!("`{field}` is required when the certificate source is AzureKeyVault"),
                        configuration.path_of(field),
                    );
                }
                CertificateSource::FrontDoor if is_set => {
                    diags.error(
                        "Unexpected key vault parameter",
                        format!("`{field}` cannot be set when the certificate source is FrontDoor"),
                        configuration.path_of(field),
                    );
                }
                _ => (),
            }
        }
    }

    diags
}

/// Validate the configuration of `azurerm_frontdoor_firewall_policy`
pub fn validate_firewall_policy(config: &AttributeTree) -> Diagnostics {
    let mut diags = Diagnostics::default();
    let root = BlockRef::root(config);

    if let Some(name) = known_str(&root, "name", &mut diags) {
        FIREWALL_NAME.check(name, root.path_of("name"), &mut diags);
    }
    check_enum::<PolicyMode>(&root, "mode", &mut diags);

    if let Some(Value::Value(code)) = check(&mut diags, root.get_int("custom_block_response_status_code")) {
        if !BLOCK_RESPONSE_STATUS_CODES.contains(&code) {
            diags.error(
                "Invalid status code",
                format!(
                    "{code} is not one of {}",
                    BLOCK_RESPONSE_STATUS_CODES.map(|code| code.to_string()).join(", ")
                ),
                root.path_of("custom_block_response_status_code"),
            );
        }
    }
    if let Some(body) = known_str(&root, "custom_block_response_body", &mut diags) {
        if let Err(err) = base64::engine::general_purpose::STANDARD.decode(body) {
            diags.error(
                "Invalid block response body",
                format!("`custom_block_response_body` must be base64 encoded: {err}"),
                root.path_of("custom_block_response_body"),
            );
        }
    }

    let mut redirects = Vec::new();
    let rules = blocks(&root, "custom_rule", &mut diags);
    declared_names(&rules, &FIREWALL_NAME, &mut diags);
    for rule in &rules {
        if check_enum::<ActionType>(rule, "action", &mut diags) == Some(ActionType::Redirect) {
            redirects.push(rule.path_of("action"));
        }
        if check_enum::<RuleType>(rule, "type", &mut diags) == Some(RuleType::RateLimitRule) {
            match check(&mut diags, rule.get_int("rate_limit_threshold")) {
                Some(Value::Null) => diags.error(
                    "Missing rate limit threshold",
                    "`rate_limit_threshold` is required for a RateLimitRule",
                    rule.path_of("rate_limit_threshold"),
                ),
                Some(Value::Value(threshold)) if threshold < 1 => diags.error(
                    "Invalid rate limit threshold",
                    format!("`rate_limit_threshold` must be at least 1, found {threshold}"),
                    rule.path_of("rate_limit_threshold"),
                ),
                _ => (),
            }
        }
        for condition in blocks(rule, "match_condition", &mut diags) {
            check_enum::<MatchVariable>(&condition, "match_variable", &mut diags);
            check_enum::<Operator>(&condition, "operator", &mut diags);
            check(&mut diags, condition.enums::<TransformType>("transforms"));
        }
    }

    for managed in blocks(&root, "managed_rule", &mut diags) {
        let mut exclusions = blocks(&managed, "exclusion", &mut diags);
        for group in blocks(&managed, "override", &mut diags) {
            exclusions.extend(blocks(&group, "exclusion", &mut diags));
            for rule in blocks(&group, "rule", &mut diags) {
                if check_enum::<ActionType>(&rule, "action", &mut diags) == Some(ActionType::Redirect) {
                    redirects.push(rule.path_of("action"));
                }
                exclusions.extend(blocks(&rule, "exclusion", &mut diags));
            }
        }
        for exclusion in &exclusions {
            check_enum::<ManagedRuleExclusionMatchVariable>(exclusion, "match_variable", &mut diags);
            check_enum::<ManagedRuleExclusionSelectorMatchOperator>(exclusion, "operator", &mut diags);
        }
    }

    let redirect_url = check(&mut diags, root.get_str("redirect_url"));
    let has_redirect_url = match redirect_url {
        Some(Value::Value(url)) => !url.is_empty(),
        Some(Value::Null) => false,
        Some(Value::Unknown) | None => true,
    };
    if !has_redirect_url {
        for path in redirects {
            diags.error(
                "Missing redirect URL",
                "`redirect_url` must be set when a rule uses the Redirect action",
                path,
            );
        }
    }

    diags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{map, value::AttributeValue};

    fn front_door() -> AttributeTree {
        map! {
            "name" => "my-front-door",
            "frontend_endpoint" => vec![AttributeValue::Map(map! {
                "name" => "fe-main",
                "host_name" => "my-front-door.azurefd.net",
            })],
            "backend_pool_health_probe" => vec![AttributeValue::Map(map! { "name" => "probe" })],
            "backend_pool_load_balancing" => vec![AttributeValue::Map(map! { "name" => "lb1" })],
            "backend_pool" => vec![AttributeValue::Map(map! {
                "name" => "pool",
                "health_probe_name" => "probe",
                "load_balancing_name" => "lb1",
            })],
            "routing_rule" => vec![AttributeValue::Map(map! {
                "name" => "rule",
                "frontend_endpoints" => vec!["fe-main"],
                "accepted_protocols" => vec!["Http", "Https"],
                "forwarding_configuration" => AttributeValue::single(map! {
                    "backend_pool_name" => "pool",
                }),
            })],
        }
    }

    fn routing_rule(config: &mut AttributeTree) -> &mut AttributeTree {
        config
            .get_mut("routing_rule")
            .and_then(AttributeValue::as_list_mut)
            .and_then(|rules| rules[0].as_map_mut())
            .unwrap()
    }

    fn paths(diags: &Diagnostics) -> Vec<String> {
        diags.errors.iter().map(|d| d.attribute.to_string()).collect()
    }

    #[test]
    fn valid_front_door_passes() {
        let diags = validate_front_door(&front_door());
        assert!(!diags.has_errors(), "{diags}");
    }

    #[test]
    fn both_route_configurations_are_rejected() {
        let mut config = front_door();
        routing_rule(&mut config).insert(
            "redirect_configuration".to_owned(),
            AttributeValue::single(map! {
                "redirect_type" => "Found",
                "redirect_protocol" => "HttpsOnly",
            }),
        );
        let diags = validate_front_door(&config);
        assert_eq!(paths(&diags), vec!["routing_rule[0]"]);
    }

    #[test]
    fn undeclared_references_are_reported() {
        let mut config = front_door();
        let rule = routing_rule(&mut config);
        rule.insert("frontend_endpoints".to_owned(), vec!["FE-MAIN", "other"].into());
        rule.insert(
            "forwarding_configuration".to_owned(),
            AttributeValue::single(map! { "backend_pool_name" => "missing" }),
        );
        let diags = validate_front_door(&config);
        assert_eq!(
            paths(&diags),
            vec![
                "routing_rule[0].frontend_endpoints[1]",
                "routing_rule[0].forwarding_configuration[0].backend_pool_name",
            ]
        );
    }

    #[test]
    fn cache_parameters_follow_the_directive() {
        let mut config = front_door();
        routing_rule(&mut config).insert(
            "forwarding_configuration".to_owned(),
            AttributeValue::single(map! {
                "backend_pool_name" => "pool",
                "cache_enabled" => true,
                "cache_query_parameter_strip_directive" => "StripOnly",
            }),
        );
        let diags = validate_front_door(&config);
        assert_eq!(diags.errors[0].summary, "Missing cache query parameters");

        routing_rule(&mut config).insert(
            "forwarding_configuration".to_owned(),
            AttributeValue::single(map! {
                "backend_pool_name" => "pool",
                "cache_query_parameter_strip_directive" => "StripNone",
                "cache_query_parameters" => vec!["a"],
            }),
        );
        let diags = validate_front_door(&config);
        assert_eq!(diags.errors[0].summary, "Unexpected cache query parameters");
    }

    #[test]
    fn names_and_duplicates_are_checked() {
        let mut config = front_door();
        config.insert("name".to_owned(), "fd".into());
        config.insert(
            "backend_pool_load_balancing".to_owned(),
            vec![
                AttributeValue::Map(map! { "name" => "lb1" }),
                AttributeValue::Map(map! { "name" => "LB1" }),
            ]
            .into(),
        );
        let diags = validate_front_door(&config);
        assert_eq!(
            paths(&diags),
            vec!["name", "backend_pool_load_balancing[1].name"]
        );
        assert_eq!(diags.errors[1].summary, "Duplicate name");
    }

    #[test]
    fn firewall_link_must_be_canonical() {
        let mut config = front_door();
        config.insert(
            "frontend_endpoint".to_owned(),
            vec![AttributeValue::Map(map! {
                "name" => "fe-main",
                "web_application_firewall_policy_link_id" =>
                    "/subscriptions/S/resourcegroups/G/providers/Microsoft.Network/frontDoorWebApplicationFirewallPolicies/waf",
            })]
            .into(),
        );
        let diags = validate_front_door(&config);
        assert_eq!(
            paths(&diags),
            vec!["frontend_endpoint[0].web_application_firewall_policy_link_id"]
        );
    }

    #[test]
    fn unknown_values_are_skipped() {
        let mut config = front_door();
        config.insert("name".to_owned(), AttributeValue::Unknown);
        routing_rule(&mut config).insert("frontend_endpoints".to_owned(), AttributeValue::Unknown);
        assert!(!validate_front_door(&config).has_errors());
    }

    #[test]
    fn unknown_route_configuration_is_not_counted() {
        let mut config = front_door();
        routing_rule(&mut config)
            .insert("forwarding_configuration".to_owned(), AttributeValue::Unknown);
        assert!(!validate_front_door(&config).has_errors());

        let rule = routing_rule(&mut config);
        rule.insert("forwarding_configuration".to_owned(), AttributeValue::Null);
        rule.insert("redirect_configuration".to_owned(), AttributeValue::Unknown);
        assert!(!validate_front_door(&config).has_errors());

        routing_rule(&mut config).remove("redirect_configuration");
        assert_eq!(paths(&validate_front_door(&config)), vec!["routing_rule[0]"]);
    }

    const ENDPOINT: &str =
        "/subscriptions/S/resourceGroups/G/providers/Microsoft.Network/frontDoors/FD1/frontendEndpoints/fe";

    #[test]
    fn key_vault_source_requires_vault_and_secret() {
        let config: AttributeTree = map! {
            "frontend_endpoint_id" => ENDPOINT,
            "custom_https_provisioning_enabled" => true,
            "custom_https_configuration" => AttributeValue::single(map! {
                "certificate_source" => "AzureKeyVault",
                "azure_key_vault_certificate_secret_name" => "cert",
            }),
        };
        let diags = validate_custom_https_configuration(&config);
        assert_eq!(
            paths(&diags),
            vec!["custom_https_configuration[0].azure_key_vault_certificate_vault_id"]
        );
    }

    #[test]
    fn front_door_source_forbids_key_vault() {
        let config: AttributeTree = map! {
            "frontend_endpoint_id" => ENDPOINT.to_lowercase(),
            "custom_https_provisioning_enabled" => true,
            "custom_https_configuration" => AttributeValue::single(map! {
                "certificate_source" => "FrontDoor",
                "azure_key_vault_certificate_secret_name" => "cert",
            }),
        };
        let diags = validate_custom_https_configuration(&config);
        assert_eq!(
            paths(&diags),
            vec![
                "frontend_endpoint_id",
                "custom_https_configuration[0].azure_key_vault_certificate_secret_name",
            ]
        );
    }

    #[test]
    fn unknown_certificate_source_skips_key_vault_checks() {
        let config: AttributeTree = map! {
            "frontend_endpoint_id" => ENDPOINT,
            "custom_https_provisioning_enabled" => true,
            "custom_https_configuration" => AttributeValue::single(map! {
                "certificate_source" => AttributeValue::Unknown,
                "azure_key_vault_certificate_vault_id" => "/subscriptions/S/resourceGroups/G/providers/Microsoft.KeyVault/vaults/kv",
                "azure_key_vault_certificate_secret_name" => "cert",
            }),
        };
        assert!(!validate_custom_https_configuration(&config).has_errors());
    }

    #[test]
    fn unknown_configuration_block_is_not_missing() {
        let config: AttributeTree = map! {
            "frontend_endpoint_id" => ENDPOINT,
            "custom_https_provisioning_enabled" => true,
            "custom_https_configuration" => AttributeValue::Unknown,
        };
        assert!(!validate_custom_https_configuration(&config).has_errors());
    }

    #[test]
    fn absent_certificate_source_defaults_to_front_door() {
        let config: AttributeTree = map! {
            "frontend_endpoint_id" => ENDPOINT,
            "custom_https_configuration" => AttributeValue::single(map! {
                "azure_key_vault_certificate_secret_name" => "cert",
            }),
        };
        assert_eq!(
            paths(&validate_custom_https_configuration(&config)),
            vec!["custom_https_configuration[0].azure_key_vault_certificate_secret_name"]
        );
    }

    #[test]
    fn enabled_provisioning_requires_configuration() {
        let config: AttributeTree = map! {
            "frontend_endpoint_id" => ENDPOINT,
            "custom_https_provisioning_enabled" => true,
        };
        let diags = validate_custom_https_configuration(&config);
        assert_eq!(paths(&diags), vec!["custom_https_configuration"]);
    }

    #[test]
    fn firewall_policy_rules() {
        let config: AttributeTree = map! {
            "name" => "waf-policy",
            "custom_block_response_status_code" => 404i64,
            "custom_block_response_body" => "not base64!",
            "custom_rule" => vec![
                AttributeValue::Map(map! {
                    "name" => "Rate",
                    "type" => "RateLimitRule",
                    "action" => "Redirect",
                    "rate_limit_threshold" => AttributeValue::Null,
                }),
            ],
        };
        let diags = validate_firewall_policy(&config);
        assert_eq!(
            paths(&diags),
            vec![
                "name",
                "custom_block_response_status_code",
                "custom_block_response_body",
                "custom_rule[0].rate_limit_threshold",
                "custom_rule[0].action",
            ]
        );
    }

    #[test]
    fn valid_firewall_policy_passes() {
        let config: AttributeTree = map! {
            "name" => "wafPolicy",
            "mode" => "Detection",
            "redirect_url" => "https://www.contoso.com",
            "custom_block_response_status_code" => 403i64,
            "custom_block_response_body" => "PGh0bWw+CjxoZWFkZXI+PHRpdGxlPkhlbGxvPC90aXRsZT48L2hlYWRlcj4KPC9odG1sPg==",
            "custom_rule" => vec![AttributeValue::Map(map! {
                "name" => "Rule1",
                "type" => "MatchRule",
                "action" => "Redirect",
                "match_condition" => vec![AttributeValue::Map(map! {
                    "match_variable" => "RemoteAddr",
                    "operator" => "IPMatch",
                    "match_values" => vec!["192.168.1.0/24"],
                    "transforms" => vec!["Lowercase"],
                })],
            })],
            "managed_rule" => vec![AttributeValue::Map(map! {
                "type" => "DefaultRuleSet",
                "version" => "1.0",
                "exclusion" => vec![AttributeValue::Map(map! {
                    "match_variable" => "QueryStringArgNames",
                    "operator" => "Equals",
                    "selector" => "not_suspicious",
                })],
            })],
        };
        let diags = validate_firewall_policy(&config);
        assert!(!diags.has_errors(), "{diags}");
    }
}
