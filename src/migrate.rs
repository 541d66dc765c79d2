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

//! State migration
//!
//! Older states may hold identifiers in any of the casings the API used to
//! return. Upgrading a state rewrites every stored identifier into its
//! canonical casing, and moves attributes whose place changed between schema
//! versions.

use crate::{
    ids::{
        canonicalize, ChildKind, CustomHttpsConfigurationId, FrontDoorChildId, FrontDoorId,
        FrontendEndpointId, IdError, WebApplicationFirewallPolicyId,
    },
    schema::{CUSTOM_HTTPS_SCHEMA_VERSION, FIREWALL_POLICY_SCHEMA_VERSION, FRONT_DOOR_SCHEMA_VERSION},
    translate::EXPLICIT_RESOURCE_ORDER,
    value::{AttributeTree, AttributeValue},
    AttributePath, Diagnostic,
};

/// Errors raised while upgrading a stored state
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MigrateError {
    #[error("{resource} state version {version} is not supported, the latest version is {latest}")]
    UnsupportedVersion {
        resource: &'static str,
        version: i64,
        latest: i64,
    },
    #[error("{resource:?} is neither a resource type nor a Front Door child kind")]
    UnknownResource { resource: String },
    #[error("`{path}` holds the id {id:?} that cannot be recovered")]
    Unresolvable {
        path: AttributePath,
        id: String,
        #[source]
        source: IdError,
    },
}

impl From<MigrateError> for Diagnostic {
    fn from(err: MigrateError) -> Self {
        match &err {
            MigrateError::UnsupportedVersion { .. } => {
                Diagnostic::root("Unsupported state version", err.to_string())
            }
            MigrateError::UnknownResource { .. } => {
                Diagnostic::root("Unknown resource", err.to_string())
            }
            MigrateError::Unresolvable { path, source, .. } => Diagnostic::new(
                "Unresolvable resource id",
                format!("{err}: {source}"),
                path.clone(),
            ),
        }
    }
}

const CHILD_LISTS: [(ChildKind, &str, &str, &str); 5] = [
    (ChildKind::BackendPool, "backend_pool", "backend_pools", "backend_pool_ids"),
    (
        ChildKind::FrontendEndpoint,
        "frontend_endpoint",
        "frontend_endpoints",
        "frontend_endpoint_ids",
    ),
    (ChildKind::RoutingRule, "routing_rule", "routing_rules", "routing_rule_ids"),
    (
        ChildKind::HealthProbe,
        "backend_pool_health_probe",
        "backend_pool_health_probes",
        "backend_pool_health_probe_ids",
    ),
    (
        ChildKind::LoadBalancing,
        "backend_pool_load_balancing",
        "backend_pool_load_balancing_settings",
        "backend_pool_load_balancing_ids",
    ),
];

/// Backend settings stored at the root of version 0 states
const LEGACY_BACKEND_SETTINGS: [&str; 2] = [
    "enforce_backend_pools_certificate_name_check",
    "backend_pools_send_receive_timeout_seconds",
];

fn check_version(resource: &'static str, version: i64, latest: i64) -> Result<(), MigrateError> {
    if (0..=latest).contains(&version) {
        Ok(())
    } else {
        Err(MigrateError::UnsupportedVersion {
            resource,
            version,
            latest,
        })
    }
}

/// Rewrite the id held by `value` with `parse`
///
/// Anything but a non-empty string is left untouched.
fn rewrite(
    value: &mut AttributeValue,
    path: AttributePath,
    parse: impl Fn(&str) -> Result<String, IdError>,
) -> Result<(), MigrateError> {
    if let AttributeValue::String(raw) = value {
        if !raw.is_empty() {
            *raw = parse(raw).map_err(|source| MigrateError::Unresolvable {
                path,
                id: raw.clone(),
                source,
            })?;
        }
    }
    Ok(())
}

fn rewrite_child(kind: ChildKind) -> impl Fn(&str) -> Result<String, IdError> {
    move |raw| {
        let id = FrontDoorChildId::parse_insensitive(kind, raw)?.to_string();
        if id != raw {
            tracing::debug!(from = raw, to = %id, %kind, "rewrote child id into canonical casing");
        }
        Ok(id)
    }
}

fn rewrite_list(
    value: &mut AttributeValue,
    path: &AttributePath,
    parse: impl Fn(&str) -> Result<String, IdError>,
) -> Result<(), MigrateError> {
    if let Some(items) = value.as_list_mut() {
        for (i, item) in items.iter_mut().enumerate() {
            rewrite(item, path.clone().index(i), &parse)?;
        }
    }
    Ok(())
}

fn blocks_mut<'a>(
    state: &'a mut AttributeTree,
    name: &str,
) -> impl Iterator<Item = (usize, &'a mut AttributeTree)> {
    state
        .get_mut(name)
        .and_then(AttributeValue::as_list_mut)
        .into_iter()
        .flatten()
        .filter_map(AttributeValue::as_map_mut)
        .enumerate()
}

/// Upgrade a stored `azurerm_frontdoor` state to the latest schema version
///
/// ```
/// # use azurerm_frontdoor::{map, migrate::upgrade_front_door_state, value::AttributeTree};
/// let state: AttributeTree = map! {
///     "id" => "/subscriptions/S/resourcegroups/G/providers/Microsoft.Network/Frontdoors/FD1",
/// };
/// let upgraded = upgrade_front_door_state(1, state).unwrap();
/// assert_eq!(
///     upgraded["id"].as_str(),
///     Some("/subscriptions/S/resourceGroups/G/providers/Microsoft.Network/frontDoors/FD1")
/// );
/// ```
pub fn upgrade_front_door_state(
    version: i64,
    mut state: AttributeTree,
) -> Result<AttributeTree, MigrateError> {
    check_version("azurerm_frontdoor", version, FRONT_DOOR_SCHEMA_VERSION)?;

    if version == 0 {
        let mut settings = AttributeTree::new();
        for name in LEGACY_BACKEND_SETTINGS {
            if let Some(value) = state.remove(name) {
                settings.insert(name.to_owned(), value);
            }
        }
        let has_block = state
            .get("backend_pool_settings")
            .and_then(AttributeValue::as_list)
            .is_some_and(|blocks| !blocks.is_empty());
        if !settings.is_empty() && !has_block {
            tracing::debug!("moved the backend settings into the backend_pool_settings block");
            state.insert(
                "backend_pool_settings".to_owned(),
                AttributeValue::single(settings),
            );
        }
    }

    if let Some(id) = state.get_mut("id") {
        rewrite(id, AttributePath::new("id"), canonicalize::<FrontDoorId>)?;
    }

    for (kind, block, computed, witness) in CHILD_LISTS {
        for (i, child) in blocks_mut(&mut state, block) {
            let path = AttributePath::new(block).index(i);
            if let Some(id) = child.get_mut("id") {
                rewrite(id, path.clone().attribute("id"), rewrite_child(kind))?;
            }
            if kind == ChildKind::FrontendEndpoint {
                if let Some(link) = child.get_mut("web_application_firewall_policy_link_id") {
                    rewrite(
                        link,
                        path.attribute("web_application_firewall_policy_link_id"),
                        canonicalize::<WebApplicationFirewallPolicyId>,
                    )?;
                }
            }
        }

        if let Some(ids) = state.get_mut(computed).and_then(AttributeValue::as_map_mut) {
            for (name, id) in ids.iter_mut() {
                rewrite(
                    id,
                    AttributePath::new(computed).key(name.clone()),
                    rewrite_child(kind),
                )?;
            }
        }

        for (i, order) in blocks_mut(&mut state, EXPLICIT_RESOURCE_ORDER) {
            if let Some(ids) = order.get_mut(witness) {
                let path = AttributePath::new(EXPLICIT_RESOURCE_ORDER)
                    .index(i)
                    .attribute(witness);
                rewrite_list(ids, &path, rewrite_child(kind))?;
            }
        }
    }

    Ok(state)
}

/// Upgrade a stored `azurerm_frontdoor_custom_https_configuration` state
pub fn upgrade_custom_https_state(
    version: i64,
    mut state: AttributeTree,
) -> Result<AttributeTree, MigrateError> {
    check_version(
        "azurerm_frontdoor_custom_https_configuration",
        version,
        CUSTOM_HTTPS_SCHEMA_VERSION,
    )?;
    if let Some(id) = state.get_mut("id") {
        rewrite(
            id,
            AttributePath::new("id"),
            canonicalize::<CustomHttpsConfigurationId>,
        )?;
    }
    if let Some(id) = state.get_mut("frontend_endpoint_id") {
        rewrite(
            id,
            AttributePath::new("frontend_endpoint_id"),
            canonicalize::<FrontendEndpointId>,
        )?;
    }
    Ok(state)
}

/// Upgrade a stored `azurerm_frontdoor_firewall_policy` state
pub fn upgrade_firewall_policy_state(
    version: i64,
    mut state: AttributeTree,
) -> Result<AttributeTree, MigrateError> {
    check_version(
        "azurerm_frontdoor_firewall_policy",
        version,
        FIREWALL_POLICY_SCHEMA_VERSION,
    )?;
    if let Some(id) = state.get_mut("id") {
        rewrite(
            id,
            AttributePath::new("id"),
            canonicalize::<WebApplicationFirewallPolicyId>,
        )?;
    }
    if let Some(ids) = state.get_mut("frontend_endpoint_ids") {
        rewrite_list(
            ids,
            &AttributePath::new("frontend_endpoint_ids"),
            canonicalize::<FrontendEndpointId>,
        )?;
    }
    Ok(state)
}

/// Canonical form of a single identifier
///
/// `resource` is either the name of the resource type owning the id, or the
/// segment label of a Front Door child (`backendPools`, `routingRules`...).
pub fn canonicalize_id(resource: &str, id: &str) -> Result<String, MigrateError> {
    let path = AttributePath::new("id");
    let mut value = AttributeValue::from(id);
    match resource {
        "azurerm_frontdoor" => rewrite(&mut value, path, canonicalize::<FrontDoorId>)?,
        "azurerm_frontdoor_custom_https_configuration" => {
            rewrite(&mut value, path, canonicalize::<CustomHttpsConfigurationId>)?
        }
        "azurerm_frontdoor_firewall_policy" => {
            rewrite(&mut value, path, canonicalize::<WebApplicationFirewallPolicyId>)?
        }
        _ => {
            let kind = ChildKind::ALL
                .into_iter()
                .find(|kind| kind.label().canonical == resource)
                .ok_or_else(|| MigrateError::UnknownResource {
                    resource: resource.to_owned(),
                })?;
            rewrite(&mut value, path, rewrite_child(kind))?
        }
    }
    Ok(value.as_str().unwrap_or(id).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map;

    fn legacy_front_door() -> AttributeTree {
        map! {
            "id" => "/subscriptions/S/resourcegroups/G/providers/Microsoft.Network/Frontdoors/FD1",
            "enforce_backend_pools_certificate_name_check" => false,
            "backend_pools_send_receive_timeout_seconds" => 120i64,
            "backend_pool" => vec![AttributeValue::Map(map! {
                "id" => "/subscriptions/S/resourceGroups/G/providers/Microsoft.Network/frontdoors/FD1/BackendPools/pool",
                "name" => "pool",
            })],
            "frontend_endpoint" => vec![AttributeValue::Map(map! {
                "id" => "/subscriptions/S/resourceGroups/G/providers/Microsoft.Network/Frontdoors/FD1/FrontendEndpoints/fe",
                "name" => "fe",
                "web_application_firewall_policy_link_id" =>
                    "/subscriptions/S/resourcegroups/G/providers/Microsoft.Network/frontdoorwebapplicationfirewallpolicies/waf",
            })],
            "backend_pools" => AttributeValue::Map(map! {
                "pool" => "/subscriptions/S/resourceGroups/G/providers/Microsoft.Network/frontDoors/FD1/backendpools/pool",
            }),
            EXPLICIT_RESOURCE_ORDER => AttributeValue::single(map! {
                "routing_rule_ids" => vec![
                    "/subscriptions/S/resourceGroups/G/providers/Microsoft.Network/frontDoors/FD1/RoutingRules/rule",
                ],
            }),
        }
    }

    fn fd() -> FrontDoorId {
        FrontDoorId::new("S", "G", "FD1")
    }

    #[test]
    fn version_0_front_door_is_upgraded() {
        let state = upgrade_front_door_state(0, legacy_front_door()).unwrap();
        assert_eq!(state["id"], AttributeValue::from(fd().to_string()));
        assert!(!state.contains_key("enforce_backend_pools_certificate_name_check"));
        assert_eq!(
            state["backend_pool_settings"],
            AttributeValue::single(map! {
                "enforce_backend_pools_certificate_name_check" => false,
                "backend_pools_send_receive_timeout_seconds" => 120i64,
            })
        );

        let pool = state["backend_pool"].as_list().unwrap()[0].as_map().unwrap();
        assert_eq!(pool["id"], AttributeValue::from(fd().backend_pool("pool").to_string()));
        let endpoint = state["frontend_endpoint"].as_list().unwrap()[0].as_map().unwrap();
        assert_eq!(
            endpoint["id"],
            AttributeValue::from(fd().frontend_endpoint("fe").to_string())
        );
        assert_eq!(
            endpoint["web_application_firewall_policy_link_id"],
            AttributeValue::from(WebApplicationFirewallPolicyId::new("S", "G", "waf").to_string())
        );
        assert_eq!(
            state["backend_pools"].as_map().unwrap()["pool"],
            AttributeValue::from(fd().backend_pool("pool").to_string())
        );
        let order = state[EXPLICIT_RESOURCE_ORDER].as_list().unwrap()[0].as_map().unwrap();
        assert_eq!(
            order["routing_rule_ids"],
            AttributeValue::from(vec![fd().routing_rule("rule").to_string()])
        );
    }

    #[test]
    fn upgrade_is_idempotent() {
        let once = upgrade_front_door_state(0, legacy_front_door()).unwrap();
        let twice = upgrade_front_door_state(FRONT_DOOR_SCHEMA_VERSION, once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn existing_settings_block_wins() {
        let mut state = legacy_front_door();
        let block = AttributeValue::single(map! {
            "enforce_backend_pools_certificate_name_check" => true,
            "backend_pools_send_receive_timeout_seconds" => 60i64,
        });
        state.insert("backend_pool_settings".to_owned(), block.clone());
        let state = upgrade_front_door_state(0, state).unwrap();
        assert_eq!(state["backend_pool_settings"], block);
        assert!(!state.contains_key("backend_pools_send_receive_timeout_seconds"));
    }

    #[test]
    fn unknown_versions_are_rejected() {
        let err = upgrade_front_door_state(7, AttributeTree::new()).unwrap_err();
        assert_eq!(
            err,
            MigrateError::UnsupportedVersion {
                resource: "azurerm_frontdoor",
                version: 7,
                latest: 1,
            }
        );
        assert!(upgrade_firewall_policy_state(-1, AttributeTree::new()).is_err());
    }

    #[test]
    fn unrecognized_casing_is_reported_with_its_path() {
        let state: AttributeTree = map! {
            "frontend_endpoint_ids" => vec![
                "/subscriptions/S/resourceGroups/G/providers/Microsoft.Network/frontDoors/FD1/frontendEndpoints/fe",
                "/subscriptions/S/resourceGroups/G/providers/Microsoft.Network/FRONTDOORS/FD1/frontendEndpoints/fe",
            ],
        };
        let err = upgrade_firewall_policy_state(1, state).unwrap_err();
        let MigrateError::Unresolvable { path, .. } = &err else {
            panic!("unexpected error {err:?}");
        };
        assert_eq!(path.to_string(), "frontend_endpoint_ids[1]");
        let diag = Diagnostic::from(err.clone());
        assert_eq!(diag.attribute.to_string(), "frontend_endpoint_ids[1]");
    }

    #[test]
    fn custom_https_ids_are_canonicalized() {
        let state: AttributeTree = map! {
            "id" => "/subscriptions/S/resourceGroups/G/providers/Microsoft.Network/frontdoors/FD1/customHttpsConfiguration/fe",
            "frontend_endpoint_id" => "/subscriptions/S/resourceGroups/G/providers/Microsoft.Network/frontdoors/FD1/frontendendpoints/fe",
        };
        let state = upgrade_custom_https_state(0, state).unwrap();
        assert_eq!(
            state["id"],
            AttributeValue::from(fd().custom_https_configuration("fe").to_string())
        );
        assert_eq!(
            state["frontend_endpoint_id"],
            AttributeValue::from(fd().frontend_endpoint("fe").to_string())
        );
    }

    #[test]
    fn single_ids_are_canonicalized() {
        let id = canonicalize_id(
            "backendPools",
            "/subscriptions/S/resourceGroups/G/providers/Microsoft.Network/frontdoors/FD1/backendpools/pool",
        )
        .unwrap();
        assert_eq!(id, fd().backend_pool("pool").to_string());
    }
}
