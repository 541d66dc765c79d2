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
        frontdoor::{BackendPoolsSettings, FrontDoor, FrontDoorProperties},
        EnabledState,
    },
    value::{AttributeTree, AttributeValue},
};

use super::{
    backend_pool::{
        expand_backend_pools, expand_health_probes, expand_load_balancings,
        flatten_backend_pools, flatten_health_probes, flatten_load_balancings,
    },
    frontend_endpoint::{expand_frontend_endpoints, flatten_frontend_endpoints},
    id_of,
    ordering::EXPLICIT_RESOURCE_ORDER,
    routing_rule::{expand_routing_rules, flatten_routing_rules},
    BlockRef, OrderingWitness, TranslateError,
};

/// Front Doors are global resources
pub const FRONT_DOOR_LOCATION: &str = "Global";

const DEFAULT_SEND_RECEIVE_TIMEOUT_SECONDS: i64 = 60;

/// Expand the configuration of `azurerm_frontdoor` into the Front Door model
///
/// Every child link is derived from `id`.
pub fn expand_front_door(id: &FrontDoorId, config: &AttributeTree) -> Result<FrontDoor, TranslateError> {
    let root = BlockRef::root(config);

    let backend_pools_settings = match root.get_block("backend_pool_settings")?.as_option() {
        Some(settings) => BackendPoolsSettings {
            enforce_certificate_name_check: Some(
                settings
                    .bool_or("enforce_backend_pools_certificate_name_check", true)?
                    .into(),
            ),
            send_recv_timeout_seconds: Some(settings.int_or(
                "backend_pools_send_receive_timeout_seconds",
                DEFAULT_SEND_RECEIVE_TIMEOUT_SECONDS,
            )?),
        },
        None => BackendPoolsSettings {
            enforce_certificate_name_check: Some(EnabledState::Enabled),
            send_recv_timeout_seconds: Some(DEFAULT_SEND_RECEIVE_TIMEOUT_SECONDS),
        },
    };

    let properties = FrontDoorProperties {
        friendly_name: root.non_empty("friendly_name")?,
        routing_rules: Some(expand_routing_rules(id, &root)?),
        load_balancing_settings: Some(expand_load_balancings(id, &root)?),
        health_probe_settings: Some(expand_health_probes(id, &root)?),
        backend_pools: Some(expand_backend_pools(id, &root)?),
        frontend_endpoints: Some(expand_frontend_endpoints(id, &root)?),
        backend_pools_settings: Some(backend_pools_settings),
        enabled_state: Some(root.bool_or("load_balancer_enabled", true)?.into()),
        ..Default::default()
    };

    Ok(FrontDoor {
        name: Some(id.name.clone()),
        location: Some(FRONT_DOOR_LOCATION.to_owned()),
        tags: root.get_string_map("tags")?.as_option(),
        properties: Some(properties),
        ..Default::default()
    })
}

/// Flatten a Front Door model into the state of `azurerm_frontdoor`
///
/// Child lists follow `witness`. When the witness is empty, children keep the
/// order of the response and the emitted `explicit_resource_order` records it.
/// `prior` is the previous state, if any.
pub fn flatten_front_door(
    id: &FrontDoorId,
    model: &FrontDoor,
    witness: &OrderingWitness,
    prior: Option<&AttributeTree>,
) -> Result<AttributeTree, TranslateError> {
    let empty = FrontDoorProperties::default();
    let properties = model.properties.as_ref().unwrap_or(&empty);

    let backend_pools = flatten_backend_pools(
        id,
        properties.backend_pools.as_deref().unwrap_or_default(),
        witness.ids(ChildKind::BackendPool),
    )?;
    let frontend_endpoints = flatten_frontend_endpoints(
        id,
        properties.frontend_endpoints.as_deref().unwrap_or_default(),
        witness.ids(ChildKind::FrontendEndpoint),
    )?;
    let routing_rules = flatten_routing_rules(
        id,
        properties.routing_rules.as_deref().unwrap_or_default(),
        witness.ids(ChildKind::RoutingRule),
        prior,
    )?;
    let health_probes = flatten_health_probes(
        id,
        properties.health_probe_settings.as_deref().unwrap_or_default(),
        witness.ids(ChildKind::HealthProbe),
    )?;
    let load_balancings = flatten_load_balancings(
        id,
        properties.load_balancing_settings.as_deref().unwrap_or_default(),
        witness.ids(ChildKind::LoadBalancing),
    )?;

    let explicit_order = if witness.is_empty() {
        OrderingWitness {
            backend_pool_ids: emitted_ids(&backend_pools),
            frontend_endpoint_ids: emitted_ids(&frontend_endpoints),
            routing_rule_ids: emitted_ids(&routing_rules),
            backend_pool_health_probe_ids: emitted_ids(&health_probes),
            backend_pool_load_balancing_ids: emitted_ids(&load_balancings),
        }
    } else {
        witness.clone()
    };

    let settings = properties.backend_pools_settings.clone().unwrap_or_default();
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
        "friendly_name" => properties.friendly_name.clone().unwrap_or_default(),
        "load_balancer_enabled" => properties.enabled_state.is_some_and(EnabledState::is_enabled),
        "cname" => properties.cname.clone().unwrap_or_default(),
        "header_frontdoor_id" => properties.frontdoor_id.clone().unwrap_or_default(),
        "tags" => tags,
        "backend_pool_settings" => AttributeValue::single(map! {
            "enforce_backend_pools_certificate_name_check" => settings
                .enforce_certificate_name_check
                .is_some_and(EnabledState::is_enabled),
            "backend_pools_send_receive_timeout_seconds" => settings
                .send_recv_timeout_seconds
                .unwrap_or(DEFAULT_SEND_RECEIVE_TIMEOUT_SECONDS),
        }),
        "backend_pools" => id_map(&backend_pools),
        "frontend_endpoints" => id_map(&frontend_endpoints),
        "routing_rules" => id_map(&routing_rules),
        "backend_pool_health_probes" => id_map(&health_probes),
        "backend_pool_load_balancing_settings" => id_map(&load_balancings),
        "backend_pool" => backend_pools,
        "frontend_endpoint" => frontend_endpoints,
        "routing_rule" => routing_rules,
        "backend_pool_health_probe" => health_probes,
        "backend_pool_load_balancing" => load_balancings,
        EXPLICIT_RESOURCE_ORDER => explicit_order.to_attribute(),
    })
}

fn emitted_ids(trees: &[AttributeTree]) -> Vec<String> {
    trees.iter().filter_map(id_of).map(str::to_owned).collect()
}

/// Computed map from child name to canonical child id
fn id_map(trees: &[AttributeTree]) -> AttributeTree {
    trees
        .iter()
        .filter_map(|tree| {
            let name = tree.get("name").and_then(AttributeValue::as_str)?;
            Some((name.to_owned(), AttributeValue::from(id_of(tree)?)))
        })
        .collect()
}
