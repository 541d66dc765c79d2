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
            Backend, BackendPool, BackendPoolProperties, FrontDoorProtocol, HealthProbeMethod,
            HealthProbeSettingsModel, HealthProbeSettingsProperties, LoadBalancingSettingsModel,
            LoadBalancingSettingsProperties,
        },
        EnabledState, SubResource,
    },
    value::{AttributeTree, AttributeValue},
    AttributePath,
};

use super::{child_id, id_of, linked_name, order_by_witness, BlockRef, TranslateError};

pub fn expand_backend_pools(
    front_door: &FrontDoorId,
    config: &BlockRef<'_>,
) -> Result<Vec<BackendPool>, TranslateError> {
    config
        .blocks("backend_pool")?
        .iter()
        .map(|pool| expand_backend_pool(front_door, pool))
        .collect()
}

/// Expand a `backend_pool` block, linking its health probe and load balancing settings by name
pub fn expand_backend_pool(
    front_door: &FrontDoorId,
    pool: &BlockRef<'_>,
) -> Result<BackendPool, TranslateError> {
    let name = pool.string("name")?;
    let backends = pool
        .blocks("backend")?
        .iter()
        .map(expand_backend)
        .collect::<Result<Vec<_>, _>>()?;
    let health_probe_settings = pool
        .non_empty("health_probe_name")?
        .map(|probe| SubResource::new(front_door.health_probe(probe)));
    let load_balancing_settings = pool
        .non_empty("load_balancing_name")?
        .map(|settings| SubResource::new(front_door.load_balancing(settings)));

    Ok(BackendPool {
        id: Some(front_door.backend_pool(name.as_str()).to_string()),
        name: Some(name),
        properties: Some(BackendPoolProperties {
            backends: Some(backends),
            load_balancing_settings,
            health_probe_settings,
            resource_state: None,
        }),
    })
}

fn expand_backend(backend: &BlockRef<'_>) -> Result<Backend, TranslateError> {
    Ok(Backend {
        address: backend.non_empty("address")?,
        http_port: backend.get_int("http_port")?.as_option(),
        https_port: backend.get_int("https_port")?.as_option(),
        enabled_state: Some(backend.bool_or("enabled", true)?.into()),
        priority: Some(backend.int_or("priority", 1)?),
        weight: Some(backend.int_or("weight", 50)?),
        backend_host_header: backend.non_empty("host_header")?,
    })
}

pub fn expand_health_probes(
    front_door: &FrontDoorId,
    config: &BlockRef<'_>,
) -> Result<Vec<HealthProbeSettingsModel>, TranslateError> {
    config
        .blocks("backend_pool_health_probe")?
        .iter()
        .map(|probe| expand_health_probe(front_door, probe))
        .collect()
}

pub fn expand_health_probe(
    front_door: &FrontDoorId,
    probe: &BlockRef<'_>,
) -> Result<HealthProbeSettingsModel, TranslateError> {
    let name = probe.string("name")?;
    let path = probe
        .non_empty("path")?
        .unwrap_or_else(|| "/".to_owned());
    Ok(HealthProbeSettingsModel {
        id: Some(front_door.health_probe(name.as_str()).to_string()),
        name: Some(name),
        properties: Some(HealthProbeSettingsProperties {
            path: Some(path),
            protocol: Some(probe.get_enum("protocol")?.unwrap_or(FrontDoorProtocol::Http)),
            interval_in_seconds: Some(probe.int_or("interval_in_seconds", 120)?),
            health_probe_method: Some(
                probe
                    .get_enum("probe_method")?
                    .unwrap_or(HealthProbeMethod::Get),
            ),
            enabled_state: Some(probe.bool_or("enabled", true)?.into()),
        }),
    })
}

pub fn expand_load_balancings(
    front_door: &FrontDoorId,
    config: &BlockRef<'_>,
) -> Result<Vec<LoadBalancingSettingsModel>, TranslateError> {
    config
        .blocks("backend_pool_load_balancing")?
        .iter()
        .map(|settings| expand_load_balancing(front_door, settings))
        .collect()
}

pub fn expand_load_balancing(
    front_door: &FrontDoorId,
    settings: &BlockRef<'_>,
) -> Result<LoadBalancingSettingsModel, TranslateError> {
    let name = settings.string("name")?;
    Ok(LoadBalancingSettingsModel {
        id: Some(front_door.load_balancing(name.as_str()).to_string()),
        name: Some(name),
        properties: Some(LoadBalancingSettingsProperties {
            sample_size: Some(settings.int_or("sample_size", 4)?),
            successful_samples_required: Some(settings.int_or("successful_samples_required", 2)?),
            additional_latency_milliseconds: Some(
                settings.int_or("additional_latency_milliseconds", 0)?,
            ),
        }),
    })
}

pub fn flatten_backend_pools(
    front_door: &FrontDoorId,
    pools: &[BackendPool],
    witness: &[String],
) -> Result<Vec<AttributeTree>, TranslateError> {
    let flattened = pools
        .iter()
        .enumerate()
        .map(|(i, pool)| {
            flatten_backend_pool(front_door, pool, AttributePath::new("backend_pool").index(i))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(order_by_witness(flattened, witness, id_of))
}

fn flatten_backend_pool(
    front_door: &FrontDoorId,
    pool: &BackendPool,
    path: AttributePath,
) -> Result<AttributeTree, TranslateError> {
    let name = pool.name.clone().unwrap_or_default();
    let id = child_id(
        front_door,
        ChildKind::BackendPool,
        pool.id.as_deref(),
        &name,
        path.clone().attribute("id"),
    )?;
    let empty = BackendPoolProperties::default();
    let properties = pool.properties.as_ref().unwrap_or(&empty);
    let health_probe_name = linked_name(
        ChildKind::HealthProbe,
        properties.health_probe_settings.as_ref(),
        path.clone().attribute("health_probe_name"),
    )?;
    let load_balancing_name = linked_name(
        ChildKind::LoadBalancing,
        properties.load_balancing_settings.as_ref(),
        path.attribute("load_balancing_name"),
    )?;
    let backends = properties
        .backends
        .iter()
        .flatten()
        .map(|backend| AttributeValue::Map(flatten_backend(backend)))
        .collect::<Vec<_>>();

    Ok(map! {
        "id" => id,
        "name" => name,
        "backend" => backends,
        "health_probe_name" => health_probe_name.unwrap_or_default(),
        "load_balancing_name" => load_balancing_name.unwrap_or_default(),
    })
}

fn flatten_backend(backend: &Backend) -> AttributeTree {
    map! {
        "enabled" => backend.enabled_state.is_some_and(EnabledState::is_enabled),
        "address" => backend.address.clone().unwrap_or_default(),
        "http_port" => backend.http_port.unwrap_or_default(),
        "https_port" => backend.https_port.unwrap_or_default(),
        "weight" => backend.weight.unwrap_or_default(),
        "priority" => backend.priority.unwrap_or_default(),
        "host_header" => backend.backend_host_header.clone().unwrap_or_default(),
    }
}

pub fn flatten_health_probes(
    front_door: &FrontDoorId,
    probes: &[HealthProbeSettingsModel],
    witness: &[String],
) -> Result<Vec<AttributeTree>, TranslateError> {
    let flattened = probes
        .iter()
        .enumerate()
        .map(|(i, probe)| {
            let path = AttributePath::new("backend_pool_health_probe").index(i);
            let name = probe.name.clone().unwrap_or_default();
            let id = child_id(
                front_door,
                ChildKind::HealthProbe,
                probe.id.as_deref(),
                &name,
                path.attribute("id"),
            )?;
            let empty = HealthProbeSettingsProperties::default();
            let properties = probe.properties.as_ref().unwrap_or(&empty);
            Ok(map! {
                "id" => id,
                "name" => name,
                "enabled" => properties.enabled_state.is_some_and(EnabledState::is_enabled),
                "path" => properties.path.clone().unwrap_or_default(),
                "protocol" => properties.protocol.map(|p| p.as_str()).unwrap_or_default(),
                "probe_method" => properties.health_probe_method.map(|m| m.as_str()).unwrap_or_default(),
                "interval_in_seconds" => properties.interval_in_seconds.unwrap_or_default(),
            })
        })
        .collect::<Result<Vec<AttributeTree>, TranslateError>>()?;
    Ok(order_by_witness(flattened, witness, id_of))
}

pub fn flatten_load_balancings(
    front_door: &FrontDoorId,
    settings: &[LoadBalancingSettingsModel],
    witness: &[String],
) -> Result<Vec<AttributeTree>, TranslateError> {
    let flattened = settings
        .iter()
        .enumerate()
        .map(|(i, settings)| {
            let path = AttributePath::new("backend_pool_load_balancing").index(i);
            let name = settings.name.clone().unwrap_or_default();
            let id = child_id(
                front_door,
                ChildKind::LoadBalancing,
                settings.id.as_deref(),
                &name,
                path.attribute("id"),
            )?;
            let empty = LoadBalancingSettingsProperties::default();
            let properties = settings.properties.as_ref().unwrap_or(&empty);
            Ok(map! {
                "id" => id,
                "name" => name,
                "sample_size" => properties.sample_size.unwrap_or_default(),
                "successful_samples_required" => properties.successful_samples_required.unwrap_or_default(),
                "additional_latency_milliseconds" => properties.additional_latency_milliseconds.unwrap_or_default(),
            })
        })
        .collect::<Result<Vec<AttributeTree>, TranslateError>>()?;
    Ok(order_by_witness(flattened, witness, id_of))
}
