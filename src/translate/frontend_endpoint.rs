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
    ids::{
        ChildKind, CustomHttpsConfigurationId, FrontDoorId, FrontendEndpointId, ResourceId,
        WebApplicationFirewallPolicyId,
    },
    map,
    models::{
        frontdoor::{
            CertificateSource, CustomHttpsConfiguration, FrontDoorCertificateSourceParameters,
            FrontDoorCertificateType, FrontendEndpoint, FrontendEndpointProperties,
            KeyVaultCertificateSourceParameters, MinimumTlsVersion, TlsProtocolType,
        },
        EnabledState, SubResource,
    },
    value::{AttributeTree, AttributeValue},
    AttributePath,
};

use super::{child_id, id_of, order_by_witness, BlockRef, TranslateError};

pub fn expand_frontend_endpoints(
    front_door: &FrontDoorId,
    config: &BlockRef<'_>,
) -> Result<Vec<FrontendEndpoint>, TranslateError> {
    config
        .blocks("frontend_endpoint")?
        .iter()
        .map(|endpoint| expand_frontend_endpoint(front_door, endpoint))
        .collect()
}

/// Expand a `frontend_endpoint` block
///
/// The firewall policy link is user input and must be in canonical casing.
pub fn expand_frontend_endpoint(
    front_door: &FrontDoorId,
    endpoint: &BlockRef<'_>,
) -> Result<FrontendEndpoint, TranslateError> {
    let name = endpoint.string("name")?;
    let web_application_firewall_policy_link =
        match endpoint.non_empty("web_application_firewall_policy_link_id")? {
            Some(raw) => Some(SubResource::new(WebApplicationFirewallPolicyId::parse(&raw)?)),
            None => None,
        };
    Ok(FrontendEndpoint {
        id: Some(front_door.frontend_endpoint(name.as_str()).to_string()),
        name: Some(name),
        properties: Some(FrontendEndpointProperties {
            host_name: endpoint.non_empty("host_name")?,
            session_affinity_enabled_state: Some(
                endpoint.bool_or("session_affinity_enabled", false)?.into(),
            ),
            session_affinity_ttl_seconds: Some(endpoint.int_or("session_affinity_ttl_seconds", 0)?),
            web_application_firewall_policy_link,
            ..Default::default()
        }),
    })
}

pub fn flatten_frontend_endpoints(
    front_door: &FrontDoorId,
    endpoints: &[FrontendEndpoint],
    witness: &[String],
) -> Result<Vec<AttributeTree>, TranslateError> {
    let flattened = endpoints
        .iter()
        .enumerate()
        .map(|(i, endpoint)| {
            let path = AttributePath::new("frontend_endpoint").index(i);
            let name = endpoint.name.clone().unwrap_or_default();
            let id = child_id(
                front_door,
                ChildKind::FrontendEndpoint,
                endpoint.id.as_deref(),
                &name,
                path.clone().attribute("id"),
            )?;
            let empty = FrontendEndpointProperties::default();
            let properties = endpoint.properties.as_ref().unwrap_or(&empty);
            let firewall_policy = match properties
                .web_application_firewall_policy_link
                .as_ref()
                .and_then(|link| link.id.as_deref())
            {
                Some(raw) if !raw.is_empty() => WebApplicationFirewallPolicyId::parse_insensitive(raw)
                    .map(|id| id.to_string())
                    .map_err(|source| TranslateError::ChildIdUnresolvable {
                        field: path.attribute("web_application_firewall_policy_link_id"),
                        id: raw.to_owned(),
                        source,
                    })?,
                _ => String::new(),
            };
            Ok(map! {
                "id" => id,
                "name" => name,
                "host_name" => properties.host_name.clone().unwrap_or_default(),
                "session_affinity_enabled" => properties
                    .session_affinity_enabled_state
                    .is_some_and(EnabledState::is_enabled),
                "session_affinity_ttl_seconds" => properties.session_affinity_ttl_seconds.unwrap_or_default(),
                "web_application_firewall_policy_link_id" => firewall_policy,
            })
        })
        .collect::<Result<Vec<AttributeTree>, TranslateError>>()?;
    Ok(order_by_witness(flattened, witness, id_of))
}

/// Expand the configuration of `azurerm_frontdoor_custom_https_configuration`
///
/// Returns `None` when custom HTTPS provisioning is disabled.
pub fn expand_custom_https_configuration(
    config: &AttributeTree,
) -> Result<Option<CustomHttpsConfiguration>, TranslateError> {
    let root = BlockRef::root(config);
    if !root.bool_or("custom_https_provisioning_enabled", false)? {
        return Ok(None);
    }
    let block = root.get_block("custom_https_configuration")?.as_option();
    let source = match &block {
        Some(block) => block
            .get_enum("certificate_source")?
            .unwrap_or(CertificateSource::FrontDoor),
        None => CertificateSource::FrontDoor,
    };

    let mut configuration = CustomHttpsConfiguration {
        certificate_source: Some(source),
        protocol_type: Some(TlsProtocolType::ServerNameIndication),
        minimum_tls_version: Some(MinimumTlsVersion::Tls12),
        ..Default::default()
    };
    match (source, block) {
        (CertificateSource::AzureKeyVault, Some(block)) => {
            configuration.key_vault_certificate_source_parameters =
                Some(KeyVaultCertificateSourceParameters {
                    vault: block
                        .non_empty("azure_key_vault_certificate_vault_id")?
                        .map(SubResource::new),
                    secret_name: block.non_empty("azure_key_vault_certificate_secret_name")?,
                    secret_version: block.non_empty("azure_key_vault_certificate_secret_version")?,
                });
        }
        _ => {
            configuration.front_door_certificate_source_parameters =
                Some(FrontDoorCertificateSourceParameters {
                    certificate_type: Some(FrontDoorCertificateType::Dedicated),
                });
        }
    }
    Ok(Some(configuration))
}

/// Flatten the custom HTTPS state of a frontend endpoint
pub fn flatten_custom_https_configuration(
    endpoint: &FrontendEndpoint,
) -> Result<AttributeTree, TranslateError> {
    let raw = endpoint.id.as_deref().unwrap_or_default();
    let endpoint_id = FrontendEndpointId::parse_insensitive(raw).map_err(|source| {
        TranslateError::ChildIdUnresolvable {
            field: AttributePath::new("frontend_endpoint_id"),
            id: raw.to_owned(),
            source,
        }
    })?;
    let empty = FrontendEndpointProperties::default();
    let properties = endpoint.properties.as_ref().unwrap_or(&empty);
    let state = properties
        .custom_https_provisioning_state
        .clone()
        .unwrap_or_default();
    let enabled = matches!(state.as_str(), "Enabled" | "Enabling");

    let configuration = match &properties.custom_https_configuration {
        Some(configuration) => {
            let key_vault = configuration
                .key_vault_certificate_source_parameters
                .clone()
                .unwrap_or_default();
            vec![AttributeValue::Map(map! {
                "certificate_source" => configuration
                    .certificate_source
                    .unwrap_or(CertificateSource::FrontDoor)
                    .as_str(),
                "minimum_tls_version" => configuration.minimum_tls_version.map(|v| v.as_str()).unwrap_or_default(),
                "provisioning_state" => state.as_str(),
                "provisioning_substate" => properties.custom_https_provisioning_substate.clone().unwrap_or_default(),
                "azure_key_vault_certificate_vault_id" => key_vault.vault.and_then(|vault| vault.id).unwrap_or_default(),
                "azure_key_vault_certificate_secret_name" => key_vault.secret_name.unwrap_or_default(),
                "azure_key_vault_certificate_secret_version" => key_vault.secret_version.unwrap_or_default(),
            })]
        }
        None => vec![],
    };

    Ok(map! {
        "id" => CustomHttpsConfigurationId::from(endpoint_id.clone()).to_string(),
        "frontend_endpoint_id" => endpoint_id.to_string(),
        "custom_https_provisioning_enabled" => enabled,
        "custom_https_configuration" => configuration,
    })
}
