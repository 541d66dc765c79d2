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

pub(crate) const FRONT_DOORS: Label =
    Label::new("frontDoors", &["frontdoors", "Frontdoors", "FrontDoors"]);
pub(crate) const BACKEND_POOLS: Label = Label::new("backendPools", &["backendpools", "BackendPools"]);
pub(crate) const FRONTEND_ENDPOINTS: Label = Label::new(
    "frontendEndpoints",
    &["FrontendEndpoints", "frontendendpoints", "Frontendendpoints"],
);
pub(crate) const HEALTH_PROBE_SETTINGS: Label = Label::new(
    "healthProbeSettings",
    &["healthprobesettings", "HealthProbeSettings"],
);
pub(crate) const LOAD_BALANCING_SETTINGS: Label = Label::new(
    "loadBalancingSettings",
    &["loadbalancingsettings", "LoadBalancingSettings"],
);
pub(crate) const ROUTING_RULES: Label = Label::new("routingRules", &["routingrules", "RoutingRules"]);
pub(crate) const CUSTOM_HTTPS_CONFIGURATION: Label = Label::new(
    "customHttpsConfiguration",
    &["customhttpsconfiguration", "CustomHttpsConfiguration"],
);

/// Identifier of a Front Door
///
/// ```
/// # use azurerm_frontdoor::ids::{FrontDoorId, ResourceId};
/// let id = FrontDoorId::parse(
///     "/subscriptions/S/resourceGroups/G/providers/Microsoft.Network/frontDoors/FD1",
/// )
/// .unwrap();
/// assert_eq!(id.name, "FD1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrontDoorId {
    pub subscription_id: String,
    pub resource_group: String,
    pub name: String,
}

impl FrontDoorId {
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

    /// Build the identifier of a child resource of this Front Door
    pub fn derive_child(&self, kind: ChildKind, name: impl Into<String>) -> FrontDoorChildId {
        let name = name.into();
        match kind {
            ChildKind::BackendPool => self.backend_pool(name).into(),
            ChildKind::FrontendEndpoint => self.frontend_endpoint(name).into(),
            ChildKind::RoutingRule => self.routing_rule(name).into(),
            ChildKind::HealthProbe => self.health_probe(name).into(),
            ChildKind::LoadBalancing => self.load_balancing(name).into(),
            ChildKind::CustomHttpsConfiguration => self.custom_https_configuration(name).into(),
        }
    }

    pub(crate) fn pop(segments: &mut Segments<'_>) -> Result<Self, IdError> {
        let (subscription_id, resource_group) = segments.pop_scope()?;
        let name = segments.pop(&FRONT_DOORS)?;
        Ok(Self {
            subscription_id,
            resource_group,
            name,
        })
    }
}

impl ResourceId for FrontDoorId {
    fn parse_with(input: &str, casing: Casing) -> Result<Self, IdError> {
        let mut segments = Segments::new(input, casing)?;
        let id = Self::pop(&mut segments)?;
        segments.finish()?;
        Ok(id)
    }
}

impl Display for FrontDoorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format_scope(f, &self.subscription_id, &self.resource_group)?;
        write!(f, "/{}/{}", FRONT_DOORS.canonical, self.name)
    }
}

/// Kind of a resource nested under a Front Door
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChildKind {
    BackendPool,
    FrontendEndpoint,
    RoutingRule,
    HealthProbe,
    LoadBalancing,
    CustomHttpsConfiguration,
}

impl ChildKind {
    pub const ALL: [ChildKind; 6] = [
        ChildKind::BackendPool,
        ChildKind::FrontendEndpoint,
        ChildKind::RoutingRule,
        ChildKind::HealthProbe,
        ChildKind::LoadBalancing,
        ChildKind::CustomHttpsConfiguration,
    ];

    /// Label of the segment holding the child name
    pub const fn label(self) -> Label {
        match self {
            ChildKind::BackendPool => BACKEND_POOLS,
            ChildKind::FrontendEndpoint => FRONTEND_ENDPOINTS,
            ChildKind::RoutingRule => ROUTING_RULES,
            ChildKind::HealthProbe => HEALTH_PROBE_SETTINGS,
            ChildKind::LoadBalancing => LOAD_BALANCING_SETTINGS,
            ChildKind::CustomHttpsConfiguration => CUSTOM_HTTPS_CONFIGURATION,
        }
    }
}

impl Display for ChildKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label().canonical)
    }
}

macro_rules! front_door_child_id {
    ($($(#[$meta:meta])* $id:ident($kind:ident) => $builder:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $id {
                pub subscription_id: String,
                pub resource_group: String,
                pub front_door_name: String,
                pub name: String,
            }

            impl $id {
                pub fn new(
                    subscription_id: impl Into<String>,
                    resource_group: impl Into<String>,
                    front_door_name: impl Into<String>,
                    name: impl Into<String>,
                ) -> Self {
                    Self {
                        subscription_id: subscription_id.into(),
                        resource_group: resource_group.into(),
                        front_door_name: front_door_name.into(),
                        name: name.into(),
                    }
                }

                /// Identifier of the Front Door owning this resource
                pub fn parent(&self) -> FrontDoorId {
                    FrontDoorId::new(
                        self.subscription_id.clone(),
                        self.resource_group.clone(),
                        self.front_door_name.clone(),
                    )
                }
            }

            impl ResourceId for $id {
                fn parse_with(input: &str, casing: Casing) -> Result<Self, IdError> {
                    let mut segments = Segments::new(input, casing)?;
                    let parent = FrontDoorId::pop(&mut segments)?;
                    let name = segments.pop(&ChildKind::$kind.label())?;
                    segments.finish()?;
                    Ok(Self {
                        subscription_id: parent.subscription_id,
                        resource_group: parent.resource_group,
                        front_door_name: parent.name,
                        name,
                    })
                }
            }

            impl Display for $id {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    format_scope(f, &self.subscription_id, &self.resource_group)?;
                    write!(
                        f,
                        "/{}/{}/{}/{}",
                        FRONT_DOORS.canonical,
                        self.front_door_name,
                        ChildKind::$kind.label().canonical,
                        self.name
                    )
                }
            }

            impl From<$id> for FrontDoorChildId {
                fn from(value: $id) -> Self {
                    FrontDoorChildId::$kind(value)
                }
            }

            impl FrontDoorId {
                #[doc = concat!("Build the [`", stringify!($id), "`] of the child `name`")]
                pub fn $builder(&self, name: impl Into<String>) -> $id {
                    $id {
                        subscription_id: self.subscription_id.clone(),
                        resource_group: self.resource_group.clone(),
                        front_door_name: self.name.clone(),
                        name: name.into(),
                    }
                }
            }
        )*

        /// Identifier of any resource nested under a Front Door
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum FrontDoorChildId {
            $($kind($id),)*
        }

        impl FrontDoorChildId {
            /// Parse the identifier of a child of the given kind, accepting only the canonical casing
            pub fn parse(kind: ChildKind, input: &str) -> Result<Self, IdError> {
                Self::parse_with(kind, input, Casing::Exact)
            }

            /// Parse the stored identifier of a child of the given kind
            pub fn parse_insensitive(kind: ChildKind, input: &str) -> Result<Self, IdError> {
                Self::parse_with(kind, input, Casing::Insensitive)
            }

            /// Parse the identifier of a child of the given kind
            pub fn parse_with(kind: ChildKind, input: &str, casing: Casing) -> Result<Self, IdError> {
                Ok(match kind {
                    $(ChildKind::$kind => $id::parse_with(input, casing)?.into(),)*
                })
            }

            /// Kind of the child
            pub fn kind(&self) -> ChildKind {
                match self {
                    $(FrontDoorChildId::$kind(_) => ChildKind::$kind,)*
                }
            }

            /// Name of the child
            pub fn name(&self) -> &str {
                match self {
                    $(FrontDoorChildId::$kind(id) => &id.name,)*
                }
            }

            /// Identifier of the Front Door owning the child
            pub fn parent(&self) -> FrontDoorId {
                match self {
                    $(FrontDoorChildId::$kind(id) => id.parent(),)*
                }
            }
        }

        impl Display for FrontDoorChildId {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(FrontDoorChildId::$kind(id) => id.fmt(f),)*
                }
            }
        }
    };
}

front_door_child_id! {
    /// Identifier of a Front Door backend pool
    BackendPoolId(BackendPool) => backend_pool,
    /// Identifier of a Front Door frontend endpoint
    FrontendEndpointId(FrontendEndpoint) => frontend_endpoint,
    /// Identifier of a Front Door routing rule
    RoutingRuleId(RoutingRule) => routing_rule,
    /// Identifier of a Front Door health probe setting
    HealthProbeId(HealthProbe) => health_probe,
    /// Identifier of a Front Door load balancing setting
    LoadBalancingId(LoadBalancing) => load_balancing,
    /// Identifier of the custom HTTPS configuration of a frontend endpoint
    CustomHttpsConfigurationId(CustomHttpsConfiguration) => custom_https_configuration,
}

impl From<FrontendEndpointId> for CustomHttpsConfigurationId {
    fn from(value: FrontendEndpointId) -> Self {
        Self {
            subscription_id: value.subscription_id,
            resource_group: value.resource_group,
            front_door_name: value.front_door_name,
            name: value.name,
        }
    }
}

impl From<CustomHttpsConfigurationId> for FrontendEndpointId {
    fn from(value: CustomHttpsConfigurationId) -> Self {
        Self {
            subscription_id: value.subscription_id,
            resource_group: value.resource_group,
            front_door_name: value.front_door_name,
            name: value.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRONT_DOOR: &str =
        "/subscriptions/S/resourceGroups/G/providers/Microsoft.Network/frontDoors/FD1";

    fn front_door() -> FrontDoorId {
        FrontDoorId::new("S", "G", "FD1")
    }

    #[test]
    fn parse_backend_pool() {
        let input = format!("{FRONT_DOOR}/backendPools/P1");
        let id = BackendPoolId::parse(&input).unwrap();
        assert_eq!(id, BackendPoolId::new("S", "G", "FD1", "P1"));
        assert_eq!(id.to_string(), input);
    }

    #[test]
    fn every_kind_round_trips() {
        for kind in ChildKind::ALL {
            let id = front_door().derive_child(kind, "child");
            let formatted = id.to_string();
            assert_eq!(FrontDoorChildId::parse(kind, &formatted).unwrap(), id);
            assert_eq!(id.kind(), kind);
            assert_eq!(id.name(), "child");
            assert_eq!(id.parent(), front_door());
        }
        assert_eq!(FrontDoorId::parse(FRONT_DOOR).unwrap(), front_door());
    }

    #[test]
    fn canonical_labels_are_emitted() {
        let fd = front_door();
        assert!(fd
            .frontend_endpoint("fe")
            .to_string()
            .ends_with("/frontDoors/FD1/frontendEndpoints/fe"));
        assert!(fd
            .health_probe("hp")
            .to_string()
            .ends_with("/healthProbeSettings/hp"));
        assert!(fd
            .load_balancing("lb")
            .to_string()
            .ends_with("/loadBalancingSettings/lb"));
        assert!(fd.routing_rule("rr").to_string().ends_with("/routingRules/rr"));
        assert!(fd
            .custom_https_configuration("fe")
            .to_string()
            .ends_with("/customHttpsConfiguration/fe"));
    }

    #[test]
    fn strict_parse_rejects_legacy_casing() {
        let input = "/subscriptions/S/resourceGroups/G/providers/Microsoft.Network/frontdoors/FD1";
        assert_eq!(
            FrontDoorId::parse(input),
            Err(IdError::MissingSegment {
                label: "frontDoors",
                input: input.into(),
            })
        );
    }

    #[test]
    fn insensitive_parse_accepts_every_documented_variant() {
        for kind in ChildKind::ALL {
            let label = kind.label();
            for front_doors in FRONT_DOORS.legacy {
                for variant in label.legacy {
                    let input = format!(
                        "/subscriptions/S/resourcegroups/G/providers/Microsoft.Network/{front_doors}/FD1/{variant}/child"
                    );
                    let id = FrontDoorChildId::parse_insensitive(kind, &input).unwrap();
                    let canonical = front_door().derive_child(kind, "child");
                    assert_eq!(id, canonical);
                    assert_eq!(
                        FrontDoorChildId::parse(kind, &canonical.to_string()).unwrap(),
                        id
                    );
                }
            }
        }
    }

    #[test]
    fn insensitive_parse_rejects_undocumented_casing() {
        let input = format!("{FRONT_DOOR}/BACKENDPOOLS/P1");
        assert_eq!(
            BackendPoolId::parse_insensitive(&input),
            Err(IdError::UnrecognizedCasingVariant {
                label: "backendPools",
                found: "BACKENDPOOLS".into(),
                input: input.clone(),
            })
        );
        assert!(matches!(
            BackendPoolId::parse(&input),
            Err(IdError::MissingSegment { .. })
        ));
    }

    #[test]
    fn child_path_is_not_a_front_door() {
        let input = format!("{FRONT_DOOR}/backendPools/P1");
        assert_eq!(
            FrontDoorId::parse(&input),
            Err(IdError::UnexpectedSegments {
                segment: "backendPools".into(),
                input: input.clone(),
            })
        );
    }

    #[test]
    fn wrong_child_kind_is_missing_segment() {
        let input = format!("{FRONT_DOOR}/routingRules/R1");
        assert_eq!(
            BackendPoolId::parse(&input),
            Err(IdError::MissingSegment {
                label: "backendPools",
                input: input.clone(),
            })
        );
    }

    #[test]
    fn empty_values_are_rejected() {
        let input = "/subscriptions/S/resourceGroups//providers/Microsoft.Network/frontDoors/FD1";
        assert_eq!(
            FrontDoorId::parse(input),
            Err(IdError::EmptySegment {
                label: "resourceGroups".into(),
                input: input.into(),
            })
        );
    }

    #[test]
    fn custom_https_configuration_maps_to_endpoint() {
        let endpoint = front_door().frontend_endpoint("fe");
        let custom: CustomHttpsConfigurationId = endpoint.clone().into();
        assert_eq!(custom, front_door().custom_https_configuration("fe"));
        assert_eq!(FrontendEndpointId::from(custom), endpoint);
    }
}
