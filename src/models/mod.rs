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

//! Resource Manager payloads of `Microsoft.Network/frontDoors` (2020-05-01)
//! and `Microsoft.Network/frontDoorWebApplicationFirewallPolicies` (2020-11-01)
//!
//! Optional fields are skipped when serializing: an omitted field leaves the
//! remote value untouched, while `Some("")` clears it.

use serde::{Deserialize, Serialize};

/// String that does not name any variant of a wire enum
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{value:?} is not one of {}", expected.join(", "))]
pub struct UnknownVariant {
    pub value: String,
    pub expected: &'static [&'static str],
}

macro_rules! wire_enum {
    ($(#[$meta:meta])* pub enum $name:ident { $($variant:ident => $wire:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )*
        }

        impl $name {
            /// Wire spelling of every variant
            pub const VARIANTS: &'static [&'static str] = &[$($wire),*];

            /// Wire spelling of the variant
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)*
                    _ => Err($crate::models::UnknownVariant {
                        value: s.to_owned(),
                        expected: Self::VARIANTS,
                    }),
                }
            }
        }
    };
}

pub mod firewall_policy;
pub mod frontdoor;

wire_enum! {
    /// Enabled state shared by most switches of the API
    pub enum EnabledState {
        Enabled => "Enabled",
        Disabled => "Disabled",
    }
}

impl EnabledState {
    pub fn is_enabled(self) -> bool {
        self == EnabledState::Enabled
    }
}

impl From<bool> for EnabledState {
    fn from(value: bool) -> Self {
        if value {
            EnabledState::Enabled
        } else {
            EnabledState::Disabled
        }
    }
}

/// Reference to another resource
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl SubResource {
    pub fn new(id: impl ToString) -> Self {
        Self {
            id: Some(id.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_enum_parses_only_wire_spelling() {
        assert_eq!("Enabled".parse::<EnabledState>(), Ok(EnabledState::Enabled));
        let err = "enabled".parse::<EnabledState>().unwrap_err();
        assert_eq!(err.to_string(), "\"enabled\" is not one of Enabled, Disabled");
    }

    #[test]
    fn sub_resource_without_id_is_empty_object() {
        assert_eq!(serde_json::to_string(&SubResource::default()).unwrap(), "{}");
        assert_eq!(
            serde_json::to_string(&SubResource::new("/x")).unwrap(),
            r#"{"id":"/x"}"#
        );
    }
}
