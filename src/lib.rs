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

//! Azure Front Door provider core
//!
//! Translates between the Terraform configuration of `azurerm_frontdoor`,
//! `azurerm_frontdoor_custom_https_configuration` and
//! `azurerm_frontdoor_firewall_policy` and the Azure Front Door API models.
//!
//! * [`ids`] parses and formats the resource ids, including the legacy casings
//!   still returned by the API.
//! * [`translate`] expands configurations into API models and flattens API
//!   responses back into state, keeping the user's block order.
//! * [`schema`] describes the resources and fills their defaults.
//! * [`validate`] checks a configuration before any request is sent.
//! * [`migrate`] upgrades states written by older schema versions.

mod attribute_path;
mod diagnostics;

pub mod ids;
pub mod migrate;
pub mod models;
pub mod schema;
pub mod settings;
pub mod translate;
pub mod validate;
pub mod value;

pub use attribute_path::{AttributePath, AttributePathStep};
pub use diagnostics::{Diagnostic, Diagnostics};

#[macro_export]
/// Build an ordered map
///
/// # Examples
///
/// ```
/// # use azurerm_frontdoor::map;
/// # use std::collections::BTreeMap;
/// let m: BTreeMap<String, String> = map!{
///     "key1" => "value1",
///     "key2" => "value2",
/// };
/// assert_eq!(m.keys().collect::<Vec<_>>(), ["key1", "key2"]);
/// ```
///
/// # Remarks
///
/// Keys and Values are converted with [`Into::into`] to build the map.
/// Because of that, type annotations are usually required.
macro_rules! map {
    {$($key:expr => $value:expr),*} => {
        {
            #[allow(unused_mut)]
            let mut map = std::collections::BTreeMap::default();
            $(
                map.insert($key.into(), $value.into());
            )*
            map
        }
    };

    {$($key:expr => $value:expr),+ ,} => { $crate::map!{$($key => $value),+} };
}
