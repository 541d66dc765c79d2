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

use serde::{Deserialize, Serialize};

use crate::{
    ids::{ChildKind, FrontDoorId},
    map,
    value::{AttributeTree, AttributeValue, Value},
};

use super::{BlockRef, TranslateError};

/// Name of the block persisting the witness next to the configuration
pub const EXPLICIT_RESOURCE_ORDER: &str = "explicit_resource_order";

/// Declared order of the children of a Front Door
///
/// The API returns child lists in no particular order. The witness records the
/// canonical ids in the order they were declared, so that reading the Front
/// Door back yields the same order and no spurious diff.
///
/// It is computed from the configuration on create and on every successful
/// update, and only read when flattening.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderingWitness {
    #[serde(default)]
    pub backend_pool_ids: Vec<String>,
    #[serde(default)]
    pub frontend_endpoint_ids: Vec<String>,
    #[serde(default)]
    pub routing_rule_ids: Vec<String>,
    #[serde(default)]
    pub backend_pool_health_probe_ids: Vec<String>,
    #[serde(default)]
    pub backend_pool_load_balancing_ids: Vec<String>,
}

const FIELDS: [(ChildKind, &str, &str); 5] = [
    (ChildKind::BackendPool, "backend_pool", "backend_pool_ids"),
    (ChildKind::FrontendEndpoint, "frontend_endpoint", "frontend_endpoint_ids"),
    (ChildKind::RoutingRule, "routing_rule", "routing_rule_ids"),
    (ChildKind::HealthProbe, "backend_pool_health_probe", "backend_pool_health_probe_ids"),
    (ChildKind::LoadBalancing, "backend_pool_load_balancing", "backend_pool_load_balancing_ids"),
];

impl OrderingWitness {
    /// Compute the witness from the order the children are declared in
    pub fn from_config(id: &FrontDoorId, config: &AttributeTree) -> Result<Self, TranslateError> {
        let root = BlockRef::root(config);
        let mut witness = Self::default();
        for (kind, block, _) in FIELDS {
            let Some(ids) = witness.ids_mut(kind) else {
                continue;
            };
            for child in root.blocks(block)? {
                if let Value::Value(name) = child.get_str("name")? {
                    ids.push(id.derive_child(kind, name).to_string());
                }
            }
        }
        Ok(witness)
    }

    /// Read the witness persisted in a previous state
    pub fn from_state(state: &AttributeTree) -> Result<Self, TranslateError> {
        let root = BlockRef::root(state);
        let mut witness = Self::default();
        if let Value::Value(block) = root.get_block(EXPLICIT_RESOURCE_ORDER)? {
            for (kind, _, field) in FIELDS {
                if let Some(ids) = witness.ids_mut(kind) {
                    *ids = block.strings(field)?;
                }
            }
        }
        Ok(witness)
    }

    /// Block persisted in the state
    pub fn to_attribute(&self) -> AttributeValue {
        AttributeValue::single(map! {
            "backend_pool_ids" => self.backend_pool_ids.clone(),
            "frontend_endpoint_ids" => self.frontend_endpoint_ids.clone(),
            "routing_rule_ids" => self.routing_rule_ids.clone(),
            "backend_pool_health_probe_ids" => self.backend_pool_health_probe_ids.clone(),
            "backend_pool_load_balancing_ids" => self.backend_pool_load_balancing_ids.clone(),
        })
    }

    pub fn is_empty(&self) -> bool {
        FIELDS.iter().all(|(kind, _, _)| self.ids(*kind).is_empty())
    }

    /// Declared ids of the children of the given kind
    pub fn ids(&self, kind: ChildKind) -> &[String] {
        match kind {
            ChildKind::BackendPool => &self.backend_pool_ids,
            ChildKind::FrontendEndpoint => &self.frontend_endpoint_ids,
            ChildKind::RoutingRule => &self.routing_rule_ids,
            ChildKind::HealthProbe => &self.backend_pool_health_probe_ids,
            ChildKind::LoadBalancing => &self.backend_pool_load_balancing_ids,
            ChildKind::CustomHttpsConfiguration => &[],
        }
    }

    pub(crate) fn ids_mut(&mut self, kind: ChildKind) -> Option<&mut Vec<String>> {
        match kind {
            ChildKind::BackendPool => Some(&mut self.backend_pool_ids),
            ChildKind::FrontendEndpoint => Some(&mut self.frontend_endpoint_ids),
            ChildKind::RoutingRule => Some(&mut self.routing_rule_ids),
            ChildKind::HealthProbe => Some(&mut self.backend_pool_health_probe_ids),
            ChildKind::LoadBalancing => Some(&mut self.backend_pool_load_balancing_ids),
            ChildKind::CustomHttpsConfiguration => None,
        }
    }
}

/// Order `items` as declared by `witness`
///
/// Items whose id is in the witness come first, in witness order. Items whose
/// id is not in the witness follow in the order they were received.
/// An empty witness keeps the received order.
/// Ids are compared without case as the API does not keep their casing stable.
///
/// ```
/// # use azurerm_frontdoor::translate::order_by_witness;
/// let witness = vec!["/b".to_owned(), "/a".to_owned()];
/// let ordered = order_by_witness(vec!["/a", "/x", "/B"], &witness, |id| Some(*id));
/// assert_eq!(ordered, vec!["/B", "/a", "/x"]);
/// ```
pub fn order_by_witness<T>(
    items: Vec<T>,
    witness: &[String],
    id_of: impl Fn(&T) -> Option<&str>,
) -> Vec<T> {
    if witness.is_empty() {
        return items;
    }
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(slots.len());
    for wanted in witness {
        let found = slots.iter_mut().find(|slot| {
            slot.as_ref()
                .and_then(|item| id_of(item))
                .is_some_and(|id| id.eq_ignore_ascii_case(wanted))
        });
        if let Some(slot) = found {
            ordered.extend(slot.take());
        }
    }
    let witnessed = ordered.len();
    ordered.extend(slots.into_iter().flatten());
    if ordered.len() > witnessed {
        tracing::debug!(
            appended = ordered.len() - witnessed,
            "appended children missing from the explicit resource order"
        );
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fd() -> FrontDoorId {
        FrontDoorId::new("S", "G", "FD1")
    }

    fn ids(names: &[&str]) -> Vec<String> {
        names
            .iter()
            .map(|name| fd().backend_pool(*name).to_string())
            .collect()
    }

    #[test]
    fn witnessed_order_is_stable() {
        let witness = ids(&["c", "a", "b"]);
        let response = ids(&["a", "b", "c"]);
        let first = order_by_witness(response.clone(), &witness, |id| Some(id.as_str()));
        let second = order_by_witness(first.clone(), &witness, |id| Some(id.as_str()));
        assert_eq!(first, witness);
        assert_eq!(first, second);
        let again = order_by_witness(response, &witness, |id| Some(id.as_str()));
        assert_eq!(again, first);
    }

    #[test]
    fn unwitnessed_items_are_appended_in_received_order() {
        let witness = ids(&["b", "a"]);
        let response = ids(&["y", "a", "x", "b"]);
        let ordered = order_by_witness(response, &witness, |id| Some(id.as_str()));
        assert_eq!(ordered, ids(&["b", "a", "y", "x"]));
    }

    #[test]
    fn empty_witness_keeps_response_order() {
        let response = ids(&["z", "a"]);
        let ordered = order_by_witness(response.clone(), &[], |id| Some(id.as_str()));
        assert_eq!(ordered, response);
    }

    #[test]
    fn stale_witness_entries_are_ignored() {
        let witness = ids(&["gone", "a"]);
        let ordered = order_by_witness(ids(&["b", "a"]), &witness, |id| Some(id.as_str()));
        assert_eq!(ordered, ids(&["a", "b"]));
    }

    #[test]
    fn items_without_id_go_last() {
        let witness = vec!["/a".to_owned()];
        let ordered = order_by_witness(vec![None, Some("/a")], &witness, |item| *item);
        assert_eq!(ordered, vec![Some("/a"), None]);
    }

    #[test]
    fn witness_from_config_follows_declaration_order() {
        let config: AttributeTree = map! {
            "backend_pool" => vec![
                AttributeValue::Map(map! { "name" => "second" }),
                AttributeValue::Map(map! { "name" => "first" }),
            ],
            "routing_rule" => vec![AttributeValue::Map(map! { "name" => "rule" })],
        };
        let witness = OrderingWitness::from_config(&fd(), &config).unwrap();
        assert_eq!(witness.backend_pool_ids, ids(&["second", "first"]));
        assert_eq!(
            witness.routing_rule_ids,
            vec![fd().routing_rule("rule").to_string()]
        );
        assert!(witness.frontend_endpoint_ids.is_empty());
        assert!(!witness.is_empty());
    }

    #[test]
    fn witness_survives_the_state() {
        let witness = OrderingWitness {
            backend_pool_ids: ids(&["a"]),
            routing_rule_ids: vec![fd().routing_rule("r").to_string()],
            ..Default::default()
        };
        let state: AttributeTree = map! { EXPLICIT_RESOURCE_ORDER => witness.to_attribute() };
        assert_eq!(OrderingWitness::from_state(&state).unwrap(), witness);
        assert!(OrderingWitness::from_state(&AttributeTree::new())
            .unwrap()
            .is_empty());
    }
}
