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

//! Azure Resource Manager identifiers
//!
//! Identifiers look like
//! `/subscriptions/{sub}/resourceGroups/{rg}/providers/Microsoft.Network/{kind}/{name}[/{childKind}/{childName}]`.
//!
//! [`ResourceId::parse`] only accepts the canonical casing of every segment label.
//! [`ResourceId::parse_insensitive`] additionally accepts the historical casings the
//! API has returned in the past, enumerated per [`Label`], and is meant to rewrite
//! identifiers that were stored with one of those casings.
//! Formatting always produces the canonical casing.

use std::fmt::Display;

mod firewall_policy;
mod frontdoor;

pub use firewall_policy::WebApplicationFirewallPolicyId;
pub use frontdoor::{
    BackendPoolId, ChildKind, CustomHttpsConfigurationId, FrontDoorChildId, FrontDoorId,
    FrontendEndpointId, HealthProbeId, LoadBalancingId, RoutingRuleId,
};

/// Namespace of the resource provider owning every identifier of this crate
pub const PROVIDER_NAMESPACE: &str = "Microsoft.Network";

/// Errors raised while parsing an identifier
///
/// None of them are transient: the input is a plain string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("parsing {input:?}: resource ids must start with `/`")]
    Malformed { input: String },
    #[error("parsing {input:?}: ID was missing the `{label}` element")]
    MissingSegment { label: &'static str, input: String },
    #[error("parsing {input:?}: the `{label}` element is empty")]
    EmptySegment { label: String, input: String },
    #[error("parsing {input:?}: ID contained more segments than required, starting at `{segment}`")]
    UnexpectedSegments { segment: String, input: String },
    #[error("parsing {input:?}: expected the `{label}` element but found the unrecognized casing `{found}`")]
    UnrecognizedCasingVariant {
        label: &'static str,
        found: String,
        input: String,
    },
    #[error("parsing {input:?}: expected the provider `{expected}` but found `{found}`")]
    ProviderMismatch {
        expected: &'static str,
        found: String,
        input: String,
    },
}

impl IdError {
    /// Raw input that failed to parse
    pub fn input(&self) -> &str {
        match self {
            IdError::Malformed { input }
            | IdError::MissingSegment { input, .. }
            | IdError::EmptySegment { input, .. }
            | IdError::UnexpectedSegments { input, .. }
            | IdError::UnrecognizedCasingVariant { input, .. }
            | IdError::ProviderMismatch { input, .. } => input,
        }
    }
}

/// How segment labels are matched against their canonical casing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Casing {
    /// Only the canonical casing is accepted
    Exact,
    /// The canonical casing, then the documented historical variants
    Insensitive,
}

/// Label of a path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label {
    /// Casing expected by the API today, always used when formatting
    pub canonical: &'static str,
    /// Casings previously returned by the API, tried in order
    pub legacy: &'static [&'static str],
}

impl Label {
    pub const fn new(canonical: &'static str, legacy: &'static [&'static str]) -> Self {
        Self { canonical, legacy }
    }

    fn matches(&self, label: &str, casing: Casing) -> bool {
        label == self.canonical
            || (casing == Casing::Insensitive && self.legacy.contains(&label))
    }
}

pub(crate) const SUBSCRIPTIONS: Label = Label::new("subscriptions", &[]);
pub(crate) const RESOURCE_GROUPS: Label =
    Label::new("resourceGroups", &["resourcegroups", "ResourceGroups"]);
pub(crate) const PROVIDERS: Label = Label::new("providers", &[]);

/// Typed resource identifier
pub trait ResourceId: Sized + Display {
    /// Parse an identifier with the given label casing rules
    fn parse_with(input: &str, casing: Casing) -> Result<Self, IdError>;

    /// Parse an identifier, accepting only the canonical casing
    fn parse(input: &str) -> Result<Self, IdError> {
        Self::parse_with(input, Casing::Exact)
    }

    /// Parse a previously stored identifier, accepting documented historical casings
    fn parse_insensitive(input: &str) -> Result<Self, IdError> {
        Self::parse_with(input, Casing::Insensitive)
    }

    /// Canonical string form of the identifier
    fn id(&self) -> String {
        self.to_string()
    }
}

/// Rewrite a stored identifier into its canonical casing
///
/// ```
/// # use azurerm_frontdoor::ids::{canonicalize, FrontDoorId};
/// let id = canonicalize::<FrontDoorId>(
///     "/subscriptions/S/resourcegroups/G/providers/Microsoft.Network/frontdoors/FD1",
/// )
/// .unwrap();
/// assert_eq!(
///     id,
///     "/subscriptions/S/resourceGroups/G/providers/Microsoft.Network/frontDoors/FD1"
/// );
/// ```
pub fn canonicalize<T: ResourceId>(input: &str) -> Result<String, IdError> {
    let id = T::parse_insensitive(input)?.id();
    if id != input {
        tracing::debug!(from = input, to = %id, "rewrote resource id into canonical casing");
    }
    Ok(id)
}

/// Cursor over the `label/value` pairs of an identifier
pub(crate) struct Segments<'a> {
    input: &'a str,
    casing: Casing,
    pairs: std::vec::IntoIter<(&'a str, &'a str)>,
}

impl<'a> Segments<'a> {
    pub(crate) fn new(input: &'a str, casing: Casing) -> Result<Self, IdError> {
        let Some(path) = input.strip_prefix('/') else {
            return Err(IdError::Malformed {
                input: input.to_owned(),
            });
        };
        let components: Vec<&str> = path.split('/').collect();
        let mut pairs = Vec::with_capacity(components.len() / 2);
        for chunk in components.chunks(2) {
            let label = chunk[0];
            let value = chunk.get(1).copied().unwrap_or_default();
            if label.is_empty() {
                return Err(IdError::Malformed {
                    input: input.to_owned(),
                });
            }
            if value.is_empty() {
                return Err(IdError::EmptySegment {
                    label: label.to_owned(),
                    input: input.to_owned(),
                });
            }
            pairs.push((label, value));
        }
        Ok(Self {
            input,
            casing,
            pairs: pairs.into_iter(),
        })
    }

    /// Pop the value of the next segment, which must be labelled `label`
    pub(crate) fn pop(&mut self, label: &Label) -> Result<String, IdError> {
        let Some((found, value)) = self.pairs.next() else {
            return Err(self.missing(label));
        };
        if label.matches(found, self.casing) {
            if found != label.canonical {
                tracing::warn!(
                    input = self.input,
                    found,
                    canonical = label.canonical,
                    "recovered a historical segment casing"
                );
            }
            return Ok(value.to_owned());
        }
        if self.casing == Casing::Insensitive && found.eq_ignore_ascii_case(label.canonical) {
            return Err(IdError::UnrecognizedCasingVariant {
                label: label.canonical,
                found: found.to_owned(),
                input: self.input.to_owned(),
            });
        }
        Err(self.missing(label))
    }

    /// Pop the `providers` segment and check its namespace
    pub(crate) fn pop_provider(&mut self, namespace: &'static str) -> Result<(), IdError> {
        let found = self.pop(&PROVIDERS)?;
        let matches = match self.casing {
            Casing::Exact => found == namespace,
            Casing::Insensitive => found.eq_ignore_ascii_case(namespace),
        };
        if matches {
            Ok(())
        } else {
            Err(IdError::ProviderMismatch {
                expected: namespace,
                found,
                input: self.input.to_owned(),
            })
        }
    }

    /// Pop the segments shared by every resource group scoped identifier
    pub(crate) fn pop_scope(&mut self) -> Result<(String, String), IdError> {
        let subscription_id = self.pop(&SUBSCRIPTIONS)?;
        let resource_group = self.pop(&RESOURCE_GROUPS)?;
        self.pop_provider(PROVIDER_NAMESPACE)?;
        Ok((subscription_id, resource_group))
    }

    /// Every segment must have been consumed
    pub(crate) fn finish(mut self) -> Result<(), IdError> {
        match self.pairs.next() {
            None => Ok(()),
            Some((label, _)) => Err(IdError::UnexpectedSegments {
                segment: label.to_owned(),
                input: self.input.to_owned(),
            }),
        }
    }

    fn missing(&self, label: &Label) -> IdError {
        IdError::MissingSegment {
            label: label.canonical,
            input: self.input.to_owned(),
        }
    }
}

pub(crate) fn format_scope(
    f: &mut std::fmt::Formatter<'_>,
    subscription_id: &str,
    resource_group: &str,
) -> std::fmt::Result {
    write!(
        f,
        "/{}/{}/{}/{}/{}/{}",
        SUBSCRIPTIONS.canonical,
        subscription_id,
        RESOURCE_GROUPS.canonical,
        resource_group,
        PROVIDERS.canonical,
        PROVIDER_NAMESPACE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_reject_missing_leading_slash() {
        let err = Segments::new("subscriptions/S", Casing::Exact)
            .err()
            .unwrap();
        assert!(matches!(err, IdError::Malformed { .. }));
    }

    #[test]
    fn segments_reject_dangling_label() {
        let err = Segments::new("/subscriptions/S/resourceGroups", Casing::Exact)
            .err()
            .unwrap();
        assert_eq!(
            err,
            IdError::EmptySegment {
                label: "resourceGroups".into(),
                input: "/subscriptions/S/resourceGroups".into(),
            }
        );
    }

    #[test]
    fn segments_reject_trailing_slash() {
        let err = Segments::new("/subscriptions/S/", Casing::Exact)
            .err()
            .unwrap();
        assert!(matches!(err, IdError::Malformed { .. }));
    }

    #[test]
    fn provider_namespace_is_case_sensitive_in_exact_mode() {
        let mut segments = Segments::new(
            "/subscriptions/S/resourceGroups/G/providers/microsoft.network",
            Casing::Exact,
        )
        .unwrap();
        assert!(matches!(
            segments.pop_scope(),
            Err(IdError::ProviderMismatch { .. })
        ));

        let mut segments = Segments::new(
            "/subscriptions/S/resourceGroups/G/providers/microsoft.network",
            Casing::Insensitive,
        )
        .unwrap();
        assert_eq!(
            segments.pop_scope().unwrap(),
            ("S".to_owned(), "G".to_owned())
        );
        segments.finish().unwrap();
    }

    #[test]
    fn error_message_names_input_and_label() {
        let err = IdError::MissingSegment {
            label: "frontDoors",
            input: "/subscriptions/S".into(),
        };
        let message = err.to_string();
        assert!(message.contains("/subscriptions/S"));
        assert!(message.contains("frontDoors"));
        assert_eq!(err.input(), "/subscriptions/S");
    }
}
