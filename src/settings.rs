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

use std::{env, fs::File, path::PathBuf, sync::Mutex};

use anyhow::{anyhow, Result};

use crate::{
    translate::{OrderingWitness, TranslateError},
    value::AttributeTree,
};

/// Format of the log records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Settings read from the environment
///
/// * `PLUGIN_LOG_FILE`: file receiving the logs, no logs when unset
/// * `PLUGIN_LOG_LEVEL`: maximum level of the logs, `TRACE` by default
/// * `PLUGIN_LOG_FORMAT`: `text` (default) or `json`
/// * `ARM_FRONTDOOR_EXPLICIT_ORDER`: `false` to keep the children in the order
///   returned by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_file: Option<PathBuf>,
    pub log_level: tracing::Level,
    pub log_format: LogFormat,
    pub explicit_order: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_file: None,
            log_level: tracing::Level::TRACE,
            log_format: LogFormat::Text,
            explicit_order: true,
        }
    }
}

impl Settings {
    /// Read the settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the settings from `lookup`
    ///
    /// ```
    /// # use azurerm_frontdoor::settings::Settings;
    /// let settings = Settings::from_lookup(|name| match name {
    ///     "PLUGIN_LOG_LEVEL" => Some("debug".to_owned()),
    ///     "ARM_FRONTDOOR_EXPLICIT_ORDER" => Some("false".to_owned()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(settings.log_level, tracing::Level::DEBUG);
    /// assert!(!settings.explicit_order);
    /// ```
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = Self::default();
        if let Some(path) = lookup("PLUGIN_LOG_FILE").filter(|path| !path.is_empty()) {
            settings.log_file = Some(path.into());
        }
        if let Some(level) = lookup("PLUGIN_LOG_LEVEL").filter(|level| !level.is_empty()) {
            settings.log_level = level
                .parse()
                .map_err(|err| anyhow!("PLUGIN_LOG_LEVEL={level:?}: {err}"))?;
        }
        if let Some(format) = lookup("PLUGIN_LOG_FORMAT") {
            settings.log_format = match format.to_ascii_lowercase().as_str() {
                "" | "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => return Err(anyhow!("PLUGIN_LOG_FORMAT={format:?}: expected text or json")),
            };
        }
        if let Some(order) = lookup("ARM_FRONTDOOR_EXPLICIT_ORDER") {
            settings.explicit_order = match order.to_ascii_lowercase().as_str() {
                "" | "1" | "true" => true,
                "0" | "false" => false,
                _ => {
                    return Err(anyhow!(
                        "ARM_FRONTDOOR_EXPLICIT_ORDER={order:?}: expected true or false"
                    ))
                }
            };
        }
        Ok(settings)
    }

    /// Install the global subscriber when a log file is configured
    pub fn init_logging(&self) -> Result<()> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };
        let log_file = File::create(path)?;
        let builder = tracing_subscriber::fmt()
            .with_max_level(self.log_level)
            .with_ansi(false)
            .with_writer(Mutex::new(log_file));
        match self.log_format {
            LogFormat::Text => builder.try_init(),
            LogFormat::Json => builder.json().try_init(),
        }
        .map_err(|err| anyhow!(err))
    }

    /// Ordering witness to flatten a Front Door with
    ///
    /// The witness persisted in `state` when explicit ordering is enabled,
    /// an empty witness otherwise.
    pub fn witness(&self, state: Option<&AttributeTree>) -> Result<OrderingWitness, TranslateError> {
        match state {
            Some(state) if self.explicit_order => OrderingWitness::from_state(state),
            _ => Ok(OrderingWitness::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{map, translate::EXPLICIT_RESOURCE_ORDER, value::AttributeValue};

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn defaults_without_environment() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(Settings::from_lookup(lookup(&[("PLUGIN_LOG_LEVEL", "loud")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("ARM_FRONTDOOR_EXPLICIT_ORDER", "maybe")])).is_err());
        let settings = Settings::from_lookup(lookup(&[
            ("PLUGIN_LOG_FILE", "/tmp/frontdoor.log"),
            ("PLUGIN_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/frontdoor.log")));
        assert_eq!(settings.log_format, LogFormat::Json);
    }

    #[test]
    fn disabled_ordering_ignores_the_persisted_witness() {
        let state: AttributeTree = map! {
            EXPLICIT_RESOURCE_ORDER => AttributeValue::single(map! {
                "backend_pool_ids" => vec!["/b", "/a"],
            }),
        };
        let enabled = Settings::default();
        assert_eq!(
            enabled.witness(Some(&state)).unwrap().backend_pool_ids,
            vec!["/b", "/a"]
        );
        let disabled = Settings {
            explicit_order: false,
            ..Default::default()
        };
        assert!(disabled.witness(Some(&state)).unwrap().is_empty());
    }
}
