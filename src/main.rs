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

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use azurerm_frontdoor::{
    migrate::{
        canonicalize_id, upgrade_custom_https_state, upgrade_firewall_policy_state,
        upgrade_front_door_state,
    },
    schema::{custom_https_configuration_schema, firewall_policy_schema, front_door_schema},
    settings::Settings,
    validate::{validate_custom_https_configuration, validate_firewall_policy, validate_front_door},
    value::AttributeTree,
};

#[derive(Parser)]
#[command(name = "frontdoor-state")]
#[command(about = "Inspect and upgrade Azure Front Door configurations and states", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ResourceKind {
    /// azurerm_frontdoor
    Frontdoor,
    /// azurerm_frontdoor_custom_https_configuration
    CustomHttps,
    /// azurerm_frontdoor_firewall_policy
    FirewallPolicy,
}

impl ResourceKind {
    fn type_name(self) -> &'static str {
        match self {
            ResourceKind::Frontdoor => "azurerm_frontdoor",
            ResourceKind::CustomHttps => "azurerm_frontdoor_custom_https_configuration",
            ResourceKind::FirewallPolicy => "azurerm_frontdoor_firewall_policy",
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Upgrade a JSON state written by an older schema version
    Upgrade {
        resource: ResourceKind,
        /// Schema version of the stored state
        version: i64,
        /// Path to the JSON state, stdin when omitted
        file: Option<PathBuf>,
    },
    /// Check a JSON configuration and print it with its defaults filled
    Validate {
        resource: ResourceKind,
        /// Path to the JSON configuration, stdin when omitted
        file: Option<PathBuf>,
    },
    /// Print the canonical form of a resource id
    Canonicalize {
        /// Resource type name, or child segment label (backendPools, routingRules...)
        resource: String,
        id: String,
    },
}

fn read_tree(file: Option<&PathBuf>) -> Result<AttributeTree> {
    let content = match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            content
        }
    };
    serde_json::from_str(&content).context("Invalid JSON object")
}

fn main() -> Result<()> {
    Settings::from_env()?.init_logging()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Upgrade {
            resource,
            version,
            file,
        } => {
            let state = read_tree(file.as_ref())?;
            tracing::info!(resource = resource.type_name(), version, "upgrading state");
            let upgraded = match resource {
                ResourceKind::Frontdoor => upgrade_front_door_state(version, state)?,
                ResourceKind::CustomHttps => upgrade_custom_https_state(version, state)?,
                ResourceKind::FirewallPolicy => upgrade_firewall_policy_state(version, state)?,
            };
            println!("{}", serde_json::to_string_pretty(&upgraded)?);
        }
        Commands::Validate { resource, file } => {
            let config = read_tree(file.as_ref())?;
            let (mut diags, schema) = match resource {
                ResourceKind::Frontdoor => (validate_front_door(&config), front_door_schema()),
                ResourceKind::CustomHttps => (
                    validate_custom_https_configuration(&config),
                    custom_https_configuration_schema(),
                ),
                ResourceKind::FirewallPolicy => {
                    (validate_firewall_policy(&config), firewall_policy_schema())
                }
            };
            let normalized = schema.normalize(&config, &mut diags);
            if diags.has_errors() {
                return Err(diags.prefixed("validate", resource.type_name()).into());
            }
            for warning in &diags.warnings {
                eprintln!("warning: {warning}");
            }
            println!("{}", serde_json::to_string_pretty(&normalized)?);
        }
        Commands::Canonicalize { resource, id } => {
            println!("{}", canonicalize_id(&resource, &id)?);
        }
    }
    Ok(())
}
