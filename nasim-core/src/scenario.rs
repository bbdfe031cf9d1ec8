//! Scenario definitions - hosts described as data
//!
//! A scenario file lists the OS and service vocabulary of a network and, for
//! each host, which of those names are active. Every host is expanded to the
//! full vocabulary so all hosts of a scenario share one vector layout.
//!
//! ```json
//! {
//!   "os": ["linux", "windows"],
//!   "services": ["ssh", "ftp", "http"],
//!   "hosts": [
//!     { "address": [1, 0], "os": ["linux"], "services": ["ssh"], "value": 10.0 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::{Action, ActionObservation, Address, CapabilityMap, Host, HostError, Result};

/// Configuration for a single host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Host address as `[subnet, id]`
    pub address: Address,
    /// Active OS names
    #[serde(default)]
    pub os: Vec<String>,
    /// Active service names
    #[serde(default)]
    pub services: Vec<String>,
    /// Reward for compromising the host
    #[serde(default)]
    pub value: f64,
    /// Reward for discovering the host
    #[serde(default)]
    pub discovery_value: f64,
    #[serde(default)]
    pub compromised: bool,
    #[serde(default)]
    pub reachable: bool,
    #[serde(default)]
    pub discovered: bool,
}

impl HostConfig {
    /// Build a host against the scenario vocabulary
    pub fn build(&self, os_names: &[String], service_names: &[String]) -> Result<Host> {
        let os = expand(&self.os, os_names).map_err(|name| HostError::UnknownOs {
            address: self.address,
            name,
        })?;
        let services =
            expand(&self.services, service_names).map_err(|name| HostError::UnknownService {
                address: self.address,
                name,
            })?;

        if !os.is_empty() && !os.values().any(|active| *active) {
            warn!(address = %self.address, "host has no active OS");
        }

        Host::builder(self.address)
            .os_map(os)
            .services(services)
            .value(self.value)
            .discovery_value(self.discovery_value)
            .compromised(self.compromised)
            .reachable(self.reachable)
            .discovered(self.discovered)
            .build()
    }
}

/// Expand the active names into a map over the whole vocabulary
///
/// Returns the first active name that is not in the vocabulary as the error.
fn expand(active: &[String], vocabulary: &[String]) -> std::result::Result<CapabilityMap, String> {
    if let Some(unknown) = active.iter().find(|name| !vocabulary.contains(*name)) {
        return Err(unknown.clone());
    }

    Ok(vocabulary
        .iter()
        .map(|name| (name.clone(), active.contains(name)))
        .collect())
}

/// Configuration for a whole scenario
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Every OS name a host may run
    #[serde(default)]
    pub os: Vec<String>,
    /// Every service name a host may run
    #[serde(default)]
    pub services: Vec<String>,
    /// Hosts in the scenario
    #[serde(default)]
    pub hosts: Vec<HostConfig>,
}

impl ScenarioConfig {
    /// Parse a scenario from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scenario from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Build every host, rejecting duplicate addresses
    pub fn build_hosts(&self) -> Result<Vec<Host>> {
        let mut seen = BTreeSet::new();
        let mut hosts = Vec::with_capacity(self.hosts.len());

        for config in &self.hosts {
            if !seen.insert(config.address) {
                return Err(HostError::DuplicateAddress(config.address));
            }
            hosts.push(config.build(&self.os, &self.services)?);
        }

        Ok(hosts)
    }
}

/// Built hosts of a scenario, keyed by address
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    hosts: BTreeMap<Address, Host>,
}

impl Scenario {
    /// Build a scenario from its configuration
    pub fn from_config(config: &ScenarioConfig) -> Result<Self> {
        let hosts = config
            .build_hosts()?
            .into_iter()
            .map(|host| (host.address(), host))
            .collect::<BTreeMap<_, _>>();

        info!(
            hosts = hosts.len(),
            os = config.os.len(),
            services = config.services.len(),
            "scenario loaded"
        );
        Ok(Self { hosts })
    }

    /// Load and build a scenario file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_config(&ScenarioConfig::from_file(path)?)
    }

    /// Get a host by address
    pub fn host(&self, address: Address) -> Option<&Host> {
        self.hosts.get(&address)
    }

    /// Get a mutable host by address
    pub fn host_mut(&mut self, address: Address) -> Option<&mut Host> {
        self.hosts.get_mut(&address)
    }

    /// Hosts in address order
    pub fn hosts(&self) -> impl Iterator<Item = &Host> {
        self.hosts.values()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Route an action to its target host
    pub fn perform_action(&mut self, action: &Action) -> Result<ActionObservation> {
        self.hosts
            .get_mut(&action.target)
            .ok_or(HostError::HostNotFound(action.target))?
            .perform_action(action)
    }

    /// Reset every host to its initial status
    pub fn reset(&mut self) {
        for host in self.hosts.values_mut() {
            host.reset();
        }
    }
}
