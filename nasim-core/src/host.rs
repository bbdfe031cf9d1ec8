//! Host primitive - a single machine in the simulated network
//!
//! A host carries a fixed fingerprint (address, OS, services, value) and a
//! small amount of mission state (compromised, reachable, discovered). The
//! mission state is mirrored into an owned [`HostVector`]; every write goes
//! through [`Host::apply`] so the two views cannot diverge.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::{debug, trace};

use crate::{
    Action, ActionKind, ActionObservation, Address, CapabilityMap, HostError, HostVector,
    ObservationMask, ReadableHost, Result,
};

/// Mutable mission state of a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HostStatus {
    pub compromised: bool,
    pub reachable: bool,
    pub discovered: bool,
}

/// A single change to a host's mission state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Compromised(bool),
    Reachable(bool),
    Discovered(bool),
}

/// A host in the simulated network
#[derive(Debug, Clone)]
pub struct Host {
    address: Address,
    os: CapabilityMap,
    services: CapabilityMap,
    value: f64,
    discovery_value: f64,
    status: HostStatus,
    /// Status the host started the episode with
    initial: HostStatus,
    vector: HostVector,
}

impl Host {
    /// Create a new host builder
    pub fn builder(address: Address) -> HostBuilder {
        HostBuilder::new(address)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Service name -> active map
    pub fn services(&self) -> &CapabilityMap {
        &self.services
    }

    /// OS name -> active map
    pub fn os(&self) -> &CapabilityMap {
        &self.os
    }

    pub fn get_value(&self) -> f64 {
        self.value
    }

    pub fn discovery_value(&self) -> f64 {
        self.discovery_value
    }

    pub fn compromised(&self) -> bool {
        self.status.compromised
    }

    pub fn reachable(&self) -> bool {
        self.status.reachable
    }

    pub fn discovered(&self) -> bool {
        self.status.discovered
    }

    /// Snapshot of the mission state
    pub fn status(&self) -> HostStatus {
        self.status
    }

    pub fn set_compromised(&mut self, compromised: bool) {
        self.apply(StatusChange::Compromised(compromised));
    }

    pub fn set_reachable(&mut self, reachable: bool) {
        self.apply(StatusChange::Reachable(reachable));
    }

    pub fn set_discovered(&mut self, discovered: bool) {
        self.apply(StatusChange::Discovered(discovered));
    }

    /// Apply a status change to both the host and its vector
    ///
    /// Every mission state write goes through here, except [`Host::reset`]
    /// which rebuilds the vector wholesale.
    pub fn apply(&mut self, change: StatusChange) {
        trace!(address = %self.address, ?change, "status change");
        match change {
            StatusChange::Compromised(v) => {
                self.status.compromised = v;
                self.vector.set_compromised(v);
            }
            StatusChange::Reachable(v) => {
                self.status.reachable = v;
                self.vector.set_reachable(v);
            }
            StatusChange::Discovered(v) => {
                self.status.discovered = v;
                self.vector.set_discovered(v);
            }
        }
    }

    /// Resolve an action against this host
    ///
    /// Scans always succeed and reveal the matching map. An exploit succeeds
    /// when its service is active and its OS requirement (if any) is met; the
    /// host's value is paid only on the first compromise.
    ///
    /// # Errors
    /// Returns [`HostError::UnknownService`] when an exploit names a service
    /// that is not part of this host's service map.
    pub fn perform_action(&mut self, action: &Action) -> Result<ActionObservation> {
        let obs = match &action.kind {
            ActionKind::ServiceScan => ActionObservation::success(0.0).with_services(&self.services),
            ActionKind::OsScan => ActionObservation::success(0.0).with_os(&self.os),
            ActionKind::Exploit { service, os } => self.exploit(service, os.as_deref())?,
        };

        debug!(
            address = %self.address,
            action = %action,
            success = obs.success,
            value = obs.value,
            "action resolved"
        );
        Ok(obs)
    }

    fn exploit(&mut self, service: &str, os: Option<&str>) -> Result<ActionObservation> {
        let service_active = self.service_present(service)?;

        // An OS missing from the map is an unmet requirement, not an error
        let os_met = match os {
            None => true,
            Some(name) => self.os.get(name).copied().unwrap_or(false),
        };

        if !(service_active && os_met) {
            return Ok(ActionObservation::failure());
        }

        let value = if self.status.compromised {
            0.0
        } else {
            self.apply(StatusChange::Compromised(true));
            self.value
        };

        Ok(ActionObservation::success(value)
            .with_services(&self.services)
            .with_os(&self.os))
    }

    /// Masked numeric observation of this host
    pub fn observe(&self, mask: ObservationMask) -> Vec<f64> {
        self.vector.observe(&mask)
    }

    /// Whether the host runs `service`
    pub fn service_present(&self, service: &str) -> Result<bool> {
        self.services
            .get(service)
            .copied()
            .ok_or_else(|| HostError::UnknownService {
                address: self.address,
                name: service.to_string(),
            })
    }

    /// Whether the host runs `os`
    pub fn is_running_os(&self, os: &str) -> Result<bool> {
        self.os.get(os).copied().ok_or_else(|| HostError::UnknownOs {
            address: self.address,
            name: os.to_string(),
        })
    }

    /// The full, unmasked encoding
    pub fn numpy(&self) -> &[f64] {
        self.vector.vector()
    }

    /// Width of the host's encoding
    pub fn state_size(&self) -> usize {
        self.vector.state_size()
    }

    /// Rebuild the vector from the current authoritative state
    pub fn update_vector(&mut self) {
        self.vector = HostVector::new(self);
        trace!(address = %self.address, size = self.vector.state_size(), "vector rebuilt");
    }

    /// Decode a vector with this host's layout
    pub fn get_readable(&self, vector: &[f64]) -> Result<ReadableHost> {
        self.vector.decode(vector)
    }

    /// Restore the status the host was built with
    pub fn reset(&mut self) {
        self.status = self.initial;
        self.update_vector();
    }

    /// Compare mission state, which equality ignores
    pub fn same_status(&self, other: &Host) -> bool {
        self.status == other.status
    }
}

impl PartialEq for Host {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
            && self.value == other.value
            && self.services == other.services
            && self.os == other.os
    }
}

// Values are validated finite at build time
impl Eq for Host {}

impl Hash for Host {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
        // 0.0 and -0.0 compare equal and must hash equal
        let value = if self.value == 0.0 { 0.0 } else { self.value };
        value.to_bits().hash(state);
        self.services.hash(state);
        self.os.hash(state);
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Host: {{")?;
        writeln!(f, "\taddress: {}", self.address)?;
        writeln!(f, "\tcompromised: {}", self.status.compromised)?;
        writeln!(f, "\treachable: {}", self.status.reachable)?;
        writeln!(f, "\tvalue: {}", self.value)?;
        writeln!(f, "\tservices: {{")?;
        for (name, active) in &self.services {
            writeln!(f, "\t\t{}: {}", name, active)?;
        }
        writeln!(f, "\t}}")?;
        writeln!(f, "\tOS: {{")?;
        for (name, active) in &self.os {
            writeln!(f, "\t\t{}: {}", name, active)?;
        }
        writeln!(f, "\t}}")?;
        write!(f, "}}")
    }
}

/// Builder for creating hosts
#[derive(Debug)]
pub struct HostBuilder {
    address: Address,
    os: CapabilityMap,
    services: CapabilityMap,
    value: f64,
    discovery_value: f64,
    status: HostStatus,
}

impl HostBuilder {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            os: CapabilityMap::new(),
            services: CapabilityMap::new(),
            value: 0.0,
            discovery_value: 0.0,
            status: HostStatus::default(),
        }
    }

    /// Add a single service
    pub fn service(mut self, name: &str, active: bool) -> Self {
        self.services.insert(name.to_string(), active);
        self
    }

    /// Replace the service map
    pub fn services(mut self, services: CapabilityMap) -> Self {
        self.services = services;
        self
    }

    /// Add a single OS
    pub fn os(mut self, name: &str, active: bool) -> Self {
        self.os.insert(name.to_string(), active);
        self
    }

    /// Replace the OS map
    pub fn os_map(mut self, os: CapabilityMap) -> Self {
        self.os = os;
        self
    }

    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn discovery_value(mut self, discovery_value: f64) -> Self {
        self.discovery_value = discovery_value;
        self
    }

    pub fn compromised(mut self, compromised: bool) -> Self {
        self.status.compromised = compromised;
        self
    }

    pub fn reachable(mut self, reachable: bool) -> Self {
        self.status.reachable = reachable;
        self
    }

    pub fn discovered(mut self, discovered: bool) -> Self {
        self.status.discovered = discovered;
        self
    }

    /// Build the host and its vector
    pub fn build(self) -> Result<Host> {
        check_finite("value", self.value)?;
        check_finite("discovery_value", self.discovery_value)?;

        let vector = HostVector::encode(
            self.address,
            self.status,
            self.value,
            self.discovery_value,
            &self.services,
            &self.os,
        );

        Ok(Host {
            address: self.address,
            os: self.os,
            services: self.services,
            value: self.value,
            discovery_value: self.discovery_value,
            status: self.status,
            initial: self.status,
            vector,
        })
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(HostError::InvalidValue { field, value })
    }
}
