//! Host vector - the flat numeric view of a host
//!
//! A [`HostVector`] projects a [`Host`] into a fixed-width `f64` vector that
//! an agent's observation pipeline can consume directly. The host owns its
//! vector and pushes every status change into it, so the encoding never drifts
//! from the authoritative state.
//!
//! Layout (private to this module, stable for a given service/OS vocabulary):
//!
//! ```text
//! [subnet, id, compromised, reachable, discovered, value, discovery_value,
//!  service_0 .. service_n, os_0 .. os_m]
//! ```
//!
//! Services and OS names appear in name order.

use serde::{Deserialize, Serialize};

use crate::{Address, CapabilityMap, Host, HostError, HostStatus, Result};

const SUBNET_IDX: usize = 0;
const HOST_ID_IDX: usize = 1;
const COMPROMISED_IDX: usize = 2;
const REACHABLE_IDX: usize = 3;
const DISCOVERED_IDX: usize = 4;
const VALUE_IDX: usize = 5;
const DISCOVERY_VALUE_IDX: usize = 6;
const SERVICE_START_IDX: usize = 7;

/// Which host fields an observer is allowed to see
///
/// Fields that are not permitted are written as `0.0` in the observed vector.
/// The address is always visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObservationMask {
    pub compromised: bool,
    pub reachable: bool,
    pub discovered: bool,
    /// Covers both `value` and `discovery_value`
    pub value: bool,
    pub services: bool,
    pub os: bool,
}

impl ObservationMask {
    /// Mask that hides everything except the address
    pub fn none() -> Self {
        Self::default()
    }

    /// Mask that reveals every field
    pub fn full() -> Self {
        Self {
            compromised: true,
            reachable: true,
            discovered: true,
            value: true,
            services: true,
            os: true,
        }
    }
}

/// Human readable decoding of a host vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadableHost {
    pub address: Address,
    pub compromised: bool,
    pub reachable: bool,
    pub discovered: bool,
    pub value: f64,
    pub discovery_value: f64,
    pub services: CapabilityMap,
    pub os: CapabilityMap,
}

/// Numeric encoding of a single host
///
/// Always at least as wide as the fixed fields; built only from a host's
/// state.
#[derive(Debug, Clone, PartialEq)]
pub struct HostVector {
    /// The encoding itself
    vector: Vec<f64>,
    /// Service names, in encoding order
    services: Vec<String>,
    /// OS names, in encoding order
    os: Vec<String>,
}

impl HostVector {
    /// Encode the current state of `host`
    pub fn new(host: &Host) -> Self {
        Self::encode(
            host.address(),
            host.status(),
            host.get_value(),
            host.discovery_value(),
            host.services(),
            host.os(),
        )
    }

    pub(crate) fn encode(
        address: Address,
        status: HostStatus,
        value: f64,
        discovery_value: f64,
        services: &CapabilityMap,
        os: &CapabilityMap,
    ) -> Self {
        let service_names: Vec<String> = services.keys().cloned().collect();
        let os_names: Vec<String> = os.keys().cloned().collect();

        let mut vector = vec![0.0; SERVICE_START_IDX + service_names.len() + os_names.len()];
        vector[SUBNET_IDX] = f64::from(address.subnet);
        vector[HOST_ID_IDX] = f64::from(address.id);
        vector[COMPROMISED_IDX] = encode_flag(status.compromised);
        vector[REACHABLE_IDX] = encode_flag(status.reachable);
        vector[DISCOVERED_IDX] = encode_flag(status.discovered);
        vector[VALUE_IDX] = value;
        vector[DISCOVERY_VALUE_IDX] = discovery_value;

        for (i, active) in services.values().enumerate() {
            vector[SERVICE_START_IDX + i] = encode_flag(*active);
        }
        let os_start = SERVICE_START_IDX + service_names.len();
        for (i, active) in os.values().enumerate() {
            vector[os_start + i] = encode_flag(*active);
        }

        Self {
            vector,
            services: service_names,
            os: os_names,
        }
    }

    /// Width of the encoding
    pub fn state_size(&self) -> usize {
        self.vector.len()
    }

    /// The full, unmasked encoding
    pub fn vector(&self) -> &[f64] {
        &self.vector
    }

    pub fn set_compromised(&mut self, compromised: bool) {
        self.vector[COMPROMISED_IDX] = encode_flag(compromised);
    }

    pub fn set_reachable(&mut self, reachable: bool) {
        self.vector[REACHABLE_IDX] = encode_flag(reachable);
    }

    pub fn set_discovered(&mut self, discovered: bool) {
        self.vector[DISCOVERED_IDX] = encode_flag(discovered);
    }

    /// Produce a copy of the encoding with non-permitted fields zeroed
    pub fn observe(&self, mask: &ObservationMask) -> Vec<f64> {
        let mut obs = vec![0.0; self.vector.len()];
        obs[SUBNET_IDX] = self.vector[SUBNET_IDX];
        obs[HOST_ID_IDX] = self.vector[HOST_ID_IDX];

        if mask.compromised {
            obs[COMPROMISED_IDX] = self.vector[COMPROMISED_IDX];
        }
        if mask.reachable {
            obs[REACHABLE_IDX] = self.vector[REACHABLE_IDX];
        }
        if mask.discovered {
            obs[DISCOVERED_IDX] = self.vector[DISCOVERED_IDX];
        }
        if mask.value {
            obs[VALUE_IDX] = self.vector[VALUE_IDX];
            obs[DISCOVERY_VALUE_IDX] = self.vector[DISCOVERY_VALUE_IDX];
        }
        if mask.services {
            let range = self.service_range();
            obs[range.clone()].copy_from_slice(&self.vector[range]);
        }
        if mask.os {
            let range = self.os_range();
            obs[range.clone()].copy_from_slice(&self.vector[range]);
        }

        obs
    }

    /// Decode any vector with this layout back into readable form
    ///
    /// The vector does not have to be this host's own; observations of other
    /// hosts from the same scenario share the layout.
    pub fn decode(&self, vector: &[f64]) -> Result<ReadableHost> {
        if vector.len() != self.vector.len() {
            return Err(HostError::VectorLength {
                expected: self.vector.len(),
                actual: vector.len(),
            });
        }

        let services = self
            .services
            .iter()
            .zip(&vector[self.service_range()])
            .map(|(name, v)| (name.clone(), decode_flag(*v)))
            .collect();
        let os = self
            .os
            .iter()
            .zip(&vector[self.os_range()])
            .map(|(name, v)| (name.clone(), decode_flag(*v)))
            .collect();

        Ok(ReadableHost {
            address: Address::new(
                decode_index(vector[SUBNET_IDX]),
                decode_index(vector[HOST_ID_IDX]),
            ),
            compromised: decode_flag(vector[COMPROMISED_IDX]),
            reachable: decode_flag(vector[REACHABLE_IDX]),
            discovered: decode_flag(vector[DISCOVERED_IDX]),
            value: vector[VALUE_IDX],
            discovery_value: vector[DISCOVERY_VALUE_IDX],
            services,
            os,
        })
    }

    fn service_range(&self) -> std::ops::Range<usize> {
        SERVICE_START_IDX..SERVICE_START_IDX + self.services.len()
    }

    fn os_range(&self) -> std::ops::Range<usize> {
        let start = SERVICE_START_IDX + self.services.len();
        start..start + self.os.len()
    }
}

fn encode_flag(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

fn decode_flag(v: f64) -> bool {
    v >= 0.5
}

fn decode_index(v: f64) -> u32 {
    v.clamp(0.0, f64::from(u32::MAX)).round() as u32
}
